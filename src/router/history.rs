//! Browser history integration.
//!
//! On `wasm32` this wraps the History API (`pushState` / `replaceState` /
//! `back` / `forward`). Off-wasm it keeps a thread-local entry stack with
//! the same contract so navigation is testable without a browser.

use serde::{Deserialize, Serialize};

/// The state object stored with each history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
	pub path: String,
}

#[cfg(target_arch = "wasm32")]
mod imp {
	use wasm_bindgen::JsValue;

	use super::HistoryState;

	fn history() -> Result<web_sys::History, String> {
		let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
		window.history().map_err(|e| format!("history unavailable: {e:?}"))
	}

	fn state_value(path: &str) -> Result<JsValue, String> {
		let state = HistoryState {
			path: path.to_string(),
		};
		let json = serde_json::to_string(&state).map_err(|e| e.to_string())?;
		Ok(JsValue::from_str(&json))
	}

	pub fn push_state(path: &str) -> Result<(), String> {
		history()?
			.push_state_with_url(&state_value(path)?, "", Some(path))
			.map_err(|e| format!("pushState failed: {e:?}"))
	}

	pub fn replace_state(path: &str) -> Result<(), String> {
		history()?
			.replace_state_with_url(&state_value(path)?, "", Some(path))
			.map_err(|e| format!("replaceState failed: {e:?}"))
	}

	pub fn back() -> Result<(), String> {
		history()?.back().map_err(|e| format!("back failed: {e:?}"))
	}

	pub fn forward() -> Result<(), String> {
		history()?
			.forward()
			.map_err(|e| format!("forward failed: {e:?}"))
	}

	pub fn current_path() -> Result<String, String> {
		let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
		window
			.location()
			.pathname()
			.map_err(|e| format!("pathname unavailable: {e:?}"))
	}
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
	use std::cell::RefCell;

	use super::HistoryState;

	struct Stack {
		entries: Vec<HistoryState>,
		index: usize,
	}

	impl Stack {
		fn new() -> Self {
			Self {
				entries: vec![HistoryState {
					path: "/".to_string(),
				}],
				index: 0,
			}
		}
	}

	thread_local! {
		static STACK: RefCell<Stack> = RefCell::new(Stack::new());
	}

	pub fn push_state(path: &str) -> Result<(), String> {
		STACK.with(|stack| {
			let mut stack = stack.borrow_mut();
			let index = stack.index;
			// Forward entries are discarded, as pushState does.
			stack.entries.truncate(index + 1);
			stack.entries.push(HistoryState {
				path: path.to_string(),
			});
			stack.index += 1;
		});
		Ok(())
	}

	pub fn replace_state(path: &str) -> Result<(), String> {
		STACK.with(|stack| {
			let mut stack = stack.borrow_mut();
			let index = stack.index;
			stack.entries[index] = HistoryState {
				path: path.to_string(),
			};
		});
		Ok(())
	}

	pub fn back() -> Result<(), String> {
		STACK.with(|stack| {
			let mut stack = stack.borrow_mut();
			if stack.index > 0 {
				stack.index -= 1;
			}
		});
		Ok(())
	}

	pub fn forward() -> Result<(), String> {
		STACK.with(|stack| {
			let mut stack = stack.borrow_mut();
			if stack.index + 1 < stack.entries.len() {
				stack.index += 1;
			}
		});
		Ok(())
	}

	pub fn current_path() -> Result<String, String> {
		STACK.with(|stack| {
			let stack = stack.borrow();
			Ok(stack.entries[stack.index].path.clone())
		})
	}

	/// Restores the stack to a single `/` entry. Test helper.
	pub fn reset() {
		STACK.with(|stack| *stack.borrow_mut() = Stack::new());
	}
}

pub use imp::{back, current_path, forward, push_state, replace_state};

#[cfg(not(target_arch = "wasm32"))]
pub use imp::reset as reset_history;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use serial_test::serial;

	#[test]
	#[serial]
	fn push_then_back_then_forward() {
		reset_history();
		push_state("/a").unwrap();
		push_state("/b").unwrap();
		assert_eq!(current_path().unwrap(), "/b");

		back().unwrap();
		assert_eq!(current_path().unwrap(), "/a");

		forward().unwrap();
		assert_eq!(current_path().unwrap(), "/b");
	}

	#[test]
	#[serial]
	fn push_discards_forward_entries() {
		reset_history();
		push_state("/a").unwrap();
		push_state("/b").unwrap();
		back().unwrap();
		push_state("/c").unwrap();

		assert_eq!(current_path().unwrap(), "/c");
		forward().unwrap();
		assert_eq!(current_path().unwrap(), "/c");
	}

	#[test]
	#[serial]
	fn replace_keeps_position() {
		reset_history();
		push_state("/a").unwrap();
		replace_state("/a2").unwrap();
		assert_eq!(current_path().unwrap(), "/a2");

		back().unwrap();
		assert_eq!(current_path().unwrap(), "/");
	}

	#[test]
	#[serial]
	fn back_at_start_is_a_no_op() {
		reset_history();
		back().unwrap();
		assert_eq!(current_path().unwrap(), "/");
	}
}
