//! Reactive state cell.

use std::cell::RefCell;
use std::rc::Rc;

use super::runtime::{self, NodeId, with_rt};

/// A clonable reactive value.
///
/// Reading inside an [`Effect`](super::Effect) subscribes the effect to this
/// signal; writes queue the subscribers until the runtime flushes. Clones
/// share one value cell; the runtime node is released when the last clone
/// drops.
///
/// # Example
///
/// ```
/// use corridor::reactive::{Signal, with_runtime};
///
/// let count = Signal::new(0);
/// count.set(1);
/// with_runtime(|rt| rt.flush_updates());
/// assert_eq!(count.get(), 1);
/// ```
pub struct Signal<T> {
	value: Rc<RefCell<T>>,
	id: NodeId,
}

impl<T: Clone + 'static> Signal<T> {
	/// Creates a new signal holding `value`.
	pub fn new(value: T) -> Self {
		let id = with_rt(|rt| rt.reserve_id());
		Self {
			value: Rc::new(RefCell::new(value)),
			id,
		}
	}

	/// Returns a clone of the current value, subscribing the running effect.
	pub fn get(&self) -> T {
		with_rt(|rt| rt.track(self.id));
		self.value.borrow().clone()
	}

	/// Returns a clone of the current value without subscribing anything.
	pub fn get_untracked(&self) -> T {
		self.value.borrow().clone()
	}

	/// Runs `f` against the current value without cloning it.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		with_rt(|rt| rt.track(self.id));
		f(&self.value.borrow())
	}

	/// Replaces the value and queues subscribers.
	pub fn set(&self, value: T) {
		*self.value.borrow_mut() = value;
		with_rt(|rt| rt.notify(self.id));
	}

	/// Mutates the value in place and queues subscribers.
	pub fn update(&self, f: impl FnOnce(&mut T)) {
		f(&mut self.value.borrow_mut());
		with_rt(|rt| rt.notify(self.id));
	}

	/// The signal's runtime node id.
	pub fn id(&self) -> NodeId {
		self.id
	}
}

impl<T> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			value: Rc::clone(&self.value),
			id: self.id,
		}
	}
}

impl<T> Drop for Signal<T> {
	fn drop(&mut self) {
		// Last clone releases the runtime node.
		if Rc::strong_count(&self.value) == 1 {
			runtime::dispose(self.id);
		}
	}
}

impl<T: std::fmt::Debug> std::fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Signal")
			.field("id", &self.id)
			.field("value", &*self.value.borrow())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn get_set_update() {
		let signal = Signal::new(1);
		assert_eq!(signal.get(), 1);

		signal.set(5);
		assert_eq!(signal.get(), 5);

		signal.update(|n| *n *= 2);
		assert_eq!(signal.get(), 10);
	}

	#[test]
	fn clones_share_value() {
		let a = Signal::new("x".to_string());
		let b = a.clone();

		a.set("y".to_string());
		assert_eq!(b.get(), "y");
		assert_eq!(a.id(), b.id());
	}

	#[test]
	fn with_avoids_clone() {
		let signal = Signal::new(vec![1, 2, 3]);
		let len = signal.with(|v| v.len());
		assert_eq!(len, 3);
	}
}
