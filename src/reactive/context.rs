//! Thread-local context values.
//!
//! Contexts thread shared handles (such as the router) through a component
//! tree without module-level mutable globals: a provider installs the value
//! on mount and removes it on unmount.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::marker::PhantomData;

thread_local! {
	static NEXT_KEY: Cell<u64> = const { Cell::new(0) };
	static VALUES: RefCell<HashMap<u64, Box<dyn Any>>> = RefCell::new(HashMap::new());
}

/// A typed context key.
///
/// # Example
///
/// ```
/// use corridor::reactive::{Context, provide_context, get_context, remove_context};
///
/// let theme: Context<String> = Context::new();
/// provide_context(&theme, "dark".to_string());
/// assert_eq!(get_context(&theme), Some("dark".to_string()));
/// remove_context(&theme);
/// assert_eq!(get_context(&theme), None);
/// ```
pub struct Context<T> {
	key: u64,
	_marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Context<T> {
	/// Allocates a fresh context key.
	pub fn new() -> Self {
		let key = NEXT_KEY.with(|k| {
			let key = k.get() + 1;
			k.set(key);
			key
		});
		Self {
			key,
			_marker: PhantomData,
		}
	}
}

impl<T: 'static> Default for Context<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Clone for Context<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for Context<T> {}

impl<T> std::fmt::Debug for Context<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Context").field("key", &self.key).finish()
	}
}

/// Alias for [`Context::new`].
pub fn create_context<T: 'static>() -> Context<T> {
	Context::new()
}

/// Installs `value` for `ctx`, replacing any previous value.
pub fn provide_context<T: 'static>(ctx: &Context<T>, value: T) {
	VALUES.with(|values| {
		values.borrow_mut().insert(ctx.key, Box::new(value));
	});
}

/// Reads the value for `ctx`, if provided.
pub fn get_context<T: Clone + 'static>(ctx: &Context<T>) -> Option<T> {
	VALUES.with(|values| {
		values
			.borrow()
			.get(&ctx.key)
			.and_then(|boxed| boxed.downcast_ref::<T>())
			.cloned()
	})
}

/// Removes the value for `ctx`.
pub fn remove_context<T: 'static>(ctx: &Context<T>) {
	VALUES.with(|values| {
		values.borrow_mut().remove(&ctx.key);
	});
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn provide_and_get() {
		let ctx: Context<i32> = Context::new();
		provide_context(&ctx, 42);
		assert_eq!(get_context(&ctx), Some(42));
	}

	#[rstest]
	fn missing_value_is_none() {
		let ctx: Context<String> = Context::new();
		assert!(get_context(&ctx).is_none());
	}

	#[rstest]
	fn contexts_of_same_type_are_independent() {
		let a: Context<i32> = Context::new();
		let b: Context<i32> = Context::new();
		provide_context(&a, 1);
		provide_context(&b, 2);
		assert_eq!(get_context(&a), Some(1));
		assert_eq!(get_context(&b), Some(2));
	}

	#[rstest]
	fn remove_clears_value() {
		let ctx: Context<i32> = Context::new();
		provide_context(&ctx, 9);
		remove_context(&ctx);
		assert!(get_context(&ctx).is_none());
	}
}
