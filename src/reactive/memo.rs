//! Cached derived values.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::runtime::{self, NodeId, with_rt};

/// A cached computation over reactive state.
///
/// The computation runs on first access and its result is cached; later
/// accesses return the cache until [`mark_dirty`](Memo::mark_dirty) is
/// called. Because the computation runs under whatever effect is currently
/// observing, signals it reads are tracked by that effect as usual.
pub struct Memo<T> {
	id: NodeId,
	f: Rc<RefCell<dyn FnMut() -> T>>,
	cache: Rc<RefCell<Option<T>>>,
	dirty: Rc<Cell<bool>>,
}

impl<T: Clone + 'static> Memo<T> {
	/// Creates a memo; the computation does not run until first access.
	pub fn new<F>(f: F) -> Self
	where
		F: FnMut() -> T + 'static,
	{
		let id = with_rt(|rt| rt.register_node());
		Self {
			id,
			f: Rc::new(RefCell::new(f)),
			cache: Rc::new(RefCell::new(None)),
			dirty: Rc::new(Cell::new(true)),
		}
	}

	/// Returns the cached value, recomputing it first when dirty.
	pub fn get(&self) -> T {
		if !self.dirty.get() {
			if let Some(cached) = self.cache.borrow().as_ref() {
				return cached.clone();
			}
		}
		let value = (self.f.borrow_mut())();
		*self.cache.borrow_mut() = Some(value.clone());
		self.dirty.set(false);
		value
	}

	/// Invalidates the cache; the next access recomputes.
	pub fn mark_dirty(&self) {
		self.dirty.set(true);
	}

	/// The memo's runtime node id.
	pub fn id(&self) -> NodeId {
		self.id
	}
}

impl<T> Clone for Memo<T> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			f: Rc::clone(&self.f),
			cache: Rc::clone(&self.cache),
			dirty: Rc::clone(&self.dirty),
		}
	}
}

impl<T> Drop for Memo<T> {
	fn drop(&mut self) {
		if Rc::strong_count(&self.cache) == 1 {
			runtime::dispose(self.id);
		}
	}
}

impl<T> std::fmt::Debug for Memo<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Memo")
			.field("id", &self.id)
			.field("dirty", &self.dirty.get())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::Signal;
	use serial_test::serial;

	#[test]
	#[serial]
	fn caches_until_dirty() {
		let count = Signal::new(5);
		let computations = Rc::new(RefCell::new(0));

		let doubled = Memo::new({
			let count = count.clone();
			let computations = Rc::clone(&computations);
			move || {
				*computations.borrow_mut() += 1;
				count.get() * 2
			}
		});

		assert_eq!(doubled.get(), 10);
		assert_eq!(doubled.get(), 10);
		assert_eq!(*computations.borrow(), 1);

		count.set(8);
		doubled.mark_dirty();
		assert_eq!(doubled.get(), 16);
		assert_eq!(*computations.borrow(), 2);
	}
}
