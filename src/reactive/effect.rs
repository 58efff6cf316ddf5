//! Reactive side effects.

use std::cell::RefCell;
use std::rc::Rc;

use super::runtime::{self, EffectFn, NodeId, with_rt};

/// A side effect that re-runs when the signals it reads change.
///
/// The closure runs once immediately on creation, tracking every signal it
/// reads. A later write to any of those signals queues the effect; it re-runs
/// on the next runtime flush. Dropping the handle disposes the effect.
pub struct Effect {
	id: NodeId,
	_f: EffectFn,
}

impl Effect {
	/// Creates the effect and runs it once.
	pub fn new<F>(f: F) -> Self
	where
		F: FnMut() + 'static,
	{
		let f: EffectFn = Rc::new(RefCell::new(f));
		let id = with_rt(|rt| {
			let id = rt.register_node();
			rt.register_effect(id, Rc::clone(&f));
			id
		});
		runtime::run_effect(id, &f);
		Self { id, _f: f }
	}

	/// The effect's runtime node id.
	pub fn id(&self) -> NodeId {
		self.id
	}
}

impl Drop for Effect {
	fn drop(&mut self) {
		runtime::dispose(self.id);
	}
}

impl std::fmt::Debug for Effect {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Effect").field("id", &self.id).finish()
	}
}
