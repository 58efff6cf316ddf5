//! Thread-local reactive runtime.
//!
//! The runtime owns the dependency graph between signals and effects and the
//! queue of effects invalidated by signal writes. Signal writes only queue;
//! nothing re-runs until `flush_updates` is requested, so a navigation can
//! batch several signal writes into one consistent update.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

/// Identifier for a reactive node (signal, effect, or memo).
pub type NodeId = u64;

pub(crate) type EffectFn = Rc<RefCell<dyn FnMut()>>;

/// The reactive dependency graph and update queue.
pub struct Runtime {
	next_id: NodeId,
	/// The effect currently running, if any. Signal reads attach to it.
	observer: Option<NodeId>,
	/// signal id -> effects that read it on their last run.
	subscribers: HashMap<NodeId, HashSet<NodeId>>,
	/// effect id -> signals it read on its last run.
	sources: HashMap<NodeId, HashSet<NodeId>>,
	/// Closures for registered effects.
	effects: HashMap<NodeId, EffectFn>,
	/// Effects queued by signal writes, in queue order, deduplicated.
	pending: VecDeque<NodeId>,
	/// Nodes currently known to the runtime.
	live: HashSet<NodeId>,
	/// Set by `flush_updates`; drained by `with_runtime` once the borrow ends.
	flush_requested: bool,
}

impl Runtime {
	fn new() -> Self {
		Self {
			next_id: 0,
			observer: None,
			subscribers: HashMap::new(),
			sources: HashMap::new(),
			effects: HashMap::new(),
			pending: VecDeque::new(),
			live: HashSet::new(),
			flush_requested: false,
		}
	}

	/// Allocates an id without registering it; signals only enter the graph
	/// once something tracks them.
	pub(crate) fn reserve_id(&mut self) -> NodeId {
		self.next_id += 1;
		self.next_id
	}

	/// Allocates an id and registers it as a live node (effects and memos).
	pub(crate) fn register_node(&mut self) -> NodeId {
		let id = self.reserve_id();
		self.live.insert(id);
		id
	}

	pub(crate) fn register_effect(&mut self, id: NodeId, f: EffectFn) {
		self.effects.insert(id, f);
	}

	/// Removes a node and every graph edge that references it.
	pub(crate) fn dispose_node(&mut self, id: NodeId) {
		self.live.remove(&id);
		self.effects.remove(&id);
		if let Some(sources) = self.sources.remove(&id) {
			for source in sources {
				if let Some(subs) = self.subscribers.get_mut(&source) {
					subs.remove(&id);
				}
			}
		}
		self.subscribers.remove(&id);
		self.pending.retain(|pending| *pending != id);
	}

	/// Records a read of `signal` by the current observer, if any.
	pub(crate) fn track(&mut self, signal: NodeId) {
		if let Some(observer) = self.observer {
			self.live.insert(signal);
			self.subscribers.entry(signal).or_default().insert(observer);
			self.sources.entry(observer).or_default().insert(signal);
		}
	}

	/// Queues every effect subscribed to `signal`.
	pub(crate) fn notify(&mut self, signal: NodeId) {
		if let Some(subs) = self.subscribers.get(&signal) {
			let mut queued: Vec<NodeId> = subs.iter().copied().collect();
			queued.sort_unstable();
			for dep in queued {
				if !self.pending.contains(&dep) {
					self.pending.push_back(dep);
				}
			}
		}
	}

	/// Drops the source edges of an effect before it re-runs, so each run
	/// observes exactly what it reads.
	pub(crate) fn clear_sources(&mut self, id: NodeId) {
		if let Some(sources) = self.sources.remove(&id) {
			for source in sources {
				if let Some(subs) = self.subscribers.get_mut(&source) {
					subs.remove(&id);
				}
			}
		}
	}

	pub(crate) fn set_observer(&mut self, observer: Option<NodeId>) -> Option<NodeId> {
		std::mem::replace(&mut self.observer, observer)
	}

	/// Requests that queued effects run once the current runtime access ends.
	pub fn flush_updates(&mut self) {
		self.flush_requested = true;
	}

	/// Whether a node is currently known to the runtime. Used by leak tests.
	pub fn has_node(&self, id: NodeId) -> bool {
		self.live.contains(&id)
	}

	/// Number of effects waiting for a flush.
	pub fn pending_count(&self) -> usize {
		self.pending.len()
	}
}

thread_local! {
	static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::new());
	static FLUSHING: Cell<bool> = const { Cell::new(false) };
}

/// Runs `f` with mutable access to the thread-local runtime, then drains the
/// effect queue if a flush was requested and none is already in progress.
pub fn with_runtime<R>(f: impl FnOnce(&mut Runtime) -> R) -> R {
	let out = RUNTIME.with(|rt| f(&mut rt.borrow_mut()));
	drain_pending();
	out
}

/// Runtime access that never drains; used internally by signal reads/writes
/// so tracking inside a running effect cannot re-enter the flush loop.
pub(crate) fn with_rt<R>(f: impl FnOnce(&mut Runtime) -> R) -> R {
	RUNTIME.with(|rt| f(&mut rt.borrow_mut()))
}

/// Disposal variant that tolerates thread teardown, when the thread-local
/// runtime may already be gone while signals are still being dropped.
pub(crate) fn dispose(id: NodeId) {
	let _ = RUNTIME.try_with(|rt| {
		if let Ok(mut rt) = rt.try_borrow_mut() {
			rt.dispose_node(id);
		}
	});
}

enum Step {
	Idle,
	Skip,
	Run(NodeId, EffectFn),
}

fn drain_pending() {
	if FLUSHING.with(Cell::get) {
		return;
	}
	loop {
		let step = RUNTIME.with(|rt| {
			let mut rt = rt.borrow_mut();
			if !rt.flush_requested {
				return Step::Idle;
			}
			match rt.pending.pop_front() {
				Some(id) => match rt.effects.get(&id) {
					Some(f) => Step::Run(id, Rc::clone(f)),
					// Disposed between queue and run.
					None => Step::Skip,
				},
				None => {
					rt.flush_requested = false;
					Step::Idle
				}
			}
		});
		match step {
			Step::Idle => break,
			Step::Skip => continue,
			Step::Run(id, f) => {
				FLUSHING.with(|fl| fl.set(true));
				run_effect(id, &f);
				FLUSHING.with(|fl| fl.set(false));
			}
		}
	}
}

/// Runs an effect closure with itself installed as the observer.
pub(crate) fn run_effect(id: NodeId, f: &EffectFn) {
	let prev = with_rt(|rt| {
		rt.clear_sources(id);
		rt.set_observer(Some(id))
	});
	(f.borrow_mut())();
	with_rt(|rt| {
		rt.set_observer(prev);
	});
}
