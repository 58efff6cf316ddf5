//! Fine-grained reactivity: Signal, Effect, Memo, Context.
//!
//! Single-threaded (`Rc`/`RefCell`) reactivity with a thread-local runtime.
//! Signal writes queue invalidated effects; [`Runtime::flush_updates`] (via
//! [`with_runtime`]) drains the queue. The router batches its signal writes
//! per navigation and flushes itself, so consumers observe each navigation
//! as one atomic update.

mod context;
mod effect;
mod memo;
mod runtime;
mod signal;

pub use context::{Context, create_context, get_context, provide_context, remove_context};
pub use effect::Effect;
pub use memo::Memo;
pub use runtime::{NodeId, Runtime, with_runtime};
pub use signal::Signal;
