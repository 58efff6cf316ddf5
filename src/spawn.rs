//! Single-threaded task spawning.
//!
//! Loaders are plain futures; this module runs them without assuming a
//! concurrency runtime. On WASM, tasks go to the browser microtask queue via
//! `wasm-bindgen-futures`. On native targets a thread-local
//! `futures::executor::LocalPool` holds the tasks, and tests drive them
//! deterministically with [`run_until_stalled`].

use std::future::Future;

/// Spawns a future onto the browser's microtask queue.
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub fn spawn_local<F>(future: F)
where
	F: Future<Output = ()> + 'static,
{
	wasm_bindgen_futures::spawn_local(future);
}

#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
mod native {
	use std::cell::RefCell;
	use std::future::Future;

	use futures::executor::{LocalPool, LocalSpawner};
	use futures::task::LocalSpawnExt;

	use crate::error_log;

	thread_local! {
		static POOL: RefCell<LocalPool> = RefCell::new(LocalPool::new());
		static SPAWNER: LocalSpawner = POOL.with(|pool| pool.borrow().spawner());
	}

	pub fn spawn_local<F>(future: F)
	where
		F: Future<Output = ()> + 'static,
	{
		SPAWNER.with(|spawner| {
			if let Err(err) = spawner.spawn_local(future) {
				error_log!("failed to spawn task: {}", err);
			}
		});
	}

	/// Runs queued tasks until all are complete or blocked on something
	/// external (an unsent channel, for instance).
	pub fn run_until_stalled() {
		POOL.with(|pool| pool.borrow_mut().run_until_stalled());
	}
}

#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
pub use native::{run_until_stalled, spawn_local};
