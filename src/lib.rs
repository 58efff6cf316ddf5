//! Corridor - Typed Client-Side Router
//!
//! A client-side router for component-based UIs: declarative route tables,
//! typed path parameters, nested layout resolution, and parallel async
//! loaders, all driven by a fine-grained Signal system.
//!
//! ## Features
//!
//! - **Typed params**: `:id` segments decode into user-defined structs at
//!   match time; mismatches between a pattern and its params type fail at
//!   registration, not on first navigation
//! - **Nested layouts**: every layout whose path prefixes the URL stays
//!   active, shallowest first, so shells wrap their children naturally
//! - **Parallel loaders**: each matched route's loader runs concurrently;
//!   one failing slot never takes down its siblings
//! - **Fine-grained reactivity**: location, active chain, params, and
//!   loader slots are Signals, so views re-render only on what they read
//! - **Dual-target**: History API on `wasm32`, an in-memory history stack
//!   everywhere else for deterministic tests
//!
//! ## Architecture
//!
//! - [`router`]: patterns, the route table, loaders, and the provider
//! - [`reactive`]: Signal, Effect, Memo, and context
//! - [`component`]: the minimal renderable surface routes produce
//! - [`spawn`]: single-threaded task spawning for loader futures
//!
//! ## Example
//!
//! ```
//! use corridor::component::View;
//! use corridor::router::{ParamError, RawParams, Route, RouteParams, Router};
//!
//! struct UserParams {
//! 	id: u32,
//! }
//!
//! impl RouteParams for UserParams {
//! 	const NAMES: &'static [&'static str] = &["id"];
//!
//! 	fn from_raw(raw: &RawParams) -> Result<Self, ParamError> {
//! 		Ok(Self { id: raw.parse("id")? })
//! 	}
//! }
//!
//! # corridor::router::reset_history();
//! # corridor::router::remove_router();
//! let router = Router::builder()
//! 	.route(
//! 		Route::build("/")
//! 			.layout()
//! 			.component(|| View::text("shell"))
//! 			.register()
//! 			.unwrap(),
//! 	)
//! 	.route(
//! 		Route::build("/users/:id")
//! 			.params::<UserParams>()
//! 			.component(|| View::text("user page"))
//! 			.register()
//! 			.unwrap(),
//! 	)
//! 	.mount()
//! 	.unwrap();
//!
//! router.go_to_url("/users/42").unwrap();
//! assert_eq!(router.params::<UserParams>().unwrap().id, 42);
//! ```

pub mod component;
pub mod logging;
pub mod reactive;
pub mod router;
pub mod spawn;

pub use component::{Component, ElementView, IntoView, View};
pub use reactive::{Effect, Memo, Signal};
pub use router::{Link, Route, Router, RouterOutlet};
