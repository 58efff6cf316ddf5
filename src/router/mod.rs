//! Client-side routing: pattern matching, typed params, layout
//! resolution, async loaders, and the router provider.

pub mod components;
pub mod history;
pub mod loader;
pub mod matcher;
pub mod params;
pub mod pattern;
pub mod provider;
pub mod route;

pub use components::{Link, RouterOutlet};
pub use history::HistoryState;
pub use loader::{ErasedLoader, IntoLoader, LoaderError, LoaderSlot};
pub use matcher::{MatchResult, RouteTable};
pub use params::{FromParam, NoParams, ParamError, RawParams, RouteParams};
pub use pattern::{PathPattern, Segment, normalize};
pub use provider::{
	NavigationError, Router, RouterBuilder, provide_router, remove_router, use_router,
};
pub use route::{Route, RouteBuilder, RouteError, RouteKind};

#[cfg(not(target_arch = "wasm32"))]
pub use history::reset_history;
