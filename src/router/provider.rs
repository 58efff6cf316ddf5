//! The router provider: owns the route table, tracks the current location
//! in signals, and orchestrates loaders on navigation.
//!
//! Mounting produces an `Rc<Router>` and publishes it through the context
//! layer so components anywhere in the tree reach it via [`use_router`].
//! Every navigation resolves the URL, swaps the active chain and loader
//! slots in one batch, then fans the loaders out in parallel. A generation
//! counter guards against a slow loader from a superseded navigation
//! overwriting fresher data.

use std::cell::Cell;
use std::rc::Rc;

use thiserror::Error;

use super::history;
use super::loader::LoaderSlot;
use super::matcher::RouteTable;
use super::params::{ParamError, RawParams, RouteParams};
use super::pattern::PathPattern;
use super::route::Route;
use crate::component::View;
use crate::reactive::{
	Context, Signal, create_context, get_context, provide_context, remove_context, with_runtime,
};
use crate::{debug_log, error_log, spawn};

/// A runtime navigation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
	#[error("navigation failed: {0}")]
	Failed(String),
	#[error("cannot build `{path}`: missing parameter `{name}`")]
	MissingParam { path: String, name: String },
}

/// Builder for [`Router`].
pub struct RouterBuilder {
	table: RouteTable,
	not_found: Option<Rc<dyn Fn() -> View>>,
}

impl RouterBuilder {
	/// Adds a registered route. Registration order is match priority.
	pub fn route(mut self, route: Route) -> Self {
		self.table.push(route);
		self
	}

	/// Component rendered when no route matches.
	pub fn not_found(mut self, component: impl Fn() -> View + 'static) -> Self {
		self.not_found = Some(Rc::new(component));
		self
	}

	/// Finalizes the router: resolves the current location, starts its
	/// loaders, and publishes the router into context.
	pub fn mount(self) -> Result<Rc<Router>, NavigationError> {
		let router = Rc::new(Router {
			table: self.table,
			current_path: Signal::new(String::new()),
			active: Signal::new(Vec::new()),
			raw_params: Signal::new(RawParams::new()),
			slots: Signal::new(Vec::new()),
			generation: Rc::new(Cell::new(0)),
			not_found: self.not_found,
			#[cfg(target_arch = "wasm32")]
			popstate: std::cell::RefCell::new(None),
		});

		let path = history::current_path().map_err(NavigationError::Failed)?;
		router.apply_location(&path);
		provide_router(Rc::clone(&router));

		#[cfg(target_arch = "wasm32")]
		attach_popstate(&router)?;

		Ok(router)
	}
}

/// The mounted router.
pub struct Router {
	table: RouteTable,
	current_path: Signal<String>,
	active: Signal<Vec<Rc<Route>>>,
	raw_params: Signal<RawParams>,
	slots: Signal<Vec<LoaderSlot>>,
	generation: Rc<Cell<u64>>,
	not_found: Option<Rc<dyn Fn() -> View>>,
	#[cfg(target_arch = "wasm32")]
	popstate:
		std::cell::RefCell<Option<wasm_bindgen::closure::Closure<dyn FnMut(web_sys::PopStateEvent)>>>,
}

impl Router {
	pub fn builder() -> RouterBuilder {
		RouterBuilder {
			table: RouteTable::new(),
			not_found: None,
		}
	}

	/// Navigates to a concrete URL, pushing a history entry.
	pub fn go_to_url(&self, url: &str) -> Result<(), NavigationError> {
		history::push_state(url).map_err(NavigationError::Failed)?;
		self.apply_location(url);
		Ok(())
	}

	/// Navigates to a concrete URL. Alias of [`go_to_url`](Self::go_to_url).
	pub fn navigate(&self, url: &str) -> Result<(), NavigationError> {
		self.go_to_url(url)
	}

	/// Builds a URL from a `:param` pattern and navigates to it.
	///
	/// ```
	/// # use corridor::component::View;
	/// # use corridor::router::{ParamError, RawParams, Route, RouteParams, Router};
	/// # struct IdParams { id: u32 }
	/// # impl RouteParams for IdParams {
	/// # 	const NAMES: &'static [&'static str] = &["id"];
	/// # 	fn from_raw(raw: &RawParams) -> Result<Self, ParamError> {
	/// # 		Ok(Self { id: raw.parse("id")? })
	/// # 	}
	/// # }
	/// # corridor::router::reset_history();
	/// # corridor::router::remove_router();
	/// let router = Router::builder()
	/// 	.route(
	/// 		Route::build("/users/:id")
	/// 			.params::<IdParams>()
	/// 			.component(|| View::text("user"))
	/// 			.register()
	/// 			.unwrap(),
	/// 	)
	/// 	.mount()
	/// 	.unwrap();
	/// router.navigate_with("/users/:id", &[("id", "42")]).unwrap();
	/// assert_eq!(router.current_path(), "/users/42");
	/// ```
	pub fn navigate_with(
		&self,
		path: &str,
		params: &[(&str, &str)],
	) -> Result<(), NavigationError> {
		let url = interpolate(path, params)?;
		self.go_to_url(&url)
	}

	/// Navigates without adding a history entry.
	pub fn replace(&self, url: &str) -> Result<(), NavigationError> {
		history::replace_state(url).map_err(NavigationError::Failed)?;
		self.apply_location(url);
		Ok(())
	}

	/// Moves one entry back in history.
	pub fn back(&self) -> Result<(), NavigationError> {
		history::back().map_err(NavigationError::Failed)?;
		// Off-wasm there is no popstate event to react to.
		#[cfg(not(target_arch = "wasm32"))]
		{
			let path = history::current_path().map_err(NavigationError::Failed)?;
			self.apply_location(&path);
		}
		Ok(())
	}

	/// Moves one entry forward in history.
	pub fn forward(&self) -> Result<(), NavigationError> {
		history::forward().map_err(NavigationError::Failed)?;
		#[cfg(not(target_arch = "wasm32"))]
		{
			let path = history::current_path().map_err(NavigationError::Failed)?;
			self.apply_location(&path);
		}
		Ok(())
	}

	/// Resolves `path` and updates all router state.
	///
	/// The path, active chain, raw params, and loader slot signals change
	/// together in one flush so observers never see a half-applied
	/// navigation, then loaders for every matched route start in parallel.
	pub fn apply_location(&self, path: &str) {
		let result = self.table.resolve(path);
		debug_log!("navigating to {path:?} ({} active route(s))", result.routes.len());

		let generation = self.generation.get().wrapping_add(1);
		self.generation.set(generation);

		let slots: Vec<LoaderSlot> = result
			.routes
			.iter()
			.map(|route| {
				if route.has_loader() {
					LoaderSlot::Loading
				} else {
					LoaderSlot::NoLoader
				}
			})
			.collect();

		self.current_path.set(path.to_string());
		self.active.set(result.routes.clone());
		self.raw_params.set(result.raw_params.clone());
		self.slots.set(slots);
		with_runtime(|rt| rt.flush_updates());

		for (index, route) in result.routes.iter().enumerate() {
			let Some(loader) = route.loader() else {
				continue;
			};
			let future = loader(&result.raw_params);
			let slots = self.slots.clone();
			let generation_cell = Rc::clone(&self.generation);
			spawn::spawn_local(async move {
				let outcome = future.await;
				if generation_cell.get() != generation {
					debug_log!("discarding stale loader result for slot {index}");
					return;
				}
				slots.update(|slots| {
					if let Some(slot) = slots.get_mut(index) {
						*slot = match outcome {
							Ok(value) => LoaderSlot::Loaded(value),
							Err(err) => {
								error_log!("loader at slot {index} failed: {err}");
								LoaderSlot::Error(err)
							}
						};
					}
				});
				with_runtime(|rt| rt.flush_updates());
			});
		}
	}

	/// The current URL path. Reactive.
	pub fn current_path(&self) -> String {
		self.current_path.get()
	}

	/// The active route chain, layouts first. Reactive.
	pub fn active_routes(&self) -> Vec<Rc<Route>> {
		self.active.get()
	}

	/// Raw params captured from the current URL. Reactive.
	pub fn raw_params(&self) -> RawParams {
		self.raw_params.get()
	}

	/// Decodes the current raw params into `P`. Reactive.
	pub fn params<P: RouteParams>(&self) -> Result<P, ParamError> {
		P::from_raw(&self.raw_params.get())
	}

	/// Loader slots for the active chain, indexed like
	/// [`active_routes`](Self::active_routes). Reactive.
	pub fn loader_slots(&self) -> Vec<LoaderSlot> {
		self.slots.get()
	}

	/// The loader slot at one depth of the active chain. Reactive.
	pub fn loader_slot(&self, depth: usize) -> LoaderSlot {
		self.slots
			.with(|slots| slots.get(depth).cloned())
			.unwrap_or_default()
	}

	/// Renders the active route at `depth`. Past the end of a matched
	/// chain the outlet renders nothing; the not-found component applies
	/// only when nothing matched at all.
	pub fn render_at(&self, depth: usize) -> View {
		let (route, matched) =
			self.active
				.with(|routes| (routes.get(depth).cloned(), !routes.is_empty()));
		match route {
			Some(route) => route.render(),
			None if matched => View::empty(),
			None => self.render_not_found(),
		}
	}

	/// Renders the deepest active route.
	pub fn render_current(&self) -> View {
		let route = self.active.with(|routes| routes.last().cloned());
		match route {
			Some(route) => route.render(),
			None => self.render_not_found(),
		}
	}

	fn render_not_found(&self) -> View {
		match &self.not_found {
			Some(component) => component(),
			None => View::empty(),
		}
	}

	pub fn route_count(&self) -> usize {
		self.table.len()
	}

	/// Detaches the router from context (and, on wasm, from the window's
	/// popstate listener).
	pub fn unmount(&self) {
		#[cfg(target_arch = "wasm32")]
		self.detach_popstate();
		remove_router();
	}

	#[cfg(target_arch = "wasm32")]
	fn detach_popstate(&self) {
		use wasm_bindgen::JsCast;

		if let Some(closure) = self.popstate.borrow_mut().take()
			&& let Some(window) = web_sys::window()
			&& let Err(err) = window.remove_event_listener_with_callback(
				"popstate",
				closure.as_ref().unchecked_ref(),
			) {
			error_log!("failed to remove popstate listener: {err:?}");
		}
	}
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.table.len())
			.field("current_path", &self.current_path.get_untracked())
			.finish()
	}
}

#[cfg(target_arch = "wasm32")]
fn attach_popstate(router: &Rc<Router>) -> Result<(), NavigationError> {
	use wasm_bindgen::JsCast;
	use wasm_bindgen::closure::Closure;

	// Weak, so the listener does not keep an unmounted router alive.
	let weak = Rc::downgrade(router);
	let closure = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(
		move |_event: web_sys::PopStateEvent| {
			let Some(router) = weak.upgrade() else {
				return;
			};
			match history::current_path() {
				Ok(path) => router.apply_location(&path),
				Err(err) => error_log!("popstate: {err}"),
			}
		},
	);

	let window =
		web_sys::window().ok_or_else(|| NavigationError::Failed("no window".to_string()))?;
	window
		.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
		.map_err(|e| NavigationError::Failed(format!("{e:?}")))?;
	*router.popstate.borrow_mut() = Some(closure);
	Ok(())
}

/// Builds a concrete URL from a `:param` pattern.
pub(crate) fn interpolate(path: &str, params: &[(&str, &str)]) -> Result<String, NavigationError> {
	let pattern = PathPattern::parse(path);
	pattern.reverse(params).ok_or_else(|| {
		let name = pattern
			.param_names()
			.into_iter()
			.find(|name| !params.iter().any(|(key, _)| key == name))
			.unwrap_or_default()
			.to_string();
		NavigationError::MissingParam {
			path: path.to_string(),
			name,
		}
	})
}

thread_local! {
	static ROUTER_CTX: Context<Rc<Router>> = create_context();
}

/// Publishes a router into context.
pub fn provide_router(router: Rc<Router>) {
	ROUTER_CTX.with(|ctx| provide_context(ctx, router));
}

/// The router published by [`provide_router`], if any.
pub fn use_router() -> Option<Rc<Router>> {
	ROUTER_CTX.with(|ctx| get_context(ctx))
}

/// Removes the published router from context.
pub fn remove_router() {
	ROUTER_CTX.with(|ctx| {
		remove_context(ctx);
	});
}
