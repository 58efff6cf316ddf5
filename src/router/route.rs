//! Route definitions and the registration builder.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use thiserror::Error;

use super::loader::{ErasedLoader, IntoLoader};
use super::params::{NoParams, RouteParams};
use super::pattern::PathPattern;
use crate::component::View;

/// Whether a route's pattern declares `:param` segments. Kept explicit on
/// the route so matching and navigation branch on a tag instead of
/// re-inspecting the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
	Static,
	Parameterized,
}

/// A registration-time route definition error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
	#[error("route `{path}` has no component")]
	MissingComponent { path: String },
	#[error("route `{path}`: params type expects `{name}` but the pattern does not declare it")]
	UndeclaredParam { path: String, name: String },
	#[error("route `{path}`: pattern declares `:{name}` but the params type does not list it")]
	UnusedParam { path: String, name: String },
}

/// A registered route: a pattern, a component, and optionally a loader.
///
/// Layout routes additionally match every URL they prefix; see
/// [`RouteTable::resolve`](super::RouteTable::resolve).
#[derive(Clone)]
pub struct Route {
	pattern: PathPattern,
	kind: RouteKind,
	is_layout: bool,
	loader: Option<ErasedLoader>,
	component: Rc<dyn Fn() -> View>,
}

impl Route {
	/// Starts building a route for `path`.
	///
	/// # Example
	///
	/// ```
	/// use corridor::component::View;
	/// use corridor::router::Route;
	///
	/// let route = Route::build("/about")
	/// 	.component(|| View::text("about"))
	/// 	.register()
	/// 	.unwrap();
	/// assert!(!route.is_layout());
	/// ```
	pub fn build(path: &str) -> RouteBuilder<NoParams> {
		RouteBuilder {
			pattern: PathPattern::parse(path),
			is_layout: false,
			loader: None,
			component: None,
			_params: PhantomData,
		}
	}

	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	pub fn kind(&self) -> RouteKind {
		self.kind
	}

	pub fn is_layout(&self) -> bool {
		self.is_layout
	}

	pub fn has_loader(&self) -> bool {
		self.loader.is_some()
	}

	pub(crate) fn loader(&self) -> Option<&ErasedLoader> {
		self.loader.as_ref()
	}

	/// Renders the route's component.
	pub fn render(&self) -> View {
		(self.component)()
	}
}

impl fmt::Debug for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.pattern.raw())
			.field("kind", &self.kind)
			.field("is_layout", &self.is_layout)
			.field("has_loader", &self.loader.is_some())
			.finish()
	}
}

/// Builder for [`Route`]. The type parameter carries the route's params
/// type so `loader` closures receive typed parameters.
pub struct RouteBuilder<P: RouteParams> {
	pattern: PathPattern,
	is_layout: bool,
	loader: Option<ErasedLoader>,
	component: Option<Rc<dyn Fn() -> View>>,
	_params: PhantomData<fn() -> P>,
}

impl RouteBuilder<NoParams> {
	/// Declares the typed params struct for this route. Must come before
	/// `loader` so the loader closure sees the right type.
	pub fn params<P: RouteParams>(self) -> RouteBuilder<P> {
		RouteBuilder {
			pattern: self.pattern,
			is_layout: self.is_layout,
			loader: self.loader,
			component: self.component,
			_params: PhantomData,
		}
	}
}

impl<P: RouteParams> RouteBuilder<P> {
	/// Marks this route as a layout: it stays active for every URL under
	/// its path.
	pub fn layout(mut self) -> Self {
		self.is_layout = true;
		self
	}

	/// Sets the async loader. Accepts `|| async { .. }` or
	/// `|params: P| async { .. }`.
	pub fn loader<M>(mut self, loader: impl IntoLoader<P, M>) -> Self {
		self.loader = Some(loader.into_loader());
		self
	}

	/// Sets the component rendered when this route is active.
	pub fn component(mut self, component: impl Fn() -> View + 'static) -> Self {
		self.component = Some(Rc::new(component));
		self
	}

	/// Validates and finalizes the route. Parameter names declared by the
	/// pattern and by `P::NAMES` must agree exactly.
	pub fn register(self) -> Result<Route, RouteError> {
		let path = self.pattern.raw().to_string();
		let component = self
			.component
			.ok_or_else(|| RouteError::MissingComponent { path: path.clone() })?;

		let declared = self.pattern.param_names();
		for name in P::NAMES {
			if !declared.contains(name) {
				return Err(RouteError::UndeclaredParam {
					path,
					name: (*name).to_string(),
				});
			}
		}
		for name in &declared {
			if !P::NAMES.contains(name) {
				return Err(RouteError::UnusedParam {
					path,
					name: (*name).to_string(),
				});
			}
		}

		let kind = if self.pattern.is_parameterized() {
			RouteKind::Parameterized
		} else {
			RouteKind::Static
		};

		Ok(Route {
			pattern: self.pattern,
			kind,
			is_layout: self.is_layout,
			loader: self.loader,
			component,
		})
	}
}
