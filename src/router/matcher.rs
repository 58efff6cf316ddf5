//! URL resolution against the route table.
//!
//! Resolution picks one leaf route (first registered match wins) and then
//! collects every layout route whose pattern matches a prefix of the URL,
//! ordered shallowest-first so the render hierarchy reads outside-in.

use std::rc::Rc;

use super::params::RawParams;
use super::pattern::normalize;
use super::route::Route;
use crate::debug_log;

/// The outcome of resolving a URL: the active chain of routes (layouts
/// then the leaf) and the raw params captured by the leaf pattern.
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
	pub routes: Vec<Rc<Route>>,
	pub raw_params: RawParams,
}

impl MatchResult {
	/// The non-layout route, when one matched.
	pub fn leaf(&self) -> Option<&Rc<Route>> {
		self.routes.iter().find(|route| !route.is_layout())
	}
}

/// An ordered collection of registered routes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
	routes: Vec<Rc<Route>>,
}

impl RouteTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, route: Route) {
		self.routes.push(Rc::new(route));
	}

	pub fn len(&self) -> usize {
		self.routes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	pub fn routes(&self) -> &[Rc<Route>] {
		&self.routes
	}

	/// The first non-layout route matching `url`, with its captures.
	pub fn match_leaf(&self, url: &str) -> Option<(Rc<Route>, RawParams)> {
		let segments = normalize(url);
		self.routes
			.iter()
			.filter(|route| !route.is_layout())
			.find_map(|route| {
				route
					.pattern()
					.matches_segments(&segments)
					.map(|params| (Rc::clone(route), params))
			})
	}

	/// Resolves `url` into the full active chain.
	///
	/// A layout is active when the URL has at least as many segments as the
	/// layout's pattern and the pattern matches that prefix; the root layout
	/// `/` is therefore active for every URL. Layouts are sorted by depth,
	/// preserving registration order at equal depth, and the leaf comes
	/// last. No matching leaf yields an empty result.
	pub fn resolve(&self, url: &str) -> MatchResult {
		let segments = normalize(url);

		let Some((leaf, raw_params)) = self.match_leaf(url) else {
			debug_log!("no route matched {url:?}");
			return MatchResult::default();
		};

		let mut layouts: Vec<Rc<Route>> = self
			.routes
			.iter()
			.filter(|route| route.is_layout())
			.filter(|route| {
				let depth = route.pattern().depth();
				depth <= segments.len()
					&& route.pattern().matches_segments(&segments[..depth]).is_some()
			})
			.cloned()
			.collect();
		layouts.sort_by_key(|route| route.pattern().depth());

		let mut routes = layouts;
		routes.push(leaf);
		debug_log!("resolved {url:?} into {} route(s)", routes.len());

		MatchResult { routes, raw_params }
	}
}
