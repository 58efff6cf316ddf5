//! Router-aware components: [`Link`] and [`RouterOutlet`].

use std::borrow::Cow;
use std::rc::Rc;

use super::pattern::PathPattern;
use super::provider::{Router, use_router};
use crate::component::{Component, IntoView, View};

/// A navigation link.
///
/// Renders an anchor carrying a `data-link` marker so client-side code can
/// intercept clicks and route them through the mounted router instead of a
/// full page load. External links are rendered as plain anchors.
///
/// # Example
///
/// ```
/// use corridor::component::Component;
/// use corridor::router::Link;
///
/// let link = Link::new("/users/:id", "Alice").with_param("id", "42");
/// let html = link.render().render_to_string();
/// assert!(html.contains("href=\"/users/42\""));
/// ```
pub struct Link {
	to: String,
	content: View,
	class: Option<Cow<'static, str>>,
	replace: bool,
	external: bool,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	params: Vec<(String, String)>,
}

impl Link {
	pub fn new(to: impl Into<String>, content: impl IntoView) -> Self {
		Self {
			to: to.into(),
			content: content.into_view(),
			class: None,
			replace: false,
			external: false,
			attrs: Vec::new(),
			params: Vec::new(),
		}
	}

	pub fn class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Navigate with `replaceState` instead of `pushState`.
	pub fn replace(mut self) -> Self {
		self.replace = true;
		self
	}

	/// Renders a plain anchor with no router interception.
	pub fn external(mut self) -> Self {
		self.external = true;
		self
	}

	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Supplies a value for a `:param` segment of `to`.
	pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.push((name.into(), value.into()));
		self
	}

	/// The href after `:param` substitution. Falls back to the raw `to`
	/// string when a parameter is missing.
	fn href(&self) -> String {
		if self.params.is_empty() {
			return self.to.clone();
		}
		let pairs: Vec<(&str, &str)> = self
			.params
			.iter()
			.map(|(name, value)| (name.as_str(), value.as_str()))
			.collect();
		PathPattern::parse(&self.to)
			.reverse(&pairs)
			.unwrap_or_else(|| self.to.clone())
	}
}

impl Component for Link {
	fn render(&self) -> View {
		let mut anchor = View::element("a").attr("href", self.href());
		if !self.external {
			let mode = if self.replace { "replace" } else { "push" };
			anchor = anchor.attr("data-link", mode);
		}
		if let Some(class) = &self.class {
			anchor = anchor.attr("class", class.clone());
		}
		for (name, value) in &self.attrs {
			anchor = anchor.attr(name.clone(), value.clone());
		}
		anchor.child(self.content.clone()).into_view()
	}

	fn name() -> &'static str {
		"Link"
	}
}

/// Renders one level of the active route chain.
///
/// An outlet at depth `n` renders the `n`-th matched route: depth 0 is the
/// outermost layout, and each layout places an outlet at the next depth
/// for its children. With no explicit router the outlet falls back to the
/// one in context.
pub struct RouterOutlet {
	router: Option<Rc<Router>>,
	depth: usize,
	id: Option<Cow<'static, str>>,
	class: Option<Cow<'static, str>>,
}

impl RouterOutlet {
	pub fn new(depth: usize) -> Self {
		Self {
			router: None,
			depth,
			id: None,
			class: None,
		}
	}

	pub fn with_router(mut self, router: Rc<Router>) -> Self {
		self.router = Some(router);
		self
	}

	pub fn id(mut self, id: impl Into<Cow<'static, str>>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
		self.class = Some(class.into());
		self
	}
}

impl Component for RouterOutlet {
	fn render(&self) -> View {
		let inner = match self.router.clone().or_else(use_router) {
			Some(router) => router.render_at(self.depth),
			None => View::empty(),
		};

		let mut outlet = View::element("div").attr("data-router-outlet", self.depth.to_string());
		if let Some(id) = &self.id {
			outlet = outlet.attr("id", id.clone());
		}
		if let Some(class) = &self.class {
			outlet = outlet.attr("class", class.clone());
		}
		outlet.child(inner).into_view()
	}

	fn name() -> &'static str {
		"RouterOutlet"
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn link_renders_data_link_marker() {
		let html = Link::new("/about", "About").render().render_to_string();
		assert!(html.contains("href=\"/about\""));
		assert!(html.contains("data-link=\"push\""));
		assert!(html.contains(">About</a>"));
	}

	#[test]
	fn replace_link_marker() {
		let html = Link::new("/about", "About")
			.replace()
			.render()
			.render_to_string();
		assert!(html.contains("data-link=\"replace\""));
	}

	#[test]
	fn external_link_has_no_marker() {
		let html = Link::new("https://example.com", "Ext")
			.external()
			.render()
			.render_to_string();
		assert!(!html.contains("data-link"));
	}

	#[test]
	fn link_interpolates_params() {
		let html = Link::new("/users/:id", "Alice")
			.with_param("id", "42")
			.render()
			.render_to_string();
		assert!(html.contains("href=\"/users/42\""));
	}

	#[test]
	fn link_with_missing_param_keeps_raw_href() {
		let html = Link::new("/users/:id", "Alice")
			.with_param("other", "x")
			.render()
			.render_to_string();
		assert!(html.contains("href=\"/users/:id\""));
	}

	#[test]
	fn link_extra_attrs_and_class() {
		let html = Link::new("/about", "About")
			.class("nav")
			.attr("rel", "prefetch")
			.render()
			.render_to_string();
		assert!(html.contains("class=\"nav\""));
		assert!(html.contains("rel=\"prefetch\""));
	}

	#[test]
	fn outlet_without_router_is_empty() {
		super::super::provider::remove_router();
		let html = RouterOutlet::new(0).render().render_to_string();
		assert_eq!(html, "<div data-router-outlet=\"0\"></div>");
	}

	#[cfg(not(target_arch = "wasm32"))]
	#[test]
	#[serial_test::serial]
	fn outlet_past_the_leaf_renders_nothing() {
		use crate::router::{Route, Router, reset_history};

		reset_history();
		super::super::provider::remove_router();
		let router = Router::builder()
			.route(
				Route::build("/about")
					.component(|| crate::component::View::text("about"))
					.register()
					.unwrap(),
			)
			.not_found(|| crate::component::View::text("404"))
			.mount()
			.unwrap();
		router.go_to_url("/about").unwrap();

		// Depth 0 is the leaf; one past it terminates the chain.
		let leaf = RouterOutlet::new(0).render().render_to_string();
		assert_eq!(leaf, "<div data-router-outlet=\"0\">about</div>");
		let past = RouterOutlet::new(1).render().render_to_string();
		assert_eq!(past, "<div data-router-outlet=\"1\"></div>");

		// The not-found component still covers the no-match case.
		router.go_to_url("/missing").unwrap();
		let missing = RouterOutlet::new(0).render().render_to_string();
		assert_eq!(missing, "<div data-router-outlet=\"0\">404</div>");

		router.unmount();
	}
}
