//! Minimal renderable abstraction consumed by routes.
//!
//! Routes carry an opaque component factory producing a [`View`]. The view
//! tree here covers what the router needs to hand content to a host
//! framework: elements, text, fragments, and a string renderer. DOM mounting
//! and event wiring are the host's concern.

use std::borrow::Cow;

/// A unified representation of renderable content.
#[derive(Debug, Clone)]
pub enum View {
	/// An element node.
	Element(ElementView),
	/// A text node.
	Text(Cow<'static, str>),
	/// Multiple views without a wrapper element.
	Fragment(Vec<View>),
	/// Renders nothing.
	Empty,
}

/// An element in the view tree.
#[derive(Debug, Clone)]
pub struct ElementView {
	tag: Cow<'static, str>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	children: Vec<View>,
	is_void: bool,
}

impl ElementView {
	/// Creates a new element view.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		let tag = tag.into();
		let is_void = matches!(
			tag.as_ref(),
			"area"
				| "base" | "br"
				| "col" | "embed"
				| "hr" | "img"
				| "input" | "link"
				| "meta" | "source"
				| "track" | "wbr"
		);
		Self {
			tag,
			attrs: Vec::new(),
			children: Vec::new(),
			is_void,
		}
	}

	/// Adds an attribute.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds a child view.
	pub fn child(mut self, child: impl IntoView) -> Self {
		self.children.push(child.into_view());
		self
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns the attributes.
	pub fn attrs(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
		&self.attrs
	}

	/// Returns the child views.
	pub fn child_views(&self) -> &[View] {
		&self.children
	}

	/// Returns whether this is a void element.
	pub fn is_void(&self) -> bool {
		self.is_void
	}
}

impl View {
	/// Creates an element view builder.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> ElementView {
		ElementView::new(tag)
	}

	/// Creates a text view.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a fragment view.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoView>) -> Self {
		Self::Fragment(children.into_iter().map(|c| c.into_view()).collect())
	}

	/// Creates an empty view.
	pub fn empty() -> Self {
		Self::Empty
	}

	/// Renders the view tree to an HTML string.
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.render_to_string_inner(&mut output);
		output
	}

	fn render_to_string_inner(&self, output: &mut String) {
		match self {
			View::Element(el) => {
				output.push('<');
				output.push_str(el.tag_name());

				for (name, value) in el.attrs() {
					output.push(' ');
					output.push_str(name);
					output.push_str("=\"");
					output.push_str(&html_escape(value));
					output.push('"');
				}

				if el.is_void() {
					output.push_str(" />");
				} else {
					output.push('>');
					for child in el.child_views() {
						child.render_to_string_inner(output);
					}
					output.push_str("</");
					output.push_str(el.tag_name());
					output.push('>');
				}
			}
			View::Text(text) => {
				output.push_str(&html_escape(text));
			}
			View::Fragment(children) => {
				for child in children {
					child.render_to_string_inner(output);
				}
			}
			View::Empty => {}
		}
	}
}

fn html_escape(input: &str) -> Cow<'_, str> {
	if !input.contains(['&', '<', '>', '"', '\'']) {
		return Cow::Borrowed(input);
	}
	let mut escaped = String::with_capacity(input.len());
	for ch in input.chars() {
		match ch {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#39;"),
			_ => escaped.push(ch),
		}
	}
	Cow::Owned(escaped)
}

/// Trait for types convertible into a [`View`].
pub trait IntoView {
	/// Converts self into a View.
	fn into_view(self) -> View;
}

impl IntoView for View {
	fn into_view(self) -> View {
		self
	}
}

impl IntoView for ElementView {
	fn into_view(self) -> View {
		View::Element(self)
	}
}

impl IntoView for String {
	fn into_view(self) -> View {
		View::Text(Cow::Owned(self))
	}
}

impl IntoView for &'static str {
	fn into_view(self) -> View {
		View::Text(Cow::Borrowed(self))
	}
}

impl<T: IntoView> IntoView for Option<T> {
	fn into_view(self) -> View {
		match self {
			Some(v) => v.into_view(),
			None => View::Empty,
		}
	}
}

impl<T: IntoView> IntoView for Vec<T> {
	fn into_view(self) -> View {
		View::Fragment(self.into_iter().map(|v| v.into_view()).collect())
	}
}

impl IntoView for () {
	fn into_view(self) -> View {
		View::Empty
	}
}

/// Trait for reusable UI components.
pub trait Component: 'static {
	/// Renders the component to a View.
	fn render(&self) -> View;

	/// Returns the component's name for debugging.
	fn name() -> &'static str
	where
		Self: Sized;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn text_renders_plainly() {
		assert_eq!(View::text("hello").render_to_string(), "hello");
	}

	#[test]
	fn element_renders_attrs_and_children() {
		let view = View::element("a")
			.attr("href", "/users/")
			.child("Users")
			.into_view();
		assert_eq!(view.render_to_string(), "<a href=\"/users/\">Users</a>");
	}

	#[test]
	fn void_elements_self_close() {
		let view = View::element("meta").attr("charset", "utf-8").into_view();
		assert_eq!(view.render_to_string(), "<meta charset=\"utf-8\" />");
	}

	#[test]
	fn fragment_concatenates() {
		let view = View::fragment(vec!["a", "b"]);
		assert_eq!(view.render_to_string(), "ab");
	}

	#[test]
	fn empty_renders_nothing() {
		assert_eq!(View::empty().render_to_string(), "");
	}

	#[test]
	fn text_is_escaped() {
		let view = View::text("<script>\"&\"</script>");
		assert_eq!(
			view.render_to_string(),
			"&lt;script&gt;&quot;&amp;&quot;&lt;/script&gt;"
		);
	}

	#[test]
	fn component_trait_renders() {
		struct Greeting {
			name: String,
		}

		impl Component for Greeting {
			fn render(&self) -> View {
				View::element("div")
					.child(format!("Hello, {}!", self.name))
					.into_view()
			}

			fn name() -> &'static str {
				"Greeting"
			}
		}

		let comp = Greeting {
			name: "World".to_string(),
		};
		assert_eq!(comp.render().render_to_string(), "<div>Hello, World!</div>");
		assert_eq!(Greeting::name(), "Greeting");
	}
}
