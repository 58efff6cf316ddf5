//! Path pattern parsing and matching.
//!
//! Patterns use `/literal/:param` syntax: a segment starting with `:` is a
//! named wildcard matching exactly one URL segment. Matching requires exact
//! segment-count equality; literals compare byte-for-byte, case-sensitively.

use super::params::RawParams;

/// One segment of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	/// Matches only itself.
	Literal(String),
	/// Named wildcard; captures the URL segment under this name.
	Param(String),
}

/// A parsed route pattern.
///
/// # Example
///
/// ```
/// use corridor::router::PathPattern;
///
/// let pattern = PathPattern::parse("/users/:id");
/// let params = pattern.matches("/users/42").unwrap();
/// assert_eq!(params.get("id"), Some("42"));
/// assert!(pattern.matches("/users").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PathPattern {
	raw: String,
	segments: Vec<Segment>,
}

/// Splits a URL path into segments. Leading and trailing slashes are
/// stripped; `""` and `"/"` normalize to the empty segment list.
pub fn normalize(path: &str) -> Vec<&str> {
	let trimmed = path.trim_matches('/');
	if trimmed.is_empty() {
		Vec::new()
	} else {
		trimmed.split('/').collect()
	}
}

impl PathPattern {
	/// Parses a pattern string.
	pub fn parse(path: &str) -> Self {
		let segments = normalize(path)
			.into_iter()
			.map(|segment| match segment.strip_prefix(':') {
				Some(name) => Segment::Param(name.to_string()),
				None => Segment::Literal(segment.to_string()),
			})
			.collect();
		Self {
			raw: path.to_string(),
			segments,
		}
	}

	/// The original pattern string.
	pub fn raw(&self) -> &str {
		&self.raw
	}

	/// The parsed segments.
	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Number of segments (the pattern's depth in the layout hierarchy).
	pub fn depth(&self) -> usize {
		self.segments.len()
	}

	/// Names of the `:param` segments, in pattern order.
	pub fn param_names(&self) -> Vec<&str> {
		self.segments
			.iter()
			.filter_map(|segment| match segment {
				Segment::Param(name) => Some(name.as_str()),
				Segment::Literal(_) => None,
			})
			.collect()
	}

	/// Whether the pattern declares any `:param` segments.
	pub fn is_parameterized(&self) -> bool {
		self.segments
			.iter()
			.any(|segment| matches!(segment, Segment::Param(_)))
	}

	/// Matches a URL path, returning captured raw parameters on success.
	pub fn matches(&self, url: &str) -> Option<RawParams> {
		self.matches_segments(&normalize(url))
	}

	/// Matches an already-normalized segment list. Layout resolution uses
	/// this with truncated URL prefixes.
	pub fn matches_segments(&self, url_segments: &[&str]) -> Option<RawParams> {
		if url_segments.len() != self.segments.len() {
			return None;
		}
		let mut params = RawParams::new();
		for (pattern_segment, url_segment) in self.segments.iter().zip(url_segments) {
			match pattern_segment {
				Segment::Literal(literal) => {
					if literal != url_segment {
						return None;
					}
				}
				// An empty URL segment is still captured; typed decoding
				// decides whether that is an error.
				Segment::Param(name) => params.insert(name.clone(), (*url_segment).to_string()),
			}
		}
		Some(params)
	}

	/// Builds a concrete path by substituting each `:param` with its value.
	/// Returns `None` when a declared parameter has no value.
	pub fn reverse(&self, params: &[(&str, &str)]) -> Option<String> {
		if self.segments.is_empty() {
			return Some("/".to_string());
		}
		let mut path = String::new();
		for segment in &self.segments {
			path.push('/');
			match segment {
				Segment::Literal(literal) => path.push_str(literal),
				Segment::Param(name) => {
					let value = params
						.iter()
						.find(|(key, _)| key == name)
						.map(|(_, value)| *value)?;
					path.push_str(value);
				}
			}
		}
		Some(path)
	}
}
