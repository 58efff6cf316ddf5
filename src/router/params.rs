//! Typed route parameters.
//!
//! Matching a URL yields [`RawParams`] (name/value string pairs). Routes
//! declared with a [`RouteParams`] type decode those strings into typed
//! fields, surfacing a [`ParamError`] per field instead of panicking.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A typed-decoding failure for a single parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
	#[error("missing route parameter `{name}`")]
	Missing { name: String },
	#[error("route parameter `{name}`: cannot parse {raw:?} as {expected}: {message}")]
	Parse {
		name: String,
		expected: &'static str,
		raw: String,
		message: String,
	},
}

/// Raw string parameters captured from a matched URL, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawParams {
	entries: Vec<(String, String)>,
}

impl RawParams {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, name: String, value: String) {
		self.entries.push((name, value));
	}

	/// The raw captured string for `name`, if present.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(key, value)| (key.as_str(), value.as_str()))
	}

	/// Decodes one parameter into `T`.
	pub fn parse<T: FromParam>(&self, name: &str) -> Result<T, ParamError> {
		let raw = self.get(name).ok_or_else(|| ParamError::Missing {
			name: name.to_string(),
		})?;
		T::from_param(raw).map_err(|message| ParamError::Parse {
			name: name.to_string(),
			expected: T::EXPECTED,
			raw: raw.to_string(),
			message,
		})
	}
}

impl fmt::Display for RawParams {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{{")?;
		for (i, (key, value)) in self.entries.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{key}={value}")?;
		}
		write!(f, "}}")
	}
}

/// Decodes one raw URL segment into a typed value.
pub trait FromParam: Sized {
	/// Type name used in [`ParamError::Parse`] messages.
	const EXPECTED: &'static str;

	fn from_param(raw: &str) -> Result<Self, String>;
}

impl FromParam for String {
	const EXPECTED: &'static str = "String";

	fn from_param(raw: &str) -> Result<Self, String> {
		Ok(raw.to_string())
	}
}

macro_rules! from_param_via_fromstr {
	($($ty:ty => $name:literal),* $(,)?) => {
		$(
			impl FromParam for $ty {
				const EXPECTED: &'static str = $name;

				fn from_param(raw: &str) -> Result<Self, String> {
					raw.parse::<$ty>().map_err(|e| e.to_string())
				}
			}
		)*
	};
}

from_param_via_fromstr! {
	i8 => "i8", i16 => "i16", i32 => "i32", i64 => "i64", i128 => "i128",
	u8 => "u8", u16 => "u16", u32 => "u32", u64 => "u64", u128 => "u128",
	isize => "isize", usize => "usize",
	f32 => "f32", f64 => "f64",
	bool => "bool",
	char => "char",
}

#[cfg(feature = "uuid")]
impl FromParam for uuid::Uuid {
	const EXPECTED: &'static str = "Uuid";

	fn from_param(raw: &str) -> Result<Self, String> {
		raw.parse::<uuid::Uuid>().map_err(|e| e.to_string())
	}
}

#[cfg(feature = "chrono")]
impl FromParam for chrono::NaiveDate {
	const EXPECTED: &'static str = "NaiveDate";

	fn from_param(raw: &str) -> Result<Self, String> {
		raw.parse::<chrono::NaiveDate>().map_err(|e| e.to_string())
	}
}

/// The typed parameter struct of a route.
///
/// `NAMES` lists the parameters the struct expects; route registration
/// checks it against the pattern's declared `:param` names so mismatches
/// fail at build time rather than on first navigation.
///
/// # Example
///
/// ```
/// use corridor::router::{ParamError, RawParams, RouteParams};
///
/// struct UserParams {
/// 	id: u32,
/// }
///
/// impl RouteParams for UserParams {
/// 	const NAMES: &'static [&'static str] = &["id"];
///
/// 	fn from_raw(raw: &RawParams) -> Result<Self, ParamError> {
/// 		Ok(Self { id: raw.parse("id")? })
/// 	}
/// }
/// ```
pub trait RouteParams: Sized + 'static {
	const NAMES: &'static [&'static str];

	fn from_raw(raw: &RawParams) -> Result<Self, ParamError>;
}

/// Parameter type for routes with no `:param` segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoParams;

impl RouteParams for NoParams {
	const NAMES: &'static [&'static str] = &[];

	fn from_raw(_raw: &RawParams) -> Result<Self, ParamError> {
		Ok(Self)
	}
}
