//! Async route loaders.
//!
//! A loader runs when its route becomes active and produces data the view
//! reads through [`LoaderSlot`]. Loaders for all matched routes run in
//! parallel; a failure in one slot never aborts its siblings. Slot values
//! are type-erased so routes with different data types share one table;
//! [`LoaderSlot::data`] downcasts back to the concrete type.

use std::any::Any;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use thiserror::Error;

use super::params::{ParamError, RawParams, RouteParams};

/// A loader failure, held in the slot so the view can render an error
/// state for that level of the hierarchy.
#[derive(Debug, Clone, Error)]
pub enum LoaderError {
	#[error("loader failed: {0}")]
	Failed(String),
	#[error(transparent)]
	InvalidParams(#[from] ParamError),
}

impl LoaderError {
	pub fn failed(message: impl Into<String>) -> Self {
		Self::Failed(message.into())
	}
}

/// The loader state for one matched route, indexed by match position.
#[derive(Clone, Default)]
pub enum LoaderSlot {
	/// The route declares no loader.
	#[default]
	NoLoader,
	/// The loader is running.
	Loading,
	/// The loader completed; the value downcasts via [`LoaderSlot::data`].
	Loaded(Rc<dyn Any>),
	/// The loader (or its parameter decoding) failed.
	Error(LoaderError),
}

impl LoaderSlot {
	pub fn is_loading(&self) -> bool {
		matches!(self, Self::Loading)
	}

	pub fn is_loaded(&self) -> bool {
		matches!(self, Self::Loaded(_))
	}

	pub fn error(&self) -> Option<&LoaderError> {
		match self {
			Self::Error(err) => Some(err),
			_ => None,
		}
	}

	/// The loaded value, downcast to `T`. `None` while loading, on error,
	/// for loaderless routes, and on type mismatch.
	pub fn data<T: 'static>(&self) -> Option<Rc<T>> {
		match self {
			Self::Loaded(value) => Rc::clone(value).downcast::<T>().ok(),
			_ => None,
		}
	}
}

impl std::fmt::Debug for LoaderSlot {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::NoLoader => f.write_str("NoLoader"),
			Self::Loading => f.write_str("Loading"),
			Self::Loaded(_) => f.write_str("Loaded(..)"),
			Self::Error(err) => f.debug_tuple("Error").field(err).finish(),
		}
	}
}

/// A registered loader with its parameter type erased. Takes the raw
/// params of the current match; decoding happens inside so a bad URL
/// surfaces as [`LoaderError::InvalidParams`] in the slot.
pub type ErasedLoader =
	Rc<dyn Fn(&RawParams) -> LocalBoxFuture<'static, Result<Rc<dyn Any>, LoaderError>>>;

/// Marker for loaders taking no arguments.
pub struct WithoutArgs;

/// Marker for loaders taking the route's typed parameters.
pub struct WithArgs;

/// Conversion from a loader closure into the erased form.
///
/// Implemented for `Fn() -> Future` and `Fn(P) -> Future` so parameterless
/// routes do not have to accept a dummy argument. The marker type `M`
/// keeps the two blanket impls from overlapping.
pub trait IntoLoader<P: RouteParams, M> {
	fn into_loader(self) -> ErasedLoader;
}

impl<P, F, Fut, T> IntoLoader<P, WithoutArgs> for F
where
	P: RouteParams,
	F: Fn() -> Fut + 'static,
	Fut: Future<Output = Result<T, LoaderError>> + 'static,
	T: 'static,
{
	fn into_loader(self) -> ErasedLoader {
		let f = Rc::new(self);
		Rc::new(move |_raw: &RawParams| {
			let f = Rc::clone(&f);
			Box::pin(async move {
				let value = f().await?;
				Ok(Rc::new(value) as Rc<dyn Any>)
			}) as LocalBoxFuture<'static, _>
		})
	}
}

impl<P, F, Fut, T> IntoLoader<P, WithArgs> for F
where
	P: RouteParams,
	F: Fn(P) -> Fut + 'static,
	Fut: Future<Output = Result<T, LoaderError>> + 'static,
	T: 'static,
{
	fn into_loader(self) -> ErasedLoader {
		let f = Rc::new(self);
		Rc::new(move |raw: &RawParams| {
			let f = Rc::clone(&f);
			let decoded = P::from_raw(raw);
			Box::pin(async move {
				let params = decoded?;
				let value = f(params).await?;
				Ok(Rc::new(value) as Rc<dyn Any>)
			}) as LocalBoxFuture<'static, _>
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::router::params::NoParams;
	use futures::executor::block_on;

	#[test]
	fn slot_downcast() {
		let slot = LoaderSlot::Loaded(Rc::new("hello".to_string()));
		assert_eq!(slot.data::<String>().unwrap().as_str(), "hello");
		assert!(slot.data::<u32>().is_none());
		assert!(LoaderSlot::Loading.data::<String>().is_none());
	}

	#[test]
	fn zero_arg_loader_erasure() {
		let loader = IntoLoader::<NoParams, WithoutArgs>::into_loader(|| async {
			Ok::<_, LoaderError>(7u32)
		});
		let result = block_on(loader(&RawParams::new())).unwrap();
		assert_eq!(*result.downcast::<u32>().unwrap(), 7);
	}

	#[test]
	fn typed_loader_decodes_params() {
		struct IdParams {
			id: u32,
		}

		impl RouteParams for IdParams {
			const NAMES: &'static [&'static str] = &["id"];

			fn from_raw(raw: &RawParams) -> Result<Self, ParamError> {
				Ok(Self { id: raw.parse("id")? })
			}
		}

		let loader = IntoLoader::<IdParams, WithArgs>::into_loader(|params: IdParams| async move {
			Ok::<_, LoaderError>(params.id * 2)
		});

		let mut raw = RawParams::new();
		raw.insert("id".to_string(), "21".to_string());
		let result = block_on(loader(&raw)).unwrap();
		assert_eq!(*result.downcast::<u32>().unwrap(), 42);

		let mut bad = RawParams::new();
		bad.insert("id".to_string(), "nope".to_string());
		let err = block_on(loader(&bad)).unwrap_err();
		assert!(matches!(err, LoaderError::InvalidParams(_)));
	}
}
