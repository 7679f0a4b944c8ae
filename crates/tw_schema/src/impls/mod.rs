//! [`Value`], [`Typed`] and [`Blank`] for standard types.
//!
//! ## Implemented Menu
//!
//! - scalars: `bool`, `i8`-`i64`, `u8`-`u64`, `f32`, `f64`, `char`
//! - text and bytes: `String`, [`Bytes`]
//! - containers: `Vec<T>`, `Option<T>`, `Box<T>` (transparent)
//! - maps: `BTreeMap<K, V>`, `HashMap<K, V, S>` (std and `hashbrown`)
//!
//! `Vec<u8>` is a list of scalars; use [`Bytes`] for a single byte payload.
//!
//! [`Value`]: crate::Value
//! [`Typed`]: crate::Typed
//! [`Blank`]: crate::Blank
//! [`Bytes`]: crate::Bytes

// -----------------------------------------------------------------------------
// Modules

mod boxed;
mod list;
mod map;
mod option;
mod scalar;
mod text;

// -----------------------------------------------------------------------------
// Helpers

/// Implements the `Any` casts of [`Value`](crate::Value) for `Self`.
macro_rules! impl_value_casts {
    () => {
        #[inline]
        fn as_any(&self) -> &dyn ::core::any::Any {
            self
        }

        #[inline]
        fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
            self
        }

        #[inline]
        fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::core::any::Any> {
            self
        }
    };
}

pub(crate) use impl_value_casts;
