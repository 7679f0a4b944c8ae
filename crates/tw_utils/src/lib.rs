//! Small containers shared by the `tw_*` crates.
//!
//! - [`hash`]: `hashbrown` containers with fixed `foldhash` seeds.
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId), used by the schema registry.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
