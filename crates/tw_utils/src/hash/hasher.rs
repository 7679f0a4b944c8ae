//! Provide `FixedHasher` and `NoOpHasher`.
//!
//! `FixedHasher` is `foldhash` with a fixed seed, so equal keys hash equally
//! in every process.
//!
//! `NoOpHasher` passes a single `u64` through, which is all a [`TypeId`] writes.
//!
//! [`TypeId`]: core::any::TypeId

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x7A63_9E1B_C2D4_0F58);

/// A type alias for [`foldhash::fast::FoldHasher`] seeded by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// Fixed hash state based upon a random but fixed seed.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use tw_utils::hash::FixedHashState;
///
/// assert_eq!(FixedHashState.hash_one("label"), FixedHashState.hash_one("label"));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// A hasher that uses the written `u64` as the hash value.
///
/// Created through [`NoOpHashState::build_hasher`].
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        // Only reached by keys that do not write a single `u64`.
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Builds [`NoOpHasher`]s, meant for keys that are already well distributed.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use tw_utils::hash::NoOpHashState;
///
/// assert_eq!(NoOpHashState.hash_one(42_u64), 42);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}
