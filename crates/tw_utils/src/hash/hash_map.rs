//! A [`hashbrown::HashMap`] with a fixed, process-independent hasher.

pub use hashbrown::hash_map::{Entry, OccupiedEntry, VacantEntry};
pub use hashbrown::hash_map::{IntoIter, Iter, IterMut, Keys, Values};

use super::FixedHashState;

/// A [`hashbrown::HashMap`] defaulting to [`FixedHashState`].
///
/// Iteration order only depends on the inserted keys, never on a random seed.
///
/// # Examples
///
/// ```
/// use tw_utils::hash::HashMap;
///
/// let mut map: HashMap<&str, u32> = HashMap::default();
/// map.insert("x", 1);
///
/// assert_eq!(map.get("x"), Some(&1));
/// ```
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;
