use crate::Value;

/// A fieldless enum, encoded as the varint index of its variant.
///
/// Indices follow declaration order; explicit discriminants play no part.
///
/// ```
/// use tw_schema::{Enum, derive::Schema};
///
/// #[derive(Schema)]
/// enum Level {
///     Low,
///     High = 10,
/// }
///
/// let mut level = Level::High;
/// assert_eq!(level.variant_index(), 1);
/// assert_eq!(level.variant_name(), "High");
/// assert_eq!(level.variant_len(), 2);
///
/// assert!(level.set_variant_index(0));
/// assert_eq!(level.variant_name(), "Low");
/// assert!(!level.set_variant_index(level.variant_len()));
/// ```
pub trait Enum: Value {
    fn variant_index(&self) -> u32;

    fn variant_name(&self) -> &'static str;

    fn variant_len(&self) -> u32;

    /// Switches to the variant at `index`, returning `false` if there is none.
    fn set_variant_index(&mut self, index: u32) -> bool;
}
