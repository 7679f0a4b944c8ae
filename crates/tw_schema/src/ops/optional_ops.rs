use crate::Value;

/// A value that may be absent; absent values produce no bytes.
pub trait Optional: Value {
    fn get(&self) -> Option<&dyn Value>;

    /// Returns the present value, first filling the slot with a blank one.
    fn get_or_insert_blank(&mut self) -> &mut dyn Value;

    fn clear(&mut self);
}
