use crate::Value;

/// A key/value collection, encoded as one length-delimited entry per pair.
pub trait Map: Value {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the entries in the map's own order.
    fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Value, &dyn Value)> + '_>;

    fn blank_key(&self) -> Box<dyn Value>;

    fn blank_value(&self) -> Box<dyn Value>;

    /// Inserts a decoded pair, replacing any previous value for the key.
    ///
    /// Returns `false` if either box does not hold the map's key or value type.
    fn insert_boxed(&mut self, key: Box<dyn Value>, value: Box<dyn Value>) -> bool;
}
