use crate::Value;

/// A growable sequence, encoded as one tag/payload pair per element.
pub trait List: Value {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&dyn Value>;

    /// Appends a blank element and returns it for decoding in place.
    fn push_blank(&mut self) -> &mut dyn Value;
}
