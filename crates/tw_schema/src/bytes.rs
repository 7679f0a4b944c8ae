use core::ops::{Deref, DerefMut};

/// An owned byte string, encoded as a single length-delimited payload.
///
/// `Vec<u8>` is a list of `u8` and costs a tag plus four bytes per element;
/// wrap it in `Bytes` to write it as one payload instead.
///
/// ```
/// use tw_schema::{Bytes, Typed, ValueKind};
///
/// assert_eq!(Bytes::kind(), ValueKind::Bytes);
/// assert_eq!(Vec::<u8>::kind(), ValueKind::List(Box::new(ValueKind::U8)));
///
/// let bytes = Bytes::from(vec![1, 2, 3]);
/// assert_eq!(&bytes[..], &[1, 2, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    #[inline]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for Bytes {
    type Target = Vec<u8>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Bytes {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<u8>> for Bytes {
    #[inline]
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for Bytes {
    #[inline]
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl From<Bytes> for Vec<u8> {
    #[inline]
    fn from(value: Bytes) -> Self {
        value.0
    }
}
