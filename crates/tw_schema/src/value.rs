use core::any::Any;

use crate::kind::ValueKind;
use crate::ops::{Enum, List, Map, Message, Optional};
use crate::registry::SchemaRegistry;

// -----------------------------------------------------------------------------
// Value

/// Dynamic access to a value that can appear in a message field.
///
/// Encoders read through [`value_ref`](Value::value_ref) and decoders write
/// through [`value_mut`](Value::value_mut); neither needs to know the
/// concrete type.
pub trait Value: Any + Send + Sync {
    /// Returns a borrowed, classified view of this value.
    fn value_ref(&self) -> ValueRef<'_>;

    /// Returns a mutable, classified view of this value.
    fn value_mut(&mut self) -> ValueMut<'_>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl dyn Value {
    /// Downcasts to a concrete type.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Downcasts to a concrete type.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }
}

// -----------------------------------------------------------------------------
// Typed

/// Static classification of a [`Value`] type.
pub trait Typed: Value + Sized {
    /// The kind recorded for fields of this type.
    fn kind() -> ValueKind;

    /// Registers any message types reachable from this type.
    ///
    /// Scalars do nothing, containers forward to their elements and messages
    /// register themselves.
    #[inline]
    fn register_into(_registry: &SchemaRegistry) {}
}

// -----------------------------------------------------------------------------
// Blank

/// Creation of a blank instance without running user constructor logic.
///
/// Derived implementations build every field from its own `Blank`, so a type's
/// `new` or `Default` is never called while decoding.
///
/// ```
/// use tw_schema::Blank;
///
/// assert_eq!(u32::blank(), 0);
/// assert_eq!(Option::<String>::blank(), None);
/// assert!(Vec::<u8>::blank().is_empty());
/// ```
pub trait Blank: Sized {
    fn blank() -> Self;
}

/// Creates a blank `T`.
#[inline]
pub fn blank<T: Blank>() -> T {
    T::blank()
}

// -----------------------------------------------------------------------------
// ValueRef

/// A borrowed view of a [`Value`], classified by kind.
#[derive(Clone, Copy)]
pub enum ValueRef<'a> {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Char(char),
    Text(&'a str),
    Bytes(&'a [u8]),
    Enum(&'a dyn Enum),
    Message(&'a dyn Message),
    List(&'a dyn List),
    Map(&'a dyn Map),
    Optional(Option<&'a dyn Value>),
    Opaque(&'static str),
}

// -----------------------------------------------------------------------------
// ValueMut

/// A mutable view of a [`Value`], classified by kind.
pub enum ValueMut<'a> {
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Char(&'a mut char),
    Text(&'a mut String),
    Bytes(&'a mut Vec<u8>),
    Enum(&'a mut dyn Enum),
    Message(&'a mut dyn Message),
    List(&'a mut dyn List),
    Map(&'a mut dyn Map),
    Optional(&'a mut dyn Optional),
    Opaque(&'static str),
}

impl ValueRef<'_> {
    /// A short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Char(_) => "char",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Enum(_) => "enum",
            Self::Message(_) => "message",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Optional(_) => "option",
            Self::Opaque(path) => *path,
        }
    }
}

impl ValueMut<'_> {
    /// A short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Char(_) => "char",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Enum(_) => "enum",
            Self::Message(_) => "message",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Optional(_) => "option",
            Self::Opaque(path) => *path,
        }
    }
}
