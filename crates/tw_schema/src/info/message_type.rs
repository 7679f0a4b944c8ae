use core::any::TypeId;
use core::fmt;

use crate::info::FieldInfo;
use crate::ops::{Message, Schema};

// -----------------------------------------------------------------------------
// MessageType

/// The static description of a message type.
///
/// Holds what a registry needs to derive a [`FieldSchema`] and, if the type
/// can be decoded, to create a blank instance of it without naming the type.
///
/// [`FieldSchema`]: crate::schema::FieldSchema
#[derive(Clone, Copy)]
pub struct MessageType {
    type_id: TypeId,
    type_path: &'static str,
    fields: fn() -> Vec<FieldInfo>,
    blank: Option<fn() -> Box<dyn Message>>,
}

impl MessageType {
    /// Describes a derived message type.
    ///
    /// ```
    /// use tw_schema::{derive::Schema, info::MessageType};
    ///
    /// #[derive(Schema)]
    /// struct Foo(u8, String);
    ///
    /// let ty = MessageType::of::<Foo>();
    /// assert!(ty.type_path().ends_with("Foo"));
    /// assert_eq!(ty.fields().len(), 2);
    /// assert!(ty.is_instantiable());
    /// ```
    pub fn of<T: Schema>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: core::any::type_name::<T>(),
            fields: T::fields,
            blank: Some(blank_message::<T>),
        }
    }

    /// Describes a hand-written message type that can only be encoded.
    ///
    /// Decoding such a type fails with [`InstantiationError::NotInstantiable`]
    /// until a blank constructor is attached with [`with_blank`].
    ///
    /// [`InstantiationError::NotInstantiable`]: crate::InstantiationError::NotInstantiable
    /// [`with_blank`]: Self::with_blank
    pub fn encode_only<T: Message>(fields: fn() -> Vec<FieldInfo>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: core::any::type_name::<T>(),
            fields,
            blank: None,
        }
    }

    /// Attaches a blank constructor.
    #[inline]
    pub const fn with_blank(mut self, blank: fn() -> Box<dyn Message>) -> Self {
        self.blank = Some(blank);
        self
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The fully qualified type name, as given by [`core::any::type_name`].
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Serialized fields in declaration order.
    #[inline]
    pub fn fields(&self) -> Vec<FieldInfo> {
        (self.fields)()
    }

    #[inline]
    pub const fn is_instantiable(&self) -> bool {
        self.blank.is_some()
    }

    /// Creates a blank instance, `None` for encode-only types.
    #[inline]
    pub fn blank(&self) -> Option<Box<dyn Message>> {
        self.blank.map(|blank| blank())
    }
}

fn blank_message<T: Schema>() -> Box<dyn Message> {
    Box::new(T::blank())
}

impl fmt::Debug for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageType")
            .field("type_path", &self.type_path)
            .field("instantiable", &self.is_instantiable())
            .finish_non_exhaustive()
    }
}

impl PartialEq for MessageType {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for MessageType {}
