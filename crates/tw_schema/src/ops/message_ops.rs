use core::any::TypeId;
use core::fmt;

use crate::info::{FieldInfo, MessageType};
use crate::registry::SchemaRegistry;
use crate::{Blank, Typed, Value};

// -----------------------------------------------------------------------------
// Message

/// A struct whose fields can be read and written by index.
///
/// Indices count the serialized fields in declaration order, skipped fields
/// excluded, and match [`FieldDescriptor::index`].
///
/// [`FieldDescriptor::index`]: crate::schema::FieldDescriptor::index
pub trait Message: Value {
    /// Returns the static description of the concrete type.
    fn reflect_message_type(&self) -> MessageType;

    fn field(&self, index: usize) -> Option<&dyn Value>;

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Value>;

    fn field_len(&self) -> usize;
}

impl dyn Message {
    /// Returns `true` if the underlying value is a `T`.
    #[inline]
    pub fn is<T: Message>(&self) -> bool {
        self.as_any().type_id() == TypeId::of::<T>()
    }

    /// Downcasts to a concrete message type.
    #[inline]
    pub fn downcast_ref<T: Message>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Downcasts to a concrete message type.
    #[inline]
    pub fn downcast_mut<T: Message>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }

    /// Takes ownership of the concrete message, handing the box back on mismatch.
    ///
    /// ```
    /// use tw_schema::{Blank, Message, derive::Schema};
    ///
    /// #[derive(Schema)]
    /// struct Ping {
    ///     seq: u64,
    /// }
    ///
    /// let boxed: Box<dyn Message> = Box::new(Ping::blank());
    /// let ping = boxed.take::<Ping>().ok().unwrap();
    /// assert_eq!(ping.seq, 0);
    /// ```
    pub fn take<T: Message>(self: Box<Self>) -> Result<T, Box<dyn Message>> {
        if self.is::<T>() {
            match self.into_any().downcast::<T>() {
                Ok(value) => Ok(*value),
                // `is` just confirmed the type.
                Err(_) => unreachable!(),
            }
        } else {
            Err(self)
        }
    }
}

impl fmt::Debug for dyn Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dyn Message<{}>", self.reflect_message_type().type_path())
    }
}

// -----------------------------------------------------------------------------
// Schema

/// The static side of a [`Message`], implemented by `#[derive(Schema)]`.
pub trait Schema: Message + Typed + Blank {
    /// Serialized fields in declaration order.
    fn fields() -> Vec<FieldInfo>;

    /// Registers the message types of nested fields.
    #[inline]
    fn register_dependencies(_registry: &SchemaRegistry) {}

    #[inline]
    fn message_type() -> MessageType {
        MessageType::of::<Self>()
    }
}
