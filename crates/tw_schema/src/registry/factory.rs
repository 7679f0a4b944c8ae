use core::any::TypeId;

use crate::InstantiationError;
use crate::ops::Message;
use crate::registry::SchemaRegistry;

impl SchemaRegistry {
    /// Creates a blank instance of a registered type.
    ///
    /// No constructor of the type runs: every field comes from its own
    /// [`Blank`](crate::Blank) implementation.
    ///
    /// ```
    /// use core::any::TypeId;
    /// use tw_schema::{derive::Schema, registry::SchemaRegistry};
    ///
    /// #[derive(Schema, Debug, PartialEq)]
    /// struct Session {
    ///     token: String,
    ///     ttl: u32,
    /// }
    ///
    /// impl Default for Session {
    ///     fn default() -> Self {
    ///         Session { token: "anonymous".into(), ttl: 60 }
    ///     }
    /// }
    ///
    /// let registry = SchemaRegistry::new();
    /// registry.register::<Session>();
    ///
    /// let blank = registry.create_blank(TypeId::of::<Session>()).unwrap();
    /// let session = blank.downcast_ref::<Session>().unwrap();
    /// assert_eq!(session, &Session { token: String::new(), ttl: 0 });
    /// ```
    pub fn create_blank(&self, type_id: TypeId) -> Result<Box<dyn Message>, InstantiationError> {
        match self.message_type(type_id) {
            Some(message) => message
                .blank()
                .ok_or(InstantiationError::NotInstantiable {
                    type_path: message.type_path(),
                }),
            None => Err(InstantiationError::UnknownType(format!("{type_id:?}"))),
        }
    }

    /// Creates a blank instance of a registered type, looked up by type path.
    pub fn create_blank_by_path(
        &self,
        type_path: &str,
    ) -> Result<Box<dyn Message>, InstantiationError> {
        match self.message_type_by_path(type_path) {
            Some(message) => message
                .blank()
                .ok_or(InstantiationError::NotInstantiable {
                    type_path: message.type_path(),
                }),
            None => Err(InstantiationError::UnknownType(type_path.to_owned())),
        }
    }
}
