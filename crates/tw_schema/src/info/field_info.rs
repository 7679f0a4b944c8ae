use core::any::{Any, TypeId};
use core::fmt;

use crate::{Typed, ValueKind};

// -----------------------------------------------------------------------------
// FieldInfo

/// Static information for one serialized field.
///
/// Tuple struct fields are named by their position (`"0"`, `"1"`, ...).
///
/// # Examples
///
/// ```
/// use tw_schema::{Schema, ValueKind, derive::Schema};
///
/// #[derive(Schema)]
/// struct Foo {
///     #[schema(tag = 7)]
///     bar: Vec<f32>,
/// }
///
/// let fields = <Foo as Schema>::fields();
/// assert_eq!(fields[0].name(), "bar");
/// assert_eq!(fields[0].tag(), Some(7));
/// assert!(fields[0].type_is::<Vec<f32>>());
/// assert_eq!(fields[0].kind(), ValueKind::List(Box::new(ValueKind::F32)));
/// ```
#[derive(Clone, Copy)]
pub struct FieldInfo {
    ty_id: TypeId,
    name: &'static str,
    tag: Option<u32>,
    // Kinds of message fields are only computed when a schema is derived.
    kind: fn() -> ValueKind,
}

impl FieldInfo {
    /// Creates an untagged field named `name` of type `T`.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            name,
            tag: None,
            kind: T::kind,
        }
    }

    /// Assigns an explicit field number.
    #[inline]
    pub const fn with_tag(mut self, tag: u32) -> Self {
        self.tag = Some(tag);
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The explicit field number, if any.
    #[inline]
    pub const fn tag(&self) -> Option<u32> {
        self.tag
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        (self.kind)()
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("kind", &self.kind())
            .finish()
    }
}
