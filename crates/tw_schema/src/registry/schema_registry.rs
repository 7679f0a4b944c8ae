use core::any::TypeId;
use std::sync::{Arc, LazyLock, PoisonError};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, trace, warn};
use tw_utils::TypeIdMap;
use tw_utils::hash::{FixedHashState, HashMap};

use crate::SchemaError;
use crate::info::MessageType;
use crate::ops::Schema;
use crate::schema::FieldSchema;

// -----------------------------------------------------------------------------
// SchemaRegistry

struct TypeTable {
    by_id: TypeIdMap<MessageType>,
    by_path: HashMap<&'static str, TypeId>,
}

/// A thread-safe cache of [`FieldSchema`]s and registry of [`MessageType`]s.
///
/// Schemas are derived on first request and never evicted. Derivation runs
/// outside any lock; if two threads race on the same type, the first schema
/// inserted is kept and the other build is dropped. Both are equal, so
/// callers cannot tell the difference.
///
/// Lock poisoning is ignored: every write leaves the tables consistent.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tw_schema::{derive::Schema, registry::SchemaRegistry};
///
/// #[derive(Schema)]
/// struct Header {
///     id: u64,
///     trace: Option<String>,
/// }
///
/// let registry = SchemaRegistry::new();
///
/// let a = registry.get::<Header>().unwrap();
/// let b = registry.get::<Header>().unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
///
/// // Deriving a schema also records the type for dynamic lookups.
/// let by_path = registry.get_by_path(a.type_path()).unwrap();
/// assert!(Arc::ptr_eq(&a, &by_path));
/// ```
pub struct SchemaRegistry {
    schemas: RwLock<TypeIdMap<Arc<FieldSchema>>>,
    types: RwLock<TypeTable>,
    failures: RwLock<TypeIdMap<()>>,
}

impl Default for SchemaRegistry {
    /// See [`SchemaRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self {
            schemas: RwLock::new(TypeIdMap::new()),
            types: RwLock::new(TypeTable {
                by_id: TypeIdMap::new(),
                by_path: HashMap::with_hasher(FixedHashState),
            }),
            failures: RwLock::new(TypeIdMap::new()),
        }
    }

    /// Returns the process-wide registry.
    ///
    /// Created on first use, at which point [`auto_register`] runs once.
    ///
    /// [`auto_register`]: Self::auto_register
    pub fn global() -> Arc<Self> {
        static GLOBAL: LazyLock<Arc<SchemaRegistry>> = LazyLock::new(|| {
            let registry = SchemaRegistry::new();
            if registry.auto_register() {
                debug!(
                    "auto registered {} message types into the global schema registry",
                    registry.type_len(),
                );
            }
            Arc::new(registry)
        });

        Arc::clone(&GLOBAL)
    }

    #[inline]
    fn read_schemas(&self) -> RwLockReadGuard<'_, TypeIdMap<Arc<FieldSchema>>> {
        self.schemas.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn write_schemas(&self) -> RwLockWriteGuard<'_, TypeIdMap<Arc<FieldSchema>>> {
        self.schemas.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn write_failures(&self) -> RwLockWriteGuard<'_, TypeIdMap<()>> {
        self.failures.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn read_types(&self) -> RwLockReadGuard<'_, TypeTable> {
        self.types.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn write_types(&self) -> RwLockWriteGuard<'_, TypeTable> {
        self.types.write().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------
    // Schemas

    /// Returns the schema of `T`, deriving and caching it on first use.
    #[inline]
    pub fn get<T: Schema>(&self) -> Result<Arc<FieldSchema>, SchemaError> {
        self.get_or_derive(&T::message_type())
    }

    /// Returns the cached schema of `message`, deriving it on a miss.
    ///
    /// The first description registered for a type defines its layout. If
    /// another [`MessageType`] with the same id was registered earlier, the
    /// schema is derived from that one, so every lookup path agrees on the
    /// field numbers no matter which runs first.
    ///
    /// A failed derivation caches nothing, so the next request fails again
    /// with the same error. Only the first failure per type is logged as a
    /// warning.
    pub fn get_or_derive(&self, message: &MessageType) -> Result<Arc<FieldSchema>, SchemaError> {
        let type_id = message.type_id();

        if let Some(schema) = self.read_schemas().get(&type_id) {
            return Ok(Arc::clone(schema));
        }

        self.register_type(*message);
        let source = self.message_type(type_id).unwrap_or(*message);

        let built = match FieldSchema::derive(&source) {
            Ok(schema) => Arc::new(schema),
            Err(err) => {
                if self.write_failures().try_insert(type_id, || ()) {
                    warn!("cannot derive schema for `{}`: {err}", source.type_path());
                } else {
                    debug!("cannot derive schema for `{}`: {err}", source.type_path());
                }
                return Err(err);
            }
        };

        let mut inserted = false;
        let schema = {
            let mut schemas = self.write_schemas();
            let schema = schemas.get_or_insert(type_id, || {
                inserted = true;
                Arc::clone(&built)
            });
            Arc::clone(schema)
        };

        if inserted {
            debug!(
                "cached schema for `{}` with {} fields",
                schema.type_path(),
                schema.field_len(),
            );
        } else {
            trace!(
                "discarded a concurrent schema build for `{}`",
                schema.type_path()
            );
        }

        Ok(schema)
    }

    /// Returns the schema of a registered type.
    ///
    /// Fails with [`SchemaError::UnknownType`] if the type was never
    /// registered nor derived.
    pub fn get_by_id(&self, type_id: TypeId) -> Result<Arc<FieldSchema>, SchemaError> {
        if let Some(schema) = self.read_schemas().get(&type_id) {
            return Ok(Arc::clone(schema));
        }
        match self.message_type(type_id) {
            Some(message) => self.get_or_derive(&message),
            None => Err(SchemaError::UnknownType(format!("{type_id:?}"))),
        }
    }

    /// Returns the schema of a registered type, looked up by type path.
    pub fn get_by_path(&self, type_path: &str) -> Result<Arc<FieldSchema>, SchemaError> {
        match self.message_type_by_path(type_path) {
            Some(message) => self.get_or_derive(&message),
            None => Err(SchemaError::UnknownType(type_path.to_owned())),
        }
    }

    /// Whether a schema for the type is cached.
    #[inline]
    pub fn is_cached(&self, type_id: TypeId) -> bool {
        self.read_schemas().contains(&type_id)
    }

    /// Whether deriving a schema for the type has failed before.
    #[inline]
    pub fn has_failed(&self, type_id: TypeId) -> bool {
        self.failures.read().unwrap_or_else(PoisonError::into_inner).contains(&type_id)
    }

    /// The number of cached schemas.
    #[inline]
    pub fn schema_len(&self) -> usize {
        self.read_schemas().len()
    }

    // -------------------------------------------------------------------------
    // Types

    /// Registers `T` and, recursively, the message types of its fields.
    ///
    /// Registration only records type descriptions; schemas are still derived
    /// lazily. If `T` is already registered, nothing happens.
    ///
    /// ```
    /// use core::any::TypeId;
    /// use tw_schema::{derive::Schema, registry::SchemaRegistry};
    ///
    /// #[derive(Schema)]
    /// struct Leaf(u8);
    ///
    /// #[derive(Schema)]
    /// struct Tree {
    ///     leaves: Vec<Leaf>,
    ///     parent: Option<Box<Tree>>,
    /// }
    ///
    /// let registry = SchemaRegistry::new();
    /// registry.register::<Tree>();
    ///
    /// assert!(registry.contains(TypeId::of::<Tree>()));
    /// assert!(registry.contains(TypeId::of::<Leaf>()));
    /// assert_eq!(registry.schema_len(), 0);
    /// ```
    pub fn register<T: Schema>(&self) {
        if self.register_type(T::message_type()) {
            T::register_dependencies(self);
        }
    }

    /// Records a message type without its dependencies.
    ///
    /// Returns `false` if a type with the same id was already present.
    pub fn register_type(&self, message: MessageType) -> bool {
        if self.contains(message.type_id()) {
            return false;
        }

        let mut types = self.write_types();
        let TypeTable { by_id, by_path } = &mut *types;
        by_id.try_insert(message.type_id(), || {
            by_path.insert(message.type_path(), message.type_id());
            message
        })
    }

    /// Registers every type collected by the `auto_register` feature.
    ///
    /// Returns `true` if link-time collection works on this platform.
    /// Without the feature this does nothing and returns `false`.
    pub fn auto_register(&self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;

            if !self.contains(TypeId::of::<auto_register::__AvailFlag>()) {
                auto_register::__register_types(self);
            }
            self.contains(TypeId::of::<auto_register::__AvailFlag>())
        }

        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Whether a message type with the given id is registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.read_types().by_id.contains(&type_id)
    }

    #[inline]
    pub fn message_type(&self, type_id: TypeId) -> Option<MessageType> {
        self.read_types().by_id.get(&type_id).copied()
    }

    pub fn message_type_by_path(&self, type_path: &str) -> Option<MessageType> {
        let types = self.read_types();
        let type_id = types.by_path.get(type_path)?;
        types.by_id.get(type_id).copied()
    }

    /// The number of registered message types.
    #[inline]
    pub fn type_len(&self) -> usize {
        self.read_types().by_id.len()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::any::TypeId;
    use std::sync::Arc;
    use std::thread;

    use super::SchemaRegistry;
    use crate::info::{FieldInfo, MessageType};
    use crate::{Message, Schema, SchemaError, derive::Schema};
    use crate::value::Blank;

    #[derive(Schema)]
    struct Order {
        id: u64,
        items: Vec<Item>,
        note: Option<String>,
    }

    #[derive(Schema)]
    struct Item {
        sku: String,
        count: u32,
    }

    #[derive(Schema)]
    struct Broken {
        rows: Vec<Option<u8>>,
    }

    #[test]
    fn schemas_are_cached() {
        let registry = SchemaRegistry::new();
        assert!(!registry.is_cached(TypeId::of::<Order>()));

        let first = registry.get::<Order>().unwrap();
        let second = registry.get::<Order>().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(registry.is_cached(TypeId::of::<Order>()));
        assert_eq!(registry.schema_len(), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let registry = SchemaRegistry::new();

        let err = registry.get::<Broken>().unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedField { field: "rows", .. }));
        assert!(!registry.is_cached(TypeId::of::<Broken>()));
        assert!(registry.has_failed(TypeId::of::<Broken>()));
        assert!(registry.get::<Broken>().is_err());
        assert!(!registry.has_failed(TypeId::of::<Order>()));
    }

    #[derive(Schema)]
    struct Point {
        x: i32,
        y: i32,
    }

    fn only_y() -> Vec<FieldInfo> {
        vec![FieldInfo::new::<i32>("y").with_tag(7)]
    }

    fn blank_point() -> Box<dyn Message> {
        Box::new(Point::blank())
    }

    fn numbers(registry: &SchemaRegistry) -> Vec<(u32, &'static str)> {
        let schema = registry.get::<Point>().unwrap();
        let by_id = registry.get_by_id(TypeId::of::<Point>()).unwrap();
        assert!(Arc::ptr_eq(&schema, &by_id));
        schema.iter().map(|f| (f.number(), f.name())).collect()
    }

    #[test]
    fn first_registered_description_defines_layout() {
        // Registered before any lookup: every path derives from it.
        let registry = SchemaRegistry::new();
        let hand_written = MessageType::encode_only::<Point>(only_y).with_blank(blank_point);
        assert!(registry.register_type(hand_written));

        let by_id = registry.get_by_id(TypeId::of::<Point>()).unwrap();
        assert_eq!(numbers(&registry), [(7, "y")]);
        assert!(Arc::ptr_eq(&by_id, &registry.get::<Point>().unwrap()));

        // Same registration, typed lookup first.
        let registry = SchemaRegistry::new();
        registry.register_type(hand_written);
        let typed = registry.get::<Point>().unwrap();
        assert!(Arc::ptr_eq(&typed, &registry.get_by_id(TypeId::of::<Point>()).unwrap()));
        assert_eq!(numbers(&registry), [(7, "y")]);

        // Derived first: the later description is ignored.
        let registry = SchemaRegistry::new();
        registry.get::<Point>().unwrap();
        assert!(!registry.register_type(MessageType::encode_only::<Point>(only_y)));
        assert_eq!(numbers(&registry), [(1, "x"), (2, "y")]);
    }

    #[test]
    fn concurrent_derivations_agree() {
        let registry = SchemaRegistry::new();

        let schemas: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| registry.get::<Order>().unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for schema in &schemas[1..] {
            assert!(Arc::ptr_eq(&schemas[0], schema));
        }
        assert_eq!(registry.schema_len(), 1);
    }

    #[test]
    fn register_walks_dependencies() {
        let registry = SchemaRegistry::new();
        registry.register::<Order>();

        assert!(registry.contains(TypeId::of::<Order>()));
        assert!(registry.contains(TypeId::of::<Item>()));
        assert_eq!(registry.type_len(), 2);

        let item = registry.get_by_id(TypeId::of::<Item>()).unwrap();
        assert_eq!(item.field_len(), 2);
    }

    #[test]
    fn unknown_types_are_reported() {
        let registry = SchemaRegistry::new();

        assert!(matches!(
            registry.get_by_path("nowhere::Nothing"),
            Err(SchemaError::UnknownType(path)) if path == "nowhere::Nothing"
        ));
        assert!(matches!(
            registry.get_by_id(TypeId::of::<Item>()),
            Err(SchemaError::UnknownType(_))
        ));
    }

    #[test]
    fn register_type_keeps_first() {
        fn no_fields() -> Vec<FieldInfo> {
            Vec::new()
        }

        let registry = SchemaRegistry::new();
        assert!(registry.register_type(Item::message_type()));
        assert!(!registry.register_type(MessageType::encode_only::<Item>(no_fields)));

        let stored = registry.message_type(TypeId::of::<Item>()).unwrap();
        assert!(stored.is_instantiable());
    }
}
