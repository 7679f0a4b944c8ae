//! Items used by code generated from `#[derive(Schema)]`. Not public API.

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::Schema;
    use crate::registry::SchemaRegistry;

    /// One link-time registration entry.
    pub struct __AutoRegisterFunc(pub fn(&SchemaRegistry));

    inventory::collect!(__AutoRegisterFunc);

    pub trait __RegisterType {
        fn __register(registry: &SchemaRegistry);
    }

    impl<T: Schema> __RegisterType for T {
        #[inline]
        fn __register(registry: &SchemaRegistry) {
            registry.register::<T>();
        }
    }

    /// Registered through `inventory` itself, so its presence in a registry
    /// shows that link-time collection works on this platform.
    #[derive(crate::derive::Schema)]
    pub struct __AvailFlag;

    inventory::submit! {
        __AutoRegisterFunc(<__AvailFlag as __RegisterType>::__register)
    }

    pub fn __register_types(registry: &SchemaRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
