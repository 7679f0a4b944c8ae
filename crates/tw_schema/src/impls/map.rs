use core::hash::{BuildHasher, Hash};
use std::collections::{BTreeMap, HashMap};

use crate::ops::Map;
use crate::registry::SchemaRegistry;
use crate::{Blank, Typed, Value, ValueKind, ValueMut, ValueRef};

macro_rules! impl_map {
    ([$($generics:tt)*] $ty:ty, $blank:expr) => {
        impl<$($generics)*> Value for $ty {
            #[inline]
            fn value_ref(&self) -> ValueRef<'_> {
                ValueRef::Map(self)
            }

            #[inline]
            fn value_mut(&mut self) -> ValueMut<'_> {
                ValueMut::Map(self)
            }

            crate::impls::impl_value_casts!();
        }

        impl<$($generics)*> Map for $ty {
            #[inline]
            fn len(&self) -> usize {
                <$ty>::len(self)
            }

            fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Value, &dyn Value)> + '_> {
                Box::new(
                    self.iter()
                        .map(|(key, value)| (key as &dyn Value, value as &dyn Value)),
                )
            }

            #[inline]
            fn blank_key(&self) -> Box<dyn Value> {
                Box::new(K::blank())
            }

            #[inline]
            fn blank_value(&self) -> Box<dyn Value> {
                Box::new(V::blank())
            }

            fn insert_boxed(&mut self, key: Box<dyn Value>, value: Box<dyn Value>) -> bool {
                let (Ok(key), Ok(value)) = (
                    key.into_any().downcast::<K>(),
                    value.into_any().downcast::<V>(),
                ) else {
                    return false;
                };
                self.insert(*key, *value);
                true
            }
        }

        impl<$($generics)*> Typed for $ty {
            #[inline]
            fn kind() -> ValueKind {
                ValueKind::Map(Box::new(K::kind()), Box::new(V::kind()))
            }

            fn register_into(registry: &SchemaRegistry) {
                K::register_into(registry);
                V::register_into(registry);
            }
        }

        impl<$($generics)*> Blank for $ty {
            #[inline]
            fn blank() -> Self {
                $blank
            }
        }
    };
}

impl_map!(
    [K: Typed + Blank + Ord, V: Typed + Blank]
    BTreeMap<K, V>,
    BTreeMap::new()
);

impl_map!(
    [K: Typed + Blank + Eq + Hash, V: Typed + Blank, S: BuildHasher + Default + Send + Sync + 'static]
    HashMap<K, V, S>,
    HashMap::with_hasher(S::default())
);

impl_map!(
    [K: Typed + Blank + Eq + Hash, V: Typed + Blank, S: BuildHasher + Default + Send + Sync + 'static]
    tw_utils::hash::hashbrown::HashMap<K, V, S>,
    tw_utils::hash::hashbrown::HashMap::with_hasher(S::default())
);
