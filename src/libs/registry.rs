// registry.rs
//
// Process-wide memoization of resolved entity descriptors.

use std::any::TypeId;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::declaration::EntityDeclaration;
use crate::error::SchemaResult;
use crate::schema::EntityDescriptor;

/// A type that declares a table. Usually implemented by `#[entity]`.
pub trait Entity: 'static {
    fn declaration() -> EntityDeclaration;

    /// Resolved descriptor, memoized in the global registry.
    fn describe() -> SchemaResult<Arc<EntityDescriptor>>
    where
        Self: Sized,
    {
        SchemaRegistry::global().describe::<Self>()
    }
}

/// Type-erased handle on an [`Entity`], used to keep mixed entity lists.
#[derive(Clone, Copy)]
pub struct EntityRef {
    type_id: TypeId,
    declare: fn() -> EntityDeclaration,
}

impl EntityRef {
    pub fn of<T: Entity>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            declare: T::declaration,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}

impl std::fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRef")
            .field("type_id", &self.type_id)
            .finish_non_exhaustive()
    }
}

/// Read-through cache of descriptors keyed by entity type.
///
/// Failed resolutions are not cached. Two threads resolving the same entity
/// for the first time may both build it; only one value is kept.
#[derive(Default)]
pub struct SchemaRegistry {
    cache: DashMap<TypeId, Arc<EntityDescriptor>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global() -> &'static Arc<SchemaRegistry> {
        static GLOBAL: OnceLock<Arc<SchemaRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(SchemaRegistry::new()))
    }

    pub fn describe<T: Entity>(&self) -> SchemaResult<Arc<EntityDescriptor>> {
        self.describe_ref(EntityRef::of::<T>())
    }

    pub fn describe_ref(&self, entity: EntityRef) -> SchemaResult<Arc<EntityDescriptor>> {
        if let Some(hit) = self.cache.get(&entity.type_id) {
            return Ok(Arc::clone(hit.value()));
        }

        let descriptor = Arc::new(EntityDescriptor::from_declaration(&(entity.declare)())?);
        let stored = self
            .cache
            .entry(entity.type_id)
            .or_insert(descriptor)
            .value()
            .clone();
        Ok(stored)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::ColumnDeclaration;
    use crate::error::SchemaError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    struct Counted;

    impl Entity for Counted {
        fn declaration() -> EntityDeclaration {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            EntityDeclaration::new("Counted")
                .table_name("counted")
                .column(ColumnDeclaration::new("id", "int").identity())
        }
    }

    struct Untabled;

    impl Entity for Untabled {
        fn declaration() -> EntityDeclaration {
            EntityDeclaration::new("Untabled").column(ColumnDeclaration::new("id", "int"))
        }
    }

    #[test]
    fn resolves_once_per_type() {
        let registry = SchemaRegistry::new();
        let first = registry.describe::<Counted>().unwrap();
        let second = registry.describe::<Counted>().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let registry = SchemaRegistry::new();
        for _ in 0..2 {
            assert!(matches!(
                registry.describe::<Untabled>(),
                Err(SchemaError::MissingTableMetadata { .. })
            ));
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn concurrent_lookups_share_one_descriptor() {
        let registry = Arc::new(SchemaRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.describe_ref(EntityRef::of::<Untabled>()).is_err())
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap());
        }

        struct Shared;
        impl Entity for Shared {
            fn declaration() -> EntityDeclaration {
                EntityDeclaration::new("Shared")
                    .table_name("shared")
                    .column(ColumnDeclaration::new("id", "int"))
            }
        }

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.describe::<Shared>().unwrap())
            })
            .collect();
        let descriptors: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(descriptors.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
