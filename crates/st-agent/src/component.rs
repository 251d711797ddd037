//! Opaque per-agent sub-components.
//!
//! Collaborator state the core never interprets (science, population models,
//! demo-specific bookkeeping) is stored as one column per Rust type, indexed
//! by `AgentId`.  Columns are created before the store is built and are
//! always exactly `AgentStore::len()` long.
//!
//! ```rust
//! use st_agent::ComponentMap;
//!
//! #[derive(Default)]
//! struct Research { points: f64 }
//!
//! let mut map = ComponentMap::new();
//! map.register::<Research>(3);
//! assert_eq!(map.get::<Research>().map(|c| c.len()), Some(3));
//! ```

use std::any::{Any, TypeId, type_name};

use rustc_hash::FxHashMap;

/// Object-safe view of one component column.
trait Column: Send + Sync + 'static {
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Default + Send + Sync + 'static> Column for Vec<T> {
    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Type-keyed registry of component columns.
#[derive(Default)]
pub struct ComponentMap {
    columns: FxHashMap<TypeId, Box<dyn Column>>,
}

impl ComponentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column for `T` with `len` default values.  Re-registering an
    /// existing type leaves its data alone.
    pub fn register<T: Default + Send + Sync + 'static>(&mut self, len: usize) {
        self.columns
            .entry(TypeId::of::<T>())
            .or_insert_with(|| -> Box<dyn Column> {
                Box::new((0..len).map(|_| T::default()).collect::<Vec<T>>())
            });
    }

    pub fn get<T: Default + Send + Sync + 'static>(&self) -> Option<&[T]> {
        self.columns
            .get(&TypeId::of::<T>())
            .and_then(|c| c.as_any().downcast_ref::<Vec<T>>())
            .map(Vec::as_slice)
    }

    /// Mutable slice of column `T`.  The length is fixed; only values change.
    pub fn get_mut<T: Default + Send + Sync + 'static>(&mut self) -> Option<&mut [T]> {
        self.columns
            .get_mut(&TypeId::of::<T>())
            .and_then(|c| c.as_any_mut().downcast_mut::<Vec<T>>())
            .map(Vec::as_mut_slice)
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.columns.contains_key(&TypeId::of::<T>())
    }

    pub fn type_count(&self) -> usize {
        self.columns.len()
    }
}

impl std::fmt::Debug for ComponentMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.columns.values().map(|c| c.type_name()).collect();
        names.sort_unstable();
        f.debug_struct("ComponentMap").field("columns", &names).finish()
    }
}
