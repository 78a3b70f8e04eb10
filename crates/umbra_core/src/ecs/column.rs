// column.rs - Per-component sparse storage keyed by entity slot index

use crate::ecs::Component;
use std::any::Any;
use std::collections::HashMap;

/// Type-erased view over one component column.
///
/// The world only knows component descriptors at the boundary, so add/remove/has
/// go through this trait; typed access downcasts to `Column<T>`.
pub(crate) trait ErasedColumn: Send + Sync {
    fn contains(&self, index: u32) -> bool;
    fn insert_default(&mut self, index: u32);
    fn remove(&mut self, index: u32) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

pub(crate) struct Column<T: Component> {
    rows: HashMap<u32, T>,
}

impl<T: Component> Column<T> {
    pub(crate) fn new() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }

    pub(crate) fn get(&self, index: u32) -> Option<&T> {
        self.rows.get(&index)
    }

    pub(crate) fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        self.rows.get_mut(&index)
    }

    pub(crate) fn insert(&mut self, index: u32, value: T) {
        self.rows.insert(index, value);
    }
}

impl<T: Component> ErasedColumn for Column<T> {
    fn contains(&self, index: u32) -> bool {
        self.rows.contains_key(&index)
    }

    fn insert_default(&mut self, index: u32) {
        self.rows.insert(index, T::default());
    }

    fn remove(&mut self, index: u32) -> bool {
        self.rows.remove(&index).is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
