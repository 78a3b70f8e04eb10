//! Reference-counted resource registry
//!
//! Each live resource has a handle and a reference count. A handle value is
//! never reissued, so a released handle stays unknown forever.

use crate::AssetError;
use std::collections::HashMap;
use std::marker::PhantomData;
use umbra_core::handles::{ShaderHandle, TextureHandle};

/// Typed handle wrapper over a raw registry id.
pub trait ResourceHandle: Copy {
    fn from_raw(raw: u64) -> Self;
    fn raw(self) -> u64;
}

impl ResourceHandle for TextureHandle {
    fn from_raw(raw: u64) -> Self {
        TextureHandle(raw)
    }

    fn raw(self) -> u64 {
        self.0
    }
}

impl ResourceHandle for ShaderHandle {
    fn from_raw(raw: u64) -> Self {
        ShaderHandle(raw)
    }

    fn raw(self) -> u64 {
        self.0
    }
}

struct Entry<T> {
    resource: T,
    refs: u32,
}

pub struct ResourceRegistry<H, T> {
    next_id: u64,
    entries: HashMap<u64, Entry<T>>,
    _handle: PhantomData<H>,
}

impl<H: ResourceHandle, T> ResourceRegistry<H, T> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            entries: HashMap::new(),
            _handle: PhantomData,
        }
    }

    /// Store a resource with one reference held by the caller.
    pub fn insert(&mut self, resource: T) -> H {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, Entry { resource, refs: 1 });
        H::from_raw(id)
    }

    pub fn get(&self, handle: H) -> Option<&T> {
        self.entries.get(&handle.raw()).map(|entry| &entry.resource)
    }

    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.entries
            .get_mut(&handle.raw())
            .map(|entry| &mut entry.resource)
    }

    pub fn contains(&self, handle: H) -> bool {
        self.entries.contains_key(&handle.raw())
    }

    /// Add a reference. Returns the new count.
    pub fn retain(&mut self, handle: H) -> Result<u32, AssetError> {
        let entry = self
            .entries
            .get_mut(&handle.raw())
            .ok_or(AssetError::UnknownHandle(handle.raw()))?;
        entry.refs += 1;
        Ok(entry.refs)
    }

    /// Drop a reference. Returns the resource once the last one is gone.
    pub fn release(&mut self, handle: H) -> Result<Option<T>, AssetError> {
        let entry = self
            .entries
            .get_mut(&handle.raw())
            .ok_or(AssetError::UnknownHandle(handle.raw()))?;
        entry.refs -= 1;
        if entry.refs > 0 {
            return Ok(None);
        }
        Ok(self.entries.remove(&handle.raw()).map(|entry| entry.resource))
    }

    pub fn ref_count(&self, handle: H) -> Option<u32> {
        self.entries.get(&handle.raw()).map(|entry| entry.refs)
    }

    /// Number of live resources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H: ResourceHandle, T> Default for ResourceRegistry<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_frees_after_last_reference() {
        let mut registry: ResourceRegistry<TextureHandle, &str> = ResourceRegistry::new();
        let handle = registry.insert("brick");
        assert_eq!(registry.retain(handle).unwrap(), 2);

        assert!(registry.release(handle).unwrap().is_none());
        assert_eq!(registry.ref_count(handle), Some(1));
        assert_eq!(registry.release(handle).unwrap(), Some("brick"));
        assert!(registry.is_empty());
    }

    #[test]
    fn handles_are_not_reissued() {
        let mut registry: ResourceRegistry<ShaderHandle, u8> = ResourceRegistry::new();
        let first = registry.insert(1);
        registry.release(first).unwrap();
        let second = registry.insert(2);
        assert_ne!(first, second);
        assert!(matches!(
            registry.release(first),
            Err(AssetError::UnknownHandle(id)) if id == first.0
        ));
    }
}
