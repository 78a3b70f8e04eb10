// component.rs - Closed component-type registry
//
// Components are identified by a stable descriptor, not Rust TypeIds.
// Scripts and the engine are compiled independently, so the descriptor is the
// only type identity both sides share. Each descriptor has a numeric id and a
// stable name that scripts can key by.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

pub type ComponentId = u32;

/// Runtime descriptor of one component kind known to the engine registry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentType {
    Tag,
    Transform,
    SpriteRenderer,
    CircleRenderer,
    RigidBody2D,
    BoxCollider2D,
    CircleCollider2D,
    Camera,
}

impl ComponentType {
    /// Every descriptor the engine understands, in id order.
    pub const ALL: [ComponentType; 8] = [
        ComponentType::Tag,
        ComponentType::Transform,
        ComponentType::SpriteRenderer,
        ComponentType::CircleRenderer,
        ComponentType::RigidBody2D,
        ComponentType::BoxCollider2D,
        ComponentType::CircleCollider2D,
        ComponentType::Camera,
    ];

    pub const fn id(self) -> ComponentId {
        match self {
            ComponentType::Tag => 1,
            ComponentType::Transform => 2,
            ComponentType::SpriteRenderer => 3,
            ComponentType::CircleRenderer => 4,
            ComponentType::RigidBody2D => 5,
            ComponentType::BoxCollider2D => 6,
            ComponentType::CircleCollider2D => 7,
            ComponentType::Camera => 8,
        }
    }

    /// Stable name used as the cross-boundary key.
    pub const fn name(self) -> &'static str {
        match self {
            ComponentType::Tag => "Tag",
            ComponentType::Transform => "Transform",
            ComponentType::SpriteRenderer => "SpriteRenderer",
            ComponentType::CircleRenderer => "CircleRenderer",
            ComponentType::RigidBody2D => "RigidBody2D",
            ComponentType::BoxCollider2D => "BoxCollider2D",
            ComponentType::CircleCollider2D => "CircleCollider2D",
            ComponentType::Camera => "Camera",
        }
    }

    /// Look up a descriptor by its stable name.
    pub fn from_name(name: &str) -> Option<Self> {
        BY_NAME.get(name).copied()
    }

    /// Look up a descriptor by numeric id.
    pub fn from_id(id: ComponentId) -> Option<Self> {
        Self::ALL.iter().copied().find(|ty| ty.id() == id)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static BY_NAME: Lazy<HashMap<&'static str, ComponentType>> = Lazy::new(|| {
    ComponentType::ALL
        .iter()
        .map(|&ty| (ty.name(), ty))
        .collect()
});

/// Trait for Rust-defined components stored in the `World`.
///
/// `Default` supplies the value a component starts with when it is attached
/// by descriptor alone (the script boundary never sends initial data).
pub trait Component: 'static + Default + Send + Sync {
    /// Descriptor this type is registered under.
    const TYPE: ComponentType;
}

/// Helper macro to implement the `Component` trait.
///
/// # Example
/// ```ignore
/// #[derive(Default)]
/// struct Transform { /* ... */ }
///
/// define_component!(Transform, ComponentType::Transform);
/// ```
#[macro_export]
macro_rules! define_component {
    ($ty:ty, $kind:expr) => {
        impl $crate::ecs::Component for $ty {
            const TYPE: $crate::ecs::ComponentType = $kind;
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_ids_are_unique() {
        for (i, a) in ComponentType::ALL.iter().enumerate() {
            for b in &ComponentType::ALL[i + 1..] {
                assert_ne!(a.id(), b.id());
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn lookup_is_total_over_registered_types() {
        for ty in ComponentType::ALL {
            assert_eq!(ComponentType::from_name(ty.name()), Some(ty));
            assert_eq!(ComponentType::from_id(ty.id()), Some(ty));
        }
        assert_eq!(ComponentType::from_name("NativeScript"), None);
        assert_eq!(ComponentType::from_id(0), None);
    }
}
