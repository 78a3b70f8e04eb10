//! Built-in component data
//!
//! These are the engine-owned records the script boundary reads and writes.
//! Defaults match what an entity gets when a component is attached without
//! initial data.

use crate::define_component;
use crate::ecs::ComponentType;
use crate::handles::TextureHandle;
use glam::{UVec2, Vec2, Vec3, Vec4};

/// Human-readable entity name. Every entity is created with one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    pub tag: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteRenderer {
    pub colour: Vec4,
    pub texture: Option<TextureHandle>,
    pub tiling_factor: f32,
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        Self {
            colour: Vec4::ONE,
            texture: None,
            tiling_factor: 1.0,
        }
    }
}

/// Sprite-like renderer drawn as a (possibly hollow) circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleRenderer {
    pub colour: Vec4,
    pub texture: Option<TextureHandle>,
    pub tiling_factor: f32,
    pub radius: f32,
    pub thickness: f32,
    pub fade: f32,
}

impl Default for CircleRenderer {
    fn default() -> Self {
        Self {
            colour: Vec4::ONE,
            texture: None,
            tiling_factor: 1.0,
            radius: 0.5,
            thickness: 1.0,
            fade: 0.005,
        }
    }
}

/// Rigid body simulation mode. Discriminants are part of the boundary contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BodyType {
    #[default]
    Static = 0,
    Kinematic = 1,
    Dynamic = 2,
}

impl BodyType {
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(BodyType::Static),
            1 => Some(BodyType::Kinematic),
            2 => Some(BodyType::Dynamic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody2D {
    pub body_type: BodyType,
    pub fixed_rotation: bool,
    pub linear_velocity: Vec2,
    pub mass: f32,
    pub awake: bool,
}

impl Default for RigidBody2D {
    fn default() -> Self {
        Self {
            body_type: BodyType::Static,
            fixed_rotation: false,
            linear_velocity: Vec2::ZERO,
            mass: 1.0,
            awake: true,
        }
    }
}

impl RigidBody2D {
    /// Apply an impulse at the centre of mass. Only dynamic bodies respond.
    pub fn apply_impulse(&mut self, impulse: Vec2, wake: bool) {
        if self.body_type != BodyType::Dynamic {
            return;
        }
        if wake {
            self.awake = true;
        }
        if !self.awake || self.mass <= 0.0 {
            return;
        }
        self.linear_velocity += impulse / self.mass;
    }
}

/// Surface properties shared by every 2D collider shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderMaterial {
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    pub restitution_threshold: f32,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            density: 1.0,
            friction: 0.5,
            restitution: 0.0,
            restitution_threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider2D {
    pub offset: Vec2,
    /// Half extents.
    pub size: Vec2,
    pub material: ColliderMaterial,
}

impl Default for BoxCollider2D {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            size: Vec2::splat(0.5),
            material: ColliderMaterial::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleCollider2D {
    pub offset: Vec2,
    /// Only `x` is used as the radius; stored as a vector so both collider
    /// shapes answer the same size selector.
    pub radius: Vec2,
    pub material: ColliderMaterial,
}

impl Default for CircleCollider2D {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            radius: Vec2::splat(0.5),
            material: ColliderMaterial::default(),
        }
    }
}

/// Projection used by a camera. Discriminants are part of the boundary contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CameraType {
    #[default]
    Orthographic = 0,
    Orbit = 1,
}

impl CameraType {
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(CameraType::Orthographic),
            1 => Some(CameraType::Orbit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub primary: bool,
    pub camera_type: CameraType,
    pub viewport: UVec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            primary: true,
            camera_type: CameraType::Orthographic,
            viewport: UVec2::new(1280, 720),
        }
    }
}

define_component!(Tag, ComponentType::Tag);
define_component!(Transform, ComponentType::Transform);
define_component!(SpriteRenderer, ComponentType::SpriteRenderer);
define_component!(CircleRenderer, ComponentType::CircleRenderer);
define_component!(RigidBody2D, ComponentType::RigidBody2D);
define_component!(BoxCollider2D, ComponentType::BoxCollider2D);
define_component!(CircleCollider2D, ComponentType::CircleCollider2D);
define_component!(Camera, ComponentType::Camera);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_only_moves_dynamic_bodies() {
        let mut body = RigidBody2D::default();
        body.apply_impulse(Vec2::new(1.0, 0.0), true);
        assert_eq!(body.linear_velocity, Vec2::ZERO);

        body.body_type = BodyType::Dynamic;
        body.mass = 2.0;
        body.apply_impulse(Vec2::new(1.0, 0.0), true);
        assert_eq!(body.linear_velocity, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn sleeping_body_ignores_impulse_without_wake() {
        let mut body = RigidBody2D {
            body_type: BodyType::Dynamic,
            awake: false,
            ..Default::default()
        };
        body.apply_impulse(Vec2::ONE, false);
        assert_eq!(body.linear_velocity, Vec2::ZERO);
        assert!(!body.awake);

        body.apply_impulse(Vec2::ONE, true);
        assert!(body.awake);
        assert_eq!(body.linear_velocity, Vec2::ONE);
    }

    #[test]
    fn raw_enum_discriminants_are_stable() {
        assert_eq!(BodyType::from_raw(2), Some(BodyType::Dynamic));
        assert_eq!(BodyType::from_raw(3), None);
        assert_eq!(CameraType::from_raw(1), Some(CameraType::Orbit));
        assert_eq!(CameraType::Orbit as u8, 1);
    }
}
