//! Component proxies
//!
//! A proxy is bound to one entity and one component kind and owns no data:
//! every getter and setter is a single call across the boundary. Nothing is
//! cached, so two proxies for the same component always agree.
//!
//! Getters return `CallResult` because the component can disappear under a
//! proxy at any time; a read on a detached component or a destroyed entity
//! is an error, never a stale value.

use crate::entity::ScriptEntity;
use crate::error::CallResult;
use crate::fields::{
    CircleRendererField, ColliderKind, ColliderScalarField, ColliderVec2Field, RendererKind,
    TransformField,
};
use crate::resources::Texture2D;
use glam::{UVec2, Vec2, Vec3, Vec4};
use umbra_core::components::{self as data, BodyType, CameraType};
use umbra_core::ecs::{Component, ComponentType};

mod sealed {
    pub trait Sealed {}
}

/// Compile-time mapping from a proxy type to the engine's component
/// descriptor. Only the proxies in this module implement it, so generic
/// add/get/has/remove cannot be instantiated with an unsupported kind.
pub trait ComponentProxy: sealed::Sealed + Sized {
    const TYPE: ComponentType;

    fn bind(entity: ScriptEntity) -> Self;

    fn entity(&self) -> &ScriptEntity;
}

macro_rules! proxies {
    ($($(#[$meta:meta])* $name:ident => $data:ty;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone)]
            pub struct $name {
                entity: ScriptEntity,
            }

            impl sealed::Sealed for $name {}

            impl ComponentProxy for $name {
                const TYPE: ComponentType = <$data as Component>::TYPE;

                fn bind(entity: ScriptEntity) -> Self {
                    Self { entity }
                }

                fn entity(&self) -> &ScriptEntity {
                    &self.entity
                }
            }
        )*
    };
}

proxies! {
    Tag => data::Tag;
    Transform => data::Transform;
    SpriteRenderer => data::SpriteRenderer;
    CircleRenderer => data::CircleRenderer;
    RigidBody2D => data::RigidBody2D;
    BoxCollider2D => data::BoxCollider2D;
    CircleCollider2D => data::CircleCollider2D;
    Camera => data::Camera;
}

impl Tag {
    pub fn tag(&self) -> CallResult<String> {
        self.entity.engine().tag(self.entity.id())
    }

    pub fn set_tag(&self, tag: &str) -> CallResult<()> {
        self.entity.engine().set_tag(self.entity.id(), tag)
    }
}

impl Transform {
    fn get(&self, field: TransformField) -> CallResult<Vec3> {
        self.entity.engine().transform(self.entity.id(), field)
    }

    fn set(&self, field: TransformField, value: Vec3) -> CallResult<()> {
        self.entity.engine().set_transform(self.entity.id(), field, value)
    }

    pub fn position(&self) -> CallResult<Vec3> {
        self.get(TransformField::Translation)
    }

    pub fn set_position(&self, position: Vec3) -> CallResult<()> {
        self.set(TransformField::Translation, position)
    }

    /// Euler angles in radians.
    pub fn rotation(&self) -> CallResult<Vec3> {
        self.get(TransformField::Rotation)
    }

    pub fn set_rotation(&self, rotation: Vec3) -> CallResult<()> {
        self.set(TransformField::Rotation, rotation)
    }

    pub fn scale(&self) -> CallResult<Vec3> {
        self.get(TransformField::Scale)
    }

    pub fn set_scale(&self, scale: Vec3) -> CallResult<()> {
        self.set(TransformField::Scale, scale)
    }
}

macro_rules! renderer_accessors {
    ($kind:expr) => {
        pub fn colour(&self) -> CallResult<Vec4> {
            self.entity.engine().renderer_colour(self.entity.id(), $kind)
        }

        pub fn set_colour(&self, colour: Vec4) -> CallResult<()> {
            self.entity
                .engine()
                .set_renderer_colour(self.entity.id(), $kind, colour)
        }

        /// The attached texture as a new owning wrapper.
        pub fn texture(&self) -> CallResult<Option<Texture2D>> {
            let engine = self.entity.engine();
            match engine.renderer_texture(self.entity.id(), $kind)? {
                Some(handle) => Texture2D::retain(engine, handle).map(Some),
                None => Ok(None),
            }
        }

        pub fn set_texture(&self, texture: &Texture2D) -> CallResult<()> {
            self.entity
                .engine()
                .set_renderer_texture(self.entity.id(), $kind, Some(texture.handle()))
        }

        pub fn clear_texture(&self) -> CallResult<()> {
            self.entity
                .engine()
                .set_renderer_texture(self.entity.id(), $kind, None)
        }

        pub fn tiling_factor(&self) -> CallResult<f32> {
            self.entity
                .engine()
                .renderer_tiling_factor(self.entity.id(), $kind)
        }

        pub fn set_tiling_factor(&self, factor: f32) -> CallResult<()> {
            self.entity
                .engine()
                .set_renderer_tiling_factor(self.entity.id(), $kind, factor)
        }
    };
}

impl SpriteRenderer {
    renderer_accessors!(RendererKind::Sprite);
}

impl CircleRenderer {
    renderer_accessors!(RendererKind::Circle);

    pub fn field(&self, field: CircleRendererField) -> CallResult<f32> {
        self.entity.engine().circle_renderer(self.entity.id(), field)
    }

    pub fn set_field(&self, field: CircleRendererField, value: f32) -> CallResult<()> {
        self.entity
            .engine()
            .set_circle_renderer(self.entity.id(), field, value)
    }

    pub fn radius(&self) -> CallResult<f32> {
        self.field(CircleRendererField::Radius)
    }

    pub fn set_radius(&self, radius: f32) -> CallResult<()> {
        self.set_field(CircleRendererField::Radius, radius)
    }

    pub fn thickness(&self) -> CallResult<f32> {
        self.field(CircleRendererField::Thickness)
    }

    pub fn set_thickness(&self, thickness: f32) -> CallResult<()> {
        self.set_field(CircleRendererField::Thickness, thickness)
    }

    pub fn fade(&self) -> CallResult<f32> {
        self.field(CircleRendererField::Fade)
    }

    pub fn set_fade(&self, fade: f32) -> CallResult<()> {
        self.set_field(CircleRendererField::Fade, fade)
    }
}

impl RigidBody2D {
    pub fn body_type(&self) -> CallResult<BodyType> {
        self.entity.engine().body_type(self.entity.id())
    }

    pub fn set_body_type(&self, body_type: BodyType) -> CallResult<()> {
        self.entity.engine().set_body_type(self.entity.id(), body_type)
    }

    pub fn fixed_rotation(&self) -> CallResult<bool> {
        self.entity.engine().fixed_rotation(self.entity.id())
    }

    pub fn set_fixed_rotation(&self, fixed: bool) -> CallResult<()> {
        self.entity.engine().set_fixed_rotation(self.entity.id(), fixed)
    }

    pub fn linear_velocity(&self) -> CallResult<Vec2> {
        self.entity.engine().linear_velocity(self.entity.id())
    }

    pub fn set_linear_velocity(&self, velocity: Vec2) -> CallResult<()> {
        self.entity
            .engine()
            .set_linear_velocity(self.entity.id(), velocity)
    }

    pub fn apply_linear_impulse(&self, impulse: Vec2, point: Vec2, wake: bool) -> CallResult<()> {
        self.entity
            .engine()
            .apply_linear_impulse(self.entity.id(), impulse, point, wake)
    }

    pub fn apply_linear_impulse_to_center(&self, impulse: Vec2, wake: bool) -> CallResult<()> {
        self.entity
            .engine()
            .apply_linear_impulse_to_center(self.entity.id(), impulse, wake)
    }
}

macro_rules! collider_accessors {
    ($kind:expr) => {
        pub fn offset(&self) -> CallResult<Vec2> {
            self.vec2(ColliderVec2Field::Offset)
        }

        pub fn set_offset(&self, offset: Vec2) -> CallResult<()> {
            self.set_vec2(ColliderVec2Field::Offset, offset)
        }

        pub fn density(&self) -> CallResult<f32> {
            self.scalar(ColliderScalarField::Density)
        }

        pub fn set_density(&self, density: f32) -> CallResult<()> {
            self.set_scalar(ColliderScalarField::Density, density)
        }

        pub fn friction(&self) -> CallResult<f32> {
            self.scalar(ColliderScalarField::Friction)
        }

        pub fn set_friction(&self, friction: f32) -> CallResult<()> {
            self.set_scalar(ColliderScalarField::Friction, friction)
        }

        pub fn restitution(&self) -> CallResult<f32> {
            self.scalar(ColliderScalarField::Restitution)
        }

        pub fn set_restitution(&self, restitution: f32) -> CallResult<()> {
            self.set_scalar(ColliderScalarField::Restitution, restitution)
        }

        pub fn restitution_threshold(&self) -> CallResult<f32> {
            self.scalar(ColliderScalarField::RestitutionThreshold)
        }

        pub fn set_restitution_threshold(&self, threshold: f32) -> CallResult<()> {
            self.set_scalar(ColliderScalarField::RestitutionThreshold, threshold)
        }

        pub fn vec2(&self, field: ColliderVec2Field) -> CallResult<Vec2> {
            self.entity
                .engine()
                .collider_vec2(self.entity.id(), $kind, field)
        }

        pub fn set_vec2(&self, field: ColliderVec2Field, value: Vec2) -> CallResult<()> {
            self.entity
                .engine()
                .set_collider_vec2(self.entity.id(), $kind, field, value)
        }

        pub fn scalar(&self, field: ColliderScalarField) -> CallResult<f32> {
            self.entity
                .engine()
                .collider_scalar(self.entity.id(), $kind, field)
        }

        pub fn set_scalar(&self, field: ColliderScalarField, value: f32) -> CallResult<()> {
            self.entity
                .engine()
                .set_collider_scalar(self.entity.id(), $kind, field, value)
        }

        /// Read a scalar by its engine name, e.g. `"restitutionThreshold"`.
        pub fn scalar_by_name(&self, name: &str) -> CallResult<f32> {
            self.scalar(name.parse()?)
        }

        pub fn set_scalar_by_name(&self, name: &str, value: f32) -> CallResult<()> {
            self.set_scalar(name.parse()?, value)
        }
    };
}

impl BoxCollider2D {
    collider_accessors!(ColliderKind::Box);

    /// Half extents.
    pub fn size(&self) -> CallResult<Vec2> {
        self.vec2(ColliderVec2Field::Size)
    }

    pub fn set_size(&self, size: Vec2) -> CallResult<()> {
        self.set_vec2(ColliderVec2Field::Size, size)
    }
}

impl CircleCollider2D {
    collider_accessors!(ColliderKind::Circle);

    pub fn radius(&self) -> CallResult<f32> {
        Ok(self.vec2(ColliderVec2Field::Size)?.x)
    }

    pub fn set_radius(&self, radius: f32) -> CallResult<()> {
        self.set_vec2(ColliderVec2Field::Size, Vec2::splat(radius))
    }
}

impl Camera {
    pub fn is_primary(&self) -> CallResult<bool> {
        self.entity.engine().camera_primary(self.entity.id())
    }

    pub fn set_primary(&self, primary: bool) -> CallResult<()> {
        self.entity.engine().set_camera_primary(self.entity.id(), primary)
    }

    pub fn camera_type(&self) -> CallResult<CameraType> {
        self.entity.engine().camera_type(self.entity.id())
    }

    pub fn set_camera_type(&self, camera_type: CameraType) -> CallResult<()> {
        self.entity
            .engine()
            .set_camera_type(self.entity.id(), camera_type)
    }

    pub fn viewport(&self) -> CallResult<UVec2> {
        self.entity.engine().camera_viewport(self.entity.id())
    }

    pub fn set_viewport(&self, width: u32, height: u32) -> CallResult<()> {
        self.entity
            .engine()
            .set_camera_viewport(self.entity.id(), UVec2::new(width, height))
    }
}
