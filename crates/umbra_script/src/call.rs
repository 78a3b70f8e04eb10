//! The engine call surface
//!
//! Everything a script may ask of the engine goes through [`CallSurface`].
//! Arguments and results are plain values: entity and resource handles, math
//! types, strings and selector enums. No engine reference crosses the
//! boundary, and every call either succeeds or fails without side effects.
//!
//! Implementations are shared between script threads, so every method takes
//! `&self` and the implementation serialises access internally.

use crate::error::CallResult;
use crate::fields::{
    CircleRendererField, ColliderKind, ColliderScalarField, ColliderVec2Field, LogLevel,
    RendererKind, TransformField,
};
use crate::handle::EntityHandle;
use glam::{UVec2, Vec2, Vec3, Vec4};
use std::sync::Arc;
use umbra_asset::UniformValue;
use umbra_core::components::{BodyType, CameraType};
use umbra_core::ecs::ComponentType;
use umbra_core::handles::{ShaderHandle, TextureHandle};
use umbra_services::KeyCode;

/// Shared handle to the engine as seen from scripts.
pub type Engine = Arc<dyn CallSurface>;

pub trait CallSurface: Send + Sync {
    // Entity lifecycle

    fn entity_exists(&self, entity: EntityHandle) -> bool;
    /// Create an entity carrying a `Tag` named `name` and a default `Transform`.
    fn create_entity(&self, name: &str) -> EntityHandle;
    fn destroy_entity(&self, entity: EntityHandle) -> CallResult<()>;
    /// First live entity whose tag equals `name`, or [`EntityHandle::INVALID`].
    fn find_entity_by_name(&self, name: &str) -> EntityHandle;
    /// The camera entity marked primary, or [`EntityHandle::INVALID`].
    fn primary_camera_entity(&self) -> EntityHandle;

    // Component presence

    fn has_component(&self, entity: EntityHandle, component: ComponentType) -> CallResult<bool>;
    /// Attach a default-initialised component. Fails on duplicates.
    fn add_component(&self, entity: EntityHandle, component: ComponentType) -> CallResult<()>;
    /// Detach a component. `Ok(false)` when it was not attached.
    fn remove_component(&self, entity: EntityHandle, component: ComponentType)
        -> CallResult<bool>;

    // Tag

    fn tag(&self, entity: EntityHandle) -> CallResult<String>;
    fn set_tag(&self, entity: EntityHandle, tag: &str) -> CallResult<()>;

    // Transform

    fn transform(&self, entity: EntityHandle, field: TransformField) -> CallResult<Vec3>;
    fn set_transform(&self, entity: EntityHandle, field: TransformField, value: Vec3)
        -> CallResult<()>;

    // Sprite and circle renderers

    fn renderer_colour(&self, entity: EntityHandle, kind: RendererKind) -> CallResult<Vec4>;
    fn set_renderer_colour(&self, entity: EntityHandle, kind: RendererKind, colour: Vec4)
        -> CallResult<()>;
    /// The attached texture, if any. The returned handle is not retained.
    fn renderer_texture(
        &self,
        entity: EntityHandle,
        kind: RendererKind,
    ) -> CallResult<Option<TextureHandle>>;
    /// Attach or clear the renderer's texture. The renderer holds its own
    /// reference to the new texture and gives up the old one.
    fn set_renderer_texture(
        &self,
        entity: EntityHandle,
        kind: RendererKind,
        texture: Option<TextureHandle>,
    ) -> CallResult<()>;
    fn renderer_tiling_factor(&self, entity: EntityHandle, kind: RendererKind) -> CallResult<f32>;
    fn set_renderer_tiling_factor(
        &self,
        entity: EntityHandle,
        kind: RendererKind,
        factor: f32,
    ) -> CallResult<()>;
    fn circle_renderer(&self, entity: EntityHandle, field: CircleRendererField)
        -> CallResult<f32>;
    fn set_circle_renderer(
        &self,
        entity: EntityHandle,
        field: CircleRendererField,
        value: f32,
    ) -> CallResult<()>;

    // Rigid body

    fn body_type(&self, entity: EntityHandle) -> CallResult<BodyType>;
    fn set_body_type(&self, entity: EntityHandle, body_type: BodyType) -> CallResult<()>;
    fn fixed_rotation(&self, entity: EntityHandle) -> CallResult<bool>;
    fn set_fixed_rotation(&self, entity: EntityHandle, fixed: bool) -> CallResult<()>;
    fn linear_velocity(&self, entity: EntityHandle) -> CallResult<Vec2>;
    fn set_linear_velocity(&self, entity: EntityHandle, velocity: Vec2) -> CallResult<()>;
    /// Apply an impulse at a world point. Static and kinematic bodies ignore it.
    fn apply_linear_impulse(
        &self,
        entity: EntityHandle,
        impulse: Vec2,
        point: Vec2,
        wake: bool,
    ) -> CallResult<()>;
    fn apply_linear_impulse_to_center(
        &self,
        entity: EntityHandle,
        impulse: Vec2,
        wake: bool,
    ) -> CallResult<()>;

    // Colliders

    fn collider_vec2(
        &self,
        entity: EntityHandle,
        kind: ColliderKind,
        field: ColliderVec2Field,
    ) -> CallResult<Vec2>;
    fn set_collider_vec2(
        &self,
        entity: EntityHandle,
        kind: ColliderKind,
        field: ColliderVec2Field,
        value: Vec2,
    ) -> CallResult<()>;
    fn collider_scalar(
        &self,
        entity: EntityHandle,
        kind: ColliderKind,
        field: ColliderScalarField,
    ) -> CallResult<f32>;
    fn set_collider_scalar(
        &self,
        entity: EntityHandle,
        kind: ColliderKind,
        field: ColliderScalarField,
        value: f32,
    ) -> CallResult<()>;

    // Camera

    fn camera_primary(&self, entity: EntityHandle) -> CallResult<bool>;
    fn set_camera_primary(&self, entity: EntityHandle, primary: bool) -> CallResult<()>;
    fn camera_type(&self, entity: EntityHandle) -> CallResult<CameraType>;
    fn set_camera_type(&self, entity: EntityHandle, camera_type: CameraType) -> CallResult<()>;
    fn camera_viewport(&self, entity: EntityHandle) -> CallResult<UVec2>;
    fn set_camera_viewport(&self, entity: EntityHandle, size: UVec2) -> CallResult<()>;

    // Input

    fn is_key_down(&self, key: KeyCode) -> bool;

    // Textures. Each create/retain hands the caller one reference to give
    // back through `texture_destroy`.

    fn texture_create(&self, path: &str) -> CallResult<TextureHandle>;
    fn texture_retain(&self, texture: TextureHandle) -> CallResult<()>;
    fn texture_destroy(&self, texture: TextureHandle) -> CallResult<()>;
    /// Load `path` and swap it in for the caller's reference to `old`.
    fn texture_reset(&self, old: TextureHandle, path: &str) -> CallResult<TextureHandle>;

    // Shaders

    fn shader_create(&self, path: &str) -> CallResult<ShaderHandle>;
    fn shader_retain(&self, shader: ShaderHandle) -> CallResult<()>;
    fn shader_destroy(&self, shader: ShaderHandle) -> CallResult<()>;
    fn shader_reset(&self, old: ShaderHandle, path: &str) -> CallResult<ShaderHandle>;
    fn shader_set_uniform(
        &self,
        shader: ShaderHandle,
        name: &str,
        value: UniformValue,
    ) -> CallResult<()>;

    // Logging

    fn log(&self, message: &str, level: LogLevel);

    // Debug draw

    fn draw_quad(&self, position: Vec3, scale: Vec3, colour: Vec4);
    /// `rotation` is Euler angles in radians.
    fn draw_rotated_quad(&self, position: Vec3, scale: Vec3, rotation: Vec3, colour: Vec4);
    fn draw_quad_shader(
        &self,
        position: Vec3,
        scale: Vec3,
        colour: Vec4,
        shader: ShaderHandle,
    ) -> CallResult<()>;
    fn draw_line(&self, from: Vec3, to: Vec3, colour: Vec4);
}
