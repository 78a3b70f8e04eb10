//! Reference engine behind the script call surface
//!
//! `SceneHost` owns the world, the resource registries, input state and the
//! debug draw list behind one mutex. Each boundary call takes the lock for
//! its own duration only, which serialises calls from the main loop and
//! from background script threads alike.

use glam::{UVec2, Vec2, Vec3, Vec4};
use std::sync::{Mutex, MutexGuard, PoisonError};
use umbra_asset::{AssetError, AssetLoader, ShaderRegistry, TextureRegistry, UniformValue};
use umbra_core::components::{
    BodyType, BoxCollider2D, Camera, CameraType, CircleCollider2D, CircleRenderer, ColliderMaterial,
    RigidBody2D, SpriteRenderer, Tag, Transform,
};
use umbra_core::ecs::{Component, ComponentType, Entity, World, WorldError};
use umbra_core::handles::{ShaderHandle, TextureHandle};
use umbra_render::{DrawCommand, DrawList};
use umbra_script::fields::{
    CircleRendererField, ColliderKind, ColliderScalarField, ColliderVec2Field, RendererKind,
    TransformField,
};
use umbra_script::{CallError, CallResult, CallSurface, EntityHandle, LogLevel};
use umbra_services::{InputState, KeyCode};

struct SceneState {
    world: World,
    textures: TextureRegistry,
    shaders: ShaderRegistry,
    loader: AssetLoader,
    input: InputState,
    draw_list: DrawList,
}

pub struct SceneHost {
    state: Mutex<SceneState>,
}

impl SceneHost {
    pub fn new(loader: AssetLoader) -> Self {
        Self {
            state: Mutex::new(SceneState {
                world: World::new(),
                textures: TextureRegistry::new(),
                shaders: ShaderRegistry::new(),
                loader,
                input: InputState::new(),
                draw_list: DrawList::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, SceneState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one boundary call under the lock, logging it if it is rejected.
    fn call<T>(
        &self,
        op: &'static str,
        f: impl FnOnce(&mut SceneState) -> CallResult<T>,
    ) -> CallResult<T> {
        let mut state = self.state();
        let result = f(&mut state);
        if let Err(err) = &result {
            tracing::warn!(op, error = %err, "call rejected");
        }
        result
    }

    pub fn press_key(&self, key: KeyCode) {
        self.state().input.press(key);
    }

    pub fn release_key(&self, key: KeyCode) {
        self.state().input.release(key);
    }

    /// Debug draw commands queued since the last call.
    pub fn take_draw_commands(&self) -> Vec<DrawCommand> {
        self.state().draw_list.drain()
    }

    pub fn entity_count(&self) -> usize {
        self.state().world.live_entity_count()
    }

    pub fn texture_count(&self) -> usize {
        self.state().textures.len()
    }

    pub fn shader_count(&self) -> usize {
        self.state().shaders.len()
    }

    pub fn texture_refs(&self, texture: TextureHandle) -> Option<u32> {
        self.state().textures.ref_count(texture)
    }

    pub fn shader_uniform(&self, shader: ShaderHandle, name: &str) -> Option<UniformValue> {
        self.state().shaders.get(shader)?.uniform(name).cloned()
    }

    /// Integrate awake dynamic bodies over `dt`.
    pub fn step_physics(&self, dt: f32) {
        let mut state = self.state();
        let world = &mut state.world;
        let entities: Vec<Entity> = world.entities().collect();
        for entity in entities {
            let Some(body) = world.get::<RigidBody2D>(entity).copied() else {
                continue;
            };
            if body.body_type != BodyType::Dynamic || !body.awake {
                continue;
            }
            if let Some(transform) = world.get_mut::<Transform>(entity) {
                transform.translation += body.linear_velocity.extend(0.0) * dt;
            }
        }
    }
}

fn world_error(handle: EntityHandle, err: WorldError) -> CallError {
    match err {
        WorldError::NoSuchEntity(_) => CallError::InvalidEntity(handle),
        WorldError::AlreadyPresent { component, .. } => CallError::DuplicateComponent {
            entity: handle,
            component,
        },
    }
}

fn live(world: &World, handle: EntityHandle) -> CallResult<Entity> {
    let entity = Entity::from(handle);
    if world.is_alive(entity) {
        Ok(entity)
    } else {
        Err(CallError::InvalidEntity(handle))
    }
}

fn get<T: Component>(world: &World, handle: EntityHandle) -> CallResult<&T> {
    let entity = live(world, handle)?;
    world.get::<T>(entity).ok_or(CallError::MissingComponent {
        entity: handle,
        component: T::TYPE,
    })
}

fn get_mut<T: Component>(world: &mut World, handle: EntityHandle) -> CallResult<&mut T> {
    let entity = live(world, handle)?;
    world.get_mut::<T>(entity).ok_or(CallError::MissingComponent {
        entity: handle,
        component: T::TYPE,
    })
}

struct RendererFields<'a> {
    colour: &'a mut Vec4,
    texture: &'a mut Option<TextureHandle>,
    tiling_factor: &'a mut f32,
}

fn renderer(
    world: &mut World,
    handle: EntityHandle,
    kind: RendererKind,
) -> CallResult<RendererFields<'_>> {
    Ok(match kind {
        RendererKind::Sprite => {
            let sprite = get_mut::<SpriteRenderer>(world, handle)?;
            RendererFields {
                colour: &mut sprite.colour,
                texture: &mut sprite.texture,
                tiling_factor: &mut sprite.tiling_factor,
            }
        }
        RendererKind::Circle => {
            let circle = get_mut::<CircleRenderer>(world, handle)?;
            RendererFields {
                colour: &mut circle.colour,
                texture: &mut circle.texture,
                tiling_factor: &mut circle.tiling_factor,
            }
        }
    })
}

struct ColliderFields<'a> {
    offset: &'a mut Vec2,
    size: &'a mut Vec2,
    material: &'a mut ColliderMaterial,
}

impl ColliderFields<'_> {
    fn vec2(&mut self, field: ColliderVec2Field) -> &mut Vec2 {
        match field {
            ColliderVec2Field::Offset => &mut *self.offset,
            ColliderVec2Field::Size => &mut *self.size,
        }
    }

    fn scalar(&mut self, field: ColliderScalarField) -> &mut f32 {
        match field {
            ColliderScalarField::Density => &mut self.material.density,
            ColliderScalarField::Friction => &mut self.material.friction,
            ColliderScalarField::Restitution => &mut self.material.restitution,
            ColliderScalarField::RestitutionThreshold => {
                &mut self.material.restitution_threshold
            }
        }
    }
}

fn collider(
    world: &mut World,
    handle: EntityHandle,
    kind: ColliderKind,
) -> CallResult<ColliderFields<'_>> {
    Ok(match kind {
        ColliderKind::Box => {
            let collider = get_mut::<BoxCollider2D>(world, handle)?;
            ColliderFields {
                offset: &mut collider.offset,
                size: &mut collider.size,
                material: &mut collider.material,
            }
        }
        ColliderKind::Circle => {
            let collider = get_mut::<CircleCollider2D>(world, handle)?;
            ColliderFields {
                offset: &mut collider.offset,
                size: &mut collider.radius,
                material: &mut collider.material,
            }
        }
    })
}

fn transform_field(transform: &mut Transform, field: TransformField) -> &mut Vec3 {
    match field {
        TransformField::Translation => &mut transform.translation,
        TransformField::Rotation => &mut transform.rotation,
        TransformField::Scale => &mut transform.scale,
    }
}

/// Textures referenced by the entity's renderers.
fn renderer_textures(world: &World, entity: Entity) -> Vec<TextureHandle> {
    let sprite = world.get::<SpriteRenderer>(entity).and_then(|r| r.texture);
    let circle = world.get::<CircleRenderer>(entity).and_then(|r| r.texture);
    sprite.into_iter().chain(circle).collect()
}

fn release_texture(textures: &mut TextureRegistry, texture: TextureHandle) -> CallResult<()> {
    if let Some(freed) = textures.release(texture)? {
        tracing::debug!(%texture, path = %freed.path.display(), "texture freed");
    }
    Ok(())
}

fn release_shader(shaders: &mut ShaderRegistry, shader: ShaderHandle) -> CallResult<()> {
    if let Some(freed) = shaders.release(shader)? {
        tracing::debug!(%shader, path = %freed.path.display(), "shader freed");
    }
    Ok(())
}

impl CallSurface for SceneHost {
    fn entity_exists(&self, entity: EntityHandle) -> bool {
        self.state().world.is_alive(Entity::from(entity))
    }

    fn create_entity(&self, name: &str) -> EntityHandle {
        let mut state = self.state();
        let world = &mut state.world;
        let entity = world.spawn();
        let tagged = world.insert(entity, Tag { tag: name.to_owned() });
        let placed = world.insert(entity, Transform::default());
        debug_assert!(tagged.is_ok() && placed.is_ok());
        tracing::debug!(%entity, name, "entity created");
        entity.into()
    }

    fn destroy_entity(&self, handle: EntityHandle) -> CallResult<()> {
        self.call("destroy_entity", |state| {
            let entity = live(&state.world, handle)?;
            let held = renderer_textures(&state.world, entity);
            state.world.despawn(entity);
            for texture in held {
                release_texture(&mut state.textures, texture)?;
            }
            tracing::debug!(entity = %handle, "entity destroyed");
            Ok(())
        })
    }

    fn find_entity_by_name(&self, name: &str) -> EntityHandle {
        let state = self.state();
        let world = &state.world;
        let found = world
            .entities()
            .find(|&entity| world.get::<Tag>(entity).is_some_and(|tag| tag.tag == name))
            .map_or(EntityHandle::INVALID, EntityHandle::from);
        found
    }

    fn primary_camera_entity(&self) -> EntityHandle {
        let state = self.state();
        let world = &state.world;
        let found = world
            .entities()
            .find(|&entity| world.get::<Camera>(entity).is_some_and(|camera| camera.primary))
            .map_or(EntityHandle::INVALID, EntityHandle::from);
        found
    }

    fn has_component(&self, handle: EntityHandle, component: ComponentType) -> CallResult<bool> {
        self.call("has_component", |state| {
            state
                .world
                .has(Entity::from(handle), component)
                .map_err(|err| world_error(handle, err))
        })
    }

    fn add_component(&self, handle: EntityHandle, component: ComponentType) -> CallResult<()> {
        self.call("add_component", |state| {
            state
                .world
                .insert_default(Entity::from(handle), component)
                .map_err(|err| world_error(handle, err))?;
            tracing::debug!(entity = %handle, %component, "component added");
            Ok(())
        })
    }

    fn remove_component(&self, handle: EntityHandle, component: ComponentType) -> CallResult<bool> {
        self.call("remove_component", |state| {
            let entity = live(&state.world, handle)?;
            let held = match component {
                ComponentType::SpriteRenderer => {
                    state.world.get::<SpriteRenderer>(entity).and_then(|r| r.texture)
                }
                ComponentType::CircleRenderer => {
                    state.world.get::<CircleRenderer>(entity).and_then(|r| r.texture)
                }
                _ => None,
            };
            let removed = state
                .world
                .remove(entity, component)
                .map_err(|err| world_error(handle, err))?;
            if let Some(texture) = held {
                release_texture(&mut state.textures, texture)?;
            }
            if removed {
                tracing::debug!(entity = %handle, %component, "component removed");
            }
            Ok(removed)
        })
    }

    fn tag(&self, handle: EntityHandle) -> CallResult<String> {
        self.call("tag", |state| Ok(get::<Tag>(&state.world, handle)?.tag.clone()))
    }

    fn set_tag(&self, handle: EntityHandle, tag: &str) -> CallResult<()> {
        self.call("set_tag", |state| {
            get_mut::<Tag>(&mut state.world, handle)?.tag = tag.to_owned();
            Ok(())
        })
    }

    fn transform(&self, handle: EntityHandle, field: TransformField) -> CallResult<Vec3> {
        self.call("transform", |state| {
            let transform = get_mut::<Transform>(&mut state.world, handle)?;
            Ok(*transform_field(transform, field))
        })
    }

    fn set_transform(
        &self,
        handle: EntityHandle,
        field: TransformField,
        value: Vec3,
    ) -> CallResult<()> {
        self.call("set_transform", |state| {
            let transform = get_mut::<Transform>(&mut state.world, handle)?;
            *transform_field(transform, field) = value;
            Ok(())
        })
    }

    fn renderer_colour(&self, handle: EntityHandle, kind: RendererKind) -> CallResult<Vec4> {
        self.call("renderer_colour", |state| {
            Ok(*renderer(&mut state.world, handle, kind)?.colour)
        })
    }

    fn set_renderer_colour(
        &self,
        handle: EntityHandle,
        kind: RendererKind,
        colour: Vec4,
    ) -> CallResult<()> {
        self.call("set_renderer_colour", |state| {
            *renderer(&mut state.world, handle, kind)?.colour = colour;
            Ok(())
        })
    }

    fn renderer_texture(
        &self,
        handle: EntityHandle,
        kind: RendererKind,
    ) -> CallResult<Option<TextureHandle>> {
        self.call("renderer_texture", |state| {
            Ok(*renderer(&mut state.world, handle, kind)?.texture)
        })
    }

    fn set_renderer_texture(
        &self,
        handle: EntityHandle,
        kind: RendererKind,
        texture: Option<TextureHandle>,
    ) -> CallResult<()> {
        self.call("set_renderer_texture", |state| {
            let SceneState {
                world, textures, ..
            } = state;
            let fields = renderer(world, handle, kind)?;
            if let Some(new) = texture {
                textures.retain(new)?;
            }
            if let Some(old) = std::mem::replace(fields.texture, texture) {
                release_texture(textures, old)?;
            }
            Ok(())
        })
    }

    fn renderer_tiling_factor(&self, handle: EntityHandle, kind: RendererKind) -> CallResult<f32> {
        self.call("renderer_tiling_factor", |state| {
            Ok(*renderer(&mut state.world, handle, kind)?.tiling_factor)
        })
    }

    fn set_renderer_tiling_factor(
        &self,
        handle: EntityHandle,
        kind: RendererKind,
        factor: f32,
    ) -> CallResult<()> {
        self.call("set_renderer_tiling_factor", |state| {
            *renderer(&mut state.world, handle, kind)?.tiling_factor = factor;
            Ok(())
        })
    }

    fn circle_renderer(&self, handle: EntityHandle, field: CircleRendererField) -> CallResult<f32> {
        self.call("circle_renderer", |state| {
            let circle = get::<CircleRenderer>(&state.world, handle)?;
            Ok(match field {
                CircleRendererField::Radius => circle.radius,
                CircleRendererField::Thickness => circle.thickness,
                CircleRendererField::Fade => circle.fade,
            })
        })
    }

    fn set_circle_renderer(
        &self,
        handle: EntityHandle,
        field: CircleRendererField,
        value: f32,
    ) -> CallResult<()> {
        self.call("set_circle_renderer", |state| {
            let circle = get_mut::<CircleRenderer>(&mut state.world, handle)?;
            match field {
                CircleRendererField::Radius => circle.radius = value,
                CircleRendererField::Thickness => circle.thickness = value,
                CircleRendererField::Fade => circle.fade = value,
            }
            Ok(())
        })
    }

    fn body_type(&self, handle: EntityHandle) -> CallResult<BodyType> {
        self.call("body_type", |state| {
            Ok(get::<RigidBody2D>(&state.world, handle)?.body_type)
        })
    }

    fn set_body_type(&self, handle: EntityHandle, body_type: BodyType) -> CallResult<()> {
        self.call("set_body_type", |state| {
            get_mut::<RigidBody2D>(&mut state.world, handle)?.body_type = body_type;
            Ok(())
        })
    }

    fn fixed_rotation(&self, handle: EntityHandle) -> CallResult<bool> {
        self.call("fixed_rotation", |state| {
            Ok(get::<RigidBody2D>(&state.world, handle)?.fixed_rotation)
        })
    }

    fn set_fixed_rotation(&self, handle: EntityHandle, fixed: bool) -> CallResult<()> {
        self.call("set_fixed_rotation", |state| {
            get_mut::<RigidBody2D>(&mut state.world, handle)?.fixed_rotation = fixed;
            Ok(())
        })
    }

    fn linear_velocity(&self, handle: EntityHandle) -> CallResult<Vec2> {
        self.call("linear_velocity", |state| {
            Ok(get::<RigidBody2D>(&state.world, handle)?.linear_velocity)
        })
    }

    fn set_linear_velocity(&self, handle: EntityHandle, velocity: Vec2) -> CallResult<()> {
        self.call("set_linear_velocity", |state| {
            get_mut::<RigidBody2D>(&mut state.world, handle)?.linear_velocity = velocity;
            Ok(())
        })
    }

    // Bodies carry no angular state here, so an off-centre impulse only
    // changes linear velocity.
    fn apply_linear_impulse(
        &self,
        handle: EntityHandle,
        impulse: Vec2,
        _point: Vec2,
        wake: bool,
    ) -> CallResult<()> {
        self.call("apply_linear_impulse", |state| {
            get_mut::<RigidBody2D>(&mut state.world, handle)?.apply_impulse(impulse, wake);
            Ok(())
        })
    }

    fn apply_linear_impulse_to_center(
        &self,
        handle: EntityHandle,
        impulse: Vec2,
        wake: bool,
    ) -> CallResult<()> {
        self.call("apply_linear_impulse_to_center", |state| {
            get_mut::<RigidBody2D>(&mut state.world, handle)?.apply_impulse(impulse, wake);
            Ok(())
        })
    }

    fn collider_vec2(
        &self,
        handle: EntityHandle,
        kind: ColliderKind,
        field: ColliderVec2Field,
    ) -> CallResult<Vec2> {
        self.call("collider_vec2", |state| {
            Ok(*collider(&mut state.world, handle, kind)?.vec2(field))
        })
    }

    fn set_collider_vec2(
        &self,
        handle: EntityHandle,
        kind: ColliderKind,
        field: ColliderVec2Field,
        value: Vec2,
    ) -> CallResult<()> {
        self.call("set_collider_vec2", |state| {
            *collider(&mut state.world, handle, kind)?.vec2(field) = value;
            Ok(())
        })
    }

    fn collider_scalar(
        &self,
        handle: EntityHandle,
        kind: ColliderKind,
        field: ColliderScalarField,
    ) -> CallResult<f32> {
        self.call("collider_scalar", |state| {
            Ok(*collider(&mut state.world, handle, kind)?.scalar(field))
        })
    }

    fn set_collider_scalar(
        &self,
        handle: EntityHandle,
        kind: ColliderKind,
        field: ColliderScalarField,
        value: f32,
    ) -> CallResult<()> {
        self.call("set_collider_scalar", |state| {
            *collider(&mut state.world, handle, kind)?.scalar(field) = value;
            Ok(())
        })
    }

    fn camera_primary(&self, handle: EntityHandle) -> CallResult<bool> {
        self.call("camera_primary", |state| {
            Ok(get::<Camera>(&state.world, handle)?.primary)
        })
    }

    fn set_camera_primary(&self, handle: EntityHandle, primary: bool) -> CallResult<()> {
        self.call("set_camera_primary", |state| {
            get_mut::<Camera>(&mut state.world, handle)?.primary = primary;
            Ok(())
        })
    }

    fn camera_type(&self, handle: EntityHandle) -> CallResult<CameraType> {
        self.call("camera_type", |state| {
            Ok(get::<Camera>(&state.world, handle)?.camera_type)
        })
    }

    fn set_camera_type(&self, handle: EntityHandle, camera_type: CameraType) -> CallResult<()> {
        self.call("set_camera_type", |state| {
            get_mut::<Camera>(&mut state.world, handle)?.camera_type = camera_type;
            Ok(())
        })
    }

    fn camera_viewport(&self, handle: EntityHandle) -> CallResult<UVec2> {
        self.call("camera_viewport", |state| {
            Ok(get::<Camera>(&state.world, handle)?.viewport)
        })
    }

    fn set_camera_viewport(&self, handle: EntityHandle, size: UVec2) -> CallResult<()> {
        self.call("set_camera_viewport", |state| {
            get_mut::<Camera>(&mut state.world, handle)?.viewport = size;
            Ok(())
        })
    }

    fn is_key_down(&self, key: KeyCode) -> bool {
        self.state().input.is_key_down(key)
    }

    fn texture_create(&self, path: &str) -> CallResult<TextureHandle> {
        self.call("texture_create", |state| {
            let texture = state.loader.load_texture(path)?;
            Ok(state.textures.insert(texture))
        })
    }

    fn texture_retain(&self, texture: TextureHandle) -> CallResult<()> {
        self.call("texture_retain", |state| {
            state.textures.retain(texture)?;
            Ok(())
        })
    }

    fn texture_destroy(&self, texture: TextureHandle) -> CallResult<()> {
        self.call("texture_destroy", |state| {
            release_texture(&mut state.textures, texture)
        })
    }

    fn texture_reset(&self, old: TextureHandle, path: &str) -> CallResult<TextureHandle> {
        self.call("texture_reset", |state| {
            if !state.textures.contains(old) {
                return Err(AssetError::UnknownHandle(old.0).into());
            }
            let texture = state.loader.load_texture(path)?;
            let new = state.textures.insert(texture);
            release_texture(&mut state.textures, old)?;
            Ok(new)
        })
    }

    fn shader_create(&self, path: &str) -> CallResult<ShaderHandle> {
        self.call("shader_create", |state| {
            let shader = state.loader.load_shader(path)?;
            Ok(state.shaders.insert(shader))
        })
    }

    fn shader_retain(&self, shader: ShaderHandle) -> CallResult<()> {
        self.call("shader_retain", |state| {
            state.shaders.retain(shader)?;
            Ok(())
        })
    }

    fn shader_destroy(&self, shader: ShaderHandle) -> CallResult<()> {
        self.call("shader_destroy", |state| {
            release_shader(&mut state.shaders, shader)
        })
    }

    fn shader_reset(&self, old: ShaderHandle, path: &str) -> CallResult<ShaderHandle> {
        self.call("shader_reset", |state| {
            if !state.shaders.contains(old) {
                return Err(AssetError::UnknownHandle(old.0).into());
            }
            let shader = state.loader.load_shader(path)?;
            let new = state.shaders.insert(shader);
            release_shader(&mut state.shaders, old)?;
            Ok(new)
        })
    }

    fn shader_set_uniform(
        &self,
        shader: ShaderHandle,
        name: &str,
        value: UniformValue,
    ) -> CallResult<()> {
        self.call("shader_set_uniform", |state| {
            state
                .shaders
                .get_mut(shader)
                .ok_or(AssetError::UnknownHandle(shader.0))?
                .set_uniform(name, value);
            Ok(())
        })
    }

    fn log(&self, message: &str, level: LogLevel) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "script", "{message}"),
            LogLevel::Debug => tracing::debug!(target: "script", "{message}"),
            LogLevel::Info => tracing::info!(target: "script", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "script", "{message}"),
            LogLevel::Error => tracing::error!(target: "script", "{message}"),
            LogLevel::Critical => tracing::error!(target: "script", critical = true, "{message}"),
        }
    }

    fn draw_quad(&self, position: Vec3, scale: Vec3, colour: Vec4) {
        self.state().draw_list.push(DrawCommand::Quad {
            position,
            scale,
            colour,
        });
    }

    fn draw_rotated_quad(&self, position: Vec3, scale: Vec3, rotation: Vec3, colour: Vec4) {
        self.state().draw_list.push(DrawCommand::RotatedQuad {
            position,
            scale,
            rotation,
            colour,
        });
    }

    fn draw_quad_shader(
        &self,
        position: Vec3,
        scale: Vec3,
        colour: Vec4,
        shader: ShaderHandle,
    ) -> CallResult<()> {
        self.call("draw_quad_shader", |state| {
            if !state.shaders.contains(shader) {
                return Err(AssetError::UnknownHandle(shader.0).into());
            }
            state.draw_list.push(DrawCommand::QuadShader {
                position,
                scale,
                colour,
                shader,
            });
            Ok(())
        })
    }

    fn draw_line(&self, from: Vec3, to: Vec3, colour: Vec4) {
        self.state()
            .draw_list
            .push(DrawCommand::Line { from, to, colour });
    }
}
