mod common;

use common::fixture;
use glam::{UVec2, Vec2, Vec3, Vec4};
use umbra_core::components::{BodyType, CameraType};
use umbra_core::ecs::ComponentType;
use umbra_script::components::{
    BoxCollider2D, Camera, CircleCollider2D, CircleRenderer, RigidBody2D, SpriteRenderer, Tag,
    Transform,
};
use umbra_script::fields::{ColliderKind, ColliderScalarField, RendererKind, TransformField};
use umbra_script::{CallError, CallSurface, ComponentProxy, EntityHandle, ScriptEntity};
use umbra_services::KeyCode;

#[test]
fn created_entities_carry_tag_and_transform() {
    let fx = fixture();
    let player = fx.spawn("Player");

    assert!(player.is_alive());
    assert!(player.has_component::<Tag>());
    assert!(player.has_component::<Transform>());
    assert!(!player.has_component::<SpriteRenderer>());
    assert_eq!(player.name().unwrap(), "Player");
    assert_eq!(player.transform().scale().unwrap(), Vec3::ONE);
}

#[test]
fn set_then_get_position() {
    let fx = fixture();
    let player = fx.spawn("Player");

    let transform = player.add_component::<Transform>().unwrap();
    assert_eq!(transform.position().unwrap(), Vec3::ZERO);
    transform.set_position(Vec3::new(2.0, 0.0, 0.0)).unwrap();

    assert_eq!(player.transform().position().unwrap(), Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn re_added_transform_starts_from_defaults() {
    let fx = fixture();
    let player = fx.spawn("Player");
    player.transform().set_scale(Vec3::splat(3.0)).unwrap();

    assert!(player.remove_component::<Transform>().unwrap());
    assert!(player.get_component::<Transform>().is_none());
    let transform = player.add_component::<Transform>().unwrap();
    assert_eq!(transform.scale().unwrap(), Vec3::ONE);
    assert_eq!(transform.rotation().unwrap(), Vec3::ZERO);
}

#[test]
fn dynamic_body_and_box_collider_fields() {
    let fx = fixture();
    let crate_entity = fx.spawn("Crate");

    let body = crate_entity.add_component::<RigidBody2D>().unwrap();
    body.set_body_type(BodyType::Dynamic).unwrap();
    assert_eq!(body.body_type().unwrap(), BodyType::Dynamic);

    let collider = crate_entity.add_component::<BoxCollider2D>().unwrap();
    collider.set_restitution(0.7).unwrap();
    collider.set_restitution_threshold(0.6).unwrap();
    assert_eq!(collider.restitution().unwrap(), 0.7);
    assert_eq!(collider.restitution_threshold().unwrap(), 0.6);
    assert_eq!(collider.scalar_by_name("restitutionThreshold").unwrap(), 0.6);
}

#[test]
fn missing_name_yields_invalid_handle_and_failing_access() {
    let fx = fixture();
    fx.spawn("Player");

    let missing = fx.engine.find_entity_by_name("missing");
    assert_eq!(missing, EntityHandle::INVALID);
    assert!(fx.host.bridge().find_entity_by_name("missing").is_none());

    let ghost = fx.host.entity(missing);
    assert!(!ghost.is_alive());
    assert!(!ghost.has_component::<Transform>());
    assert!(ghost.get_component::<Transform>().is_none());
    assert!(matches!(
        ghost.transform().position(),
        Err(CallError::InvalidEntity(handle)) if handle == missing
    ));
    assert!(matches!(
        fx.engine.body_type(missing),
        Err(CallError::InvalidEntity(_))
    ));
    assert!(matches!(
        ghost.add_component::<Camera>(),
        Err(CallError::InvalidEntity(_))
    ));
}

#[test]
fn destroyed_entity_never_yields_stale_components() {
    let fx = fixture();
    let old = fx.spawn("Old");
    let sprite = old.add_component::<SpriteRenderer>().unwrap();
    sprite.set_colour(Vec4::new(1.0, 0.0, 0.0, 1.0)).unwrap();
    let old_id = old.id();

    old.destroy().unwrap();
    assert!(old.get_component::<SpriteRenderer>().is_none());
    assert!(matches!(sprite.colour(), Err(CallError::InvalidEntity(_))));

    // the freed slot is recycled under a different handle
    let new = fx.spawn("New");
    new.add_component::<SpriteRenderer>().unwrap();
    assert_ne!(new.id(), old_id);
    assert!(fx.host.entity(old_id).get_component::<SpriteRenderer>().is_none());
    assert_eq!(
        new.get_component::<SpriteRenderer>().unwrap().colour().unwrap(),
        Vec4::ONE
    );
}

fn add_then_remove<T: ComponentProxy>(entity: &ScriptEntity) {
    entity.add_component::<T>().unwrap();
    assert!(entity.has_component::<T>(), "{} missing after add", T::TYPE);
    assert!(entity.remove_component::<T>().unwrap());
    assert!(!entity.has_component::<T>(), "{} present after remove", T::TYPE);
    // a second remove is a quiet no-op
    assert!(!entity.remove_component::<T>().unwrap());
}

#[test]
fn has_tracks_add_and_remove_for_every_kind() {
    let fx = fixture();
    let entity = fx.spawn("Everything");
    let position = Vec3::new(1.0, 2.0, 3.0);
    entity.transform().set_position(position).unwrap();

    add_then_remove::<SpriteRenderer>(&entity);
    add_then_remove::<CircleRenderer>(&entity);
    add_then_remove::<RigidBody2D>(&entity);
    add_then_remove::<BoxCollider2D>(&entity);
    add_then_remove::<CircleCollider2D>(&entity);
    add_then_remove::<Camera>(&entity);
    add_then_remove::<Tag>(&entity);
    assert_eq!(entity.transform().position().unwrap(), position);

    add_then_remove::<Transform>(&entity);
}

#[test]
fn proxies_map_to_engine_descriptors() {
    assert_eq!(Tag::TYPE, ComponentType::Tag);
    assert_eq!(Transform::TYPE, ComponentType::Transform);
    assert_eq!(SpriteRenderer::TYPE, ComponentType::SpriteRenderer);
    assert_eq!(CircleRenderer::TYPE, ComponentType::CircleRenderer);
    assert_eq!(RigidBody2D::TYPE, ComponentType::RigidBody2D);
    assert_eq!(BoxCollider2D::TYPE, ComponentType::BoxCollider2D);
    assert_eq!(CircleCollider2D::TYPE, ComponentType::CircleCollider2D);
    assert_eq!(Camera::TYPE, ComponentType::Camera);
}

#[test]
fn duplicate_add_is_rejected_without_mutation() {
    let fx = fixture();
    let entity = fx.spawn("Sprite");
    let sprite = entity.add_component::<SpriteRenderer>().unwrap();
    sprite.set_tiling_factor(4.0).unwrap();

    let err = fx
        .engine
        .add_component(entity.id(), ComponentType::SpriteRenderer)
        .unwrap_err();
    assert!(matches!(
        err,
        CallError::DuplicateComponent {
            component: ComponentType::SpriteRenderer,
            ..
        }
    ));
    assert_eq!(sprite.tiling_factor().unwrap(), 4.0);

    // the script-level add hands back the component that is already there
    let again = entity.add_component::<SpriteRenderer>().unwrap();
    assert_eq!(again.tiling_factor().unwrap(), 4.0);
}

#[test]
fn field_access_without_component_is_missing_component() {
    let fx = fixture();
    let entity = fx.spawn("Bare");

    assert!(matches!(
        fx.engine
            .collider_scalar(entity.id(), ColliderKind::Box, ColliderScalarField::Density),
        Err(CallError::MissingComponent {
            component: ComponentType::BoxCollider2D,
            ..
        })
    ));
    assert!(matches!(
        fx.engine.renderer_colour(entity.id(), RendererKind::Circle),
        Err(CallError::MissingComponent {
            component: ComponentType::CircleRenderer,
            ..
        })
    ));

    let body = entity.add_component::<RigidBody2D>().unwrap();
    entity.remove_component::<RigidBody2D>().unwrap();
    assert!(matches!(
        body.linear_velocity(),
        Err(CallError::MissingComponent { .. })
    ));
}

#[test]
fn every_field_round_trips() {
    let fx = fixture();
    let entity = fx.spawn("Fields");

    let tag = entity.get_component::<Tag>().unwrap();
    tag.set_tag("Renamed").unwrap();
    assert_eq!(tag.tag().unwrap(), "Renamed");

    let transform = entity.transform();
    let rotation = Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2);
    transform.set_rotation(rotation).unwrap();
    transform.set_scale(Vec3::new(2.0, 3.0, 1.0)).unwrap();
    assert!(transform.rotation().unwrap().abs_diff_eq(rotation, 1e-6));
    assert_eq!(
        fx.engine.transform(entity.id(), TransformField::Scale).unwrap(),
        Vec3::new(2.0, 3.0, 1.0)
    );

    let sprite = entity.add_component::<SpriteRenderer>().unwrap();
    sprite.set_colour(Vec4::new(0.1, 0.2, 0.3, 0.4)).unwrap();
    sprite.set_tiling_factor(2.5).unwrap();
    assert!(sprite
        .colour()
        .unwrap()
        .abs_diff_eq(Vec4::new(0.1, 0.2, 0.3, 0.4), 1e-6));
    assert_eq!(sprite.tiling_factor().unwrap(), 2.5);

    let circle = entity.add_component::<CircleRenderer>().unwrap();
    circle.set_colour(Vec4::new(0.0, 1.0, 0.0, 1.0)).unwrap();
    circle.set_radius(2.0).unwrap();
    circle.set_thickness(0.25).unwrap();
    circle.set_fade(0.1).unwrap();
    assert_eq!(circle.colour().unwrap(), Vec4::new(0.0, 1.0, 0.0, 1.0));
    assert_eq!(circle.radius().unwrap(), 2.0);
    assert_eq!(circle.thickness().unwrap(), 0.25);
    assert_eq!(circle.fade().unwrap(), 0.1);
    // the sprite renderer is a separate component
    assert_eq!(sprite.tiling_factor().unwrap(), 2.5);
    assert_eq!(circle.tiling_factor().unwrap(), 1.0);

    let body = entity.add_component::<RigidBody2D>().unwrap();
    body.set_fixed_rotation(true).unwrap();
    body.set_linear_velocity(Vec2::new(-1.0, 4.0)).unwrap();
    assert!(body.fixed_rotation().unwrap());
    assert_eq!(body.linear_velocity().unwrap(), Vec2::new(-1.0, 4.0));

    let boxed = entity.add_component::<BoxCollider2D>().unwrap();
    boxed.set_offset(Vec2::new(0.5, -0.5)).unwrap();
    boxed.set_size(Vec2::new(1.0, 2.0)).unwrap();
    boxed.set_density(3.0).unwrap();
    boxed.set_friction(0.9).unwrap();
    assert_eq!(boxed.offset().unwrap(), Vec2::new(0.5, -0.5));
    assert_eq!(boxed.size().unwrap(), Vec2::new(1.0, 2.0));
    assert_eq!(boxed.density().unwrap(), 3.0);
    assert_eq!(boxed.scalar_by_name("friction").unwrap(), 0.9);

    let round = entity.add_component::<CircleCollider2D>().unwrap();
    round.set_offset(Vec2::new(1.0, 1.0)).unwrap();
    round.set_radius(0.75).unwrap();
    round.set_scalar_by_name("restitution", 0.3).unwrap();
    assert_eq!(round.offset().unwrap(), Vec2::new(1.0, 1.0));
    assert_eq!(round.radius().unwrap(), 0.75);
    assert_eq!(round.restitution().unwrap(), 0.3);
    // box and circle colliders keep separate materials
    assert_eq!(boxed.restitution().unwrap(), 0.0);

    let camera = entity.add_component::<Camera>().unwrap();
    camera.set_primary(false).unwrap();
    camera.set_camera_type(CameraType::Orbit).unwrap();
    camera.set_viewport(800, 600).unwrap();
    assert!(!camera.is_primary().unwrap());
    assert_eq!(camera.camera_type().unwrap(), CameraType::Orbit);
    assert_eq!(camera.viewport().unwrap(), UVec2::new(800, 600));
}

#[test]
fn unknown_collider_field_name_changes_nothing() {
    let fx = fixture();
    let entity = fx.spawn("Box");
    let collider = entity.add_component::<BoxCollider2D>().unwrap();

    assert!(matches!(
        collider.set_scalar_by_name("bounciness", 9.0),
        Err(CallError::UnknownField { ref name, .. }) if name == "bounciness"
    ));
    assert!(collider.scalar_by_name("Density").is_err());
    for field in ColliderScalarField::ALL {
        let untouched = collider.scalar(field).unwrap();
        assert_ne!(untouched, 9.0, "{field} was modified");
    }
}

#[test]
fn impulses_only_move_dynamic_bodies() {
    let fx = fixture();
    let entity = fx.spawn("Ball");
    let body = entity.add_component::<RigidBody2D>().unwrap();

    body.apply_linear_impulse_to_center(Vec2::new(2.0, 0.0), true)
        .unwrap();
    assert_eq!(body.linear_velocity().unwrap(), Vec2::ZERO);

    body.set_body_type(BodyType::Dynamic).unwrap();
    body.apply_linear_impulse_to_center(Vec2::new(2.0, 0.0), true)
        .unwrap();
    body.apply_linear_impulse(Vec2::new(0.0, 1.0), Vec2::new(5.0, 5.0), true)
        .unwrap();
    assert_eq!(body.linear_velocity().unwrap(), Vec2::new(2.0, 1.0));
}

#[test]
fn names_and_primary_camera_are_searchable() {
    let fx = fixture();
    assert_eq!(fx.engine.primary_camera_entity(), EntityHandle::INVALID);
    assert!(fx.host.bridge().primary_camera().is_none());

    let side = fx.spawn("Side");
    side.add_component::<Camera>()
        .unwrap()
        .set_primary(false)
        .unwrap();
    let main = fx.spawn("Main");
    main.add_component::<Camera>().unwrap();
    assert_eq!(fx.engine.primary_camera_entity(), main.id());

    main.set_name("Hero").unwrap();
    assert!(fx.host.bridge().find_entity_by_name("Main").is_none());
    assert_eq!(main.find_by_name("Hero").unwrap(), main);
    assert_eq!(fx.engine.find_entity_by_name("Side"), side.id());
}

#[test]
fn key_state_comes_from_the_scene() {
    let fx = fixture();
    assert!(!fx.engine.is_key_down(KeyCode::Space));
    fx.scene.press_key(KeyCode::Space);
    assert!(fx.engine.is_key_down(KeyCode::Space));
    assert!(!fx.engine.is_key_down(KeyCode::A));
    fx.scene.release_key(KeyCode::Space);
    assert!(!fx.engine.is_key_down(KeyCode::Space));
}

#[test]
fn name_keyed_resolution_rejects_unknown_kinds() {
    let fx = fixture();
    let entity = fx.spawn("Named");

    entity.add_component_named("CircleRenderer").unwrap();
    assert!(entity.has_component::<CircleRenderer>());
    assert!(entity.has_component_named("CircleRenderer").unwrap());
    assert!(entity.remove_component_named("CircleRenderer").unwrap());

    assert!(matches!(
        entity.add_component_named("NativeScript"),
        Err(CallError::UnknownComponentType(ref name)) if name == "NativeScript"
    ));
    assert!(matches!(
        entity.has_component_named("transform"),
        Err(CallError::UnknownComponentType(_))
    ));
}
