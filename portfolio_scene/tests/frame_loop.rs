use bevy::prelude::*;

use portfolio_scene::animation::{animate_entities, FrameReport, Motion, SceneClock};
use portfolio_scene::scene::EntityKind;
use portfolio_scene::{AnimatedEntity, EntityId, EntityTable, ScenePreset};

fn orb(id: u32, x: f32, speed: f32) -> AnimatedEntity {
    AnimatedEntity {
        id: EntityId(id),
        kind: EntityKind::Orb,
        label: None,
        base_position: Vec3::new(x, 0.0, 0.0),
        color: Color::WHITE,
        size: 0.3,
        angular_speed: speed,
        phase_offset: 0.0,
        drift: None,
    }
}

/// Mounts `entities` into a fresh table and binds each to a plain transform.
fn frame_app(entities: Vec<AnimatedEntity>) -> App {
    let mut app = App::new();
    let mut table = EntityTable::default();
    table.mount(
        ScenePreset::Toolkit,
        entities.iter().cloned().map(|e| (e, Motion::orb())),
    );
    for entity in &entities {
        let handle = app.world_mut().spawn(Transform::default()).id();
        table.bind(entity.id, handle);
    }
    app.insert_resource(table)
        .init_resource::<SceneClock>()
        .init_resource::<FrameReport>()
        .add_systems(Update, animate_entities);
    app
}

fn transform_of(app: &App, id: u32) -> Transform {
    let handle = app
        .world()
        .resource::<EntityTable>()
        .handle(EntityId(id))
        .expect("bound");
    *app.world().get::<Transform>(handle).expect("transform")
}

fn advance(app: &mut App, t: f32) {
    app.world_mut().resource_mut::<SceneClock>().advance_to(t);
    app.update();
}

#[test]
fn bad_entity_is_skipped_and_siblings_keep_moving() {
    let mut app = frame_app(vec![orb(0, -1.0, 0.01), orb(1, 0.0, f32::NAN), orb(2, 1.0, 0.01)]);

    advance(&mut app, 0.5);
    let report = *app.world().resource::<FrameReport>();
    assert_eq!(report.updated, 2);
    assert_eq!(report.failed, 1);

    // The failing row keeps its last good transform.
    assert_eq!(transform_of(&app, 1), Transform::default());

    let before = transform_of(&app, 2).translation;
    advance(&mut app, 1.5);
    assert_eq!(app.world().resource::<FrameReport>().updated, 2);
    assert_ne!(transform_of(&app, 2).translation, before);
}

#[test]
fn unbound_rows_are_skipped() {
    let mut app = frame_app(vec![orb(0, 0.0, 0.01)]);
    let mut table = EntityTable::default();
    table.mount(
        ScenePreset::Toolkit,
        [(orb(0, 0.0, 0.01), Motion::orb()), (orb(1, 2.0, 0.01), Motion::orb())],
    );
    let handle = app.world_mut().spawn(Transform::default()).id();
    table.bind(EntityId(1), handle);
    app.insert_resource(table);

    advance(&mut app, 0.25);
    let report = *app.world().resource::<FrameReport>();
    assert_eq!(report.skipped, 1);
    assert_eq!(report.updated, 1);
}

#[test]
fn orb_bob_follows_elapsed_time() {
    let mut app = frame_app(vec![orb(0, 0.0, 0.01)]);
    let t = std::f32::consts::FRAC_PI_2;
    advance(&mut app, t);
    let y = transform_of(&app, 0).translation.y;
    assert!((y - 0.1).abs() < 1e-5, "bob peak was {y}");
}

#[test]
fn clock_going_backwards_does_not_rewind_poses() {
    let mut app = frame_app(vec![orb(0, 0.0, 0.01)]);
    advance(&mut app, 2.0);
    let at_two = transform_of(&app, 0).translation;

    // A late reading is ignored; the pose is computed from t=2 again.
    advance(&mut app, 1.0);
    assert_eq!(app.world().resource::<SceneClock>().elapsed(), 2.0);
    assert_eq!(transform_of(&app, 0).translation, at_two);
}
