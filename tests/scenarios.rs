//! End-to-end scenarios through the public API

use ball_field::sim::{Body, InteractionMode, World};
use ball_field::{SimError, SimSettings};
use glam::DVec2;

fn world_with(friction: f64) -> World {
    let mut settings = SimSettings::default();
    settings.friction = friction;
    World::from_settings(&settings).unwrap()
}

#[test]
fn lone_body_decelerates_under_friction() {
    let mut world = world_with(0.001);
    let r = 30.0;
    world
        .add_body(Body::new(100.0, 100.0, r, 5.0, 0.0, "#336699").unwrap())
        .unwrap();

    let mut last_x = world.bodies()[0].position().x;
    let mut last_step = f64::INFINITY;
    for _ in 0..50 {
        world.update();
        let body = &world.bodies()[0];
        let x = body.position().x;
        let step = x - last_x;

        assert!(step > 0.0, "x must keep increasing");
        assert!(step < last_step, "each step must be shorter than the last");
        assert!(world.field().contains_circle(body.position(), r));
        assert_eq!(body.position().y, 100.0);

        last_x = x;
        last_step = step;
    }
    assert_eq!(world.time_ticks(), 50);
}

#[test]
fn head_on_equal_masses_reverse_and_shrink() {
    let mut a = Body::new(100.0, 300.0, 30.0, 10.0, 0.0, "#aa0000").unwrap();
    let mut b = Body::new(160.0, 300.0, 30.0, -10.0, 0.0, "#0000aa").unwrap();
    assert!(a.is_colliding(&b));

    a.handle_collision(&mut b);

    let e = a.restitution();
    assert!((a.velocity().x - -10.0 * e).abs() < 1e-9);
    assert!((b.velocity().x - 10.0 * e).abs() < 1e-9);

    // Now separating: no second response
    assert!(!a.is_colliding(&b));
    assert!(!b.is_colliding(&a));
}

#[test]
fn left_wall_clamps_and_bounces() {
    let r = 30.0;
    let dx = -4.0;

    let mut world = world_with(0.0);
    world
        .add_body(Body::new(r, 300.0, r, dx, 0.0, "#000000").unwrap())
        .unwrap();
    world.update();
    let body = &world.bodies()[0];
    assert_eq!(body.position().x, r);
    assert!((body.velocity().x - dx.abs() * body.restitution()).abs() < 1e-12);

    // With friction the decay lands before the bounce
    let mut world = world_with(0.001);
    world
        .add_body(Body::new(r, 300.0, r, dx, 0.0, "#000000").unwrap())
        .unwrap();
    world.update();
    let body = &world.bodies()[0];
    assert_eq!(body.position().x, r);
    assert!((body.velocity().x - dx.abs() * 0.999 * body.restitution()).abs() < 1e-12);
}

#[test]
fn random_placement_never_overlaps() {
    let mut world = World::new(800.0, 600.0).unwrap();
    for _ in 0..60 {
        let before: Vec<Body> = world.bodies().to_vec();
        if let Some(id) = world.add_random_ball() {
            let added = world.body(id).unwrap();
            for prior in &before {
                assert!(!prior.is_colliding(added));
                assert!(!prior.overlaps(added));
            }
        }
    }
    assert!(!world.bodies().is_empty());
}

#[test]
fn random_placement_terminates_on_full_field() {
    let mut world = World::new(50.0, 50.0).unwrap();
    world
        .add_body(Body::new(25.0, 25.0, 25.0, 0.0, 0.0, "#000000").unwrap())
        .unwrap();

    for _ in 0..10 {
        assert!(world.add_random_ball().is_none());
    }
    assert_eq!(world.bodies().len(), 1);
}

#[test]
fn cue_sweep_pushes_a_body() {
    let mut world = World::new(800.0, 600.0).unwrap();
    let id = world
        .add_body(Body::new(400.0, 300.0, 30.0, 0.0, 0.0, "#000000").unwrap())
        .unwrap();
    world.set_interaction_mode(InteractionMode::Cue);

    let mut x = 300.0;
    for _ in 0..20 {
        world.set_cue_position(x, 300.0);
        world.set_cue_velocity(20.0, 0.0);
        world.update();
        x += 20.0;
    }

    let body = world.body(id).unwrap();
    assert!(body.velocity().x > 0.0);
    assert!(body.position().x > 400.0);
}

#[test]
fn selection_survives_ticks_and_follows_identity() {
    let mut world = world_with(0.0);
    let id = world
        .add_body(Body::new(100.0, 100.0, 20.0, 1.0, 1.0, "#000000").unwrap())
        .unwrap();
    world.set_cue_position(100.0, 100.0);
    world.select_clicked();

    for _ in 0..10 {
        world.update();
    }
    let selected = world.selected_body().unwrap();
    assert_eq!(selected.id(), id);
    assert_eq!(selected.position(), DVec2::new(110.0, 110.0));
}

#[test]
fn invalid_radius_is_an_error() {
    let err = Body::new(0.0, 0.0, -3.0, 0.0, 0.0, "#000000").unwrap_err();
    assert!(matches!(err, SimError::InvalidGeometry { radius } if radius == -3.0));
    assert!(err.to_string().contains("radius"));
}
