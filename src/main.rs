//! Ball Field entry point
//!
//! Native builds run a headless frame driver: spawn bodies, sweep the cue
//! across the field, print the final snapshot as JSON. The browser build is
//! driven from JS through `ball_field::web`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ball_field::SimSettings;
    use ball_field::sim::{FrameInput, InteractionMode, World, advance};
    use glam::DVec2;

    const BODIES: usize = 12;
    const FRAMES: u32 = 600;

    env_logger::init();
    log::info!("Ball Field (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => SimSettings::load_or_default(path),
        None => SimSettings::default(),
    };

    let mut world = match World::from_settings(&settings) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Cannot build world: {}", e);
            std::process::exit(1);
        }
    };

    for _ in 0..BODIES {
        world.add_random_ball();
    }
    log::info!("Spawned {} of {} bodies", world.bodies().len(), BODIES);

    world.set_interaction_mode(InteractionMode::Cue);

    // Sweep the cue left to right through the middle of the field
    let field = *world.field();
    let step = field.width / FRAMES as f64;
    for frame in 0..FRAMES {
        let input = FrameInput {
            cue_position: Some(DVec2::new(frame as f64 * step, field.height / 2.0)),
            cue_velocity: DVec2::new(step, 0.0),
            ..Default::default()
        };
        advance(&mut world, &input);
    }

    let energy: f64 = world
        .bodies()
        .iter()
        .map(|b| 0.5 * b.mass() * b.velocity().length_squared())
        .sum();
    log::info!("After {} ticks: kinetic energy {:.1}", world.time_ticks(), energy);

    match serde_json::to_string_pretty(&world.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Snapshot serialization failed: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is ball_field::web::start, this is just to satisfy the compiler
}
