//! Per-frame driver
//!
//! A presentation layer collects pointer state and button presses into a
//! `FrameInput`, then calls `advance` once per rendered frame.

use glam::DVec2;

use super::body::Color;
use super::world::{InteractionMode, World};

/// Commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Pointer position in field coordinates
    pub cue_position: Option<DVec2>,
    /// Pointer movement since the last frame
    pub cue_velocity: DVec2,
    /// Switch to a specific mode
    pub mode: Option<InteractionMode>,
    /// Flip between Selection and Cue (mode button)
    pub toggle_mode: bool,
    /// Add a randomly placed body
    pub add_random: bool,
    /// Pointer click (selects in Selection mode)
    pub click: bool,
    /// New color for the selected body; selection closes afterwards
    pub recolor: Option<Color>,
    /// Drop the current selection
    pub deselect: bool,
}

/// Apply one frame of input, then advance the world by one tick.
///
/// Commands run in a fixed order: cue state, mode, placement, click, recolor,
/// deselect, update.
pub fn advance(world: &mut World, input: &FrameInput) {
    if let Some(pos) = input.cue_position {
        world.set_cue_position(pos.x, pos.y);
    }
    world.set_cue_velocity(input.cue_velocity.x, input.cue_velocity.y);

    if let Some(mode) = input.mode {
        world.set_interaction_mode(mode);
    }
    if input.toggle_mode {
        world.toggle_interaction_mode();
    }

    if input.add_random {
        world.add_random_ball();
    }

    if input.click {
        world.select_clicked();
    }

    if let Some(color) = &input.recolor {
        if world.set_selected_color(color.clone()) {
            world.deselect();
        }
    }

    if input.deselect {
        world.deselect();
    }

    world.update();
}
