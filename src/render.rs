//! Drawable capability
//!
//! The simulation never draws. A presentation layer implements `Surface` for
//! its canvas and asks bodies to draw themselves onto it.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

use glam::DVec2;
use serde::Serialize;

use crate::consts::DEBUG_VECTOR_SCALE;
use crate::sim::{Body, Color, InteractionMode, World};

/// Cue fill color
pub const CUE_COLOR: &str = "#0f0";
/// Stroke color for debug vectors
pub const VECTOR_COLOR: &str = "black";
/// Fill color of the selection marks
pub const SELECTION_COLOR: &str = "white";
/// Side length of one selection mark
pub const SELECTION_MARK_SIZE: f64 = 20.0;
/// Marker rotation per tick, radians (clockwise on a y-down canvas)
pub const SELECTION_SPIN: f64 = -0.015;

/// Something primitives can be drawn onto
pub trait Surface {
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: &Color);
    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: &Color);
    fn fill_triangle(&mut self, points: [DVec2; 3], color: &Color);
}

/// Anything that can draw itself onto a `Surface`
pub trait Drawable {
    /// Draw; `debug` adds velocity vectors
    fn draw(&self, surface: &mut dyn Surface, debug: bool);
}

impl Drawable for Body {
    fn draw(&self, surface: &mut dyn Surface, debug: bool) {
        surface.fill_circle(self.position(), self.radius(), self.color());
        if debug {
            let tip = self.position() + self.velocity() * DEBUG_VECTOR_SCALE;
            surface.stroke_line(self.position(), tip, &Color::new(VECTOR_COLOR));
        }
    }
}

/// The pointer as drawn in Cue mode
#[derive(Debug, Clone, Copy)]
pub struct CueMarker {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    pub strength: f64,
}

impl CueMarker {
    pub fn from_world(world: &World) -> Self {
        Self {
            position: world.cue_position(),
            velocity: world.cue_velocity(),
            radius: world.cue_radius(),
            strength: world.cue_strength(),
        }
    }
}

impl Drawable for CueMarker {
    fn draw(&self, surface: &mut dyn Surface, debug: bool) {
        surface.fill_circle(self.position, self.radius, &Color::new(CUE_COLOR));
        if debug {
            let tip = self.position + self.velocity * self.strength;
            surface.stroke_line(self.position, tip, &Color::new(VECTOR_COLOR));
        }
    }
}

/// Four triangles on the rim of the selected body, rotating with time
#[derive(Debug, Clone, Copy)]
pub struct SelectionMarker {
    pub center: DVec2,
    pub radius: f64,
    pub angle: f64,
}

impl SelectionMarker {
    /// Marker for the selected body, if any; the phase follows the tick count
    pub fn from_world(world: &World) -> Option<Self> {
        let body = world.selected_body()?;
        Some(Self {
            center: body.position(),
            radius: body.radius(),
            angle: SELECTION_SPIN * world.time_ticks() as f64,
        })
    }

    /// Vertices of mark `i` (0..4), apex pointing at the body center
    pub fn mark(&self, i: usize) -> [DVec2; 3] {
        let angle = self.angle + i as f64 * FRAC_PI_2;
        let anchor = self.center + DVec2::from_angle(angle) * self.radius;
        let half = SELECTION_MARK_SIZE * 3f64.sqrt() / 4.0;
        [
            anchor - DVec2::from_angle(angle) * half,
            anchor + DVec2::from_angle(angle + FRAC_PI_3) * half,
            anchor + DVec2::from_angle(angle - FRAC_PI_3) * half,
        ]
    }
}

impl Drawable for SelectionMarker {
    fn draw(&self, surface: &mut dyn Surface, _debug: bool) {
        let color = Color::new(SELECTION_COLOR);
        for i in 0..4 {
            surface.fill_triangle(self.mark(i), &color);
        }
    }
}

/// Draw the cue (Cue mode only), every body in order, then the selection marks
pub fn draw_world(world: &World, surface: &mut dyn Surface, debug: bool) {
    if world.interaction_mode() == InteractionMode::Cue {
        CueMarker::from_world(world).draw(surface, debug);
    }
    for body in world.bodies() {
        body.draw(surface, debug);
    }
    if let Some(marker) = SelectionMarker::from_world(world) {
        marker.draw(surface, debug);
    }
}

/// A recorded primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Circle { center: DVec2, radius: f64, color: Color },
    Line { from: DVec2, to: DVec2, color: Color },
    Triangle { points: [DVec2; 3], color: Color },
}

/// Surface that records primitives instead of drawing them
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for CommandList {
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: &Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color: color.clone(),
        });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: &Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color: color.clone(),
        });
    }

    fn fill_triangle(&mut self, points: [DVec2; 3], color: &Color) {
        self.commands.push(DrawCommand::Triangle {
            points,
            color: color.clone(),
        });
    }
}
