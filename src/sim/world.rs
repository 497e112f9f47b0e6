//! The simulation world
//!
//! Owns every body, the field bounds, the cue and the selection. All mutation
//! goes through `&mut self`; a host that shares a `World` across threads must
//! serialize access itself (one lock per tick).

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId, Color};
use super::geometry::{Field, box_contains};
use super::spawner::Spawner;
use crate::error::Result;
use crate::settings::SimSettings;

/// What the pointer does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    /// Clicks select bodies; the cue is inert
    #[default]
    Selection,
    /// The pointer is a body that strikes others
    Cue,
}

impl InteractionMode {
    pub fn toggled(self) -> Self {
        match self {
            InteractionMode::Selection => InteractionMode::Cue,
            InteractionMode::Cue => InteractionMode::Selection,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionMode::Selection => "Selection",
            InteractionMode::Cue => "Cue",
        }
    }
}

/// Read-only view of a world for a frame driver
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub field: Field,
    pub mode: InteractionMode,
    pub cue_position: DVec2,
    pub cue_velocity: DVec2,
    pub cue_radius: f64,
    pub selected: Option<BodyId>,
    pub bodies: Vec<Body>,
}

/// Color of the synthesized cue body (never drawn)
const CUE_BODY_COLOR: &str = "blue";

/// The field and everything in it
#[derive(Debug, Clone)]
pub struct World {
    field: Field,
    friction: f64,
    cue_radius: f64,
    cue_strength: f64,
    cue_pos: DVec2,
    cue_vel: DVec2,
    mode: InteractionMode,
    /// Insertion order is iteration order
    bodies: Vec<Body>,
    /// Weak reference, resolved by id on every access
    selected: Option<BodyId>,
    spawner: Spawner,
    time_ticks: u64,
}

impl World {
    /// Empty world of the given size with default tuning
    pub fn new(width: f64, height: f64) -> Result<Self> {
        Self::from_settings(&SimSettings::with_field(width, height))
    }

    pub fn from_settings(settings: &SimSettings) -> Result<Self> {
        settings.validate()?;
        let field = Field::new(settings.field_width, settings.field_height)?;

        log::info!(
            "World {}x{} (friction={}, cue r={} strength={}, seed={})",
            field.width,
            field.height,
            settings.friction,
            settings.cue_radius,
            settings.cue_strength,
            settings.seed
        );

        Ok(Self {
            field,
            friction: settings.friction,
            cue_radius: settings.cue_radius,
            cue_strength: settings.cue_strength,
            // Parked off-field so it cannot touch anything
            cue_pos: DVec2::splat(-settings.cue_radius),
            cue_vel: DVec2::ZERO,
            mode: InteractionMode::default(),
            bodies: Vec::new(),
            selected: None,
            spawner: Spawner::new(settings.seed, settings.spawn.clone(), settings.restitution),
            time_ticks: 0,
        })
    }

    // === Accessors ===

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id() == id)
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn cue_position(&self) -> DVec2 {
        self.cue_pos
    }

    pub fn cue_velocity(&self) -> DVec2 {
        self.cue_vel
    }

    pub fn cue_radius(&self) -> f64 {
        self.cue_radius
    }

    pub fn cue_strength(&self) -> f64 {
        self.cue_strength
    }

    // === Pointer input ===

    pub fn set_cue_position(&mut self, x: f64, y: f64) {
        self.cue_pos = DVec2::new(x, y);
    }

    pub fn set_cue_velocity(&mut self, dx: f64, dy: f64) {
        self.cue_vel = DVec2::new(dx, dy);
    }

    pub fn set_interaction_mode(&mut self, mode: InteractionMode) {
        if mode != self.mode {
            log::debug!("Interaction mode: {}", mode.as_str());
        }
        self.mode = mode;
    }

    pub fn toggle_interaction_mode(&mut self) -> InteractionMode {
        self.set_interaction_mode(self.mode.toggled());
        self.mode
    }

    /// The pointer as a finite-mass body, built fresh for each check.
    ///
    /// Its velocity is the pointer velocity scaled by the cue strength.
    pub fn cue_body(&self) -> Body {
        Body::new_unchecked(
            self.cue_pos,
            self.cue_radius,
            self.cue_vel * self.cue_strength,
            Color::new(CUE_BODY_COLOR),
        )
    }

    // === Population ===

    /// Insert a body if it overlaps nothing already in the field
    pub fn add_body(&mut self, body: Body) -> Option<BodyId> {
        let id = body.id();
        if self.body(id).is_some() {
            log::warn!("Body {} is already in the world", id);
            return None;
        }
        if self.bodies.iter().any(|b| b.overlaps(&body)) {
            log::debug!("Body {} rejected: overlaps an existing body", id);
            return None;
        }
        self.bodies.push(body);
        log::debug!("Added body {} ({} total)", id, self.bodies.len());
        Some(id)
    }

    /// Best-effort random placement; `None` when the field has no room
    pub fn add_random_ball(&mut self) -> Option<BodyId> {
        match self.spawner.place(&self.field, &self.bodies) {
            Ok(placement) => {
                let body = placement.body?;
                let id = body.id();
                self.bodies.push(body);
                log::info!("Random body {} placed ({} total)", id, self.bodies.len());
                Some(id)
            }
            Err(e) => {
                log::warn!("Random placement failed: {}", e);
                None
            }
        }
    }

    /// Remove a body, clearing the selection if it pointed at it
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let index = self.bodies.iter().position(|b| b.id() == id)?;
        let body = self.bodies.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        log::info!("Removed body {} ({} left)", id, self.bodies.len());
        Some(body)
    }

    // === Selection ===

    /// Select the first body whose bounding box holds the pointer (Selection mode only)
    pub fn select_clicked(&mut self) {
        if self.mode != InteractionMode::Selection {
            return;
        }

        let pointer = self.cue_pos;
        self.selected = self
            .bodies
            .iter()
            .find(|b| box_contains(b.position(), b.radius(), pointer))
            .map(Body::id);

        match self.selected {
            Some(id) => log::debug!("Selected body {}", id),
            None => log::debug!("Selection cleared"),
        }
    }

    pub fn selected_body(&self) -> Option<&Body> {
        self.selected.and_then(|id| self.body(id))
    }

    pub fn selected_id(&self) -> Option<BodyId> {
        self.selected_body().map(Body::id)
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Recolor the selected body; returns false when nothing is selected
    pub fn set_selected_color(&mut self, color: impl Into<Color>) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        match self.bodies.iter_mut().find(|b| b.id() == id) {
            Some(body) => {
                body.set_color(color);
                log::debug!("Body {} recolored to {}", id, body.color());
                true
            }
            None => false,
        }
    }

    // === Simulation ===

    /// Advance one tick.
    ///
    /// Per body, in order: resolve collisions against every other body (and
    /// the cue in Cue mode), integrate position, apply friction, then clamp
    /// and bounce against the walls.
    pub fn update(&mut self) {
        let n = self.bodies.len();
        let cue_active = self.mode == InteractionMode::Cue;
        let mut collisions = 0u32;
        let mut cue_hits = 0u32;

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let (body, other) = pair_mut(&mut self.bodies, i, j);
                    if body.is_colliding(other) {
                        body.handle_collision(other);
                        collisions += 1;
                    }
                }

                // Cue is tested once per scanned pair
                if cue_active && self.ball_to_cue(i) {
                    cue_hits += 1;
                }
            }

            let friction = self.friction;
            let body = &mut self.bodies[i];

            body.set_position(body.position() + body.velocity());
            body.set_velocity(body.velocity() * (1.0 - friction));

            resolve_border(body, &self.field);
        }

        self.time_ticks += 1;
        log::trace!(
            "Tick {}: {} bodies, {} collisions, {} cue hits",
            self.time_ticks,
            n,
            collisions,
            cue_hits
        );
    }

    /// Strike body `index` with a fresh cue body; true on contact
    fn ball_to_cue(&mut self, index: usize) -> bool {
        let mut cue = self.cue_body();
        let body = &mut self.bodies[index];
        if body.is_colliding(&cue) {
            body.handle_collision(&mut cue);
            true
        } else {
            false
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            field: self.field,
            mode: self.mode,
            cue_position: self.cue_pos,
            cue_velocity: self.cue_vel,
            cue_radius: self.cue_radius,
            selected: self.selected_id(),
            bodies: self.bodies.clone(),
        }
    }
}

/// Two distinct bodies borrowed mutably at once
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

/// Clamp a body back inside the field and bounce it off the walls it touches.
///
/// A velocity component is reflected (and scaled by restitution) only when it
/// still points into the wall, so clamping an already clamped body is a no-op.
pub fn resolve_border(body: &mut Body, field: &Field) {
    let r = body.radius();
    let e = body.restitution();
    let DVec2 { x, y } = body.position();
    let mut pos = body.position();
    let mut vel = body.velocity();

    let mut bounce_x = false;
    let mut bounce_y = false;

    // Right
    if x + r >= field.width {
        pos.x = field.width - r;
        bounce_x |= vel.x > 0.0;
    }
    // Left
    if x - r <= 0.0 {
        pos.x = r;
        bounce_x |= vel.x < 0.0;
    }
    // Top
    if y - r <= 0.0 {
        pos.y = r;
        bounce_y |= vel.y < 0.0;
    }
    // Bottom
    if y + r >= field.height {
        pos.y = field.height - r;
        bounce_y |= vel.y > 0.0;
    }

    if bounce_x {
        vel.x = -vel.x * e;
    }
    if bounce_y {
        vel.y = -vel.y * e;
    }

    body.set_position(pos);
    body.set_velocity(vel);
}
