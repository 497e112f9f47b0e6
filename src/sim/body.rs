//! Circular rigid bodies and pairwise collision physics

use std::f64::consts::PI;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geometry::{distance, relative};
use crate::consts::{DENSITY, RESTITUTION};
use crate::error::{Result, SimError};

static NEXT_BODY_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque body identity.
///
/// Assigned once at construction and never derived from position or velocity,
/// so two bodies with identical state are still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(u64);

impl BodyId {
    fn next() -> Self {
        Self(NEXT_BODY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display color, CSS style (e.g. `"#1a2b3c"`). No physics effect.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(css: impl Into<String>) -> Self {
        Self(css.into())
    }

    /// `#rrggbb` from the low 24 bits
    pub fn from_rgb24(rgb: u32) -> Self {
        Self(format!("#{:06x}", rgb & 0x00ff_ffff))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A circular rigid body
#[derive(Debug, Clone, Serialize)]
pub struct Body {
    id: BodyId,
    pos: DVec2,
    vel: DVec2,
    radius: f64,
    mass: f64,
    restitution: f64,
    color: Color,
}

impl Body {
    /// Create a body at (x, y) with velocity (dx, dy); mass follows from the radius.
    pub fn new(
        x: f64,
        y: f64,
        radius: f64,
        dx: f64,
        dy: f64,
        color: impl Into<Color>,
    ) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimError::InvalidGeometry { radius });
        }
        Ok(Self::new_unchecked(
            DVec2::new(x, y),
            radius,
            DVec2::new(dx, dy),
            color.into(),
        ))
    }

    /// Caller guarantees `radius` is finite and positive
    pub(crate) fn new_unchecked(pos: DVec2, radius: f64, vel: DVec2, color: Color) -> Self {
        Self {
            id: BodyId::next(),
            pos,
            vel,
            radius,
            mass: DENSITY * PI * radius * radius,
            restitution: RESTITUTION,
            color,
        }
    }

    /// Replace the restitution coefficient (must be in [0, 1])
    pub fn with_restitution(mut self, restitution: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&restitution) {
            return Err(SimError::InvalidRestitution(restitution));
        }
        self.restitution = restitution;
        Ok(self)
    }

    #[inline]
    pub fn id(&self) -> BodyId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        self.pos
    }

    pub fn set_position(&mut self, pos: DVec2) {
        self.pos = pos;
    }

    #[inline]
    pub fn velocity(&self) -> DVec2 {
        self.vel
    }

    pub fn set_velocity(&mut self, vel: DVec2) {
        self.vel = vel;
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn set_color(&mut self, color: impl Into<Color>) {
        self.color = color.into();
    }

    /// Momentum (mass * velocity)
    pub fn momentum(&self) -> DVec2 {
        self.vel * self.mass
    }

    /// Static overlap: the circles touch or intersect.
    ///
    /// Used for placement readiness, where velocities are irrelevant.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.id != other.id && distance(self.pos, other.pos) <= self.radius + other.radius
    }

    /// Whether this pair needs a collision response this tick.
    ///
    /// The circles must touch, be closing (negative dot product of relative
    /// position and relative velocity), and still be within reach after one
    /// more tick of relative motion. Overlapping pairs that are already
    /// separating return false, so resting contact does not re-trigger.
    pub fn is_colliding(&self, other: &Body) -> bool {
        if self.id == other.id {
            return false;
        }

        let reach = self.radius + other.radius;
        if distance(self.pos, other.pos) > reach {
            return false;
        }

        let rel_p = relative(self.pos, other.pos);
        let rel_v = relative(self.vel, other.vel);

        // Zero counts as not approaching
        if rel_p.dot(rel_v) >= 0.0 {
            return false;
        }

        (rel_p + rel_v).length_squared() <= reach * reach
    }

    /// Exchange momentum with `other`.
    ///
    /// Uses this body's restitution for both updates and resolves each axis
    /// independently. Positions are left untouched.
    pub fn handle_collision(&mut self, other: &mut Body) {
        let v = self.vel;
        let v1 = other.vel;
        let m = self.mass;
        let m1 = other.mass;
        let e = self.restitution;
        let total = m + m1;

        self.vel = v + (m1 / total) * (1.0 + e) * (v1 - v);
        other.vel = v1 + (m / total) * (1.0 + e) * (v - v1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ball(x: f64, y: f64, r: f64, dx: f64, dy: f64) -> Body {
        Body::new(x, y, r, dx, dy, "#ffffff").unwrap()
    }

    #[test]
    fn test_new_computes_mass() {
        let b = ball(0.0, 0.0, 2.0, 0.0, 0.0);
        assert!((b.mass() - 4.0 * PI).abs() < 1e-12);
        assert_eq!(b.restitution(), 0.5);
    }

    #[test]
    fn test_new_rejects_bad_radius() {
        assert!(matches!(
            Body::new(0.0, 0.0, 0.0, 0.0, 0.0, "#000"),
            Err(SimError::InvalidGeometry { .. })
        ));
        assert!(Body::new(0.0, 0.0, -1.0, 0.0, 0.0, "#000").is_err());
        assert!(Body::new(0.0, 0.0, f64::INFINITY, 0.0, 0.0, "#000").is_err());
    }

    #[test]
    fn test_with_restitution_validates() {
        assert!(ball(0.0, 0.0, 1.0, 0.0, 0.0).with_restitution(1.0).is_ok());
        assert!(matches!(
            ball(0.0, 0.0, 1.0, 0.0, 0.0).with_restitution(1.2),
            Err(SimError::InvalidRestitution(_))
        ));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = ball(5.0, 5.0, 1.0, 1.0, 1.0);
        let b = ball(5.0, 5.0, 1.0, 1.0, 1.0);
        assert_ne!(a.id(), b.id());
        // Identical state is still a different body
        assert!(!a.is_colliding(&a));
        assert!(!a.overlaps(&a));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_clone_keeps_identity() {
        let a = ball(0.0, 0.0, 10.0, 1.0, 0.0);
        let c = a.clone();
        assert_eq!(a.id(), c.id());
        assert!(!a.is_colliding(&c));
    }

    #[test]
    fn test_touching_closing_pair_collides() {
        let a = ball(100.0, 100.0, 30.0, 10.0, 0.0);
        let b = ball(160.0, 100.0, 30.0, -10.0, 0.0);
        assert!(a.is_colliding(&b));
        assert!(b.is_colliding(&a));
    }

    #[test]
    fn test_overlapping_but_separating_does_not_collide() {
        let a = ball(100.0, 100.0, 30.0, -10.0, 0.0);
        let b = ball(150.0, 100.0, 30.0, 10.0, 0.0);
        assert!(a.overlaps(&b));
        assert!(!a.is_colliding(&b));
    }

    #[test]
    fn test_zero_relative_velocity_is_not_a_collision() {
        let a = ball(100.0, 100.0, 30.0, 3.0, 3.0);
        let b = ball(140.0, 100.0, 30.0, 3.0, 3.0);
        assert!(!a.is_colliding(&b));
    }

    #[test]
    fn test_far_apart_closing_pair_does_not_collide_yet() {
        let a = ball(0.0, 0.0, 10.0, 50.0, 0.0);
        let b = ball(100.0, 0.0, 10.0, -50.0, 0.0);
        assert!(!a.is_colliding(&b));
    }

    #[test]
    fn test_head_on_equal_mass_half_restitution() {
        let mut a = ball(100.0, 100.0, 30.0, 10.0, 0.0);
        let mut b = ball(160.0, 100.0, 30.0, -10.0, 0.0);
        a.handle_collision(&mut b);
        assert!((a.velocity().x - -5.0).abs() < 1e-9);
        assert!((b.velocity().x - 5.0).abs() < 1e-9);
        assert_eq!(a.velocity().y, 0.0);
        assert_eq!(b.velocity().y, 0.0);
        // Positions untouched
        assert_eq!(a.position(), DVec2::new(100.0, 100.0));
        assert_eq!(b.position(), DVec2::new(160.0, 100.0));
    }

    #[test]
    fn test_uses_own_restitution_for_both() {
        let mut a = ball(0.0, 0.0, 10.0, 4.0, 0.0).with_restitution(1.0).unwrap();
        let mut b = ball(20.0, 0.0, 10.0, -4.0, 0.0).with_restitution(0.0).unwrap();
        a.handle_collision(&mut b);
        // Elastic swap for equal masses with e = 1
        assert!((a.velocity().x - -4.0).abs() < 1e-9);
        assert!((b.velocity().x - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_inelastic_limit_reaches_common_velocity() {
        let mut a = ball(0.0, 0.0, 10.0, 6.0, -2.0).with_restitution(0.0).unwrap();
        let mut b = ball(25.0, 0.0, 15.0, -3.0, 1.0);
        let expected = (a.momentum() + b.momentum()) / (a.mass() + b.mass());
        a.handle_collision(&mut b);
        assert!((a.velocity() - expected).length() < 1e-9);
        assert!((b.velocity() - expected).length() < 1e-9);
    }

    fn coord() -> impl Strategy<Value = f64> {
        -500.0..500.0f64
    }

    fn speed() -> impl Strategy<Value = f64> {
        -20.0..20.0f64
    }

    proptest! {
        #[test]
        fn prop_elastic_collision_conserves_momentum(
            r0 in 1.0..50.0f64, r1 in 1.0..50.0f64,
            v0x in speed(), v0y in speed(), v1x in speed(), v1y in speed(),
        ) {
            let mut a = ball(0.0, 0.0, r0, v0x, v0y).with_restitution(1.0).unwrap();
            let mut b = ball(r0 + r1, 0.0, r1, v1x, v1y);
            let before = a.momentum() + b.momentum();
            a.handle_collision(&mut b);
            let after = a.momentum() + b.momentum();
            let scale = before.abs().max_element().max(1.0);
            prop_assert!((before.x - after.x).abs() <= 1e-9 * scale);
            prop_assert!((before.y - after.y).abs() <= 1e-9 * scale);
        }

        #[test]
        fn prop_separated_and_separating_never_collide(
            x0 in coord(), y0 in coord(), r0 in 1.0..40.0f64, r1 in 1.0..40.0f64,
            angle in 0.0..std::f64::consts::TAU, gap in 0.001..200.0f64,
            away in 0.0..20.0f64,
        ) {
            let dir = DVec2::new(angle.cos(), angle.sin());
            let p1 = DVec2::new(x0, y0) + dir * (r0 + r1 + gap);
            let a = ball(x0, y0, r0, 0.0, 0.0);
            let b = ball(p1.x, p1.y, r1, dir.x * away, dir.y * away);
            prop_assert!(!a.is_colliding(&b));
            prop_assert!(!b.is_colliding(&a));
        }

        #[test]
        fn prop_reversing_closing_pair_stops_collision(
            r in 5.0..40.0f64, frac in 0.01..0.5f64, overlap in 0.0..0.9f64,
            angle in 0.0..std::f64::consts::TAU,
        ) {
            // Slow enough that the pair cannot pass through each other in one tick
            let speed = r * frac;
            let dir = DVec2::new(angle.cos(), angle.sin());
            let sep = 2.0 * r * (1.0 - overlap * 0.5);
            let a = ball(0.0, 0.0, r, dir.x * speed, dir.y * speed);
            let b = ball(dir.x * sep, dir.y * sep, r, -dir.x * speed, -dir.y * speed);
            prop_assert!(a.is_colliding(&b));

            let mut ra = a.clone();
            let mut rb = b.clone();
            ra.set_velocity(-a.velocity());
            rb.set_velocity(-b.velocity());
            prop_assert!(!ra.is_colliding(&rb));
        }
    }
}
