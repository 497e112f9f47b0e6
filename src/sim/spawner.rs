//! Rejection-sampling placement of random bodies
//!
//! Generate a candidate, test it against every existing body, retry up to a
//! fixed cap. Running out of attempts is a normal outcome on a crowded field.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{Body, Color};
use super::geometry::Field;
use crate::error::Result;
use crate::settings::SpawnSettings;

/// Outcome of one placement call
#[derive(Debug, Clone)]
pub struct Placement {
    /// Accepted body, if any candidate fit
    pub body: Option<Body>,
    /// Candidates generated (1..=max_attempts)
    pub attempts: u32,
}

/// Seeded generator of random, non-overlapping bodies
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    settings: SpawnSettings,
    restitution: f64,
}

impl Spawner {
    pub fn new(seed: u64, settings: SpawnSettings, restitution: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            settings,
            restitution,
        }
    }

    /// A random body fully inside `field`, ignoring other bodies
    pub fn random_body(&mut self, field: &Field) -> Result<Body> {
        let s = &self.settings;
        let radius = s
            .min_radius
            .max(self.rng.random::<f64>() * field.min_dimension() / s.radius_ratio);

        let x = Field::fit_axis(self.rng.random::<f64>() * field.width, radius, field.width);
        let y = Field::fit_axis(self.rng.random::<f64>() * field.height, radius, field.height);

        let dx = (0.5 - self.rng.random::<f64>()) * 2.0 * s.max_speed;
        let dy = (0.5 - self.rng.random::<f64>()) * 2.0 * s.max_speed;

        let color = Color::from_rgb24(self.rng.random::<u32>());

        Body::new(x, y, radius, dx, dy, color)?.with_restitution(self.restitution)
    }

    /// Try up to `max_attempts` candidates; accept the first that overlaps nothing
    pub fn place(&mut self, field: &Field, existing: &[Body]) -> Result<Placement> {
        let max_attempts = self.settings.max_attempts;
        let mut attempts = 0;

        while attempts < max_attempts {
            attempts += 1;
            let candidate = self.random_body(field)?;
            if existing.iter().all(|b| !b.overlaps(&candidate)) {
                log::debug!(
                    "Placed body {} r={:.1} after {} attempt(s)",
                    candidate.id(),
                    candidate.radius(),
                    attempts
                );
                return Ok(Placement {
                    body: Some(candidate),
                    attempts,
                });
            }
        }

        log::debug!("No free spot after {} attempts", attempts);
        Ok(Placement {
            body: None,
            attempts,
        })
    }
}
