/*
 * Ball Module
 *
 * This module defines the Ball struct: a colored circle with a stable
 * identity, a position in viewport coordinates (origin top-left, y down),
 * a fixed size and a velocity that is only accumulated by overlap
 * resolution unless velocity integration is enabled.
 */

use nannou::color::{hsv, Hsv};
use nannou::prelude::*;
use rand::Rng;

use crate::physics::Viewport;
use crate::{MAX_BALL_SIZE, MIN_BALL_SIZE, SPAWN_EDGE_INSET, SPAWN_MIN_X, SPAWN_MIN_Y};

const SATURATION: f32 = 0.5;
const BRIGHTNESS: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BallId(pub u32);

#[derive(Debug, Clone)]
pub struct Ball {
    pub id: BallId,
    pub position: Vec2,
    /// Diameter. Never changes after creation.
    pub size: f32,
    /// Hue in 0..1; saturation and brightness are fixed.
    pub hue: f32,
    pub velocity: Vec2,
}

impl Ball {
    pub fn new(id: BallId, position: Vec2, size: f32, hue: f32) -> Self {
        Self {
            id,
            position,
            size,
            hue,
            velocity: Vec2::ZERO,
        }
    }

    // Create a ball with a random position, size and hue inside the viewport
    pub fn random<R: Rng + ?Sized>(id: BallId, viewport: Viewport, rng: &mut R) -> Self {
        let x = spawn_coord(rng, SPAWN_MIN_X, viewport.width - SPAWN_EDGE_INSET);
        let y = spawn_coord(rng, SPAWN_MIN_Y, viewport.height - SPAWN_EDGE_INSET);
        let size = rng.gen_range(MIN_BALL_SIZE..=MAX_BALL_SIZE);
        let hue = rng.gen_range(0.0..=1.0);

        Self::new(id, vec2(x, y), size, hue)
    }

    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    pub fn color(&self) -> Hsv {
        hsv(self.hue, SATURATION, BRIGHTNESS)
    }
}

// Create `count` random balls with ids starting at zero
pub fn spawn_balls<R: Rng + ?Sized>(count: usize, viewport: Viewport, rng: &mut R) -> Vec<Ball> {
    (0..count)
        .map(|i| Ball::random(BallId(i as u32), viewport, rng))
        .collect()
}

// A window smaller than the spawn insets collapses the range to its lower end
fn spawn_coord<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..=high)
    } else {
        low
    }
}
