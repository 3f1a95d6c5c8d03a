/*
 * Physics Module
 *
 * This module advances the balls by one discrete tick:
 * 1. Tilt translation: every ball moves by the tilt vector times a gain,
 *    with the y-axis inverted so a positive tilt.y moves balls up
 * 2. Bounds clamping against the viewport, using a margin
 * 3. Pairwise overlap resolution: overlapping circles are pushed apart
 *    along the line between their centers, half the overlap each
 * 4. Removal of zero-size balls (never triggers, kept as a guard)
 *
 * Overlap resolution is a single pass. With many simultaneous overlaps a
 * tick does not fully separate everything; it converges over later ticks.
 */

use nannou::prelude::*;

use crate::ball::Ball;
use crate::motion::Tilt;
use crate::params::{BoundsMargin, SimulationParams};

// Velocity nudge applied to both balls of a resolved pair
const SEPARATION_NUDGE: f32 = 0.1;

// Direction used when two centers coincide and the angle is undefined
const COINCIDENT_DIRECTION: Vec2 = Vec2::X;

// Viewport bounds, fixed when the simulation starts.
// Coordinates have their origin at the top-left corner with y growing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    // Convert a viewport position to nannou screen space (origin centered, y up)
    pub fn to_screen(&self, position: Vec2) -> Vec2 {
        vec2(position.x - self.width / 2.0, self.height / 2.0 - position.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub overlaps_resolved: usize,
    pub removed: usize,
}

// Advance all balls by one tick
pub fn step(balls: &mut Vec<Ball>, tilt: Tilt, viewport: Viewport, params: &SimulationParams) -> StepStats {
    apply_tilt(balls, tilt, viewport, params);

    let overlaps_resolved = resolve_overlaps(balls);

    // Overlap pushes can cross the margin, so clamp once more
    for ball in balls.iter_mut() {
        clamp_to_bounds(ball, viewport, params.bounds_margin);
    }

    if params.integrate_velocity {
        for ball in balls.iter_mut() {
            ball.velocity *= params.velocity_damping;
        }
    }

    let removed = remove_collapsed(balls);

    StepStats {
        overlaps_resolved,
        removed,
    }
}

// Translate every ball by the tilt, then clamp it into the viewport
pub fn apply_tilt(balls: &mut [Ball], tilt: Tilt, viewport: Viewport, params: &SimulationParams) {
    let offset = tilt_offset(tilt, params.tilt_gain);

    for ball in balls.iter_mut() {
        ball.position += offset;
        if params.integrate_velocity {
            ball.position += ball.velocity;
        }
        clamp_to_bounds(ball, viewport, params.bounds_margin);
    }
}

// Displacement for one tick. Screen y grows downward, tilt y grows upward.
pub fn tilt_offset(tilt: Tilt, gain: f32) -> Vec2 {
    vec2(tilt.x * gain, -tilt.y * gain)
}

pub fn clamp_to_bounds(ball: &mut Ball, viewport: Viewport, margin: BoundsMargin) {
    let margin = match margin {
        BoundsMargin::Fixed(margin) => margin,
        BoundsMargin::Radius => ball.radius(),
    };

    // max(min(..)) rather than f32::clamp: a viewport narrower than twice
    // the margin pins to the margin instead of panicking
    ball.position.x = margin.max((viewport.width - margin).min(ball.position.x));
    ball.position.y = margin.max((viewport.height - margin).min(ball.position.y));
}

// Push apart every overlapping pair once. Returns the number of pairs moved.
pub fn resolve_overlaps(balls: &mut [Ball]) -> usize {
    let mut resolved = 0;

    for j in 1..balls.len() {
        let (before, rest) = balls.split_at_mut(j);
        let b = &mut rest[0];

        for a in before.iter_mut() {
            if separate(a, b) {
                resolved += 1;
            }
        }
    }

    resolved
}

// Separate a single pair if their circles overlap
pub fn separate(a: &mut Ball, b: &mut Ball) -> bool {
    let delta = b.position - a.position;
    let distance = delta.length();
    let min_distance = (a.size + b.size) / 2.0;

    if distance >= min_distance {
        return false;
    }

    let overlap = min_distance - distance;
    let direction = if distance > f32::EPSILON {
        delta / distance
    } else {
        COINCIDENT_DIRECTION
    };

    let push = direction * (overlap / 2.0);
    a.position -= push;
    b.position += push;

    a.velocity -= direction * SEPARATION_NUDGE;
    b.velocity += direction * SEPARATION_NUDGE;

    true
}

// Drop balls whose size has collapsed to zero. Returns how many were removed.
pub fn remove_collapsed(balls: &mut Vec<Ball>) -> usize {
    let before = balls.len();
    balls.retain(|ball| ball.size != 0.0);
    before - balls.len()
}
