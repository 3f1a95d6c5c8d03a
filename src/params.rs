/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that holds the settings
 * the control panel can change. Ball count, tick interval and viewport
 * size are constants and deliberately not part of it. It also provides
 * snapshot-based change detection so the app can react to UI edits.
 */

use crate::{CLAMP_MARGIN, TILT_GAIN};

// How far from the viewport edge a ball's center is kept
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundsMargin {
    // The same margin for every ball, regardless of its size
    Fixed(f32),
    // Each ball's own radius, so circles stop exactly at the edge
    Radius,
}

impl Default for BoundsMargin {
    fn default() -> Self {
        BoundsMargin::Fixed(CLAMP_MARGIN)
    }
}

// Where the tilt vector comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionMode {
    // Mouse position / arrow keys stand in for a device sensor
    #[default]
    Pointer,
    // Synthetic sensor sweeping the tilt around a circle
    Wobble,
    // A sensor that is never available
    Disabled,
}

impl MotionMode {
    pub fn label(&self) -> &'static str {
        match self {
            MotionMode::Pointer => "Pointer",
            MotionMode::Wobble => "Wobble",
            MotionMode::Disabled => "No Sensor",
        }
    }
}

// Parameters for the simulation that can be adjusted via UI
#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub tilt_gain: f32,
    pub bounds_margin: BoundsMargin,
    pub integrate_velocity: bool,
    pub velocity_damping: f32,
    pub motion_mode: MotionMode,
    pub seed: Option<u64>,
    pub show_debug: bool,
    pub pause_simulation: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
#[derive(Debug, Clone, PartialEq)]
struct ParamSnapshot {
    bounds_margin: BoundsMargin,
    integrate_velocity: bool,
    velocity_damping: f32,
    motion_mode: MotionMode,
    show_debug: bool,
    pause_simulation: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            tilt_gain: TILT_GAIN,
            bounds_margin: BoundsMargin::default(),
            integrate_velocity: false,
            velocity_damping: 0.9,
            motion_mode: MotionMode::default(),
            seed: None,
            show_debug: false,
            pause_simulation: false,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_bounds_margin(mut self, bounds_margin: BoundsMargin) -> Self {
        self.bounds_margin = bounds_margin;
        self
    }

    // Apply velocity to position each tick, damped by `damping`
    pub fn with_velocity_integration(mut self, damping: f32) -> Self {
        self.integrate_velocity = true;
        self.velocity_damping = damping;
        self
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(self.snapshot());
    }

    // Check if any parameters have changed since the last snapshot
    // Returns a tuple of (motion_mode_changed, any_ui_changed)
    pub fn detect_changes(&self) -> (bool, bool) {
        match &self.previous_values {
            Some(prev) => {
                let current = self.snapshot();
                (prev.motion_mode != current.motion_mode, *prev != current)
            }
            // If we don't have previous values, nothing has changed
            None => (false, false),
        }
    }

    fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            bounds_margin: self.bounds_margin,
            integrate_velocity: self.integrate_velocity,
            velocity_damping: self.velocity_damping,
            motion_mode: self.motion_mode,
            show_debug: self.show_debug,
            pause_simulation: self.pause_simulation,
        }
    }

    // Parse a seed such as the TILT_BALLS_SEED environment variable
    pub fn parse_seed(value: Option<&str>) -> Option<u64> {
        let value = value?.trim();
        match value.parse() {
            Ok(seed) => Some(seed),
            Err(e) => {
                log::warn!("Ignoring seed {value:?}: {e}");
                None
            }
        }
    }

    // Get parameter ranges for UI sliders
    pub fn get_velocity_damping_range() -> std::ops::RangeInclusive<f32> {
        0.0..=1.0
    }
}
