/*
 * Tilt Balls - Module Definitions
 *
 * This file defines the module structure for the tilt-driven ball demo.
 * A fixed set of colored circles is nudged by a live tilt vector and kept
 * apart by a pairwise separation pass run on a fixed timer tick.
 */

// Re-export key components for easier access
pub use ball::{Ball, BallId};
pub use debug::DebugInfo;
pub use motion::{MotionError, MotionSource, MotionStatus, Tilt, TiltCell, TiltSensor};
pub use params::{BoundsMargin, MotionMode, SimulationParams};
pub use physics::{StepStats, Viewport};
pub use renderer::DrawCommand;
pub use simulation::Simulation;
pub use ticker::Ticker;

// Define modules
pub mod app;
pub mod ball;
pub mod debug;
pub mod input;
pub mod motion;
pub mod params;
pub mod physics;
pub mod renderer;
pub mod simulation;
pub mod ticker;
pub mod ui;

use std::time::Duration;

// Constants
pub const BALL_COUNT: usize = 50;
pub const TILT_GAIN: f32 = 10.0;
pub const TICK_INTERVAL: Duration = Duration::from_millis(30);
pub const SENSOR_INTERVAL: Duration = Duration::from_millis(30);
pub const CLAMP_MARGIN: f32 = 25.0;
pub const MAX_CATCH_UP_TICKS: u32 = 8;

// Spawn ranges, relative to the viewport edges
pub const SPAWN_MIN_X: f32 = 20.0;
pub const SPAWN_MIN_Y: f32 = 50.0;
pub const SPAWN_EDGE_INSET: f32 = 50.0;
pub const MIN_BALL_SIZE: f32 = 20.0;
pub const MAX_BALL_SIZE: f32 = 50.0;

pub const WINDOW_WIDTH: u32 = 430;
pub const WINDOW_HEIGHT: u32 = 860;
