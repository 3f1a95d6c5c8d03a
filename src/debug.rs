/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and simulation state to be displayed in the overlay and control panel.
 */

use std::time::Duration;

use crate::motion::{MotionStatus, Tilt};
use crate::simulation::Simulation;

// Debug information to display
#[derive(Debug, Clone)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks_this_frame: u32,
    pub total_ticks: u64,
    pub overlaps_last_tick: usize,
    pub ball_count: usize,
    pub tilt: Tilt,
    pub motion_name: &'static str,
    pub motion_status: MotionStatus,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            ticks_this_frame: 0,
            total_ticks: 0,
            overlaps_last_tick: 0,
            ball_count: 0,
            tilt: Tilt::ZERO,
            motion_name: "none",
            motion_status: MotionStatus::Stopped,
        }
    }
}

impl DebugInfo {
    // Refresh the simulation-derived fields after a frame's ticks ran
    pub fn record(&mut self, simulation: &Simulation, ticks_this_frame: u32) {
        self.ticks_this_frame = ticks_this_frame;
        self.total_ticks = simulation.tick_count();
        self.overlaps_last_tick = simulation.last_stats().overlaps_resolved;
        self.ball_count = simulation.balls().len();
        self.tilt = simulation.current_tilt();
        self.motion_name = simulation.motion_name();
        self.motion_status = simulation.motion_status();
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Ticks: {} (+{})", self.total_ticks, self.ticks_this_frame),
            format!("Balls: {}", self.ball_count),
            format!("Overlaps: {}", self.overlaps_last_tick),
            format!("Tilt: ({:+.2}, {:+.2})", self.tilt.x, self.tilt.y),
            format!("Motion: {} ({})", self.motion_name, self.motion_status.label()),
        ]
    }
}
