/*
 * Input Module
 *
 * This module turns desktop input into tilt readings, standing in for a
 * device motion sensor:
 * - Mouse position relative to the window center tilts toward the pointer
 * - Arrow keys, while held, tilt fully along their axis and take priority
 *
 * Window events arrive on the same thread that runs simulation ticks, so
 * writes and reads of the tilt are serialized without extra coordination.
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use nannou::prelude::*;

use crate::app::Model;
use crate::motion::{MotionSource, MotionStatus, Tilt, TiltCell};

// Shared handle the window callbacks use to publish pointer tilt
#[derive(Debug, Clone)]
pub struct PointerFeed {
    cell: TiltCell,
    active: Arc<AtomicBool>,
}

impl PointerFeed {
    pub fn new(cell: TiltCell) -> Self {
        Self {
            cell,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    // A motion source that gates this feed
    pub fn source(&self) -> PointerMotionSource {
        PointerMotionSource { feed: self.clone() }
    }

    // Publish a reading; ignored while the pointer source is stopped
    pub fn deliver(&self, tilt: Tilt) -> bool {
        if self.active.load(Ordering::SeqCst) {
            self.cell.store(tilt);
            true
        } else {
            false
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

pub struct PointerMotionSource {
    feed: PointerFeed,
}

impl MotionSource for PointerMotionSource {
    fn start(&mut self) {
        if !self.feed.active.swap(true, Ordering::SeqCst) {
            log::info!("pointer: started");
        }
    }

    fn stop(&mut self) {
        if self.feed.active.swap(false, Ordering::SeqCst) {
            log::info!("pointer: stopped");
        }
    }

    fn status(&self) -> MotionStatus {
        if self.feed.is_active() {
            MotionStatus::Running
        } else {
            MotionStatus::Stopped
        }
    }

    fn name(&self) -> &'static str {
        "pointer"
    }
}

impl Drop for PointerMotionSource {
    fn drop(&mut self) {
        self.stop();
    }
}

// Raw input state that the tilt is derived from
#[derive(Debug, Clone, Copy, Default)]
pub struct TiltInput {
    pointer: Tilt,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl TiltInput {
    // Record a pointer position given in screen space (origin centered, y up)
    pub fn set_pointer(&mut self, position: Vec2, window_rect: Rect) {
        let half_w = window_rect.w() / 2.0;
        let half_h = window_rect.h() / 2.0;
        if half_w <= 0.0 || half_h <= 0.0 {
            return;
        }

        self.pointer = Tilt::new(
            (position.x / half_w).clamp(-1.0, 1.0),
            (position.y / half_h).clamp(-1.0, 1.0),
        );
    }

    // Returns true if the key is one of the tilt keys
    pub fn set_key(&mut self, key: Key, pressed: bool) -> bool {
        match key {
            Key::Left | Key::A => self.left = pressed,
            Key::Right | Key::D => self.right = pressed,
            Key::Up | Key::W => self.up = pressed,
            Key::Down | Key::S => self.down = pressed,
            _ => return false,
        }
        true
    }

    pub fn current(&self) -> Tilt {
        let x = axis(self.left, self.right);
        let y = axis(self.down, self.up);

        if x == 0.0 && y == 0.0 {
            self.pointer
        } else {
            Tilt::new(x, y)
        }
    }
}

fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

// Mouse moved event handler
pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    // Ignore the pointer while it is over the control panel
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }

    model.input.set_pointer(pos, app.window_rect());
    model.pointer.deliver(model.input.current());
}

// Key pressed event handler
pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if model.input.set_key(key, true) {
        model.pointer.deliver(model.input.current());
    }
}

// Key released event handler
pub fn key_released(_app: &App, model: &mut Model, key: Key) {
    if model.input.set_key(key, false) {
        model.pointer.deliver(model.input.current());
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
