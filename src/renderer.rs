/*
 * Renderer Module
 *
 * This module turns the simulation into a list of circle draw commands
 * (center, radius, color) in screen space and hands them to nannou's
 * Draw API every frame. It also draws the optional debug overlay and the
 * egui control panel.
 */

use nannou::color::Hsv;
use nannou::prelude::*;

use crate::app::Model;
use crate::ball::{Ball, BallId};
use crate::physics::Viewport;
use crate::ui;

// One circle to draw, in nannou screen space (origin centered, y up)
#[derive(Debug, Clone)]
pub struct DrawCommand {
    pub id: BallId,
    pub center: Vec2,
    pub radius: f32,
    pub color: Hsv,
}

pub fn draw_commands(balls: &[Ball], viewport: Viewport) -> Vec<DrawCommand> {
    balls
        .iter()
        .map(|ball| DrawCommand {
            id: ball.id,
            center: viewport.to_screen(ball.position),
            radius: ball.radius(),
            color: ball.color(),
        })
        .collect()
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    // Begin drawing
    let draw = app.draw();

    // Clear the background
    draw.background().color(WHITE);

    // Draw each ball
    for command in model.simulation.draw_commands() {
        draw.ellipse()
            .xy(command.center)
            .radius(command.radius)
            .color(command.color);
    }

    // Draw debug visualization if enabled
    if model.simulation.params().show_debug {
        draw_tilt_arrow(&draw, model);
        ui::draw_debug_info(&draw, &model.debug_info, app.window_rect());
    }

    // Finish drawing
    if let Err(e) = draw.to_frame(app, &frame) {
        log::error!("Failed to draw frame: {e:?}");
    }

    // Draw the egui UI
    if let Err(e) = model.egui.draw_to_frame(&frame) {
        log::error!("Failed to draw control panel: {e:?}");
    }
}

// Arrow from the window center showing where the balls are being pushed
fn draw_tilt_arrow(draw: &Draw, model: &Model) {
    let tilt = model.simulation.current_tilt();
    let gain = model.simulation.params().tilt_gain;

    // Screen space is y up, so the tilt maps directly
    let end = vec2(tilt.x, tilt.y) * gain * 10.0;
    if end.length() < 1.0 {
        return;
    }

    draw.arrow()
        .start(pt2(0.0, 0.0))
        .end(pt2(end.x, end.y))
        .color(rgba(0.2, 0.2, 0.2, 0.6))
        .stroke_weight(2.0);
}
