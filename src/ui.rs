/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides the control panel and the on-canvas debug
 * overlay. Parameter change detection is handled by SimulationParams.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{BoundsMargin, MotionMode, SimulationParams};
use crate::CLAMP_MARGIN;

// Update the UI and return whether balls should be respawned, the motion
// source changed, and if any UI changes occurred
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
) -> (bool, bool, bool) {
    let mut should_respawn = false;

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Motion Source", |ui| {
                for mode in [MotionMode::Pointer, MotionMode::Wobble, MotionMode::Disabled] {
                    ui.radio_value(&mut params.motion_mode, mode, mode.label());
                }
                ui.label("Pointer: move the mouse or hold the arrow keys");
                ui.label(format!(
                    "Tilt: ({:+.2}, {:+.2}) via {} ({})",
                    debug_info.tilt.x,
                    debug_info.tilt.y,
                    debug_info.motion_name,
                    debug_info.motion_status.label()
                ));
            });

            ui.collapsing("Physics", |ui| {
                let mut per_ball_radius = params.bounds_margin == BoundsMargin::Radius;
                if ui.checkbox(&mut per_ball_radius, "Clamp at each ball's radius").changed() {
                    params.bounds_margin = margin_for(per_ball_radius);
                }

                ui.checkbox(&mut params.integrate_velocity, "Integrate Velocity");
                ui.add_enabled(
                    params.integrate_velocity,
                    egui::Slider::new(&mut params.velocity_damping, SimulationParams::get_velocity_damping_range())
                        .text("Velocity Damping"),
                );

                if ui.button("Reset Balls").clicked() {
                    should_respawn = true;
                }
            });

            ui.separator();

            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Ticks: {}", debug_info.total_ticks));
            ui.label(format!("Balls: {}", debug_info.ball_count));

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    // Detect parameter changes
    let (motion_changed, ui_changed) = params.detect_changes();

    (should_respawn, motion_changed, ui_changed)
}

fn margin_for(per_ball_radius: bool) -> BoundsMargin {
    if per_ball_radius {
        BoundsMargin::Radius
    } else {
        BoundsMargin::Fixed(CLAMP_MARGIN)
    }
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    let lines = debug_info.lines();

    // Create a background panel in the bottom-left corner, clear of the controls
    let margin = 12.0;
    let line_height = 18.0;
    let panel_width = 210.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.bottom() + panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.left() + margin;
    let text_y = window_rect.bottom() + panel_height - margin;

    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        draw.text(text)
            .x_y(text_x + 90.0, y)
            .w(180.0)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(13);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_toggle_switches_between_modes() {
        assert_eq!(margin_for(true), BoundsMargin::Radius);
        assert_eq!(margin_for(false), BoundsMargin::Fixed(CLAMP_MARGIN));
    }

    #[test]
    fn debug_overlay_lists_every_metric() {
        let lines = DebugInfo::default().lines();
        assert_eq!(lines.len(), 7);
        assert!(lines[5].starts_with("Tilt: "));
    }
}
