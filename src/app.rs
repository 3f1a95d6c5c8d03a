/*
 * Application Module
 *
 * This module defines the main application model and logic for the demo.
 * It handles initialization, the per-frame update and teardown.
 *
 * The simulation runs on a fixed 30 ms tick driven from the frame loop,
 * independent of both the frame rate and the motion source's own rate.
 * Closing the window stops the tick timer and the motion source together.
 */

use nannou::prelude::*;
use nannou_egui::Egui;

use crate::debug::DebugInfo;
use crate::input::{self, PointerFeed, TiltInput};
use crate::motion::{MotionSource, NullSensor, SensorMotionSource, TiltCell, WobbleSensor};
use crate::params::{MotionMode, SimulationParams};
use crate::physics::Viewport;
use crate::renderer;
use crate::simulation::Simulation;
use crate::ui;
use crate::{SENSOR_INTERVAL, WINDOW_HEIGHT, WINDOW_WIDTH};

// Main model for the application
pub struct Model {
    pub simulation: Simulation,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub pointer: PointerFeed,
    pub input: TiltInput,
}

// Build the motion source for a mode, publishing into `cell`
pub fn motion_source_for(mode: MotionMode, pointer: &PointerFeed, cell: TiltCell) -> Box<dyn MotionSource> {
    match mode {
        MotionMode::Pointer => Box::new(pointer.source()),
        MotionMode::Wobble => Box::new(SensorMotionSource::new(
            "wobble",
            WobbleSensor::default(),
            cell,
            SENSOR_INTERVAL,
        )),
        MotionMode::Disabled => Box::new(SensorMotionSource::new("sensor", NullSensor, cell, SENSOR_INTERVAL)),
    }
}

// Initialize the model
pub fn model(app: &App) -> Model {
    // Create the main window; the viewport is fixed once the simulation starts
    let window_id = match app
        .new_window()
        .title("Tilt Balls")
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .resizable(false)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .key_pressed(input::key_pressed)
        .key_released(input::key_released)
        .raw_event(input::raw_window_event)
        .closed(window_closed)
        .build()
    {
        Ok(id) => id,
        Err(e) => {
            log::error!("Failed to create window: {e:?}");
            std::process::exit(1);
        }
    };

    // Get the window
    let Some(window) = app.window(window_id) else {
        log::error!("Window {window_id:?} disappeared right after creation");
        std::process::exit(1);
    };

    // Create the UI
    let egui = Egui::from_window(&window);

    let rect = window.rect();
    let viewport = Viewport::new(rect.w(), rect.h());

    // Create simulation parameters; TILT_BALLS_SEED makes spawns reproducible
    let seed = SimulationParams::parse_seed(std::env::var("TILT_BALLS_SEED").ok().as_deref());
    let params = SimulationParams::default().with_seed(seed);

    let tilt = TiltCell::new();
    let pointer = PointerFeed::new(tilt.clone());
    let motion = motion_source_for(params.motion_mode, &pointer, tilt.clone());

    let mut simulation = Simulation::new(viewport, params, motion, tilt);
    simulation.start();

    Model {
        simulation,
        egui,
        debug_info: DebugInfo::default(),
        pointer,
        input: TiltInput::default(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    model.egui.set_elapsed_time(update.since_start);

    // Update UI and check what needs to react
    let (should_respawn, motion_changed, ui_changed) =
        ui::update_ui(&mut model.egui, model.simulation.params_mut(), &model.debug_info);

    if ui_changed {
        log::debug!("Parameters changed: {:?}", model.simulation.params());
    }

    if motion_changed {
        let mode = model.simulation.params().motion_mode;
        let source = motion_source_for(mode, &model.pointer, model.simulation.tilt_cell());
        model.simulation.replace_motion_source(source);
    }

    if should_respawn {
        model.simulation.respawn();
    }

    // Run the fixed-interval ticks that are due
    let ticks = model.simulation.advance(update.since_last);
    model.debug_info.record(&model.simulation, ticks);
}

// The window is gone: stop the tick timer and the motion source
fn window_closed(_app: &App, model: &mut Model) {
    model.simulation.stop();
}

// Application exit
pub fn exit(_app: &App, mut model: Model) {
    model.simulation.stop();
    log::info!("Exiting after {} ticks", model.simulation.tick_count());
}
