/*
 * Tilt Balls
 *
 * A fixed set of colored circles drifts with the tilt vector and is kept
 * apart by a pairwise separation pass run every 30 ms. On desktop the tilt
 * comes from the mouse position or the arrow keys; a synthetic wobble
 * sensor and a missing-sensor mode can be selected from the control panel.
 *
 * Logging is configured through RUST_LOG (default: info).
 */

use tilt_balls::app;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    nannou::app(app::model)
        .update(app::update)
        .exit(app::exit)
        .run();
}
