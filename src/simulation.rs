/*
 * Simulation Module
 *
 * Owns everything a running demo needs: the balls, the parameters, the
 * viewport captured at start, the shared tilt cell, the motion source and
 * the tick timer. Starting and stopping are tied together so that the
 * timer and the motion source always share one lifetime.
 */

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::ball::{spawn_balls, Ball};
use crate::motion::{MotionSource, MotionStatus, Tilt, TiltCell};
use crate::params::SimulationParams;
use crate::physics::{self, StepStats, Viewport};
use crate::renderer::{self, DrawCommand};
use crate::ticker::Ticker;
use crate::{BALL_COUNT, MAX_CATCH_UP_TICKS, TICK_INTERVAL};

pub struct Simulation {
    balls: Vec<Ball>,
    params: SimulationParams,
    viewport: Viewport,
    tilt: TiltCell,
    motion: Box<dyn MotionSource>,
    ticker: Ticker,
    rng: StdRng,
    tick_count: u64,
    last_stats: StepStats,
}

impl Simulation {
    pub fn new(
        viewport: Viewport,
        params: SimulationParams,
        motion: Box<dyn MotionSource>,
        tilt: TiltCell,
    ) -> Self {
        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let balls = spawn_balls(BALL_COUNT, viewport, &mut rng);

        log::info!(
            "Created {} balls in a {:.0}x{:.0} viewport",
            balls.len(),
            viewport.width,
            viewport.height
        );

        Self {
            balls,
            params,
            viewport,
            tilt,
            motion,
            ticker: Ticker::new(TICK_INTERVAL, MAX_CATCH_UP_TICKS),
            rng,
            tick_count: 0,
            last_stats: StepStats::default(),
        }
    }

    pub fn start(&mut self) {
        if self.ticker.is_running() {
            return;
        }

        self.motion.start();
        self.ticker.start();
        log::info!(
            "Simulation started: tick every {:?}, motion source '{}' is {}",
            self.ticker.interval(),
            self.motion.name(),
            self.motion.status().label()
        );
    }

    // Stop the timer and the motion source. Safe to call any number of times.
    pub fn stop(&mut self) {
        let was_running = self.ticker.is_running();

        self.ticker.stop();
        self.motion.stop();

        if was_running {
            log::info!("Simulation stopped after {} ticks", self.tick_count);
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    // Run every tick that is due after `elapsed` of frame time
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.params.pause_simulation {
            return 0;
        }

        let ticks = self.ticker.advance(elapsed);
        for _ in 0..ticks {
            self.tick();
        }
        ticks
    }

    // One simulation step using the latest tilt reading
    pub fn tick(&mut self) -> StepStats {
        let tilt = self.tilt.load();
        self.last_stats = physics::step(&mut self.balls, tilt, self.viewport, &self.params);
        self.tick_count += 1;
        self.last_stats
    }

    pub fn respawn(&mut self) {
        self.balls = spawn_balls(BALL_COUNT, self.viewport, &mut self.rng);
        log::info!("Respawned {} balls", self.balls.len());
    }

    // Swap in a new motion source, keeping the running state
    pub fn replace_motion_source(&mut self, motion: Box<dyn MotionSource>) {
        self.motion.stop();
        let previous = self.motion.name();
        self.motion = motion;

        if self.ticker.is_running() {
            self.motion.start();
        }

        log::info!("Motion source switched from '{}' to '{}'", previous, self.motion.name());
    }

    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        renderer::draw_commands(&self.balls, self.viewport)
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn balls_mut(&mut self) -> &mut Vec<Ball> {
        &mut self.balls
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut SimulationParams {
        &mut self.params
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn tilt_cell(&self) -> TiltCell {
        self.tilt.clone()
    }

    pub fn current_tilt(&self) -> Tilt {
        self.tilt.load()
    }

    pub fn motion_status(&self) -> MotionStatus {
        self.motion.status()
    }

    pub fn motion_name(&self) -> &'static str {
        self.motion.name()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn last_stats(&self) -> StepStats {
        self.last_stats
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::BallId;
    use crate::input::PointerFeed;
    use crate::motion::{NullSensor, SensorMotionSource};
    use nannou::prelude::*;

    fn seeded_params() -> SimulationParams {
        SimulationParams::default().with_seed(Some(9))
    }

    fn pointer_simulation() -> (Simulation, PointerFeed) {
        let cell = TiltCell::new();
        let feed = PointerFeed::new(cell.clone());
        let sim = Simulation::new(
            Viewport::new(400.0, 800.0),
            seeded_params(),
            Box::new(feed.source()),
            cell,
        );
        (sim, feed)
    }

    #[test]
    fn spawns_fixed_ball_count() {
        let (sim, _) = pointer_simulation();
        assert_eq!(sim.balls().len(), BALL_COUNT);
    }

    #[test]
    fn start_and_stop_share_a_lifetime() {
        let (mut sim, feed) = pointer_simulation();
        assert!(!sim.is_running());
        assert!(!feed.is_active());

        sim.start();
        assert!(sim.is_running());
        assert_eq!(sim.motion_status(), MotionStatus::Running);

        sim.stop();
        sim.stop();
        assert!(!sim.is_running());
        assert_eq!(sim.motion_status(), MotionStatus::Stopped);
        assert!(!feed.is_active());
    }

    #[test]
    fn advance_runs_due_ticks_only_while_running() {
        let (mut sim, _) = pointer_simulation();
        assert_eq!(sim.advance(Duration::from_millis(90)), 0);

        sim.start();
        assert_eq!(sim.advance(Duration::from_millis(90)), 3);
        assert_eq!(sim.tick_count(), 3);
        assert_eq!(sim.balls().len(), BALL_COUNT);
    }

    #[test]
    fn pause_holds_the_world() {
        let (mut sim, _) = pointer_simulation();
        sim.start();
        sim.params_mut().pause_simulation = true;

        assert_eq!(sim.advance(Duration::from_millis(300)), 0);
        assert_eq!(sim.tick_count(), 0);
    }

    #[test]
    fn ticks_read_the_latest_tilt() {
        let (mut sim, feed) = pointer_simulation();
        sim.start();

        let balls = sim.balls_mut();
        balls.clear();
        balls.push(Ball::new(BallId(0), vec2(200.0, 400.0), 30.0, 0.1));

        feed.deliver(Tilt::new(0.2, 0.0));
        feed.deliver(Tilt::new(0.0, 1.0));
        sim.tick();

        assert_eq!(sim.balls()[0].position, vec2(200.0, 390.0));
    }

    #[test]
    fn unavailable_sensor_keeps_zero_tilt() {
        let cell = TiltCell::new();
        let source = SensorMotionSource::new("null", NullSensor, cell.clone(), Duration::from_millis(1));
        let mut sim = Simulation::new(Viewport::new(400.0, 800.0), seeded_params(), Box::new(source), cell);

        sim.start();
        assert_eq!(sim.motion_status(), MotionStatus::Unavailable);
        assert!(sim.is_running());

        sim.tick();
        assert_eq!(sim.current_tilt(), Tilt::ZERO);
    }

    #[test]
    fn replacing_source_restarts_only_when_running() {
        let (mut sim, feed) = pointer_simulation();

        sim.replace_motion_source(Box::new(feed.source()));
        assert!(!feed.is_active());

        sim.start();
        let null = SensorMotionSource::new("null", NullSensor, sim.tilt_cell(), Duration::from_millis(1));
        sim.replace_motion_source(Box::new(null));

        assert!(!feed.is_active());
        assert_eq!(sim.motion_name(), "null");
        assert_eq!(sim.motion_status(), MotionStatus::Unavailable);
    }

    #[test]
    fn respawn_keeps_the_count() {
        let (mut sim, _) = pointer_simulation();
        let before: Vec<Vec2> = sim.balls().iter().map(|b| b.position).collect();

        sim.respawn();

        let after: Vec<Vec2> = sim.balls().iter().map(|b| b.position).collect();
        assert_eq!(after.len(), BALL_COUNT);
        assert_ne!(before, after);
    }

    #[test]
    fn same_seed_spawns_same_world() {
        let (a, _) = pointer_simulation();
        let (b, _) = pointer_simulation();

        let a: Vec<Vec2> = a.balls().iter().map(|b| b.position).collect();
        let b: Vec<Vec2> = b.balls().iter().map(|b| b.position).collect();
        assert_eq!(a, b);
    }
}
