/*
 * Motion Module
 *
 * This module defines the tilt vector, the shared single-slot cell it is
 * published through, and the motion sources that feed it.
 *
 * A motion source delivers readings asynchronously; every reading replaces
 * the previous one (last writer wins). The simulation reads whatever value
 * is current when a tick runs. If a sensor is unavailable, starting the
 * source does nothing and the tilt keeps its last value.
 */

use std::f32::consts::TAU;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use thiserror::Error;

// Device tilt relative to gravity, roughly -1..1 per axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tilt {
    pub x: f32,
    pub y: f32,
}

impl Tilt {
    pub const ZERO: Tilt = Tilt { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// Single-slot shared tilt value. Both components are published together.
#[derive(Debug, Clone, Default)]
pub struct TiltCell {
    inner: Arc<Mutex<Tilt>>,
}

impl TiltCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, tilt: Tilt) {
        // The slot holds plain data, so a poisoned lock is still usable
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = tilt;
    }

    pub fn load(&self) -> Tilt {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MotionError {
    #[error("motion sensor is not available on this device")]
    Unavailable,
    #[error("failed to read motion sensor: {0}")]
    ReadFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionStatus {
    Stopped,
    Running,
    // start() was called but the sensor could not deliver
    Unavailable,
}

impl MotionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MotionStatus::Stopped => "stopped",
            MotionStatus::Running => "running",
            MotionStatus::Unavailable => "unavailable",
        }
    }
}

/// A producer of tilt readings.
///
/// `start` and `stop` are idempotent. Readings are written into the
/// `TiltCell` the source was built with.
pub trait MotionSource {
    fn start(&mut self);
    fn stop(&mut self);
    fn status(&self) -> MotionStatus;
    fn name(&self) -> &'static str;
}

/// A pollable tilt sensor.
pub trait TiltSensor: Send + 'static {
    fn is_available(&self) -> bool;
    fn read(&mut self) -> Result<Tilt, MotionError>;
}

// Samples a sensor on a background thread at a fixed interval
pub struct SensorMotionSource<S: TiltSensor> {
    name: &'static str,
    sensor: Option<S>,
    cell: TiltCell,
    interval: Duration,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<S>>,
    status: MotionStatus,
}

impl<S: TiltSensor> SensorMotionSource<S> {
    pub fn new(name: &'static str, sensor: S, cell: TiltCell, interval: Duration) -> Self {
        Self {
            name,
            sensor: Some(sensor),
            cell,
            interval,
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
            status: MotionStatus::Stopped,
        }
    }
}

impl<S: TiltSensor> MotionSource for SensorMotionSource<S> {
    fn start(&mut self) {
        if self.worker.is_some() {
            return;
        }

        let Some(mut sensor) = self.sensor.take() else {
            return;
        };

        if !sensor.is_available() {
            log::warn!("{}: {}; tilt stays at its last value", self.name, MotionError::Unavailable);
            self.sensor = Some(sensor);
            self.status = MotionStatus::Unavailable;
            return;
        }

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);
        let cell = self.cell.clone();
        let interval = self.interval;
        let name = self.name;

        let spawned = thread::Builder::new()
            .name(format!("{name}-sensor"))
            .spawn(move || {
                while running.load(Ordering::SeqCst) {
                    match sensor.read() {
                        Ok(tilt) if tilt.is_finite() => cell.store(tilt),
                        Ok(tilt) => log::debug!("{name}: skipping non-finite sample {tilt:?}"),
                        Err(e) => log::debug!("{name}: skipping sample: {e}"),
                    }
                    thread::park_timeout(interval);
                }
                sensor
            });

        match spawned {
            Ok(handle) => {
                log::info!("{}: started, sampling every {:?}", self.name, self.interval);
                self.worker = Some(handle);
                self.status = MotionStatus::Running;
            }
            Err(e) => {
                // The sensor moved into the failed closure and is gone
                log::warn!("{}: could not spawn sampling thread: {e}", self.name);
                self.running.store(false, Ordering::SeqCst);
                self.status = MotionStatus::Unavailable;
            }
        }
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.worker.take() {
            handle.thread().unpark();
            match handle.join() {
                Ok(sensor) => self.sensor = Some(sensor),
                Err(_) => log::error!("{}: sampling thread panicked", self.name),
            }
            log::info!("{}: stopped", self.name);
        }

        self.status = MotionStatus::Stopped;
    }

    fn status(&self) -> MotionStatus {
        self.status
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl<S: TiltSensor> Drop for SensorMotionSource<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

// A sensor that never exists, e.g. a desktop without motion hardware
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSensor;

impl TiltSensor for NullSensor {
    fn is_available(&self) -> bool {
        false
    }

    fn read(&mut self) -> Result<Tilt, MotionError> {
        Err(MotionError::Unavailable)
    }
}

// Sweeps the tilt around a circle, for hands-free demos
#[derive(Debug, Clone)]
pub struct WobbleSensor {
    epoch: Instant,
    period: Duration,
    amplitude: f32,
}

impl WobbleSensor {
    pub fn new(period: Duration, amplitude: f32) -> Self {
        Self {
            epoch: Instant::now(),
            period,
            amplitude,
        }
    }

    pub fn tilt_at(&self, elapsed: Duration) -> Tilt {
        let phase = elapsed.as_secs_f32() / self.period.as_secs_f32() * TAU;
        Tilt::new(self.amplitude * phase.cos(), self.amplitude * phase.sin())
    }
}

impl Default for WobbleSensor {
    fn default() -> Self {
        Self::new(Duration::from_secs(6), 0.6)
    }
}

impl TiltSensor for WobbleSensor {
    fn is_available(&self) -> bool {
        !self.period.is_zero()
    }

    fn read(&mut self) -> Result<Tilt, MotionError> {
        Ok(self.tilt_at(self.epoch.elapsed()))
    }
}

// Replays a fixed sequence of readings, repeating the last one
#[derive(Debug, Clone)]
pub struct ScriptedSensor {
    readings: Vec<Result<Tilt, MotionError>>,
    next: usize,
}

impl ScriptedSensor {
    pub fn new(readings: Vec<Result<Tilt, MotionError>>) -> Self {
        Self { readings, next: 0 }
    }
}

impl TiltSensor for ScriptedSensor {
    fn is_available(&self) -> bool {
        !self.readings.is_empty()
    }

    fn read(&mut self) -> Result<Tilt, MotionError> {
        let index = self.next.min(self.readings.len().saturating_sub(1));
        self.next += 1;
        self.readings
            .get(index)
            .cloned()
            .unwrap_or(Err(MotionError::Unavailable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Poll the cell until it holds `expected` or a second passes
    fn wait_for(cell: &TiltCell, expected: Tilt) -> bool {
        let deadline = Instant::now() + Duration::from_secs(1);
        while Instant::now() < deadline {
            if cell.load() == expected {
                return true;
            }
            thread::sleep(Duration::from_millis(2));
        }
        false
    }

    #[test]
    fn cell_is_last_writer_wins() {
        let cell = TiltCell::new();
        assert_eq!(cell.load(), Tilt::ZERO);

        let writer = cell.clone();
        writer.store(Tilt::new(0.1, 0.2));
        writer.store(Tilt::new(-0.5, 0.7));
        assert_eq!(cell.load(), Tilt::new(-0.5, 0.7));
    }

    #[test]
    fn unavailable_sensor_leaves_tilt_untouched() {
        let cell = TiltCell::new();
        cell.store(Tilt::new(0.3, -0.3));

        let mut source = SensorMotionSource::new("null", NullSensor, cell.clone(), Duration::from_millis(1));
        source.start();

        assert_eq!(source.status(), MotionStatus::Unavailable);
        thread::sleep(Duration::from_millis(10));
        assert_eq!(cell.load(), Tilt::new(0.3, -0.3));

        source.stop();
        assert_eq!(source.status(), MotionStatus::Stopped);
    }

    #[test]
    fn sensor_source_delivers_readings() {
        let cell = TiltCell::new();
        let sensor = ScriptedSensor::new(vec![Ok(Tilt::new(0.25, -0.75))]);
        let mut source = SensorMotionSource::new("scripted", sensor, cell.clone(), Duration::from_millis(1));

        source.start();
        assert_eq!(source.status(), MotionStatus::Running);
        assert!(wait_for(&cell, Tilt::new(0.25, -0.75)));
        source.stop();
    }

    #[test]
    fn failed_reads_keep_previous_value() {
        let cell = TiltCell::new();
        let sensor = ScriptedSensor::new(vec![
            Ok(Tilt::new(0.5, 0.5)),
            Err(MotionError::ReadFailed("glitch".into())),
        ]);
        let mut source = SensorMotionSource::new("scripted", sensor, cell.clone(), Duration::from_millis(1));

        source.start();
        assert!(wait_for(&cell, Tilt::new(0.5, 0.5)));
        thread::sleep(Duration::from_millis(10));
        source.stop();

        assert_eq!(cell.load(), Tilt::new(0.5, 0.5));
    }

    #[test]
    fn non_finite_readings_are_skipped() {
        let cell = TiltCell::new();
        let sensor = ScriptedSensor::new(vec![
            Ok(Tilt::new(0.5, -0.5)),
            Ok(Tilt::new(f32::NAN, 0.0)),
            Ok(Tilt::new(0.0, f32::INFINITY)),
        ]);
        let mut source = SensorMotionSource::new("scripted", sensor, cell.clone(), Duration::from_millis(1));

        source.start();
        assert!(wait_for(&cell, Tilt::new(0.5, -0.5)));
        thread::sleep(Duration::from_millis(10));
        source.stop();

        assert_eq!(cell.load(), Tilt::new(0.5, -0.5));
    }

    #[test]
    fn stopped_source_no_longer_refreshes() {
        let cell = TiltCell::new();
        let sensor = ScriptedSensor::new(vec![Ok(Tilt::new(1.0, 0.0))]);
        let mut source = SensorMotionSource::new("scripted", sensor, cell.clone(), Duration::from_millis(1));

        source.start();
        assert!(wait_for(&cell, Tilt::new(1.0, 0.0)));
        source.stop();

        cell.store(Tilt::ZERO);
        thread::sleep(Duration::from_millis(10));
        assert_eq!(cell.load(), Tilt::ZERO);
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let cell = TiltCell::new();
        let sensor = ScriptedSensor::new(vec![Ok(Tilt::new(0.1, 0.1))]);
        let mut source = SensorMotionSource::new("scripted", sensor, cell, Duration::from_millis(1));

        source.start();
        source.start();
        assert_eq!(source.status(), MotionStatus::Running);

        source.stop();
        source.stop();
        assert_eq!(source.status(), MotionStatus::Stopped);

        // The sensor is handed back on stop, so the source can restart
        source.start();
        assert_eq!(source.status(), MotionStatus::Running);
    }

    #[test]
    fn wobble_sweeps_a_circle() {
        let sensor = WobbleSensor::new(Duration::from_secs(4), 0.5);

        let start = sensor.tilt_at(Duration::ZERO);
        assert!((start.x - 0.5).abs() < 1e-6 && start.y.abs() < 1e-6);

        let quarter = sensor.tilt_at(Duration::from_secs(1));
        assert!(quarter.x.abs() < 1e-5 && (quarter.y - 0.5).abs() < 1e-5);
    }
}
