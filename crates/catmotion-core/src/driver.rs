//! Background tick loop.
//!
//! [`spawn`] moves a [`CatBody`] onto its own thread. Each tick the loop
//! applies queued [`DriverCommand`]s, advances the body by a fixed `dt`, and
//! offers a full [`PoseSnapshot`] copy on a bounded channel. When the
//! consumer falls behind, the frame is dropped instead of blocking the loop.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, SyncSender, TryRecvError, TrySendError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::body::CatBody;
use crate::error::ConfigError;
use crate::pose::PoseSnapshot;

/// Inputs accepted by a running driver.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverCommand {
    SetTarget { x: f64, y: f64 },
    Pointer { x: f64, y: f64 },
    Speed(f64),
    RandomTarget,
    Home,
}

impl DriverCommand {
    fn apply(&self, body: &mut CatBody) {
        match *self {
            DriverCommand::SetTarget { x, y } => body.set_target(x, y),
            DriverCommand::Pointer { x, y } => {
                body.attract_toward(x, y);
            }
            DriverCommand::Speed(speed) => body.set_speed(speed),
            DriverCommand::RandomTarget => {
                body.random_target();
            }
            DriverCommand::Home => body.go_home(),
        }
    }
}

enum Control {
    Command(DriverCommand),
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverConfig {
    /// Ticks per second. Each tick advances the body by `1 / hz`.
    pub hz: f64,
    /// Snapshots buffered before frames start being dropped.
    pub frame_buffer: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            hz: 60.0,
            frame_buffer: 4,
        }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.hz.is_finite() {
            return Err(ConfigError::NonFinite("hz"));
        }
        if self.hz <= 0.0 {
            return Err(ConfigError::NotPositive {
                name: "hz",
                value: self.hz,
            });
        }
        if self.frame_buffer == 0 {
            return Err(ConfigError::NotPositive {
                name: "frame_buffer",
                value: 0.0,
            });
        }
        self.period().map(|_| ())
    }

    /// Wall-clock length of one tick.
    pub fn period(&self) -> Result<Duration, ConfigError> {
        Duration::try_from_secs_f64(1.0 / self.hz).map_err(|_| ConfigError::OutOfRange {
            name: "hz",
            value: self.hz,
        })
    }
}

/// What the loop hands back when it stops.
#[derive(Debug)]
pub struct DriverSummary {
    pub body: CatBody,
    pub ticks: u64,
    pub dropped_frames: u64,
}

/// Owner-side handle of a running loop. Dropping it stops the loop.
pub struct DriverHandle {
    control: Sender<Control>,
    frames: Receiver<PoseSnapshot>,
    thread: Option<JoinHandle<DriverSummary>>,
}

/// Start ticking `body` on a dedicated thread.
pub fn spawn(body: CatBody, config: DriverConfig) -> Result<DriverHandle, ConfigError> {
    config.validate()?;
    let period = config.period()?;
    let (control_tx, control_rx) = mpsc::channel();
    let (frame_tx, frame_rx) = mpsc::sync_channel(config.frame_buffer);

    let thread = std::thread::Builder::new()
        .name("catmotion-driver".to_string())
        .spawn(move || run_loop(body, config.hz, period, control_rx, frame_tx))?;

    info!("driver started at {} Hz", config.hz);
    Ok(DriverHandle {
        control: control_tx,
        frames: frame_rx,
        thread: Some(thread),
    })
}

fn run_loop(
    mut body: CatBody,
    hz: f64,
    period: Duration,
    control: Receiver<Control>,
    frames: SyncSender<PoseSnapshot>,
) -> DriverSummary {
    let dt = 1.0 / hz;
    let mut ticks = 0u64;
    let mut dropped = 0u64;
    let mut deadline = Instant::now();

    'ticking: loop {
        loop {
            match control.try_recv() {
                Ok(Control::Command(command)) => {
                    debug!("driver command {:?}", command);
                    command.apply(&mut body);
                }
                Ok(Control::Stop) | Err(TryRecvError::Disconnected) => break 'ticking,
                Err(TryRecvError::Empty) => break,
            }
        }

        body.update(dt);
        ticks += 1;

        match frames.try_send(body.export_pose()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => dropped += 1,
            Err(TrySendError::Disconnected(_)) => break,
        }

        let now = Instant::now();
        deadline = match deadline.checked_add(period) {
            // Behind schedule: do not try to catch up.
            Some(next) if next > now => next,
            Some(_) => now,
            None => {
                warn!("tick period {:?} overflows the clock", period);
                break;
            }
        };

        // Wait on the control channel so a stop is not held up by a long period.
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            match control.recv_timeout(deadline - now) {
                Ok(Control::Command(command)) => {
                    debug!("driver command {:?}", command);
                    command.apply(&mut body);
                }
                Ok(Control::Stop) | Err(RecvTimeoutError::Disconnected) => break 'ticking,
                Err(RecvTimeoutError::Timeout) => break,
            }
        }
    }

    info!("driver stopped after {} ticks ({} frames dropped)", ticks, dropped);
    DriverSummary {
        body,
        ticks,
        dropped_frames: dropped,
    }
}

impl DriverHandle {
    /// Queue a command for the next tick. Returns `false` if the loop is gone.
    pub fn send(&self, command: DriverCommand) -> bool {
        self.control.send(Control::Command(command)).is_ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<PoseSnapshot> {
        match self.frames.recv_timeout(timeout) {
            Ok(frame) => Some(frame),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Stop the loop and take the body back. `None` if the loop panicked.
    pub fn stop(mut self) -> Option<DriverSummary> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Option<DriverSummary> {
        let thread = self.thread.take()?;
        let _ = self.control.send(Control::Stop);
        match thread.join() {
            Ok(summary) => Some(summary),
            Err(_) => {
                warn!("driver thread panicked");
                None
            }
        }
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
