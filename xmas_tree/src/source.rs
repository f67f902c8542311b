//! Hand landmark sources: LeapMotion hardware and keyboard simulation.
//!
//! The controller only sees [`LandmarkSource`]; it does not know whether
//! frames come from real hardware or the keyboard simulator.  Sources are
//! created off the UI thread through a [`SourceInit`] factory, since opening
//! a device can take seconds, and released by dropping them.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use hand_pose::HandFrame;
use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Capture device missing or access refused.
    #[error("no camera: {0}")]
    NoCamera(String),

    /// The landmark model (or tracking service) failed to come up.
    #[error("landmark model failed to load: {0}")]
    ModelLoad(String),

    /// One detection call failed; the next frame may succeed.
    #[error("detection failed: {0}")]
    Detection(String),

    /// The initialization thread went away without reporting.
    #[error("source initialization abandoned")]
    Abandoned,
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver per-frame hand landmarks.  Dropping the source
/// releases the device.
pub trait LandmarkSource: Send {
    /// A new video frame is available for detection.
    fn frame_ready(&mut self) -> bool;

    /// Run detection on the current frame.  `Ok(None)` means no hand.
    fn detect(&mut self, now_ms: f64) -> Result<Option<HandFrame>, SourceError>;
}

pub type BoxedSource = Box<dyn LandmarkSource>;

/// Factory that opens a source.  Runs on its own thread.
pub type SourceInit = Box<dyn FnOnce() -> Result<BoxedSource, SourceError> + Send>;

// ════════════════════════════════════════════════════════════════════════════
// Spawn helper
// ════════════════════════════════════════════════════════════════════════════

/// Run `init` on its own thread and return the receiving end for its result.
pub fn spawn_source_init(init: SourceInit) -> Receiver<Result<BoxedSource, SourceError>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // A receiver that has gone away no longer wants the source; the
        // failed send drops it here, which releases it.
        let _ = tx.send(init());
    });
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandSource — keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    KeyDown(SimKey),
    /// Absolute hand position, user's view (`x` already mirrored).
    HandAt { x: f32, y: f32 },
}

/// Simulated key codes (mapped from minifb Key).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    OpenHand,    // 1
    Fist,        // 2
    Pinch,       // 3
    NoHand,      // 0
    MoveLeft,    // Left arrow
    MoveRight,   // Right arrow
    MoveUp,      // Up arrow
    MoveDown,    // Down arrow
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimPose {
    Open,
    Fist,
    Pinch,
    Away,
}

/// Reach and thumb gap of the synthetic hand for each pose.
const OPEN_REACH:  f32 = 0.30;
const FIST_REACH:  f32 = 0.10;
const PINCH_GAP:   f32 = 0.02;
const MOVE_STEP:   f32 = 0.02;

/// Synthetic hand driven by [`SimInput`] events from the visualizer's
/// window.  Every poll yields a fresh frame, like a 60 fps camera.
pub struct SimHandSource {
    rx:       Receiver<SimInput>,
    pose:     SimPose,
    /// Hand position in the user's (mirrored) view, `[0, 1]`.
    position: (f32, f32),
}

impl SimHandSource {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimHandSource { rx, pose: SimPose::Away, position: (0.5, 0.6) }
    }

    /// Wrap in a factory that waits `delay` before handing the source over,
    /// standing in for model download and camera start-up.
    pub fn init(rx: Receiver<SimInput>, delay: Duration) -> SourceInit {
        Box::new(move || {
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            log::info!("simulated hand source ready");
            Ok(Box::new(SimHandSource::new(rx)) as BoxedSource)
        })
    }

    fn apply(&mut self, input: SimInput) {
        let (x, y) = &mut self.position;
        match input {
            SimInput::KeyDown(SimKey::OpenHand)  => self.pose = SimPose::Open,
            SimInput::KeyDown(SimKey::Fist)      => self.pose = SimPose::Fist,
            SimInput::KeyDown(SimKey::Pinch)     => self.pose = SimPose::Pinch,
            SimInput::KeyDown(SimKey::NoHand)    => self.pose = SimPose::Away,
            SimInput::KeyDown(SimKey::MoveLeft)  => *x = (*x - MOVE_STEP).max(0.0),
            SimInput::KeyDown(SimKey::MoveRight) => *x = (*x + MOVE_STEP).min(1.0),
            SimInput::KeyDown(SimKey::MoveUp)    => *y = (*y - MOVE_STEP).max(0.0),
            SimInput::KeyDown(SimKey::MoveDown)  => *y = (*y + MOVE_STEP).min(1.0),
            SimInput::HandAt { x: hx, y: hy } => {
                *x = hx.clamp(0.0, 1.0);
                *y = hy.clamp(0.0, 1.0);
            }
        }
    }

    pub fn pose(&self) -> SimPose { self.pose }
    pub fn position(&self) -> (f32, f32) { self.position }
}

impl LandmarkSource for SimHandSource {
    fn frame_ready(&mut self) -> bool {
        loop {
            match self.rx.try_recv() {
                Ok(input) => self.apply(input),
                Err(TryRecvError::Empty) => return true,
                // Window gone: the camera stops producing frames.
                Err(TryRecvError::Disconnected) => return false,
            }
        }
    }

    fn detect(&mut self, now_ms: f64) -> Result<Option<HandFrame>, SourceError> {
        // Camera space is unmirrored.
        let wrist_x = 1.0 - self.position.0;
        let wrist_y = self.position.1;
        Ok(match self.pose {
            SimPose::Away  => None,
            SimPose::Open  => Some(HandFrame::synthetic(now_ms, wrist_x, wrist_y, OPEN_REACH, None)),
            SimPose::Fist  => Some(HandFrame::synthetic(now_ms, wrist_x, wrist_y, FIST_REACH, None)),
            SimPose::Pinch => Some(HandFrame::synthetic(now_ms, wrist_x, wrist_y, OPEN_REACH, Some(PINCH_GAP))),
        })
    }
}

impl Drop for SimHandSource {
    fn drop(&mut self) {
        log::debug!("simulated hand source released");
    }
}

/// Factory that always fails, for running without any camera.
pub fn no_camera_init() -> SourceInit {
    Box::new(|| Err(SourceError::NoCamera("camera disabled on the command line".into())))
}

// ════════════════════════════════════════════════════════════════════════════
// LeapHandSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Landmark source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// LeapC is polled on a dedicated thread.  The first tracked hand (right hand
/// preferred) is projected into normalized, unmirrored camera space: digit
/// joints become the 21 MediaPipe-style landmarks, with 400 mm of the
/// interaction box mapped onto the unit square.
#[cfg(feature = "leap")]
pub struct LeapHandSource {
    latest:  std::sync::Arc<std::sync::Mutex<Option<HandFrame>>>,
    fresh:   std::sync::Arc<std::sync::atomic::AtomicBool>,
    running: std::sync::Arc<std::sync::atomic::AtomicBool>,
    worker:  Option<thread::JoinHandle<()>>,
}

#[cfg(feature = "leap")]
impl LeapHandSource {
    pub fn init() -> SourceInit {
        Box::new(|| LeapHandSource::connect().map(|s| Box::new(s) as BoxedSource))
    }

    pub fn connect() -> Result<Self, SourceError> {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::{Arc, Mutex};
        use leaprs::*;

        let latest  = Arc::new(Mutex::new(None));
        let fresh   = Arc::new(AtomicBool::new(false));
        let running = Arc::new(AtomicBool::new(true));
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), SourceError>>();

        let worker = {
            let latest  = Arc::clone(&latest);
            let fresh   = Arc::clone(&fresh);
            let running = Arc::clone(&running);
            thread::spawn(move || {
                let mut connection = match Connection::create(ConnectionConfig::default()) {
                    Ok(c) => c,
                    Err(e) => {
                        let _ = ready_tx.send(Err(SourceError::ModelLoad(format!("{:?}", e))));
                        return;
                    }
                };
                if let Err(e) = connection.open() {
                    let _ = ready_tx.send(Err(SourceError::NoCamera(format!("{:?}", e))));
                    return;
                }
                let _ = ready_tx.send(Ok(()));

                while running.load(Ordering::Relaxed) {
                    let msg = match connection.poll(100) {
                        Ok(m)  => m,
                        Err(_) => continue,
                    };
                    if let Event::Tracking(frame) = msg.event() {
                        let hands: Vec<_> = frame.hands().collect();
                        let hand = hands.iter()
                            .find(|h| h.hand_type() == HandType::Right)
                            .or_else(|| hands.first());
                        let projected = hand.map(|h| project_hand(h));
                        if let Ok(mut slot) = latest.lock() {
                            *slot = projected;
                        }
                        fresh.store(true, Ordering::Release);
                    }
                }
            })
        };

        match ready_rx.recv() {
            Ok(Ok(())) => {
                log::info!("LeapMotion connection open");
                Ok(LeapHandSource { latest, fresh, running, worker: Some(worker) })
            }
            Ok(Err(e)) => {
                let _ = worker.join();
                Err(e)
            }
            Err(_) => Err(SourceError::Abandoned),
        }
    }
}

/// Map one tracked hand to 21 landmarks.
#[cfg(feature = "leap")]
fn project_hand(hand: &leaprs::Hand) -> HandFrame {
    use hand_pose::{Landmark, LANDMARK_COUNT};

    // mm → unit square, centred 250 mm above the device.
    const SPAN_MM:   f32 = 400.0;
    const CENTRE_Y:  f32 = 250.0;

    let to_lm = |x: f32, y: f32, z: f32| Landmark::new(
        0.5 - x / SPAN_MM,
        0.5 - (y - CENTRE_Y) / SPAN_MM,
        z / SPAN_MM,
    );

    let digits: Vec<_> = hand.digits().collect();
    let mut landmarks = [Landmark::default(); LANDMARK_COUNT];

    let bases: Vec<_> = digits.iter().map(|d| d.metacarpal().prev_joint()).collect();
    if !bases.is_empty() {
        let n = bases.len() as f32;
        let (sx, sy, sz) = bases.iter().fold((0.0, 0.0, 0.0), |acc, b| (acc.0 + b.x, acc.1 + b.y, acc.2 + b.z));
        landmarks[0] = to_lm(sx / n, sy / n, sz / n);
    }

    for (finger, digit) in digits.iter().take(5).enumerate() {
        let joints = [
            digit.proximal().prev_joint(),
            digit.intermediate().prev_joint(),
            digit.distal().prev_joint(),
            digit.distal().next_joint(),
        ];
        for (j, p) in joints.iter().enumerate() {
            landmarks[1 + finger * 4 + j] = to_lm(p.x, p.y, p.z);
        }
    }

    HandFrame::new(0.0, landmarks)
}

#[cfg(feature = "leap")]
impl LandmarkSource for LeapHandSource {
    fn frame_ready(&mut self) -> bool {
        self.fresh.swap(false, std::sync::atomic::Ordering::Acquire)
    }

    fn detect(&mut self, now_ms: f64) -> Result<Option<HandFrame>, SourceError> {
        let slot = self.latest.lock()
            .map_err(|_| SourceError::Detection("tracking thread panicked".into()))?;
        Ok(slot.clone().map(|mut f| {
            f.timestamp_ms = now_ms;
            f
        }))
    }
}

#[cfg(feature = "leap")]
impl Drop for LeapHandSource {
    fn drop(&mut self) {
        self.running.store(false, std::sync::atomic::Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        log::info!("LeapMotion connection closed");
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
