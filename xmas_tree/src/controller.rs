//! Gesture controller: owns the landmark source for the lifetime of the
//! scene and feeds one detection per inference tick into the session.
//!
//! ```text
//! Initializing ──ok──────────► Active
//!      │  ├──NoCamera error──► NoCamera
//!      │  └──other error─────► TouchMode
//!      └──deadline passed────► TouchMode   (late sources are released)
//! ```
//!
//! Without an active source there are no gesture transitions; pointer
//! input keeps working in every status.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use scene_mode::{GestureReport, InteractionSession};

use crate::source::{spawn_source_init, BoxedSource, SourceError, SourceInit};

pub const INIT_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Initializing,
    Active,
    NoCamera,
    TouchMode,
}

impl Status {
    /// Coarse UI string.
    pub fn label(self) -> &'static str {
        match self {
            Status::Initializing => "Initializing...",
            Status::Active       => "Active",
            Status::NoCamera     => "No Camera",
            Status::TouchMode    => "Touch Mode",
        }
    }
}

pub struct GestureController {
    status:    Status,
    pending:   Option<Receiver<Result<BoxedSource, SourceError>>>,
    source:    Option<BoxedSource>,
    deadline:  Instant,
    origin:    Instant,
    last_tick: Option<Instant>,
    stopped:   bool,
}

impl GestureController {
    /// Begin initializing the source in the background.
    pub fn start(init: SourceInit, timeout: Duration) -> Self {
        GestureController::start_at(init, timeout, Instant::now())
    }

    pub fn start_at(init: SourceInit, timeout: Duration, now: Instant) -> Self {
        log::info!("gesture input initializing (timeout {:?})", timeout);
        GestureController {
            status:    Status::Initializing,
            pending:   Some(spawn_source_init(init)),
            source:    None,
            deadline:  now + timeout,
            origin:    now,
            last_tick: None,
            stopped:   false,
        }
    }

    /// One pass of the inference loop.  Returns the gesture report when a
    /// detection ran this tick.
    pub fn inference_tick(&mut self, session: &mut InteractionSession, now: Instant) -> Option<GestureReport> {
        if self.stopped {
            return None;
        }
        self.poll_init(now);

        let dt = self.last_tick
            .map(|t| now.saturating_duration_since(t).as_secs_f32())
            .unwrap_or(0.0);
        self.last_tick = Some(now);

        let source = self.source.as_mut()?;
        if !source.frame_ready() {
            return None;
        }
        let now_ms = now.saturating_duration_since(self.origin).as_secs_f64() * 1000.0;
        let frame = match source.detect(now_ms) {
            Ok(frame) => frame,
            Err(e) => {
                log::debug!("detection error treated as no hand: {}", e);
                None
            }
        };
        Some(session.on_gesture_frame(frame.as_ref(), now, dt))
    }

    fn poll_init(&mut self, now: Instant) {
        let Some(rx) = self.pending.as_ref() else { return };

        match rx.try_recv() {
            Ok(Ok(source)) => {
                self.pending = None;
                if self.status == Status::Initializing {
                    log::info!("gesture input active");
                    self.source = Some(source);
                    self.status = Status::Active;
                } else {
                    log::warn!("gesture source became ready after {:?}; releasing it", self.status);
                    drop(source);
                }
            }
            Ok(Err(e)) => {
                self.pending = None;
                if self.status == Status::Initializing {
                    self.status = match e {
                        SourceError::NoCamera(_) => Status::NoCamera,
                        _ => Status::TouchMode,
                    };
                    log::warn!("gesture input unavailable ({}); {}", e, self.status.label());
                }
            }
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                if self.status == Status::Initializing {
                    log::warn!("gesture init thread exited without a result");
                    self.status = Status::TouchMode;
                }
            }
            Err(TryRecvError::Empty) => {
                if self.status == Status::Initializing && now >= self.deadline {
                    log::warn!("gesture init timed out; falling back to touch mode");
                    self.status = Status::TouchMode;
                }
            }
        }
    }

    /// Stop inference and release the source.  Safe to call more than once.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.pending = None;
        if let Some(source) = self.source.take() {
            drop(source);
            log::info!("gesture source released");
        }
    }

    pub fn status(&self) -> Status { self.status }
    pub fn is_stopped(&self) -> bool { self.stopped }
}

impl Drop for GestureController {
    fn drop(&mut self) { self.stop(); }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{mpsc, Arc};
    use std::thread;

    use hand_pose::HandFrame;
    use scene_mode::InteractionMode;

    use crate::source::LandmarkSource;

    #[derive(Default)]
    struct Counters {
        detects:  AtomicUsize,
        releases: AtomicUsize,
    }

    /// Always an open hand, or always an error.
    struct ScriptedSource {
        counters: Arc<Counters>,
        failing:  bool,
    }

    impl LandmarkSource for ScriptedSource {
        fn frame_ready(&mut self) -> bool { true }

        fn detect(&mut self, now_ms: f64) -> Result<Option<HandFrame>, SourceError> {
            self.counters.detects.fetch_add(1, Ordering::SeqCst);
            if self.failing {
                Err(SourceError::Detection("blurry".into()))
            } else {
                Ok(Some(HandFrame::synthetic(now_ms, 0.5, 0.8, 0.3, None)))
            }
        }
    }

    impl Drop for ScriptedSource {
        fn drop(&mut self) {
            self.counters.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn scripted(counters: &Arc<Counters>, failing: bool) -> SourceInit {
        let counters = Arc::clone(counters);
        Box::new(move || Ok(Box::new(ScriptedSource { counters, failing }) as BoxedSource))
    }

    /// Tick until the status leaves `Initializing` (bounded).
    fn settle(ctl: &mut GestureController, session: &mut InteractionSession, now: Instant) {
        for _ in 0..500 {
            ctl.inference_tick(session, now);
            if ctl.status() != Status::Initializing {
                return;
            }
            thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn status_labels() {
        assert_eq!(Status::Initializing.label(), "Initializing...");
        assert_eq!(Status::Active.label(), "Active");
        assert_eq!(Status::NoCamera.label(), "No Camera");
        assert_eq!(Status::TouchMode.label(), "Touch Mode");
    }

    #[test]
    fn becomes_active_and_drives_session() {
        let counters = Arc::new(Counters::default());
        let mut session = InteractionSession::default();
        let t0 = Instant::now();
        let mut ctl = GestureController::start_at(scripted(&counters, false), INIT_TIMEOUT, t0);
        settle(&mut ctl, &mut session, t0);
        assert_eq!(ctl.status(), Status::Active);

        let mut t = t0;
        for _ in 0..12 {
            t += Duration::from_millis(16);
            ctl.inference_tick(&mut session, t);
        }
        assert_eq!(session.mode(), InteractionMode::Unleashed);
    }

    #[test]
    fn detection_errors_are_no_hand() {
        let counters = Arc::new(Counters::default());
        let mut session = InteractionSession::default();
        let t0 = Instant::now();
        let mut ctl = GestureController::start_at(scripted(&counters, true), INIT_TIMEOUT, t0);
        settle(&mut ctl, &mut session, t0);

        let report = ctl.inference_tick(&mut session, t0).expect("detection ran");
        assert_eq!(report.count, 0);
        assert_eq!(report.transition, None);
        assert_eq!(ctl.status(), Status::Active);
    }

    #[test]
    fn stop_releases_exactly_once_and_halts_detection() {
        let counters = Arc::new(Counters::default());
        let mut session = InteractionSession::default();
        let t0 = Instant::now();
        let mut ctl = GestureController::start_at(scripted(&counters, false), INIT_TIMEOUT, t0);
        settle(&mut ctl, &mut session, t0);
        ctl.inference_tick(&mut session, t0);
        let detects = counters.detects.load(Ordering::SeqCst);

        ctl.stop();
        ctl.stop();
        assert_eq!(ctl.inference_tick(&mut session, t0), None);
        drop(ctl);

        assert_eq!(counters.releases.load(Ordering::SeqCst), 1);
        assert_eq!(counters.detects.load(Ordering::SeqCst), detects);
    }

    #[test]
    fn drop_releases_source() {
        let counters = Arc::new(Counters::default());
        let mut session = InteractionSession::default();
        let t0 = Instant::now();
        let mut ctl = GestureController::start_at(scripted(&counters, false), INIT_TIMEOUT, t0);
        settle(&mut ctl, &mut session, t0);
        drop(ctl);
        assert_eq!(counters.releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn no_camera_error_sets_status() {
        let mut session = InteractionSession::default();
        let t0 = Instant::now();
        let init: SourceInit = Box::new(|| Err(SourceError::NoCamera("denied".into())));
        let mut ctl = GestureController::start_at(init, INIT_TIMEOUT, t0);
        settle(&mut ctl, &mut session, t0);
        assert_eq!(ctl.status(), Status::NoCamera);
    }

    #[test]
    fn model_error_falls_back_to_touch() {
        let mut session = InteractionSession::default();
        let t0 = Instant::now();
        let init: SourceInit = Box::new(|| Err(SourceError::ModelLoad("404".into())));
        let mut ctl = GestureController::start_at(init, INIT_TIMEOUT, t0);
        settle(&mut ctl, &mut session, t0);
        assert_eq!(ctl.status(), Status::TouchMode);
    }

    #[test]
    fn timeout_forces_touch_mode_and_releases_late_source() {
        let counters = Arc::new(Counters::default());
        let (go_tx, go_rx) = mpsc::channel::<()>();
        let late = {
            let counters = Arc::clone(&counters);
            Box::new(move || {
                let _ = go_rx.recv();
                Ok(Box::new(ScriptedSource { counters, failing: false }) as BoxedSource)
            }) as SourceInit
        };

        let mut session = InteractionSession::default();
        let t0 = Instant::now();
        let mut ctl = GestureController::start_at(late, Duration::from_millis(100), t0);
        ctl.inference_tick(&mut session, t0);
        assert_eq!(ctl.status(), Status::Initializing);

        ctl.inference_tick(&mut session, t0 + Duration::from_millis(150));
        assert_eq!(ctl.status(), Status::TouchMode);

        go_tx.send(()).unwrap();
        for _ in 0..500 {
            ctl.inference_tick(&mut session, t0 + Duration::from_secs(1));
            if counters.releases.load(Ordering::SeqCst) == 1 {
                break;
            }
            thread::sleep(Duration::from_millis(2));
        }
        assert_eq!(counters.releases.load(Ordering::SeqCst), 1);
        assert_eq!(ctl.status(), Status::TouchMode);
        assert_eq!(counters.detects.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn pointer_works_without_gesture_input() {
        let mut session = InteractionSession::default();
        let t0 = Instant::now();
        let mut ctl = GestureController::start_at(crate::source::no_camera_init(), INIT_TIMEOUT, t0);
        settle(&mut ctl, &mut session, t0);
        assert_eq!(ctl.inference_tick(&mut session, t0), None);
        session.click_tree(t0).unwrap();
        assert_eq!(session.mode(), InteractionMode::Unleashed);
    }
}
