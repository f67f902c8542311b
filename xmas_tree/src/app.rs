//! Top-level application state.
//!
//! `AppState` owns the `InteractionSession`, the `GestureController`, the
//! photo library and the `Scene`.  It applies pointer actions from the
//! window, runs one inference tick and one render tick per frame, and hands
//! the result to the visualizer.

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use scene_mode::{InteractionSession, SessionConfig, SessionEvent, Smoothing, TransitionOrigin};
use thiserror::Error;

use crate::controller::{GestureController, Status, INIT_TIMEOUT};
use crate::photos::{PhotoLibrary, MAX_PHOTOS};
use crate::scene::{Pick, Scene};
use crate::source::{SimInput, SourceInit};
use crate::visualizer::{UiAction, Visualizer, WIN_H, WIN_W};

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

#[derive(Error, Debug)]
pub enum AppError {
    #[error("window: {0}")]
    Window(String),

    #[error("photo directory {path}: {source}")]
    Photos {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub session:      SessionConfig,
    /// Directory of jpeg/png files to hang on the tree.
    pub photo_dir:    Option<PathBuf>,
    /// Placeholder photos added at start-up.
    pub placeholders: usize,
    /// `false` runs without any hand input, pointer only.
    pub camera:       bool,
    /// Simulated model start-up time.
    pub init_delay:   Duration,
    pub init_timeout: Duration,
    pub seed:         u64,
    pub particles:    usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            session:      SessionConfig::default(),
            photo_dir:    None,
            placeholders: 0,
            camera:       true,
            init_delay:   Duration::from_millis(1500),
            init_timeout: INIT_TIMEOUT,
            seed:         2024,
            particles:    15_000,
        }
    }
}

impl AppConfig {
    /// Demo defaults: no start-up delay and a handful of placeholder photos.
    pub fn quick() -> Self {
        AppConfig {
            placeholders: 6,
            init_delay:   Duration::ZERO,
            ..AppConfig::default()
        }
    }

    pub fn smoothing(&self) -> Smoothing { self.session.smoothing }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    session:    InteractionSession,
    controller: GestureController,
    photos:     PhotoLibrary,
    scene:      Scene,
    next_placeholder: u32,

    // ── status message ────────────────────────────────────────────────────
    pub status: String,
}

impl AppState {
    pub fn new(cfg: &AppConfig, init: SourceInit) -> Result<Self, AppError> {
        let mut photos = PhotoLibrary::new(MAX_PHOTOS);
        if let Some(dir) = &cfg.photo_dir {
            photos.load_dir(dir).map_err(|source| AppError::Photos { path: dir.clone(), source })?;
        }

        let mut app = AppState {
            session:    InteractionSession::new(cfg.session),
            controller: GestureController::start(init, cfg.init_timeout),
            photos,
            scene:      Scene::new(cfg.particles, cfg.seed, cfg.smoothing()),
            next_placeholder: 0,
            status:     "Ready: click the tree or show an open hand".to_string(),
        };
        for _ in 0..cfg.placeholders {
            app.add_placeholder();
        }
        app.photos_changed();
        Ok(app)
    }

    // ── pointer / keyboard actions ────────────────────────────────────────

    pub fn handle_action(&mut self, action: UiAction, now: Instant) {
        match action {
            UiAction::Click { x, y } => {
                let result = match self.scene.pick(x, y, WIN_W, WIN_H) {
                    Some(Pick::Letter) => self.session.toggle_letter(now),
                    Some(Pick::Tree)   => self.session.click_tree(now),
                    None => return,
                };
                if let Err(e) = result {
                    log::debug!("click ignored: {}", e);
                }
            }
            UiAction::AddPhoto => {
                self.add_placeholder();
                self.photos_changed();
                self.status = format!("Photo added ({} of {})", self.photos.len(), MAX_PHOTOS);
            }
            UiAction::Orbit(d_yaw) => self.scene.camera.orbit(d_yaw, 0.0),
        }
    }

    fn add_placeholder(&mut self) {
        self.photos.add_placeholder(self.next_placeholder);
        self.next_placeholder += 1;
    }

    fn photos_changed(&mut self) {
        self.session.set_photo_count(self.photos.len());
        self.scene.sync_photos(&self.photos.ids());
    }

    // ── per-frame tick ────────────────────────────────────────────────────

    pub fn tick(&mut self, now: Instant, dt: f32) {
        self.controller.inference_tick(&mut self.session, now);
        self.session.render_tick(dt);

        for event in self.session.drain_events() {
            match event {
                SessionEvent::ModeChanged { from, to, origin } => {
                    let by = match origin {
                        TransitionOrigin::Gesture => "gesture",
                        TransitionOrigin::Pointer => "click",
                    };
                    self.status = format!("{} -> {} ({})", from, to, by);
                }
                SessionEvent::Selected(i) => {
                    let name = self.photos.photos().get(i).map(|p| p.name.as_str()).unwrap_or("?");
                    self.status = format!("Photo {} selected: {}", i + 1, name);
                }
                SessionEvent::LetterFocus(true)  => self.status = "Letter opened".to_string(),
                SessionEvent::LetterFocus(false) => self.status = "Letter closed".to_string(),
                SessionEvent::PoseDisplayed(pose) => log::debug!("pose {}", pose),
            }
        }

        self.scene.tick(&self.session, dt);
    }

    /// Stop gesture inference and release the source.
    pub fn shutdown(&mut self) {
        self.controller.stop();
    }

    // ── accessors for the render loop ─────────────────────────────────────

    pub fn session(&self) -> &InteractionSession { &self.session }
    pub fn scene(&self)   -> &Scene              { &self.scene }
    pub fn photos(&self)  -> &PhotoLibrary       { &self.photos }
    pub fn status(&self)  -> Status              { self.controller.status() }
}

// ════════════════════════════════════════════════════════════════════════════
// Source selection
// ════════════════════════════════════════════════════════════════════════════

#[cfg(not(feature = "leap"))]
fn source_init(cfg: &AppConfig, sim_rx: mpsc::Receiver<SimInput>) -> SourceInit {
    if !cfg.camera {
        return crate::source::no_camera_init();
    }
    crate::source::SimHandSource::init(sim_rx, cfg.init_delay)
}

#[cfg(feature = "leap")]
fn source_init(cfg: &AppConfig, _sim_rx: mpsc::Receiver<SimInput>) -> SourceInit {
    if !cfg.camera {
        return crate::source::no_camera_init();
    }
    crate::source::LeapHandSource::init()
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// This is the entry point called from `main.rs`.  It creates the visualizer,
/// the landmark source (simulation by default, hardware with `--features
/// leap`), and drives the input/inference/render loop at ~60 fps.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    // ── Sim input channel ─────────────────────────────────────────────────
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
    let init = source_init(&cfg, sim_rx);

    // ── Visualizer (owns the window and the sim input sender) ────────────
    let mut vis = Visualizer::new(sim_tx)?;

    // ── App state ─────────────────────────────────────────────────────────
    let mut app = AppState::new(&cfg, init)?;

    // ── Main loop ─────────────────────────────────────────────────────────
    let mut last = Instant::now();
    while vis.is_open() {
        // 1. Poll window input; hand keys go straight to the sim source
        let Some(actions) = vis.poll_input() else { break };

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32().min(0.1);
        last = now;

        // 2. Pointer actions land before this frame's gesture
        for action in actions {
            app.handle_action(action, now);
        }

        // 3. Inference, progress, scene
        app.tick(now, dt);

        // 4. Render
        vis.render(&app);
    }

    app.shutdown();
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use scene_mode::InteractionMode;
    use crate::source::{no_camera_init, SimHandSource, SimKey};

    const DT: f32 = 1.0 / 60.0;

    fn config() -> AppConfig {
        AppConfig { particles: 200, init_delay: Duration::ZERO, ..AppConfig::default() }
    }

    fn make_app() -> AppState {
        AppState::new(&config(), no_camera_init()).unwrap()
    }

    fn tree_centre() -> UiAction {
        UiAction::Click { x: WIN_W as f32 / 2.0, y: WIN_H as f32 * 0.6 }
    }

    #[test]
    fn click_on_tree_unleashes() {
        let mut app = make_app();
        let now = Instant::now();
        app.handle_action(tree_centre(), now);
        assert_eq!(app.session().mode(), InteractionMode::Unleashed);
        app.tick(now, DT);
        assert_eq!(app.status, "TREE -> UNLEASHED (click)");
    }

    #[test]
    fn click_on_empty_sky_does_nothing() {
        let mut app = make_app();
        app.handle_action(UiAction::Click { x: 3.0, y: 3.0 }, Instant::now());
        assert_eq!(app.session().mode(), InteractionMode::Tree);
    }

    #[test]
    fn add_photo_updates_session_and_scene() {
        let mut app = make_app();
        app.handle_action(UiAction::AddPhoto, Instant::now());
        app.handle_action(UiAction::AddPhoto, Instant::now());
        assert_eq!(app.photos().len(), 2);
        assert_eq!(app.session().photo_count(), 2);
        assert_eq!(app.scene().polaroids().len(), 2);
    }

    #[test]
    fn placeholders_capped() {
        let cfg = AppConfig { placeholders: 40, ..config() };
        let app = AppState::new(&cfg, no_camera_init()).unwrap();
        assert_eq!(app.photos().len(), MAX_PHOTOS);
        assert_eq!(app.session().photo_count(), MAX_PHOTOS);
    }

    #[test]
    fn missing_photo_dir_is_error() {
        let cfg = AppConfig { photo_dir: Some(PathBuf::from("/no/such/dir")), ..config() };
        assert!(matches!(AppState::new(&cfg, no_camera_init()), Err(AppError::Photos { .. })));
    }

    #[test]
    fn simulated_hand_walks_through_modes() {
        let (tx, rx) = mpsc::channel();
        let cfg = AppConfig { placeholders: 3, ..config() };
        let mut app = AppState::new(&cfg, SimHandSource::init(rx, Duration::ZERO)).unwrap();

        let mut now = Instant::now();
        for _ in 0..500 {
            now += Duration::from_millis(16);
            app.tick(now, DT);
            if app.status() == Status::Active { break; }
            std::thread::sleep(Duration::from_millis(2));
        }
        assert_eq!(app.status(), Status::Active);

        let hold = |app: &mut AppState, key: SimKey, frames: usize, now: &mut Instant| {
            tx.send(SimInput::KeyDown(key)).unwrap();
            for _ in 0..frames {
                *now += Duration::from_millis(16);
                app.tick(*now, DT);
            }
        };

        hold(&mut app, SimKey::OpenHand, 12, &mut now);
        assert_eq!(app.session().mode(), InteractionMode::Unleashed);

        // Keep the hand open past the cooldown.
        hold(&mut app, SimKey::OpenHand, 80, &mut now);
        assert_eq!(app.session().mode(), InteractionMode::Carousel);

        hold(&mut app, SimKey::Pinch, 80, &mut now);
        assert_eq!(app.session().mode(), InteractionMode::Focus);
        assert!(app.session().selection().is_some());

        hold(&mut app, SimKey::Fist, 80, &mut now);
        assert_eq!(app.session().mode(), InteractionMode::Tree);
    }

    #[test]
    fn shutdown_stops_controller() {
        let mut app = make_app();
        app.shutdown();
        app.tick(Instant::now(), DT);
        assert_eq!(app.session().mode(), InteractionMode::Tree);
    }
}
