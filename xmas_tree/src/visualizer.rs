//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           ★                                  │
//! │                    needles / ornaments                       │
//! │          [polaroids on helix / cloud / carousel]   [letter]  │
//! │                                                 ○ hand       │
//! │                                                              │
//! │  status bar: mode · input status · pose · photos · selection │
//! │  key legend                                                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is projected through the scene camera and painted back to
//! front: needles, ornaments, star, polaroids sorted by depth, letter.

use std::f32::consts::PI;
use std::sync::mpsc::Sender;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use scene_layout::letter::{ENVELOPE_HEIGHT, ENVELOPE_WIDTH};
use scene_layout::polaroid::{POLAROID_HEIGHT, POLAROID_WIDTH};
use scene_layout::{star, to_world, Camera, OrnamentKind, Projected, Vec3};
use scene_mode::InteractionMode;

use crate::app::{AppError, AppState};
use crate::photos::MAX_PHOTOS;
use crate::source::{SimInput, SimKey};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:       usize = 1000;
pub const WIN_H:       usize = 700;
const STATUS_Y:        usize = WIN_H - 40;
const BG_COLOR:        u32   = 0xFF060A14;
const TEXT_BG:         u32   = 0xFF0F1A2E;
const GOLD:            u32   = 0xFFFFD36B;
const PAPER:           u32   = 0xFFF7F3EA;
const ENVELOPE:        u32   = 0xFFC8302E;
const HAND_COLOR:      u32   = 0xFF7FE0FF;
/// Radians of orbit per frame while A/D is held.
const ORBIT_STEP:      f32   = 0.03;

// ════════════════════════════════════════════════════════════════════════════
// UI actions
// ════════════════════════════════════════════════════════════════════════════

/// Window input that the app applies directly (everything hand-related goes
/// to the simulated source instead).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UiAction {
    /// Left click at framebuffer coordinates.
    Click { x: f32, y: f32 },
    AddPhoto,
    Orbit(f32),
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:     Window,
    buf:        Vec<u32>,
    sim_tx:     Sender<SimInput>,
    mouse_down: bool,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>) -> Result<Self, AppError> {
        let mut window = Window::new(
            "Xmas Tree - gesture controlled",
            WIN_W, WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| AppError::Window(e.to_string()))?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
            mouse_down: false,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll keyboard and mouse.  Hand keys become [`SimInput`] events for the
    /// simulated source; the rest come back as actions.  `None` means quit.
    pub fn poll_input(&mut self) -> Option<Vec<UiAction>> {
        if !self.window.is_open() { return None; }

        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        let held     = |k: Key| self.window.is_key_pressed(k, KeyRepeat::Yes);

        if one_shot(Key::Q) || one_shot(Key::Escape) {
            return None;
        }

        let mut sim = Vec::new();
        if one_shot(Key::Key1) || one_shot(Key::O) { sim.push(SimKey::OpenHand); }
        if one_shot(Key::Key2) || one_shot(Key::F) { sim.push(SimKey::Fist); }
        if one_shot(Key::Key3) || one_shot(Key::P) { sim.push(SimKey::Pinch); }
        if one_shot(Key::Key0) || one_shot(Key::H) { sim.push(SimKey::NoHand); }
        if held(Key::Left)  { sim.push(SimKey::MoveLeft); }
        if held(Key::Right) { sim.push(SimKey::MoveRight); }
        if held(Key::Up)    { sim.push(SimKey::MoveUp); }
        if held(Key::Down)  { sim.push(SimKey::MoveDown); }

        let mut actions = Vec::new();
        if one_shot(Key::N) { actions.push(UiAction::AddPhoto); }
        if self.window.is_key_down(Key::A) { actions.push(UiAction::Orbit(-ORBIT_STEP)); }
        if self.window.is_key_down(Key::D) { actions.push(UiAction::Orbit(ORBIT_STEP)); }

        // Left click: edge-triggered.  Right drag: move the simulated hand.
        let pos = self.window.get_mouse_pos(MouseMode::Discard);
        let down = self.window.get_mouse_down(MouseButton::Left);
        if down && !self.mouse_down {
            if let Some((x, y)) = pos {
                actions.push(UiAction::Click { x, y });
            }
        }
        self.mouse_down = down;

        for key in sim {
            let _ = self.sim_tx.send(SimInput::KeyDown(key));
        }
        if self.window.get_mouse_down(MouseButton::Right) {
            if let Some((x, y)) = pos {
                let _ = self.sim_tx.send(SimInput::HandAt {
                    x: x / WIN_W as f32,
                    y: y / WIN_H as f32,
                });
            }
        }

        Some(actions)
    }

    /// Render one frame.
    pub fn render(&mut self, app: &AppState) {
        let scene   = app.scene();
        let session = app.session();
        let camera  = scene.camera;

        // Clear
        self.buf.fill(BG_COLOR);

        // ── Snow, world space, additive ───────────────────────────────────
        let eye = camera.position();
        for flake in scene.snow().poses(scene.elapsed(), eye) {
            if flake.alpha <= 0.0 { continue }
            let Some(s) = camera.project(flake.position, WIN_W, WIN_H) else { continue };
            let r = (flake.scale * s.scale * 0.05).min(2.0);
            let color = 0xFF000000 | flake.color;
            if r < 1.0 {
                self.add_pixel(s.x as i32, s.y as i32, color, flake.alpha);
            } else {
                self.add_disc(s.x, s.y, r, color, flake.alpha);
            }
        }

        // ── Needles ───────────────────────────────────────────────────────
        let needles = scene.needles();
        for (p, particle) in needles.iter().zip(scene.foliage().particles()) {
            let Some(s) = project(&camera, *p) else { continue };
            let r = (particle.size * s.scale * 0.5).clamp(0.5, 2.5);
            let color = 0xFF000000 | particle.color;
            if r < 1.0 {
                self.glow_pixel(s.x as i32, s.y as i32, color, 0.7);
            } else {
                self.fill_disc(s.x, s.y, r, color);
            }
        }

        // ── Ornaments ─────────────────────────────────────────────────────
        for pose in scene.ornaments().poses(scene.elapsed()) {
            let Some(s) = project(&camera, pose.position) else { continue };
            let r = (pose.scale * s.scale * 0.5).max(1.0);
            let color = 0xFF000000 | pose.color;
            match pose.kind {
                OrnamentKind::Sphere => {
                    self.fill_disc(s.x, s.y, r, color);
                    self.fill_disc(s.x - r * 0.35, s.y - r * 0.35, r * 0.3, blend(color, 0xFFFFFFFF, 0.6));
                }
                OrnamentKind::Cube => {
                    let half = r * (0.75 + 0.25 * pose.spin.1.sin().abs());
                    self.fill_box(s.x, s.y, half, half, color);
                }
            }
        }

        // ── Star ──────────────────────────────────────────────────────────
        self.draw_star(&camera, app);

        // ── Polaroids, far to near ────────────────────────────────────────
        let mut cards: Vec<(Projected, f32, f32, u32)> = scene.polaroids().poses()
            .filter_map(|(id, pose)| {
                let s = project(&camera, pose.position)?;
                let facing = (pose.yaw - camera.heading()).cos().abs().max(0.08);
                let tint = app.photos().photos().iter()
                    .find(|p| p.id == id)
                    .map(|p| p.tint)
                    .unwrap_or(0x888888);
                Some((s, pose.scale, facing, tint))
            })
            .collect();
        cards.sort_by(|a, b| b.0.depth.total_cmp(&a.0.depth));

        for (s, scale, facing, tint) in cards {
            let hw = POLAROID_WIDTH  * 0.5 * scale * facing * s.scale;
            let hh = POLAROID_HEIGHT * 0.5 * scale * s.scale;
            self.fill_box(s.x, s.y, hw, hh, PAPER);
            // Photo window sits high on the card, leaving the wide bottom strip.
            self.fill_box(s.x, s.y - hh * 0.12, hw * 0.86, hh * 0.72, 0xFF000000 | tint);
        }

        // ── Letter ────────────────────────────────────────────────────────
        self.draw_letter(&camera, app);

        // ── Hand marker ───────────────────────────────────────────────────
        if let Some((hx, hy)) = session.hand_position() {
            let (x, y) = (hx * WIN_W as f32, hy * WIN_H as f32);
            self.draw_ring(x, y, 10.0, HAND_COLOR);
            self.draw_label(session.displayed_pose().name(), x as usize + 14, y as usize, HAND_COLOR);
        }

        // ── Status bar ────────────────────────────────────────────────────
        self.fill_rect(0, STATUS_Y, WIN_W, WIN_H - STATUS_Y, TEXT_BG);
        let selection = match session.selection() {
            Some(i) => format!("{}", i + 1),
            None    => "-".to_string(),
        };
        let line = format!(
            "MODE: {}   INPUT: {}   POSE: {} {}/{}   PHOTOS: {}/{}   SEL: {}",
            session.mode(),
            app.status().label(),
            session.debouncer().current(),
            session.debouncer().state().count,
            session.debouncer().config().required_frames,
            app.photos().len(),
            MAX_PHOTOS,
            selection,
        );
        self.draw_label(&line, 10, STATUS_Y + 6, 0xFFEEEEEE);
        self.draw_label(&app.status, 10, STATUS_Y + 16, GOLD);

        // ── Key legend ────────────────────────────────────────────────────
        self.draw_label(
            "1/O=open  2/F=fist  3/P=pinch  0/H=no hand  arrows/right-drag=move  click=tree/letter  N=photo  A/D=orbit  Q=quit",
            10, WIN_H - 10, 0xFF888888,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Star ──────────────────────────────────────────────────────────────

    fn draw_star(&mut self, camera: &Camera, app: &AppState) {
        let pose = app.scene().star();
        if pose.glow <= 0.01 {
            return;
        }
        let centre = pose.position;
        let Some(c) = project(camera, centre) else { return };
        let color = blend(BG_COLOR, GOLD, pose.glow);

        // Halo
        let halo = star::OUTER_RADIUS * c.scale * (1.6 + 0.3 * pose.wobble.sin());
        self.draw_ring(c.x, c.y, halo, blend(BG_COLOR, GOLD, pose.glow * 0.4));

        let (sin_s, cos_s) = pose.spin.sin_cos();
        let points: Vec<(f32, f32)> = star::outline().iter()
            .filter_map(|&(x, y)| {
                let p = centre + Vec3::new(x * cos_s, y, x * sin_s);
                project(camera, p).map(|s| (s.x, s.y))
            })
            .collect();
        for i in 0..points.len() {
            let (x0, y0) = points[i];
            let (x1, y1) = points[(i + 1) % points.len()];
            self.draw_line(x0, y0, x1, y1, color);
            self.draw_line(c.x, c.y, x0, y0, color);
        }
    }

    // ── Letter ────────────────────────────────────────────────────────────

    fn draw_letter(&mut self, camera: &Camera, app: &AppState) {
        let pose = app.scene().letter();
        let body = pose.body;
        let Some(s) = project(camera, body.position) else { return };

        let facing = (body.yaw - camera.heading()).cos().abs().max(0.08);
        let hw = ENVELOPE_WIDTH  * 0.5 * body.scale * facing * s.scale;
        let hh = ENVELOPE_HEIGHT * 0.5 * body.scale * s.scale;

        // Sheet slides up out of the envelope.
        let (sheet_y, _) = pose.sheet;
        if sheet_y > 0.01 {
            let lift = sheet_y * body.scale * s.scale;
            self.fill_box(s.x, s.y - lift, hw * 0.9, hh * 0.95, PAPER);
            if app.session().letter_focused() && hw > 60.0 {
                self.draw_label("MERRY CHRISTMAS!", (s.x - 32.0).max(0.0) as usize, (s.y - lift - hh * 0.5).max(0.0) as usize, ENVELOPE);
            }
        }

        self.fill_box(s.x, s.y, hw, hh, ENVELOPE);
        self.draw_border_f(s.x, s.y, hw, hh, GOLD);

        // Flap: 0 folds the tip down onto the envelope, -π flips it up.
        let top = s.y - hh;
        let tip = top + hh * pose.flap.cos();
        self.draw_line(s.x - hw, top, s.x, tip, GOLD);
        self.draw_line(s.x + hw, top, s.x, tip, GOLD);

        if app.session().mode() == InteractionMode::Tree && !app.session().letter_focused() {
            self.draw_label("click", (s.x - 10.0).max(0.0) as usize, (s.y + hh + 4.0) as usize, 0xFF888888);
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y+h).min(WIN_H) {
            for col in x..(x+w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    /// Filled box from a centre point and half extents, clipped.
    fn fill_box(&mut self, cx: f32, cy: f32, hw: f32, hh: f32, color: u32) {
        let x0 = (cx - hw).max(0.0) as usize;
        let y0 = (cy - hh).max(0.0) as usize;
        let x1 = (cx + hw).clamp(0.0, WIN_W as f32) as usize;
        let y1 = (cy + hh).clamp(0.0, STATUS_Y as f32) as usize;
        if x1 > x0 && y1 > y0 {
            self.fill_rect(x0, y0, x1 - x0, y1 - y0, color);
        }
    }

    fn draw_border_f(&mut self, cx: f32, cy: f32, hw: f32, hh: f32, color: u32) {
        let (l, r, t, b) = (cx - hw, cx + hw, cy - hh, cy + hh);
        self.draw_line(l, t, r, t, color);
        self.draw_line(r, t, r, b, color);
        self.draw_line(r, b, l, b, color);
        self.draw_line(l, b, l, t, color);
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < WIN_W && (y as usize) < STATUS_Y {
            self.buf[y as usize * WIN_W + x as usize] = color;
        }
    }

    fn glow_pixel(&mut self, x: i32, y: i32, color: u32, t: f32) {
        if x >= 0 && y >= 0 && (x as usize) < WIN_W && (y as usize) < STATUS_Y {
            let i = y as usize * WIN_W + x as usize;
            self.buf[i] = blend(self.buf[i], color, t);
        }
    }

    /// Additive blend, saturating per channel.
    fn add_pixel(&mut self, x: i32, y: i32, color: u32, t: f32) {
        if x >= 0 && y >= 0 && (x as usize) < WIN_W && (y as usize) < STATUS_Y {
            let i = y as usize * WIN_W + x as usize;
            self.buf[i] = add(self.buf[i], color, t);
        }
    }

    fn add_disc(&mut self, cx: f32, cy: f32, r: f32, color: u32, t: f32) {
        let ri = r.ceil() as i32;
        let (x0, y0) = (cx as i32, cy as i32);
        for dy in -ri..=ri {
            for dx in -ri..=ri {
                if (dx * dx + dy * dy) as f32 <= r * r {
                    self.add_pixel(x0 + dx, y0 + dy, color, t);
                }
            }
        }
    }

    fn fill_disc(&mut self, cx: f32, cy: f32, r: f32, color: u32) {
        let ri = r.ceil() as i32;
        let (x0, y0) = (cx as i32, cy as i32);
        for dy in -ri..=ri {
            for dx in -ri..=ri {
                if (dx * dx + dy * dy) as f32 <= r * r {
                    self.set_pixel(x0 + dx, y0 + dy, color);
                }
            }
        }
    }

    fn draw_ring(&mut self, cx: f32, cy: f32, r: f32, color: u32) {
        let steps = ((r * 2.0 * PI) as usize).clamp(12, 720);
        for i in 0..steps {
            let a = i as f32 / steps as f32 * 2.0 * PI;
            self.set_pixel((cx + a.cos() * r) as i32, (cy + a.sin() * r) as i32, color);
        }
    }

    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: u32) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().min(4000.0) as usize;
        if steps == 0 {
            self.set_pixel(x0 as i32, y0 as i32, color);
            return;
        }
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.set_pixel((x0 + (x1 - x0) * t) as i32, (y0 + (y1 - y0) * t) as i32, color);
        }
    }

    /// Minimal bitmap font — 3×5 characters for labels.
    /// Each character is encoded as 5 rows × 3 bits.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        let (px, py) = (cx + col, y + row);
                        if px < WIN_W && py < WIN_H {
                            self.buf[py * WIN_W + px] = color;
                        }
                    }
                }
            }
            cx += 4; // 3 wide + 1 gap
            if cx + 4 > WIN_W { break; }
        }
    }
}

/// Project a scene-local point.
fn project(camera: &Camera, local: Vec3) -> Option<Projected> {
    camera.project(to_world(local), WIN_W, WIN_H)
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '>' => [0b100, 0b010, 0b001, 0b010, 0b100],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '?' => [0b111, 0b001, 0b011, 0b000, 0b010],
        '_' => [0b000, 0b000, 0b000, 0b000, 0b111],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0-t) + cb as f32 * t) as u32;
    let ar = (a >> 16) & 0xFF; let br = (b >> 16) & 0xFF;
    let ag = (a >>  8) & 0xFF; let bg = (b >>  8) & 0xFF;
    let ab =  a        & 0xFF; let bb =  b        & 0xFF;
    0xFF000000 | (lerp(ar,br) << 16) | (lerp(ag,bg) << 8) | lerp(ab,bb)
}

/// `a + b·t` per channel, clamped at white.
fn add(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let ch = |shift: u32| {
        let sum = ((a >> shift) & 0xFF) as f32 + ((b >> shift) & 0xFF) as f32 * t;
        (sum.min(255.0) as u32) << shift
    };
    0xFF000000 | ch(16) | ch(8) | ch(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn additive_blend_saturates() {
        assert_eq!(add(0xFF102030, 0xFF000000, 1.0), 0xFF102030);
        assert_eq!(add(0xFF102030, 0xFF102030, 0.5), 0xFF183048);
        assert_eq!(add(0xFFF0F0F0, 0xFFE0F2FE, 1.0), 0xFFFFFFFF);
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend(0xFF000000, 0xFFFFFFFF, 0.0), 0xFF000000);
        assert_eq!(blend(0xFF000000, 0xFFFFFFFF, 1.0), 0xFFFFFFFF);
        assert_eq!(blend(0x00102030, 0x00102030, 0.5), 0xFF102030);
    }

    #[test]
    fn status_glyphs_are_defined() {
        let fallback = char_glyph('\u{1}');
        for ch in "MODE: TREE -> CAROUSEL (click) Q?!".chars().filter(|c| *c != ' ') {
            assert_ne!(char_glyph(ch), fallback, "missing glyph {:?}", ch);
        }
    }
}
