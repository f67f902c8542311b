//! # xmas_tree
//!
//! Gesture-driven holiday tree.  Hand landmarks drive a five-state scene:
//! a particle tree that scatters, a carousel of photo polaroids, a focused
//! photo, and a letter prop.
//!
//! ## Gesture → Action mapping
//!
//! | Mode | Held pose | Result |
//! |---|---|---|
//! | TREE | Open hand | Unleash the particles (UNLEASHED) |
//! | UNLEASHED | Open hand | Photo carousel (CAROUSEL), needs at least one photo |
//! | CAROUSEL | Open hand, moving | Scroll the carousel |
//! | CAROUSEL | Pinch | Focus the photo nearest the centre (FOCUS) |
//! | FOCUS | Open hand | Back to the carousel |
//! | anything but TREE | Fist | Reform the tree (TREE) |
//!
//! A pose counts once it has been held for ten consecutive frames, and only
//! one mode change is accepted per second.  Clicking the tree toggles
//! TREE ⇄ UNLEASHED; clicking the letter opens or closes it.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: keyboard shortcuts pose a synthetic hand.
//! * `leap` — **Hardware mode**: landmarks from a real LeapMotion controller.
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Effect |
//! |---|---|
//! | `1` / `O` | Open hand |
//! | `2` / `F` | Fist |
//! | `3` / `P` | Pinch |
//! | `0` / `H` | Hand leaves the view |
//! | Arrows, right-drag | Move the hand |
//! | Left click | Tree / letter |
//! | `N` | Add a placeholder photo |
//! | `A` / `D` | Orbit the camera |
//! | `Q` / `Escape` | Quit |

pub mod source;
pub mod controller;
pub mod photos;
pub mod scene;
pub mod app;
pub mod visualizer;

pub use app::{run, AppConfig, AppError, AppState};
pub use controller::{GestureController, Status, INIT_TIMEOUT};
pub use photos::{Photo, PhotoLibrary, PhotoMeta, MAX_PHOTOS};
pub use scene::{Pick, Scene};
pub use source::{LandmarkSource, SimHandSource, SimInput, SimKey, SourceError, SourceInit};
