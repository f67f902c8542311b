//! The photo library behind the polaroids.
//!
//! Newest photos come first.  The library holds at most [`MAX_PHOTOS`];
//! adding a batch pushes the oldest ones out, and those are handed back to
//! the caller to release.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const MAX_PHOTOS:  usize = 30;
/// Longest edge a photo is scaled down to.
pub const MAX_EDGE:    u32   = 1024;

const EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "JPG"];

#[derive(Clone, Debug, PartialEq)]
pub struct Photo {
    pub id:     u64,
    pub name:   String,
    /// Size after fitting within [`MAX_EDGE`].
    pub width:  u32,
    pub height: u32,
    /// Flat color the software renderer paints in place of the image.
    pub tint:   u32,
}

impl Photo {
    pub fn ratio(&self) -> f32 {
        if self.height == 0 { 1.0 } else { self.width as f32 / self.height as f32 }
    }
}

/// A photo before it joins the library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoMeta {
    pub name:   String,
    pub width:  u32,
    pub height: u32,
}

/// Scale `(w, h)` so the longer edge is at most `max`, keeping the ratio.
/// Square images are limited by height.
pub fn fit_within(w: u32, h: u32, max: u32) -> (u32, u32) {
    if w > h {
        if w > max {
            let scaled = (h as f64 * max as f64 / w as f64).round() as u32;
            return (max, scaled.max(1));
        }
    } else if h > max {
        let scaled = (w as f64 * max as f64 / h as f64).round() as u32;
        return (scaled.max(1), max);
    }
    (w, h)
}

pub struct PhotoLibrary {
    photos:   Vec<Photo>,
    capacity: usize,
    next_id:  u64,
}

impl Default for PhotoLibrary {
    fn default() -> Self { PhotoLibrary::new(MAX_PHOTOS) }
}

impl PhotoLibrary {
    pub fn new(capacity: usize) -> Self {
        PhotoLibrary { photos: Vec::new(), capacity, next_id: 1 }
    }

    /// Prepend a batch (kept in its own order) and return whatever fell off
    /// the end.
    pub fn add_batch(&mut self, batch: Vec<PhotoMeta>) -> Vec<Photo> {
        let mut combined: Vec<Photo> = batch.into_iter().map(|m| self.admit(m)).collect();
        combined.append(&mut self.photos);
        let evicted = if combined.len() > self.capacity {
            combined.split_off(self.capacity)
        } else {
            Vec::new()
        };
        self.photos = combined;
        for p in &evicted {
            log::debug!("photo {} ({}) evicted", p.id, p.name);
        }
        evicted
    }

    fn admit(&mut self, meta: PhotoMeta) -> Photo {
        let id = self.next_id;
        self.next_id += 1;
        let (width, height) = fit_within(meta.width, meta.height, MAX_EDGE);
        Photo { id, name: meta.name, width, height, tint: tint_for(id) }
    }

    /// A stand-in photo for the keyboard-driven demo.
    pub fn add_placeholder(&mut self, key: u32) -> Vec<Photo> {
        let (w, h) = if key % 2 == 0 { (1600, 1200) } else { (1080, 1350) };
        self.add_batch(vec![PhotoMeta { name: format!("placeholder-{}", key), width: w, height: h }])
    }

    /// Add every readable image in `dir`, sorted by file name.  Unreadable
    /// files are logged and skipped.
    pub fn load_dir(&mut self, dir: &Path) -> std::io::Result<Vec<Photo>> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension()
                .and_then(|e| e.to_str())
                .map(|e| EXTENSIONS.contains(&e))
                .unwrap_or(false))
            .collect();
        paths.sort();

        let mut batch = Vec::new();
        for path in paths {
            match image::image_dimensions(&path) {
                Ok((width, height)) => {
                    let name = path.file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    batch.push(PhotoMeta { name, width, height });
                }
                Err(e) => log::warn!("skipping {}: {}", path.display(), e),
            }
        }
        log::info!("loaded {} photo(s) from {}", batch.len(), dir.display());
        Ok(self.add_batch(batch))
    }

    pub fn photos(&self) -> &[Photo] { &self.photos }
    pub fn len(&self) -> usize { self.photos.len() }
    pub fn is_empty(&self) -> bool { self.photos.is_empty() }
    pub fn ids(&self) -> Vec<u64> { self.photos.iter().map(|p| p.id).collect() }
}

/// Warm pastel derived from the photo id.
fn tint_for(id: u64) -> u32 {
    let mut rng = StdRng::seed_from_u64(id);
    let r: u32 = rng.gen_range(150..=255);
    let g: u32 = rng.gen_range(110..=220);
    let b: u32 = rng.gen_range(90..=200);
    (r << 16) | (g << 8) | b
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(name: &str) -> PhotoMeta {
        PhotoMeta { name: name.into(), width: 800, height: 600 }
    }

    #[test]
    fn fit_keeps_small_images() {
        assert_eq!(fit_within(800, 600, 1024), (800, 600));
    }

    #[test]
    fn fit_limits_longer_edge() {
        assert_eq!(fit_within(4000, 3000, 1024), (1024, 768));
        assert_eq!(fit_within(3000, 4000, 1024), (768, 1024));
        assert_eq!(fit_within(2048, 2048, 1024), (1024, 1024));
    }

    #[test]
    fn batch_is_prepended_in_order() {
        let mut lib = PhotoLibrary::default();
        lib.add_batch(vec![meta("a")]);
        lib.add_batch(vec![meta("b"), meta("c")]);
        let names: Vec<_> = lib.photos().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut lib = PhotoLibrary::default();
        let first: Vec<_> = (0..25).map(|i| meta(&format!("old{}", i))).collect();
        assert!(lib.add_batch(first).is_empty());
        let second: Vec<_> = (0..10).map(|i| meta(&format!("new{}", i))).collect();
        let evicted = lib.add_batch(second);

        assert_eq!(lib.len(), MAX_PHOTOS);
        assert_eq!(evicted.len(), 5);
        assert_eq!(evicted[0].name, "old20");
        assert_eq!(lib.photos()[0].name, "new0");
    }

    #[test]
    fn ids_are_unique() {
        let mut lib = PhotoLibrary::default();
        for k in 0..40 { lib.add_placeholder(k); }
        let mut ids = lib.ids();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), MAX_PHOTOS);
    }

    #[test]
    fn load_dir_skips_unreadable() {
        let dir = std::env::temp_dir().join(format!("xmas_tree_photos_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("broken.png"), b"not a png").unwrap();
        std::fs::write(dir.join("notes.txt"), b"ignored").unwrap();

        let mut lib = PhotoLibrary::default();
        let evicted = lib.load_dir(&dir).unwrap();
        assert!(evicted.is_empty());
        assert!(lib.is_empty());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn load_dir_reads_and_fits_dimensions() {
        let dir = std::env::temp_dir().join(format!("xmas_tree_png_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        image::RgbImage::new(2048, 512).save(dir.join("wide.png")).unwrap();
        image::RgbImage::new(40, 30).save(dir.join("small.png")).unwrap();

        let mut lib = PhotoLibrary::default();
        lib.load_dir(&dir).unwrap();
        let photos = lib.photos();
        assert_eq!(photos.len(), 2);
        assert_eq!((photos[0].name.as_str(), photos[0].width, photos[0].height), ("small.png", 40, 30));
        assert_eq!((photos[1].width, photos[1].height), (1024, 256));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_dir_is_io_error() {
        let mut lib = PhotoLibrary::default();
        assert!(lib.load_dir(Path::new("/definitely/not/here")).is_err());
    }
}
