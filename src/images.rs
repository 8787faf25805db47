//! Terminal graphics and lazy image loading.
//!
//! The page file may attach images to sections. Images with a deferred
//! source stay unloaded until they scroll into view; the loader then
//! promotes the deferred source to the real one exactly once, decodes the
//! file, and encodes it for whatever graphics protocol the terminal
//! advertises. A terminal with no protocol support never registers the
//! images for watching, so they simply never load.

use anyhow::{anyhow, Result};
use image::{DynamicImage, ImageOutputFormat};
use std::io::Cursor;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Supported terminal graphics protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalProtocol {
    /// Kitty graphics protocol
    Kitty,
    /// Sixel graphics protocol
    Sixel,
    /// No graphics support
    None,
}

impl TerminalProtocol {
    /// Detect the protocol from the environment.
    pub fn detect() -> Self {
        Self::classify(
            std::env::var("TERM").ok().as_deref(),
            std::env::var("TERM_PROGRAM").ok().as_deref(),
            std::env::var("KITTY_WINDOW_ID").is_ok(),
        )
    }

    /// Classify from the relevant environment values.
    fn classify(term: Option<&str>, term_program: Option<&str>, kitty_window: bool) -> Self {
        if let Some(term) = term {
            if term.contains("kitty") {
                return Self::Kitty;
            }
            if term.contains("xterm") || term.contains("foot") || term.contains("wezterm") {
                return Self::Sixel;
            }
        }
        if term_program == Some("kitty") {
            return Self::Kitty;
        }
        if kitty_window {
            return Self::Kitty;
        }
        Self::None
    }

    pub fn supports_images(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// An image encoded and ready for the terminal.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub width: u32,
    pub height: u32,
    /// Escape sequence (or placeholder text) for the detected protocol.
    pub payload: String,
}

impl EncodedImage {
    /// Terminal rows the payload renders over, at 16 pixel rows per cell.
    pub fn cell_rows(&self) -> usize {
        (self.height as usize + 15) / 16
    }

    /// Terminal columns the payload renders over, at 8 pixel columns per cell.
    pub fn cell_cols(&self) -> usize {
        (self.width as usize + 7) / 8
    }
}

/// Decodes, resizes, and encodes images for the terminal.
#[derive(Debug, Clone)]
pub struct ImageManager {
    protocol: TerminalProtocol,
    max_cols: u32,
    max_rows: u32,
}

impl ImageManager {
    pub fn new() -> Self {
        Self {
            protocol: TerminalProtocol::detect(),
            max_cols: 80,
            max_rows: 24,
        }
    }

    /// Fixed protocol, for tests and `--no-graphics`.
    pub fn with_protocol(protocol: TerminalProtocol) -> Self {
        Self {
            protocol,
            max_cols: 80,
            max_rows: 24,
        }
    }

    /// Set maximum display dimensions (in terminal cells).
    pub fn set_max_dimensions(&mut self, cols: u32, rows: u32) {
        self.max_cols = cols.max(4);
        self.max_rows = rows.max(2);
    }

    pub fn protocol(&self) -> TerminalProtocol {
        self.protocol
    }

    /// Current display budget as `(cols, rows)`.
    pub fn max_dimensions(&self) -> (u32, u32) {
        (self.max_cols, self.max_rows)
    }

    pub fn supports_images(&self) -> bool {
        self.protocol.supports_images()
    }

    /// Read, decode, resize, and encode an image file.
    pub async fn load_from_path(&self, path: &PathBuf) -> Result<EncodedImage> {
        let bytes = tokio::fs::read(path).await?;
        let img = image::load_from_memory(&bytes)?;
        let resized = self.resize_for_terminal(&img);
        let payload = self.encode_for_terminal(&resized)?;
        Ok(EncodedImage {
            width: resized.width(),
            height: resized.height(),
            payload,
        })
    }

    /// Resize to fit the cell budget, assuming roughly 8x16 pixel cells.
    /// Never upscales.
    fn resize_for_terminal(&self, img: &DynamicImage) -> DynamicImage {
        let (orig_width, orig_height) = (img.width(), img.height());
        let max_pixel_width = self.max_cols * 8;
        let max_pixel_height = self.max_rows * 16;

        let scale_w = max_pixel_width as f32 / orig_width as f32;
        let scale_h = max_pixel_height as f32 / orig_height as f32;
        let scale = scale_w.min(scale_h).min(1.0);

        if scale < 1.0 {
            let new_width = (orig_width as f32 * scale) as u32;
            let new_height = (orig_height as f32 * scale) as u32;
            img.resize(new_width, new_height, image::imageops::FilterType::Lanczos3)
        } else {
            img.clone()
        }
    }

    fn encode_for_terminal(&self, img: &DynamicImage) -> Result<String> {
        match self.protocol {
            TerminalProtocol::Kitty => self.encode_kitty(img),
            TerminalProtocol::Sixel => self.encode_sixel(img),
            TerminalProtocol::None => Err(anyhow!("terminal has no graphics protocol")),
        }
    }

    /// Kitty graphics command: transmit-and-display, PNG payload.
    fn encode_kitty(&self, img: &DynamicImage) -> Result<String> {
        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);
        img.write_to(&mut cursor, ImageOutputFormat::Png)?;

        use base64::{engine::general_purpose, Engine as _};
        let encoded = general_purpose::STANDARD.encode(&buffer);

        // a=T transmits and displays, f=100 marks the payload as PNG.
        Ok(format!("\x1b_Ga=T,f=100;{}\x1b\\", encoded))
    }

    /// Minimal Sixel encoding: grayscale-quantized bands, good enough for
    /// small portraits.
    fn encode_sixel(&self, img: &DynamicImage) -> Result<String> {
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut sixel = String::from("\x1bPq");
        for i in 0..16u16 {
            let level = i * 100 / 15;
            sixel.push_str(&format!("#{};2;{};{};{}", i, level, level, level));
        }
        for y in (0..height).step_by(6) {
            for x in 0..width {
                let pixel = rgb.get_pixel(x, y);
                let gray = (pixel[0] as u16 + pixel[1] as u16 + pixel[2] as u16) / 3;
                sixel.push_str(&format!("#{}", gray * 15 / 255));
                sixel.push('~');
            }
            sixel.push('-');
        }
        sixel.push_str("\x1b\\");
        Ok(sixel)
    }

    /// ASCII box placeholder for images that are not (or cannot be) loaded.
    pub fn generate_placeholder(&self, alt_text: &str, width: usize) -> Vec<String> {
        let width = width.max(8);
        let inner = width - 2;
        let mut text: String = alt_text.chars().take(inner).collect();
        if text.is_empty() {
            text = "image".to_string();
        }
        let padding = (inner - text.chars().count()) / 2;
        let mut line = String::from("│");
        line.extend(std::iter::repeat(' ').take(padding));
        line.push_str(&text);
        line.extend(std::iter::repeat(' ').take(inner - padding - text.chars().count()));
        line.push('│');

        vec![
            format!("┌{}┐", "─".repeat(inner)),
            line,
            format!("└{}┘", "─".repeat(inner)),
        ]
    }
}

impl Default for ImageManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Loading state of one page image.
#[derive(Debug, Clone)]
pub enum LazyState {
    Pending,
    Loaded(EncodedImage),
    Failed,
}

/// One page image tracked by the loader.
#[derive(Debug, Clone)]
pub struct LazyImage {
    key: String,
    alt: String,
    deferred_source: Option<PathBuf>,
    source: Option<PathBuf>,
    state: LazyState,
}

impl LazyImage {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn alt(&self) -> &str {
        &self.alt
    }

    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    pub fn deferred_source(&self) -> Option<&PathBuf> {
        self.deferred_source.as_ref()
    }

    pub fn state(&self) -> &LazyState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LazyState::Loaded(_))
    }
}

/// Tracks every page image and performs deferred loading.
#[derive(Debug)]
pub struct LazyImageLoader {
    manager: ImageManager,
    images: Vec<LazyImage>,
}

impl LazyImageLoader {
    pub fn new(manager: ImageManager) -> Self {
        Self {
            manager,
            images: Vec::new(),
        }
    }

    pub fn manager(&self) -> &ImageManager {
        &self.manager
    }

    pub fn supports_images(&self) -> bool {
        self.manager.supports_images()
    }

    /// Track an image. One of the sources may be `None`; an image with a
    /// deferred source waits for viewport entry, one with only an eager
    /// source loads at startup.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        alt: impl Into<String>,
        source: Option<PathBuf>,
        deferred_source: Option<PathBuf>,
    ) {
        self.images.push(LazyImage {
            key: key.into(),
            alt: alt.into(),
            deferred_source,
            source,
            state: LazyState::Pending,
        });
    }

    pub fn get(&self, key: &str) -> Option<&LazyImage> {
        self.images.iter().find(|i| i.key == key)
    }

    /// Keys that carry a deferred source and should be watched.
    pub fn deferred_keys(&self) -> Vec<String> {
        self.images
            .iter()
            .filter(|i| i.deferred_source.is_some())
            .map(|i| i.key.clone())
            .collect()
    }

    /// Promote the deferred source to the real source. True only the first
    /// time; afterwards there is no deferred source left to promote.
    pub fn promote(&mut self, key: &str) -> bool {
        let Some(image) = self.images.iter_mut().find(|i| i.key == key) else {
            return false;
        };
        match image.deferred_source.take() {
            Some(src) => {
                debug!("image '{}' promoted to {}", key, src.display());
                image.source = Some(src);
                true
            }
            None => false,
        }
    }

    /// Decode and encode the image behind `key`, if it has a real source
    /// and has not been tried yet.
    pub async fn load(&mut self, key: &str) {
        let Some(image) = self.images.iter_mut().find(|i| i.key == key) else {
            return;
        };
        if !matches!(image.state, LazyState::Pending) {
            return;
        }
        let Some(path) = image.source.clone() else {
            return;
        };
        match self.manager.load_from_path(&path).await {
            Ok(encoded) => {
                debug!(
                    "image '{}' loaded ({}x{})",
                    key, encoded.width, encoded.height
                );
                image.state = LazyState::Loaded(encoded);
            }
            Err(err) => {
                warn!(
                    "image '{}' failed to load from {}: {err:#}",
                    key,
                    path.display()
                );
                image.state = LazyState::Failed;
            }
        }
    }

    /// Load every image that already has an eager source.
    pub async fn load_eager(&mut self) {
        let keys: Vec<String> = self
            .images
            .iter()
            .filter(|i| i.source.is_some())
            .map(|i| i.key.clone())
            .collect();
        for key in keys {
            self.load(&key).await;
        }
    }

    pub fn loaded_count(&self) -> usize {
        self.images.iter().filter(|i| i.is_loaded()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_classification() {
        assert_eq!(
            TerminalProtocol::classify(Some("xterm-kitty"), None, false),
            TerminalProtocol::Kitty
        );
        assert_eq!(
            TerminalProtocol::classify(None, Some("kitty"), false),
            TerminalProtocol::Kitty
        );
        assert_eq!(
            TerminalProtocol::classify(None, None, true),
            TerminalProtocol::Kitty
        );
        assert_eq!(
            TerminalProtocol::classify(Some("xterm-256color"), None, false),
            TerminalProtocol::Sixel
        );
        assert_eq!(
            TerminalProtocol::classify(Some("foot"), None, false),
            TerminalProtocol::Sixel
        );
        assert_eq!(
            TerminalProtocol::classify(Some("linux"), None, false),
            TerminalProtocol::None
        );
        assert_eq!(
            TerminalProtocol::classify(None, None, false),
            TerminalProtocol::None
        );
    }

    #[test]
    fn test_protocol_support_flag() {
        assert!(TerminalProtocol::Kitty.supports_images());
        assert!(TerminalProtocol::Sixel.supports_images());
        assert!(!TerminalProtocol::None.supports_images());
    }

    #[test]
    fn test_promote_is_exactly_once() {
        let manager = ImageManager::with_protocol(TerminalProtocol::Kitty);
        let mut loader = LazyImageLoader::new(manager);
        loader.register(
            "about.img0",
            "portrait",
            None,
            Some(PathBuf::from("photo.jpg")),
        );

        assert!(loader.promote("about.img0"));
        let image = loader.get("about.img0").unwrap();
        assert_eq!(image.source(), Some(&PathBuf::from("photo.jpg")));
        assert_eq!(image.deferred_source(), None);

        // A second entry finds nothing left to promote.
        assert!(!loader.promote("about.img0"));
        assert!(!loader.promote("unknown"));
    }

    #[test]
    fn test_deferred_keys_skip_eager_images() {
        let manager = ImageManager::with_protocol(TerminalProtocol::Kitty);
        let mut loader = LazyImageLoader::new(manager);
        loader.register("a", "a", Some(PathBuf::from("eager.png")), None);
        loader.register("b", "b", None, Some(PathBuf::from("lazy.png")));
        assert_eq!(loader.deferred_keys(), vec!["b".to_string()]);
    }

    #[tokio::test]
    async fn test_load_missing_file_marks_failed() {
        let manager = ImageManager::with_protocol(TerminalProtocol::Kitty);
        let mut loader = LazyImageLoader::new(manager);
        loader.register(
            "x",
            "x",
            None,
            Some(PathBuf::from("/definitely/not/here.png")),
        );
        assert!(loader.promote("x"));
        loader.load("x").await;
        assert!(matches!(loader.get("x").unwrap().state(), LazyState::Failed));
        assert_eq!(loader.loaded_count(), 0);
    }

    #[tokio::test]
    async fn test_load_real_image_encodes_for_kitty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        image::DynamicImage::new_rgb8(4, 4).save(&path).unwrap();

        let manager = ImageManager::with_protocol(TerminalProtocol::Kitty);
        let mut loader = LazyImageLoader::new(manager);
        loader.register("dot", "a dot", None, Some(path));
        assert!(loader.promote("dot"));
        loader.load("dot").await;

        let image = loader.get("dot").unwrap();
        assert!(image.is_loaded());
        if let LazyState::Loaded(encoded) = image.state() {
            assert_eq!((encoded.width, encoded.height), (4, 4));
            assert!(encoded.payload.starts_with("\x1b_Ga=T,f=100;"));
            assert!(encoded.payload.ends_with("\x1b\\"));
        }
        assert_eq!(loader.loaded_count(), 1);
    }

    #[test]
    fn test_resize_never_upscales() {
        let manager = ImageManager::with_protocol(TerminalProtocol::Kitty);
        let small = DynamicImage::new_rgb8(10, 10);
        let resized = manager.resize_for_terminal(&small);
        assert_eq!((resized.width(), resized.height()), (10, 10));

        let huge = DynamicImage::new_rgb8(4000, 1000);
        let resized = manager.resize_for_terminal(&huge);
        assert!(resized.width() <= 80 * 8);
        assert!(resized.height() <= 24 * 16);
    }

    #[test]
    fn test_frame_budget_bounds_the_payload_span() {
        let mut manager = ImageManager::with_protocol(TerminalProtocol::Kitty);
        manager.set_max_dimensions(40, 4);

        let tall = DynamicImage::new_rgb8(1000, 1000);
        let resized = manager.resize_for_terminal(&tall);
        assert!(resized.height() <= 4 * 16);
        assert!(resized.width() <= 40 * 8);

        let encoded = EncodedImage {
            width: resized.width(),
            height: resized.height(),
            payload: String::new(),
        };
        assert!(encoded.cell_rows() <= 4);
        assert!(encoded.cell_cols() <= 40);
    }

    #[test]
    fn test_placeholder_box_shape() {
        let manager = ImageManager::with_protocol(TerminalProtocol::None);
        let lines = manager.generate_placeholder("portrait", 20);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('┌'));
        assert!(lines[1].contains("portrait"));
        assert!(lines[2].starts_with('└'));
        for line in &lines {
            assert_eq!(line.chars().count(), 20);
        }
    }
}
