use portafolio::images::{ImageManager, LazyImageLoader, LazyState, TerminalProtocol};
use portafolio::observe::{IntersectionWatcher, PageRect};
use portafolio::scroll::ROW_UNITS;
use std::path::PathBuf;

fn kitty_loader() -> LazyImageLoader {
    LazyImageLoader::new(ImageManager::with_protocol(TerminalProtocol::Kitty))
}

fn write_png(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    image::DynamicImage::new_rgb8(4, 4)
        .save(&path)
        .expect("write test image");
    path
}

/// The full deferred flow: the image is watched, scrolling it into view
/// reports entry once, the entry promotes and loads it, and unobserving
/// keeps later scrolls from touching it again.
#[tokio::test]
async fn test_deferred_image_loads_once_on_entry() {
    let dir = tempfile::tempdir().unwrap();
    let png = write_png(&dir, "portrait.png");

    let mut loader = kitty_loader();
    loader.register("about.img0", "portrait", None, Some(png));
    assert_eq!(loader.deferred_keys(), vec!["about.img0".to_string()]);

    // Any overlap at all counts, like the app's image watcher.
    let mut watcher = IntersectionWatcher::new(0.0, 0);
    let rect = PageRect::new(40 * ROW_UNITS, 6 * ROW_UNITS);
    watcher.observe("about.img0", rect);
    let viewport_units = 12 * ROW_UNITS;

    // Far above the image: nothing enters.
    assert!(watcher.sweep(0, viewport_units).is_empty());

    // Scrolled to it: one entry, which drives promote + load.
    let entered = watcher.sweep(35 * ROW_UNITS, viewport_units);
    assert_eq!(entered, vec!["about.img0".to_string()]);
    for key in entered {
        assert!(loader.promote(&key));
        watcher.unobserve(&key);
        loader.load(&key).await;
    }

    let image = loader.get("about.img0").unwrap();
    assert!(image.is_loaded());
    assert_eq!(image.deferred_source(), None);
    assert_eq!(loader.loaded_count(), 1);

    // Away and back: no longer watched, nothing re-fires.
    assert!(watcher.sweep(0, viewport_units).is_empty());
    assert!(watcher.sweep(35 * ROW_UNITS, viewport_units).is_empty());
    assert!(watcher.is_empty());
}

/// Eager images skip the watcher entirely and load up front; deferred ones
/// stay pending until promoted.
#[tokio::test]
async fn test_eager_images_load_up_front() {
    let dir = tempfile::tempdir().unwrap();
    let eager = write_png(&dir, "eager.png");
    let lazy = write_png(&dir, "lazy.png");

    let mut loader = kitty_loader();
    loader.register("hero.img0", "headshot", Some(eager), None);
    loader.register("about.img0", "portrait", None, Some(lazy));

    loader.load_eager().await;
    assert_eq!(loader.loaded_count(), 1);
    assert!(loader.get("hero.img0").unwrap().is_loaded());
    assert!(matches!(
        loader.get("about.img0").unwrap().state(),
        LazyState::Pending
    ));
    assert_eq!(loader.deferred_keys(), vec!["about.img0".to_string()]);
}

/// A deferred source that turns out to be unreadable fails quietly and is
/// not retried by a second load call.
#[test]
fn test_unreadable_source_stays_failed() {
    let mut loader = kitty_loader();
    loader.register(
        "about.img0",
        "portrait",
        None,
        Some(PathBuf::from("assets/portrait.png")),
    );
    assert!(loader.promote("about.img0"));
    tokio_test::block_on(loader.load("about.img0"));
    assert!(matches!(
        loader.get("about.img0").unwrap().state(),
        LazyState::Failed
    ));

    tokio_test::block_on(loader.load("about.img0"));
    assert!(matches!(
        loader.get("about.img0").unwrap().state(),
        LazyState::Failed
    ));
    assert_eq!(loader.loaded_count(), 0);
}

/// Without terminal graphics the manager reports no support and hands out
/// alt-text placeholders instead.
#[test]
fn test_plain_terminal_gets_placeholders() {
    let manager = ImageManager::with_protocol(TerminalProtocol::None);
    assert!(!manager.supports_images());

    let lines = manager.generate_placeholder("portrait", 24);
    assert!(lines.iter().any(|l| l.contains("portrait")));
}
