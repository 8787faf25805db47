use portafolio::cli::CliHandler;
use portafolio::config::{PageFile, PageSource};
use portafolio::page::{Page, PageLayout};
use portafolio::scroll::ROW_UNITS;
use std::io::Write;

const PAGE_TOML: &str = r#"
[profile]
name = "Ada"
tagline = "Mathematician"

[hero]
phrases = ["Analyst", "Programmer"]

[navbar]
brand = "ada.dev"

[[navbar.link]]
label = "About"
target = "about"

[[navbar.link]]
label = "Contact"
target = "contact"

[[section]]
id = "about"
title = "About"
body = "Hello."

[[section.card]]
title = "Notes"
lines = ["First computer program"]

[[section]]
id = "contact"
title = "Contact"
body = "Say hello."

[contact]
recipient = "ada@example.com"

[footer]
text = "Ada"
"#;

fn write_page(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

/// A page file on disk drives the whole pipeline: load, build, measure.
#[test]
fn test_page_file_drives_layout_end_to_end() {
    let file = write_page(PAGE_TOML);
    let (loaded, source) = PageFile::load(Some(file.path())).unwrap();
    assert_eq!(source, PageSource::File(file.path().to_path_buf()));
    assert!(loaded.lint().is_empty(), "{:?}", loaded.lint());

    let page = Page::from_file(&loaded);
    assert_eq!(page.brand, "ada.dev");
    assert_eq!(page.recipient.as_deref(), Some("ada@example.com"));
    assert_eq!(page.nav_links.len(), 2);

    let layout = PageLayout::measure(&page, 80);
    // Hero first, then the declared sections in order.
    let ids: Vec<&str> = layout.sections().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["home", "about", "contact"]);
    assert_eq!(layout.section_top("home"), Some(0));
    let about_top = layout.section_top("about").unwrap();
    assert!(about_top > 0 && about_top % ROW_UNITS == 0);
    assert_eq!(layout.card_rects().len(), 1);
    assert!(layout.total_rows() > 0);
}

/// Without a hero the typing line is disabled and the first section starts
/// at the top of the page.
#[test]
fn test_page_without_hero_starts_at_first_section() {
    let file = write_page(
        r#"
        [profile]
        name = "Ada"

        [[section]]
        id = "about"
        title = "About"
        body = "Hello."
        "#,
    );
    let (loaded, _) = PageFile::load(Some(file.path())).unwrap();
    assert!(loaded.typing_phrases().is_empty());

    let page = Page::from_file(&loaded);
    let layout = PageLayout::measure(&page, 80);
    assert_eq!(layout.section_top("about"), Some(0));
    assert_eq!(layout.section_top("home"), None);
}

/// An explicit path that cannot be loaded is an error, never a silent
/// fallback to the built-in sample.
#[test]
fn test_explicit_path_errors_do_not_fall_back() {
    let err = PageFile::load(Some(std::path::Path::new("/no/such/page.toml"))).unwrap_err();
    assert!(format!("{err:#}").contains("page.toml"));

    let file = write_page("this is not toml = [");
    assert!(PageFile::load(Some(file.path())).is_err());
}

/// `portafolio check` accepts a valid page; lint findings are warnings,
/// not failures.
#[test]
fn test_check_command_accepts_valid_page() {
    let file = write_page(PAGE_TOML);
    assert!(CliHandler::handle_check(Some(file.path())).is_ok());

    let warned = write_page(
        r#"
        [profile]
        name = "Ada"

        [[navbar.link]]
        label = "Ghost"
        target = "nowhere"
        "#,
    );
    assert!(CliHandler::handle_check(Some(warned.path())).is_ok());
}
