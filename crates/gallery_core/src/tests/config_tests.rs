use std::{collections::HashMap, io::Write};

use super::*;

fn env(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn defaults_apply_without_sources() {
    let settings = GallerySettings::from_sources(None, env(&[])).expect("settings");
    assert_eq!(settings, GallerySettings::default());
    assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    assert_eq!(settings.items_per_row, 5);
    assert_eq!(settings.print_command, "lp");
}

#[test]
fn file_values_override_defaults() {
    let file = write_config(
        r#"
base_url = "http://127.0.0.1:9000/scans"
items_per_row = 3
download_dir = "/tmp/pdfs"
"#,
    );
    let settings = GallerySettings::from_sources(Some(file.path()), env(&[])).expect("settings");
    assert_eq!(settings.base_url, "http://127.0.0.1:9000/scans");
    assert_eq!(settings.items_per_row, 3);
    assert_eq!(settings.download_dir, PathBuf::from("/tmp/pdfs"));
    assert_eq!(settings.request_timeout_secs, 30);
    assert_eq!(
        settings.endpoints().expect("endpoints").list_url().as_str(),
        "http://127.0.0.1:9000/scans/"
    );
}

#[test]
fn environment_overrides_file() {
    let file = write_config("base_url = \"http://file.test/\"\nitems_per_row = 3\n");
    let settings = GallerySettings::from_sources(
        Some(file.path()),
        env(&[
            ("GALLERY_BASE_URL", "http://gallery.test/"),
            ("APP__BASE_URL", "http://app.test/"),
            ("GALLERY_ITEMS_PER_ROW", "4"),
            ("GALLERY_PRINT_COMMAND", "  lpr  "),
            ("GALLERY_REQUEST_TIMEOUT_SECS", ""),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.base_url, "http://app.test/");
    assert_eq!(settings.items_per_row, 4);
    assert_eq!(settings.print_command, "lpr");
    assert_eq!(settings.request_timeout_secs, 30);
}

#[test]
fn rejects_bad_numbers_and_zero_rows() {
    let err = GallerySettings::from_sources(None, env(&[("GALLERY_ITEMS_PER_ROW", "five")]))
        .expect_err("must fail");
    assert!(matches!(
        err,
        ConfigError::InvalidNumber { key, .. } if key == "GALLERY_ITEMS_PER_ROW"
    ));

    let err = GallerySettings::from_sources(None, env(&[("GALLERY_ITEMS_PER_ROW", "0")]))
        .expect_err("must fail");
    assert!(matches!(err, ConfigError::ZeroItemsPerRow));
}

#[test]
fn rejects_unknown_keys_and_bad_urls() {
    let file = write_config("colour = \"blue\"\n");
    let err = GallerySettings::from_sources(Some(file.path()), env(&[])).expect_err("must fail");
    assert!(matches!(err, ConfigError::Parse { .. }));

    let err = GallerySettings::from_sources(None, env(&[("GALLERY_BASE_URL", "ftp://x/")]))
        .expect_err("must fail");
    assert!(matches!(err, ConfigError::BaseUrl(_)));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let err = GallerySettings::from_sources(Some(Path::new("/nonexistent/gallery.toml")), env(&[]))
        .expect_err("must fail");
    assert!(matches!(err, ConfigError::Read { .. }));
}
