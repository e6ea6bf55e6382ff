//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files, variant overlays, and
//! environment variables.

use moonscroll::config::{AppConfig, FollowerMode, HexColor, RotationModeKind, VARIANT_ENV};
use serial_test::serial;

fn clear_env() {
    std::env::remove_var(VARIANT_ENV);
    std::env::remove_var("MS_WINDOW__TITLE");
    std::env::remove_var("MS_STARFIELD__COUNT");
    std::env::remove_var("MS_FOLLOWER__ORBIT__MAX_DISTANCE");
    std::env::remove_var("MS_FOLLOWER__ORBIT__MIN_DISTANCE");
}

/// Config directory holding only `variants/<name>.toml`
fn overlay_dir(name: &str, contents: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("moonscroll-config-{}-{}", std::process::id(), name));
    let variants = dir.join("variants");
    std::fs::create_dir_all(&variants).unwrap();
    std::fs::write(variants.join(format!("{}.toml", name)), contents).unwrap();
    dir
}

#[test]
#[serial]
fn test_default_file_matches_built_in_defaults() {
    clear_env();
    let config = AppConfig::load_from("config", None).unwrap();
    let defaults = AppConfig::default();

    assert_eq!(config.window.title, defaults.window.title);
    assert_eq!(config.starfield.count, defaults.starfield.count);
    assert_eq!(config.starfield.spread, defaults.starfield.spread);
    assert_eq!(config.rings.len(), 1);
    assert_eq!(config.rings[0].spin, defaults.rings[0].spin);
    assert_eq!(config.moon.color, HexColor(0xCE65ED));
    assert_eq!(config.camera.start_position, [-3.0, 0.0, 30.0]);
    assert_eq!(config.follower.mode, FollowerMode::Scroll);
    assert_eq!(config.animation.rotation_mode, RotationModeKind::PerTick);
}

#[test]
#[serial]
fn test_env_override() {
    clear_env();
    std::env::set_var("MS_WINDOW__TITLE", "Test From Env");
    std::env::set_var("MS_STARFIELD__COUNT", "12");
    let config = AppConfig::load();
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.window.title, "Test From Env");
    assert_eq!(config.starfield.count, 12);
}

#[test]
#[serial]
fn test_variant_overlays() {
    clear_env();
    let cases = [
        ("scroll", FollowerMode::Scroll, 25.0, 25.0),
        ("orbit_locked", FollowerMode::Orbit, 25.0, 25.0),
        ("orbit_free", FollowerMode::Orbit, 10.0, 100.0),
        ("orbit_wide", FollowerMode::Orbit, 25.0, 100.0),
    ];

    for (variant, mode, min, max) in cases {
        let config = AppConfig::load_from("config", Some(variant)).unwrap();
        assert_eq!(config.follower.mode, mode, "variant {}", variant);
        assert_eq!(config.follower.orbit.min_distance, min, "variant {}", variant);
        assert_eq!(config.follower.orbit.max_distance, max, "variant {}", variant);
        // Everything else comes from the default file
        assert_eq!(config.starfield.count, 250);
        assert_eq!(config.follower.scroll.k_z, -0.01);
    }
}

#[test]
#[serial]
fn test_variant_selected_by_env() {
    clear_env();
    std::env::set_var(VARIANT_ENV, "orbit_free");
    let config = AppConfig::load();
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.follower.mode, FollowerMode::Orbit);
    assert_eq!(config.follower.orbit.min_distance, 10.0);
}

#[test]
#[serial]
fn test_env_overrides_variant() {
    clear_env();
    std::env::set_var(VARIANT_ENV, "orbit_wide");
    std::env::set_var("MS_FOLLOWER__ORBIT__MAX_DISTANCE", "60.0");
    let config = AppConfig::load();
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.follower.orbit.min_distance, 25.0);
    assert_eq!(config.follower.orbit.max_distance, 60.0);
}

#[test]
#[serial]
fn test_unknown_variant_is_an_error() {
    clear_env();
    let result = AppConfig::load_from("config", Some("does_not_exist"));
    let err = result.unwrap_err();
    assert!(err.to_string().contains("does_not_exist"));
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    clear_env();
    let config = AppConfig::load_from("no/such/config/dir", None).unwrap();
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.cube.size, 5.0);
}

#[test]
#[serial]
fn test_non_finite_overlay_values_are_rejected() {
    clear_env();
    let cases = [
        ("orbit_nan", "[follower]\nmode = \"orbit\"\n\n[follower.orbit]\nmin_distance = nan\n", "min_distance"),
        ("spread_inf", "[starfield]\nspread = inf\n", "spread"),
        ("damping_nan", "[follower.orbit]\ndamping_factor = nan\n", "damping_factor"),
        ("reference_inf", "[animation]\nreference_hz = inf\n", "reference_hz"),
    ];

    for (name, contents, field) in cases {
        let dir = overlay_dir(name, contents);
        let result = AppConfig::load_from(&dir, Some(name));
        std::fs::remove_dir_all(&dir).ok();

        let err = result.unwrap_err();
        assert!(err.to_string().contains(field), "{}: {}", name, err);
    }
}

#[test]
#[serial]
fn test_inverted_ranges_are_rejected() {
    clear_env();
    let dir = overlay_dir("inverted", "[follower.orbit]\nmin_distance = 50.0\nmax_distance = 10.0\n");
    let result = AppConfig::load_from(&dir, Some("inverted"));
    std::fs::remove_dir_all(&dir).ok();
    assert!(result.unwrap_err().to_string().contains("exceeds max_distance"));

    let dir = overlay_dir("depth", "[camera]\nnear = 100.0\nfar = 10.0\n");
    let result = AppConfig::load_from(&dir, Some("depth"));
    std::fs::remove_dir_all(&dir).ok();
    assert!(result.unwrap_err().to_string().contains("camera.far"));
}

#[test]
#[serial]
fn test_env_override_is_validated() {
    clear_env();
    std::env::set_var("MS_FOLLOWER__ORBIT__MIN_DISTANCE", "200.0");
    let result = AppConfig::load_from("config", None);
    clear_env();
    assert!(result.is_err());
}
