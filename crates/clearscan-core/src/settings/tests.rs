//! Tests for filter settings and their persistence.

use super::*;
use crate::error::FilterError;
use tempfile::tempdir;

#[test]
fn test_defaults_match_documented_values() {
    let settings = FilterSettings::default();

    assert_eq!(settings.blur_number_of_times, 13);
    assert_eq!(settings.median_ksize, 0);
    assert_eq!(settings.gaussian_blur_n, 0);
    assert_eq!(settings.bilateral_filter_n, 0);
    assert_eq!(settings.bilateral_filter_d, 3);
    assert!((settings.bilateral_filter_color - 20.0).abs() < 1e-9);
    assert!((settings.bilateral_filter_space - 20.0).abs() < 1e-9);
    assert!((settings.non_local_mean_h - 3.0).abs() < 1e-9);
    assert!((settings.non_local_mean_h2 - 0.0).abs() < 1e-9);
    assert_eq!(settings.non_local_mean_template_window_size, 7);
    assert_eq!(settings.non_local_mean_search_window_size, 21);
    assert_eq!(settings.laplacian_ksize, 0);
    assert!((settings.unsharp_masking_k - 1.5).abs() < 1e-9);
    assert_eq!(settings.gamma_vol, 0);
    assert!((settings.add_weighted_alpha - 1.0).abs() < 1e-9);
}

#[test]
fn test_json_round_trip() {
    let mut settings = FilterSettings::default();
    settings.blur_number_of_times = 5;
    settings.gamma_vol = 20;
    settings.add_weighted_alpha = 0.75;

    let json = serde_json::to_string(&settings).unwrap();
    let restored: FilterSettings = serde_json::from_str(&json).unwrap();

    assert_eq!(settings, restored);
}

#[test]
fn test_wire_names_are_pascal_case() {
    let json = serde_json::to_string(&FilterSettings::default()).unwrap();

    assert!(json.contains("\"BlurNumberOfTimes\""));
    assert!(json.contains("\"MedianKsize\""));
    assert!(json.contains("\"NonLocalMeanH\""));
    assert!(json.contains("\"AddWeightedAlpha\""));
}

#[test]
fn test_partial_file_takes_defaults_for_missing_fields() {
    let settings: FilterSettings =
        serde_json::from_str(r#"{"BlurNumberOfTimes": 3, "GammaVol": 20}"#).unwrap();

    assert_eq!(settings.blur_number_of_times, 3);
    assert_eq!(settings.gamma_vol, 20);
    // Everything else falls back to defaults
    assert_eq!(settings.non_local_mean_template_window_size, 7);
    assert!((settings.unsharp_masking_k - 1.5).abs() < 1e-9);
}

#[test]
fn test_legacy_misspelled_template_window_key_still_loads() {
    // Older settings files carry "NonLocalMeanTempateWindowSize" (sic).
    let settings: FilterSettings =
        serde_json::from_str(r#"{"NonLocalMeanTempateWindowSize": 9}"#).unwrap();

    assert_eq!(settings.non_local_mean_template_window_size, 9);

    // Saving writes the corrected name, not the alias.
    let json = serde_json::to_string(&settings).unwrap();
    assert!(json.contains("\"NonLocalMeanTemplateWindowSize\""));
    assert!(!json.contains("\"NonLocalMeanTempateWindowSize\""));
}

#[test]
fn test_unknown_fields_are_ignored() {
    let settings: FilterSettings =
        serde_json::from_str(r#"{"MedianKsize": 5, "SomeRetiredKnob": 42}"#).unwrap();

    assert_eq!(settings.median_ksize, 5);
}

#[test]
fn test_load_missing_explicit_path_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.json");

    let result = load_settings(Some(&path));

    assert!(matches!(result, Err(FilterError::Config(_))));
}

#[test]
fn test_load_corrupt_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("setting.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = load_settings(Some(&path));

    assert!(matches!(result, Err(FilterError::Config(_))));
}

#[test]
fn test_save_then_load_explicit_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("setting.json");

    let mut settings = FilterSettings::default();
    settings.median_ksize = 4;
    settings.gamma2 = 1.8;

    save_settings(&settings, &path).unwrap();
    let loaded = load_settings(Some(&path)).unwrap();

    assert_eq!(settings, loaded);
}

#[test]
fn test_settings_cell_dirty_lifecycle() {
    let mut cell = SettingsCell::new(FilterSettings::default());

    // A fresh cell has never been processed
    assert!(cell.is_dirty());
    assert!(cell.take_dirty());
    assert!(!cell.is_dirty());

    cell.mutate(|s| s.blur_number_of_times = 2);
    assert!(cell.is_dirty());
    assert_eq!(cell.get().blur_number_of_times, 2);

    // Snapshots are owned copies; mutating the cell afterwards does not
    // affect a snapshot taken earlier.
    let snapshot = cell.snapshot();
    cell.mutate(|s| s.blur_number_of_times = 9);
    assert_eq!(snapshot.blur_number_of_times, 2);
    assert_eq!(cell.get().blur_number_of_times, 9);
}

#[test]
fn test_candidates_include_explicit_path_first() {
    let dir = tempdir().unwrap();
    let explicit = dir.path().join("custom.json");

    let candidates = settings_candidates(Some(&explicit));

    assert_eq!(candidates[0], explicit);
    assert!(candidates.len() > 1);
}
