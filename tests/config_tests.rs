//! Configuration tests

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;

use gridview::{Grid, GridConfig, GridError, Selection, SelectionMode};
use test_case::test_case;

#[test]
fn test_empty_json_gives_defaults() {
    let config = GridConfig::from_json("{}").unwrap();
    assert_eq!(config, GridConfig::default());
}

#[test]
fn test_camel_case_fields() {
    let config = GridConfig::from_json(
        r#"{"headerCols": 2, "fixedRows": 3, "selectionMode": "row", "defaultColWidth": 80}"#,
    )
    .unwrap();
    assert_eq!(config.header_cols, 2);
    assert_eq!(config.fixed_rows, 3);
    assert_eq!(config.selection_mode, SelectionMode::Row);
    assert_eq!(config.default_col_width, 80);
    assert!(config.row_select());
}

#[test]
fn test_json_round_trip() {
    let config = GridConfig {
        header_rows: 0,
        wheel_step: 3,
        ..GridConfig::default()
    };
    let json = config.to_json().unwrap();
    assert_eq!(GridConfig::from_json(&json).unwrap(), config);
}

#[test_case(r#"{"defaultColWidth": -1}"#, "defaultColWidth" ; "negative column width")]
#[test_case(r#"{"headerRowHeight": -5}"#, "headerRowHeight" ; "negative header height")]
#[test_case(r#"{"resizeHitWidth": 0}"#, "resizeHitWidth" ; "zero hit width")]
#[test_case(r#"{"wheelStep": 0}"#, "wheelStep" ; "zero wheel step")]
fn test_invalid_values_rejected(json: &str, field: &str) {
    match GridConfig::from_json(json) {
        Err(GridError::InvalidConfig(msg)) => assert!(msg.contains(field), "{msg}"),
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn test_malformed_json_is_json_error() {
    assert!(matches!(
        GridConfig::from_json("{headerCols"),
        Err(GridError::Json(_))
    ));
    assert!(matches!(
        GridConfig::from_json(r#"{"selectionMode": "column"}"#),
        Err(GridError::Json(_))
    ));
}

#[test]
fn test_grid_from_config() {
    let config = GridConfig::from_json(
        r#"{"headerCols": 2, "headerRows": 1, "fixedCols": 1, "headerColWidth": 30, "defaultRowHeight": 25}"#,
    )
    .unwrap();
    let mut g = Grid::with_config(&config);
    assert!(g.is_empty());
    g.resize(4, 4);
    assert_eq!(g.col_count(), 6);
    assert_eq!(g.selection(), Selection::new(2, 1));
    assert_eq!(g.col_width(0), 30);
    assert_eq!(g.col_width(1), 30);
    assert_eq!(g.row_height(1), 25);
    assert_eq!(g.bands(), gridview::Bands::new(3, 1));
    assert_eq!(g.non_scroll_extent().width, 30 + 30 + 64);
}

#[test]
fn test_wheel_step_from_config() {
    let config = GridConfig {
        wheel_step: 3,
        ..GridConfig::default()
    };
    let mut g = Grid::with_config(&config);
    g.resize(5, 50);
    g.set_client_size(300, 200);
    assert!(g.wheel(1, gridview::Modifiers::NONE));
    assert_eq!(g.scroll_y(), 60);
    // the shared helpers build on the default configuration
    assert_eq!(common::grid(1, 1, 10, 10).selection(), Selection::new(1, 1));
}
