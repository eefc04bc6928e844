use larder_core::TaxRate;
use larder_editor::config::WholesaleConfig;
use larder_editor::{read_json, EditorConfig, EditorError, ErrorCode};
use tempfile::TempDir;

#[test]
fn save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("larder.toml");

    let config = EditorConfig {
        tax_rate_bps: 825,
        currency_symbol: "CA$".to_string(),
        currency_decimals: 2,
        wholesale: WholesaleConfig {
            calculate_adjustments: true,
        },
    };
    config.save(&path).unwrap();

    let loaded = EditorConfig::from_file(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.tax_rate(), TaxRate::from_bps(825));
}

#[test]
fn invalid_file_values_fail_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("larder.toml");
    std::fs::write(&path, "tax_rate_bps = 20000\n").unwrap();

    assert!(EditorConfig::from_file(&path).is_ok());
    let err = EditorConfig::load(Some(path.clone())).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);

    assert_eq!(
        EditorConfig::load_or_default(Some(path)).currency_symbol,
        EditorConfig::default().currency_symbol
    );
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("larder.toml");
    std::fs::write(&path, "tax_rate_bps = \"eight\"\n").unwrap();

    assert!(matches!(
        EditorConfig::from_file(&path),
        Err(EditorError::ConfigParse(_))
    ));
}

#[test]
fn read_json_reports_data_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("order.json");
    std::fs::write(&path, "{ \"line_items\": [ }").unwrap();

    let err = read_json::<larder_core::Order>(&path).unwrap_err();
    assert_eq!(err.code(), ErrorCode::DataError);

    let missing = read_json::<larder_core::Order>(&dir.path().join("absent.json")).unwrap_err();
    assert_eq!(missing.code(), ErrorCode::Internal);
}
