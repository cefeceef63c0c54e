//! # Configuration Tests
//!
//! Tests for defaults, the INI and JSON sources, file loading, and geometry
//! derivation from a configuration.

use std::io::Write;

use cachesim_core::config::*;
use cachesim_core::{ConfigError, Simulator};
use pretty_assertions::assert_eq;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.cache_size_kb, 32);
    assert_eq!(config.block_size_bytes, 64);
    assert_eq!(config.associativity, 4);
    assert_eq!(config.cache_size_bytes().unwrap(), 32 * 1024);
}

#[test]
fn test_ini_all_keys() {
    let ini = "CACHE_SIZE_KB: 64\nBLOCK_SIZE_BYTES: 32\nASSOCIATIVITY: 8\n";
    let config = Config::from_ini_str(ini).unwrap();
    assert_eq!(
        config,
        Config {
            cache_size_kb: 64,
            block_size_bytes: 32,
            associativity: 8,
        }
    );
}

#[test]
fn test_ini_trims_whitespace_and_ignores_noise() {
    let ini = "\
# cache under test
  CACHE_SIZE_KB :   16
; comment
not a pair
BLOCK_SIZE_BYTES:\t128\r

ASSOCIATIVITY: 2
";
    let config = Config::from_ini_str(ini).unwrap();
    assert_eq!(config.cache_size_kb, 16);
    assert_eq!(config.block_size_bytes, 128);
    assert_eq!(config.associativity, 2);
}

#[test]
fn test_ini_missing_keys_keep_defaults() {
    let config = Config::from_ini_str("ASSOCIATIVITY: 1").unwrap();
    assert_eq!(config.cache_size_kb, 32);
    assert_eq!(config.block_size_bytes, 64);
    assert_eq!(config.associativity, 1);
}

#[test]
fn test_ini_unknown_key_is_ignored() {
    let config = Config::from_ini_str("REPLACEMENT: LRU\nASSOCIATIVITY: 2").unwrap();
    assert_eq!(config.associativity, 2);
}

#[test]
fn test_ini_later_key_wins() {
    let config = Config::from_ini_str("ASSOCIATIVITY: 2\nASSOCIATIVITY: 8").unwrap();
    assert_eq!(config.associativity, 8);
}

#[test]
fn test_ini_invalid_value() {
    let err = Config::from_ini_str("BLOCK_SIZE_BYTES: sixty-four").unwrap_err();
    match err {
        ConfigError::InvalidValue { key, value } => {
            assert_eq!(key, "BLOCK_SIZE_BYTES");
            assert_eq!(value, "sixty-four");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_ini_negative_value_is_invalid() {
    assert!(matches!(
        Config::from_ini_str("ASSOCIATIVITY: -1"),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_json_full() {
    let json = r#"{ "cache_size_kb": 8, "block_size_bytes": 16, "associativity": 2 }"#;
    let config = Config::from_json_str(json).unwrap();
    assert_eq!(config.cache_size_kb, 8);
    assert_eq!(config.block_size_bytes, 16);
    assert_eq!(config.associativity, 2);
}

#[test]
fn test_json_defaults() {
    let config = Config::from_json_str("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_json_malformed() {
    assert!(matches!(
        Config::from_json_str(r#"{ "associativity": "four" }"#),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn test_load_ini_file() {
    let mut file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
    writeln!(file, "CACHE_SIZE_KB: 4").unwrap();
    writeln!(file, "BLOCK_SIZE_BYTES: 64").unwrap();
    writeln!(file, "ASSOCIATIVITY: 2").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.cache_size_kb, 4);
    assert_eq!(config.geometry().unwrap().num_sets(), 32);
}

#[test]
fn test_load_json_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{ "cache_size_kb": 2, "associativity": 1 }}"#).unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.cache_size_kb, 2);
    assert_eq!(config.associativity, 1);
    assert_eq!(config.geometry().unwrap().num_sets(), 32);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.ini");
    match Config::load(&path) {
        Err(ConfigError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_cache_size_overflow() {
    let config = Config {
        cache_size_kb: u64::MAX,
        ..Config::default()
    };
    assert!(matches!(
        config.cache_size_bytes(),
        Err(ConfigError::CacheSizeOverflow(u64::MAX))
    ));
    assert!(matches!(
        config.geometry(),
        Err(ConfigError::CacheSizeOverflow(_))
    ));
}

#[test]
fn test_zero_associativity_fails_before_simulation() {
    let config = Config {
        cache_size_kb: 1,
        block_size_bytes: 64,
        associativity: 0,
    };
    assert!(matches!(
        Simulator::new(&config),
        Err(ConfigError::InvalidAssociativity)
    ));
}

#[test]
fn test_default_geometry() {
    let g = Config::default().geometry().unwrap();
    assert_eq!(g.num_sets(), 128);
    assert_eq!(g.offset_bits(), 6);
    assert_eq!(g.index_bits(), 7);
    assert_eq!(g.tag_bits(), 51);
}
