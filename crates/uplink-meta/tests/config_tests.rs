#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use tempfile::TempDir;
use uplink_meta::config::{Settings, WireFormat};
use uplink_meta::logging_facility::Profile;
use uplink_meta::{CmdMetaError, CommandMetadata};

#[test]
fn test_settings_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("uplink.toml");
    fs::write(
        &path,
        "[logging]\nprofile = \"production\"\n\n[defaults]\nvcid = 4\n\n[wire]\nformat = \"msgpack\"\n",
    )
    .unwrap();

    let settings = Settings::from_path(&path).unwrap();
    assert_eq!(settings.logging.profile, Profile::Production);
    assert_eq!(settings.wire.format, WireFormat::Msgpack);

    let record = CommandMetadata::builder()
        .with_defaults(&settings.defaults)
        .build()
        .unwrap();
    assert_eq!(record.vcid(), 4);
}

#[test]
fn test_explicit_vcid_overrides_default() {
    let settings = Settings::from_toml_str("[defaults]\nvcid = 4\n").unwrap();
    let record = CommandMetadata::builder()
        .with_defaults(&settings.defaults)
        .vcid(9)
        .build()
        .unwrap();
    assert_eq!(record.vcid(), 9);
}

#[test]
fn test_bad_profile_is_config_error() {
    let err = Settings::from_toml_str("[logging]\nprofile = \"verbose\"\n").unwrap_err();
    assert!(matches!(err, CmdMetaError::Config { .. }));
}

#[test]
fn test_unreadable_path_names_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");
    match Settings::from_path(&path).unwrap_err() {
        CmdMetaError::Io { message } => assert!(message.contains("absent.toml")),
        other => panic!("unexpected error {:?}", other),
    }
}
