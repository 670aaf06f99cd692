//! Edge case and error scenario tests

use bookshelf_config::{Config, ConfigError, ConfigManager};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn setup_test_manager() -> Result<(TempDir, ConfigManager), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let manager = ConfigManager::with_directory(temp_dir.path());
    Ok((temp_dir, manager))
}

#[test]
fn test_corrupted_config_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;

    fs::write(manager.config_path(), "this is not valid TOML {{{")?;

    assert!(matches!(manager.load(), Err(ConfigError::Parse { .. })));
    assert!(manager.check().is_err());
    assert!(manager.update(|_| Ok(())).is_err());

    // reset is the way out of a damaged file
    manager.reset()?;
    assert_eq!(manager.load()?, Config::default());

    Ok(())
}

#[test]
fn test_save_creates_parent_directories() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let nested_path = temp_dir.path().join("a").join("b").join("c");
    let manager = ConfigManager::with_directory(nested_path);

    manager.save(&Config::default())?;

    assert!(manager.config_path().exists());

    Ok(())
}

#[test]
fn test_empty_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(manager.config_path(), "")?;

    assert!(matches!(manager.load(), Err(ConfigError::Empty { .. })));

    Ok(())
}

#[test]
fn test_unknown_keys_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(
        manager.config_path(),
        "[library]\ndata_file = \"x.json\"\nshelf_colour = \"oak\"\n",
    )?;

    let config = manager.load()?;
    assert_eq!(config.library.data_file, PathBuf::from("x.json"));

    Ok(())
}

#[test]
fn test_wrong_type_is_parse_error() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(manager.config_path(), "[library]\nkeep_backup = \"yes\"\n")?;

    assert!(matches!(manager.load(), Err(ConfigError::Parse { .. })));

    Ok(())
}

#[test]
fn test_update_with_invalid_value_keeps_file() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    manager.initialize()?;

    let result = manager.update(|config| config.set("library.data_file", "  "));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));

    let config = manager.load()?;
    assert_eq!(config, Config::default());

    Ok(())
}

#[test]
fn test_special_characters_in_data_file() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;

    let mut config = Config::default();
    config.library.data_file = PathBuf::from("/home/user/Книги & stuff/library data.json");
    manager.save(&config)?;

    let loaded = manager.load()?;
    assert_eq!(loaded.library.data_file, config.library.data_file);

    Ok(())
}

#[test]
fn test_rapid_saves() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;

    for i in 0..20 {
        let mut config = Config::default();
        config.library.data_file = PathBuf::from(format!("catalog-{}.json", i));
        manager.save(&config)?;
    }

    let loaded = manager.load()?;
    assert_eq!(loaded.library.data_file, PathBuf::from("catalog-19.json"));

    Ok(())
}

#[test]
fn test_initialize_does_not_overwrite() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;

    let mut config = Config::default();
    config.library.keep_backup = false;
    manager.save(&config)?;

    assert!(!manager.initialize()?);
    assert!(!manager.load()?.library.keep_backup);

    Ok(())
}
