//! FAMTREE_* environment overrides.
//!
//! Kept in its own test binary: it mutates process environment, which
//! would race with config loading in other tests.

use std::env;
use std::fs;

use tempfile::TempDir;

use famtree::config::Settings;
use famtree::domain::Language;

#[test]
fn given_env_vars_when_load_then_override_local_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("famtree.toml");
    fs::write(&path, "base_url = \"/local/\"\nasset_dir = \"photos\"\n").unwrap();

    env::set_var("FAMTREE_BASE_URL", "/env/");
    env::set_var("FAMTREE_LANGUAGE", "gu");
    env::set_var("FAMTREE_DATA_FILE", "$HOME/family.json");

    let result = Settings::load(Some(&path));

    env::remove_var("FAMTREE_BASE_URL");
    env::remove_var("FAMTREE_LANGUAGE");
    env::remove_var("FAMTREE_DATA_FILE");

    let settings = result.expect("load");
    assert_eq!(settings.base_url, "/env/");
    assert_eq!(settings.asset_dir, "photos", "local value kept");
    assert_eq!(settings.language, Language::Gujarati);
    let data_file = settings.data_file.expect("data_file from env");
    assert!(!data_file.to_string_lossy().contains("$HOME"));
}
