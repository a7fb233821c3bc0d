use std::error::Error;
use std::fs;

use tempfile::tempdir;

use memdev::core::DeviceConfig;
use memdev::params::ParameterStore;

#[test]
fn missing_config_file_yields_defaults() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("memdev.toml");
    let cfg: DeviceConfig = confy::load_path(&path)?;
    assert_eq!(cfg.plain_param, 1);
    assert_eq!(cfg.observed_param, 2);
    Ok(())
}

#[test]
fn partial_config_keeps_unset_defaults() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("memdev.toml");
    fs::write(&path, "plain_param = 40\n")?;
    let cfg: DeviceConfig = confy::load_path(&path)?;
    assert_eq!(cfg.plain_param, 40);
    assert_eq!(cfg.observed_param, 2);
    Ok(())
}

#[test]
fn config_seeds_the_parameter_store() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("memdev.toml");
    fs::write(&path, "plain_param = 3\nobserved_param = 8\n")?;
    let cfg: DeviceConfig = confy::load_path(&path)?;
    let store = ParameterStore::new(&cfg);
    assert_eq!(store.plain(), 3);
    assert_eq!(store.observed(), 8);
    assert_eq!(store.get_observed(), "8");
    Ok(())
}
