use anyhow::Result;

use vitrine_core::AppConfig;

pub fn run(config: &AppConfig, init: bool, path: bool) -> Result<()> {
    let config_path = AppConfig::config_path();

    if path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config already exists at {}", config_path.display());
        } else {
            config.save()?;
            println!("Wrote default config to {}", config_path.display());
        }
        return Ok(());
    }

    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
