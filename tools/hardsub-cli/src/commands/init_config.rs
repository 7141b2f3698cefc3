//! Write the default configuration file.

use hardsub_common::config::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, force: bool) -> anyhow::Result<()> {
    let path = config_file_path();
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    let written = config.save()?;
    println!("Wrote config: {}", written.display());
    println!(
        "Insights credential is read from ${} (or $GEMINI_API_KEY)",
        config.insights.api_key_env
    );
    Ok(())
}
