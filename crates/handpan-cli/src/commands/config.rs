use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use handpan_core::config::AppConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the effective config (file merged over defaults) instead of the defaults
    #[arg(long)]
    pub effective: bool,
}

/// Print or save the config as TOML.
pub fn run(args: &ConfigArgs, config_path: Option<&Path>) -> Result<()> {
    let config = if args.effective {
        super::load_config(config_path)?
    } else {
        AppConfig::default()
    };
    let toml_str = config.to_toml_string()?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
