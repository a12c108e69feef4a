use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use handpan_core::io::probe_size;
use handpan_core::library::scan_folder;

#[derive(Args)]
pub struct ListArgs {
    /// Folder to scan
    pub folder: PathBuf,

    /// Also read each image header and print its size
    #[arg(long)]
    pub sizes: bool,
}

pub fn run(args: &ListArgs, config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let images = scan_folder(&args.folder, &config.library)
        .with_context(|| format!("Failed to read folder {}", args.folder.display()))?;

    if images.is_empty() {
        println!(
            "No images in {} (extensions: {})",
            args.folder.display(),
            config.library.extensions.join(", ")
        );
        return Ok(());
    }

    println!("{:>5}  {:<40}  {:>12}", "#", "File", "Size");
    println!("{}", "-".repeat(61));
    for (i, path) in images.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let size = if args.sizes {
            match probe_size(path) {
                Ok(size) => format!("{}x{}", size.width, size.height),
                Err(_) => "unreadable".into(),
            }
        } else {
            String::new()
        };
        println!("{:>5}  {:<40}  {:>12}", i + 1, name, size);
    }
    println!("\n{} image(s)", images.len());

    Ok(())
}
