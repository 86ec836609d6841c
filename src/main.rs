//! Tessera CLI - Command-line tool for inspecting engine texture containers.
//!
//! Loads files through the same pipeline the renderer uses, against a
//! recording texture backend, so broken assets show up before they ship.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use glob::{MatchOptions, Pattern};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use tessera::prelude::*;

/// Tessera - texture container inspection tool
#[derive(Parser)]
#[command(name = "tessera")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Memory-map source files instead of reading them
    #[arg(long, global = true, env = "TESSERA_MMAP")]
    mmap: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show format, dimensions and mip levels of texture files
    Inspect {
        /// Texture files to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Load every texture below a directory and report failures
    Scan {
        /// Directory to walk
        dir: PathBuf,

        /// Filter pattern (glob-style, matched against the file name)
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Write each uploaded level of a texture to its own file
    Dump {
        /// Texture file
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(if cli.verbose {
            "tessera=debug".parse()?
        } else {
            "tessera=warn".parse()?
        }))
        .init();

    let read_mode = if cli.mmap {
        ReadMode::Mapped
    } else {
        ReadMode::Buffered
    };
    let mut loader = TextureLoader::new(RecordingBackend::new())
        .with_config(LoaderConfig::default().with_read_mode(read_mode));

    match cli.command {
        Commands::Inspect { files } => cmd_inspect(&mut loader, &files)?,
        Commands::Scan { dir, filter } => cmd_scan(&mut loader, &dir, filter.as_deref())?,
        Commands::Dump { input, output } => cmd_dump(&mut loader, &input, &output)?,
    }

    Ok(())
}

type Loader = TextureLoader<RecordingBackend>;

fn cmd_inspect(loader: &mut Loader, files: &[PathBuf]) -> Result<()> {
    let mut failed = 0;

    for path in files {
        match loader.try_load(path) {
            Ok(loaded) => print_texture(path, &loaded),
            Err(e) => {
                println!("{}: {}", path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} files could not be loaded", failed, files.len());
    }
    Ok(())
}

fn print_texture(path: &Path, loaded: &LoadedTexture<RecordedTexture>) {
    let extent = loaded.extent;
    println!("{}", path.display());
    println!("  Container: {}", loaded.kind);
    println!("  Format:    {}", loaded.format);
    if extent.depth > 1 {
        println!("  Size:      {}x{}x{}", extent.width, extent.height, extent.depth);
    } else {
        println!("  Size:      {}x{}", extent.width, extent.height);
    }
    if let Some(declared) = loaded.declared_size {
        let stored: usize = loaded.levels.iter().map(|l| l.size).sum();
        println!("  Payload:   {} bytes stored, {} declared", stored, declared);
    }
    println!("  Filter:    {:?}", loaded.min_filter);
    if loaded.mipmaps_generated {
        println!("  Mipmaps:   generated on upload");
    }

    for level in &loaded.levels {
        println!(
            "  Level {:2}: {:5}x{:<5} offset {:>10} size {:>10}",
            level.level, level.width, level.height, level.offset, level.size
        );
    }
}

fn cmd_scan(loader: &mut Loader, dir: &Path, filter: Option<&str>) -> Result<()> {
    let pattern = filter
        .map(Pattern::new)
        .transpose()
        .context("Invalid filter pattern")?;
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let start = Instant::now();
    let mut accepted = 0usize;
    let mut rejected = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if let Some(pattern) = &pattern {
            if !pattern.matches_with(&name, options) {
                continue;
            }
        }

        match loader.try_load(entry.path()) {
            Ok(_) => accepted += 1,
            Err(e) => rejected.push((entry.path().to_path_buf(), e)),
        }
    }

    for (path, e) in &rejected {
        println!("FAIL {}: {}", path.display(), e);
    }
    println!(
        "\nScanned {} files in {:?}: {} loaded, {} rejected",
        accepted + rejected.len(),
        start.elapsed(),
        accepted,
        rejected.len()
    );

    Ok(())
}

fn cmd_dump(loader: &mut Loader, input: &Path, output: &Path) -> Result<()> {
    let loaded = loader
        .try_load(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    fs::create_dir_all(output).context("Failed to create output directory")?;

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("texture");

    for upload in loaded.texture.uploads() {
        let path = output.join(format!("{}.level{}.bin", stem, upload.level));
        fs::write(&path, &upload.data)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!(
            "{} {}x{} -> {} ({} bytes)",
            upload.format,
            upload.width,
            upload.height,
            path.display(),
            upload.data.len()
        );
    }

    Ok(())
}
