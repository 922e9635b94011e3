use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};

use exif_bridge::config::Config;
use exif_bridge::exif::ExifTool;
use exif_bridge::{Error, files, tools};

#[derive(Parser, Debug)]
#[command(
    name = "exif-bridge",
    version,
    about = "Read tags, write tags, and extract thumbnails with the libexif `exif` tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Program to run instead of the configured one
    #[arg(long, value_name = "PROGRAM", global = true)]
    tool: Option<String>,

    /// Print each exif command line before running it
    #[arg(long, global = true)]
    show_commands: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every tag of the given images
    Tags {
        /// Image files or directories
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create or overwrite one tag
    Set {
        /// Image to modify
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Tag directory, e.g. 0, 1, EXIF, GPS, Interoperability
        #[arg(long)]
        ifd: String,

        /// Tag name, e.g. GPSLongitude
        #[arg(long)]
        tag: String,

        /// Write the result here instead of modifying FILE
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Value parts, joined with spaces
        #[arg(value_name = "VALUE", required = true, num_args = 1.., allow_hyphen_values = true)]
        value: Vec<String>,
    },

    /// Check for an embedded thumbnail, optionally extracting it
    Thumbnail {
        /// Image to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Save the thumbnail to this path
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Report whether the exif tool is installed
    Doctor,

    /// Dump all tags, then write a sample GPSLongitude into a copy
    Demo {
        /// Source image (left unmodified)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Where to write the updated copy
        #[arg(short, long, value_name = "FILE", default_value = "updated.jpg")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    if let Err(err) = run(cli) {
        log::error!("{err:#}");
        if let Some(output) = err.downcast_ref::<Error>().and_then(Error::output) {
            let output = output.trim_end();
            if !output.is_empty() {
                log::error!("Tool output:\n{output}");
            }
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Handle --init
    if cli.init {
        let config = Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_deref())?;

    // CLI flags override the config file
    if let Some(program) = cli.tool {
        config.tool.program = program;
    }
    if cli.show_commands {
        config.tool.show_commands = true;
    }

    let Some(command) = cli.command else {
        anyhow::bail!("No command specified. Use --help for usage.");
    };

    match command {
        Command::Tags { paths, json } => print_tags(&paths, json || config.output.json, &config),
        Command::Set {
            file,
            ifd,
            tag,
            output,
            value,
        } => set_tag(&file, &ifd, &tag, output.as_deref(), &value, &config),
        Command::Thumbnail { file, output } => thumbnail(&file, output.as_deref(), &config),
        Command::Doctor => doctor(&config),
        Command::Demo { file, output } => demo(&file, &output, &config),
    }
}

/// A tag as printed in JSON output.
#[derive(serde::Serialize)]
struct TagEntry {
    name: String,
    value: String,
}

fn print_tags(paths: &[PathBuf], json: bool, config: &Config) -> Result<()> {
    let images = files::collect_images(paths);
    if images.is_empty() {
        anyhow::bail!("No supported image files found in the specified paths.");
    }

    log::debug!("Found {} image(s)", images.len());

    let mut results = Vec::new();
    let mut failed = 0;

    for image_path in &images {
        let tool = ExifTool::from_config(image_path, &config.tool);

        if json {
            let mut tags = Vec::new();
            let outcome = tool.read_tags(&mut |name: &str, value: &str| {
                tags.push(TagEntry {
                    name: name.to_string(),
                    value: value.to_string(),
                });
                Ok::<(), Error>(())
            });
            if outcome.is_err() {
                failed += 1;
            }
            results.push(serde_json::json!({
                "path": image_path.display().to_string(),
                "tags": tags,
                "error": outcome.err().map(|e| e.to_string()),
            }));
            continue;
        }

        if images.len() > 1 {
            println!("{}:", image_path.display());
        }
        let outcome = tool.read_tags(&mut |name: &str, value: &str| {
            println!("TAG [{name}]=[{value}]");
            Ok::<(), Error>(())
        });
        if let Err(err) = outcome {
            failed += 1;
            log::error!("{}: {err}", image_path.display());
            if let Some(output) = err.output() {
                log::debug!("Tool output:\n{}", output.trim_end());
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} image(s) could not be read", images.len());
    }
    Ok(())
}

fn set_tag(
    file: &Path,
    ifd: &str,
    tag: &str,
    output: Option<&Path>,
    value: &[String],
    config: &Config,
) -> Result<()> {
    let in_place = output.is_none_or(|p| p.as_os_str().is_empty());
    if in_place && config.output.backup_originals {
        let backup = files::backup_file(file)?;
        log::info!("Backup: {}", backup.display());
    }

    let tool = ExifTool::from_config(file, &config.tool);
    tool.set_tag(ifd, tag, value, output)
        .with_context(|| format!("Failed to set {ifd}/{tag} on {}", file.display()))?;

    let written = if in_place { file } else { output.unwrap_or(file) };
    log::info!("Wrote {ifd}/{tag} = \"{}\" to {}", value.join(" "), written.display());
    Ok(())
}

fn thumbnail(file: &Path, output: Option<&Path>, config: &Config) -> Result<()> {
    let tool = ExifTool::from_config(file, &config.tool);

    let present = tool.has_thumbnail()?;
    println!(
        "{}: {}",
        file.display(),
        if present { "thumbnail present" } else { "no thumbnail" }
    );

    let Some(output) = output else {
        return Ok(());
    };
    if !present {
        anyhow::bail!("{} has no thumbnail to extract", file.display());
    }

    let thumb = tool.get_thumbnail()?;
    let dest = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let copied = files::copy_stream(thumb, dest)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("Thumbnail ({copied} bytes) written to {}", output.display());
    Ok(())
}

fn doctor(config: &Config) -> Result<()> {
    let info = tools::check(&config.tool.program);
    if !info.available {
        anyhow::bail!(
            "{} not found. Install libexif's exif tool or set tool.program in config.json.",
            info.name
        );
    }

    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn demo(file: &Path, output: &Path, config: &Config) -> Result<()> {
    let tool = ExifTool::from_config(file, &config.tool);

    tool.read_tags(&mut |name: &str, value: &str| {
        println!("TAG [{name}]=[{value}]");
        Ok::<(), anyhow::Error>(())
    })?;

    tool.set_tag(
        "GPS",
        "GPSLongitude",
        &["80", "1", "2", "1", "3", "1"],
        Some(output),
    )?;

    log::info!("Updated copy written to {}", output.display());
    Ok(())
}
