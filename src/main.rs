use clap::{Parser, Subcommand};
use env_logger::{Builder, Target};
use log::LevelFilter;
use pictag::config::{self, ConfigError, TagConfig};
use pictag::imaging::RustBackend;
use pictag::scan::{self, ExtensionAllowList, ScanOptions};
use pictag::{flat, output, picture};
use std::path::{Path, PathBuf};

/// Flags shared by every command that scans.
#[derive(clap::Args, Clone)]
struct ScanArgs {
    /// Only include files whose name contains this substring
    #[arg(long, default_value = "")]
    name: String,

    /// Scan only this sub-directory of the base directory (recursively)
    #[arg(long)]
    dir: Option<PathBuf>,
}

impl ScanArgs {
    fn options(&self, config: &TagConfig) -> ScanOptions {
        ScanOptions::new(config.base_path())
            .name_filter(self.name.clone())
            .dir_override(self.dir.clone())
    }
}

#[derive(Parser)]
#[command(name = "pictag")]
#[command(about = "Generate <img>, <video> and <picture> tags from a media directory")]
#[command(long_about = "\
Generate <img>, <video> and <picture> tags from a media directory

Files directly in the base directory are scanned, plus every sub-directory
of it recursively. Paths are printed relative to the base directory.

Picture mode pairs desktop and smartphone variants by filename:

  img/
  ├── hero.png        # mobile image (desktop image if there is no pc/hero.png)
  ├── pc/hero.png     # desktop image, behind (min-width: 768px)
  └── sp/hero.png     # mobile image when there is no img/hero.png

Run 'pictag gen-config' to print a documented pictag.toml.")]
#[command(version)]
struct Cli {
    /// Base media directory (overrides base_dir from the config file)
    #[arg(long, global = true)]
    base: Option<PathBuf>,

    /// Config file
    #[arg(long, default_value = config::CONFIG_FILE_NAME, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print an <img> or <video> tag for every file
    Img(ScanArgs),
    /// Print a responsive <picture> for every image name
    Picture(ScanArgs),
    /// Print the discovered files as JSON
    Scan(ScanArgs),
    /// Show discovered files and how picture mode pairs them
    Check(ScanArgs),
    /// Print a stock pictag.toml with all options documented
    GenConfig,
}

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();
}

/// Load the config file and apply the `--base` override.
fn resolve_config(cli_config: &Path, base: Option<&Path>) -> Result<TagConfig, ConfigError> {
    let mut config = config::load_config(cli_config)?;
    if let Some(base) = base {
        config.base_dir = base.to_string_lossy().to_string();
        config.validate()?;
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let cli = Cli::parse();
    let backend = RustBackend::new();
    let load = || resolve_config(&cli.config, cli.base.as_deref());

    match &cli.command {
        Command::Img(args) => {
            let config = load()?;
            let allow = ExtensionAllowList::flat(&config.extensions);
            let set = scan::scan(&args.options(&config), &allow);
            let tags = flat::synthesize_flat(&set, &backend, &config.src_prefix());
            output::print_tags(&tags);
        }
        Command::Picture(args) => {
            let config = load()?;
            let allow = ExtensionAllowList::images_only(&config.extensions);
            let set = scan::scan(&args.options(&config), &allow);
            let pictures = picture::synthesize_pictures(&set, &backend, &config);
            output::print_tags(&pictures);
        }
        Command::Scan(args) => {
            let config = load()?;
            let allow = ExtensionAllowList::flat(&config.extensions);
            let set = scan::scan(&args.options(&config), &allow);
            println!("{}", serde_json::to_string_pretty(&set)?);
        }
        Command::Check(args) => {
            let config = load()?;
            let allow = ExtensionAllowList::flat(&config.extensions);
            let set = scan::scan(&args.options(&config), &allow);
            let groups = picture::group_by_basename(&set, &config.variants);
            output::print_check_output(&set, &groups);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
