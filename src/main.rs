//! Hellow - greeting CLI
//!
//! Creates a greeting context, sets the name from the first argument and
//! says hi, all through the library's C ABI.

use anyhow::{Context, Result};
use clap::Parser;
use hellow::config::{Backend, HellowConfig};
use hellow::context::DEFAULT_PREFIX;
use hellow::ffi::LibraryLoader;
use hellow::greeter::{DynamicHellow, Greeter, Greeting, LinkedHellow};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hellow")]
#[command(version)]
#[command(about = "Say hi through the hellow library", long_about = None)]
struct Cli {
    /// Name to greet
    #[arg(value_name = "NAME")]
    name: Option<String>,

    /// Greeting prefix (default: from hellow.toml, else "Hello")
    #[arg(short, long)]
    prefix: Option<String>,

    /// Announce to WHO after the greeting (repeatable)
    #[arg(short, long, value_name = "WHO")]
    announce: Vec<String>,

    /// Load libhellow at runtime from this path or library name
    #[arg(short, long, value_name = "PATH")]
    library: Option<String>,

    /// Config file (default: nearest hellow.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Fail on a missing name before any library call
    let greeting = Greeting::from_args(cli.name)?;
    let config = load_config(cli.config.as_deref())?;

    let prefix = cli.prefix.or_else(|| {
        (config.greeting.prefix != DEFAULT_PREFIX).then(|| config.greeting.prefix.clone())
    });
    let mut greeting = greeting.with_announcements(cli.announce);
    if let Some(prefix) = prefix {
        greeting = greeting.with_prefix(prefix);
    }

    let (backend, library) = match cli.library {
        Some(library) => (Backend::Dynamic, library),
        None => (config.library.backend, config.library.name.clone()),
    };

    match backend {
        Backend::Linked => {
            tracing::debug!("using linked library");
            Greeter::new(LinkedHellow::new()).greet(&greeting)?;
        }
        Backend::Dynamic => {
            let hellow = load_dynamic(&config, &library)?;
            Greeter::new(hellow).greet(&greeting)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<HellowConfig> {
    match path {
        Some(path) => HellowConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => HellowConfig::load_from_cwd().context("Failed to load hellow.toml"),
    }
}

fn load_dynamic(config: &HellowConfig, library: &str) -> Result<DynamicHellow> {
    let mut loader = LibraryLoader::new();
    for path in config.library.search_paths.iter().rev() {
        loader.prepend_search_path(path);
    }

    let hellow = DynamicHellow::load(&loader, library)
        .with_context(|| format!("Failed to load greeting library '{}'", library))?;

    tracing::info!(
        path = %hellow.path().display(),
        prefix = hellow.supports_prefix(),
        announce = hellow.supports_announce(),
        "loaded greeting library"
    );
    Ok(hellow)
}
