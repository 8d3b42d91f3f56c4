//! localepack CLI - per-locale translation fragment aggregator
//!
//! Usage: localepack <COMMAND>
//!
//! Commands:
//!   build   Aggregate all fragments once and exit
//!   watch   Aggregate, then watch for changes and update incrementally

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use localepack::{Config, ConfigWarning, DEFAULT_CONFIG_FILE};

mod cli;
use cli::{Cli, Commands, ConfigArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { opts } => cmd_build(&opts, cli.json, cli.verbose),
        Commands::Watch { opts } => cmd_watch(&opts, cli.json),
    }
}

/// Resolve effective configuration: file values, then flag overrides.
fn resolve_config(opts: &ConfigArgs) -> Result<Config> {
    let mut config = if let Some(path) = &opts.config {
        load_config(path)?
    } else {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            load_config(default_path)?
        } else {
            Config::default()
        }
    };

    if let Some(languages) = &opts.languages {
        config.languages = languages.clone();
    }
    if let Some(dir) = &opts.lookup_dir {
        config.lookup_dir = dir.clone();
    }
    if let Some(dir) = &opts.save_dir {
        config.save_dir = dir.clone();
    }
    if let Some(strategy) = opts.strategy {
        config.strategy = strategy;
    }

    config.validate()?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<Config> {
    let (config, warnings) = Config::load_with_warnings(path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    print_warnings(&warnings);
    Ok(config)
}

fn print_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        eprintln!(
            "Warning: unknown key '{}' in {}",
            warning.key,
            warning.file.display()
        );
    }
}

fn cmd_build(opts: &ConfigArgs, json: bool, verbose: u8) -> Result<()> {
    use localepack::Aggregator;

    let config = resolve_config(opts)?;

    if !json && verbose > 0 {
        println!("Lookup: {}", config.lookup_dir.display());
        println!("Output: {}", config.save_dir.display());
        println!("Languages: {}", config.languages.join(", "));
    }

    let aggregator = Aggregator::new(config);

    let report = aggregator
        .run_full()
        .context("full aggregation failed")?;

    for entry in &report.entries {
        if json {
            let line = serde_json::json!({
                "event": "written",
                "language": entry.language,
                "fragments": entry.fragments,
                "output": entry.output.display().to_string(),
            });
            println!("{line}");
        } else {
            println!(
                "✓ {}: {} fragments -> {}",
                entry.language,
                entry.fragments,
                entry.output.display()
            );
        }
    }

    Ok(())
}

fn cmd_watch(opts: &ConfigArgs, json: bool) -> Result<()> {
    use localepack::{watch, WatchEvent};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    let config = resolve_config(opts)?;

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    if !json {
        println!("👀 localepack watch");
        println!("Lookup: {}", config.lookup_dir.display());
        println!("Output: {}", config.save_dir.display());
        println!("Press Ctrl+C to stop\n");
    }

    watch(config, running, |event| {
        if json {
            println!("{}", event.to_json());
        } else {
            match event {
                WatchEvent::Started { lookup_dir } => {
                    println!("📂 Watching: {}", lookup_dir);
                }
                WatchEvent::AggregationComplete { outputs } => {
                    println!("✓ Aggregated {} language file(s)", outputs);
                }
                WatchEvent::FileChanged { path } => {
                    println!("📝 Changed: {}", path);
                }
                WatchEvent::Updated { language, output } => {
                    println!("✓ Updated {}: {}", language, output);
                }
                WatchEvent::Error { message } => {
                    eprintln!("✗ Error: {}", message);
                }
                WatchEvent::Shutdown => {
                    println!("\n👋 Shutting down...");
                }
            }
        }
    })?;

    Ok(())
}
