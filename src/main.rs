use anyhow::Result;
use clap::Parser;

use zoom_reset::cli::args::{Cli, OutputFormat};
use zoom_reset::cli::output;
use zoom_reset::common::config::Config;
use zoom_reset::platform::Platform;
use zoom_reset::reset::{self, Environment};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("zoom_reset=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let home = Config::home_dir();
    let mut config = Config::load(&home)?;
    if let Some(dir) = cli.backup_dir.clone() {
        config.backup_root = dir;
    }
    config.dry_run = cli.dry_run;
    config.skip_kill = cli.skip_kill;

    let platform = match cli.platform.as_deref() {
        Some(name) => name.parse::<Platform>()?,
        None => Platform::detect()?,
    };

    if cli.list_paths {
        let paths = reset::catalog(platform, &Environment::from_process(), &config.home);
        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&paths)?),
            OutputFormat::Quiet => paths.iter().for_each(|p| println!("{}", p.display())),
            OutputFormat::Human => output::print_catalog(platform, &paths, &config.home),
        }
        return Ok(());
    }

    // Another OS's processes cannot be listed from here
    if Platform::detect().ok() != Some(platform) {
        if !cli.dry_run {
            anyhow::bail!(
                "--platform {} can only be used with --dry-run or --list-paths",
                platform
            );
        }
        config.skip_kill = true;
    }

    let report = reset::perform_reset(&config, platform)?;

    match cli.format {
        OutputFormat::Json => output::print_reset_json(&report)?,
        OutputFormat::Quiet => output::print_reset_quiet(&report),
        OutputFormat::Human if cli.quiet => output::print_reset_quiet(&report),
        OutputFormat::Human => output::print_reset_report(&report, &config.home),
    }

    Ok(())
}
