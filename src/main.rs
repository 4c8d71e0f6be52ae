use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::Path;

use sysmon_dashboard::app::App;
use sysmon_dashboard::cli::{Cli, Commands, ConfigCommands, BUILD_TIMESTAMP};
use sysmon_dashboard::core::alerts::{derive_alerts, AlertSeverity};
use sysmon_dashboard::core::auth::password_digest;
use sysmon_dashboard::core::metrics::MetricSample;
use sysmon_dashboard::core::processes::{
    filter_processes, mock_processes, RowEmphasis, StatusFilter, ThresholdFilter, NO_RESULTS_MESSAGE,
};
use sysmon_dashboard::core::session::{FileSessionStore, SessionStore};
use sysmon_dashboard::core::thresholds::{classify, classify_named, MetricType, Severity};
use sysmon_dashboard::utils::{format_percent, logging, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => AppConfig::config_path()?,
    };

    if cli.command.is_some() {
        logging::init_stderr_logging()?;
    }

    match cli.command {
        None => {
            // No command - run interactive TUI
            run_tui(&config_path).await?;
        }
        Some(Commands::Check { metric, value }) => {
            handle_check(&config_path, &metric, value)?;
        }
        Some(Commands::Alerts { cpu, memory, disk, network }) => {
            handle_alerts(&config_path, MetricSample::new(cpu, memory, disk, network))?;
        }
        Some(Commands::Processes { search, status, threshold, json }) => {
            handle_processes(&search, &status, &threshold, json)?;
        }
        Some(Commands::Logout) => {
            handle_logout()?;
        }
        Some(Commands::Config { command }) => {
            handle_config(command, &config_path)?;
        }
        Some(Commands::HashPassword { password }) => {
            println!("{}", password_digest(&password));
        }
    }

    Ok(())
}

async fn run_tui(config_path: &Path) -> Result<()> {
    let config = AppConfig::load_from(config_path)?;
    let data_dir = AppConfig::data_dir()?;
    let log_path = logging::init_file_logging(&data_dir)?;

    tracing::info!(
        config = %config_path.display(),
        log = %log_path.display(),
        build = BUILD_TIMESTAMP,
        "starting dashboard"
    );

    let mut app = App::new(config, &data_dir)?;
    let result = app.run().await;

    match &result {
        Ok(()) => tracing::info!("dashboard closed"),
        Err(e) => tracing::error!("dashboard exited with error: {:#}", e),
    }
    result
}

fn severity_colored(severity: Severity) -> ColoredString {
    match severity {
        Severity::Healthy => severity.as_str().green(),
        Severity::Warning => severity.as_str().yellow(),
        Severity::Critical => severity.as_str().red().bold(),
    }
}

fn handle_check(config_path: &Path, metric: &str, value: f64) -> Result<()> {
    let config = AppConfig::load_from(config_path)?;
    let severity = classify_named(value, metric, &config.thresholds)?;

    println!("{} {}: {}", metric.to_lowercase(), value, severity_colored(severity));
    Ok(())
}

fn handle_alerts(config_path: &Path, sample: MetricSample) -> Result<()> {
    let config = AppConfig::load_from(config_path)?;

    println!("{:<10} {:<10} {}", "Metric", "Value", "Status");
    println!("{}", "-".repeat(32));
    for metric in MetricType::all() {
        let value = sample.value(*metric);
        println!(
            "{:<10} {:<10} {}",
            metric.key(),
            format!("{:.1}", value),
            severity_colored(classify(value, *metric, &config.thresholds))
        );
    }
    println!();

    let alerts = derive_alerts(&sample);
    if alerts.is_empty() {
        println!("{}", "✓ No alerts".green());
        return Ok(());
    }

    for alert in alerts {
        let line = match alert.severity {
            AlertSeverity::Critical => format!("[CRITICAL] {}", alert.message).red().bold(),
            AlertSeverity::Warning => format!("[WARNING]  {}", alert.message).yellow(),
        };
        println!("{}", line);
    }
    Ok(())
}

fn handle_processes(search: &str, status: &str, threshold: &str, json: bool) -> Result<()> {
    let status: StatusFilter = status.parse()?;
    let threshold: ThresholdFilter = threshold.parse()?;

    let all = mock_processes();
    let shown = filter_processes(&all, search, status, threshold);

    if json {
        println!("{}", serde_json::to_string_pretty(&shown).context("Failed to serialize processes")?);
        return Ok(());
    }

    println!(
        "{:<8} {:<14} {:<8} {:<8} {:<10} USER",
        "PID", "NAME", "CPU%", "MEM%", "STATUS"
    );

    if shown.is_empty() {
        println!("{}", NO_RESULTS_MESSAGE.dimmed());
    }

    for p in &shown {
        let name = match p.emphasis() {
            RowEmphasis::Critical => format!("{:<14}", p.name).red().bold(),
            RowEmphasis::Warning => format!("{:<14}", p.name).yellow(),
            RowEmphasis::Normal => format!("{:<14}", p.name).normal(),
        };

        println!(
            "{:<8} {} {:<8} {:<8} {:<10} {}",
            p.pid,
            name,
            format_percent(p.cpu_usage),
            format_percent(p.memory_usage),
            p.status.as_str(),
            p.user
        );
    }

    println!("\n{} of {} processes", shown.len(), all.len());
    Ok(())
}

fn handle_logout() -> Result<()> {
    let store = FileSessionStore::in_dir(&AppConfig::data_dir()?);
    store.clear()?;
    tracing::info!(path = %store.path().display(), "session cleared");
    println!("{}", "✓ Signed out".green());
    Ok(())
}

fn handle_config(command: ConfigCommands, config_path: &Path) -> Result<()> {
    match command {
        ConfigCommands::View => {
            let mut config = AppConfig::load_from(config_path)?;
            // Mask the credential digest
            config.auth.password_sha256 = "****".to_string();

            println!("Configuration ({}):\n", config_path.display());
            println!("{}", toml::to_string_pretty(&config).context("Failed to serialize config")?);
        }
        ConfigCommands::Path => {
            let state = if config_path.exists() { "exists" } else { "not created, defaults in use" };
            println!("{} ({})", config_path.display(), state);
        }
        ConfigCommands::Init { force } => {
            if config_path.exists() && !force {
                println!(
                    "{}",
                    format!("Config already exists at {} (use --force to overwrite)", config_path.display()).yellow()
                );
                return Ok(());
            }
            AppConfig::default().save_to(config_path)?;
            println!("{} {}", "✓ Wrote default config to".green(), config_path.display());
        }
    }

    Ok(())
}
