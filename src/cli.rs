/// CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Build timestamp injected at compile time
pub const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP");
pub const VERSION_WITH_BUILD: &str = concat!(env!("CARGO_PKG_VERSION"), " (built: ", env!("BUILD_TIMESTAMP"), ")");

#[derive(Parser)]
#[command(name = "sysmon")]
#[command(author, version = VERSION_WITH_BUILD, about = "Simulated system monitoring dashboard", long_about = None)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a metric value (healthy / warning / critical)
    Check {
        /// Metric name: cpu, memory, disk or network
        metric: String,

        /// Current value (percent, or MB/s for network)
        value: f64,
    },

    /// Show the alerts a sample would raise
    Alerts {
        #[arg(long, default_value_t = 0.0)]
        cpu: f64,

        #[arg(long, default_value_t = 0.0)]
        memory: f64,

        #[arg(long, default_value_t = 0.0)]
        disk: f64,

        #[arg(long, default_value_t = 0.0)]
        network: f64,
    },

    /// List the process table with filters applied
    Processes {
        /// Name substring (case-insensitive) or PID substring
        #[arg(short, long, default_value = "")]
        search: String,

        /// all, running, warning, critical or stopped
        #[arg(long, default_value = "all")]
        status: String,

        /// all, high-cpu, high-memory or critical
        #[arg(long, default_value = "all")]
        threshold: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Forget the remembered login
    Logout,

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Print the SHA-256 digest to put in auth.password_sha256
    HashPassword { password: String },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// View configuration
    View,

    /// Print the config file location
    Path,

    /// Write the default configuration (keeps an existing file unless --force)
    Init {
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_processes_flags() {
        let cli = Cli::try_parse_from([
            "sysmon", "processes", "--search", "sql", "--threshold", "critical", "--json",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Processes { search, status, threshold, json }) => {
                assert_eq!(search, "sql");
                assert_eq!(status, "all");
                assert_eq!(threshold, "critical");
                assert!(json);
            }
            _ => panic!("expected processes command"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["sysmon", "check", "cpu", "80", "--config", "/tmp/c.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(cli.command, Some(Commands::Check { value, .. }) if value == 80.0));
    }

    #[test]
    fn test_no_subcommand_runs_tui() {
        let cli = Cli::try_parse_from(["sysmon"]).unwrap();
        assert!(cli.command.is_none());
    }
}
