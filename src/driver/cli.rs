//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::{Parser, Subcommand};

/// ホストのログを分類・解析・検索するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "logsift")]
#[command(about = "Browse, search and diagnose host log files", long_about = None)]
pub struct Args {
    /// Config file path
    #[arg(short, long, default_value = "./.logsift/config.json")]
    pub config: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the built-in log categories
    Categories,

    /// List the log files of a category
    List {
        /// Category name
        category: String,
    },

    /// Parse one log file and print its entries
    Show {
        /// Category name
        category: String,
        /// File name or full location
        file: String,
        /// Only entries containing this term
        #[arg(long)]
        term: Option<String>,
        /// Only entries from the last N hours
        #[arg(long, value_parser = clap::value_parser!(i64).range(0..))]
        since_hours: Option<i64>,
    },

    /// Parse one log file and report known issues
    Analyze {
        /// Category name
        category: String,
        /// File name or full location
        file: String,
    },

    /// Search every category for a term
    Search {
        /// Search term
        term: String,
        /// Look back this many hours (defaults to the configured value)
        #[arg(long, value_parser = clap::value_parser!(i64).range(0..))]
        hours: Option<i64>,
    },

    /// Add an issue to the knowledge base
    Learn {
        name: String,
        pattern: String,
        solution: String,
        category: String,
    },

    /// Print the knowledge base
    Knowledge,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_config() {
        let args = Args::parse_from(["logsift", "categories"]);
        assert_eq!(args.config, "./.logsift/config.json");
        assert!(!args.json);
        assert_eq!(args.command, Command::Categories);
    }

    #[test]
    fn test_args_custom_config_and_json() {
        let args = Args::parse_from(["logsift", "-c", "/custom/config.json", "knowledge", "--json"]);
        assert_eq!(args.config, "/custom/config.json");
        assert!(args.json);
        assert_eq!(args.command, Command::Knowledge);
    }

    #[test]
    fn test_args_show_with_filters() {
        let args = Args::parse_from([
            "logsift",
            "show",
            "IIS",
            "u_ex240105.log",
            "--term",
            "500",
            "--since-hours",
            "6",
        ]);
        assert_eq!(
            args.command,
            Command::Show {
                category: "IIS".to_string(),
                file: "u_ex240105.log".to_string(),
                term: Some("500".to_string()),
                since_hours: Some(6),
            }
        );
    }

    #[test]
    fn test_args_search_default_hours() {
        let args = Args::parse_from(["logsift", "search", "timeout"]);
        assert_eq!(
            args.command,
            Command::Search {
                term: "timeout".to_string(),
                hours: None,
            }
        );
    }

    #[test]
    fn test_args_negative_hours_rejected() {
        assert!(Args::try_parse_from(["logsift", "search", "timeout", "--hours", "-1"]).is_err());
        assert!(Args::try_parse_from(["logsift", "show", "IIS", "a.log", "--since-hours", "-2"]).is_err());
    }

    #[test]
    fn test_args_learn() {
        let args = Args::parse_from(["logsift", "learn", "Timeout", "timed out", "Retry", "Network"]);
        match args.command {
            Command::Learn { name, pattern, .. } => {
                assert_eq!(name, "Timeout");
                assert_eq!(pattern, "timed out");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_args_missing_command_is_error() {
        assert!(Args::try_parse_from(["logsift"]).is_err());
    }
}
