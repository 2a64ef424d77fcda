use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI surface definition.
#[derive(Parser, Debug)]
#[command(
    name = "jotter",
    about = "Plain-text task tracker with dates and undo",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Task file to use instead of the configured one.
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Optional subcommand; defaults to the interactive prompt when absent.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read commands from stdin until `bye` or end of input.
    Repl,
    /// Run a single command line, e.g. `jotter exec todo read book`.
    Exec {
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "COMMAND"
        )]
        words: Vec<String>,
    },
    /// Print version and exit.
    Version,
    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Create a default config file if one does not exist.
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_repl_when_missing_subcommand() {
        let cli = Cli::try_parse_from(["jotter"]).expect("parse should succeed");
        assert_eq!(cli.command, None);
        assert_eq!(cli.data_file, None);
    }

    #[test]
    fn parses_repl_subcommand() {
        let cli = Cli::try_parse_from(["jotter", "repl"]).expect("parse should succeed");
        assert_eq!(cli.command, Some(Command::Repl));
    }

    #[test]
    fn exec_keeps_markers_and_hyphens() {
        let cli = Cli::try_parse_from([
            "jotter", "exec", "deadline", "return", "book", "/by", "2019-10-15", "-", "urgent",
        ])
        .expect("parse should succeed");
        let Some(Command::Exec { words }) = cli.command else {
            panic!("expected exec");
        };
        assert_eq!(
            words.join(" "),
            "deadline return book /by 2019-10-15 - urgent"
        );
    }

    #[test]
    fn exec_requires_a_command() {
        assert!(Cli::try_parse_from(["jotter", "exec"]).is_err());
    }

    #[test]
    fn data_file_is_global() {
        let cli = Cli::try_parse_from(["jotter", "repl", "--data-file", "/tmp/tasks.txt"])
            .expect("parse should succeed");
        assert_eq!(cli.data_file, Some(PathBuf::from("/tmp/tasks.txt")));

        let cli = Cli::try_parse_from(["jotter", "--data-file", "x.txt", "exec", "list"])
            .expect("parse should succeed");
        assert_eq!(cli.data_file, Some(PathBuf::from("x.txt")));
        assert_eq!(
            cli.command,
            Some(Command::Exec {
                words: vec!["list".into()]
            })
        );
    }

    #[test]
    fn parses_config_init_subcommand() {
        let cli = Cli::try_parse_from(["jotter", "config", "init"]).expect("parse should succeed");
        assert_eq!(cli.command, Some(Command::Config(ConfigCommand::Init)));
    }
}
