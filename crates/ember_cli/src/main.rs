//! Command-line entry point for the Ember core.
//!
//! # Responsibility
//! - Open a store from `EMBER_*` configuration (or `--db`).
//! - Run read-only commands: `ping`, `tags [N]`, `reflex <context...>`.

use clap::{Parser, Subcommand};
use ember_core::{
    core_version, init_from_config, ping, CoreConfig, MemoryService, DEFAULT_TOP_TAGS,
};
use log::error;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "ember_cli")]
#[command(about = "Read-only queries against an Ember memory store")]
#[command(version)]
struct Cli {
    /// SQLite store to open (overrides EMBER_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Check the core is linked (default)
    Ping,

    /// Most frequent echo tags with up to three example phrases each
    Tags {
        #[arg(default_value_t = DEFAULT_TOP_TAGS)]
        n: usize,
    },

    /// Echoes, figures and spine entries recalled by a context string
    Reflex {
        #[arg(required = true, num_args = 1..)]
        context: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut config = CoreConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = Some(db);
    }
    if let Err(err) = init_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    match run(&config, cli.command.unwrap_or(Command::Ping)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &CoreConfig, command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Ping => {
            println!("ember_core ping={}", ping());
            println!("ember_core version={}", core_version());
        }
        Command::Tags { n } => {
            let service = MemoryService::open(config)?;
            for summary in service.top_tags(n)? {
                println!(
                    "{}\t{}\t{}",
                    summary.tag,
                    summary.count,
                    summary.examples.join(" | ")
                );
            }
        }
        Command::Reflex { context } => {
            let service = MemoryService::open(config)?;
            let bundle = service.reflex(&context.join(" "))?;
            for echo in &bundle.echoes {
                println!("echo\t{}\t{}", echo.id, echo.phrase);
            }
            for figure in &bundle.figures {
                println!("figure\t{}\t{}", figure.id, figure.name);
            }
            for entry in &bundle.spine {
                println!("spine\t{}\t{}", entry.id, entry.statement);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{run, Cli, Command};
    use clap::{CommandFactory, Parser};
    use ember_core::{CoreConfig, DEFAULT_TOP_TAGS};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_ping() {
        let cli = Cli::try_parse_from(["ember_cli"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.db, None);
    }

    #[test]
    fn tags_count_defaults_and_rejects_non_numbers() {
        let cli = Cli::try_parse_from(["ember_cli", "tags"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Tags {
                n: DEFAULT_TOP_TAGS
            })
        );

        let cli = Cli::try_parse_from(["ember_cli", "tags", "2"]).unwrap();
        assert_eq!(cli.command, Some(Command::Tags { n: 2 }));

        assert!(Cli::try_parse_from(["ember_cli", "tags", "many"]).is_err());
    }

    #[test]
    fn reflex_collects_context_words_and_db_override() {
        let cli =
            Cli::try_parse_from(["ember_cli", "reflex", "the", "river", "--db", "ember.db"])
                .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Reflex {
                context: vec!["the".to_string(), "river".to_string()]
            })
        );
        assert_eq!(cli.db.as_deref(), Some(std::path::Path::new("ember.db")));

        assert!(Cli::try_parse_from(["ember_cli", "reflex"]).is_err());
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["ember_cli", "forget"]).is_err());
    }

    #[test]
    fn commands_run_against_volatile_store() {
        let config = CoreConfig::default();
        run(&config, Command::Ping).unwrap();
        run(&config, Command::Tags { n: 3 }).unwrap();
        run(
            &config,
            Command::Reflex {
                context: vec!["anything".to_string()],
            },
        )
        .unwrap();
    }
}
