use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod dump_cmd;
mod input;
mod parse_cmd;
mod state;

use dump_cmd::{DumpArgs, run_dump};
use parse_cmd::{ParseArgs, run_parse};

#[derive(Parser, Debug)]
#[command(
    name = "cmbstmt",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CMBSTMT_BUILD_SHA"), ")"),
    about = "Extract transactions from CMB credit card statement PDFs"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement and print its transactions; optionally export CSV
    Parse(ParseArgs),

    /// List the extracted text fragments of a statement
    Dump(DumpArgs),

    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,

    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,
}

fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Parse(args) => {
            let cfg = config::load_config()?;
            run_parse(&args, &cfg)?;
        }

        Command::Dump(args) => {
            run_dump(&args)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg)?);
            }
            ConfigCommand::Path => println!("{}", config::config_path()?.display()),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_verbose_and_config_subcommand() {
        let cli = Cli::try_parse_from(["cmbstmt", "config", "show", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Command::Config {
                command: ConfigCommand::Show
            }
        ));
    }

    #[test]
    fn test_dump_args() {
        let cli = Cli::try_parse_from([
            "cmbstmt", "dump", "stmt.pdf", "--find", "NaN", "--find", "5445", "--context", "2",
        ])
        .unwrap();
        let Command::Dump(args) = cli.command else {
            panic!("expected dump");
        };
        assert_eq!(args.find, vec!["NaN", "5445"]);
        assert_eq!(args.context, 2);
        assert!(!args.repayments);
    }
}
