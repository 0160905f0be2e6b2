//! CLI module graph.

pub mod check;
pub mod command;
pub mod detect;
pub mod log;
pub mod output;
pub mod run;
pub mod serve;

pub use command::Cli;

use command::Commands;
use output::OutputConfig;

use crate::error::Result;

/// Configure output and run the selected command.
pub async fn dispatch(cli: &Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    match &cli.command {
        Commands::Run(args) => run::execute(cli, args).await,
        Commands::Serve(args) => serve::execute(cli, args).await,
        Commands::Detect(args) => detect::execute(cli, args),
        Commands::Log(command) => log::execute(cli, command),
        Commands::Check(command) => check::execute(cli, command),
    }
}
