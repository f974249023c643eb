mod commands;
mod directory;
mod input;
mod terminal;

use commands::{CommandLine, Commands, info, probe};
use reachr_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init();

    let cfg = Config {
        quiet: commands.quiet,
    };

    match commands.command {
        Commands::Info => {
            print::header("about this host", cfg.quiet);
            info::info(&cfg)
        }
        Commands::Probe {
            targets,
            limit,
            timeout_ms,
            tcp,
        } => {
            print::header("getting ready to probe", cfg.quiet);
            probe::probe(targets, limit, timeout_ms, tcp, &cfg).await
        }
    }
}
