mod api;
mod commands;
mod terminal;

use commands::{CommandLine, Commands, list, serve};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init();

    let service = commands.scan.into_service()?;

    match commands.command {
        Commands::List { json } => list::list(service, json).await,
        Commands::Serve { host, port } => serve::serve(service, &host, port).await,
    }
}
