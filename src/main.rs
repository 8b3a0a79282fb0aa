//! auditop - CLI companion for technical audit questionnaires stored in Grist

use clap::{CommandFactory, Parser};

mod autosave;
mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod schema;
mod store;

use cli::args::GlobalOptions;
use cli::{
    AuditCommands, Cli, Commands, ConsumptionCommands, HostingCommands, ProductCommands,
    RecommendationCommands,
};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `warn` by default, `debug` with --debug; RUST_LOG overrides both.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts).await,
        Commands::Version => {
            println!("auditop version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Audit(cmd) => match cmd {
            AuditCommands::Get { hash } => cli::audit::get(&opts, &hash).await,
            AuditCommands::Questions { hash, unanswered } => {
                cli::audit::questions(&opts, &hash, unanswered).await
            }
            AuditCommands::Answer {
                hash,
                question,
                answer,
                comment,
                percentage,
            } => cli::audit::answer(&opts, &hash, question, answer, comment, percentage).await,
            AuditCommands::Reset { hash, questions } => {
                cli::audit::reset(&opts, &hash, &questions).await
            }
            AuditCommands::Import { hash, file } => cli::audit::import(&opts, &hash, &file).await,
        },
        Commands::Product(cmd) => match cmd {
            ProductCommands::Get { id } => cli::product::get(&opts, id).await,
            ProductCommands::List => cli::product::list(&opts).await,
            ProductCommands::Tools { dedicated } => cli::product::tools(&opts, dedicated).await,
            ProductCommands::SetTools {
                id,
                shared,
                dedicated,
            } => cli::product::set_tools(&opts, id, shared, dedicated).await,
        },
        Commands::Recommendation(cmd) => match cmd {
            RecommendationCommands::List {
                product,
                status,
                pending,
            } => cli::recommendation::list(&opts, product, status, pending).await,
            RecommendationCommands::SetStatus { id, status } => {
                cli::recommendation::set_status(&opts, id, &status).await
            }
        },
        Commands::Consumption(cmd) => match cmd {
            ConsumptionCommands::List {
                product,
                last_month,
                month,
            } => cli::consumption::list(&opts, product, last_month, month.as_deref()).await,
        },
        Commands::Hosting(cmd) => match cmd {
            HostingCommands::List => cli::hosting::list(&opts).await,
            HostingCommands::Get { ids } => cli::hosting::get(&opts, &ids).await,
        },
        Commands::Completion { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "auditop", &mut std::io::stdout());
            Ok(())
        }
    }
}
