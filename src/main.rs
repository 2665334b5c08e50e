use clap::Parser;
use miette::Result;
use sct::cli::{commands, Cli, Commands};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sct=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global.clone();

    match cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Post(cmd) => commands::post::run(cmd, &global).await,
        Commands::Category(cmd) => commands::category::run(cmd, &global).await,
        Commands::Service(cmd) => commands::service::run(cmd, &global).await,
        Commands::Card(cmd) => commands::card::run(cmd, &global).await,
        Commands::Logo(cmd) => commands::logo::run(cmd, &global).await,
        Commands::Testimonial(cmd) => commands::testimonial::run(cmd, &global).await,
        Commands::Upload(args) => commands::upload::run(args).await,
        Commands::Completions(args) => commands::completions::run(args),
    }
}
