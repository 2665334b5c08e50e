//! `sct service` command - Services page management

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use miette::{IntoDiagnostic, Result};

use crate::cli::args::GlobalOpts;
use crate::cli::entity_cmd::{
    emit_record_format, resolve_record, run_delete_generic, run_edit_generic, run_list_generic,
    run_move_generic, store_report,
};
use crate::cli::filters::ActiveFilter;
use crate::core::ordering::Direction;
use crate::entities::Service;
use crate::store::RestStore;

#[derive(Subcommand, Debug)]
pub enum ServiceCommands {
    /// List services in display order
    List(ListArgs),

    /// Show a service's details
    Show(ShowArgs),

    /// Create a new service
    New(NewArgs),

    /// Edit a service in your editor
    Edit(RefArgs),

    /// Delete a service
    Delete(DeleteArgs),

    /// Move a service one step up or down in display order
    Move(MoveArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by visibility
    #[arg(long, short = 's', value_enum, default_value_t = ActiveFilter::Active)]
    pub status: ActiveFilter,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Id prefix or title fragment
    pub reference: String,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Service title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Description shown on the card
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Icon identifier
    #[arg(long)]
    pub icon: Option<String>,

    /// Create hidden from the public site
    #[arg(long)]
    pub inactive: bool,

    /// Use interactive wizard to fill in fields
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct RefArgs {
    /// Id prefix or title fragment
    pub reference: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Id prefix or title fragment
    pub reference: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(clap::Args, Debug)]
pub struct MoveArgs {
    /// 1-based position in the current display order
    pub position: usize,

    /// Direction (up/down)
    pub direction: String,
}

pub async fn run(cmd: ServiceCommands, global: &GlobalOpts) -> Result<()> {
    let (config, store) = super::open_store()?;

    match cmd {
        ServiceCommands::List(args) => {
            run_list_generic::<Service>(&store, args.status, global).await
        }
        ServiceCommands::Show(args) => run_show(&store, args, global).await,
        ServiceCommands::New(args) => run_new(&store, args).await,
        ServiceCommands::Edit(args) => {
            let service = find_service(&store, &args.reference).await?;
            run_edit_generic(&store, &config, &service).await
        }
        ServiceCommands::Delete(args) => {
            let service = find_service(&store, &args.reference).await?;
            run_delete_generic(&store, &service, args.yes)
                .await
                .map(|_| ())
        }
        ServiceCommands::Move(args) => {
            let direction: Direction = args.direction.parse().map_err(|e| miette::miette!("{e}"))?;
            run_move_generic::<Service>(&store, args.position, direction).await
        }
    }
}

async fn find_service(store: &RestStore, reference: &str) -> Result<Service> {
    let services = store.fetch_all::<Service>().await.map_err(store_report)?;
    resolve_record(&services, reference).cloned()
}

async fn run_show(store: &RestStore, args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let service = find_service(store, &args.reference).await?;

    if !emit_record_format(&service, global)? {
        return Ok(());
    }

    println!("{}", style("─".repeat(60)).dim());
    if let Some(id) = &service.id {
        println!("{}: {}", style("ID").bold(), style(id).cyan());
    }
    println!(
        "{}: {}",
        style("Title").bold(),
        style(&service.title).yellow()
    );
    if let Some(icon) = &service.icon {
        println!("{}: {}", style("Icon").bold(), icon);
    }
    if let Some(order) = service.order {
        println!("{}: {}", style("Order").bold(), order);
    }
    println!(
        "{}: {}",
        style("Active").bold(),
        if service.is_active { "yes" } else { "no" }
    );
    println!("{}", style("─".repeat(60)).dim());
    println!();
    println!("{}", service.description);
    Ok(())
}

async fn run_new(store: &RestStore, args: NewArgs) -> Result<()> {
    let theme = ColorfulTheme::default();

    let (title, description, icon) = if args.interactive {
        let title: String = Input::with_theme(&theme)
            .with_prompt("Title")
            .interact_text()
            .into_diagnostic()?;
        let description: String = Input::with_theme(&theme)
            .with_prompt("Description")
            .interact_text()
            .into_diagnostic()?;
        let icon: String = Input::with_theme(&theme)
            .with_prompt("Icon (optional)")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;
        (title, description, icon)
    } else {
        let title = args
            .title
            .ok_or_else(|| miette::miette!("--title is required (or use -i for the wizard)"))?;
        let description = args.description.unwrap_or_default();
        (title, description, args.icon.unwrap_or_default())
    };

    let mut service = Service::new(title, description);
    service.icon = if icon.is_empty() { None } else { Some(icon) };
    service.is_active = !args.inactive;

    let created = store.insert(&service).await.map_err(store_report)?;

    println!(
        "{} Created service {}",
        style("✓").green(),
        style(&created.title).cyan()
    );
    if let Some(id) = &created.id {
        println!("   {}", style(id).dim());
    }
    Ok(())
}
