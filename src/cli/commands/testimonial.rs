//! `sct testimonial` command - Testimonial management

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
use crate::entities::Testimonial;
use crate::store::RestStore;

#[derive(Subcommand, Debug)]
pub enum TestimonialCommands {
    /// List testimonials in display order
    List(ListArgs),

    /// Show a testimonial's details
    Show(RefArgs),

    /// Create a new testimonial
    New(NewArgs),

    /// Edit a testimonial in your editor
    Edit(RefArgs),

    /// Delete a testimonial
    Delete(DeleteArgs),

    /// Move a testimonial one step up or down in display order
    Move(MoveArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by visibility
    #[arg(long, short = 's', value_enum, default_value_t = ActiveFilter::Active)]
    pub status: ActiveFilter,
}

#[derive(clap::Args, Debug)]
pub struct RefArgs {
    /// Id prefix or name fragment
    pub reference: String,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// The quote itself
    #[arg(long, short = 'q')]
    pub quote: Option<String>,

    /// Person quoted
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Role or company line
    #[arg(long)]
    pub subtitle: Option<String>,

    /// Create hidden from the public site
    #[arg(long)]
    pub inactive: bool,

    /// Use interactive wizard to fill in fields
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Id prefix or name fragment
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

pub async fn run(cmd: TestimonialCommands, global: &GlobalOpts) -> Result<()> {
    let (config, store) = super::open_store()?;

    match cmd {
        TestimonialCommands::List(args) => {
            run_list_generic::<Testimonial>(&store, args.status, global).await
        }
        TestimonialCommands::Show(args) => run_show(&store, args, global).await,
        TestimonialCommands::New(args) => run_new(&store, args).await,
        TestimonialCommands::Edit(args) => {
            let testimonial = find_testimonial(&store, &args.reference).await?;
            run_edit_generic(&store, &config, &testimonial).await
        }
        TestimonialCommands::Delete(args) => {
            let testimonial = find_testimonial(&store, &args.reference).await?;
            run_delete_generic(&store, &testimonial, args.yes)
                .await
                .map(|_| ())
        }
        TestimonialCommands::Move(args) => {
            let direction: Direction = args.direction.parse().map_err(|e| miette::miette!("{e}"))?;
            run_move_generic::<Testimonial>(&store, args.position, direction).await
        }
    }
}

async fn find_testimonial(store: &RestStore, reference: &str) -> Result<Testimonial> {
    let testimonials = store
        .fetch_all::<Testimonial>()
        .await
        .map_err(store_report)?;
    resolve_record(&testimonials, reference).cloned()
}

async fn run_show(store: &RestStore, args: RefArgs, global: &GlobalOpts) -> Result<()> {
    let testimonial = find_testimonial(store, &args.reference).await?;

    if !emit_record_format(&testimonial, global)? {
        return Ok(());
    }

    println!("{}", style("─".repeat(60)).dim());
    if let Some(id) = &testimonial.id {
        println!("{}: {}", style("ID").bold(), style(id).cyan());
    }
    println!(
        "{}: {}",
        style("Name").bold(),
        style(&testimonial.name).yellow()
    );
    if let Some(subtitle) = &testimonial.subtitle {
        println!("{}: {}", style("Subtitle").bold(), subtitle);
    }
    println!(
        "{}: {}",
        style("Active").bold(),
        if testimonial.is_active { "yes" } else { "no" }
    );
    println!("{}", style("─".repeat(60)).dim());
    println!();
    println!("\u{201c}{}\u{201d}", testimonial.quote);
    Ok(())
}

async fn run_new(store: &RestStore, args: NewArgs) -> Result<()> {
    let theme = ColorfulTheme::default();

    let (quote, name, subtitle) = if args.interactive {
        let quote: String = Input::with_theme(&theme)
            .with_prompt("Quote")
            .interact_text()
            .into_diagnostic()?;
        let name: String = Input::with_theme(&theme)
            .with_prompt("Name")
            .interact_text()
            .into_diagnostic()?;
        let subtitle: String = Input::with_theme(&theme)
            .with_prompt("Role / company (optional)")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;
        (quote, name, subtitle)
    } else {
        let quote = args
            .quote
            .ok_or_else(|| miette::miette!("--quote is required (or use -i for the wizard)"))?;
        let name = args
            .name
            .ok_or_else(|| miette::miette!("--name is required (or use -i for the wizard)"))?;
        (quote, name, args.subtitle.unwrap_or_default())
    };

    let mut testimonial = Testimonial::new(quote, name);
    testimonial.subtitle = if subtitle.is_empty() {
        None
    } else {
        Some(subtitle)
    };
    testimonial.is_active = !args.inactive;

    let created = store.insert(&testimonial).await.map_err(store_report)?;

    println!(
        "{} Created testimonial from {}",
        style("✓").green(),
        style(&created.name).cyan()
    );
    if let Some(id) = &created.id {
        println!("   {}", style(id).dim());
    }
    Ok(())
}
