//! `sct card` command - Home page offer card management

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::args::GlobalOpts;
use crate::cli::entity_cmd::{
    emit_record_format, resolve_record, run_delete_generic, run_edit_generic, run_list_generic,
    run_move_generic, store_report,
};
use crate::cli::filters::ActiveFilter;
use crate::core::ordering::Direction;
use crate::entities::Card;
use crate::store::RestStore;

#[derive(Subcommand, Debug)]
pub enum CardCommands {
    /// List cards in display order
    List(ListArgs),

    /// Show a card's details
    Show(RefArgs),

    /// Create a new card
    New(NewArgs),

    /// Edit a card in your editor
    Edit(RefArgs),

    /// Delete a card
    Delete(DeleteArgs),

    /// Move a card one step up or down in display order
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
    /// Id prefix or title fragment
    pub reference: String,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Card title
    #[arg(long, short = 't')]
    pub title: String,

    /// Secondary line under the title
    #[arg(long)]
    pub subtitle: Option<String>,

    /// Longer copy on the card back
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Icon identifier
    #[arg(long)]
    pub icon: Option<String>,

    /// Start offset of the accent-colored span in the title
    #[arg(long, requires = "highlight_end")]
    pub highlight_start: Option<i64>,

    /// End offset of the accent-colored span in the title
    #[arg(long, requires = "highlight_start")]
    pub highlight_end: Option<i64>,

    /// Create hidden from the public site
    #[arg(long)]
    pub inactive: bool,
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

pub async fn run(cmd: CardCommands, global: &GlobalOpts) -> Result<()> {
    let (config, store) = super::open_store()?;

    match cmd {
        CardCommands::List(args) => run_list_generic::<Card>(&store, args.status, global).await,
        CardCommands::Show(args) => run_show(&store, args, global).await,
        CardCommands::New(args) => run_new(&store, args).await,
        CardCommands::Edit(args) => {
            let card = find_card(&store, &args.reference).await?;
            run_edit_generic(&store, &config, &card).await
        }
        CardCommands::Delete(args) => {
            let card = find_card(&store, &args.reference).await?;
            run_delete_generic(&store, &card, args.yes).await.map(|_| ())
        }
        CardCommands::Move(args) => {
            let direction: Direction = args.direction.parse().map_err(|e| miette::miette!("{e}"))?;
            run_move_generic::<Card>(&store, args.position, direction).await
        }
    }
}

async fn find_card(store: &RestStore, reference: &str) -> Result<Card> {
    let cards = store.fetch_all::<Card>().await.map_err(store_report)?;
    resolve_record(&cards, reference).cloned()
}

async fn run_show(store: &RestStore, args: RefArgs, global: &GlobalOpts) -> Result<()> {
    let card = find_card(store, &args.reference).await?;

    if !emit_record_format(&card, global)? {
        return Ok(());
    }

    println!("{}", style("─".repeat(60)).dim());
    if let Some(id) = &card.id {
        println!("{}: {}", style("ID").bold(), style(id).cyan());
    }
    println!("{}: {}", style("Title").bold(), style(&card.title).yellow());
    if let Some(subtitle) = &card.subtitle {
        println!("{}: {}", style("Subtitle").bold(), subtitle);
    }
    if let (Some(start), Some(end)) = (card.highlight_start, card.highlight_end) {
        println!("{}: {}..{}", style("Highlight").bold(), start, end);
    }
    println!(
        "{}: {}",
        style("Active").bold(),
        if card.is_active { "yes" } else { "no" }
    );
    println!("{}", style("─".repeat(60)).dim());
    if let Some(description) = &card.description {
        println!();
        println!("{description}");
    }
    Ok(())
}

async fn run_new(store: &RestStore, args: NewArgs) -> Result<()> {
    if let (Some(start), Some(end)) = (args.highlight_start, args.highlight_end) {
        let title_len = args.title.chars().count() as i64;
        if start < 0 || end < start || end > title_len {
            return Err(miette::miette!(
                "highlight span {start}..{end} does not fit in the title ({title_len} chars)"
            ));
        }
    }

    let mut card = Card::new(args.title);
    card.subtitle = args.subtitle;
    card.description = args.description;
    card.icon = args.icon;
    card.highlight_start = args.highlight_start;
    card.highlight_end = args.highlight_end;
    card.is_active = !args.inactive;

    let created = store.insert(&card).await.map_err(store_report)?;

    println!(
        "{} Created card {}",
        style("✓").green(),
        style(&created.title).cyan()
    );
    if let Some(id) = &created.id {
        println!("   {}", style(id).dim());
    }
    Ok(())
}
