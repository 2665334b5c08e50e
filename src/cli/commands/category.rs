//! `sct category` command - Blog category management

use clap::Subcommand;
use console::style;
use miette::Result;
use serde_json::json;

use crate::cli::args::{GlobalOpts, OutputFormat};
use crate::cli::entity_cmd::{resolve_record, run_delete_generic, store_report};
use crate::cli::helpers::format_short_id_str;
use crate::core::entity::ContentRecord;
use crate::entities::Category;
use crate::store::RestStore;

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories alphabetically
    List,

    /// Create a new category
    New(NewArgs),

    /// Rename a category
    Rename(RenameArgs),

    /// Delete a category (posts keep their tag)
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Category name
    pub name: String,
}

#[derive(clap::Args, Debug)]
pub struct RenameArgs {
    /// Current name or id prefix
    pub reference: String,

    /// New name
    #[arg(long)]
    pub name: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Name or id prefix
    pub reference: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub async fn run(cmd: CategoryCommands, global: &GlobalOpts) -> Result<()> {
    let (_config, store) = super::open_store()?;

    match cmd {
        CategoryCommands::List => run_list(&store, global).await,
        CategoryCommands::New(args) => run_new(&store, args).await,
        CategoryCommands::Rename(args) => run_rename(&store, args).await,
        CategoryCommands::Delete(args) => {
            let categories = store.fetch_all::<Category>().await.map_err(store_report)?;
            let category = resolve_record(&categories, &args.reference)?.clone();
            run_delete_generic(&store, &category, args.yes)
                .await
                .map(|_| ())
        }
    }
}

async fn run_list(store: &RestStore, global: &GlobalOpts) -> Result<()> {
    let mut categories = store.fetch_all::<Category>().await.map_err(store_report)?;
    categories.sort_by_key(|category| category.name.to_lowercase());

    match global.format {
        OutputFormat::Yaml => {
            print!(
                "{}",
                serde_yml::to_string(&categories).map_err(|e| miette::miette!("{e}"))?
            );
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&categories).map_err(|e| miette::miette!("{e}"))?
            );
        }
        OutputFormat::Id => {
            for category in &categories {
                if let Some(id) = &category.id {
                    println!("{id}");
                }
            }
        }
        OutputFormat::Table => {
            if categories.is_empty() {
                println!("No categories found.");
                return Ok(());
            }
            for category in &categories {
                println!(
                    "{:<10} {}",
                    category
                        .id
                        .as_deref()
                        .map(format_short_id_str)
                        .unwrap_or_else(|| "-".to_string()),
                    category.name
                );
            }
            println!();
            println!("{} categories found", style(categories.len()).cyan());
        }
    }
    Ok(())
}

async fn run_new(store: &RestStore, args: NewArgs) -> Result<()> {
    let created = store
        .insert(&Category::new(args.name))
        .await
        .map_err(store_report)?;

    println!(
        "{} Created category {}",
        style("✓").green(),
        style(&created.name).cyan()
    );
    Ok(())
}

async fn run_rename(store: &RestStore, args: RenameArgs) -> Result<()> {
    let categories = store.fetch_all::<Category>().await.map_err(store_report)?;
    let category = resolve_record(&categories, &args.reference)?;
    let id = category
        .id
        .as_deref()
        .ok_or_else(|| miette::miette!("this category has no id and cannot be renamed"))?;

    store
        .update_where(Category::TABLE, "id", id, &json!({ "name": args.name }))
        .await
        .map_err(store_report)?;

    println!(
        "{} Renamed {} to {}",
        style("✓").green(),
        style(&category.name).dim(),
        style(&args.name).cyan()
    );
    Ok(())
}
