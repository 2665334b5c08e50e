//! `sct logo` command - Client logo management
//!
//! Logos pair a table row with an object in the logo bucket: `new --file`
//! uploads before inserting, and delete removes the object before the row.

use std::path::PathBuf;

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::args::GlobalOpts;
use crate::cli::entity_cmd::{
    emit_record_format, resolve_record, run_delete_generic, run_edit_generic, run_list_generic,
    run_move_generic, store_report,
};
use crate::cli::filters::ActiveFilter;
use crate::core::config::Config;
use crate::core::ordering::Direction;
use crate::entities::ClientLogo;
use crate::store::storage::{
    self, content_type_for, extension_of, key_from_public_url, logo_key, StorageClient,
};
use crate::store::RestStore;

#[derive(Subcommand, Debug)]
pub enum LogoCommands {
    /// List logos in display order
    List(ListArgs),

    /// Show a logo's details
    Show(RefArgs),

    /// Add a client logo
    New(NewArgs),

    /// Edit a logo in your editor
    Edit(RefArgs),

    /// Delete a logo and its stored image
    Delete(DeleteArgs),

    /// Move a logo one step up or down in display order
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
    /// Client name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Logo image to upload (PNG/SVG/JPEG, max 5 MB)
    #[arg(long, conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// Use an already-hosted image instead of uploading
    #[arg(long)]
    pub url: Option<String>,

    /// Client website link
    #[arg(long)]
    pub website: Option<String>,

    /// Create hidden from the public site
    #[arg(long)]
    pub inactive: bool,
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

pub async fn run(cmd: LogoCommands, global: &GlobalOpts) -> Result<()> {
    let (config, store) = super::open_store()?;

    match cmd {
        LogoCommands::List(args) => {
            run_list_generic::<ClientLogo>(&store, args.status, global).await
        }
        LogoCommands::Show(args) => run_show(&store, args, global).await,
        LogoCommands::New(args) => run_new(&store, &config, args).await,
        LogoCommands::Edit(args) => {
            let logo = find_logo(&store, &args.reference).await?;
            run_edit_generic(&store, &config, &logo).await
        }
        LogoCommands::Delete(args) => run_delete(&store, &config, args).await,
        LogoCommands::Move(args) => {
            let direction: Direction = args.direction.parse().map_err(|e| miette::miette!("{e}"))?;
            run_move_generic::<ClientLogo>(&store, args.position, direction).await
        }
    }
}

async fn find_logo(store: &RestStore, reference: &str) -> Result<ClientLogo> {
    let logos = store.fetch_all::<ClientLogo>().await.map_err(store_report)?;
    resolve_record(&logos, reference).cloned()
}

async fn run_show(store: &RestStore, args: RefArgs, global: &GlobalOpts) -> Result<()> {
    let logo = find_logo(store, &args.reference).await?;

    if !emit_record_format(&logo, global)? {
        return Ok(());
    }

    println!("{}", style("─".repeat(60)).dim());
    if let Some(id) = &logo.id {
        println!("{}: {}", style("ID").bold(), style(id).cyan());
    }
    println!("{}: {}", style("Name").bold(), style(&logo.name).yellow());
    println!("{}: {}", style("Image").bold(), logo.logo_url);
    if let Some(website) = &logo.website_url {
        println!("{}: {}", style("Website").bold(), website);
    }
    println!(
        "{}: {}",
        style("Active").bold(),
        if logo.is_active { "yes" } else { "no" }
    );
    println!("{}", style("─".repeat(60)).dim());
    Ok(())
}

async fn run_new(store: &RestStore, config: &Config, args: NewArgs) -> Result<()> {
    let backend = config
        .require_backend()
        .map_err(|e| miette::miette!("{e}"))?;

    let logo_url = match (args.file, args.url) {
        (Some(file), None) => {
            let name = file
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| miette::miette!("{} is not a file", file.display()))?;
            let ext = extension_of(name)
                .ok_or_else(|| miette::miette!("'{name}' has no file extension"))?;
            let bytes = std::fs::read(&file).into_diagnostic()?;

            storage::validate_logo(bytes.len() as u64, &ext)
                .map_err(|e| miette::miette!("{e}"))?;
            let content_type = content_type_for(&ext)
                .ok_or_else(|| miette::miette!("unsupported file type '.{ext}'"))?;

            let client = StorageClient::new(&backend);
            client
                .upload(&config.storage.logo_bucket, &logo_key(&ext), bytes, content_type)
                .await
                .map_err(|e| miette::miette!("{e}"))?
        }
        (None, Some(url)) => url,
        _ => return Err(miette::miette!("provide either --file or --url")),
    };

    let mut logo = ClientLogo::new(args.name, logo_url);
    logo.website_url = args.website;
    logo.is_active = !args.inactive;

    let created = store.insert(&logo).await.map_err(store_report)?;

    println!(
        "{} Created logo {}",
        style("✓").green(),
        style(&created.name).cyan()
    );
    println!("   {}", style(&created.logo_url).dim());
    Ok(())
}

async fn run_delete(store: &RestStore, config: &Config, args: DeleteArgs) -> Result<()> {
    let logo = find_logo(store, &args.reference).await?;

    if !args.yes {
        let confirmed = dialoguer::Confirm::with_theme(&dialoguer::theme::ColorfulTheme::default())
            .with_prompt(format!("Delete logo \"{}\" and its stored image?", logo.name))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    // remove the stored image first; a foreign URL just skips this step
    match key_from_public_url(&logo.logo_url, &config.storage.logo_bucket) {
        Some(key) => {
            let backend = config
                .require_backend()
                .map_err(|e| miette::miette!("{e}"))?;
            let client = StorageClient::new(&backend);
            if let Err(error) = client.remove(&config.storage.logo_bucket, &key).await {
                tracing::warn!(%error, "could not remove stored logo image");
            }
        }
        None => {
            tracing::debug!(url = %logo.logo_url, "logo URL is not in our bucket; leaving it");
        }
    }

    // already confirmed above
    run_delete_generic(store, &logo, true).await.map(|_| ())
}
