//! `sct post` command - Blog post management

use std::path::PathBuf;

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::args::GlobalOpts;
use crate::cli::entity_cmd::{
    emit_list_format, emit_record_format, resolve_record, run_delete_generic, run_edit_generic,
    run_move_generic, store_report,
};
use crate::core::ordering::Direction;
use crate::core::slug::slugify;
use crate::entities::{Category, Post};
use crate::html::sanitize_html;
use crate::render::PreviewRenderer;
use crate::store::RestStore;

#[derive(Subcommand, Debug)]
pub enum PostCommands {
    /// List posts in display order
    List(ListArgs),

    /// Show a post's details
    Show(ShowArgs),

    /// Create a new post
    New(NewArgs),

    /// Edit a post in your editor
    Edit(EditArgs),

    /// Delete a post
    Delete(DeleteArgs),

    /// Move a post one step up or down in display order
    Move(MoveArgs),

    /// Render a post to a local HTML file for review
    Preview(PreviewArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by category name (exact match)
    #[arg(long, short = 'c')]
    pub category: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Slug, id prefix, or title fragment
    pub reference: String,

    /// Include the full HTML body
    #[arg(long)]
    pub with_content: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Post title (the slug is derived from it)
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Teaser shown on the blog listing
    #[arg(long)]
    pub summary: Option<String>,

    /// Category name
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Header image URL (see `sct upload`)
    #[arg(long)]
    pub img_url: Option<String>,

    /// Read the HTML body from a file
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    /// Use interactive wizard to fill in fields
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Slug, id prefix, or title fragment
    pub reference: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Slug, id prefix, or title fragment
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

#[derive(clap::Args, Debug)]
pub struct PreviewArgs {
    /// Slug, id prefix, or title fragment
    pub reference: String,

    /// Output file (defaults to <slug>.html)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub async fn run(cmd: PostCommands, global: &GlobalOpts) -> Result<()> {
    let (config, store) = super::open_store()?;

    match cmd {
        PostCommands::List(args) => run_list(&store, args, global).await,
        PostCommands::Show(args) => run_show(&store, args, global).await,
        PostCommands::New(args) => run_new(&store, args).await,
        PostCommands::Edit(args) => {
            let post = find_post(&store, &args.reference).await?;
            run_edit_generic(&store, &config, &post).await
        }
        PostCommands::Delete(args) => {
            let post = find_post(&store, &args.reference).await?;
            run_delete_generic(&store, &post, args.yes).await.map(|_| ())
        }
        PostCommands::Move(args) => {
            let direction: Direction = args.direction.parse().map_err(|e| miette::miette!("{e}"))?;
            run_move_generic::<Post>(&store, args.position, direction).await
        }
        PostCommands::Preview(args) => run_preview(&store, args).await,
    }
}

/// Find a post by exact slug first, then the shared id/title rules
async fn find_post(store: &RestStore, reference: &str) -> Result<Post> {
    let posts = store.fetch_all::<Post>().await.map_err(store_report)?;
    if let Some(post) = posts.iter().find(|p| p.slug == reference) {
        return Ok(post.clone());
    }
    resolve_record(&posts, reference).cloned()
}

async fn run_list(store: &RestStore, args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let mut posts = crate::core::ordering::fetch_sorted::<Post, _>(store)
        .await
        .map_err(store_report)?;
    if let Some(category) = &args.category {
        posts.retain(|post| post.tag.as_deref() == Some(category.as_str()));
    }
    emit_list_format(&posts, global)
}

async fn run_show(store: &RestStore, args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let post = find_post(store, &args.reference).await?;

    if !emit_record_format(&post, global)? {
        return Ok(());
    }

    println!("{}", style("─".repeat(60)).dim());
    if let Some(id) = &post.id {
        println!("{}: {}", style("ID").bold(), style(id).cyan());
    }
    println!("{}: {}", style("Title").bold(), style(&post.title).yellow());
    println!("{}: /insights/{}", style("Slug").bold(), post.slug);
    if let Some(tag) = &post.tag {
        println!("{}: {}", style("Category").bold(), tag);
    }
    if let Some(order) = post.order {
        println!("{}: {}", style("Order").bold(), order);
    }
    if let Some(img_url) = &post.img_url {
        println!("{}: {}", style("Image").bold(), img_url);
    }
    if let Some(created) = post.created_at {
        println!(
            "{}: {}",
            style("Created").bold(),
            created.format("%Y-%m-%d %H:%M")
        );
    }
    println!("{}", style("─".repeat(60)).dim());
    if let Some(summary) = &post.short_description {
        if !summary.is_empty() {
            println!();
            println!("{summary}");
        }
    }
    match &post.content {
        Some(content) if args.with_content => {
            println!();
            println!("{content}");
        }
        Some(content) => {
            println!();
            println!(
                "{}",
                style(format!(
                    "({} bytes of HTML content; use --with-content to print it)",
                    content.len()
                ))
                .dim()
            );
        }
        None => {}
    }
    Ok(())
}

async fn run_new(store: &RestStore, args: NewArgs) -> Result<()> {
    let theme = ColorfulTheme::default();

    let (title, summary, category) = if args.interactive {
        let title: String = Input::with_theme(&theme)
            .with_prompt("Title")
            .interact_text()
            .into_diagnostic()?;

        let summary: String = Input::with_theme(&theme)
            .with_prompt("Summary (optional)")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;

        // offer the existing categories rather than free text
        let categories = store.fetch_all::<Category>().await.map_err(store_report)?;
        let mut names: Vec<String> = categories.into_iter().map(|c| c.name).collect();
        names.sort_by_key(|name| name.to_lowercase());
        names.insert(0, "(none)".to_string());
        let selection = Select::with_theme(&theme)
            .with_prompt("Category")
            .items(&names)
            .default(0)
            .interact()
            .into_diagnostic()?;
        let category = if selection == 0 {
            None
        } else {
            Some(names[selection].clone())
        };

        (title, summary, category)
    } else {
        let title = args
            .title
            .ok_or_else(|| miette::miette!("--title is required (or use -i for the wizard)"))?;
        (title, args.summary.unwrap_or_default(), args.category)
    };

    let slug = slugify(&title);
    if slug.is_empty() {
        return Err(miette::miette!(
            "'{title}' produces an empty slug; use a title with letters or digits"
        ));
    }

    // a slug is a public URL; duplicates must be caught before insert
    if store
        .fetch_one::<Post>("slug", &slug)
        .await
        .map_err(store_report)?
        .is_some()
    {
        return Err(miette::miette!(
            "A post with slug '{slug}' already exists. Change the title."
        ));
    }

    let content = match args.content_file {
        Some(path) => Some(std::fs::read_to_string(path).into_diagnostic()?),
        None => None,
    };

    let mut post = Post::new(title);
    post.short_description = if summary.is_empty() { None } else { Some(summary) };
    post.tag = category;
    post.img_url = args.img_url;
    post.content = content;

    let created = store.insert(&post).await.map_err(store_report)?;

    println!(
        "{} Created post {}",
        style("✓").green(),
        style(&created.slug).cyan()
    );
    if let Some(id) = &created.id {
        println!("   {}", style(id).dim());
    }
    Ok(())
}

async fn run_preview(store: &RestStore, args: PreviewArgs) -> Result<()> {
    let post = find_post(store, &args.reference).await?;

    let sanitized = sanitize_html(post.content.as_deref().unwrap_or(""));
    if post.content.is_none() {
        println!("{} {} has no content yet.", style("!").yellow(), post.slug);
    }

    let renderer = PreviewRenderer::new().map_err(|e| miette::miette!("{e}"))?;
    let html = renderer
        .render_post(&post, &sanitized)
        .map_err(|e| miette::miette!("{e}"))?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.html", post.slug)));
    std::fs::write(&output, html).into_diagnostic()?;

    println!(
        "{} Wrote preview to {}",
        style("✓").green(),
        style(output.display()).cyan()
    );
    Ok(())
}
