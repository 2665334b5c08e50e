//! Top-level argument definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::card::CardCommands;
use crate::cli::commands::category::CategoryCommands;
use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::init::InitArgs;
use crate::cli::commands::logo::LogoCommands;
use crate::cli::commands::post::PostCommands;
use crate::cli::commands::service::ServiceCommands;
use crate::cli::commands::testimonial::TestimonialCommands;
use crate::cli::commands::upload::UploadArgs;

#[derive(Parser, Debug)]
#[command(name = "sct")]
#[command(version)]
#[command(about = "Studio Content Toolkit - manage marketing-site content from the terminal")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format for list and show commands
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// How list/show output is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table (default)
    #[default]
    Table,
    /// Raw YAML
    Yaml,
    /// Pretty-printed JSON
    Json,
    /// Backend ids only, one per line
    Id,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Id => write!(f, "id"),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a starter configuration file
    Init(InitArgs),

    /// Manage blog posts
    #[command(subcommand)]
    Post(PostCommands),

    /// Manage blog categories
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Manage service entries
    #[command(subcommand)]
    Service(ServiceCommands),

    /// Manage home page offer cards
    #[command(subcommand)]
    Card(CardCommands),

    /// Manage client logos
    #[command(subcommand)]
    Logo(LogoCommands),

    /// Manage testimonials
    #[command(subcommand)]
    Testimonial(TestimonialCommands),

    /// Upload an image to storage and print its public URL
    Upload(UploadArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
