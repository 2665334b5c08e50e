//! `sct upload` command - push an image to storage

use std::path::PathBuf;

use chrono::Utc;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::open_store;
use crate::store::storage::{
    self, content_type_for, extension_of, logo_key, photo_key, StorageClient,
};

#[derive(clap::Args, Debug)]
pub struct UploadArgs {
    /// Image file to upload
    pub file: PathBuf,

    /// Target bucket; defaults to the photo bucket from config
    #[arg(long, short = 'b')]
    pub bucket: Option<String>,
}

pub async fn run(args: UploadArgs) -> Result<()> {
    let (config, _) = open_store()?;
    let backend = config
        .require_backend()
        .map_err(|e| miette::miette!("{e}"))?;

    let name = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| miette::miette!("{} is not a file", args.file.display()))?;
    let ext = extension_of(name)
        .ok_or_else(|| miette::miette!("'{name}' has no file extension"))?;

    let bytes = std::fs::read(&args.file).into_diagnostic()?;
    let bucket = args
        .bucket
        .unwrap_or_else(|| config.storage.photo_bucket.clone());

    // logo bucket enforces the stricter logo rules
    let key = if bucket == config.storage.logo_bucket {
        storage::validate_logo(bytes.len() as u64, &ext).map_err(|e| miette::miette!("{e}"))?;
        logo_key(&ext)
    } else {
        storage::validate_photo(bytes.len() as u64, &ext).map_err(|e| miette::miette!("{e}"))?;
        photo_key(Utc::now(), &ext)
    };

    let content_type = content_type_for(&ext)
        .ok_or_else(|| miette::miette!("unsupported file type '.{ext}'"))?;

    let client = StorageClient::new(&backend);
    let url = client
        .upload(&bucket, &key, bytes, content_type)
        .await
        .map_err(|e| miette::miette!("{e}"))?;

    eprintln!(
        "{} Uploaded to {}",
        style("✓").green(),
        style(&bucket).cyan()
    );
    println!("{url}");
    Ok(())
}
