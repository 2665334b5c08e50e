//! Command implementations

pub mod card;
pub mod category;
pub mod completions;
pub mod init;
pub mod logo;
pub mod post;
pub mod service;
pub mod testimonial;
pub mod upload;

use miette::Result;

use crate::core::config::Config;
use crate::store::RestStore;

/// Load configuration and connect to the backend, or explain what is
/// missing. Every command that talks to the backend starts here.
pub(crate) fn open_store() -> Result<(Config, RestStore)> {
    let config = Config::load();
    let backend = config
        .require_backend()
        .map_err(|e| miette::miette!("{e}"))?;
    let store = RestStore::new(&backend);
    Ok((config, store))
}
