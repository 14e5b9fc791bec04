//! CLI command implementations.

pub mod admin;
pub mod seed;

use driftwood_backend::{DocStore, DocStoreConfig};
use secrecy::SecretString;
use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Document store operation failed.
    #[error("Document store error: {0}")]
    DocStore(#[from] driftwood_backend::DocStoreError),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: customer, manager, admin")]
    InvalidRole(String),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),
}

/// Build a document store client from the environment.
pub fn docstore_from_env() -> Result<DocStore, CliError> {
    dotenvy::dotenv().ok();

    let base_url =
        std::env::var("DOCSTORE_BASE_URL").map_err(|_| CliError::MissingEnvVar("DOCSTORE_BASE_URL"))?;
    let api_key = std::env::var("DOCSTORE_API_KEY")
        .map(SecretString::from)
        .map_err(|_| CliError::MissingEnvVar("DOCSTORE_API_KEY"))?;

    Ok(DocStore::new(&DocStoreConfig { base_url, api_key })?)
}
