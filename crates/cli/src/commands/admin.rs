//! Staff role management commands.
//!
//! # Usage
//!
//! ```bash
//! dw-cli admin grant -e staff@example.com -r manager
//! ```
//!
//! # Environment Variables
//!
//! - `DOCSTORE_BASE_URL` - Hosted document store project URL
//! - `DOCSTORE_API_KEY` - Document store server-side API key

use driftwood_core::types::{Email, Role};
use tracing::info;

use super::{CliError, docstore_from_env};

/// Grant a role to an existing user, looked up by email.
///
/// The user must already have signed up through the storefront; this only
/// flips the role on their `users` document.
///
/// # Errors
///
/// Returns an error if the role or email is invalid, the user does not
/// exist, or the store rejects the write.
pub async fn grant_role(email: &str, role: &str) -> Result<(), CliError> {
    let role: Role = role
        .parse()
        .map_err(|_| CliError::InvalidRole(role.to_owned()))?;
    let email = Email::parse(email).map_err(|e| CliError::InvalidEmail(e.to_string()))?;

    let store = docstore_from_env()?;

    let user = store.users().get_by_email(&email).await?;
    store.users().set_role(&user.id, role).await?;

    info!("Granted {role} to {email} (user {})", user.id);
    Ok(())
}
