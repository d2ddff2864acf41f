//! Composition pipeline
//!
//! Pulls every configured origin repository and composes its selected
//! files into the content tree. The pipeline for one origin is: clone,
//! enumerate and match files, resolve commit metadata, rewrite links,
//! expand front matter, write. Origins are independent of each other; a
//! clone failure or a failing file aborts the run.

pub mod file;
pub mod frontmatter;
pub mod links;
pub mod origin;

use log::info;

use crate::config::Config;
use crate::error::Result;
use crate::git::{clone_origin, credentials_from_env};

/// Compose all configured origins into the content tree.
///
/// Origins are processed strictly one after another, and each clone is
/// released before the next origin is cloned, so at most one checkout
/// exists at any time.
pub fn compose_all(config: &Config) -> Result<()> {
    info!(
        "Composing {} origins into '{}'",
        config.origins.len(),
        config.content_dir.display()
    );

    for origin in &config.origins {
        let credentials = credentials_from_env(&origin.env_username, &origin.env_password);
        let clone = clone_origin(
            &origin.url,
            &origin.branch,
            credentials.as_ref().map(|(user, pass)| (user.as_str(), pass.as_str())),
            config.disable_commit_info,
        )?;
        origin.compose(&clone, config)?;
        // The clone handle goes out of scope here, removing the checkout
        // before the next origin is cloned.
    }

    Ok(())
}
