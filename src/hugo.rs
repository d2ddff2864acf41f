//! Hugo site scaffolding and rendering
//!
//! Prepares the site directory for a composition run: removes the previous
//! run's output, recreates the content root, writes the generated Hugo
//! configuration and places the menu bundle. Rendering itself is behind
//! the [`SiteGenerator`] trait so tests can substitute the hugo binary.

use std::path::Path;
use std::process::Command;

use log::{debug, info};
use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};

/// Directory below the content root holding the menu bundle.
pub const MENU_DIRECTORY: &str = "monako_menu_directory";

/// Theme referenced by the generated site configuration.
const THEME: &str = "monako-book-master";

/// Generated Hugo configuration, serialized to `config.toml`.
///
/// Field names follow Hugo's configuration schema, hence the renames.
#[derive(Serialize)]
struct SiteConfig<'a> {
    #[serde(rename = "baseURL")]
    base_url: &'a str,
    title: &'a str,
    theme: &'a str,
    /// Render timeout in milliseconds, generous for large compositions
    timeout: u32,
    #[serde(rename = "disablePathToLower")]
    disable_path_to_lower: bool,
    #[serde(rename = "enableGitInfo")]
    enable_git_info: bool,
    markup: Markup,
    params: Params<'a>,
}

#[derive(Serialize)]
struct Markup {
    goldmark: Goldmark,
    #[serde(rename = "tableOfContents")]
    table_of_contents: TableOfContents,
}

#[derive(Serialize)]
struct Goldmark {
    renderer: Renderer,
}

#[derive(Serialize)]
struct Renderer {
    /// Raw HTML in markup files is passed through as-is
    #[serde(rename = "unsafe")]
    unsafe_html: bool,
}

#[derive(Serialize)]
struct TableOfContents {
    #[serde(rename = "startLevel")]
    start_level: u32,
}

/// Book theme parameters, including the provenance link switch read by the
/// theme's page footer.
#[derive(Serialize)]
struct Params<'a> {
    #[serde(rename = "BookToC")]
    book_toc: bool,
    #[serde(rename = "BookLogo")]
    book_logo: &'a str,
    #[serde(rename = "BookMenuBundle")]
    book_menu_bundle: String,
    #[serde(rename = "BookSection")]
    book_section: &'a str,
    #[serde(rename = "BookDateFormat")]
    book_date_format: &'a str,
    #[serde(rename = "BookSearch")]
    book_search: bool,
    #[serde(rename = "BookComments")]
    book_comments: bool,
    #[serde(rename = "MonakoGitLinks")]
    monako_git_links: bool,
}

impl<'a> SiteConfig<'a> {
    fn from_config(config: &'a Config) -> Self {
        Self {
            base_url: &config.base_url,
            title: &config.title,
            theme: THEME,
            timeout: 60_000,
            disable_path_to_lower: true,
            enable_git_info: false,
            markup: Markup {
                goldmark: Goldmark {
                    renderer: Renderer { unsafe_html: true },
                },
                table_of_contents: TableOfContents { start_level: 1 },
            },
            params: Params {
                book_toc: true,
                book_logo: &config.logo,
                book_menu_bundle: format!("/{}", MENU_DIRECTORY),
                book_section: "docs",
                book_date_format: "Jan 2, 2006",
                book_search: true,
                book_comments: true,
                monako_git_links: true,
            },
        }
    }
}

/// Prepare a fresh site directory for one composition run.
///
/// Removes the site directory from the previous run, recreates it with
/// the content root inside, writes the generated Hugo configuration, and
/// copies the menu file into the menu bundle.
pub fn prepare_site_dir(config: &Config, menu_path: &Path) -> Result<()> {
    if config.site_dir.exists() {
        std::fs::remove_dir_all(&config.site_dir).map_err(|e| Error::Filesystem {
            message: format!("can't clean up '{}': {}", config.site_dir.display(), e),
        })?;
        info!("Cleaned up '{}'", config.site_dir.display());
    }

    std::fs::create_dir_all(&config.content_dir).map_err(|e| Error::Filesystem {
        message: format!("can't create '{}': {}", config.content_dir.display(), e),
    })?;

    write_site_config(config)?;
    copy_menu_bundle(config, menu_path)
}

/// Write the generated `config.toml` into the site directory.
fn write_site_config(config: &Config) -> Result<()> {
    let rendered =
        toml::to_string(&SiteConfig::from_config(config)).map_err(|e| Error::Filesystem {
            message: format!("can't serialize site configuration: {}", e),
        })?;
    let content = format!("# Autogenerated, do not edit\n\n{}", rendered);

    let path = config.site_dir.join("config.toml");
    debug!("Writing site configuration to '{}'", path.display());
    std::fs::write(&path, content).map_err(|e| Error::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Copy the menu file into the menu bundle the book theme reads.
fn copy_menu_bundle(config: &Config, menu_path: &Path) -> Result<()> {
    let menu = std::fs::read(menu_path).map_err(|e| Error::ConfigParse {
        message: format!("can't read menu file '{}': {}", menu_path.display(), e),
        hint: Some("Pass the menu file with --menu-config".to_string()),
    })?;

    let dir = config.content_dir.join(MENU_DIRECTORY);
    std::fs::create_dir_all(&dir).map_err(|e| Error::Filesystem {
        message: format!("can't create menu directory '{}': {}", dir.display(), e),
    })?;

    let dst = dir.join("index.md");
    debug!("Copying menu '{}' to '{}'", menu_path.display(), dst.display());
    std::fs::write(&dst, menu).map_err(|e| Error::Write {
        path: dst.display().to_string(),
        message: e.to_string(),
    })
}

/// Renders a prepared site directory into a browsable site.
pub trait SiteGenerator {
    /// Render the site in `site_dir`, writing output below it.
    fn render(&self, site_dir: &Path) -> Result<()>;
}

/// Default generator, shelling out to the hugo binary.
pub struct HugoGenerator {
    binary: String,
}

impl HugoGenerator {
    pub fn new(binary: &str) -> Self {
        Self {
            binary: binary.to_string(),
        }
    }
}

impl Default for HugoGenerator {
    fn default() -> Self {
        Self::new("hugo")
    }
}

impl SiteGenerator for HugoGenerator {
    fn render(&self, site_dir: &Path) -> Result<()> {
        info!("Rendering site in '{}'", site_dir.display());

        let output = Command::new(&self.binary)
            .arg("--source")
            .arg(site_dir)
            .arg("--destination")
            .arg("public")
            .output()
            .map_err(|e| Error::Render {
                message: format!("can't run '{}': {}", self.binary, e),
            })?;

        if !output.status.success() {
            return Err(Error::Render {
                message: format!(
                    "'{}' exited with {}: {}",
                    self.binary,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        info!("Rendered site to '{}'", site_dir.join("public").display());
        Ok(())
    }
}
