//! CLI argument parsing and the composition run

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use monako::compose;
use monako::config::load_config;
use monako::hugo::{self, HugoGenerator, SiteGenerator};

/// Monako - compose documentation from multiple Git repositories into a
/// single Hugo site
#[derive(Parser, Debug)]
#[command(name = "monako")]
#[command(version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Composition configuration file
    #[arg(long, value_name = "PATH", default_value = "config.monako.yaml")]
    config: PathBuf,

    /// Menu file for the book theme
    #[arg(long, value_name = "PATH", default_value = "config.menu.md")]
    menu_config: PathBuf,

    /// Working directory for the composed site
    #[arg(long, value_name = "PATH", default_value = ".")]
    working_dir: PathBuf,

    /// Override the configured base URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Exit non-zero when site rendering fails
    #[arg(long)]
    fail_on_error: bool,

    /// Only compose the content tree, skip rendering
    #[arg(long, conflicts_with = "only_render")]
    only_compose: bool,

    /// Only render an existing content tree, skip composing
    #[arg(long)]
    only_render: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Run one composition: prepare the site directory, compose all
    /// origins, render.
    pub fn execute(self) -> Result<()> {
        self.init_logging();
        let start = Instant::now();

        if !self.config.exists() {
            anyhow::bail!("Configuration file not found: {}", self.config.display());
        }
        let mut config = load_config(&self.config, &self.working_dir)?;
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }

        if !self.only_render {
            println!("🍱 Composing {} origins", config.origins.len());
            hugo::prepare_site_dir(&config, &self.menu_config)?;
            compose::compose_all(&config)?;
            println!(
                "✅ Composed into '{}' in {:.2}s",
                config.content_dir.display(),
                start.elapsed().as_secs_f64()
            );
        }

        if !self.only_compose {
            if !config.site_dir.exists() {
                anyhow::bail!(
                    "Site directory '{}' does not exist, compose it first (run without --only-render)",
                    config.site_dir.display()
                );
            }
            let generator = HugoGenerator::default();
            match generator.render(&config.site_dir) {
                Ok(()) => println!(
                    "✅ Rendered site in {:.2}s total",
                    start.elapsed().as_secs_f64()
                ),
                Err(e) if self.fail_on_error => return Err(e.into()),
                Err(e) => log::error!("Site rendering failed: {}", e),
            }
        }

        Ok(())
    }

    /// Initialize logging from `--log-level`; `RUST_LOG` still wins.
    fn init_logging(&self) {
        let env = env_logger::Env::default().default_filter_or(&self.log_level);
        let _ = env_logger::Builder::from_env(env).try_init();
    }
}

/// One-line version with the build's target, shown by `--version`.
fn version_string() -> String {
    format!(
        "{} {}/{}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
