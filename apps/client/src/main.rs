mod api;
mod config;
mod errors;
mod listing;
mod models;
mod notice;
mod pages;
mod password;
mod shell;
mod state;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::HttpApi;
use crate::config::Config;
use crate::pages::Page;
use crate::state::ClientState;

#[derive(Parser, Debug)]
#[command(
    name = "job-sphere",
    about = "Search jobs and manage your Job Sphere account from the terminal",
    version
)]
struct Cli {
    /// Override JOB_SPHERE_URL, e.g. http://localhost:8000
    #[arg(long)]
    url: Option<String>,
    /// Override JOB_SPHERE_BASE_PATH, e.g. /job-sphere
    #[arg(long)]
    base_path: Option<String>,
    /// Page to open first. Protected pages fall back to login without a session.
    #[arg(value_enum, default_value_t = Page::Dashboard)]
    page: Page,
}

/// Directive used when RUST_LOG is unset. Targets are module paths, which
/// start with the binary's crate name rather than the package name.
fn default_log_directive(level: &str) -> String {
    format!("{}={level}", env!("CARGO_CRATE_NAME"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(cli.url, cli.base_path);

    // Logs go to stderr so they never interleave with the rendered page.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_directive(&config.rust_log))),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Job Sphere client v{}", env!("CARGO_PKG_VERSION"));
    info!("Server: {}{}", config.base_url, config.base_path);

    let api = HttpApi::new(&config).context("Failed to build HTTP client")?;
    let state = ClientState::new(Arc::new(api), config);

    shell::run(state, cli.page).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_covers_own_targets() {
        let directive = default_log_directive("debug");
        let (target, level) = directive.split_once('=').unwrap();
        assert_eq!(level, "debug");
        assert!(module_path!().starts_with(target));
        assert_eq!(target, "job_sphere");
    }
}
