//! Registry audit CLI.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use registry_audit::report::ReportWriter;
use registry_audit::{pipeline, Config, TokenUpdateConfig};

/// Audit registry API integrations and rotate GitHub tokens.
#[derive(Parser)]
#[command(name = "registry-audit")]
#[command(about = "Audit registry API integrations and rotate GitHub tokens")]
#[command(version)]
struct Cli {
    /// Registry base URL
    #[arg(
        long,
        env = "REGISTRY_BASE_URL",
        default_value = "https://api.swaggerhub.com"
    )]
    base_url: String,

    /// Organization that owns the definitions
    #[arg(long, env = "REGISTRY_OWNER")]
    owner: String,

    /// API key sent raw in the Authorization header
    #[arg(long, env = "REGISTRY_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Definition type to list (e.g. API or DOMAIN)
    #[arg(long, env = "REGISTRY_SPEC_TYPE", default_value = "API")]
    spec_type: String,

    /// Rewrite the token on every GitHub integration found
    #[arg(long)]
    update_tokens: bool,

    /// Replacement GitHub token (required with --update-tokens)
    #[arg(long, env = "GITHUB_NEW_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// GitHub account to stamp into rewritten integrations
    #[arg(long, env = "GITHUB_OWNER")]
    github_owner: Option<String>,

    /// Directory for report files
    #[arg(long, default_value = "registry_audit_results")]
    output_dir: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("registry_audit=debug,info")
    } else {
        EnvFilter::new("registry_audit=info,warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let token_update = if cli.update_tokens {
        match (cli.github_token, cli.github_owner) {
            (Some(new_token), Some(github_owner)) => Some(TokenUpdateConfig {
                new_token,
                github_owner,
            }),
            _ => bail!("--update-tokens requires --github-token and --github-owner"),
        }
    } else {
        None
    };

    let config = Config {
        base_url: cli.base_url,
        owner: cli.owner,
        api_key: cli.api_key,
        spec_type: cli.spec_type,
        timeout: Duration::from_secs(cli.timeout_secs),
        output_dir: cli.output_dir,
        token_update,
    };

    let report = pipeline::run(&config).await.context("audit run failed")?;

    let writer =
        ReportWriter::new(&config.output_dir).context("failed to create results directory")?;
    writer
        .write_all(&report)
        .context("failed to write report files")?;

    Ok(())
}
