//! Entry point for the `praxis-client` command-line tool.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use praxis_client::{ClientConfig, CpfService, HttpCpfService, LocalCpfService, ProviderProfile};
use tracing_subscriber::EnvFilter;

/// Validate CPFs against a CPF provider.
#[derive(Debug, Parser)]
#[command(name = "praxis-client", version, about)]
struct Cli {
    /// Provider root URL.
    #[arg(long, env = "PRAXIS_BASE_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    /// Provider dialect: cpf, numero, json or validar.
    #[arg(long, env = "PRAXIS_PROFILE", default_value = "cpf")]
    profile: ProviderProfile,

    /// Per-request timeout in milliseconds.
    #[arg(long, default_value_t = 5_000)]
    timeout_ms: u64,

    /// Validate in-process instead of calling the provider.
    #[arg(long)]
    offline: bool,

    /// CPFs to validate; separators such as `.` and `-` are allowed.
    #[arg(required = true)]
    cpfs: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let service: Box<dyn CpfService> = if cli.offline {
        Box::new(LocalCpfService::new(cli.profile))
    } else {
        match ClientConfig::new(&cli.base_url, cli.profile) {
            Ok(config) => Box::new(HttpCpfService::new(
                config.with_timeout(Duration::from_millis(cli.timeout_ms)),
            )),
            Err(e) => {
                tracing::error!(error = %e, "invalid configuration");
                return ExitCode::FAILURE;
            }
        }
    };

    let mut failed = false;
    for cpf in &cli.cpfs {
        match service.validate(cpf).await {
            Ok(report) => println!("{report}"),
            Err(e) => {
                tracing::error!(%cpf, error = %e, "validation request failed");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
