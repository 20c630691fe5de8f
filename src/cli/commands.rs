//! CLI command implementations

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            host,
            port,
            cors_origins,
            empty,
        } => {
            let config = resolve_config(host, port, cors_origins, empty)?;
            serve(config)
        }
    }
}

/// Merge flags over the environment
///
/// `PORT` is only consulted (and only validated) when `--port` is absent.
pub fn resolve_config(
    host: Option<String>,
    port: Option<u16>,
    cors_origins: Vec<String>,
    empty: bool,
) -> CliResult<HttpServerConfig> {
    let mut config = match port {
        Some(port) => HttpServerConfig::with_port(port),
        None => HttpServerConfig::from_env()?,
    };

    if let Some(host) = host {
        config.host = host;
    }
    config.cors_origins = cors_origins;
    config.seed_catalog = !empty;

    Ok(config)
}

/// Start the HTTP server and block until it shuts down
pub fn serve(config: HttpServerConfig) -> CliResult<()> {
    observability::init_logging();

    tracing::info!(
        version = crate::VERSION,
        addr = %config.socket_addr(),
        seed_catalog = config.seed_catalog,
        "starting bookshelf"
    );

    let server = HttpServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::server_error(format!("HTTP server failed: {}", e)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let config = resolve_config(
            Some("127.0.0.1".to_string()),
            Some(8081),
            vec!["http://localhost:5173".to_string()],
            true,
        )
        .unwrap();

        assert_eq!(config.socket_addr(), "127.0.0.1:8081");
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert!(!config.seed_catalog);
    }
}
