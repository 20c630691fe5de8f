//! CLI argument definitions using clap
//!
//! Commands:
//! - bookshelf serve [--host <host>] [--port <port>] [--cors-origin <origin>]... [--empty]

use clap::{Parser, Subcommand};

/// Bookshelf - an in-memory books catalog behind a JSON REST API
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the books REST API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the PORT environment variable)
        #[arg(short, long)]
        port: Option<u16>,

        /// Allowed CORS origin; repeat for several. Any origin when omitted
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,

        /// Start with an empty catalog instead of the demo books
        #[arg(long)]
        empty: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["bookshelf", "serve"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Serve {
                host: None,
                port: None,
                cors_origins: vec![],
                empty: false,
            }
        );
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "bookshelf",
            "serve",
            "--port",
            "8080",
            "--cors-origin",
            "http://a.test",
            "--cors-origin",
            "http://b.test",
            "--empty",
        ])
        .unwrap();

        match cli.command {
            Command::Serve {
                port,
                cors_origins,
                empty,
                ..
            } => {
                assert_eq!(port, Some(8080));
                assert_eq!(cors_origins.len(), 2);
                assert!(empty);
            }
        }
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["bookshelf", "serve", "--port", "http"]).is_err());
    }
}
