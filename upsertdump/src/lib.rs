//! Command-line surface for upsertdump.
//!
//! The binary logic lives in `main.rs`; the argument definitions are kept
//! here so they can be parsed in tests.

use clap::Parser;
use std::time::Duration;
use upsertdump_core::adapters::{DEFAULT_HOST, DEFAULT_PORT};
use upsertdump_core::{ConnectionConfig, Credentials, UpsertDumpError};

/// Process exit code when the connection cannot be established.
pub const EXIT_CONNECTION_FAILED: u8 = 1;

/// Process exit code when the dump aborts after connecting.
pub const EXIT_DUMP_FAILED: u8 = 2;

/// Maps an error to the process exit code.
///
/// Failures before a connection exists (including invalid settings) exit
/// with [`EXIT_CONNECTION_FAILED`]; everything after exits with
/// [`EXIT_DUMP_FAILED`].
pub fn exit_code_for(error: &UpsertDumpError) -> u8 {
    if error.is_connection_error() {
        EXIT_CONNECTION_FAILED
    } else {
        EXIT_DUMP_FAILED
    }
}

/// CLI argument structure
#[derive(Parser)]
#[command(name = "upsertdump")]
#[command(about = "Dump PostgreSQL tables as INSERT ... ON CONFLICT DO UPDATE statements")]
#[command(version)]
#[command(long_about = "
upsertdump - Dump table data as idempotent upsert statements

Connects to a PostgreSQL database and writes one
INSERT ... ON CONFLICT (<primary key>) DO UPDATE SET ... statement per row
to standard output. Replaying the script inserts missing rows and
overwrites existing ones.

SECURITY FEATURES:
- Read-only session
- Password never logged

EXAMPLES:
  upsertdump -d inventory > inventory.sql
  upsertdump -d inventory -H db.internal -U exporter -t accounts orders
")]
pub struct Cli {
    /// Database name
    #[arg(short, long, help = "Name of the database to dump")]
    pub database: String,

    /// Host address or socket directory
    #[arg(
        short = 'H',
        long,
        default_value = DEFAULT_HOST,
        help = "Database host or Unix socket directory"
    )]
    pub host: String,

    /// Port number
    #[arg(short, long, default_value_t = DEFAULT_PORT, help = "Database port")]
    pub port: u16,

    /// Connection user
    #[arg(
        short = 'U',
        long,
        help = "Database user (defaults to the current OS user)"
    )]
    pub username: Option<String>,

    /// Connection password
    #[arg(
        short = 'W',
        long,
        default_value = "",
        hide_default_value = true,
        help = "Database password (never logged)"
    )]
    pub password: String,

    /// Tables to dump
    #[arg(
        short,
        long,
        num_args = 1..,
        help = "Only dump the named tables (names not found are ignored)"
    )]
    pub tables: Vec<String>,

    /// Schema to dump
    #[arg(short = 'n', long, default_value = "public", help = "Schema to dump")]
    pub schema: String,

    /// Connect timeout in seconds
    #[arg(
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Seconds to wait for the connection"
    )]
    pub connect_timeout: u64,

    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all diagnostics except errors")]
    pub quiet: bool,
}

impl Cli {
    /// Builds the connection configuration from the arguments.
    pub fn connection_config(&self) -> ConnectionConfig {
        let mut config = ConnectionConfig::new(self.database.clone())
            .with_host(self.host.clone())
            .with_port(self.port)
            .with_connect_timeout(Duration::from_secs(self.connect_timeout));

        if let Some(username) = &self.username {
            config = config.with_username(username.clone());
        }

        config
    }

    /// Moves the password out of the arguments into zeroizing storage.
    pub fn take_credentials(&mut self) -> Credentials {
        Credentials::new(Some(std::mem::take(&mut self.password)))
    }
}
