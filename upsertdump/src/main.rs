//! upsertdump binary entry point.
//!
//! Statements go to stdout; everything else goes to stderr through
//! `tracing`.

use clap::Parser;
use std::io::{BufWriter, Write};
use std::process::ExitCode;
use tracing::{error, info, warn};
use upsertdump::{Cli, EXIT_DUMP_FAILED, exit_code_for};
use upsertdump_core::{PostgresAdapter, dump, init_logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let mut cli = Cli::parse();

    // Logging setup fails with a configuration error, before any connection
    if let Err(e) = init_logging(cli.verbose, cli.quiet) {
        eprintln!("Error: {}", e.report());
        return ExitCode::from(exit_code_for(&e));
    }

    let config = cli.connection_config();
    let credentials = cli.take_credentials();
    let schema = cli.schema.clone();

    info!("Connecting to {}", config);

    let mut adapter = match PostgresAdapter::connect(config, &credentials, Some(schema)).await {
        Ok(adapter) => adapter,
        Err(e) => {
            error!("{}", e.report());
            return ExitCode::from(exit_code_for(&e));
        }
    };
    drop(credentials);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let result = dump(&mut adapter, &cli.tables, &mut out).await;

    // Flush whatever was written before an abort
    let flushed = out.flush();

    match result {
        Ok(summary) => {
            if let Err(e) = flushed {
                error!("Failed to flush statements: {}", e);
                return ExitCode::from(EXIT_DUMP_FAILED);
            }

            info!(
                "✓ Dumped {} statements from {} tables ({} empty, {} without primary key)",
                summary.statements,
                summary.tables,
                summary.empty_tables,
                summary.tables_without_primary_key
            );

            if let Err(e) = adapter.close().await {
                // All output is already written; a failed close is not fatal
                warn!("{}", e.report());
            }

            ExitCode::SUCCESS
        }
        // A failed table ends the run with a non-zero status rather than 0
        Err(e) => {
            error!("Dump aborted: {}", e.report());
            ExitCode::from(exit_code_for(&e))
        }
    }
}
