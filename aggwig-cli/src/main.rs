mod aggregate;
mod matrix;
mod sequence;
mod shared;
mod zscore;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "aggwig";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Aggregates signal and one-hot sequence for a number of regions from a BED file.")
        .subcommand_required(true)
        .subcommand(aggregate::cli::create_aggregate_cli())
        .subcommand(matrix::cli::create_matrix_cli())
        .subcommand(sequence::cli::create_sequence_cli())
        .subcommand(zscore::cli::create_zscore_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // AGGREGATE
        //
        Some((aggregate::cli::AGGREGATE_CMD, matches)) => {
            aggregate::handlers::run_aggregate(matches)?;
        }

        //
        // MATRIX
        //
        Some((matrix::cli::MATRIX_CMD, matches)) => {
            matrix::handlers::run_matrix(matches)?;
        }

        //
        // SEQUENCE
        //
        Some((sequence::cli::SEQUENCE_CMD, matches)) => {
            sequence::handlers::run_sequence(matches)?;
        }

        //
        // ZSCORE
        //
        Some((zscore::cli::ZSCORE_CMD, matches)) => {
            zscore::handlers::run_zscore(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
