use clap::{Arg, Command};

use crate::shared;

pub const AGGREGATE_CMD: &str = "aggregate";

pub fn create_aggregate_cli() -> Command {
    Command::new(AGGREGATE_CMD)
        .about("aggregate signal across regions")
        .arg(shared::bed_file_arg())
        .arg(
            Arg::new("signal-file")
                .long("signal-file")
                .required(true)
                .help("Path to a bigWig file with the signal to aggregate."),
        )
        .arg(shared::output_file_arg())
        .arg(shared::extsize_arg())
        .arg(shared::start_index_arg())
        .arg(shared::end_index_arg())
        .arg(shared::threads_arg())
        .arg(shared::resolution_arg())
        .arg(shared::decimal_resolution_arg())
        .arg(
            Arg::new("grouped")
                .long("grouped")
                .action(clap::ArgAction::SetTrue)
                .help("Aggregate each name group of the BED file independently."),
        )
        .arg(shared::no_extension_arg())
}
