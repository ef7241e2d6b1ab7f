use clap::{Arg, ArgAction, Command};

use crate::shared;

pub const ZSCORE_CMD: &str = "zscore";

pub fn create_zscore_cli() -> Command {
    Command::new(ZSCORE_CMD)
        .about("compute log-normalized z-scores of per-region signal sums")
        .arg(shared::bed_file_arg())
        .arg(
            Arg::new("signal-file")
                .long("signal-file")
                .required(true)
                .help("Path to a bigWig file with the signal to sum."),
        )
        .arg(shared::output_file_arg())
        .arg(shared::extsize_arg())
        .arg(shared::threads_arg())
        .arg(shared::resolution_arg())
        .arg(shared::decimal_resolution_arg())
        .arg(shared::batch_size_arg())
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Write a JSON array of scores instead of tab-delimited lines."),
        )
}
