use clap::{Arg, Command};

use crate::shared;

pub const MATRIX_CMD: &str = "matrix";

pub fn create_matrix_cli() -> Command {
    Command::new(MATRIX_CMD)
        .about("produce a signal matrix for the given regions")
        .arg(shared::bed_file_arg())
        .arg(
            Arg::new("signal-file")
                .long("signal-file")
                .required(true)
                .help("Path to a bigWig file with the signal to read."),
        )
        .arg(shared::output_file_arg())
        .arg(shared::extsize_arg())
        .arg(shared::start_index_arg())
        .arg(shared::end_index_arg())
        .arg(shared::threads_arg())
        .arg(shared::resolution_arg())
        .arg(shared::decimal_resolution_arg())
        .arg(shared::coordinate_map_arg())
        .arg(shared::streaming_arg())
        .arg(shared::batch_size_arg())
        .arg(shared::no_extension_arg())
}
