use clap::{Arg, Command};

use crate::shared;

pub const SEQUENCE_CMD: &str = "sequence";

pub fn create_sequence_cli() -> Command {
    Command::new(SEQUENCE_CMD)
        .about("produce one-hot encoded sequence for the given regions")
        .arg(shared::bed_file_arg())
        .arg(
            Arg::new("sequence-file")
                .long("sequence-file")
                .required(true)
                .help("Path to a 2bit file with the genome sequence to read."),
        )
        .arg(shared::output_file_arg())
        .arg(shared::extsize_arg())
        .arg(shared::start_index_arg())
        .arg(shared::end_index_arg())
        .arg(shared::coordinate_map_arg())
        .arg(shared::streaming_arg())
        .arg(shared::batch_size_arg())
}
