//! Arguments and extraction helpers shared by the subcommands.

use aggwig_core::aggregate::AggregateConfig;
use clap::{Arg, ArgAction, ArgMatches, value_parser};

pub fn bed_file_arg() -> Arg {
    Arg::new("bed-file")
        .long("bed-file")
        .required(true)
        .help("Path to the BED file with the regions to process.")
}

pub fn output_file_arg() -> Arg {
    Arg::new("output-file")
        .long("output-file")
        .required(true)
        .help("Path to write the output.")
}

pub fn extsize_arg() -> Arg {
    Arg::new("extsize")
        .long("extsize")
        .value_parser(value_parser!(u32))
        .default_value("500")
        .help("Number of basepairs to expand each region around its center; default 500.")
}

pub fn start_index_arg() -> Arg {
    Arg::new("start-index")
        .long("start-index")
        .value_parser(value_parser!(usize))
        .default_value("0")
        .help("Index of the first region to process (inclusive); default 0.")
}

pub fn end_index_arg() -> Arg {
    Arg::new("end-index")
        .long("end-index")
        .value_parser(value_parser!(usize))
        .help("Index of the last region to process (not inclusive); defaults to the end of the list.")
}

pub fn threads_arg() -> Arg {
    Arg::new("threads")
        .short('j')
        .long("threads")
        .value_parser(value_parser!(usize))
        .default_value("8")
        .help("Number of cores to use in parallel; default 8.")
}

pub fn resolution_arg() -> Arg {
    Arg::new("resolution")
        .long("resolution")
        .value_parser(value_parser!(usize))
        .default_value("1")
        .help("Bin width, in basepairs, for condensing output values; default 1.")
}

pub fn decimal_resolution_arg() -> Arg {
    Arg::new("decimal-resolution")
        .long("decimal-resolution")
        .value_parser(value_parser!(u32))
        .default_value("3")
        .help("Number of decimal places to keep in output values; default 3.")
}

pub fn batch_size_arg() -> Arg {
    Arg::new("batch-size")
        .long("batch-size")
        .value_parser(value_parser!(usize))
        .default_value("1000")
        .help("Number of regions to process per batch; default 1000.")
}

pub fn streaming_arg() -> Arg {
    Arg::new("streaming")
        .long("streaming")
        .action(ArgAction::SetTrue)
        .help("Write output incrementally, one batch at a time, in bounded memory.")
}

pub fn coordinate_map_arg() -> Arg {
    Arg::new("coordinate-map")
        .long("coordinate-map")
        .action(ArgAction::SetTrue)
        .help("Key output by \"chrom:start-end\" coordinate strings instead of array position.")
}

pub fn no_extension_arg() -> Arg {
    Arg::new("no-extension")
        .long("no-extension")
        .action(ArgAction::SetTrue)
        .help("Read each region's own interval instead of a window around its center.")
}

pub fn aggregate_config(matches: &ArgMatches) -> AggregateConfig {
    AggregateConfig {
        extsize: *matches.get_one::<u32>("extsize").expect("extsize required"),
        num_threads: *matches
            .get_one::<usize>("threads")
            .expect("threads required"),
        resolution: *matches
            .get_one::<usize>("resolution")
            .expect("resolution required"),
        decimal_resolution: *matches
            .get_one::<u32>("decimal-resolution")
            .expect("decimal resolution required"),
    }
}

pub fn index_slice(matches: &ArgMatches) -> (usize, Option<usize>) {
    let start = *matches
        .get_one::<usize>("start-index")
        .expect("start index required");
    let end = matches.get_one::<usize>("end-index").copied();
    (start, end)
}
