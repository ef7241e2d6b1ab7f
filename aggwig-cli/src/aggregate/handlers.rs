use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::ArgMatches;

use aggwig_core::aggregate::{bed_aggregate, grouped_bed_aggregate};
use aggwig_core::signal::BigWigSource;
use aggwig_core::stream::write_json_document;

use crate::shared;

pub fn run_aggregate(matches: &ArgMatches) -> Result<()> {
    let bed = matches
        .get_one::<String>("bed-file")
        .expect("bed file is required");
    let signal = matches
        .get_one::<String>("signal-file")
        .expect("signal file is required");
    let output = matches
        .get_one::<String>("output-file")
        .expect("output file is required");

    let config = shared::aggregate_config(matches);
    let (start_index, end_index) = shared::index_slice(matches);
    let grouped = matches.get_flag("grouped");
    let no_extension = matches.get_flag("no-extension");

    let source = BigWigSource::new(signal);
    let out = BufWriter::new(
        File::create(output)
            .with_context(|| format!("Failed to create output file: {}", output))?,
    );

    if grouped {
        let groups = grouped_bed_aggregate(&source, bed, &config, no_extension)?;
        write_json_document(out, &groups)?;
    } else {
        let (values, _) = bed_aggregate(&source, bed, &config, start_index, end_index, no_extension)?;
        write_json_document(out, &values)?;
    }

    Ok(())
}
