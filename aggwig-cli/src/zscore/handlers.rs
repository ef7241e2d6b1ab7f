use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;

use aggwig_core::signal::BigWigSource;
use aggwig_core::stream::write_json_document;
use aggwig_core::utils::round_to;
use aggwig_core::zscore::bed_zscore;

use crate::shared;

pub fn run_zscore(matches: &ArgMatches) -> Result<()> {
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
    let batch_size = *matches
        .get_one::<usize>("batch-size")
        .expect("batch size required");
    let json = matches.get_flag("json");

    let source = BigWigSource::new(signal);
    let records = bed_zscore(&source, bed, &config, batch_size)?;

    let mut out = BufWriter::new(
        File::create(output)
            .with_context(|| format!("Failed to create output file: {}", output))?,
    );

    if json {
        let scores: Vec<f64> = records.iter().map(|r| round_to(r.score, 3)).collect();
        write_json_document(out, &scores)?;
    } else {
        for record in &records {
            writeln!(out, "{}", record.as_line())?;
        }
        out.flush()?;
    }

    Ok(())
}
