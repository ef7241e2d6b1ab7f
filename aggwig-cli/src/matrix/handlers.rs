use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::ArgMatches;

use aggwig_core::aggregate::{aggregate, read_regions};
use aggwig_core::batch::{BatchedRegionFile, slice_batch};
use aggwig_core::models::Region;
use aggwig_core::signal::BigWigSource;
use aggwig_core::stream::{StreamingJsonWriter, write_json_document};

use crate::shared;

pub fn run_matrix(matches: &ArgMatches) -> Result<()> {
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
    let coordinate_map = matches.get_flag("coordinate-map");
    let streaming = matches.get_flag("streaming");
    let batch_size = *matches
        .get_one::<usize>("batch-size")
        .expect("batch size required");
    let no_extension = matches.get_flag("no-extension");

    let source = BigWigSource::new(signal);
    let out = BufWriter::new(
        File::create(output)
            .with_context(|| format!("Failed to create output file: {}", output))?,
    );

    if streaming {
        let mut writer = if coordinate_map {
            StreamingJsonWriter::object(out)?
        } else {
            StreamingJsonWriter::array(out)?
        };

        let mut seen = 0usize;
        for batch in BatchedRegionFile::open(bed, batch_size)? {
            let regions: Vec<Region> = batch?
                .iter()
                .map(|line| Region::parse_line(line))
                .collect::<aggwig_core::Result<_>>()?;

            let range = slice_batch(seen, regions.len(), start_index, end_index);
            seen += regions.len();
            let slice = &regions[range];
            if slice.is_empty() {
                continue;
            }

            let (_, matrix) = aggregate(&source, slice, &config, no_extension)?;
            if coordinate_map {
                writer.write_batch(&coordinate_entries(slice, matrix))?;
            } else {
                writer.write_batch(&matrix)?;
            }
        }
        writer.finish()?;
    } else {
        let regions = read_regions(bed)?;
        let end = end_index.unwrap_or(regions.len()).min(regions.len());
        let start = start_index.min(end);
        let slice = &regions[start..end];

        let (_, matrix) = aggregate(&source, slice, &config, no_extension)?;
        if coordinate_map {
            write_json_document(out, &coordinate_entries(slice, matrix))?;
        } else {
            write_json_document(out, &matrix)?;
        }
    }

    Ok(())
}

fn coordinate_entries(
    regions: &[Region],
    matrix: Vec<Vec<f64>>,
) -> serde_json::Map<String, serde_json::Value> {
    regions
        .iter()
        .zip(matrix)
        .map(|(region, row)| (region.coordinate_string(), serde_json::json!(row)))
        .collect()
}
