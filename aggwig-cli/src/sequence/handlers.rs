use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::ArgMatches;

use aggwig_core::aggregate::read_regions;
use aggwig_core::batch::{BatchedRegionFile, slice_batch};
use aggwig_core::models::Region;
use aggwig_core::sequence::{SequenceHandle, SequenceSource, TwoBitSource, read_onehot};
use aggwig_core::stream::{StreamingJsonWriter, write_json_document};

use crate::shared;

pub fn run_sequence(matches: &ArgMatches) -> Result<()> {
    let bed = matches
        .get_one::<String>("bed-file")
        .expect("bed file is required");
    let sequence_file = matches
        .get_one::<String>("sequence-file")
        .expect("sequence file is required");
    let output = matches
        .get_one::<String>("output-file")
        .expect("output file is required");

    let extsize = *matches.get_one::<u32>("extsize").expect("extsize required") as i64;
    let (start_index, end_index) = shared::index_slice(matches);
    let coordinate_map = matches.get_flag("coordinate-map");
    let streaming = matches.get_flag("streaming");
    let batch_size = *matches
        .get_one::<usize>("batch-size")
        .expect("batch size required");

    let mut handle = TwoBitSource::new(sequence_file).open()?;
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

            let rows = encode_regions(&mut handle, slice, extsize)?;
            if coordinate_map {
                writer.write_batch(&coordinate_entries(slice, rows))?;
            } else {
                writer.write_batch(&rows)?;
            }
        }
        writer.finish()?;
    } else {
        let regions = read_regions(bed)?;
        let end = end_index.unwrap_or(regions.len()).min(regions.len());
        let start = start_index.min(end);
        let slice = &regions[start..end];

        let rows = encode_regions(&mut handle, slice, extsize)?;
        if coordinate_map {
            write_json_document(out, &coordinate_entries(slice, rows))?;
        } else {
            write_json_document(out, &rows)?;
        }
    }

    Ok(())
}

fn encode_regions<H: SequenceHandle>(
    handle: &mut H,
    regions: &[Region],
    extsize: i64,
) -> aggwig_core::Result<Vec<Vec<[u8; 4]>>> {
    regions
        .iter()
        .map(|region| {
            let center = region.center() as i64;
            read_onehot(handle, &region.chr, center - extsize, center + extsize)
        })
        .collect()
}

fn coordinate_entries(
    regions: &[Region],
    rows: Vec<Vec<[u8; 4]>>,
) -> serde_json::Map<String, serde_json::Value> {
    regions
        .iter()
        .zip(rows)
        .map(|(region, row)| (region.coordinate_string(), serde_json::json!(row)))
        .collect()
}
