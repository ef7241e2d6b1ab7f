//! The aggregator: per-region signal matrices and cross-region positional
//! means over a set of BED regions.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::condense::condense;
use crate::errors::Result;
use crate::models::{Region, Window, build_window};
use crate::signal::{SignalHandle, SignalSource, read_windows};
use crate::utils::{get_dynamic_reader, round_to};

///
/// Parameters shared by every aggregation entry point. Defaults mirror the
/// CLI defaults; there is no ambient global configuration.
///
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    /// Basepairs to extend around each region center, in both directions.
    pub extsize: u32,
    /// Worker count for the parallel region reader.
    pub num_threads: usize,
    /// Bin width, in basepairs, for condensing rows.
    pub resolution: usize,
    /// Decimal places kept in every emitted value.
    pub decimal_resolution: u32,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        AggregateConfig {
            extsize: crate::consts::DEFAULT_EXTSIZE,
            num_threads: crate::consts::DEFAULT_NUM_THREADS,
            resolution: crate::consts::DEFAULT_RESOLUTION,
            decimal_resolution: crate::consts::DEFAULT_DECIMAL_RESOLUTION,
        }
    }
}

///
/// Aggregate signal for a list of regions.
///
/// Each region contributes exactly one matrix row, in input order. Windows
/// that cannot be read contribute a zero row of the expected width rather
/// than being excluded, so the positional mean is always over every input
/// region. Non-finite values are zeroed before binning and averaging.
///
/// With `no_extension`, each region's own `[start, end)` is read as-is
/// instead of a symmetric window around its center.
///
/// Returns `(aggregate_vector, matrix)`; an empty region list returns two
/// empty vectors without touching the signal source.
///
pub fn aggregate<S: SignalSource>(
    source: &S,
    regions: &[Region],
    config: &AggregateConfig,
    no_extension: bool,
) -> Result<(Vec<f64>, Vec<Vec<f64>>)> {
    if regions.is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }

    let handle = source.open()?;
    let windows: Vec<Window> = regions
        .iter()
        .map(|region| {
            if no_extension {
                explicit_window(&handle, region)
            } else {
                build_window(
                    &region.chr,
                    region.center(),
                    region.strand,
                    config.extsize,
                    handle.chrom_length(&region.chr),
                )
            }
        })
        .collect();
    drop(handle);

    let rows = read_windows(source, &windows, config.num_threads)?;

    let matrix: Vec<Vec<f64>> = rows
        .into_iter()
        .zip(regions)
        .map(|(row, region)| {
            let width = if no_extension {
                region.width() as usize
            } else {
                2 * config.extsize as usize
            };
            let mut row = if row.is_empty() { vec![0.0; width] } else { row };
            for value in &mut row {
                if !value.is_finite() {
                    *value = 0.0;
                }
            }
            condense(&row, config.resolution)
                .into_iter()
                .map(|v| round_to(v, config.decimal_resolution))
                .collect()
        })
        .collect();

    let columns = matrix.iter().map(|row| row.len()).max().unwrap_or(0);
    let mut aggregate = vec![0.0; columns];
    for row in &matrix {
        for (i, value) in row.iter().enumerate() {
            if value.is_finite() {
                aggregate[i] += value;
            }
        }
    }
    let rows_total = matrix.len() as f64;
    for value in &mut aggregate {
        *value = round_to(*value / rows_total, config.decimal_resolution);
    }

    Ok((aggregate, matrix))
}

/// Pass a region through as its own window; invalid bounds degrade to
/// `Missing` the same way extension windows do.
fn explicit_window<H: SignalHandle>(handle: &H, region: &Region) -> Window {
    match handle.chrom_length(&region.chr) {
        Some(length) if region.start < region.end && region.end <= length => Window::Span {
            chr: region.chr.clone(),
            start: region.start,
            end: region.end,
            strand: region.strand,
        },
        _ => Window::Missing,
    }
}

///
/// Read a whole region file into memory. Unlike [crate::batch::BatchedRegionFile],
/// this reader assumes well-formed input: any malformed non-blank line is an
/// error rather than being skipped. The asymmetry is deliberate and mirrors
/// the batched/non-batched split of the original tool.
///
pub fn read_regions<P: AsRef<Path>>(path: P) -> Result<Vec<Region>> {
    let reader = get_dynamic_reader(path.as_ref())?;

    let mut regions = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        regions.push(Region::parse_line(&line)?);
    }

    Ok(regions)
}

///
/// Aggregate signal around the center points of each region in a BED file,
/// restricted to the index slice `[start_index, end_index)`.
///
pub fn bed_aggregate<S: SignalSource, P: AsRef<Path>>(
    source: &S,
    bed: P,
    config: &AggregateConfig,
    start_index: usize,
    end_index: Option<usize>,
    no_extension: bool,
) -> Result<(Vec<f64>, Vec<Vec<f64>>)> {
    let regions = read_regions(bed)?;
    let end = end_index.unwrap_or(regions.len()).min(regions.len());
    let start = start_index.min(end);
    aggregate(source, &regions[start..end], config, no_extension)
}

///
/// Aggregate each name group of a region file independently, returning the
/// per-group aggregate vectors (matrices are discarded). Regions without a
/// name field group under `"."`. Key ordering is not a contract.
///
pub fn grouped_bed_aggregate<S: SignalSource, P: AsRef<Path>>(
    source: &S,
    bed: P,
    config: &AggregateConfig,
    no_extension: bool,
) -> Result<HashMap<String, Vec<f64>>> {
    let regions = read_regions(bed)?;

    let mut groups: Vec<(String, Vec<Region>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for region in regions {
        let key = region.name.clone().unwrap_or_else(|| ".".to_string());
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(region);
    }

    let mut aggregates = HashMap::new();
    for (key, members) in groups {
        let (vector, _) = aggregate(source, &members, config, no_extension)?;
        aggregates.insert(key, vector);
    }

    Ok(aggregates)
}
