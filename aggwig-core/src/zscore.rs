//! Log-normalized z-scores of per-region signal sums.

use std::path::Path;

use serde::Serialize;

use crate::aggregate::{AggregateConfig, aggregate};
use crate::batch::BatchedRegionFile;
use crate::errors::{AggError, Result};
use crate::models::Region;
use crate::signal::SignalSource;

///
/// One scored region: the region's first four input fields plus its
/// normalized score. Regions without a name field carry `"."`.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZscoreRecord {
    pub chr: String,
    pub start: u32,
    pub end: u32,
    pub name: String,
    pub score: f64,
}

impl ZscoreRecord {
    /// Tab-delimited output line, score at 3 decimal places.
    pub fn as_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{:.3}",
            self.chr, self.start, self.end, self.name, self.score
        )
    }
}

pub(crate) struct ZscoreStats {
    pub mean: f64,
    pub std: f64,
    pub floor_value: f64,
}

///
/// Statistics over the natural logs of the positive sums: mean, population
/// standard deviation, and the shared floor assigned to non-positive sums.
/// An input with no positive sum, or where every positive sum is identical,
/// has no defined z-scores and is a named error.
///
pub(crate) fn zscore_stats(sums: &[f64]) -> Result<ZscoreStats> {
    let logs: Vec<f64> = sums
        .iter()
        .filter(|&&s| s > 0.0)
        .map(|s| s.ln())
        .collect();
    if logs.is_empty() {
        return Err(AggError::NoPositiveSignal);
    }

    let mean = logs.iter().sum::<f64>() / logs.len() as f64;
    let variance = logs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / logs.len() as f64;
    let std = variance.sqrt();
    if std == 0.0 {
        return Err(AggError::DegenerateZscore);
    }

    let min = logs.iter().copied().fold(f64::INFINITY, f64::min);
    let floor_value = ((min - mean) / std).floor();

    Ok(ZscoreStats {
        mean,
        std,
        floor_value,
    })
}

///
/// Score every region of a BED file: per-region signal sums are gathered in
/// batches through the aggregator (a missing or out-of-range window sums to
/// zero), then each positive sum `s` is scored as `(ln(s) - mean) / std`
/// and every non-positive sum receives the floor value. Output preserves
/// input region order.
///
pub fn bed_zscore<S: SignalSource, P: AsRef<Path>>(
    source: &S,
    bed: P,
    config: &AggregateConfig,
    batch_size: usize,
) -> Result<Vec<ZscoreRecord>> {
    let mut regions: Vec<Region> = Vec::new();
    let mut sums: Vec<f64> = Vec::new();

    for batch in BatchedRegionFile::open(bed, batch_size)? {
        let parsed: Vec<Region> = batch?
            .iter()
            .map(|line| Region::parse_line(line))
            .collect::<Result<_>>()?;

        let (_, matrix) = aggregate(source, &parsed, config, false)?;
        sums.extend(matrix.iter().map(|row| row.iter().sum::<f64>()));
        regions.extend(parsed);
    }

    let stats = zscore_stats(&sums)?;

    Ok(regions
        .into_iter()
        .zip(sums)
        .map(|(region, sum)| {
            let score = if sum > 0.0 {
                (sum.ln() - stats.mean) / stats.std
            } else {
                stats.floor_value
            };
            ZscoreRecord {
                chr: region.chr,
                start: region.start,
                end: region.end,
                name: region.name.unwrap_or_else(|| ".".to_string()),
                score,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::signal::testing::MemorySignal;

    #[rstest]
    fn test_stats_over_positive_sums_only() {
        // mirrors the fixed scenario: sums [10, 0, 5]
        let stats = zscore_stats(&[10.0, 0.0, 5.0]).unwrap();

        let (a, b) = (10.0f64.ln(), 5.0f64.ln());
        let mean = (a + b) / 2.0;
        let std = (((a - mean).powi(2) + (b - mean).powi(2)) / 2.0).sqrt();

        assert_eq!(stats.mean, mean);
        assert_eq!(stats.std, std);
        assert_eq!(stats.floor_value, ((b - mean) / std).floor());
        // the two positive entries sit symmetrically at one sigma
        assert!(((a - mean) / std - 1.0).abs() < 1e-12);
        assert!(((b - mean) / std + 1.0).abs() < 1e-12);
    }

    #[rstest]
    fn test_no_positive_sums_is_an_error() {
        assert!(matches!(
            zscore_stats(&[0.0, 0.0]),
            Err(AggError::NoPositiveSignal)
        ));
        assert!(matches!(zscore_stats(&[]), Err(AggError::NoPositiveSignal)));
    }

    #[rstest]
    fn test_identical_positive_sums_is_an_error() {
        assert!(matches!(
            zscore_stats(&[4.0, 4.0, 0.0]),
            Err(AggError::DegenerateZscore)
        ));
        assert!(matches!(
            zscore_stats(&[4.0]),
            Err(AggError::DegenerateZscore)
        ));
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(10)]
    fn test_bed_zscore_preserves_order(#[case] batch_size: usize) {
        // windows of width 10: sums 10, 0 (missing window), 5
        let mut track = vec![0.0; 100];
        for v in &mut track[10..20] {
            *v = 1.0;
        }
        for v in &mut track[40..45] {
            *v = 1.0;
        }
        let source = MemorySignal::default().with_track("chr1", track);

        let mut bed = tempfile::Builder::new().suffix(".bed").tempfile().unwrap();
        writeln!(bed, "chr1\t10\t20\thigh").unwrap();
        writeln!(bed, "chr1\t0\t4\tmissing").unwrap();
        writeln!(bed, "chr1\t38\t48\tlow").unwrap();
        bed.flush().unwrap();

        let config = AggregateConfig {
            extsize: 5,
            num_threads: 2,
            ..AggregateConfig::default()
        };
        let records = bed_zscore(&source, bed.path(), &config, batch_size).unwrap();

        let stats = zscore_stats(&[10.0, 0.0, 5.0]).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "high");
        assert_eq!(records[0].score, (10.0f64.ln() - stats.mean) / stats.std);
        assert_eq!(records[1].name, "missing");
        assert_eq!(records[1].score, stats.floor_value);
        assert_eq!(records[2].name, "low");
        assert_eq!(records[2].score, (5.0f64.ln() - stats.mean) / stats.std);
    }

    #[rstest]
    fn test_record_line_format() {
        let record = ZscoreRecord {
            chr: "chr1".to_string(),
            start: 10,
            end: 20,
            name: ".".to_string(),
            score: 1.23456,
        };
        assert_eq!(record.as_line(), "chr1\t10\t20\t.\t1.235");
    }
}
