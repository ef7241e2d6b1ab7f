//! Lazy fixed-size batching over a region file.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::errors::{AggError, Result};
use crate::utils::get_dynamic_reader;

///
/// Reads a region file in fixed-size line batches, keeping only lines with
/// at least three whitespace-separated fields. Iteration stops at the first
/// batch that comes back empty after filtering; a batch of `batch_size`
/// consecutive malformed lines therefore also ends iteration, matching the
/// original tool. Gzip-transparent by `.gz` extension.
///
pub struct BatchedRegionFile {
    reader: BufReader<Box<dyn Read>>,
    batch_size: usize,
    done: bool,
}

impl BatchedRegionFile {
    pub fn open<P: AsRef<Path>>(path: P, batch_size: usize) -> Result<Self> {
        let reader = get_dynamic_reader(path.as_ref())?;
        Ok(BatchedRegionFile {
            reader,
            batch_size: batch_size.max(1),
            done: false,
        })
    }

    fn read_batch(&mut self) -> Result<Vec<String>> {
        let mut batch = Vec::new();
        for _ in 0..self.batch_size {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim();
            if line.split_whitespace().count() >= 3 {
                batch.push(line.to_string());
            }
        }
        Ok(batch)
    }
}

impl Iterator for BatchedRegionFile {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_batch() {
            Ok(batch) if batch.is_empty() => {
                self.done = true;
                None
            }
            Ok(batch) => Some(Ok(batch)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Index range of `batch` that overlaps the global slice `[start, end)`,
/// given that `seen` lines precede this batch. Lets batched consumers honor
/// the same start/end indices as the whole-file path.
pub fn slice_batch(
    seen: usize,
    batch_len: usize,
    start: usize,
    end: Option<usize>,
) -> std::ops::Range<usize> {
    let end = end.unwrap_or(usize::MAX);
    let lo = start.clamp(seen, seen + batch_len) - seen;
    let hi = end.clamp(seen, seen + batch_len) - seen;
    lo..hi.max(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn write_lines(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".bed").tempfile().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    fn collect(path: &Path, batch_size: usize) -> Vec<Vec<String>> {
        BatchedRegionFile::open(path, batch_size)
            .unwrap()
            .map(|b| b.unwrap())
            .collect()
    }

    #[rstest]
    fn test_batches_of_fixed_size() {
        let file = write_lines(&[
            "chr1\t0\t10",
            "chr1\t10\t20",
            "chr1\t20\t30",
            "chr1\t30\t40",
            "chr1\t40\t50",
        ]);

        let batches = collect(file.path(), 2);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 2);
        assert_eq!(batches[1].len(), 2);
        // final short batch
        assert_eq!(batches[2], vec!["chr1\t40\t50".to_string()]);
    }

    #[rstest]
    fn test_malformed_lines_are_skipped() {
        let file = write_lines(&["chr1\t0\t10", "chr1\t10", "", "chr1\t20\t30"]);

        let batches = collect(file.path(), 10);
        assert_eq!(
            batches,
            vec![vec!["chr1\t0\t10".to_string(), "chr1\t20\t30".to_string()]]
        );
    }

    #[rstest]
    fn test_empty_file_yields_no_batches() {
        let file = write_lines(&[]);
        assert!(collect(file.path(), 4).is_empty());
    }

    #[rstest]
    fn test_all_malformed_batch_ends_iteration() {
        // both lines of the first batch are malformed, so iteration stops
        // before ever reaching the valid line
        let file = write_lines(&["chr1\t0", "chr1\t1", "chr1\t20\t30"]);
        assert!(collect(file.path(), 2).is_empty());
    }

    #[rstest]
    fn test_missing_file() {
        assert!(matches!(
            BatchedRegionFile::open("/definitely/not/here.bed", 4),
            Err(AggError::OpenRegionFile(_))
        ));
    }

    #[rstest]
    #[case(0, 5, 0, None, 0..5)]
    #[case(5, 5, 7, None, 2..5)]
    #[case(5, 5, 0, Some(8), 0..3)]
    #[case(5, 5, 6, Some(8), 1..3)]
    #[case(10, 5, 0, Some(8), 0..0)]
    #[case(0, 5, 9, Some(4), 5..5)]
    fn test_slice_batch(
        #[case] seen: usize,
        #[case] batch_len: usize,
        #[case] start: usize,
        #[case] end: Option<usize>,
        #[case] expected: std::ops::Range<usize>,
    ) {
        assert_eq!(slice_batch(seen, batch_len, start, end), expected);
    }
}
