//! Signal-source seam and the parallel region reader.
//!
//! The engine never touches BigWig parsing directly; it talks to a
//! [SignalSource] that can hand out independent per-worker handles. The
//! production implementation wraps [bigtools::BigWigRead].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bigtools::utils::reopen::ReopenableFile;
use bigtools::{BBIRead, BigWigRead};
use rayon::prelude::*;

use crate::errors::{AggError, Result};
use crate::models::{Strand, Window};

///
/// One open handle to a per-basepair signal track. Handles are owned by a
/// single worker and released on drop.
///
pub trait SignalHandle {
    /// Length of the named chromosome, or `None` if the track does not know it.
    fn chrom_length(&self, chrom: &str) -> Option<u32>;

    /// Per-basepair values for the half-open interval `[start, end)`.
    /// Positions without coverage come back as NaN.
    fn values(&mut self, chrom: &str, start: u32, end: u32) -> Result<Vec<f64>>;
}

///
/// A signal track that each worker opens independently, avoiding shared-handle
/// contention in the underlying reader.
///
pub trait SignalSource: Sync {
    type Handle: SignalHandle;

    fn open(&self) -> Result<Self::Handle>;
}

///
/// BigWig-backed signal source.
///
pub struct BigWigSource {
    path: PathBuf,
}

impl BigWigSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        BigWigSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

pub struct BigWigHandle {
    reader: BigWigRead<ReopenableFile>,
    chrom_sizes: HashMap<String, u32>,
}

impl SignalSource for BigWigSource {
    type Handle = BigWigHandle;

    fn open(&self) -> Result<BigWigHandle> {
        let path = self.path.to_string_lossy();
        let reader = BigWigRead::open_file(path.as_ref())
            .map_err(|_| AggError::OpenSignal(path.to_string()))?;
        let chrom_sizes = reader
            .chroms()
            .iter()
            .map(|c| (c.name.clone(), c.length))
            .collect();

        Ok(BigWigHandle {
            reader,
            chrom_sizes,
        })
    }
}

impl SignalHandle for BigWigHandle {
    fn chrom_length(&self, chrom: &str) -> Option<u32> {
        self.chrom_sizes.get(chrom).copied()
    }

    fn values(&mut self, chrom: &str, start: u32, end: u32) -> Result<Vec<f64>> {
        let values = self
            .reader
            .values(chrom, start, end)
            .map_err(|e| AggError::Signal(e.to_string()))?;
        Ok(values.into_iter().map(f64::from).collect())
    }
}

///
/// Partition `[0, n)` into `j` contiguous near-equal index ranges:
/// boundaries at `floor(n * k / j)` for `k in 0..j`, plus a final boundary
/// at `n`. `j <= 1` always yields the single partition `[0, n]`, which also
/// guards degenerate splits when `n < j`.
///
pub fn partition_points(n: usize, j: usize) -> Vec<usize> {
    if j <= 1 {
        return vec![0, n];
    }
    let mut points: Vec<usize> = (0..j).map(|k| n * k / j).collect();
    points.push(n);
    points
}

///
/// Read values for every window, fanning contiguous chunks out across a
/// worker pool of `num_threads` threads. Output order equals input order
/// because chunk results are concatenated in partition order. `Missing`
/// windows yield empty vectors; minus-strand windows come back reversed.
/// Any worker failure aborts the whole call.
///
pub fn read_windows<S: SignalSource>(
    source: &S,
    windows: &[Window],
    num_threads: usize,
) -> Result<Vec<Vec<f64>>> {
    if windows.is_empty() {
        return Ok(Vec::new());
    }

    let points = partition_points(windows.len(), num_threads);
    let chunks: Vec<(usize, usize)> = points.windows(2).map(|w| (w[0], w[1])).collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads.max(1))
        .build()
        .map_err(|e| AggError::ThreadPool(e.to_string()))?;

    let per_chunk: Vec<Vec<Vec<f64>>> = pool.install(|| {
        chunks
            .par_iter()
            .map(|&(lo, hi)| read_chunk(source, &windows[lo..hi]))
            .collect::<Result<Vec<_>>>()
    })?;

    Ok(per_chunk.into_iter().flatten().collect())
}

fn read_chunk<S: SignalSource>(source: &S, windows: &[Window]) -> Result<Vec<Vec<f64>>> {
    if windows.is_empty() {
        return Ok(Vec::new());
    }

    // one handle per worker
    let mut handle = source.open()?;

    windows
        .iter()
        .map(|window| match window {
            Window::Missing => Ok(Vec::new()),
            Window::Span {
                chr,
                start,
                end,
                strand,
            } => {
                let mut values = handle.values(chr, *start, *end)?;
                if *strand == Strand::Minus {
                    values.reverse();
                }
                Ok(values)
            }
        })
        .collect()
}
