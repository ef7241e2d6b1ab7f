//! One-hot nucleotide encoding and the sequence-archive seam.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use twobit::TwoBitFile;

use crate::errors::{AggError, Result};

pub const ONEHOT_A: [u8; 4] = [1, 0, 0, 0];
pub const ONEHOT_C: [u8; 4] = [0, 1, 0, 0];
pub const ONEHOT_G: [u8; 4] = [0, 0, 1, 0];
pub const ONEHOT_T: [u8; 4] = [0, 0, 0, 1];
/// Ambiguous/unknown base, also used to pad truncated windows.
pub const ONEHOT_N: [u8; 4] = [0, 0, 0, 0];

///
/// Map a DNA string to one 4-element indicator per base. Case-insensitive;
/// spaces are stripped; `n` maps to the all-zero vector. Any other letter
/// is a contract violation and fails fast.
///
pub fn onehot(sequence: &str) -> Result<Vec<[u8; 4]>> {
    sequence
        .chars()
        .filter(|c| *c != ' ')
        .map(|c| match c.to_ascii_lowercase() {
            'a' => Ok(ONEHOT_A),
            'c' => Ok(ONEHOT_C),
            'g' => Ok(ONEHOT_G),
            't' => Ok(ONEHOT_T),
            'n' => Ok(ONEHOT_N),
            other => Err(AggError::UnknownBase(other)),
        })
        .collect()
}

///
/// One open handle to a whole-genome sequence archive.
///
pub trait SequenceHandle {
    fn chrom_length(&self, chrom: &str) -> Option<u32>;

    /// DNA letters for the half-open interval `[start, end)`, which must be
    /// within the chromosome.
    fn read(&mut self, chrom: &str, start: u32, end: u32) -> Result<String>;
}

///
/// A sequence archive that workers open independently, mirroring
/// [crate::signal::SignalSource].
///
pub trait SequenceSource: Sync {
    type Handle: SequenceHandle;

    fn open(&self) -> Result<Self::Handle>;
}

///
/// 2bit-backed sequence source.
///
pub struct TwoBitSource {
    path: PathBuf,
}

impl TwoBitSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        TwoBitSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

pub struct TwoBitHandle {
    reader: TwoBitFile<BufReader<File>>,
    chrom_sizes: HashMap<String, u32>,
}

impl SequenceSource for TwoBitSource {
    type Handle = TwoBitHandle;

    fn open(&self) -> Result<TwoBitHandle> {
        let reader = TwoBitFile::open(&self.path)
            .map_err(|_| AggError::OpenSequence(self.path.display().to_string()))?;
        let names = reader.chrom_names();
        let sizes = reader.chrom_sizes();
        let chrom_sizes = names
            .into_iter()
            .zip(sizes)
            .map(|(name, size)| (name, size as u32))
            .collect();

        Ok(TwoBitHandle {
            reader,
            chrom_sizes,
        })
    }
}

impl SequenceHandle for TwoBitHandle {
    fn chrom_length(&self, chrom: &str) -> Option<u32> {
        self.chrom_sizes.get(chrom).copied()
    }

    fn read(&mut self, chrom: &str, start: u32, end: u32) -> Result<String> {
        self.reader
            .read_sequence(chrom, start as usize..end as usize)
            .map_err(|e| AggError::Sequence(e.to_string()))
    }
}

///
/// One-hot encode the window `[start, end)`, which may extend past either
/// chromosome boundary. The read is clamped to valid bounds and the clipped
/// flanks padded with the `n` vector, so the output length always equals
/// the requested width. An unknown chromosome or a failed read degrades to
/// an all-`n` run of the requested width; an unrecognized base in the
/// archive itself still fails fast.
///
pub fn read_onehot<H: SequenceHandle>(
    handle: &mut H,
    chrom: &str,
    start: i64,
    end: i64,
) -> Result<Vec<[u8; 4]>> {
    let width = (end - start).max(0) as usize;

    let Some(length) = handle.chrom_length(chrom) else {
        return Ok(vec![ONEHOT_N; width]);
    };
    let lo = start.clamp(0, length as i64);
    let hi = end.clamp(0, length as i64);
    if lo >= hi {
        return Ok(vec![ONEHOT_N; width]);
    }

    let sequence = match handle.read(chrom, lo as u32, hi as u32) {
        Ok(sequence) => sequence,
        Err(_) => return Ok(vec![ONEHOT_N; width]),
    };

    let left_pad = (lo - start) as usize;
    let mut encoded = vec![ONEHOT_N; left_pad];
    encoded.extend(onehot(&sequence)?);
    encoded.resize(width, ONEHOT_N);

    Ok(encoded)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    ///
    /// In-memory sequence source: one letter string per chromosome.
    ///
    #[derive(Clone, Default)]
    pub struct MemorySequence {
        pub chroms: HashMap<String, String>,
    }

    impl MemorySequence {
        pub fn with_chrom(mut self, chrom: &str, sequence: &str) -> Self {
            self.chroms.insert(chrom.to_string(), sequence.to_string());
            self
        }
    }

    impl SequenceSource for MemorySequence {
        type Handle = MemorySequence;

        fn open(&self) -> Result<MemorySequence> {
            Ok(self.clone())
        }
    }

    impl SequenceHandle for MemorySequence {
        fn chrom_length(&self, chrom: &str) -> Option<u32> {
            self.chroms.get(chrom).map(|s| s.len() as u32)
        }

        fn read(&mut self, chrom: &str, start: u32, end: u32) -> Result<String> {
            let sequence = self
                .chroms
                .get(chrom)
                .ok_or_else(|| AggError::Sequence(format!("unknown chromosome {}", chrom)))?;
            sequence
                .get(start as usize..end as usize)
                .map(|s| s.to_string())
                .ok_or_else(|| {
                    AggError::Sequence(format!("interval {}:{}-{} out of range", chrom, start, end))
                })
        }
    }
}
