use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::errors::{AggError, Result};

///
/// Get a reader for either a gzip'd or non-gzip'd file, decided by the
/// `.gz` extension.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file =
        File::open(path).map_err(|_| AggError::OpenRegionFile(path.display().to_string()))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::{BufRead, Write};

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(1.23456, 3, 1.235)]
    #[case(1.23456, 0, 1.0)]
    #[case(-0.0005, 3, -0.001)]
    #[case(2.5, 2, 2.5)]
    fn test_round_to(#[case] value: f64, #[case] decimals: u32, #[case] expected: f64) {
        assert_eq!(round_to(value, decimals), expected);
    }

    #[rstest]
    fn test_dynamic_reader_plain_and_gzip() {
        let dir = tempfile::tempdir().unwrap();

        let plain = dir.path().join("regions.bed");
        std::fs::write(&plain, "chr1\t0\t10\n").unwrap();

        let gz = dir.path().join("regions.bed.gz");
        let mut encoder = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        encoder.write_all(b"chr1\t0\t10\n").unwrap();
        encoder.finish().unwrap();

        for path in [plain, gz] {
            let reader = get_dynamic_reader(&path).unwrap();
            let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
            assert_eq!(lines, vec!["chr1\t0\t10".to_string()]);
        }
    }

    #[rstest]
    fn test_dynamic_reader_missing_file() {
        let result = get_dynamic_reader(Path::new("/definitely/not/here.bed"));
        assert!(matches!(result, Err(AggError::OpenRegionFile(_))));
    }
}
