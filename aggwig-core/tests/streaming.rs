//! Batched reading plus incremental writing must be indistinguishable from
//! reading a region file whole and serializing the result in one pass.

use std::io::Write;

use pretty_assertions::assert_eq;
use rstest::*;

use aggwig_core::batch::BatchedRegionFile;
use aggwig_core::models::Region;
use aggwig_core::stream::{StreamingJsonWriter, write_json_document};

fn write_bed(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".bed").tempfile().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

const LINES: &[&str] = &[
    "chr1\t0\t10\ta\t+",
    "chr1\t10\t20\tb\t-",
    "chr2\t5\t25\tc",
    "chr2\t30\t40",
    "chr3\t100\t250\te\t.",
];

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(5)]
#[case(50)]
fn streamed_array_output_is_byte_identical(#[case] batch_size: usize) {
    let bed = write_bed(LINES);

    // one pass: whole file, widths serialized at once
    let whole: Vec<Vec<u32>> = LINES
        .iter()
        .map(|l| {
            let r = Region::parse_line(l).unwrap();
            vec![r.start, r.end, r.width()]
        })
        .collect();
    let mut expected = Vec::new();
    write_json_document(&mut expected, &whole).unwrap();

    // batched pass through the streaming writer
    let mut streamed = Vec::new();
    let mut writer = StreamingJsonWriter::array(&mut streamed).unwrap();
    for batch in BatchedRegionFile::open(bed.path(), batch_size).unwrap() {
        let rows: Vec<Vec<u32>> = batch
            .unwrap()
            .iter()
            .map(|l| {
                let r = Region::parse_line(l).unwrap();
                vec![r.start, r.end, r.width()]
            })
            .collect();
        writer.write_batch(&rows).unwrap();
    }
    writer.finish().unwrap();

    assert_eq!(streamed, expected);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
fn streamed_coordinate_map_is_byte_identical(#[case] batch_size: usize) {
    let bed = write_bed(LINES);

    let whole: serde_json::Map<String, serde_json::Value> = LINES
        .iter()
        .map(|l| {
            let r = Region::parse_line(l).unwrap();
            (r.coordinate_string(), serde_json::json!(r.width()))
        })
        .collect();
    let mut expected = Vec::new();
    write_json_document(&mut expected, &whole).unwrap();

    let mut streamed = Vec::new();
    let mut writer = StreamingJsonWriter::object(&mut streamed).unwrap();
    for batch in BatchedRegionFile::open(bed.path(), batch_size).unwrap() {
        let entries: serde_json::Map<String, serde_json::Value> = batch
            .unwrap()
            .iter()
            .map(|l| {
                let r = Region::parse_line(l).unwrap();
                (r.coordinate_string(), serde_json::json!(r.width()))
            })
            .collect();
        writer.write_batch(&entries).unwrap();
    }
    writer.finish().unwrap();

    assert_eq!(streamed, expected);
}
