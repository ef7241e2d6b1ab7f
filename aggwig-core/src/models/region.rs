use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::AggError;

///
/// Orientation of a region. `.` (or any absent/unknown field) is unstranded;
/// only `-` triggers signal reversal downstream.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strand {
    Plus,
    Minus,
    #[default]
    Unstranded,
}

impl FromStr for Strand {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Plus),
            "-" => Ok(Strand::Minus),
            _ => Ok(Strand::Unstranded),
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
            Strand::Unstranded => '.',
        };
        write!(f, "{}", c)
    }
}

///
/// Region struct, the representation of one line of a BED-like region file.
/// Coordinates are 0-based, half-open.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region {
    pub chr: String,
    pub start: u32,
    pub end: u32,

    pub name: Option<String>,
    pub strand: Strand,
}

impl Region {
    ///
    /// Parse a tab/whitespace-delimited line with fields
    /// `[chrom, start, end, name?, strand?]`. Lines with fewer than three
    /// fields, or non-integer coordinates, are a parse error.
    ///
    pub fn parse_line(line: &str) -> Result<Region, AggError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(AggError::RegionParse(line.to_string()));
        }

        let start: u32 = fields[1]
            .parse()
            .map_err(|_| AggError::RegionParse(line.to_string()))?;
        let end: u32 = fields[2]
            .parse()
            .map_err(|_| AggError::RegionParse(line.to_string()))?;

        Ok(Region {
            chr: fields[0].to_string(),
            start,
            end,
            name: fields.get(3).map(|s| s.to_string()),
            strand: fields
                .get(4)
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
        })
    }

    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    /// Midpoint of the region: `(start + end) / 2` with integer division.
    pub fn center(&self) -> u32 {
        (self.start + self.end) / 2
    }

    /// Key used in coordinate-map output modes.
    pub fn coordinate_string(&self) -> String {
        format!("{}:{}-{}", self.chr, self.start, self.end)
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.chr, self.start, self.end)?;
        if let Some(name) = &self.name {
            write!(f, "\t{}", name)?;
        }
        Ok(())
    }
}
