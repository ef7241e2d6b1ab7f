use super::region::Strand;

///
/// A concrete half-open interval derived from a region, or the explicit
/// marker for one that cannot be read. `Missing` windows never fail a read;
/// they degrade to a zero-filled row of the expected width downstream.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Window {
    Span {
        chr: String,
        start: u32,
        end: u32,
        strand: Strand,
    },
    Missing,
}

impl Window {
    pub fn is_missing(&self) -> bool {
        matches!(self, Window::Missing)
    }
}

///
/// Expand a center point symmetrically into `[x - extsize, x + extsize)`.
///
/// The window is `Missing` iff `x < extsize`, the chromosome is unknown to
/// the signal source (`chrom_length` is `None`), or `x + extsize` is not
/// strictly less than the chromosome length. The boundary is deliberately
/// conservative: a center at exactly `extsize` is the leftmost valid window
/// (start 0), and a window ending exactly at the chromosome end is rejected.
///
pub fn build_window(
    chr: &str,
    center: u32,
    strand: Strand,
    extsize: u32,
    chrom_length: Option<u32>,
) -> Window {
    let Some(length) = chrom_length else {
        return Window::Missing;
    };
    if center < extsize {
        return Window::Missing;
    }
    if (center as u64 + extsize as u64) >= length as u64 {
        return Window::Missing;
    }

    Window::Span {
        chr: chr.to_string(),
        start: center - extsize,
        end: center + extsize,
        strand,
    }
}
