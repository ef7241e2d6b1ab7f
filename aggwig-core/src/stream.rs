//! Incremental JSON output across batches.

use std::io::Write;

use serde::Serialize;

use crate::errors::{AggError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Enclosure {
    Array,
    Object,
}

impl Enclosure {
    fn delimiters(self) -> (u8, u8, &'static str) {
        match self {
            Enclosure::Array => (b'[', b']', "array"),
            Enclosure::Object => (b'{', b'}', "object"),
        }
    }
}

///
/// Writes a JSON array or object incrementally, one batch at a time. Each
/// batch is serialized on its own; its enclosing bracket pair is stripped
/// and the inner text joined with commas, so the final document is
/// byte-identical to serializing the fully accumulated structure at once
/// (with the same trailing newline as [write_json_document]).
///
pub struct StreamingJsonWriter<W: Write> {
    out: W,
    enclosure: Enclosure,
    wrote_any: bool,
}

impl<W: Write> StreamingJsonWriter<W> {
    /// Start an array document; emits the leading `[` immediately.
    pub fn array(out: W) -> Result<Self> {
        Self::new(out, Enclosure::Array)
    }

    /// Start an object document; emits the leading `{` immediately.
    pub fn object(out: W) -> Result<Self> {
        Self::new(out, Enclosure::Object)
    }

    fn new(mut out: W, enclosure: Enclosure) -> Result<Self> {
        out.write_all(&[enclosure.delimiters().0])?;
        Ok(StreamingJsonWriter {
            out,
            enclosure,
            wrote_any: false,
        })
    }

    ///
    /// Append one batch. The batch must serialize to the same enclosure as
    /// the document (an array into an array document, an object into an
    /// object document). Empty batches contribute nothing.
    ///
    pub fn write_batch<T: Serialize + ?Sized>(&mut self, batch: &T) -> Result<()> {
        let encoded = serde_json::to_string(batch)?;
        let (open, close, kind) = self.enclosure.delimiters();

        let bytes = encoded.as_bytes();
        if bytes.len() < 2 || bytes[0] != open || bytes[bytes.len() - 1] != close {
            return Err(AggError::StreamEnclosure(kind));
        }

        let inner = &encoded[1..encoded.len() - 1];
        if inner.is_empty() {
            return Ok(());
        }

        if self.wrote_any {
            self.out.write_all(b",")?;
        }
        self.out.write_all(inner.as_bytes())?;
        self.wrote_any = true;
        Ok(())
    }

    /// Emit the closing bracket and trailing newline, then flush.
    pub fn finish(mut self) -> Result<()> {
        self.out.write_all(&[self.enclosure.delimiters().1])?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

///
/// One-shot counterpart of the streaming writer: the whole document plus a
/// trailing newline. Both paths must produce identical bytes for the same
/// computation.
///
pub fn write_json_document<W: Write, T: Serialize + ?Sized>(mut out: W, value: &T) -> Result<()> {
    let encoded = serde_json::to_string(value)?;
    out.write_all(encoded.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
