//! Output side: building the XML document and flushing it.

pub mod xml;

use std::io::{self, Write};

/// Write the finished document to `out` in one go.
pub fn emit<W: Write>(document: &str, mut out: W) -> io::Result<()> {
    out.write_all(document.as_bytes())?;
    out.flush()?;
    Ok(())
}
