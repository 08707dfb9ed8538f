//! Seams between the core pipeline and the outside world: where glyphs come from and
//! where the ledger goes.

use crate::{
    error::Result,
    model::{Glyph, LedgerDocument},
};
use std::io::Write;

/// Yields every page's glyphs, pages in document order, glyphs in content-stream order.
pub trait GlyphSource {
    fn pages(&mut self) -> Result<Vec<Vec<Glyph>>>;
}

pub trait WriteFormat {
    fn write<W: Write>(w: W, doc: &LedgerDocument) -> Result<()>;
}
