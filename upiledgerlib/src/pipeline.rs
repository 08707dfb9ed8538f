//! End-to-end extraction: glyphs -> lines -> records -> verification -> ledger.

use crate::{
    config::ExtractConfig,
    error::Result,
    layout::LineReconstructor,
    ledger::assemble,
    model::LedgerDocument,
    parser,
    sources::pdf::PdfGlyphSource,
    traits::GlyphSource,
    verify::{verify, VerificationReport},
};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub report: VerificationReport,
    pub document: LedgerDocument,
}

pub fn extract<S: GlyphSource + ?Sized>(source: &mut S, config: &ExtractConfig) -> Result<Extraction> {
    config.validate()?;
    let pages = source.pages()?;
    info!(pages = pages.len(), "read statement");

    let lines = LineReconstructor::new(*config).reconstruct(pages);
    let (header, records) = parser::parse(lines)?;
    info!(transactions = records.len(), "extracted transactions");

    let report = verify(&header, &records);
    let document = assemble(header, records);
    Ok(Extraction { report, document })
}

/// Validates `path` as a PDF input, then runs [`extract`] over its glyphs.
pub fn extract_pdf(path: impl AsRef<Path>, config: &ExtractConfig) -> Result<Extraction> {
    let mut source = PdfGlyphSource::open(path)?;
    extract(&mut source, config)
}
