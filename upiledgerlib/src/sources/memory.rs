//! In-memory glyph source for callers that already hold decoded glyphs.

use crate::{error::Result, model::Glyph, traits::GlyphSource};

#[derive(Debug, Clone, Default)]
pub struct VecGlyphSource {
    pages: Vec<Vec<Glyph>>,
}

impl VecGlyphSource {
    pub fn new(pages: Vec<Vec<Glyph>>) -> Self {
        Self { pages }
    }
}

impl GlyphSource for VecGlyphSource {
    fn pages(&mut self) -> Result<Vec<Vec<Glyph>>> {
        Ok(std::mem::take(&mut self.pages))
    }
}
