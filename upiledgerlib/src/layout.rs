//! Line reconstruction: groups glyphs into y-bands and re-inserts word spacing from
//! horizontal gaps.
//!
//! Statement PDFs place every glyph at an absolute position and never emit a space
//! character, so a naive dump of the content stream glues adjacent words together.

use crate::{
    config::ExtractConfig,
    model::{Glyph, Line},
};
use tracing::debug;

struct Band {
    y: f64,
    glyphs: Vec<Glyph>,
}

#[derive(Debug, Clone, Copy)]
pub struct LineReconstructor {
    config: ExtractConfig,
}

impl LineReconstructor {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Rebuilds the lines of every page, keeping page order. Lines never span pages.
    pub fn reconstruct(&self, pages: Vec<Vec<Glyph>>) -> Vec<Line> {
        let mut lines = Vec::new();
        for glyphs in pages {
            lines.extend(self.page_lines(glyphs));
        }
        debug!(lines = lines.len(), "reconstructed lines");
        lines
    }

    fn page_lines(&self, glyphs: Vec<Glyph>) -> Vec<Line> {
        let mut bands: Vec<Band> = Vec::new();
        for g in glyphs {
            match bands
                .iter_mut()
                .find(|b| (b.y - g.y).abs() <= self.config.y_tolerance)
            {
                Some(band) => band.glyphs.push(g),
                None => bands.push(Band { y: g.y, glyphs: vec![g] }),
            }
        }
        // top of the page first; y grows upwards in PDF space
        bands.sort_by(|a, b| b.y.total_cmp(&a.y));

        let mut out = Vec::with_capacity(bands.len());
        for mut band in bands {
            // stable sort: equal x keeps content-stream order
            band.glyphs.sort_by(|a, b| a.x_start.total_cmp(&b.x_start));
            let text = self.join_glyphs(&band.glyphs);
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            out.push(Line {
                page: band.glyphs[0].page,
                number: out.len() + 1,
                text: text.to_string(),
                glyphs: band.glyphs,
            });
        }
        out
    }

    /// Concatenates already-ordered glyphs, putting one space wherever the gap to the
    /// previous glyph is strictly greater than the configured threshold.
    pub fn join_glyphs(&self, glyphs: &[Glyph]) -> String {
        let mut text = String::new();
        let mut prev_end: Option<f64> = None;
        for g in glyphs {
            if let Some(end) = prev_end {
                if g.x_start - end > self.config.gap_threshold {
                    text.push(' ');
                }
            }
            text.push_str(&g.text);
            prev_end = Some(g.x_end);
        }
        text
    }
}
