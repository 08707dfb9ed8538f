//! Glyph source backed by `pdf-extract`'s character callbacks.

use crate::{
    error::{LedgerError, Result},
    model::Glyph,
    traits::GlyphSource,
};
use pdf_extract::{Document, MediaBox, OutputDev, OutputError, Transform};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct PdfGlyphSource {
    path: PathBuf,
}

impl PdfGlyphSource {
    /// Checks that `path` is an existing `.pdf` file. Nothing is read yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LedgerError::Input(format!("file not found: {}", path.display())));
        }
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if !is_pdf {
            return Err(LedgerError::Input(format!(
                "expected a .pdf file, got: {}",
                path.display()
            )));
        }
        Ok(Self { path: path.to_path_buf() })
    }
}

impl GlyphSource for PdfGlyphSource {
    fn pages(&mut self) -> Result<Vec<Vec<Glyph>>> {
        // the document is dropped at the end of this call, whatever the outcome
        let doc = Document::load(&self.path).map_err(|e| LedgerError::Pdf(e.to_string()))?;
        let mut sink = GlyphSink::default();
        pdf_extract::output_doc(&doc, &mut sink).map_err(|e| LedgerError::Pdf(e.to_string()))?;
        debug!(
            path = %self.path.display(),
            pages = sink.pages.len(),
            glyphs = sink.pages.iter().map(Vec::len).sum::<usize>(),
            "decoded glyphs"
        );
        Ok(sink.pages)
    }
}

#[derive(Default)]
struct GlyphSink {
    pages: Vec<Vec<Glyph>>,
    page: u32,
}

impl OutputDev for GlyphSink {
    fn begin_page(
        &mut self,
        page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> std::result::Result<(), OutputError> {
        self.page = page_num;
        self.pages.push(Vec::new());
        Ok(())
    }

    fn end_page(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> std::result::Result<(), OutputError> {
        // blanks are implied by the gaps between glyphs
        if char.trim().is_empty() {
            return Ok(());
        }
        let x_start = trm.m31;
        let x_end = x_start + width * font_size * trm.m11;
        let glyph = Glyph::new(char, x_start, x_end, trm.m32, self.page);
        match self.pages.last_mut() {
            Some(page) => page.push(glyph),
            None => self.pages.push(vec![glyph]),
        }
        Ok(())
    }

    fn begin_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_input_error() {
        let err = PdfGlyphSource::open("/definitely/not/here.pdf").err().unwrap();
        assert!(matches!(err, LedgerError::Input(m) if m.contains("file not found")));
    }

    #[test]
    fn wrong_extension_is_input_error() {
        let dir = std::env::temp_dir().join(format!("upiledger-ext-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("statement.txt");
        std::fs::File::create(&path).unwrap().write_all(b"hello").unwrap();

        let err = PdfGlyphSource::open(&path).err().unwrap();
        assert!(matches!(err, LedgerError::Input(m) if m.contains(".pdf")));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn extension_check_ignores_case() {
        let dir = std::env::temp_dir().join(format!("upiledger-case-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("STATEMENT.PDF");
        std::fs::File::create(&path).unwrap().write_all(b"not really a pdf").unwrap();

        assert!(PdfGlyphSource::open(&path).is_ok());
        // opening succeeds, decoding garbage does not
        let mut src = PdfGlyphSource::open(&path).unwrap();
        assert!(matches!(src.pages(), Err(LedgerError::Pdf(_))));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn sink_maps_rendering_matrix_to_glyph_box() {
        let media = MediaBox { llx: 0.0, lly: 0.0, urx: 595.0, ury: 842.0 };
        let mut sink = GlyphSink::default();
        sink.begin_page(3, &media, None).unwrap();

        let trm = Transform::row_major(2.0, 0.0, 0.0, 2.0, 72.0, 700.0);
        sink.output_character(&trm, 0.5, 0.0, 10.0, "A").unwrap();
        sink.output_character(&trm, 0.25, 0.0, 10.0, " ").unwrap();
        sink.output_character(&trm, 0.25, 0.0, 10.0, "\t").unwrap();
        sink.end_page().unwrap();

        assert_eq!(sink.pages, vec![vec![Glyph::new("A", 72.0, 82.0, 700.0, 3)]]);
    }

    #[test]
    fn sink_keeps_pages_apart() {
        let media = MediaBox { llx: 0.0, lly: 0.0, urx: 595.0, ury: 842.0 };
        let trm = Transform::row_major(1.0, 0.0, 0.0, 1.0, 10.0, 20.0);
        let mut sink = GlyphSink::default();
        sink.begin_page(1, &media, None).unwrap();
        sink.output_character(&trm, 0.5, 0.0, 4.0, "x").unwrap();
        sink.begin_page(2, &media, None).unwrap();
        sink.begin_page(3, &media, None).unwrap();
        sink.output_character(&trm, 0.5, 0.0, 4.0, "y").unwrap();

        let counts: Vec<usize> = sink.pages.iter().map(Vec::len).collect();
        assert_eq!(counts, [1, 0, 1]);
        assert_eq!(sink.pages[2][0], Glyph::new("y", 10.0, 12.0, 20.0, 3));
    }
}
