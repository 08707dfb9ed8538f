//! Prints every reconstructed line with its page, line number and grammar shape.
//! Handy when a statement layout drifts and the parser stops matching.
//!
//! Usage: `cargo run -p upiledgerlib --example dump_lines -- <statement.pdf>`

use upiledgerlib::{
    config::ExtractConfig, grammar::classify, layout::LineReconstructor, sources::pdf::PdfGlyphSource,
    traits::GlyphSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1).ok_or("usage: dump_lines <statement.pdf>")?;
    let pages = PdfGlyphSource::open(&path)?.pages()?;
    for line in LineReconstructor::new(ExtractConfig::default()).reconstruct(pages) {
        let shape = classify(&line.text)?;
        println!("p{:<3} l{:<3} {:?}  {}", line.page, line.number, shape, line.text);
    }
    Ok(())
}
