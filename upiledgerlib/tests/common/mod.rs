#![allow(dead_code)]

use upiledgerlib::model::Glyph;

/// Lays `text` out as fixed-width glyphs on baseline `y`; each space becomes a 5-unit gap.
pub fn glyph_line(text: &str, y: f64, page: u32) -> Vec<Glyph> {
    let mut x = 40.0;
    let mut out = Vec::new();
    for c in text.chars() {
        if c != ' ' {
            out.push(Glyph::new(c.to_string(), x, x + 5.0, y, page));
        }
        x += 5.0;
    }
    out
}

/// Builds one page from top-to-bottom lines, 20 units apart, emitted bottom line first
/// so the reconstructor has to restore the order.
pub fn glyph_page(lines: &[&str], page: u32) -> Vec<Glyph> {
    let mut glyphs = Vec::new();
    for (i, text) in lines.iter().enumerate().rev() {
        glyphs.extend(glyph_line(text, 800.0 - 20.0 * i as f64, page));
    }
    glyphs
}

pub fn statement_pages() -> Vec<Vec<Glyph>> {
    vec![
        glyph_page(
            &[
                "Transaction statement",
                "01 August 2025 - 31 January 2026 ₹1,130.50 ₹2,000",
                "Date & time Transaction details Amount",
                "01 Aug, 2025 Paid to NAVEEN KUMAR S ₹630",
                "06:20 PM UPI Transaction ID: 521314926792",
                "Paid by HDFC Bank 1234",
                "02 Aug, 2025 Received from ASHA R ₹2,000",
                "09:15 AM UPI Transaction ID: 521314926793",
            ],
            1,
        ),
        glyph_page(
            &[
                "Page 2 of 2",
                "03 Aug, 2025 Paid to CAFE COFFEE DAY ₹500.50",
                "11:02 AM UPI Transaction ID: 521314926794",
                "04 Aug, 2025 Top-up to Wallet ₹250",
                "01:00 PM UPI Transaction ID: 521314926795",
            ],
            2,
        ),
    ]
}
