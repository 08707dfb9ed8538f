//! Domain models passed between pipeline stages.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One positioned character as decoded from the PDF content stream.
///
/// `y` is in PDF user space, so it grows towards the top of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub text: String,
    pub x_start: f64,
    pub x_end: f64,
    pub y: f64,
    pub page: u32,
}

impl Glyph {
    pub fn new(text: impl Into<String>, x_start: f64, x_end: f64, y: f64, page: u32) -> Self {
        Self {
            text: text.into(),
            x_start,
            x_end,
            y,
            page,
        }
    }
}

/// A reconstructed text line. Glyphs are ordered left-to-right and all come from `page`.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub page: u32,
    /// 1-based position of the line on its page, top-to-bottom.
    pub number: usize,
    pub glyphs: Vec<Glyph>,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Sent,
    Received,
    /// Transfer into the holder's own wallet; not part of the printed sent total.
    TopUp,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Sent => "SENT",
            Direction::Received => "RECEIVED",
            Direction::TopUp => "TOP_UP",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementHeader {
    /// Period bounds exactly as printed, e.g. `01 August 2025`.
    pub period_start: String,
    pub period_end: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_sent: Decimal,
    pub total_received: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// `01 Aug, 2025 06:20 PM`, or just the date when no time line was printed.
    pub date: String,
    pub payee: String,
    pub amount: Decimal,
    pub direction: Direction,
    pub upi_transaction_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionPeriod {
    pub start: String,
    pub end: String,
    pub total_sent: Decimal,
    pub total_received: Decimal,
}

/// Final ledger: period summary plus every transaction in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerDocument {
    pub transaction_period: TransactionPeriod,
    pub total_transactions: usize,
    pub transactions: Vec<TransactionRecord>,
}
