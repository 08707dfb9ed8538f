//! upiledgerlib: reconstructs a UPI payment statement ledger from positioned PDF glyphs
//! and verifies it against the totals printed in the statement itself.

pub mod config;
pub mod error;
pub mod grammar;
pub mod layout;
pub mod ledger;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod traits;
pub mod verify;

pub mod sources {
    pub mod memory;
    pub mod pdf;
}

pub mod formats {
    pub mod csv;
    pub mod json;
}

pub use pipeline::{extract, extract_pdf, Extraction};
