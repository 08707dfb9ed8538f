//! Line grammar: an ordered table of named line shapes. The first matcher that accepts
//! a line decides its shape; anything unmatched is [`LineShape::Other`].

use crate::error::ParseError;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use rust_decimal::Decimal;

/// `01 Aug, 2025`
const RECORD_DATE: &str = r"\d{1,2}\s+(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec),\s*\d{4}";
/// `01 August 2025`
const PERIOD_DATE: &str = r"\d{1,2}\s+\p{L}+\s+\d{4}";
/// `₹7,82,334.17`
const AMOUNT: &str = r"₹\s?[\d,]+(?:\.\d+)?";
/// `06:20 PM`
const TIME: &str = r"\d{1,2}:\d{2}\s*(?:AM|PM)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape<'t> {
    PeriodSummary {
        start: &'t str,
        end: &'t str,
        total_sent: &'t str,
        total_received: &'t str,
    },
    RecordHead {
        date: &'t str,
        detail: &'t str,
        sign: Option<char>,
        amount: &'t str,
    },
    /// Starts like a record but the rest of the line does not fit.
    RecordHeadLoose { date: &'t str },
    TimeAndId { time: &'t str, upi_id: &'t str },
    TimeOnly { time: &'t str },
    IdOnly { upi_id: &'t str },
    Other,
}

pub struct LineMatcher {
    pub name: &'static str,
    re: Regex,
    build: for<'t> fn(&Captures<'t>) -> LineShape<'t>,
}

impl LineMatcher {
    fn new(
        name: &'static str,
        pattern: &str,
        build: for<'t> fn(&Captures<'t>) -> LineShape<'t>,
    ) -> Result<Self, ParseError> {
        let re = Regex::new(pattern).map_err(|e| ParseError::Grammar {
            matcher: name,
            reason: e.to_string(),
        })?;
        Ok(Self { name, re, build })
    }
}

lazy_static! {
    static ref GRAMMAR: Result<Vec<LineMatcher>, ParseError> = compile();
}

fn compile() -> Result<Vec<LineMatcher>, ParseError> {
    Ok(vec![
        LineMatcher::new(
            "period_summary",
            &format!(
                r"^(?P<start>{PERIOD_DATE})\s*[-–]\s*(?P<end>{PERIOD_DATE})\s+(?P<sent>{AMOUNT})\s+(?P<received>{AMOUNT})\s*$"
            ),
            period_summary,
        )?,
        LineMatcher::new(
            "record_head",
            &format!(r"^(?P<date>{RECORD_DATE})\s+(?P<detail>.+?)\s+(?P<sign>[+-])?(?P<amount>{AMOUNT})\s*$"),
            record_head,
        )?,
        LineMatcher::new("record_head_loose", &format!(r"^(?P<date>{RECORD_DATE})(?:\s|$)"), record_head_loose)?,
        LineMatcher::new(
            "time_and_id",
            &format!(r"^(?P<time>{TIME})\s+UPI Transaction ID:\s*(?P<id>\d+)\s*$"),
            time_and_id,
        )?,
        LineMatcher::new("time_only", &format!(r"^(?P<time>{TIME})\s*$"), time_only)?,
        LineMatcher::new("id_only", r"^UPI Transaction ID:\s*(?P<id>\d+)\s*$", id_only)?,
    ])
}

/// The compiled matchers, in priority order.
pub fn grammar() -> Result<&'static [LineMatcher], ParseError> {
    GRAMMAR.as_deref().map_err(Clone::clone)
}

fn period_summary<'t>(c: &Captures<'t>) -> LineShape<'t> {
    LineShape::PeriodSummary {
        start: group(c, "start"),
        end: group(c, "end"),
        total_sent: group(c, "sent"),
        total_received: group(c, "received"),
    }
}

fn record_head<'t>(c: &Captures<'t>) -> LineShape<'t> {
    LineShape::RecordHead {
        date: group(c, "date"),
        detail: group(c, "detail"),
        sign: c.name("sign").and_then(|m| m.as_str().chars().next()),
        amount: group(c, "amount"),
    }
}

fn record_head_loose<'t>(c: &Captures<'t>) -> LineShape<'t> {
    LineShape::RecordHeadLoose { date: group(c, "date") }
}

fn time_and_id<'t>(c: &Captures<'t>) -> LineShape<'t> {
    LineShape::TimeAndId {
        time: group(c, "time"),
        upi_id: group(c, "id"),
    }
}

fn time_only<'t>(c: &Captures<'t>) -> LineShape<'t> {
    LineShape::TimeOnly { time: group(c, "time") }
}

fn id_only<'t>(c: &Captures<'t>) -> LineShape<'t> {
    LineShape::IdOnly { upi_id: group(c, "id") }
}

fn group<'t>(c: &Captures<'t>, name: &str) -> &'t str {
    c.name(name).map_or("", |m| m.as_str().trim())
}

pub fn classify(text: &str) -> Result<LineShape<'_>, ParseError> {
    Ok(grammar()?
        .iter()
        .find_map(|m| m.re.captures(text).map(|c| (m.build)(&c)))
        .unwrap_or(LineShape::Other))
}

/// Matcher names in priority order.
pub fn matcher_names() -> Result<Vec<&'static str>, ParseError> {
    Ok(grammar()?.iter().map(|m| m.name).collect())
}

/// `₹7,82,334.17` -> `782334.17`, exactly. Indian digit grouping is accepted.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let digits: String = raw
        .trim()
        .trim_start_matches('₹')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
