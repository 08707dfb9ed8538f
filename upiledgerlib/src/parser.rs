//! Record parser: a finite-state machine over reconstructed lines.
//!
//! ```text
//! AwaitingHeader --period summary--> AwaitingTable --record head--> InTable
//! InTable --record head--> InTable (previous record emitted)
//! any state --end of lines--> Done (pending record emitted)
//! ```
//!
//! Each transaction spans several physical lines. A record head opens a
//! [`RecordAccumulator`]; every following line is buffered into it until the next record
//! head (or the end of the statement) closes it.

use crate::{
    error::ParseError,
    grammar::{classify, parse_amount, LineShape},
    model::{Direction, Line, StatementHeader, TransactionRecord},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordAccumulator {
    pub page: u32,
    pub line: usize,
    pub date: String,
    pub payee: String,
    pub amount: Decimal,
    pub direction: Direction,
    /// Lines printed after the record head, in order.
    pub trailing: Vec<String>,
}

impl RecordAccumulator {
    fn open(line: &Line, date: &str, detail: &str, sign: Option<char>, amount: &str) -> Result<Self, ParseError> {
        let amount = parse_amount(amount).ok_or_else(|| malformed(line, format!("bad amount {amount:?}")))?;
        let (payee, direction) = counterparty(detail, sign)
            .ok_or_else(|| malformed(line, "cannot tell whether money was sent or received"))?;
        Ok(Self {
            page: line.page,
            line: line.number,
            date: date.to_string(),
            payee,
            amount,
            direction,
            trailing: Vec::new(),
        })
    }

    /// Closes the record. Time and UPI id come from the first trailing lines that carry
    /// them; a missing id stays `None`.
    pub fn finish(self) -> Result<TransactionRecord, ParseError> {
        let mut time: Option<String> = None;
        let mut upi_id: Option<String> = None;
        for text in &self.trailing {
            match classify(text)? {
                LineShape::TimeAndId { time: t, upi_id: id } => {
                    time.get_or_insert_with(|| t.to_string());
                    upi_id.get_or_insert_with(|| id.to_string());
                }
                LineShape::TimeOnly { time: t } => {
                    time.get_or_insert_with(|| t.to_string());
                }
                LineShape::IdOnly { upi_id: id } => {
                    upi_id.get_or_insert_with(|| id.to_string());
                }
                _ => {}
            }
            if time.is_some() && upi_id.is_some() {
                break;
            }
        }

        Ok(TransactionRecord {
            date: match time {
                Some(t) => format!("{} {}", self.date, t),
                None => self.date,
            },
            payee: self.payee,
            amount: self.amount,
            direction: self.direction,
            upi_transaction_id: upi_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserState {
    AwaitingHeader,
    AwaitingTable,
    InTable(RecordAccumulator),
    Done,
}

#[derive(Debug)]
pub struct RecordParser {
    state: ParserState,
    header: Option<StatementHeader>,
    records: Vec<TransactionRecord>,
    lines_seen: usize,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::AwaitingHeader,
            header: None,
            records: Vec::new(),
            lines_seen: 0,
        }
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    pub fn feed(&mut self, line: &Line) -> Result<(), ParseError> {
        self.lines_seen += 1;
        let shape = classify(&line.text)?;
        trace!(page = line.page, line = line.number, ?shape, "classified");

        let state = std::mem::replace(&mut self.state, ParserState::Done);
        self.state = match (state, shape) {
            (ParserState::AwaitingHeader, LineShape::PeriodSummary { start, end, total_sent, total_received }) => {
                let header = header(line, start, end, total_sent, total_received)?;
                debug!(start = %header.period_start, end = %header.period_end, "statement header found");
                self.header = Some(header);
                ParserState::AwaitingTable
            }
            (ParserState::AwaitingHeader, _) => ParserState::AwaitingHeader,

            (ParserState::AwaitingTable, LineShape::RecordHead { date, detail, sign, amount }) => {
                ParserState::InTable(RecordAccumulator::open(line, date, detail, sign, amount)?)
            }
            (ParserState::AwaitingTable | ParserState::InTable(_), LineShape::RecordHeadLoose { .. }) => {
                return Err(malformed(line, "record head without counterparty and amount"));
            }
            (ParserState::AwaitingTable, _) => ParserState::AwaitingTable,

            (ParserState::InTable(acc), LineShape::RecordHead { date, detail, sign, amount }) => {
                self.records.push(acc.finish()?);
                ParserState::InTable(RecordAccumulator::open(line, date, detail, sign, amount)?)
            }
            (ParserState::InTable(mut acc), _) => {
                acc.trailing.push(line.text.clone());
                ParserState::InTable(acc)
            }

            (ParserState::Done, _) => ParserState::Done,
        };
        Ok(())
    }

    pub fn finish(mut self) -> Result<(StatementHeader, Vec<TransactionRecord>), ParseError> {
        if let ParserState::InTable(acc) = std::mem::replace(&mut self.state, ParserState::Done) {
            self.records.push(acc.finish()?);
        }
        let header = self.header.ok_or_else(|| ParseError::UnrecognizedHeader {
            reason: format!("no statement period summary in {} lines", self.lines_seen),
        })?;
        debug!(records = self.records.len(), "statement parsed");
        Ok((header, self.records))
    }
}

/// Runs the state machine over every line of the statement.
pub fn parse(lines: impl IntoIterator<Item = Line>) -> Result<(StatementHeader, Vec<TransactionRecord>), ParseError> {
    let mut parser = RecordParser::new();
    for line in lines {
        parser.feed(&line)?;
    }
    parser.finish()
}

fn header(line: &Line, start: &str, end: &str, sent: &str, received: &str) -> Result<StatementHeader, ParseError> {
    let bad = |what: &str, value: &str| ParseError::UnrecognizedHeader {
        reason: format!("page {}, line {}: invalid {what} {value:?}", line.page, line.number),
    };
    Ok(StatementHeader {
        period_start: start.to_string(),
        period_end: end.to_string(),
        start_date: period_date(start).ok_or_else(|| bad("start date", start))?,
        end_date: period_date(end).ok_or_else(|| bad("end date", end))?,
        total_sent: parse_amount(sent).ok_or_else(|| bad("sent total", sent))?,
        total_received: parse_amount(received).ok_or_else(|| bad("received total", received))?,
    })
}

fn period_date(s: &str) -> Option<NaiveDate> {
    let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDate::parse_from_str(&normalized, "%d %B %Y").ok()
}

/// Payee and direction from the printed detail. Labels win over the amount sign.
fn counterparty(detail: &str, sign: Option<char>) -> Option<(String, Direction)> {
    if let Some(name) = detail.strip_prefix("Paid to ") {
        return Some((name.trim().to_string(), Direction::Sent));
    }
    if let Some(name) = detail.strip_prefix("Received from ") {
        return Some((format!("Received from {}", name.trim()), Direction::Received));
    }
    if let Some(name) = detail.strip_prefix("Top-up to ") {
        return Some((format!("Top-up to {}", name.trim()), Direction::TopUp));
    }
    match sign {
        Some('-') => Some((detail.to_string(), Direction::Sent)),
        Some('+') => Some((detail.to_string(), Direction::Received)),
        _ => None,
    }
}

fn malformed(line: &Line, reason: impl Into<String>) -> ParseError {
    ParseError::MalformedRecord {
        page: line.page,
        line: line.number,
        text: line.text.clone(),
        reason: reason.into(),
    }
}
