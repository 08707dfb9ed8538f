//! Cross-checks a parsed ledger against the redundant totals printed in the statement.
//!
//! Every check runs to completion; findings are collected, never short-circuited.

use crate::model::{Direction, StatementHeader, TransactionRecord};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    Mismatch,
    Duplicate,
    MissingId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// Extracted sum differs from the printed total. `difference = actual - expected`.
    TotalMismatch {
        direction: Direction,
        expected: Decimal,
        actual: Decimal,
        difference: Decimal,
    },
    DuplicateId {
        upi_transaction_id: String,
        indices: Vec<usize>,
    },
    MissingId {
        index: usize,
    },
    /// The extracted amounts do not fit in a `Decimal` when summed.
    TotalOverflow {
        direction: Direction,
        expected: Decimal,
        count: usize,
    },
}

impl Finding {
    pub fn kind(&self) -> FindingKind {
        match self {
            Finding::TotalMismatch { .. } | Finding::TotalOverflow { .. } => FindingKind::Mismatch,
            Finding::DuplicateId { .. } => FindingKind::Duplicate,
            Finding::MissingId { .. } => FindingKind::MissingId,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::TotalMismatch { direction, expected, actual, difference } => write!(
                f,
                "{} total mismatch: extracted ₹{actual:.2} vs statement header ₹{expected:.2} (diff: ₹{difference:.2})",
                label(*direction)
            ),
            Finding::DuplicateId { upi_transaction_id, indices } => write!(
                f,
                "UPI Transaction ID {upi_transaction_id} appears {} times (records {indices:?})",
                indices.len()
            ),
            Finding::MissingId { index } => write!(f, "record {index} has no UPI Transaction ID"),
            Finding::TotalOverflow { direction: Direction::TopUp, count, .. } => {
                write!(f, "Top-up total overflows after {count} records")
            }
            Finding::TotalOverflow { direction, expected, count } => write!(
                f,
                "{} total overflows after {count} records vs statement header ₹{expected:.2}",
                label(*direction)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub count: usize,
    pub total: Decimal,
    /// Set once the running total no longer fits; `total` keeps the last value that did.
    pub overflowed: bool,
}

impl Tally {
    fn add(&mut self, amount: Decimal) {
        self.count += 1;
        match self.total.checked_add(amount) {
            Some(total) if !self.overflowed => self.total = total,
            _ => self.overflowed = true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Breakdown {
    pub sent: Tally,
    pub top_up: Tally,
    pub received: Tally,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    pub passed: bool,
    pub findings: Vec<Finding>,
    pub breakdown: Breakdown,
    pub header: StatementHeader,
    pub transactions: usize,
    pub identified: usize,
}

pub fn verify(header: &StatementHeader, records: &[TransactionRecord]) -> VerificationReport {
    let mut findings = Vec::new();

    let mut breakdown = Breakdown::default();
    for r in records {
        match r.direction {
            Direction::Sent => breakdown.sent.add(r.amount),
            Direction::Received => breakdown.received.add(r.amount),
            Direction::TopUp => breakdown.top_up.add(r.amount),
        }
    }
    reconcile(Direction::Sent, header.total_sent, &breakdown.sent, &mut findings);
    reconcile(Direction::Received, header.total_received, &breakdown.received, &mut findings);
    if breakdown.top_up.overflowed {
        findings.push(Finding::TotalOverflow {
            direction: Direction::TopUp,
            expected: Decimal::ZERO,
            count: breakdown.top_up.count,
        });
    }

    // duplicate groups in order of first appearance
    let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();
    for (i, r) in records.iter().enumerate() {
        if let Some(id) = r.upi_transaction_id.as_deref() {
            let at = *slot.entry(id).or_insert_with(|| {
                groups.push((id, Vec::new()));
                groups.len() - 1
            });
            groups[at].1.push(i);
        }
    }
    let identified = groups.iter().map(|(_, idx)| idx.len()).sum();
    for (id, indices) in groups {
        if indices.len() > 1 {
            findings.push(Finding::DuplicateId { upi_transaction_id: id.to_string(), indices });
        }
    }

    for (index, r) in records.iter().enumerate() {
        if r.upi_transaction_id.is_none() {
            findings.push(Finding::MissingId { index });
        }
    }

    for f in &findings {
        warn!(kind = ?f.kind(), "{f}");
    }

    VerificationReport {
        passed: findings.is_empty(),
        findings,
        breakdown,
        header: header.clone(),
        transactions: records.len(),
        identified,
    }
}

fn reconcile(direction: Direction, expected: Decimal, tally: &Tally, findings: &mut Vec<Finding>) {
    if tally.overflowed {
        findings.push(Finding::TotalOverflow { direction, expected, count: tally.count });
        return;
    }
    let actual = tally.total;
    if expected != actual {
        findings.push(Finding::TotalMismatch {
            direction,
            expected,
            actual,
            // both sides are non-negative, so the difference always fits
            difference: actual - expected,
        });
    }
}

fn label(direction: Direction) -> &'static str {
    match direction {
        Direction::Sent => "Sent",
        Direction::Received => "Received",
        Direction::TopUp => "Top-up",
    }
}

const RULE: &str = "============================================================";

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let has = |kind: FindingKind| self.findings.iter().any(|x| x.kind() == kind);
        let mismatch = |d: Direction| {
            self.findings
                .iter()
                .any(|x| match x {
                    Finding::TotalMismatch { direction, .. } | Finding::TotalOverflow { direction, .. } => *direction == d,
                    _ => false,
                })
        };

        writeln!(f, "{RULE}")?;
        writeln!(f, "VERIFICATION REPORT")?;
        writeln!(f, "{RULE}")?;
        if !has(FindingKind::MissingId) {
            writeln!(f, "  PASS  All {} transactions have UPI Transaction IDs", self.transactions)?;
        }
        if !has(FindingKind::Duplicate) {
            writeln!(f, "  PASS  All {} UPI Transaction IDs are unique", self.identified)?;
        }
        if !mismatch(Direction::Sent) {
            writeln!(
                f,
                "  PASS  Sent total matches statement header: ₹{:.2} == ₹{:.2}",
                self.breakdown.sent.total, self.header.total_sent
            )?;
        }
        if !mismatch(Direction::Received) {
            writeln!(
                f,
                "  PASS  Received total matches statement header: ₹{:.2} == ₹{:.2}",
                self.breakdown.received.total, self.header.total_received
            )?;
        }
        let b = &self.breakdown;
        writeln!(
            f,
            "  INFO  Breakdown: {} sent (₹{:.2}) | {} top-ups (₹{:.2}) | {} received (₹{:.2})",
            b.sent.count, b.sent.total, b.top_up.count, b.top_up.total, b.received.count, b.received.total
        )?;
        for finding in &self.findings {
            writeln!(f, "  FAIL  {finding}")?;
        }
        writeln!(f, "{RULE}")?;
        if self.passed {
            writeln!(f, "  ALL CHECKS PASSED")?;
        } else {
            writeln!(f, "  {} CHECK(S) FAILED", self.findings.len())?;
        }
        write!(f, "{RULE}")
    }
}
