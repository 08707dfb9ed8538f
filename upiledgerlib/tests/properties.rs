use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use upiledgerlib::{
    config::ExtractConfig,
    layout::LineReconstructor,
    model::{Direction, Glyph, StatementHeader, TransactionRecord},
    verify::verify,
};

fn header(sent: Decimal, received: Decimal) -> StatementHeader {
    StatementHeader {
        period_start: "01 August 2025".into(),
        period_end: "31 January 2026".into(),
        start_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        total_sent: sent,
        total_received: received,
    }
}

proptest! {
    #[test]
    fn sums_that_match_always_pass(entries in prop::collection::vec((0i64..1_000_000_000, any::<bool>()), 0..40)) {
        let records: Vec<_> = entries
            .iter()
            .enumerate()
            .map(|(i, (paise, sent))| TransactionRecord {
                date: "01 Aug, 2025".into(),
                payee: format!("P{i}"),
                amount: Decimal::new(*paise, 2),
                direction: if *sent { Direction::Sent } else { Direction::Received },
                upi_transaction_id: Some(format!("{}", 500_000 + i)),
            })
            .collect();
        let sum = |d: Direction| records.iter().filter(|r| r.direction == d).map(|r| r.amount).sum::<Decimal>();
        let report = verify(&header(sum(Direction::Sent), sum(Direction::Received)), &records);
        prop_assert!(report.passed);
    }

    #[test]
    fn space_only_above_threshold(left_end in 0u32..400, gap_quarters in 0u32..40) {
        // quarter-unit positions are exact in binary, so the comparison is exact too
        let x_end = f64::from(left_end) / 4.0;
        let gap = f64::from(gap_quarters) / 4.0;
        let glyphs = [
            Glyph::new("a", x_end - 1.0, x_end, 0.0, 1),
            Glyph::new("b", x_end + gap, x_end + gap + 1.0, 0.0, 1),
        ];
        let text = LineReconstructor::new(ExtractConfig::default()).join_glyphs(&glyphs);
        prop_assert_eq!(text == "a b", gap > 2.0);
    }

    #[test]
    fn duplicating_any_id_is_reported(n in 2usize..20, pick in any::<prop::sample::Index>(), onto in any::<prop::sample::Index>()) {
        let src = pick.index(n);
        let mut dst = onto.index(n);
        if dst == src {
            dst = (dst + 1) % n;
        }
        let mut records: Vec<_> = (0..n)
            .map(|i| TransactionRecord {
                date: "01 Aug, 2025".into(),
                payee: format!("P{i}"),
                amount: Decimal::ONE,
                direction: Direction::Sent,
                upi_transaction_id: Some(i.to_string()),
            })
            .collect();
        records[dst].upi_transaction_id = records[src].upi_transaction_id.clone();
        let report = verify(&header(Decimal::from(n as u64), Decimal::ZERO), &records);
        let mut both = vec![src, dst];
        both.sort();
        let expected = upiledgerlib::verify::Finding::DuplicateId {
            upi_transaction_id: src.to_string(),
            indices: both,
        };
        prop_assert!(report.findings.contains(&expected));
    }
}
