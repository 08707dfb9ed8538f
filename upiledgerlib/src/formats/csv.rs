//! Flat CSV ledger, one row per transaction:
//! date,payee,amount,direction,upiTransactionId

use crate::{error::Result, model::LedgerDocument, traits::WriteFormat};
use csv::WriterBuilder;
use std::io::Write;

#[derive(serde::Serialize)]
struct CsvOutRow<'a> {
    date: &'a str,
    payee: &'a str,
    amount: String,
    direction: &'a str,
    #[serde(rename = "upiTransactionId")]
    upi_transaction_id: &'a str,
}

pub struct Csv;

impl WriteFormat for Csv {
    fn write<W: Write>(mut w: W, doc: &LedgerDocument) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);

        for t in &doc.transactions {
            wrt.serialize(CsvOutRow {
                date: &t.date,
                payee: &t.payee,
                amount: t.amount.to_string(),
                direction: t.direction.as_str(),
                upi_transaction_id: t.upi_transaction_id.as_deref().unwrap_or(""),
            })?;
        }
        wrt.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Direction, TransactionPeriod, TransactionRecord};
    use rust_decimal::Decimal;

    #[test]
    fn rows_follow_document_order() {
        let doc = LedgerDocument {
            transaction_period: TransactionPeriod {
                start: "01 August 2025".into(),
                end: "31 January 2026".into(),
                total_sent: Decimal::new(63000, 2),
                total_received: Decimal::new(2000, 0),
            },
            total_transactions: 2,
            transactions: vec![
                TransactionRecord {
                    date: "01 Aug, 2025 06:20 PM".into(),
                    payee: "NAVEEN KUMAR S".into(),
                    amount: Decimal::new(63000, 2),
                    direction: Direction::Sent,
                    upi_transaction_id: Some("521314926792".into()),
                },
                TransactionRecord {
                    date: "02 Aug, 2025".into(),
                    payee: "Received from ASHA R".into(),
                    amount: Decimal::new(2000, 0),
                    direction: Direction::Received,
                    upi_transaction_id: None,
                },
            ],
        };

        let mut out = Vec::new();
        Csv::write(&mut out, &doc).unwrap();
        let text = String::from_utf8(out).unwrap();
        let rows: Vec<_> = text.lines().collect();
        assert_eq!(
            rows,
            [
                "date,payee,amount,direction,upiTransactionId",
                "\"01 Aug, 2025 06:20 PM\",NAVEEN KUMAR S,630.00,SENT,521314926792",
                "\"02 Aug, 2025\",Received from ASHA R,2000,RECEIVED,",
            ]
        );
    }
}
