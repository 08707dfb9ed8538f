//! Canonical JSON ledger:
//! `{transactionPeriod{start,end,totalSent,totalReceived}, totalTransactions, transactions[{date,payee,amount,upiTransactionId}]}`

use crate::{error::Result, model::LedgerDocument, traits::WriteFormat};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDocument<'a> {
    transaction_period: JsonPeriod<'a>,
    total_transactions: usize,
    transactions: Vec<JsonTransaction<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonPeriod<'a> {
    start: &'a str,
    end: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    total_sent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    total_received: Decimal,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonTransaction<'a> {
    date: &'a str,
    payee: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    // always present: an empty id keeps completeness failures visible
    upi_transaction_id: &'a str,
}

pub struct Json;

impl WriteFormat for Json {
    fn write<W: Write>(w: W, doc: &LedgerDocument) -> Result<()> {
        let p = &doc.transaction_period;
        let out = JsonDocument {
            transaction_period: JsonPeriod {
                start: &p.start,
                end: &p.end,
                total_sent: p.total_sent,
                total_received: p.total_received,
            },
            total_transactions: doc.total_transactions,
            transactions: doc
                .transactions
                .iter()
                .map(|t| JsonTransaction {
                    date: &t.date,
                    payee: &t.payee,
                    amount: t.amount,
                    upi_transaction_id: t.upi_transaction_id.as_deref().unwrap_or(""),
                })
                .collect(),
        };
        serde_json::to_writer_pretty(w, &out)?;
        Ok(())
    }
}
