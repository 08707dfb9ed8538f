//! Output assembly: header plus records into the final ledger document.

use crate::model::{LedgerDocument, StatementHeader, TransactionPeriod, TransactionRecord};

pub fn assemble(header: StatementHeader, records: Vec<TransactionRecord>) -> LedgerDocument {
    LedgerDocument {
        transaction_period: TransactionPeriod {
            start: header.period_start,
            end: header.period_end,
            total_sent: header.total_sent,
            total_received: header.total_received,
        },
        total_transactions: records.len(),
        transactions: records,
    }
}
