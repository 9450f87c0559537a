//! Output handling
//!
//! The only file artifact of a run is the optional final balance dump:
//! one CSV row per account, sorted by id. The writer is generic over
//! `Write` so tests can assert on an in-memory buffer.

use crate::types::{Account, EngineError};
use std::io::Write;

/// Write final account balances as CSV (`id,balance` with a header row)
///
/// # Errors
///
/// Returns an error if serialization or the underlying writer fails.
pub fn write_balances_csv<W: Write>(accounts: &[Account], writer: W) -> Result<(), EngineError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for account in accounts {
        csv_writer.serialize(account)?;
    }
    csv_writer.flush()?;
    Ok(())
}
