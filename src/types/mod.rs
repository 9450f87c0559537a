//! Core types for the ledger transfer engine
//!
//! This module contains all shared data types used throughout the system:
//! - Account types (Account, AccountId, Balance)
//! - Transfer types (TransferRequest, TransferOutcome, AttemptRecord)
//! - Error types (StoreError, EngineError, InvalidRequest)

pub mod account;
pub mod error;
pub mod transfer;

pub use account::{Account, AccountId, Balance};
pub use error::{EngineError, StoreError};
pub use transfer::{AttemptRecord, InvalidRequest, TransferOutcome, TransferRequest};
