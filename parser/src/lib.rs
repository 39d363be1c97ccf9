//! Разбор банковских выписок SWIFT MT940.
//!
//! Точка входа - [`parse`]: текст сообщения -> список [`Statement`],
//! каждая выписка - упорядоченный список [`Field`].

pub mod error;
pub mod fields;
pub mod model;
pub mod mt940;

mod utils;

pub use crate::error::ParseError;
pub use crate::fields::{
    AccountIdentification, Balance, Field, FieldRecord, LegacyAccount, Narrative,
    NarrativeDetails, StatementLine, StatementNumber, TransactionReference,
};
pub use crate::model::{DebitCredit, FundsCode, Statement};
pub use crate::mt940::{parse, parse_field, split_statements};
