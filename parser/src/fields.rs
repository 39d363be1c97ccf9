mod account;
mod balance;
mod narrative;
mod reference;
mod statement_line;

use crate::error::ParseError;
use serde::Serialize;

pub use account::{AccountIdentification, LegacyAccount};
pub use balance::Balance;
pub use narrative::{Narrative, NarrativeDetails};
pub use reference::{StatementNumber, TransactionReference};
pub use statement_line::StatementLine;

/// Общее поведение всех полей MT940
pub trait FieldRecord: Sized {
    /// Разбирает содержимое поля (всё после `:NN[M]:`)
    fn parse(modifier: Option<char>, content: &str) -> Result<Self, ParseError>;

    /// Однобуквенный модификатор после номера тега, например 'F' в `:60F:`
    fn modifier(&self) -> Option<char>;
}

/// Одно поле выписки.
///
/// Набор вариантов фиксирован: каждому поддерживаемому тегу соответствует ровно один вариант.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Field {
    /// :20: Transaction Reference Number
    Job(TransactionReference),
    /// :21: Related Reference
    Reference(TransactionReference),
    /// :25: Account Identification
    AccountIdentification(AccountIdentification),
    /// :28: / :28C: Statement Number/Sequence Number
    StatementNumber(StatementNumber),
    /// :60F: / :60M: Opening Balance
    OpeningBalance(Balance),
    /// :61: Statement Line
    StatementLine(StatementLine),
    /// :62F: / :62M: Closing Balance
    ClosingBalance(Balance),
    /// :64: Closing Available Balance
    ValutaBalance(Balance),
    /// :65: Forward Available Balance
    FutureValutaBalance(Balance),
    /// :86: Information to Account Owner
    InformationToAccountOwner(Narrative),
}

type FieldParser = fn(Option<char>, &str) -> Result<Field, ParseError>;

/// Реестр тег -> парсер. Неизменяемый, общий для всех вызовов.
static FIELD_PARSERS: &[(&str, FieldParser)] = &[
    ("20", parse_job),
    ("21", parse_reference),
    ("25", parse_account_identification),
    ("28", parse_statement_number),
    ("60", parse_opening_balance),
    ("61", parse_statement_line),
    ("62", parse_closing_balance),
    ("64", parse_valuta_balance),
    ("65", parse_future_valuta_balance),
    ("86", parse_information_to_account_owner),
];

fn parse_job(m: Option<char>, c: &str) -> Result<Field, ParseError> {
    TransactionReference::parse(m, c).map(Field::Job)
}

fn parse_reference(m: Option<char>, c: &str) -> Result<Field, ParseError> {
    TransactionReference::parse(m, c).map(Field::Reference)
}

fn parse_account_identification(m: Option<char>, c: &str) -> Result<Field, ParseError> {
    AccountIdentification::parse(m, c).map(Field::AccountIdentification)
}

fn parse_statement_number(m: Option<char>, c: &str) -> Result<Field, ParseError> {
    StatementNumber::parse(m, c).map(Field::StatementNumber)
}

fn parse_opening_balance(m: Option<char>, c: &str) -> Result<Field, ParseError> {
    Balance::parse(m, c).map(Field::OpeningBalance)
}

fn parse_statement_line(m: Option<char>, c: &str) -> Result<Field, ParseError> {
    StatementLine::parse(m, c).map(Field::StatementLine)
}

fn parse_closing_balance(m: Option<char>, c: &str) -> Result<Field, ParseError> {
    Balance::parse(m, c).map(Field::ClosingBalance)
}

fn parse_valuta_balance(m: Option<char>, c: &str) -> Result<Field, ParseError> {
    Balance::parse(m, c).map(Field::ValutaBalance)
}

fn parse_future_valuta_balance(m: Option<char>, c: &str) -> Result<Field, ParseError> {
    Balance::parse(m, c).map(Field::FutureValutaBalance)
}

fn parse_information_to_account_owner(m: Option<char>, c: &str) -> Result<Field, ParseError> {
    Narrative::parse(m, c).map(Field::InformationToAccountOwner)
}

impl Field {
    /// Ищет парсер по тегу в реестре и строит поле
    pub fn from_parts(tag: &str, modifier: Option<char>, content: &str) -> Result<Self, ParseError> {
        let (_, parser) = FIELD_PARSERS
            .iter()
            .find(|(known, _)| *known == tag)
            .ok_or_else(|| ParseError::UnknownField(tag.to_string()))?;

        parser(modifier, content)
    }

    /// Номер тега без модификатора
    pub fn tag(&self) -> &'static str {
        match self {
            Field::Job(_) => "20",
            Field::Reference(_) => "21",
            Field::AccountIdentification(_) => "25",
            Field::StatementNumber(_) => "28",
            Field::OpeningBalance(_) => "60",
            Field::StatementLine(_) => "61",
            Field::ClosingBalance(_) => "62",
            Field::ValutaBalance(_) => "64",
            Field::FutureValutaBalance(_) => "65",
            Field::InformationToAccountOwner(_) => "86",
        }
    }

    /// Человекочитаемое название поля
    pub fn name(&self) -> &'static str {
        match self {
            Field::Job(_) => "Transaction Reference Number",
            Field::Reference(_) => "Related Reference",
            Field::AccountIdentification(_) => "Account Identification",
            Field::StatementNumber(_) => "Statement Number",
            Field::OpeningBalance(_) => "Opening Balance",
            Field::StatementLine(_) => "Statement Line",
            Field::ClosingBalance(_) => "Closing Balance",
            Field::ValutaBalance(_) => "Closing Available Balance",
            Field::FutureValutaBalance(_) => "Forward Available Balance",
            Field::InformationToAccountOwner(_) => "Information to Account Owner",
        }
    }

    pub fn modifier(&self) -> Option<char> {
        match self {
            Field::Job(f) | Field::Reference(f) => f.modifier(),
            Field::AccountIdentification(f) => f.modifier(),
            Field::StatementNumber(f) => f.modifier(),
            Field::OpeningBalance(f)
            | Field::ClosingBalance(f)
            | Field::ValutaBalance(f)
            | Field::FutureValutaBalance(f) => f.modifier(),
            Field::StatementLine(f) => f.modifier(),
            Field::InformationToAccountOwner(f) => f.modifier(),
        }
    }
}
