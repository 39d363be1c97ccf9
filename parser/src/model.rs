use crate::fields::{AccountIdentification, Balance, Field, Narrative, StatementLine};
use crate::error::ParseError;
use serde::Serialize;
use std::fmt;

/// Одна выписка из сообщения MT940: поля в том порядке, в котором они шли в тексте.
///
/// Порядок сохраняется, но на соответствие стандарту не проверяется.
/// После разбора выписка не изменяется.
///
/// Пример использования:
/// ```rust
/// # use mt940_parser::ParseError;
/// # fn main() -> Result<(), ParseError> {
/// let statements = mt940_parser::parse(":20:REF\n:25:ACC\n:60F:C230101EUR10,00")?;
/// assert_eq!(statements.len(), 1);
/// assert_eq!(statements[0].fields().len(), 3);
/// #     Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Statement {
    fields: Vec<Field>,
}

impl Statement {
    /// Go to [`Statement`]
    pub fn new(fields: Vec<Field>) -> Self {
        Statement { fields }
    }

    /// Все поля выписки по порядку
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// :25: первый найденный
    pub fn account_identification(&self) -> Option<&AccountIdentification> {
        self.fields.iter().find_map(|f| match f {
            Field::AccountIdentification(acc) => Some(acc),
            _ => None,
        })
    }

    /// :60F: / :60M: первый найденный
    pub fn opening_balance(&self) -> Option<&Balance> {
        self.fields.iter().find_map(|f| match f {
            Field::OpeningBalance(b) => Some(b),
            _ => None,
        })
    }

    /// :62F: / :62M: последний найденный
    pub fn closing_balance(&self) -> Option<&Balance> {
        self.fields.iter().rev().find_map(|f| match f {
            Field::ClosingBalance(b) => Some(b),
            _ => None,
        })
    }

    /// Все проводки :61:
    pub fn statement_lines(&self) -> impl Iterator<Item = &StatementLine> {
        self.fields.iter().filter_map(|f| match f {
            Field::StatementLine(line) => Some(line),
            _ => None,
        })
    }

    /// Все блоки :86:
    pub fn narratives(&self) -> impl Iterator<Item = &Narrative> {
        self.fields.iter().filter_map(|f| match f {
            Field::InformationToAccountOwner(n) => Some(n),
            _ => None,
        })
    }
}

impl IntoIterator for Statement {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Знак баланса (Дебет/Кредит)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DebitCredit {
    /// Дебет
    Debit,
    /// Кредит
    Credit,
}

impl DebitCredit {
    pub(crate) fn from_mark(mark: &str) -> Result<Self, ParseError> {
        match mark {
            "C" => Ok(DebitCredit::Credit),
            "D" => Ok(DebitCredit::Debit),
            other => Err(ParseError::format(format!("unknown debit/credit mark: {other}"))),
        }
    }
}

/// Признак проводки в :61: (кредит/дебет и их сторно)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FundsCode {
    /// C
    Credit,
    /// D
    Debit,
    /// RC - сторно кредита
    ReturnCredit,
    /// RD - сторно дебета
    ReturnDebit,
}

impl FundsCode {
    pub(crate) fn from_mark(mark: &str) -> Result<Self, ParseError> {
        match mark {
            "C" => Ok(FundsCode::Credit),
            "D" => Ok(FundsCode::Debit),
            "RC" => Ok(FundsCode::ReturnCredit),
            "RD" => Ok(FundsCode::ReturnDebit),
            other => Err(ParseError::format(format!("unknown funds code: {other}"))),
        }
    }

    /// Зачисление на счёт (C или RC)
    pub fn is_credit(self) -> bool {
        matches!(self, FundsCode::Credit | FundsCode::ReturnCredit)
    }
}

impl fmt::Display for DebitCredit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebitCredit::Credit => f.pad("Credit"),
            DebitCredit::Debit => f.pad("Debit"),
        }
    }
}

impl fmt::Display for FundsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FundsCode::Credit => f.pad("Credit"),
            FundsCode::Debit => f.pad("Debit"),
            FundsCode::ReturnCredit => f.pad("ReturnCredit"),
            FundsCode::ReturnDebit => f.pad("ReturnDebit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn funds_code_parses_all_marks() {
        assert_eq!(FundsCode::from_mark("C").unwrap(), FundsCode::Credit);
        assert_eq!(FundsCode::from_mark("D").unwrap(), FundsCode::Debit);
        assert_eq!(FundsCode::from_mark("RC").unwrap(), FundsCode::ReturnCredit);
        assert_eq!(FundsCode::from_mark("RD").unwrap(), FundsCode::ReturnDebit);
        assert!(matches!(FundsCode::from_mark("X"), Err(ParseError::Format(_))));
    }

    #[test]
    fn debit_credit_rejects_unknown_mark() {
        assert_eq!(DebitCredit::from_mark("C").unwrap(), DebitCredit::Credit);
        assert!(matches!(DebitCredit::from_mark("RC"), Err(ParseError::Format(_))));
    }

    #[test]
    fn display_respects_width() {
        assert_eq!(format!("{:<12}|", FundsCode::ReturnCredit), "ReturnCredit|");
        assert_eq!(format!("{:<8}|", FundsCode::Debit), "Debit   |");
        assert_eq!(format!("{:>7}", DebitCredit::Credit), " Credit");
    }

    #[test]
    fn empty_statement_has_no_balances() {
        let stmt = Statement::default();
        assert!(stmt.is_empty());
        assert!(stmt.opening_balance().is_none());
        assert!(stmt.closing_balance().is_none());
        assert_eq!(stmt.statement_lines().count(), 0);
    }
}
