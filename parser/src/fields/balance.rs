use super::FieldRecord;
use crate::error::ParseError;
use crate::model::DebitCredit;
use crate::utils::{parse_amount, parse_mt940_yy_mm_dd};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

static BALANCE_RE: Lazy<Regex> = Lazy::new(|| {
    // C/D + YYMMDD (или ALT / 0) + валюта + сумма
    Regex::new(r"^(?P<mark>[CD])(?P<date>\d{6}|ALT|0)(?P<currency>[A-Z]{3})(?P<amount>\d{1,12}(?:,\d{0,2})?)$")
        .expect("balance regex must compile")
});

/// Баланс: :60: открывающий, :62: закрывающий, :64: доступный, :65: будущий доступный.
///
/// Роль баланса задаёт тег (вариант [`crate::Field`]), модификатор только отличает
/// начальный снимок (`F`) от промежуточного (`M`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Balance {
    pub modifier: Option<char>,
    /// C/D
    pub sign: DebitCredit,
    /// None для "ALT" и "0" (баланс без даты)
    pub date: Option<NaiveDate>,
    /// Код валюты, как есть: "EUR", "USD", ...
    pub currency: String,
    /// Всегда неотрицательная, знак в `sign`
    pub amount: Decimal,
}

impl Balance {
    /// `:60M:` / `:62M:`
    pub fn is_intermediate(&self) -> bool {
        self.modifier == Some('M')
    }

    /// Кредит положительный, дебет отрицательный
    pub fn signed_amount(&self) -> Decimal {
        match self.sign {
            DebitCredit::Credit => self.amount,
            DebitCredit::Debit => -self.amount,
        }
    }
}

impl FieldRecord for Balance {
    fn parse(modifier: Option<char>, content: &str) -> Result<Self, ParseError> {
        let content = content.trim();
        let caps = BALANCE_RE
            .captures(content)
            .ok_or_else(|| ParseError::format(format!("invalid balance: '{content}'")))?;

        let sign = DebitCredit::from_mark(&caps["mark"])?;
        let date = match &caps["date"] {
            "ALT" | "0" => None,
            yymmdd => Some(parse_mt940_yy_mm_dd(yymmdd)?),
        };
        let amount = parse_amount(&caps["amount"])?;

        Ok(Balance {
            modifier,
            sign,
            date,
            currency: caps["currency"].to_string(),
            amount,
        })
    }

    fn modifier(&self) -> Option<char> {
        self.modifier
    }
}
