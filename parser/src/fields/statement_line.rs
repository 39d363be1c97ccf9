use super::FieldRecord;
use crate::error::ParseError;
use crate::model::FundsCode;
use crate::utils::{parse_amount, parse_mt940_yy_mm_dd, resolve_entry_date};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

static STATEMENT_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s)^",
        r"(?P<value_date>\d{6})",
        r"(?P<entry_date>\d{4})?",
        r"(?P<funds_code>RC|RD|C|D)",
        r"\D?",
        r"(?P<amount>\d{1,12}(?:,\d{0,2})?)",
        r"(?P<swift_code>[NF][A-Za-z0-9]{3})",
        r"(?P<reference>NONREF|.{0,16}?)",
        r"(?://(?P<description>.*))?",
        r"$",
    ))
    .expect("statement line regex must compile")
});

/// :61: одна проводка
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementLine {
    pub modifier: Option<char>,
    /// дата валютирования (YYMMDD)
    pub value_date: NaiveDate,
    /// дата проводки (MMDD), всегда в году value_date
    pub entry_date: Option<NaiveDate>,
    /// C / D / RC / RD
    pub funds_code: FundsCode,
    /// всегда неотрицательная, знак в `funds_code`
    pub amount: Decimal,
    /// код операции, напр. "NTRF", "NMSC", "FCHG"
    pub swift_code: String,
    /// customer reference, "NONREF" если его нет
    pub reference: String,
    /// всё после `//`
    pub transaction_description: Option<String>,
}

impl StatementLine {
    /// Зачисления положительные, списания отрицательные
    pub fn signed_amount(&self) -> Decimal {
        if self.funds_code.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }

    /// Сторно (RC / RD)
    pub fn is_reversal(&self) -> bool {
        matches!(
            self.funds_code,
            FundsCode::ReturnCredit | FundsCode::ReturnDebit
        )
    }
}

impl FieldRecord for StatementLine {
    fn parse(modifier: Option<char>, content: &str) -> Result<Self, ParseError> {
        let content = content.trim();
        let caps = STATEMENT_LINE_RE
            .captures(content)
            .ok_or_else(|| ParseError::format(format!("invalid statement line: '{content}'")))?;

        let value_date = parse_mt940_yy_mm_dd(&caps["value_date"])?;
        let entry_date = caps
            .name("entry_date")
            .map(|m| resolve_entry_date(value_date, m.as_str()))
            .transpose()?;

        Ok(StatementLine {
            modifier,
            value_date,
            entry_date,
            funds_code: FundsCode::from_mark(&caps["funds_code"])?,
            amount: parse_amount(&caps["amount"])?,
            swift_code: caps["swift_code"].to_string(),
            reference: caps["reference"].to_string(),
            transaction_description: caps.name("description").map(|m| m.as_str().to_string()),
        })
    }

    fn modifier(&self) -> Option<char> {
        self.modifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_line_with_reference_and_description() {
        let line = StatementLine::parse(None, "230101C1234,56NTRFREF123//desc").unwrap();

        assert_eq!(line.value_date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(line.entry_date, None);
        assert_eq!(line.funds_code, FundsCode::Credit);
        assert_eq!(line.amount, Decimal::new(123_456, 2));
        assert_eq!(line.swift_code, "NTRF");
        assert_eq!(line.reference, "REF123");
        assert_eq!(line.transaction_description.as_deref(), Some("desc"));
    }

    #[test]
    fn parses_entry_date_in_same_year() {
        let line = StatementLine::parse(None, "2301020103D250,00NMSCNONREF").unwrap();

        assert_eq!(
            line.entry_date,
            Some(NaiveDate::from_ymd_opt(2023, 1, 3).unwrap())
        );
        assert_eq!(line.funds_code, FundsCode::Debit);
        assert_eq!(line.reference, "NONREF");
        assert!(line.transaction_description.is_none());
        assert_eq!(line.signed_amount(), Decimal::new(-25_000, 2));
    }

    #[test]
    fn parses_reversal_funds_codes() {
        let rc = StatementLine::parse(None, "230101RC10,00NTRFNONREF").unwrap();
        assert_eq!(rc.funds_code, FundsCode::ReturnCredit);
        assert!(rc.is_reversal());
        assert_eq!(rc.signed_amount(), Decimal::new(1000, 2));

        let rd = StatementLine::parse(None, "230101RD10,00NTRFNONREF").unwrap();
        assert_eq!(rd.funds_code, FundsCode::ReturnDebit);
        assert!(rd.is_reversal());
    }

    #[test]
    fn separator_after_funds_code_is_discarded() {
        let line = StatementLine::parse(None, "230101DR100,00NCHGNONREF").unwrap();
        assert_eq!(line.funds_code, FundsCode::Debit);
        assert_eq!(line.amount, Decimal::new(10_000, 2));
        assert_eq!(line.swift_code, "NCHG");
    }

    #[test]
    fn leading_zero_amount_is_decimal() {
        let line = StatementLine::parse(None, "230101C008,00NTRFNONREF").unwrap();
        assert_eq!(line.amount, Decimal::new(800, 2));
    }

    #[test]
    fn reference_may_be_empty_before_description() {
        let line = StatementLine::parse(None, "230101C1,00FMSC//bank ref").unwrap();
        assert_eq!(line.swift_code, "FMSC");
        assert_eq!(line.reference, "");
        assert_eq!(line.transaction_description.as_deref(), Some("bank ref"));
    }

    #[test]
    fn entry_date_crossing_year_is_unsupported() {
        let err = StatementLine::parse(None, "2312310102C1,00NTRFNONREF").unwrap_err();
        assert!(
            matches!(err, ParseError::UnsupportedDateRange { ref entry_date, .. } if entry_date == "0102"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn grammar_mismatch_is_format_error() {
        for content in [
            "230101CXXXX",
            "230101X1,00NTRFNONREF",
            "230101C1,00XTRFNONREF",
            "230101C1,00NTRFTHISREFERENCEISWAYTOOLONG",
            "2301C1,00NTRFNONREF",
        ] {
            assert!(
                matches!(StatementLine::parse(None, content), Err(ParseError::Format(_))),
                "expected Format error for '{content}'"
            );
        }
    }
}
