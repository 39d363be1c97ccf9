use super::FieldRecord;
use crate::error::ParseError;
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use serde::Serialize;
use tracing::warn;

const MAX_ACCOUNT_LEN: usize = 35;

static LEGACY_ACCOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    // BLZ/BIC (8-11) / номер счёта (0-23 цифры) [валюта]
    Regex::new(r"^(?P<bank_code>[^/]{8,11})/(?P<account_number>\d{0,23})(?P<currency>[A-Z]{3})?$")
        .expect("legacy account regex must compile")
});

/// :25: идентификатор счёта, до 35 символов, без дальнейшей структуры
#[derive(Debug, Clone, Serialize)]
pub struct AccountIdentification {
    pub modifier: Option<char>,
    /// номер счёта/IBAN как есть
    account: String,
    #[serde(skip)]
    legacy: OnceCell<Result<LegacyAccount, ParseError>>,
}

/// Старое толкование :25: как `bank-code/account-number[currency]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyAccount {
    pub bank_code: String,
    pub account_number: String,
    pub currency: Option<String>,
}

impl AccountIdentification {
    /// Номер счёта/IBAN как есть
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Разбор в старом формате `bank-code/account-number[currency]`.
    ///
    /// Никогда не вызывается при обычном разборе; результат кешируется.
    #[deprecated(note = ":25: has no prescribed structure, use `account` instead")]
    pub fn legacy_view(&self) -> Result<&LegacyAccount, ParseError> {
        warn!(
            account = %self.account,
            "AccountIdentification::legacy_view is deprecated, :25: has no prescribed structure"
        );

        self.legacy
            .get_or_init(|| parse_legacy(&self.account))
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl PartialEq for AccountIdentification {
    fn eq(&self, other: &Self) -> bool {
        self.modifier == other.modifier && self.account == other.account
    }
}

impl FieldRecord for AccountIdentification {
    fn parse(modifier: Option<char>, content: &str) -> Result<Self, ParseError> {
        let account = content.trim();
        if account.is_empty() {
            return Err(ParseError::format("empty account identification"));
        }
        if account.chars().count() > MAX_ACCOUNT_LEN {
            return Err(ParseError::format(format!(
                "account identification longer than {MAX_ACCOUNT_LEN} characters: '{account}'"
            )));
        }

        Ok(AccountIdentification {
            modifier,
            account: account.to_string(),
            legacy: OnceCell::new(),
        })
    }

    fn modifier(&self) -> Option<char> {
        self.modifier
    }
}

fn parse_legacy(account: &str) -> Result<LegacyAccount, ParseError> {
    let caps = LEGACY_ACCOUNT_RE.captures(account).ok_or_else(|| {
        ParseError::format(format!("account is not in bank-code/number form: '{account}'"))
    })?;

    Ok(LegacyAccount {
        bank_code: caps["bank_code"].to_string(),
        account_number: caps["account_number"].to_string(),
        currency: caps.name("currency").map(|m| m.as_str().to_string()),
    })
}
