use super::FieldRecord;
use crate::error::ParseError;
use lazy_regex::regex_captures;
use serde::Serialize;

/// :20: / :21: ссылка на сообщение, текст как есть
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionReference {
    pub modifier: Option<char>,
    /// например "3996-11-11111111" или "NONREF"
    pub reference: String,
}

impl FieldRecord for TransactionReference {
    fn parse(modifier: Option<char>, content: &str) -> Result<Self, ParseError> {
        let reference = content.trim();
        if reference.is_empty() {
            return Err(ParseError::format("empty reference field"));
        }

        Ok(TransactionReference {
            modifier,
            reference: reference.to_string(),
        })
    }

    fn modifier(&self) -> Option<char> {
        self.modifier
    }
}

/// :28: / :28C: номер выписки и (опционально) номер страницы
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementNumber {
    pub modifier: Option<char>,
    /// номер выписки, с ведущими нулями, например "00014"
    pub statement_number: String,
    /// номер страницы, например "001"
    pub sequence_number: Option<String>,
}

impl FieldRecord for StatementNumber {
    fn parse(modifier: Option<char>, content: &str) -> Result<Self, ParseError> {
        let content = content.trim();
        let Some((_, statement_number, sequence_number)) =
            regex_captures!(r"^(\d{1,5})(?:/(\d{1,5}))?$", content)
        else {
            return Err(ParseError::format(format!(
                "invalid statement number: '{content}'"
            )));
        };

        Ok(StatementNumber {
            modifier,
            statement_number: statement_number.to_string(),
            sequence_number: (!sequence_number.is_empty()).then(|| sequence_number.to_string()),
        })
    }

    fn modifier(&self) -> Option<char> {
        self.modifier
    }
}
