use chrono::NaiveDate;
use thiserror::Error;

/// Ошибки при разборе сообщения MT940
///
/// Все три вида ошибок отдаются вызывающему коду как есть,
/// внутри парсера ничего не подменяется значениями по умолчанию.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// строка не похожа на `:tag[modifier]:content`, либо содержимое поля не подходит под его грамматику
    #[error("format error: {0}")]
    Format(String),

    /// тег не входит в набор поддерживаемых
    #[error("unknown field tag: {0}")]
    UnknownField(String),

    /// дата проводки (MMDD) попадает в другой год, чем дата валютирования
    #[error("entry date {entry_date} resolves outside the year of value date {value_date}")]
    UnsupportedDateRange {
        /// дата валютирования строки :61:
        value_date: NaiveDate,
        /// дата проводки, как в файле (MMDD)
        entry_date: String,
    },
}

impl ParseError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        ParseError::Format(msg.into())
    }
}
