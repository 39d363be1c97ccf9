mod utils;
use crate::error::ParseError;
use crate::fields::Field;
use crate::model::Statement;
use tracing::debug;
use utils::*;

/// Разбирает сообщение MT940 в список выписок.
///
/// Выписки разделяются строкой из одного `-`; k разделителей дают k+1 выписку
/// (в том числе пустую, если сообщение заканчивается разделителем).
///
/// Пример:
/// ```rust
/// use mt940_parser::{parse, Field};
/// # use mt940_parser::ParseError;
/// # fn main() -> Result<(), ParseError> {
/// let statements = parse(":20:REF1\n:25:ACC\n-\n:20:REF2\n:25:ACC")?;
/// assert_eq!(statements.len(), 2);
/// assert!(matches!(statements[1].fields()[0], Field::Job(_)));
/// #     Ok(())
/// # }
/// ```
pub fn parse(text: &str) -> Result<Vec<Statement>, ParseError> {
    let mut statements = Vec::new();

    for (idx, lines) in split_statements(text).into_iter().enumerate() {
        let fields = lines
            .iter()
            .map(|line| parse_field(line))
            .collect::<Result<Vec<Field>, ParseError>>()?;

        debug!(statement = idx, fields = fields.len(), "parsed mt940 statement");
        statements.push(Statement::new(fields));
    }

    Ok(statements)
}

/// Делит сообщение на выписки, а каждую выписку на строки полей (переносы уже склеены)
pub fn split_statements(text: &str) -> Vec<Vec<String>> {
    let normalized = normalize_line_endings(text);
    let trimmed = normalized.trim();

    let mut chunks: Vec<Vec<&str>> = vec![Vec::new()];
    for line in trimmed.split('\n') {
        if is_statement_separator(line) {
            chunks.push(Vec::new());
        } else if let Some(current) = chunks.last_mut() {
            current.push(line);
        }
    }

    chunks
        .into_iter()
        .map(|chunk| unfold_field_lines(chunk))
        .collect()
}

/// Разбирает одну строку `:NN[M]:content` в типизированное поле
pub fn parse_field(line: &str) -> Result<Field, ParseError> {
    let (tag, modifier, content) = split_tag_line(line)?;
    Field::from_parts(tag, modifier, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DebitCredit, FundsCode};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    const SAMPLE: &str = "\
:20:STARTUMSE\r
:25:50010517/0123456789\r
:28C:00001/001\r
:60F:C230101EUR1000,00\r
:61:2301020102D50,00NTRFNONREF//PAYMENT\r
:86:166?00GUTSCHRIFT?20INVOICE\r
 42?32JOHN DOE\r
:62F:C230102EUR950,00\r
-";

    // split_statements

    #[test]
    fn split_statements_counts_separators_plus_one() {
        let text = ":20:A\n-\n:20:B\n-\n:20:C";
        assert_eq!(split_statements(text).len(), 3);
    }

    #[test]
    fn split_statements_trailing_separator_yields_empty_statement() {
        let chunks = split_statements(":20:A\n:25:B\n-");
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], vec![":20:A".to_string(), ":25:B".to_string()]);
        assert!(chunks[1].is_empty());
    }

    #[test]
    fn split_statements_unfolds_wrapped_lines() {
        let chunks = split_statements(":86:part one\r\n part two\r\n:62F:C230101EUR1,00");
        assert_eq!(
            chunks[0],
            vec![
                ":86:part one part two".to_string(),
                ":62F:C230101EUR1,00".to_string()
            ]
        );
    }

    // parse_field

    #[test]
    fn parse_field_unknown_tag_names_it() {
        let err = parse_field(":99:foo").unwrap_err();
        assert_eq!(err, ParseError::UnknownField("99".into()));
    }

    #[test]
    fn parse_field_without_opener_is_format_error() {
        let err = parse_field("20:foo").unwrap_err();
        match err {
            ParseError::Format(msg) => {
                assert!(msg.contains("20:foo"), "unexpected msg: {msg}");
            }
            other => panic!("expected Format, got {other:?}"),
        }
    }

    // parse

    #[test]
    fn parse_decodes_full_statement_in_order() {
        let statements = parse(SAMPLE).unwrap();
        assert_eq!(statements.len(), 2);
        assert!(statements[1].is_empty());

        let stmt = &statements[0];
        let tags: Vec<&str> = stmt.fields().iter().map(Field::tag).collect();
        assert_eq!(tags, vec!["20", "25", "28", "60", "61", "86", "62"]);

        let opening = stmt.opening_balance().unwrap();
        assert_eq!(opening.sign, DebitCredit::Credit);
        assert_eq!(opening.amount, Decimal::new(100_000, 2));

        let line = stmt.statement_lines().next().unwrap();
        assert_eq!(line.funds_code, FundsCode::Debit);
        assert_eq!(line.entry_date, NaiveDate::from_ymd_opt(2023, 1, 2));
        assert_eq!(line.transaction_description.as_deref(), Some("PAYMENT"));

        let narrative = stmt.narratives().next().unwrap();
        let details = narrative.details().unwrap();
        assert_eq!(details.details.as_deref(), Some("INVOICE 42"));
        assert_eq!(details.account_holder.as_deref(), Some("JOHN DOE"));

        let closing = stmt.closing_balance().unwrap();
        assert_eq!(closing.date, NaiveDate::from_ymd_opt(2023, 1, 2));
    }

    #[test]
    fn parse_is_deterministic() {
        assert_eq!(parse(SAMPLE).unwrap(), parse(SAMPLE).unwrap());
    }

    #[test]
    fn parse_propagates_field_errors() {
        let err = parse(":20:A\n:60F:C2301EUR1,00").unwrap_err();
        assert!(matches!(err, ParseError::Format(_)));

        let err = parse(":20:A\n-\n:61:2312310102C1,00NTRFNONREF").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedDateRange { .. }));
    }

    #[test]
    fn parse_rejects_text_before_first_tag() {
        let err = parse("{4:\n:20:A").unwrap_err();
        assert!(matches!(err, ParseError::Format(_)));
    }
}
