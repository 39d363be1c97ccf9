use super::FieldRecord;
use crate::error::ParseError;
use lazy_regex::regex_captures;
use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::debug;

/// :86: Information to Account Owner.
///
/// Основной разбор: строки текста без пустых и без одиночных `-`.
/// Разбор подполей (`?20`, `?30`, ...) выполняется только по запросу через
/// [`Narrative::details`] и кешируется в экземпляре.
#[derive(Debug, Clone, Serialize)]
pub struct Narrative {
    pub modifier: Option<char>,
    /// содержимое поля как в файле
    content: String,
    /// строки текста, уже обрезанные
    lines: Vec<String>,
    #[serde(skip)]
    details: OnceCell<Result<NarrativeDetails, ParseError>>,
}

/// Подполя :86: в банковском формате `GVC?00...?20...?30...`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NarrativeDetails {
    /// трёхзначный код операции (GVC)
    pub business_code: String,
    /// ?00
    pub transaction_description: Option<String>,
    /// ?10
    pub prima_nota: Option<String>,
    /// ?20 - ?25, через перевод строки
    pub details: Option<String>,
    /// ?26
    pub account_identifier: Option<String>,
    /// ?30
    pub bank_code: Option<String>,
    /// ?31
    pub account_number: Option<String>,
    /// ?32 - ?33, через перевод строки
    pub account_holder: Option<String>,
    /// ?34
    pub text_key_extension: Option<String>,
    /// всё остальное, только для диагностики
    pub unrecognized: Vec<(u8, String)>,
}

impl Narrative {
    /// Содержимое поля как в файле
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Строки текста без пустых и без одиночных `-`
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Разбор подполей; считается один раз на экземпляр, в том числе при доступе из нескольких потоков
    pub fn details(&self) -> Result<&NarrativeDetails, ParseError> {
        self.details
            .get_or_init(|| parse_details(&self.content))
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl PartialEq for Narrative {
    fn eq(&self, other: &Self) -> bool {
        self.modifier == other.modifier && self.content == other.content
    }
}

impl FieldRecord for Narrative {
    fn parse(modifier: Option<char>, content: &str) -> Result<Self, ParseError> {
        let lines = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && *line != "-")
            .map(str::to_string)
            .collect();

        Ok(Narrative {
            modifier,
            content: content.to_string(),
            lines,
            details: OnceCell::new(),
        })
    }

    fn modifier(&self) -> Option<char> {
        self.modifier
    }
}

fn append_line(target: &mut Option<String>, text: &str) {
    match target {
        Some(existing) => {
            existing.push('\n');
            existing.push_str(text);
        }
        None => *target = Some(text.to_string()),
    }
}

fn parse_details(content: &str) -> Result<NarrativeDetails, ParseError> {
    let flat: String = content.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();

    let Some((_, business_code, rest)) = regex_captures!(r"^(\d{3})(.*)$", &flat) else {
        return Err(ParseError::format(format!(
            "narrative does not start with a 3-digit code: '{flat}'"
        )));
    };

    let (sep_pos, separator) = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .ok_or_else(|| {
            ParseError::format(format!("no sub-field separator in narrative: '{flat}'"))
        })?;

    let mut out = NarrativeDetails {
        business_code: business_code.to_string(),
        ..NarrativeDetails::default()
    };

    // пустые куски (в том числе хвост после последнего разделителя) пропускаются
    for chunk in rest[sep_pos..].split(separator).filter(|c| !c.is_empty()) {
        let code = chunk
            .get(..2)
            .filter(|c| c.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|c| c.parse::<u8>().ok())
            .ok_or_else(|| {
                ParseError::format(format!("invalid sub-field code in narrative: '{chunk}'"))
            })?;
        let text = &chunk[2..];

        match code {
            0 => out.transaction_description = Some(text.to_string()),
            10 => out.prima_nota = Some(text.to_string()),
            20..=25 => append_line(&mut out.details, text),
            26 => out.account_identifier = Some(text.to_string()),
            30 => out.bank_code = Some(text.to_string()),
            31 => out.account_number = Some(text.to_string()),
            32..=33 => append_line(&mut out.account_holder, text),
            34 => out.text_key_extension = Some(text.to_string()),
            other => {
                debug!(code = other, text, "unrecognized narrative sub-field");
                out.unrecognized.push((other, text.to_string()));
            }
        }
    }

    Ok(out)
}
