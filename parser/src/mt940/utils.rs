use crate::ParseError;
use once_cell::sync::Lazy;
use regex::Regex;

static FIELD_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    // :NN[M]:content, content может быть многострочным
    Regex::new(r"(?s)^:(?P<tag>\d{2})(?P<modifier>[A-Z])?:(?P<content>.*)$")
        .expect("field line regex must compile")
});

/// Разделяет строку с тегом на номер тега, модификатор и содержимое
pub(super) fn split_tag_line(line: &str) -> Result<(&str, Option<char>, &str), ParseError> {
    let caps = FIELD_LINE_RE
        .captures(line)
        .ok_or_else(|| ParseError::format(format!("bad field line: '{line}'")))?;

    // все группы кроме modifier обязательные
    let tag = caps.name("tag").map_or("", |m| m.as_str());
    let modifier = caps.name("modifier").and_then(|m| m.as_str().chars().next());
    let content = caps.name("content").map_or("", |m| m.as_str());

    Ok((tag, modifier, content))
}

/// `\r\n` и одиночные `\r` -> `\n`
pub(super) fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Строка-разделитель выписок: только `-`
pub(super) fn is_statement_separator(line: &str) -> bool {
    line.trim_end() == "-"
}

/// Склеивает перенесённые строки и режет выписку на строки полей.
///
/// Перевод строки сохраняется только перед `:`, остальные просто удаляются.
pub(super) fn unfold_field_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();

    for line in lines {
        if line.starts_with(':') {
            fields.push(line.to_string());
            continue;
        }

        match fields.last_mut() {
            Some(current) => current.push_str(line),
            // мусор до первого тега; пусть упадёт в диспетчере
            None if !line.trim().is_empty() => fields.push(line.to_string()),
            None => {}
        }
    }

    fields.retain(|f| !f.trim().is_empty());
    fields
}
