use crate::error::ParseError;
use chrono::{Datelike, NaiveDate};
use lazy_regex::regex_captures;
use rust_decimal::Decimal;

/// Сумма MT940: `digits{1,12}[,digits{0,2}]`, запятая отделяет дробную часть.
///
/// Цифры читаются буквально в мантиссу, поэтому "008,00" даёт 8.00.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, ParseError> {
    let Some((_, int_part, frac_part)) = regex_captures!(r"^(\d{1,12})(?:,(\d{0,2}))?$", raw)
    else {
        return Err(ParseError::format(format!("invalid amount: '{raw}'")));
    };

    // int_part <= 12 цифр, frac_part <= 2, в i64 помещается всегда
    let digits = format!("{int_part}{frac_part}");
    let mantissa: i64 = digits
        .parse()
        .map_err(|_| ParseError::format(format!("invalid amount digits: '{raw}'")))?;

    Ok(Decimal::new(mantissa, frac_part.len() as u32))
}

/// YYMMDD -> дата; век всегда 20xx (даты до 2000 года читаются неверно).
pub(crate) fn parse_mt940_yy_mm_dd(s: &str) -> Result<NaiveDate, ParseError> {
    let Some((_, yy, mm, dd)) = regex_captures!(r"^(\d{2})(\d{2})(\d{2})$", s) else {
        return Err(ParseError::format(format!("invalid YYMMDD date: '{s}'")));
    };

    let year: i32 = format!("20{yy}")
        .parse()
        .map_err(|_| ParseError::format(format!("invalid year in YYMMDD: '{s}'")))?;
    let month: u32 = mm
        .parse()
        .map_err(|_| ParseError::format(format!("invalid month in YYMMDD: '{s}'")))?;
    let day: u32 = dd
        .parse()
        .map_err(|_| ParseError::format(format!("invalid day in YYMMDD: '{s}'")))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ParseError::format(format!("invalid YYMMDD date components: '{s}'")))
}

/// Дата проводки MMDD относительно даты валютирования.
///
/// Берётся ближайшая к value_date дата из предыдущего, того же и следующего года.
/// Если она оказалась не в году value_date, это [`ParseError::UnsupportedDateRange`].
pub(crate) fn resolve_entry_date(
    value_date: NaiveDate,
    mmdd: &str,
) -> Result<NaiveDate, ParseError> {
    let Some((_, mm, dd)) = regex_captures!(r"^(\d{2})(\d{2})$", mmdd) else {
        return Err(ParseError::format(format!("invalid MMDD entry date: '{mmdd}'")));
    };
    let month: u32 = mm
        .parse()
        .map_err(|_| ParseError::format(format!("invalid MMDD entry date: '{mmdd}'")))?;
    let day: u32 = dd
        .parse()
        .map_err(|_| ParseError::format(format!("invalid MMDD entry date: '{mmdd}'")))?;

    let year = value_date.year();
    let nearest = [year, year - 1, year + 1]
        .into_iter()
        .filter_map(|y| NaiveDate::from_ymd_opt(y, month, day))
        .min_by_key(|candidate| (*candidate - value_date).num_days().abs())
        .ok_or_else(|| ParseError::format(format!("invalid MMDD entry date: '{mmdd}'")))?;

    if nearest.year() != year {
        return Err(ParseError::UnsupportedDateRange {
            value_date,
            entry_date: mmdd.to_string(),
        });
    }

    Ok(nearest)
}
