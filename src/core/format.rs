//! Display formatting for amounts, dates and percentages.

use chrono::NaiveDate;

pub use crate::domain::ledger::DEFAULT_CURRENCY_SYMBOL;

const GROUPING_SEPARATOR: char = ',';

/// Supported date display patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePattern {
    /// `YYYY-MM-DD`
    #[default]
    Iso,
    /// `MM/DD`
    MonthDay,
    /// `MM/DD/YYYY`
    MonthDayYear,
}

impl DatePattern {
    /// Recognised patterns map to their variant; anything else falls back to [`DatePattern::Iso`].
    pub fn parse(pattern: &str) -> Self {
        match pattern {
            "MM/DD" => DatePattern::MonthDay,
            "MM/DD/YYYY" => DatePattern::MonthDayYear,
            _ => DatePattern::Iso,
        }
    }

    fn strftime(&self) -> &'static str {
        match self {
            DatePattern::Iso => "%Y-%m-%d",
            DatePattern::MonthDay => "%m/%d",
            DatePattern::MonthDayYear => "%m/%d/%Y",
        }
    }
}

/// Currency symbol followed by the amount rounded to whole units and grouped in thousands.
pub fn format_amount(amount: f64, currency: &str) -> String {
    format!("{}{}", currency, format_whole_number(amount))
}

pub fn format_amount_default(amount: f64) -> String {
    format_amount(amount, DEFAULT_CURRENCY_SYMBOL)
}

pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    date.format(DatePattern::parse(pattern).strftime()).to_string()
}

/// One decimal place followed by `%`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Renders `value` rounded to an integer with `,` thousands grouping.
pub fn format_whole_number(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_digits(&digits, GROUPING_SEPARATOR);
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}
