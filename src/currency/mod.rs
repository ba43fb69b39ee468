use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "ZAR" => "R".into(),
        "AUD" => "A$".into(),
        "CHF" => "CHF".into(),
        _ => code.into(),
    }
}

/// Formats an amount as a currency string: fixed symbol, thousands grouping,
/// exactly two decimals, and a leading minus sign for negatives.
///
/// Panics on non-finite input; a NaN or infinite amount is a programmer
/// error upstream and must not be rendered silently.
pub fn format_amount(amount: f64, code: &CurrencyCode) -> String {
    assert!(
        amount.is_finite(),
        "cannot format non-finite amount: {amount}"
    );
    let body = format_number(amount.abs(), 2);
    let symbol = symbol_for(code.as_str());
    if amount < 0.0 {
        format!("-{symbol}{body}")
    } else {
        format!("{symbol}{body}")
    }
}

pub fn format_number(value: f64, precision: u8) -> String {
    let mut body = format!("{:.*}", precision as usize, value);
    if let Some(pos) = body.find('.') {
        let mut int_part = body[..pos].to_string();
        insert_grouping(&mut int_part, ',');
        body = format!("{}{}", int_part, &body[pos..]);
    } else {
        insert_grouping(&mut body, ',');
    }
    body
}

fn insert_grouping(int_part: &mut String, separator: char) {
    let mut cleaned = int_part.replace(separator, "");
    if cleaned.starts_with('-') {
        let sign = cleaned.remove(0);
        let grouped = group_digits(&cleaned, separator);
        *int_part = format!("{}{}", sign, grouped);
    } else {
        *int_part = group_digits(&cleaned, separator);
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}
