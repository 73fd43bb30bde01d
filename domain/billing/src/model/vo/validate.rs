use once_cell::sync::Lazy;
use regex::Regex;

static TAX_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+-[0-9Kk]$").unwrap());
static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{2}/\d{2}/\d{4}").unwrap());
static DATE_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2}/\d{2}/\d{4} \d{2}:\d{2}").unwrap());
static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap());

/// Digits, hyphen, final check digit or "K".
pub fn is_valid_tax_id(tax_id: &str) -> bool {
    TAX_ID.is_match(tax_id)
}

/// Extract a `DD/MM/YYYY` literal from free-form text. Text without such
/// a literal passes through unchanged.
pub fn extract_date(text: &str) -> String {
    match DATE.find(text) {
        Some(m) => m.as_str().to_owned(),
        None => text.to_owned(),
    }
}

/// Extract a `DD/MM/YYYY HH:MM` literal from free-form text, with
/// pass-through on no match.
pub fn extract_datetime(text: &str) -> String {
    match DATE_TIME.find(text) {
        Some(m) => m.as_str().to_owned(),
        None => text.to_owned(),
    }
}

/// Rewrite `YYYY-MM-DD` to `DD/MM/YYYY`; any other shape passes through.
pub fn normalize_issue_date(text: &str) -> String {
    match ISO_DATE.captures(text) {
        Some(c) => format!("{}/{}/{}", &c[3], &c[2], &c[1]),
        None => text.to_owned(),
    }
}
