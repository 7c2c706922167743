//! # Receipt Patterns Module
//!
//! Regex patterns and keyword tables used to recognize receipt lines.
//!
//! Line-item patterns are an ordered list of (matcher, extractor) pairs. The
//! order is significant: the permissive fallback must stay last so that the
//! specific shapes (and the skip rules applied before any of them) get the
//! first chance at a line.

use crate::receipt_config::ReceiptConfig;
use crate::receipt_model::RawLineItem;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Receipt noise keywords, matched as substrings of the uppercased line
pub const SKIP_KEYWORDS: &[&str] = &[
    "SUBTOTAL",
    "SUB TOTAL",
    "TOTAL",
    "TAX",
    "VAT",
    "CASH",
    "CARD",
    "CHANGE",
    "BALANCE",
    "VISA",
    "MASTERCARD",
    "AMEX",
    "DEBIT",
    "CREDIT",
    "PAYMENT",
    "TENDER",
    "AMOUNT DUE",
    "THANK YOU",
    "RECEIPT",
    "STORE",
    "TRANSACTION",
    "TERMINAL",
    "AUTH CODE",
    "APPROVED",
    "CASHIER",
    "CUSTOMER",
    "LOYALTY",
    "CLUBCARD",
    "SAVINGS",
    "REFUND",
    "INVOICE",
    "WWW.",
    "HTTP",
];

const ALL_CAPS_GBP: &str = r"^([A-Z][A-Z0-9 &'./-]*?)\s+£(\d+\.\d{2})$";
const ALL_CAPS_USD: &str = r"^([A-Z][A-Z0-9 &'./-]*?)\s+\$(\d+\.\d{2})$";
const MIXED_CASE_GBP: &str = r"^([A-Za-z][A-Za-z0-9 &'./-]*?)\s+£(\d+\.\d{2})$";
const MIXED_CASE_USD: &str = r"^([A-Za-z][A-Za-z0-9 &'./-]*?)\s+\$(\d+\.\d{2})$";
const LEADING_QUANTITY: &str = r"^(\d{1,3})\s+(?:[xX]\s+)?([A-Za-z].*?)\s+[£$](\d+\.\d{2})$";
const ITEM_CODE: &str = r"^(\d{5,})\s+(.+?)\s+[£$]?(\d+\.\d{2})$";
const WEIGHED: &str = r"(?i)^(.+?)\s+(\d+(?:\.\d+)?)\s*(lbs?|kg|oz)\s*@\s*[£$]?\d+(?:\.\d+)?\s*/\s*(?:lbs?|kg|oz)\s+[£$]?(\d+\.\d{2})$";
const PRICED_FALLBACK: &str = r"^(.+?)\s+[£$]?(\d+\.\d{2})$";

/// A line-item shape paired with the extraction it implies
pub struct LinePattern {
    /// Short identifier used in logs
    pub name: &'static str,
    regex: Regex,
    extract: fn(&Captures) -> Option<RawLineItem>,
}

impl LinePattern {
    fn new(
        name: &'static str,
        pattern: &str,
        extract: fn(&Captures) -> Option<RawLineItem>,
    ) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("Receipt line pattern should be valid"),
            extract,
        }
    }

    /// Match `line` and extract its raw (name, quantity, unit) triple
    pub fn apply(&self, line: &str) -> Option<RawLineItem> {
        let captures = self.regex.captures(line)?;
        (self.extract)(&captures)
    }

    pub fn pattern_str(&self) -> &str {
        self.regex.as_str()
    }
}

fn price_only(captures: &Captures) -> Option<RawLineItem> {
    Some(RawLineItem::single(captures.get(1)?.as_str()))
}

fn leading_quantity(captures: &Captures) -> Option<RawLineItem> {
    Some(RawLineItem {
        name: captures.get(2)?.as_str().to_string(),
        quantity: captures.get(1)?.as_str().to_string(),
        unit: None,
    })
}

fn item_code(captures: &Captures) -> Option<RawLineItem> {
    Some(RawLineItem::single(captures.get(2)?.as_str()))
}

fn weighed(captures: &Captures) -> Option<RawLineItem> {
    Some(RawLineItem {
        name: captures.get(1)?.as_str().to_string(),
        quantity: captures.get(2)?.as_str().to_string(),
        unit: Some(captures.get(3)?.as_str().to_string()),
    })
}

lazy_static! {
    /// Line-item patterns in priority order, first valid match wins
    pub static ref LINE_PATTERNS: Vec<LinePattern> = vec![
        LinePattern::new("all_caps_gbp", ALL_CAPS_GBP, price_only),
        LinePattern::new("all_caps_usd", ALL_CAPS_USD, price_only),
        LinePattern::new("mixed_case_gbp", MIXED_CASE_GBP, price_only),
        LinePattern::new("mixed_case_usd", MIXED_CASE_USD, price_only),
        LinePattern::new("leading_quantity", LEADING_QUANTITY, leading_quantity),
        LinePattern::new("item_code", ITEM_CODE, item_code),
        LinePattern::new("weighed", WEIGHED, weighed),
        LinePattern::new("priced_fallback", PRICED_FALLBACK, price_only),
    ];

    static ref DATE_REGEX: Regex =
        Regex::new(r"\b\d{1,2}/\d{1,2}/(?:\d{4}|\d{2})\b").expect("Date pattern should be valid");
    static ref TIME_REGEX: Regex =
        Regex::new(r"\b\d{1,2}:\d{2}\b").expect("Time pattern should be valid");
    static ref SEPARATOR_REGEX: Regex =
        Regex::new(r"^[-=*_~#\s]+$").expect("Separator pattern should be valid");
    static ref DIGITS_ONLY_REGEX: Regex =
        Regex::new(r"^[\d\s]+$").expect("Digits pattern should be valid");
}

/// Whether a trimmed receipt line is noise rather than a purchased item
pub fn is_noise_line(line: &str, config: &ReceiptConfig) -> bool {
    if line.chars().count() < config.min_line_length {
        return true;
    }

    let upper = line.to_uppercase();
    let keyword_hit = SKIP_KEYWORDS.iter().any(|keyword| upper.contains(keyword))
        || config
            .extra_skip_keywords
            .iter()
            .any(|keyword| upper.contains(&keyword.to_uppercase()));
    if keyword_hit {
        return true;
    }

    DATE_REGEX.is_match(line)
        || TIME_REGEX.is_match(line)
        || SEPARATOR_REGEX.is_match(line)
        || DIGITS_ONLY_REGEX.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_match(line: &str) -> Option<(&'static str, RawLineItem)> {
        LINE_PATTERNS
            .iter()
            .find_map(|pattern| pattern.apply(line).map(|item| (pattern.name, item)))
    }

    #[test]
    fn test_pattern_order() {
        let names: Vec<&str> = LINE_PATTERNS.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec![
                "all_caps_gbp",
                "all_caps_usd",
                "mixed_case_gbp",
                "mixed_case_usd",
                "leading_quantity",
                "item_code",
                "weighed",
                "priced_fallback",
            ]
        );
        assert!(LINE_PATTERNS.iter().all(|p| !p.pattern_str().is_empty()));
    }

    #[test]
    fn test_all_caps_lines() {
        let (name, item) = first_match("AUBERGINE                     £0.95").unwrap();
        assert_eq!(name, "all_caps_gbp");
        assert_eq!(item, RawLineItem::single("AUBERGINE"));

        let (name, _) = first_match("WHOLE MILK $3.49").unwrap();
        assert_eq!(name, "all_caps_usd");
    }

    #[test]
    fn test_mixed_case_lines() {
        let (name, item) = first_match("Greek Yogurt £1.25").unwrap();
        assert_eq!(name, "mixed_case_gbp");
        assert_eq!(item.name, "Greek Yogurt");

        let (name, _) = first_match("Greek Yogurt $1.25").unwrap();
        assert_eq!(name, "mixed_case_usd");
    }

    #[test]
    fn test_leading_quantity() {
        let (name, item) = first_match("2 APPLES £2.50").unwrap();
        assert_eq!(name, "leading_quantity");
        assert_eq!(item.quantity, "2");
        assert_eq!(item.name, "APPLES");

        let (_, item) = first_match("3 x Lemons $1.20").unwrap();
        assert_eq!(item.quantity, "3");
        assert_eq!(item.name, "Lemons");
    }

    #[test]
    fn test_digits_inside_name_are_not_a_quantity() {
        let (name, item) = first_match("7UP 2L £1.50").unwrap();
        assert_eq!(name, "priced_fallback");
        assert_eq!(item, RawLineItem::single("7UP 2L"));
    }

    #[test]
    fn test_item_code_is_not_a_quantity() {
        let (name, item) = first_match("40012345 BREAD LOAF £1.10").unwrap();
        assert_eq!(name, "item_code");
        assert_eq!(item.quantity, "1");
        assert_eq!(item.name, "BREAD LOAF");
    }

    #[test]
    fn test_weighed_line() {
        let (name, item) = first_match("BANANAS 2.18 lbs @ $0.68/lb $1.48").unwrap();
        assert_eq!(name, "weighed");
        assert_eq!(item.name, "BANANAS");
        assert_eq!(item.quantity, "2.18");
        assert_eq!(item.unit.as_deref(), Some("lbs"));
    }

    #[test]
    fn test_fallback() {
        let (name, item) = first_match("Loose Carrots* 0.45").unwrap();
        assert_eq!(name, "priced_fallback");
        assert_eq!(item.name, "Loose Carrots*");
        assert!(first_match("no price here").is_none());
    }

    #[test]
    fn test_noise_lines() {
        let config = ReceiptConfig::default();
        assert!(is_noise_line("SUBTOTAL £3.45", &config));
        assert!(is_noise_line("total $12.00", &config));
        assert!(is_noise_line("12/03/2024", &config));
        assert!(is_noise_line("Sale 9:41", &config));
        assert!(is_noise_line("----------", &config));
        assert!(is_noise_line("*****", &config));
        assert!(is_noise_line("0123456789", &config));
        assert!(is_noise_line("ab", &config));
        assert!(!is_noise_line("AUBERGINE £0.95", &config));
    }

    #[test]
    fn test_extra_skip_keywords() {
        let config = ReceiptConfig {
            extra_skip_keywords: vec!["bag charge".to_string()],
            ..Default::default()
        };
        assert!(is_noise_line("BAG CHARGE £0.10", &config));
        assert!(!is_noise_line("BAG CHARGE £0.10", &ReceiptConfig::default()));
    }
}
