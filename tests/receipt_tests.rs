//! # Receipt Parser Tests
//!
//! End-to-end parsing of receipt text through the public API.

#[cfg(test)]
mod tests {
    use pantry_core::receipt_config::ReceiptConfig;
    use pantry_core::receipt_model::ParsedReceiptItem;
    use pantry_core::receipt_parser::{parse_receipt_file, parse_receipt_text, ReceiptParser};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// (name, quantity, unit) view of the parse result, ids excluded
    fn triples(items: &[ParsedReceiptItem]) -> Vec<(&str, &str, &str)> {
        items
            .iter()
            .map(|i| (i.name.as_str(), i.quantity.as_str(), i.unit.as_str()))
            .collect()
    }

    /// The basic UK receipt: one priced line, one counted line, one subtotal
    #[test]
    fn test_basic_receipt() {
        init_logging();
        let text = "AUBERGINE                     £0.95\n2 APPLES £2.50\nSUBTOTAL £3.45";

        let items = parse_receipt_text(text);

        assert_eq!(
            triples(&items),
            vec![("Aubergine", "1", "pieces"), ("Apples", "2", "pieces")]
        );
    }

    /// Repeated items merge into one with summed integer quantities
    #[test]
    fn test_duplicate_items_merge() {
        let items = parse_receipt_text("MILK £1.20\nBREAD £1.00\nMilk $0.99\n2 MILK £2.40");

        assert_eq!(
            triples(&items),
            vec![("Milk", "4", "pieces"), ("Bread", "1", "pieces")]
        );
    }

    /// Weighed produce keeps its weight and canonical unit
    #[test]
    fn test_weighed_line() {
        let items = parse_receipt_text("BANANAS 2.18 lbs @ $0.68/lb $1.48");

        assert_eq!(triples(&items), vec![("Bananas", "2.18", "lb")]);
    }

    /// Metric weighed lines resolve to kg
    #[test]
    fn test_weighed_line_metric() {
        let items = parse_receipt_text("Loose Onions 0.565 kg @ £0.90/kg £0.51");

        assert_eq!(triples(&items), vec![("Loose Onions", "0.565", "kg")]);
    }

    /// A total line is never an item, whatever its case or currency
    #[test]
    fn test_total_lines_skipped() {
        for line in ["TOTAL £5.00", "total $5.00", "Total 5.00", "ToTaL   £12.34"] {
            assert!(parse_receipt_text(line).is_empty(), "line {line:?}");
        }
    }

    /// Realistic receipt with headers, payment lines and separators
    #[test]
    fn test_noisy_receipt() {
        init_logging();
        let text = r#"
            SAINSBURY'S SUPERMARKETS LTD
            Store 0412   Tel 0161 555 0199
            12/03/24  17:45
            ----------------------------
            CHEDDAR CHEESE (MATURE)      £2.75
            5000168001234 PORRIDGE OATS  £1.10
            3 x LEMONS                   £0.90
            Organic Carrots £0.70
            ****************************
            BALANCE DUE                  £5.45
            VISA DEBIT                   £5.45
            CHANGE                       £0.00
            THANK YOU FOR SHOPPING
        "#;

        let items = parse_receipt_text(text);

        assert_eq!(
            triples(&items),
            vec![
                ("Cheddar Cheese", "1", "pieces"),
                ("Porridge Oats", "1", "pieces"),
                ("Lemons", "3", "pieces"),
                ("Organic Carrots", "1", "pieces"),
            ]
        );
    }

    /// Huge weighed quantities merge without overflowing
    #[test]
    fn test_large_duplicate_quantities() {
        let line = "BANANAS 9000000000000000000 lbs @ $0.68/lb $1.48";
        let items = parse_receipt_text(&format!("{line}\n{line}"));

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, i64::MAX.to_string());
        assert_eq!(items[0].unit, "lb");
    }

    /// Digits at the start of a product name are part of the name
    #[test]
    fn test_name_starting_with_digits() {
        let items = parse_receipt_text("7UP 2L £1.50");

        assert_eq!(triples(&items), vec![("7up 2l", "1", "pieces")]);
    }

    /// Lines without a price are ignored
    #[test]
    fn test_unpriced_lines_dropped() {
        let items = parse_receipt_text("Fresh produce aisle\nAPPLES\nPEARS £1.20");

        assert_eq!(triples(&items), vec![("Pears", "1", "pieces")]);
    }

    /// Same text, same items (ids aside)
    #[test]
    fn test_deterministic() {
        let text = "AUBERGINE £0.95\nBANANAS 2.18 lbs @ $0.68/lb $1.48\n2 APPLES £2.50";
        let first = parse_receipt_text(text);
        let second = parse_receipt_text(text);

        assert_eq!(first.len(), second.len());
        assert!(first.iter().zip(&second).all(|(a, b)| a.same_item(b)));
    }

    /// Custom configuration changes the default unit and skip list
    #[test]
    fn test_custom_config() {
        let config = ReceiptConfig {
            default_unit: "each".to_string(),
            extra_skip_keywords: vec!["carrier bag".to_string()],
            ..Default::default()
        };
        let parser = ReceiptParser::with_config(config).unwrap();
        assert_eq!(parser.config().default_unit, "each");

        let items = parser.parse("CARRIER BAG £0.10\nPEPPERS £1.50");

        assert_eq!(triples(&items), vec![("Peppers", "1", "each")]);
    }

    /// Items serialize with string quantities for the pantry API
    #[test]
    fn test_item_serialization() {
        let items = parse_receipt_text("2 APPLES £2.50");
        let json = serde_json::to_value(&items[0]).unwrap();

        assert_eq!(json["name"], "Apples");
        assert_eq!(json["quantity"], "2");
        assert_eq!(json["unit"], "pieces");
        assert!(json["id"].as_str().unwrap().starts_with("receipt-"));
    }

    /// Receipt text can be read from a file
    #[test]
    fn test_parse_receipt_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "AUBERGINE £0.95").unwrap();
        writeln!(file, "TOTAL £0.95").unwrap();

        let items = parse_receipt_file(file.path()).unwrap();

        assert_eq!(triples(&items), vec![("Aubergine", "1", "pieces")]);
    }

    /// Missing files are an I/O error, not a panic
    #[test]
    fn test_parse_missing_file() {
        assert!(parse_receipt_file("/nonexistent/receipt.txt").is_err());
    }
}
