//! # Receipt Scan Example
//!
//! Parses a mixed UK/US receipt, then uses the conversion engine to check the
//! scanned stock against a recipe.

use pantry_core::conversion::{convert_units, format_quantity};
use pantry_core::pantry::{check_availability, deduct_usage, PantryItem, StockStatus};
use pantry_core::receipt_parser::parse_receipt_text;

fn main() {
    println!("🧾 Receipt Scan Example");
    println!("=======================\n");

    let receipt = r#"
    TESCO STORE 2041
    12/03/2024 14:22
    AUBERGINE                     £0.95
    2 APPLES £2.50
    5010044000707 SPAGHETTI (500G) £0.89
    BANANAS 2.18 lbs @ $0.68/lb $1.48
    Whole Milk £1.15
    WHOLE MILK £1.15
    ------------------------------
    SUBTOTAL £8.12
    CARD PAYMENT £8.12
    "#;

    let items = parse_receipt_text(receipt);
    println!("Found {} items:", items.len());
    for (i, item) in items.iter().enumerate() {
        println!("  {}. {}", i + 1, item);
    }

    println!("\n⚖️  Conversions");
    println!("---------------");
    for (qty, from, to, ingredient) in [
        (1.0, "cup", "g", "brown sugar"),
        (250.0, "g", "cups", "flour"),
        (2.0, "T", "tsp", ""),
        (3.0, "handful", "cup", "spinach"),
    ] {
        let converted = convert_units(qty, from, to, ingredient);
        println!(
            "  {} {} {} = {} {}",
            qty,
            from,
            ingredient,
            format_quantity(converted),
            to
        );
    }

    println!("\n🍌 Cooking with the scanned bananas");
    println!("-----------------------------------");
    if let Some(bananas) = items.iter().find(|item| item.name == "Bananas") {
        let stock = PantryItem::from(bananas.clone());
        match check_availability(&stock, 500.0, "g") {
            StockStatus::Sufficient => println!("  Enough bananas for 500 g"),
            StockStatus::Insufficient { shortfall } => {
                println!("  Short by {} {}", format_quantity(shortfall), stock.unit)
            }
        }
        let left = deduct_usage(&stock, 500.0, "g");
        println!("  Remaining after cooking: {} {}", left.quantity, left.unit);
    }
}
