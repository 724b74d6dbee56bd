//! Spend extraction from chat messages and merchant clean-up.

use once_cell::sync::Lazy;
use regex::Regex;
use smartspend_domain::SpendCategory;

static SPEND_MESSAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:spent|paid)\s+\$?(?P<amount>\d+(?:\.\d{2})?)\s+(?:on|for)\s+(?P<category>[\w\s]+?)\s+(?:at|via|to)\s+(?P<merchant>.+)",
    )
    .expect("valid spend message pattern")
});

/// Spend details recognised in a free-text message.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedSpend {
    pub amount: f64,
    /// Title-cased category words as written; may fall outside [`SpendCategory`].
    pub category: String,
    pub merchant: String,
}

impl ExtractedSpend {
    /// Resolves the category, falling back to the merchant's known category.
    pub fn spend_category(&self) -> Option<SpendCategory> {
        self.category
            .parse()
            .ok()
            .or_else(|| normalize_merchant(&self.merchant).1)
    }
}

/// Recognises "Spent $50 on Dining at Walmart" / "Paid $20 for Taxi via Uber".
pub fn extract_spend(message: &str) -> Option<ExtractedSpend> {
    let caps = SPEND_MESSAGE.captures(message)?;
    let amount = caps.name("amount")?.as_str().parse::<f64>().ok()?;
    let category = title_case(caps.name("category")?.as_str());
    let merchant = title_case(caps.name("merchant")?.as_str());
    Some(ExtractedSpend {
        amount,
        category,
        merchant,
    })
}

/// Canonical merchant name plus the category it implies, when recognised.
pub fn normalize_merchant(merchant: &str) -> (String, Option<SpendCategory>) {
    let lowered = merchant.to_lowercase();
    if lowered.contains("uber") {
        ("Uber".into(), Some(SpendCategory::Transportation))
    } else if lowered.contains("whole foods") {
        (merchant.trim().to_string(), Some(SpendCategory::Groceries))
    } else if lowered.contains("burger") {
        (merchant.trim().to_string(), Some(SpendCategory::Dining))
    } else if lowered.contains("amazon") {
        (merchant.trim().to_string(), Some(SpendCategory::Shopping))
    } else {
        (merchant.trim().to_string(), None)
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
