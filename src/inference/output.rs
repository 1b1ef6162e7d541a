//! Typed analysis results.
//!
//! The model replies with one of two JSON shapes, told apart by the `kind`
//! field.

use serde::{Deserialize, Serialize};

/// Parsed model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParsedOutput {
    Menu(MenuResult),
    Product(ProductResult),
}

/// A translated menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuResult {
    pub title: String,
    pub sections: Vec<MenuSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSection {
    pub category: String,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: String,
}

/// A product review card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResult {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    pub market_review: String,
    pub user_feedback: UserFeedback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFeedback {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

impl ParsedOutput {
    /// Discriminator value as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            ParsedOutput::Menu(_) => "menu",
            ParsedOutput::Product(_) => "product",
        }
    }

    /// Headline shown at the top of the result card.
    pub fn headline(&self) -> &str {
        match self {
            ParsedOutput::Menu(menu) => &menu.title,
            ParsedOutput::Product(product) => &product.name,
        }
    }
}
