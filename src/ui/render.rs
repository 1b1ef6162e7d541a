//! Plain-text rendering of the analysis view.

use std::fmt;

use serde_json::Value;

use crate::acquisition::ImagePayload;
use crate::inference::{MenuResult, ParsedOutput, ProductResult};
use crate::ui::analysis::AnalysisState;

/// Width of the price-aligned menu rows.
const LINE_WIDTH: usize = 44;

/// Render the current view state as a short text screen.
pub fn render_state(state: &AnalysisState) -> String {
    match state {
        AnalysisState::Idle => "Select a photo of a menu or product to analyze.\n".to_string(),
        AnalysisState::Processing { .. } => "Analyzing...\n".to_string(),
        AnalysisState::Result(output) => render_output(output),
        AnalysisState::Error(failure) => format!("Analysis failed: {}\n", failure),
    }
}

/// Render a result card.
pub fn render_output(output: &ParsedOutput) -> String {
    match output {
        ParsedOutput::Menu(menu) => MenuCard(menu).to_string(),
        ParsedOutput::Product(product) => ProductCard(product).to_string(),
    }
}

/// Render a result card headed by the photo it was produced from.
pub fn render_result(output: &ParsedOutput, photo: &ImagePayload) -> String {
    format!(
        "Photo: {} ({} bytes)\n\n{}",
        photo.mime_type(),
        photo.byte_len(),
        render_output(output)
    )
}

/// Encode a result as pretty JSON with the photo's data URI under `preview`.
pub fn render_json(output: &ParsedOutput, photo: &ImagePayload) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(output)?;
    if let Value::Object(fields) = &mut value {
        fields.insert("preview".to_string(), Value::String(photo.data_uri()));
    }
    serde_json::to_string_pretty(&value)
}

struct MenuCard<'a>(&'a MenuResult);

impl fmt::Display for MenuCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let menu = self.0;
        writeln!(f, "{}", menu.title)?;

        for section in &menu.sections {
            writeln!(f)?;
            writeln!(f, "● {}", section.category.to_uppercase())?;
            for item in &section.items {
                let used = item.name.chars().count() + item.price.chars().count();
                let pad = LINE_WIDTH.saturating_sub(used).max(1);
                writeln!(f, "  {}{}{}", item.name, " ".repeat(pad), item.price)?;
            }
        }

        Ok(())
    }
}

struct ProductCard<'a>(&'a ProductResult);

impl fmt::Display for ProductCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let product = self.0;

        match &product.brand {
            Some(brand) if !brand.is_empty() => writeln!(f, "{} {}", brand, product.name)?,
            _ => writeln!(f, "{}", product.name)?,
        }

        if let Some(range) = &product.price_range {
            writeln!(f, "Price: {}", range)?;
        }

        writeln!(f)?;
        writeln!(f, "“{}”", product.market_review)?;

        let feedback = &product.user_feedback;
        for (label, entries) in [("Pros", &feedback.pros), ("Cons", &feedback.cons)] {
            if entries.is_empty() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "{}:", label)?;
            for entry in entries {
                writeln!(f, "  - {}", entry)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{
        AnalysisFailure, FailureKind, MenuItem, MenuSection, UserFeedback,
    };

    #[test]
    fn menu_lists_categories_and_prices() {
        let output = ParsedOutput::Menu(MenuResult {
            title: "Izakaya".into(),
            sections: vec![MenuSection {
                category: "Drinks".into(),
                items: vec![MenuItem {
                    name: "Highball".into(),
                    price: "¥500".into(),
                }],
            }],
        });

        let text = render_output(&output);
        assert!(text.starts_with("Izakaya\n"));
        assert!(text.contains("● DRINKS"));
        let row = text.lines().find(|l| l.contains("Highball")).unwrap();
        assert!(row.trim_end().ends_with("¥500"));
    }

    #[test]
    fn product_shows_review_and_feedback() {
        let output = ParsedOutput::Product(ProductResult {
            name: "Kettle".into(),
            brand: Some("Acme".into()),
            price_range: None,
            market_review: "Reliable".into(),
            user_feedback: UserFeedback {
                pros: vec!["Boils fast".into()],
                cons: vec![],
            },
        });

        let text = render_output(&output);
        assert!(text.starts_with("Acme Kettle\n"));
        assert!(text.contains("“Reliable”"));
        assert!(text.contains("  - Boils fast"));
        assert!(!text.contains("Cons:"));
        assert!(!text.contains("Price:"));
    }

    #[test]
    fn error_state_reports_failure() {
        let state = AnalysisState::Error(AnalysisFailure {
            kind: FailureKind::CallExhausted,
            message: "gave up".into(),
        });
        assert_eq!(render_state(&state), "Analysis failed: gave up\n");
    }

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn menu_output() -> ParsedOutput {
        ParsedOutput::Menu(MenuResult {
            title: "Bistro".into(),
            sections: vec![],
        })
    }

    #[test]
    fn result_is_headed_by_photo() {
        let photo = ImagePayload::from_bytes(PNG_MAGIC).unwrap();
        let text = render_result(&menu_output(), &photo);
        assert!(text.starts_with("Photo: image/png (16 bytes)\n\nBistro\n"));
    }

    #[test]
    fn json_carries_preview_data_uri() {
        let photo = ImagePayload::from_bytes(PNG_MAGIC).unwrap();
        let json = render_json(&menu_output(), &photo).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "menu");
        assert_eq!(value["title"], "Bistro");
        assert_eq!(value["preview"], photo.data_uri());
    }

    #[test]
    fn idle_prompts_for_photo() {
        assert!(render_state(&AnalysisState::Idle).contains("Select a photo"));
    }
}
