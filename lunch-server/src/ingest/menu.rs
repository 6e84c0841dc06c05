//! Menu payload parsing
//!
//! Expected shape:
//!
//! ```json
//! {
//!   "menu_items": [
//!     { "name": "SPATEN", "description": "lager", "volume": "500 ml", "price": 290 }
//!   ]
//! }
//! ```
//!
//! The category label is collected by the preceding conversation step and
//! applied to the whole batch by the caller; it is not part of the
//! payload. Items missing a name or a positive price are skipped with a
//! warning, in order, without aborting the batch.

use super::{IngestError, SkippedEntry};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct MenuEnvelope {
    #[serde(default)]
    menu_items: Vec<MenuItemPayload>,
}

#[derive(Debug, Deserialize)]
struct MenuItemPayload {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    volume: Option<String>,
    #[serde(default)]
    price: Option<f64>,
}

/// One menu item produced from a payload entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMenuItem {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
}

/// Result of a successful menu payload parse. Item order follows the
/// payload.
#[derive(Debug, Clone)]
pub struct ParsedMenu {
    pub items: Vec<ParsedMenuItem>,
    pub skipped: Vec<SkippedEntry>,
}

/// Parse a menu payload into items.
pub fn parse_menu(text: &str) -> Result<ParsedMenu, IngestError> {
    let envelope: MenuEnvelope =
        serde_json::from_str(text).map_err(|e| IngestError::Syntax(e.to_string()))?;
    if envelope.menu_items.is_empty() {
        return Err(IngestError::Payload("No menu items in the payload".into()));
    }

    let mut items = Vec::new();
    let mut skipped = Vec::new();
    for (index, entry) in envelope.menu_items.into_iter().enumerate() {
        let label = match entry.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => format!("item #{}", index + 1),
        };

        let name = match entry.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                skipped.push(SkippedEntry::new(label, "missing name"));
                continue;
            }
        };
        let price = match entry.price {
            Some(price) if price > 0.0 => price,
            _ => {
                skipped.push(SkippedEntry::new(label, "missing or non-positive price"));
                continue;
            }
        };

        // Volume folds into the description
        let description = match (
            entry.description.filter(|d| !d.trim().is_empty()),
            entry.volume.filter(|v| !v.trim().is_empty()),
        ) {
            (Some(description), Some(volume)) => Some(format!("{description}, {volume}")),
            (Some(description), None) => Some(description),
            (None, Some(volume)) => Some(volume),
            (None, None) => None,
        };

        items.push(ParsedMenuItem {
            name,
            price,
            description,
        });
    }

    Ok(ParsedMenu { items, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_item_is_skipped_and_order_preserved() {
        let text = r#"{"menu_items":[
            {"name":"SPATEN","description":"lager","volume":"500 ml","price":290},
            {"name":"HOEGAARDEN","price":0},
            {"name":"GUINNESS","volume":"440 ml","price":350}
        ]}"#;
        let parsed = parse_menu(text).expect("valid payload");
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.items[0].name, "SPATEN");
        assert_eq!(parsed.items[1].name, "GUINNESS");
        assert_eq!(parsed.skipped[0].label, "HOEGAARDEN");
    }

    #[test]
    fn volume_is_folded_into_the_description() {
        let text = r#"{"menu_items":[
            {"name":"A","description":"light","volume":"500 ml","price":100},
            {"name":"B","volume":"300 ml","price":100},
            {"name":"C","description":"dark","price":100},
            {"name":"D","price":100}
        ]}"#;
        let parsed = parse_menu(text).expect("valid payload");
        let descriptions: Vec<Option<&str>> = parsed
            .items
            .iter()
            .map(|i| i.description.as_deref())
            .collect();
        assert_eq!(
            descriptions,
            vec![Some("light, 500 ml"), Some("300 ml"), Some("dark"), None]
        );
    }

    #[test]
    fn missing_name_is_skipped_with_a_positional_label() {
        let text = r#"{"menu_items":[
            {"price":100},
            {"name":"B","price":100}
        ]}"#;
        let parsed = parse_menu(text).expect("valid payload");
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.skipped[0].label, "item #1");
        assert_eq!(parsed.skipped[0].reason, "missing name");
    }

    #[test]
    fn empty_item_list_is_fatal() {
        assert!(matches!(
            parse_menu(r#"{"menu_items":[]}"#),
            Err(IngestError::Payload(_))
        ));
        assert!(matches!(
            parse_menu(r#"{}"#),
            Err(IngestError::Payload(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_syntax_error() {
        assert!(matches!(
            parse_menu("menu_items: nope"),
            Err(IngestError::Syntax(_))
        ));
    }
}
