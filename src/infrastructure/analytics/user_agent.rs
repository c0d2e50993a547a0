//! User-agent parsing backed by woothee.

use woothee::parser::Parser;

use crate::domain::entities::{ClientInfo, UNKNOWN};
use crate::domain::enrichment::{SignatureParseError, SignatureParser};

const WOOTHEE_UNKNOWN: &str = "UNKNOWN";

/// [`SignatureParser`] using woothee's user-agent database.
#[derive(Debug, Default, Clone, Copy)]
pub struct WootheeParser;

impl WootheeParser {
    pub fn new() -> Self {
        Self
    }
}

impl SignatureParser for WootheeParser {
    fn parse(&self, raw: &str) -> Result<ClientInfo, SignatureParseError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(SignatureParseError::Empty);
        }

        let parser = Parser::new();
        let result = parser
            .parse(raw)
            .ok_or(SignatureParseError::Unrecognized)?;

        if result.name == WOOTHEE_UNKNOWN && result.os == WOOTHEE_UNKNOWN {
            return Err(SignatureParseError::Unrecognized);
        }

        Ok(ClientInfo::new(
            known_or_unknown(&result.name),
            known_or_unknown(&result.os),
            device_class(&result.category, raw),
        ))
    }
}

fn known_or_unknown(value: &str) -> String {
    if value.is_empty() || value == WOOTHEE_UNKNOWN {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

/// Maps woothee's category onto the desktop/mobile/tablet/bot vocabulary.
fn device_class(category: &str, raw: &str) -> &'static str {
    match category {
        "pc" => "desktop",
        "smartphone" | "mobilephone" if raw.contains("iPad") || raw.contains("Tablet") => {
            "tablet"
        }
        "smartphone" | "mobilephone" => "mobile",
        "crawler" => "bot",
        _ => UNKNOWN,
    }
}
