//! The structured ad record consumed by the layout engine.
//!
//! An [`AdRecord`] is produced by an external generation step (an LLM, a
//! form, a fixture). Every field is optional: absence is represented as an
//! empty string or empty list, never as placeholder text. The layout engine
//! skips empty fields entirely — they contribute no height and no spacing.

use serde::{Deserialize, Serialize};

/// One ad's worth of text, all fields optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdRecord {
    /// Brand/company name, drawn in the top band.
    #[serde(default)]
    pub company_name: String,
    /// Large headline, drawn first in the middle band.
    #[serde(default)]
    pub headline: String,
    /// Body copy.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub call_to_action: String,
    /// Hashtags, joined with single spaces for layout.
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub website: String,
}

impl AdRecord {
    /// The hashtags as a single space-joined line of text.
    pub fn hashtags_line(&self) -> String {
        self.hashtags.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hashtags_join_with_spaces() {
        let ad = AdRecord {
            hashtags: vec!["#Sale".into(), "#Weekend".into()],
            ..Default::default()
        };
        assert_eq!(ad.hashtags_line(), "#Sale #Weekend");
    }

    #[test]
    fn empty_hashtags_join_to_empty() {
        assert_eq!(AdRecord::default().hashtags_line(), "");
    }

    #[test]
    fn missing_fields_deserialize_to_empty() {
        let ad: AdRecord = serde_json::from_str(r#"{"headline": "Big Sale"}"#).unwrap();
        assert_eq!(ad.headline, "Big Sale");
        assert_eq!(ad.company_name, "");
        assert!(ad.hashtags.is_empty());
    }

    #[test]
    fn explicit_empty_equals_omitted() {
        let explicit: AdRecord =
            serde_json::from_str(r#"{"headline": "Hi", "location": ""}"#).unwrap();
        let omitted: AdRecord = serde_json::from_str(r#"{"headline": "Hi"}"#).unwrap();
        assert_eq!(explicit, omitted);
    }
}
