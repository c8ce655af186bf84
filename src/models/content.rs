//! Generated content: one entry per tone, six text types each.

use serde::{Deserialize, Serialize};

use crate::error::{TokenError, TokenResult};
use crate::models::registry::{TextType, Tone, TONES, TYPES};

/// The six text variations for one tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    /// Primary heading.
    pub title: String,
    /// Supporting line.
    pub subtitle: String,
    /// Full explanation.
    pub description: String,
    /// Supplementary detail.
    pub caption: String,
    /// Shortest representation.
    pub abbreviation: String,
    /// Single emoji.
    pub emoji: String,
}

impl ContentEntry {
    /// Returns the text for the given type.
    pub fn text(&self, text_type: TextType) -> &str {
        match text_type {
            TextType::Title => &self.title,
            TextType::Subtitle => &self.subtitle,
            TextType::Description => &self.description,
            TextType::Caption => &self.caption,
            TextType::Abbreviation => &self.abbreviation,
            TextType::Emoji => &self.emoji,
        }
    }
}

/// Generated content for all six tones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMatrix {
    /// Neutral voice.
    pub neutral: ContentEntry,
    /// Formal voice.
    pub formal: ContentEntry,
    /// Playful voice.
    pub playful: ContentEntry,
    /// Minimal voice.
    pub minimal: ContentEntry,
    /// Witty voice.
    pub witty: ContentEntry,
    /// Quirky voice.
    pub quirky: ContentEntry,
}

impl ContentMatrix {
    /// Returns the entry for the given tone.
    pub fn entry(&self, tone: Tone) -> &ContentEntry {
        match tone {
            Tone::Neutral => &self.neutral,
            Tone::Formal => &self.formal,
            Tone::Playful => &self.playful,
            Tone::Minimal => &self.minimal,
            Tone::Witty => &self.witty,
            Tone::Quirky => &self.quirky,
        }
    }

    /// Returns the text cell for `(tone, type)`.
    pub fn cell(&self, tone: Tone, text_type: TextType) -> &str {
        self.entry(tone).text(text_type)
    }

    /// Checks that all 36 cells are non-empty.
    pub fn validate(&self) -> TokenResult<()> {
        let empty: Vec<String> = TONES
            .iter()
            .flat_map(|tone| {
                TYPES.iter().filter_map(move |ty| {
                    self.cell(tone.tone, ty.text_type)
                        .is_empty()
                        .then(|| format!("{}.{}", tone.full, ty.full))
                })
            })
            .collect();

        if empty.is_empty() {
            Ok(())
        } else {
            Err(TokenError::InvalidContent(format!(
                "empty cells: {}",
                empty.join(", ")
            )))
        }
    }

    /// Parses and validates a JSON payload.
    ///
    /// Surrounding whitespace is ignored. Missing tones or types, non-string
    /// cells and empty strings are all rejected.
    pub fn from_json(payload: &str) -> TokenResult<Self> {
        let matrix: Self = serde_json::from_str(payload.trim())
            .map_err(|e| TokenError::InvalidContent(e.to_string()))?;
        matrix.validate()?;
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_json() -> serde_json::Value {
        let entry = |p: &str| {
            json!({
                "title": format!("{p} title"),
                "subtitle": format!("{p} subtitle"),
                "description": format!("{p} description"),
                "caption": format!("{p} caption"),
                "abbreviation": "Ab",
                "emoji": "📊",
            })
        };
        json!({
            "neutral": entry("neutral"),
            "formal": entry("formal"),
            "playful": entry("playful"),
            "minimal": entry("minimal"),
            "witty": entry("witty"),
            "quirky": entry("quirky"),
        })
    }

    #[test]
    fn test_from_json_valid() {
        let matrix = ContentMatrix::from_json(&sample_json().to_string()).unwrap();
        assert_eq!(matrix.cell(Tone::Witty, TextType::Caption), "witty caption");
        assert_eq!(matrix.cell(Tone::Neutral, TextType::Emoji), "📊");
    }

    #[test]
    fn test_from_json_missing_tone() {
        let mut value = sample_json();
        value.as_object_mut().unwrap().remove("quirky");
        let err = ContentMatrix::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, TokenError::InvalidContent(_)));
    }

    #[test]
    fn test_from_json_non_string_cell() {
        let mut value = sample_json();
        value["formal"]["title"] = json!(42);
        assert!(ContentMatrix::from_json(&value.to_string()).is_err());
    }

    #[test]
    fn test_from_json_empty_cell_names_location() {
        let mut value = sample_json();
        value["minimal"]["caption"] = json!("");
        let err = ContentMatrix::from_json(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("minimal.caption"));
    }

    #[test]
    fn test_from_json_not_json() {
        assert!(ContentMatrix::from_json("Sure! Here is your content:").is_err());
    }
}
