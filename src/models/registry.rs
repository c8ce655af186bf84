//! Static tone and type catalogues.
//!
//! Both registries are ordered; that order drives token emission and the
//! order files are reported in.

use serde::{Deserialize, Serialize};

/// One of the six stylistic voices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Clear, direct, professional.
    Neutral,
    /// Authoritative, precise, institutional.
    Formal,
    /// Warm, friendly, enthusiastic.
    Playful,
    /// Extremely concise.
    Minimal,
    /// Clever, dry humor.
    Witty,
    /// Eccentric, personality-heavy.
    Quirky,
}

/// One of the six structural text kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextType {
    /// Primary heading.
    Title,
    /// Supporting line.
    Subtitle,
    /// Full explanation.
    Description,
    /// Supplementary detail.
    Caption,
    /// Shortest possible representation.
    Abbreviation,
    /// Single emoji.
    Emoji,
}

/// Catalogue entry for a tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneDefinition {
    /// Tone this entry describes.
    pub tone: Tone,
    /// Full lowercase name, used as the Language-layer group key.
    pub full: &'static str,
    /// Short code used in token keys.
    pub abbr: &'static str,
    /// Target Tone-layer file.
    pub file: &'static str,
}

/// Catalogue entry for a text type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDefinition {
    /// Type this entry describes.
    pub text_type: TextType,
    /// Full lowercase name.
    pub full: &'static str,
    /// Short code used in token keys.
    pub abbr: &'static str,
    /// Target Type-layer file.
    pub file: &'static str,
}

/// The Language-layer file holding literal strings.
pub const LANGUAGE_FILE: &str = "Language.English.tokens.json";

/// Registered tones, in emission order.
pub const TONES: [ToneDefinition; 6] = [
    ToneDefinition {
        tone: Tone::Neutral,
        full: "neutral",
        abbr: "neut",
        file: "Tone.Neutral.tokens.json",
    },
    ToneDefinition {
        tone: Tone::Formal,
        full: "formal",
        abbr: "form",
        file: "Tone.Formal.tokens.json",
    },
    ToneDefinition {
        tone: Tone::Playful,
        full: "playful",
        abbr: "play",
        file: "Tone.Playful.tokens.json",
    },
    ToneDefinition {
        tone: Tone::Minimal,
        full: "minimal",
        abbr: "mini",
        file: "Tone.Minimal.tokens.json",
    },
    ToneDefinition {
        tone: Tone::Witty,
        full: "witty",
        abbr: "witt",
        file: "Tone.Witty.tokens.json",
    },
    ToneDefinition {
        tone: Tone::Quirky,
        full: "quirky",
        abbr: "quirk",
        file: "Tone.Quirky.tokens.json",
    },
];

/// Registered text types, in emission order.
pub const TYPES: [TypeDefinition; 6] = [
    TypeDefinition {
        text_type: TextType::Title,
        full: "title",
        abbr: "title",
        file: "Type.Title.tokens.json",
    },
    TypeDefinition {
        text_type: TextType::Subtitle,
        full: "subtitle",
        abbr: "subt",
        file: "Type.Subtitle.tokens.json",
    },
    TypeDefinition {
        text_type: TextType::Description,
        full: "description",
        abbr: "desc",
        file: "Type.Description.tokens.json",
    },
    TypeDefinition {
        text_type: TextType::Caption,
        full: "caption",
        abbr: "capt",
        file: "Type.Caption.tokens.json",
    },
    TypeDefinition {
        text_type: TextType::Abbreviation,
        full: "abbreviation",
        abbr: "abbr",
        file: "Type.Abbreviation.tokens.json",
    },
    TypeDefinition {
        text_type: TextType::Emoji,
        full: "emoji",
        abbr: "emoji",
        file: "Type.Emoji.tokens.json",
    },
];

/// Looks up a tone by its abbreviation.
pub fn tone_by_abbr(abbr: &str) -> Option<&'static ToneDefinition> {
    TONES.iter().find(|t| t.abbr == abbr)
}

/// Looks up a text type by its abbreviation.
pub fn type_by_abbr(abbr: &str) -> Option<&'static TypeDefinition> {
    TYPES.iter().find(|t| t.abbr == abbr)
}

/// Looks up a tone by full name or abbreviation.
pub fn tone_by_name(name: &str) -> Option<&'static ToneDefinition> {
    TONES.iter().find(|t| t.full == name || t.abbr == name)
}

/// Looks up a text type by full name or abbreviation.
pub fn type_by_name(name: &str) -> Option<&'static TypeDefinition> {
    TYPES.iter().find(|t| t.full == name || t.abbr == name)
}

/// All 13 token files: Language, then Type files, then Tone files.
pub fn all_files() -> Vec<&'static str> {
    std::iter::once(LANGUAGE_FILE)
        .chain(TYPES.iter().map(|t| t.file))
        .chain(TONES.iter().map(|t| t.file))
        .collect()
}

impl Tone {
    /// Returns the registry entry for this tone.
    pub fn definition(self) -> &'static ToneDefinition {
        match self {
            Self::Neutral => &TONES[0],
            Self::Formal => &TONES[1],
            Self::Playful => &TONES[2],
            Self::Minimal => &TONES[3],
            Self::Witty => &TONES[4],
            Self::Quirky => &TONES[5],
        }
    }
}

impl TextType {
    /// Returns the registry entry for this type.
    pub fn definition(self) -> &'static TypeDefinition {
        match self {
            Self::Title => &TYPES[0],
            Self::Subtitle => &TYPES[1],
            Self::Description => &TYPES[2],
            Self::Caption => &TYPES[3],
            Self::Abbreviation => &TYPES[4],
            Self::Emoji => &TYPES[5],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_abbreviations_are_unique() {
        let tones: HashSet<_> = TONES.iter().map(|t| t.abbr).collect();
        let types: HashSet<_> = TYPES.iter().map(|t| t.abbr).collect();
        assert_eq!(tones.len(), 6);
        assert_eq!(types.len(), 6);
    }

    #[test]
    fn test_definition_matches_registry_slot() {
        for def in &TONES {
            assert_eq!(def.tone.definition(), def);
        }
        for def in &TYPES {
            assert_eq!(def.text_type.definition(), def);
        }
    }

    #[test]
    fn test_lookup_by_abbr_and_name() {
        assert_eq!(tone_by_abbr("quirk").map(|t| t.tone), Some(Tone::Quirky));
        assert_eq!(type_by_abbr("subt").map(|t| t.full), Some("subtitle"));
        assert!(type_by_abbr("subtitle").is_none());
        assert_eq!(type_by_name("subtitle").map(|t| t.abbr), Some("subt"));
        assert_eq!(tone_by_name("witt").map(|t| t.full), Some("witty"));
        assert!(tone_by_name("grumpy").is_none());
    }

    #[test]
    fn test_all_files_order() {
        let files = all_files();
        assert_eq!(files.len(), 13);
        assert_eq!(files[0], "Language.English.tokens.json");
        assert_eq!(files[1], "Type.Title.tokens.json");
        assert_eq!(files[6], "Type.Emoji.tokens.json");
        assert_eq!(files[7], "Tone.Neutral.tokens.json");
        assert_eq!(files[12], "Tone.Quirky.tokens.json");
    }
}
