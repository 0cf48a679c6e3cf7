//! Character-level cleanup of extracted span text.

use unicode_normalization::UnicodeNormalization;

const LIGATURES: [(char, &str); 7] = [
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"), // long s + t
    ('\u{FB06}', "st"),
];

/// Text normalization applied to span text before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextNormalizer {
    /// Normalize Unicode to NFC form
    pub nfc: bool,

    /// Expand typographic ligatures (ﬁ → fi)
    pub fix_ligatures: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,
}

impl TextNormalizer {
    /// All cleanups enabled.
    pub fn new() -> Self {
        Self {
            nfc: true,
            fix_ligatures: true,
            remove_replacement_char: true,
        }
    }

    /// No-op normalizer.
    pub fn disabled() -> Self {
        Self {
            nfc: false,
            fix_ligatures: false,
            remove_replacement_char: false,
        }
    }

    /// Check if any cleanup is enabled.
    pub fn is_enabled(&self) -> bool {
        self.nfc || self.fix_ligatures || self.remove_replacement_char
    }

    /// Apply the enabled cleanups.
    pub fn normalize(&self, text: &str) -> String {
        let mut result: String = if self.nfc {
            text.nfc().collect()
        } else {
            text.to_string()
        };

        if self.fix_ligatures && result.chars().any(is_ligature) {
            let mut expanded = String::with_capacity(result.len() + 4);
            for c in result.chars() {
                match LIGATURES.iter().find(|(lig, _)| *lig == c) {
                    Some((_, replacement)) => expanded.push_str(replacement),
                    None => expanded.push(c),
                }
            }
            result = expanded;
        }

        if self.remove_replacement_char {
            result.retain(|c| c != '\u{FFFD}');
        }

        result
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ligature(c: char) -> bool {
    ('\u{FB00}'..='\u{FB06}').contains(&c)
}
