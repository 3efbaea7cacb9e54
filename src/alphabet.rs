use crate::error::{ConvertError, Result};

/// Character classes of the OCR dataset: digits first, then `A`-`Z`.
pub const OCR_CLASSES: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Ordered lookup table mapping plate characters to YOLO class ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrAlphabet {
    symbols: Vec<char>,
}

impl Default for OcrAlphabet {
    fn default() -> Self {
        Self {
            symbols: OCR_CLASSES.chars().collect(),
        }
    }
}

impl OcrAlphabet {
    /// Class id of a single-character `char_id`.
    pub fn index_of(&self, char_id: &str) -> Result<usize> {
        let mut chars = char_id.chars();
        let found = match (chars.next(), chars.next()) {
            (Some(c), None) => self.symbols.iter().position(|&s| s == c),
            _ => None,
        };
        found.ok_or_else(|| ConvertError::UnknownCharacter {
            char_id: char_id.to_string(),
        })
    }

    /// Class names in id order.
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        self.symbols.iter().map(|c| c.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_of() {
        let alphabet = OcrAlphabet::default();
        assert_eq!(alphabet.names().count(), 36);
        assert_eq!(alphabet.index_of("0").unwrap(), 0);
        assert_eq!(alphabet.index_of("9").unwrap(), 9);
        assert_eq!(alphabet.index_of("A").unwrap(), 10);
        assert_eq!(alphabet.index_of("Z").unwrap(), 35);
    }

    #[test]
    fn test_index_of_rejects_unknown() {
        let alphabet = OcrAlphabet::default();
        for bad in ["a", "-", "", "AB", "Ñ"] {
            assert!(
                matches!(
                    alphabet.index_of(bad),
                    Err(ConvertError::UnknownCharacter { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }
}
