use std::fmt;

use thiserror::Error;

pub const SPRITE_KEY_MAX_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpriteKeyError {
    #[error("sprite key must not be empty")]
    Empty,
    #[error("sprite key is {len} characters long (max {max})")]
    TooLong { len: usize, max: usize },
    #[error("sprite key must start with a lowercase letter, found '{character}'")]
    LeadingCharacter { character: char },
    #[error("sprite key contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

/// Texture key for a loaded sprite sheet, e.g. `rock3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteKey(String);

impl SpriteKey {
    pub fn parse(raw: &str) -> Result<Self, SpriteKeyError> {
        let mut chars = raw.chars();
        let first = chars.next().ok_or(SpriteKeyError::Empty)?;
        if raw.len() > SPRITE_KEY_MAX_LEN {
            return Err(SpriteKeyError::TooLong {
                len: raw.len(),
                max: SPRITE_KEY_MAX_LEN,
            });
        }
        if !first.is_ascii_lowercase() {
            return Err(SpriteKeyError::LeadingCharacter { character: first });
        }
        if let Some(character) = chars.find(|ch| !is_key_char(*ch)) {
            return Err(SpriteKeyError::InvalidCharacter { character });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpriteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_key_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_texture_keys() {
        for key in ["rock", "rock5", "jet_body", "bg-far"] {
            let parsed = SpriteKey::parse(key).expect("valid key");
            assert_eq!(parsed.as_str(), key);
        }
    }

    #[test]
    fn rejects_malformed_keys() {
        assert_eq!(SpriteKey::parse(""), Err(SpriteKeyError::Empty));
        assert_eq!(
            SpriteKey::parse("3rock"),
            Err(SpriteKeyError::LeadingCharacter { character: '3' })
        );
        assert_eq!(
            SpriteKey::parse("rock.png"),
            Err(SpriteKeyError::InvalidCharacter { character: '.' })
        );
        assert_eq!(
            SpriteKey::parse("rocks/big"),
            Err(SpriteKeyError::InvalidCharacter { character: '/' })
        );
        let long = "r".repeat(SPRITE_KEY_MAX_LEN + 1);
        assert!(matches!(
            SpriteKey::parse(&long),
            Err(SpriteKeyError::TooLong { .. })
        ));
    }
}
