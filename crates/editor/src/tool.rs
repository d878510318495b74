use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{token}'")]
pub struct ParseTokenError {
    pub kind: &'static str,
    pub token: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tool {
    Select,
    #[default]
    Platform,
    Rock,
    Start,
    End,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::Select,
        Tool::Platform,
        Tool::Rock,
        Tool::Start,
        Tool::End,
    ];

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Platform => "platform",
            Self::Rock => "rock",
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

impl FromStr for Tool {
    type Err = ParseTokenError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_token() == raw)
            .ok_or_else(|| ParseTokenError {
                kind: "tool",
                token: raw.to_string(),
            })
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Rock sprite variants. The token doubles as the texture key and as the
/// `type` field of a saved rock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RockType {
    #[default]
    Rock,
    Rock1,
    Rock2,
    Rock3,
    Rock4,
    Rock5,
}

impl RockType {
    pub const ALL: [RockType; 6] = [
        RockType::Rock,
        RockType::Rock1,
        RockType::Rock2,
        RockType::Rock3,
        RockType::Rock4,
        RockType::Rock5,
    ];

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Rock1 => "rock1",
            Self::Rock2 => "rock2",
            Self::Rock3 => "rock3",
            Self::Rock4 => "rock4",
            Self::Rock5 => "rock5",
        }
    }

    pub fn sprite_key(self) -> &'static str {
        self.as_token()
    }
}

impl FromStr for RockType {
    type Err = ParseTokenError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rock_type| rock_type.as_token() == raw)
            .ok_or_else(|| ParseTokenError {
                kind: "rock type",
                token: raw.to_string(),
            })
    }
}

impl fmt::Display for RockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_tokens_parse_back() {
        for tool in Tool::ALL {
            assert_eq!(tool.as_token().parse::<Tool>(), Ok(tool));
        }
        let error = "eraser".parse::<Tool>().expect_err("unknown tool");
        assert_eq!(error.to_string(), "unknown tool 'eraser'");
    }

    #[test]
    fn rock_type_tokens_match_serde_names() {
        for rock_type in RockType::ALL {
            let json = serde_json::to_string(&rock_type).expect("serialize");
            assert_eq!(json, format!("\"{}\"", rock_type.as_token()));
            assert_eq!(rock_type.as_token().parse::<RockType>(), Ok(rock_type));
        }
        assert!("rock6".parse::<RockType>().is_err());
        assert!("Rock1".parse::<RockType>().is_err());
    }

    #[test]
    fn defaults_match_fresh_editor() {
        assert_eq!(Tool::default(), Tool::Platform);
        assert_eq!(RockType::default(), RockType::Rock);
    }
}
