use std::fmt;

use serde::{Deserialize, Serialize};
use shiori_core::types::PitchCandidate;

use crate::kana::mora_count;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchPattern {
    /// Character offset at which the pitch falls, 0 when it never does
    pub drop_position: u32,
    pub pattern_type: PatternType,
}

impl PitchPattern {
    /// Classify a drop position against the reading it belongs to.
    ///
    /// The offset counts characters; the type is decided on the mora the
    /// fall follows, so `キョ` before the fall is one mora.
    pub fn from_drop_position(drop: u32, reading: &str) -> Self {
        let before_fall: String = reading.chars().take(drop as usize).collect();
        let mora = mora_count(&before_fall);
        let morae = mora_count(reading);

        let pattern_type = match drop {
            0 => PatternType::Heiban,
            _ if mora <= 1 => PatternType::Atamadaka,
            _ if mora == morae => PatternType::Odaka,
            _ => PatternType::Nakadaka,
        };

        Self {
            drop_position: drop,
            pattern_type,
        }
    }

    pub fn from_candidate(candidate: &PitchCandidate) -> Self {
        Self::from_drop_position(candidate.drop, &candidate.plain_reading())
    }

    /// Bracketed marker, e.g. `[2]`
    pub fn to_notation(&self) -> String {
        format!("[{}]", self.drop_position)
    }

    pub fn type_name(&self) -> &'static str {
        self.pattern_type.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternType {
    /// 平板式, no fall
    Heiban,
    /// 頭高型, falls after the first mora
    Atamadaka,
    /// 中高型, falls inside the word
    Nakadaka,
    /// 尾高型, falls after the last mora
    Odaka,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::Heiban => "平板式",
            PatternType::Atamadaka => "頭高型",
            PatternType::Nakadaka => "中高型",
            PatternType::Odaka => "尾高型",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
