//! The module contains the `StretchGoal` record.
//!
//! A stretch goal is locked or unlocked. The flag is derived from the owning
//! project's raised amount and is never set by a user action:
//!
//! ```rust
//! use engine::{MoneyCents, StretchGoal};
//!
//! let mut goal = StretchGoal::new("12345678", "SG1", MoneyCents::new(150_000), "Extra map");
//! assert!(goal.resolve(MoneyCents::new(150_000)));
//! assert!(goal.unlocked);
//! assert!(!goal.resolve(MoneyCents::new(150_000)));
//! ```

use serde::{Deserialize, Serialize};

use crate::{MoneyCents, store::Record};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StretchGoal {
    pub project_id: String,
    pub sg_id: String,
    pub threshold_amount: MoneyCents,
    pub description: String,
    #[serde(with = "flag")]
    pub unlocked: bool,
}

impl StretchGoal {
    /// A new goal always starts locked.
    pub fn new(
        project_id: impl Into<String>,
        sg_id: impl Into<String>,
        threshold_amount: MoneyCents,
        description: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            sg_id: sg_id.into(),
            threshold_amount,
            description: description.into(),
            unlocked: false,
        }
    }

    /// Sets `unlocked` from `raised_amount`; returns `true` if the flag flipped.
    pub fn resolve(&mut self, raised_amount: MoneyCents) -> bool {
        let unlocked = raised_amount >= self.threshold_amount;
        let changed = self.unlocked != unlocked;
        self.unlocked = unlocked;
        changed
    }

    /// Label shown in summaries.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.description.is_empty() {
            &self.sg_id
        } else {
            &self.description
        }
    }
}

impl Record for StretchGoal {
    const FILE: &'static str = "stretch_goals.csv";
    const FIELDS: &'static [&'static str] = &[
        "project_id",
        "sg_id",
        "threshold_amount",
        "description",
        "unlocked",
    ];
}

/// `"0"` / `"1"` encoding of a boolean column.
mod flag {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "1" } else { "0" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.trim() {
            "1" => Ok(true),
            "0" | "" => Ok(false),
            other => Err(de::Error::custom(format!("invalid flag '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_relocks_when_amount_drops() {
        let mut goal = StretchGoal::new("12345678", "SG1", MoneyCents::new(1000), "");
        assert!(goal.resolve(MoneyCents::new(1500)));
        assert!(goal.resolve(MoneyCents::new(999)));
        assert!(!goal.unlocked);
        assert_eq!(goal.label(), "SG1");
    }
}
