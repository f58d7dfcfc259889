use std::{fmt, path::PathBuf, str::FromStr};

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::{
    EngineError, EngineObserver, Pledge, Project, RecordStore, ResultEngine, RewardTier,
    StretchGoal, TracingObserver, User,
};

mod access;
mod pledges;
mod projects;
mod statistics;
mod stretch;
mod tiers;

/// Feature set the engine runs with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Projects, reward tiers and pledges.
    #[default]
    Basic,
    /// Basic plus stretch goals recomputed after every pledge.
    Stretch,
}

impl Mode {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Mode::Basic => "Basic",
            Mode::Stretch => "Stretch",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Mode::Basic),
            "stretch" => Ok(Mode::Stretch),
            other => Err(EngineError::Validation(format!("unknown mode '{other}'"))),
        }
    }
}

pub struct Engine {
    store: RecordStore,
    mode: Mode,
    observer: Box<dyn EngineObserver>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("store", &self.store)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Data directory used when the builder is not given one.
    pub const DEFAULT_DATA_DIR: &'static str = "Database";

    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Mirror the outcome of a mutation to the observer and hand it back.
    fn finish<T>(&self, result: ResultEngine<T>) -> ResultEngine<T> {
        match &result {
            Ok(_) => self.observer.data_changed(),
            Err(err) => self.observer.error_occurred(&err.to_string()),
        }
        result
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Local time truncated to whole seconds, the precision pledges are stored with.
fn now() -> NaiveDateTime {
    truncate_to_seconds(Local::now().naive_local())
}

fn truncate_to_seconds(at: NaiveDateTime) -> NaiveDateTime {
    at.with_nanosecond(0).unwrap_or(at)
}

fn normalize_required(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    data_dir: Option<PathBuf>,
    mode: Mode,
    observer: Option<Box<dyn EngineObserver>>,
}

impl EngineBuilder {
    /// Directory holding the CSV collections (default `Database`).
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> EngineBuilder {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn mode(mut self, mode: Mode) -> EngineBuilder {
        self.mode = mode;
        self
    }

    /// Receiver of data-changed / error notifications (default: `TracingObserver`).
    pub fn observer(mut self, observer: impl EngineObserver + 'static) -> EngineBuilder {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Construct `Engine`, creating any collection the mode needs.
    pub fn build(self) -> ResultEngine<Engine> {
        let dir = self
            .data_dir
            .unwrap_or_else(|| PathBuf::from(Engine::DEFAULT_DATA_DIR));
        let store = RecordStore::open(dir)?;

        store.ensure_schema::<Project>()?;
        store.ensure_schema::<RewardTier>()?;
        store.ensure_schema::<Pledge>()?;
        store.ensure_schema::<User>()?;
        if self.mode == Mode::Stretch {
            store.ensure_schema::<StretchGoal>()?;
        }
        tracing::info!(dir = %store.dir().display(), mode = %self.mode, "engine ready");

        Ok(Engine {
            store,
            mode: self.mode,
            observer: self
                .observer
                .unwrap_or_else(|| Box::new(TracingObserver)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Stretch".parse::<Mode>().unwrap(), Mode::Stretch);
        assert_eq!(" basic ".parse::<Mode>().unwrap(), Mode::Basic);
        assert!("turbo".parse::<Mode>().is_err());
    }

    #[test]
    fn truncation_drops_sub_seconds() {
        let at = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_milli_opt(9, 30, 15, 750)
            .unwrap();
        assert_eq!(truncate_to_seconds(at).to_string(), "2026-10-16 09:30:15");
    }

    #[test]
    fn required_text_is_trimmed() {
        assert_eq!(normalize_required("  Board game ", "name").unwrap(), "Board game");
        assert_eq!(
            normalize_required("   ", "name"),
            Err(EngineError::Validation("name must not be empty".to_string()))
        );
    }
}
