//! Funding engine for crowdfunding projects.
//!
//! The engine validates and applies pledges against projects, keeps the raised
//! amount of every project in sync, hands out limited reward tiers and, in
//! [`Mode::Stretch`], unlocks stretch goals as the raised amount grows. All
//! state lives in CSV collections inside one data directory.
//!
//! ```no_run
//! use engine::{Engine, Mode, PledgeCmd};
//!
//! # fn main() -> Result<(), engine::EngineError> {
//! let engine = Engine::builder().data_dir("Database").mode(Mode::Basic).build()?;
//! let pledge = engine.add_pledge(PledgeCmd::new("p-1", "u-1", "12345678", "25.00".parse()?))?;
//! println!("pledged {}", pledge.amount);
//! # Ok(())
//! # }
//! ```

pub use commands::PledgeCmd;
pub use error::EngineError;
pub use money::MoneyCents;
pub use observer::{EngineObserver, TracingObserver};
pub use ops::{Engine, EngineBuilder, Mode};
pub use pledges::Pledge;
pub use projects::{PROJECT_ID_LEN, Project};
pub use reward_tiers::RewardTier;
pub use statistics::{FundingStatistics, ProjectStatistics};
pub use store::{Record, RecordStore, StoreError};
pub use stretch_goals::StretchGoal;
pub use users::{Session, User};

mod commands;
mod error;
mod money;
mod observer;
mod ops;
mod pledges;
mod projects;
mod reward_tiers;
mod statistics;
mod store;
mod stretch_goals;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
