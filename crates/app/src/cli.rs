use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use engine::{Mode, MoneyCents};

#[derive(Parser, Debug)]
#[command(name = "crowdfund")]
#[command(about = "Track crowdfunding projects, reward tiers and pledges")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the data directory holding the CSV collections.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    /// Override the engine mode (`basic` or `stretch`).
    #[arg(long, global = true)]
    pub mode: Option<Mode>,
    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Project(Project),
    Tier(Tier),
    Pledge(Pledge),
    Stretch(Stretch),
    User(User),
    /// Summary of every project and pledge outcome.
    Stats,
}

#[derive(Args, Debug)]
pub struct Project {
    #[command(subcommand)]
    pub command: ProjectCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    Create(ProjectCreateArgs),
    /// List projects, closest deadline first.
    List,
    Show(ProjectIdArgs),
    Funded(ProjectIdArgs),
}

#[derive(Args, Debug)]
pub struct ProjectCreateArgs {
    /// Eight digit project code, not starting with 0.
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub goal: MoneyCents,
    /// Last day pledges are accepted (YYYY-MM-DD).
    #[arg(long)]
    pub deadline: NaiveDate,
}

#[derive(Args, Debug)]
pub struct ProjectIdArgs {
    #[arg(long)]
    pub id: String,
}

#[derive(Args, Debug)]
pub struct Tier {
    #[command(subcommand)]
    pub command: TierCommand,
}

#[derive(Subcommand, Debug)]
pub enum TierCommand {
    Add(TierAddArgs),
}

#[derive(Args, Debug)]
pub struct TierAddArgs {
    #[arg(long)]
    pub project: String,
    #[arg(long)]
    pub tier_id: String,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub minimum: MoneyCents,
    #[arg(long)]
    pub quota: u32,
}

#[derive(Args, Debug)]
pub struct Pledge {
    #[command(subcommand)]
    pub command: PledgeCommand,
}

#[derive(Subcommand, Debug)]
pub enum PledgeCommand {
    Add(PledgeAddArgs),
}

#[derive(Args, Debug)]
pub struct PledgeAddArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long, env = "CROWDFUND_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long)]
    pub project: String,
    #[arg(long)]
    pub amount: MoneyCents,
    #[arg(long)]
    pub tier: Option<String>,
    /// Pledge time (YYYY-MM-DDTHH:MM:SS); defaults to now.
    #[arg(long)]
    pub at: Option<NaiveDateTime>,
    /// Pledge id; a random UUID when omitted.
    #[arg(long)]
    pub pledge_id: Option<String>,
}

#[derive(Args, Debug)]
pub struct Stretch {
    #[command(subcommand)]
    pub command: StretchCommand,
}

#[derive(Subcommand, Debug)]
pub enum StretchCommand {
    /// Add at least three goals, each as `ID:THRESHOLD:DESCRIPTION`.
    Add(StretchAddArgs),
    List(StretchListArgs),
}

#[derive(Args, Debug)]
pub struct StretchAddArgs {
    #[arg(long)]
    pub project: String,
    #[arg(long = "goal", required = true)]
    pub goals: Vec<String>,
}

#[derive(Args, Debug)]
pub struct StretchListArgs {
    #[arg(long)]
    pub project: String,
}

#[derive(Args, Debug)]
pub struct User {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    Add(UserAddArgs),
}

#[derive(Args, Debug)]
pub struct UserAddArgs {
    #[arg(long)]
    pub user_id: String,
    #[arg(long)]
    pub username: String,
    #[arg(long, env = "CROWDFUND_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long)]
    pub display_name: Option<String>,
}
