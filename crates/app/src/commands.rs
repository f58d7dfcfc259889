//! Runs a parsed command against the engine and prints the outcome.

use engine::{
    Engine, EngineError, Mode, MoneyCents, PledgeCmd, Project, RewardTier, StretchGoal,
};
use serde::Serialize;

use crate::{
    cli::{
        Command, PledgeAddArgs, PledgeCommand, ProjectCommand, StretchCommand, TierCommand,
        UserCommand,
    },
    error::{AppError, Result},
};

pub fn dispatch(engine: &Engine, command: Command, json: bool) -> Result<()> {
    match command {
        Command::Project(project) => match project.command {
            ProjectCommand::Create(args) => {
                let project = engine.create_project(&args.id, &args.name, args.goal, args.deadline)?;
                emit(json, &project, || format!("created project {}", project.project_id))
            }
            ProjectCommand::List => {
                let mut projects = engine.list_projects()?;
                projects.sort_by(|a, b| a.deadline.cmp(&b.deadline));
                emit(json, &projects, || {
                    let mut out = format!(
                        "{:<10} {:<24} {:>12} {:<12} {:>12}",
                        "ID", "NAME", "GOAL", "DEADLINE", "RAISED"
                    );
                    for p in &projects {
                        out.push_str(&format!(
                            "\n{:<10} {:<24} {:>12} {:<12} {:>12}",
                            p.project_id, p.name, p.goal_amount, p.deadline, p.raised_amount
                        ));
                    }
                    out
                })
            }
            ProjectCommand::Show(args) => show_project(engine, &args.id, json),
            ProjectCommand::Funded(args) => {
                let funded = engine.is_funded(&args.id)?;
                let label = if funded { "funded" } else { "not funded" };
                emit(json, &funded, || label.to_string())
            }
        },
        Command::Tier(tier) => match tier.command {
            TierCommand::Add(args) => {
                let tier = RewardTier::new(
                    args.project.clone(),
                    args.tier_id,
                    args.title,
                    args.minimum,
                    args.quota,
                );
                let added = engine.add_reward_tiers(&args.project, vec![tier])?;
                emit(json, &added, || {
                    format!("added reward tier to project {}", args.project)
                })
            }
        },
        Command::Pledge(pledge) => match pledge.command {
            PledgeCommand::Add(args) => add_pledge(engine, args, json),
        },
        Command::Stretch(stretch) => match stretch.command {
            StretchCommand::Add(args) => {
                let goals = args
                    .goals
                    .iter()
                    .map(|raw| parse_goal(&args.project, raw))
                    .collect::<Result<Vec<_>>>()?;
                let goals = engine.add_stretch_goals(&args.project, goals)?;
                emit(json, &goals, || render_goals(&goals))
            }
            StretchCommand::List(args) => {
                let goals = engine.stretch_goals(&args.project)?;
                emit(json, &goals, || render_goals(&goals))
            }
        },
        Command::User(user) => match user.command {
            UserCommand::Add(args) => {
                let session = engine.add_user(
                    &args.user_id,
                    &args.username,
                    &args.password,
                    args.display_name.as_deref(),
                )?;
                emit(json, &session, || format!("added user {}", session.username))
            }
        },
        Command::Stats => {
            let stats = engine.statistics()?;
            emit(json, &stats, || {
                let mut out = format!(
                    "mode: {}\nprojects: {}  successful pledges: {}  rejected: {}  success rate: {:.2}%",
                    stats.mode,
                    stats.total_projects,
                    stats.total_success_pledges,
                    stats.total_rejected,
                    stats.success_rate
                );
                for p in &stats.projects {
                    let unlocked = if p.unlocked_goals.is_empty() {
                        "-".to_string()
                    } else {
                        p.unlocked_goals.join(", ")
                    };
                    out.push_str(&format!(
                        "\n{:<10} {:<24} {:>12} {:>12} {:>4}% {:<3} ok:{:<4} rejected:{:<4} unlocked: {}",
                        p.project_id,
                        p.name,
                        p.goal_amount,
                        p.raised_amount,
                        p.progress_percent,
                        if p.funded { "yes" } else { "no" },
                        p.success_count,
                        p.rejected_count,
                        unlocked
                    ));
                }
                out
            })
        }
    }
}

fn add_pledge(engine: &Engine, args: PledgeAddArgs, json: bool) -> Result<()> {
    let session = engine.authenticate(&args.username, &args.password)?;
    let pledge_id = args
        .pledge_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let mut cmd = PledgeCmd::for_session(pledge_id, &session, args.project, args.amount);
    if let Some(tier) = args.tier {
        cmd = cmd.reward_tier(tier);
    }
    if let Some(at) = args.at {
        cmd = cmd.created_at(at);
    }

    let pledge = engine.add_pledge(cmd)?;
    emit(json, &pledge, || {
        format!(
            "pledged {} to project {} ({})",
            pledge.amount, pledge.project_id, pledge.pledge_id
        )
    })
}

fn show_project(engine: &Engine, project_id: &str, json: bool) -> Result<()> {
    #[derive(Serialize)]
    struct Detail {
        project: Project,
        funded: bool,
        reward_tiers: Vec<RewardTier>,
        stretch_goals: Vec<StretchGoal>,
    }

    let project = engine
        .project(project_id)?
        .ok_or_else(|| EngineError::NotFound(format!("project {project_id}")))?;
    let stretch_goals = match engine.mode() {
        Mode::Stretch => engine.stretch_goals(project_id)?,
        Mode::Basic => Vec::new(),
    };
    let detail = Detail {
        funded: project.is_funded(),
        reward_tiers: engine.reward_tiers(project_id)?,
        stretch_goals,
        project,
    };

    emit(json, &detail, || {
        let p = &detail.project;
        let mut out = format!(
            "{} {}\ngoal: {}  raised: {}  deadline: {}  rejected: {}  funded: {}",
            p.project_id,
            p.name,
            p.goal_amount,
            p.raised_amount,
            p.deadline,
            p.rejected_count,
            if detail.funded { "yes" } else { "no" }
        );
        for tier in &detail.reward_tiers {
            out.push_str(&format!(
                "\ntier {:<8} {:<24} min {:>10}  left {}",
                tier.tier_id, tier.title, tier.minimum_amount, tier.quota_left
            ));
        }
        if !detail.stretch_goals.is_empty() {
            out.push('\n');
            out.push_str(&render_goals(&detail.stretch_goals));
        }
        out
    })
}

fn render_goals(goals: &[StretchGoal]) -> String {
    goals
        .iter()
        .map(|g| {
            format!(
                "[{}] {:<8} {:>12}  {}",
                if g.unlocked { "x" } else { " " },
                g.sg_id,
                g.threshold_amount,
                g.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse `ID:THRESHOLD:DESCRIPTION` (the description may contain `:`).
fn parse_goal(project_id: &str, raw: &str) -> Result<StretchGoal> {
    let mut parts = raw.splitn(3, ':');
    let (Some(sg_id), Some(threshold)) = (parts.next(), parts.next()) else {
        return Err(AppError::Argument(format!(
            "stretch goal '{raw}' must look like ID:THRESHOLD:DESCRIPTION"
        )));
    };
    let threshold: MoneyCents = threshold.parse()?;
    let description = parts.next().unwrap_or_default();
    Ok(StretchGoal::new(project_id, sg_id, threshold, description))
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}
