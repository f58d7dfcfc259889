use chrono::{Days, Local};
use engine::{Engine, EngineError, Mode, MoneyCents, PledgeCmd, RewardTier, StretchGoal};
use tempfile::TempDir;

fn money(raw: &str) -> MoneyCents {
    raw.parse().unwrap()
}

fn engine_with_dir(mode: Mode) -> (Engine, TempDir) {
    let dir = TempDir::new().unwrap();
    let engine = Engine::builder()
        .data_dir(dir.path())
        .mode(mode)
        .build()
        .unwrap();
    (engine, dir)
}

#[test]
fn statistics_summarize_outcomes() {
    let (engine, _dir) = engine_with_dir(Mode::Stretch);
    let deadline = Local::now()
        .date_naive()
        .checked_add_days(Days::new(20))
        .unwrap();
    engine
        .create_project("12345678", "Board game", money("1000.00"), deadline)
        .unwrap();
    engine
        .create_project("23456789", "Short film", money("300.00"), deadline)
        .unwrap();
    engine
        .add_reward_tiers(
            "23456789",
            vec![RewardTier::new("23456789", "T1", "Credits", money("100.00"), 1)],
        )
        .unwrap();
    engine
        .add_stretch_goals(
            "12345678",
            vec![
                StretchGoal::new("12345678", "SG1", money("1200.00"), "Extra map"),
                StretchGoal::new("12345678", "SG2", money("1300.00"), ""),
                StretchGoal::new("12345678", "SG3", money("5000.00"), "Expansion"),
            ],
        )
        .unwrap();

    engine
        .add_pledge(PledgeCmd::new("p-1", "u-1", "12345678", money("1300.00")))
        .unwrap();
    engine
        .add_pledge(PledgeCmd::new("p-2", "u-1", "23456789", money("100.00")).reward_tier("T1"))
        .unwrap();
    engine
        .add_pledge(PledgeCmd::new("p-3", "u-2", "23456789", money("100.00")).reward_tier("T1"))
        .unwrap_err();

    let stats = engine.statistics().unwrap();
    assert_eq!(stats.mode, Mode::Stretch);
    assert_eq!(stats.total_projects, 2);
    assert_eq!(stats.total_success_pledges, 2);
    assert_eq!(stats.total_rejected, 1);
    assert!((stats.success_rate - 66.666).abs() < 0.01);

    let game = &stats.projects[0];
    assert!(game.funded);
    assert_eq!(game.success_count, 1);
    assert_eq!(game.progress_percent, 100);
    assert_eq!(game.unlocked_goals, vec!["Extra map", "SG2"]);

    let film = &stats.projects[1];
    assert!(!film.funded);
    assert_eq!(film.raised_amount, money("100.00"));
    assert_eq!(film.rejected_count, 1);
    assert_eq!(film.progress_percent, 33);
    assert!(film.unlocked_goals.is_empty());
}

#[test]
fn empty_directory_has_zero_rate() {
    let (engine, _dir) = engine_with_dir(Mode::Basic);
    let stats = engine.statistics().unwrap();
    assert_eq!(stats.total_projects, 0);
    assert_eq!(stats.success_rate, 0.0);
}

#[test]
fn users_authenticate_into_sessions() {
    let (engine, _dir) = engine_with_dir(Mode::Basic);
    engine
        .add_user("u-1", "alice", "secret", Some("Alice"))
        .unwrap();
    engine.add_user("u-2", "bob", "hunter2", None).unwrap();

    let session = engine.authenticate("alice", "secret").unwrap();
    assert_eq!(session.user_id, "u-1");
    assert_eq!(session.display_name, "Alice");
    assert_eq!(engine.authenticate("bob", "hunter2").unwrap().display_name, "bob");

    assert_eq!(
        engine.authenticate("alice", "wrong").unwrap_err(),
        EngineError::InvalidCredentials
    );
    assert_eq!(
        engine.authenticate("carol", "secret").unwrap_err(),
        EngineError::InvalidCredentials
    );
    assert_eq!(
        engine.add_user("u-3", "alice", "x", None).unwrap_err(),
        EngineError::Duplicate("alice".to_string())
    );
    assert_eq!(
        engine.add_user("u-1", "carol", "x", None).unwrap_err(),
        EngineError::Duplicate("u-1".to_string())
    );
}

#[test]
fn session_pledges_carry_the_user() {
    let (engine, _dir) = engine_with_dir(Mode::Basic);
    let deadline = Local::now()
        .date_naive()
        .checked_add_days(Days::new(5))
        .unwrap();
    engine
        .create_project("12345678", "Board game", money("10.00"), deadline)
        .unwrap();
    let session = engine.add_user("u-7", "alice", "secret", None).unwrap();

    let pledge = engine
        .add_pledge(PledgeCmd::for_session("p-1", &session, "12345678", money("3.00")))
        .unwrap();
    assert_eq!(pledge.user_id, "u-7");
    assert_eq!(engine.pledges("12345678").unwrap(), vec![pledge]);
}
