//! Achievement board integration tests
//!
//! Seeds a throwaway SQLite store with known solves and asserts the
//! computed winners, ties, and exclusions.

use chrono::{DateTime, Duration, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection};
use std::sync::Arc;
use tempfile::TempDir;

use ctf_achievements::services::{AchievementsService, WinnerKind, catalog};
use ctf_achievements::storage::{SeaOrmStorage, connect_sqlite, run_migrations};
use migration::entities::{challenge, solve, team, user};

// =============================================================================
// Test setup
// =============================================================================

async fn test_storage(name: &str) -> (TempDir, Arc<SeaOrmStorage>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join(format!("{}.db", name));
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let db = connect_sqlite(&db_url)
        .await
        .expect("Failed to connect to SQLite");
    run_migrations(&db).await.expect("Failed to run migrations");

    (temp_dir, Arc::new(SeaOrmStorage::from_connection(db, "sqlite")))
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap()
}

async fn seed_team(db: &DatabaseConnection, id: i64, name: &str, hidden: bool) {
    team::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        hidden: Set(hidden),
        created_at: Set(base_time()),
    }
    .insert(db)
    .await
    .expect("Failed to insert team");
}

async fn seed_user(db: &DatabaseConnection, id: i64, name: &str, team_id: Option<i64>) {
    user::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        team_id: Set(team_id),
        created_at: Set(base_time()),
    }
    .insert(db)
    .await
    .expect("Failed to insert user");
}

async fn seed_challenge(db: &DatabaseConnection, id: i64, name: &str, category: &str) {
    challenge::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        category: Set(category.to_string()),
        created_at: Set(base_time()),
    }
    .insert(db)
    .await
    .expect("Failed to insert challenge");
}

/// Solve ids double as the chronological order: solved_at advances one
/// minute per id.
async fn seed_solve(db: &DatabaseConnection, id: i64, user_id: i64, team_id: i64, challenge_id: i64) {
    solve::ActiveModel {
        id: Set(id),
        user_id: Set(user_id),
        team_id: Set(team_id),
        challenge_id: Set(challenge_id),
        solved_at: Set(base_time() + Duration::minutes(id)),
    }
    .insert(db)
    .await
    .expect("Failed to insert solve");
}

/// Seed the reference competition:
/// - teams: 1 alpha, 2 beta, 3 ghosts (hidden), 4 gamma
/// - categories: web (ch 1, 2), pwn (ch 3), crypto (ch 4)
/// - the very first solve belongs to the hidden team
async fn seed_competition(db: &DatabaseConnection) {
    seed_team(db, 1, "alpha", false).await;
    seed_team(db, 2, "beta", false).await;
    seed_team(db, 3, "ghosts", true).await;
    seed_team(db, 4, "gamma", false).await;

    seed_user(db, 1, "ada", Some(1)).await;
    seed_user(db, 2, "alan", Some(1)).await;
    seed_user(db, 3, "betty", Some(2)).await;
    seed_user(db, 4, "ghost", Some(3)).await;
    seed_user(db, 5, "grace", Some(4)).await;

    seed_challenge(db, 1, "login-bypass", "web").await;
    seed_challenge(db, 2, "ssrf-me", "web").await;
    seed_challenge(db, 3, "stack-smash", "pwn").await;
    seed_challenge(db, 4, "baby-rsa", "crypto").await;

    seed_solve(db, 1, 4, 3, 1).await; // hidden team draws first blood on web
    seed_solve(db, 2, 1, 1, 1).await;
    seed_solve(db, 3, 3, 2, 2).await;
    seed_solve(db, 4, 3, 2, 3).await;
    seed_solve(db, 5, 2, 1, 4).await;
    seed_solve(db, 6, 1, 1, 2).await;
    seed_solve(db, 7, 2, 1, 3).await;
    seed_solve(db, 8, 3, 2, 4).await;
    seed_solve(db, 9, 5, 4, 1).await;
}

// =============================================================================
// Board computation
// =============================================================================

#[tokio::test]
async fn empty_store_yields_empty_board() {
    let (_guard, storage) = test_storage("empty").await;
    let service = AchievementsService::new(storage);

    let board = service.compute_board().await.expect("board computation");
    assert!(board.slots.is_empty());
    assert!(board.dominator.is_none());
}

#[tokio::test]
async fn category_winners_and_ties() {
    let (_guard, storage) = test_storage("categories").await;
    seed_competition(storage.get_db()).await;
    let service = AchievementsService::new(storage);

    let board = service.compute_board().await.expect("board computation");

    let web = board
        .slots
        .iter()
        .find(|s| s.title == catalog::WEB.title)
        .expect("web slot");
    assert_eq!(web.winners.len(), 1);
    assert_eq!(web.winners[0].name, "alpha");
    assert_eq!(web.metric, 2.0);

    // pwn and crypto are 1:1 ties between alpha and beta.
    for title in [catalog::PWN.title, catalog::CRYPTO.title] {
        let slot = board
            .slots
            .iter()
            .find(|s| s.title == title)
            .expect("tied category slot");
        let mut names: Vec<&str> = slot.winners.iter().map(|w| w.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["alpha", "beta"], "title: {}", title);
    }
}

#[tokio::test]
async fn first_blood_awards_skip_hidden_teams() {
    let (_guard, storage) = test_storage("first_bloods").await;
    seed_competition(storage.get_db()).await;
    let service = AchievementsService::new(storage);

    let board = service.compute_board().await.expect("board computation");

    // The hidden team solved first, but the award goes to alpha.
    let first = board
        .slots
        .iter()
        .find(|s| s.title == catalog::FIRST_FIRST_BLOOD.title)
        .expect("first first blood slot");
    assert_eq!(first.winners[0].name, "alpha");

    // beta took first blood on ssrf-me and stack-smash; the hidden team's
    // web first blood counts for nobody.
    let double = board
        .slots
        .iter()
        .find(|s| s.title == catalog::DOUBLE_BLOOD.title)
        .expect("double blood slot");
    assert_eq!(double.winners[0].name, "beta");
    assert_eq!(double.metric, 2.0);
}

#[tokio::test]
async fn lone_wolf_and_collaborative_genius() {
    let (_guard, storage) = test_storage("wolf_genius").await;
    seed_competition(storage.get_db()).await;
    let service = AchievementsService::new(storage);

    let board = service.compute_board().await.expect("board computation");

    // betty carries beta alone with 3 solves.
    let wolf = board
        .slots
        .iter()
        .find(|s| s.title == catalog::LONE_WOLF.title)
        .expect("lone wolf slot");
    assert_eq!(wolf.winners[0].name, "betty");
    assert_eq!(wolf.winners[0].kind, WinnerKind::User);
    assert_eq!(wolf.metric, 3.0);

    // beta: 3 solves over 1 member = 3.0; alpha: 4 over 2 = 2.0.
    let genius = board
        .slots
        .iter()
        .find(|s| s.title == catalog::COLLABORATIVE_GENIUS.title)
        .expect("collaborative genius slot");
    assert_eq!(genius.winners[0].name, "beta");
    assert_eq!(genius.metric_display(), "3");
}

#[tokio::test]
async fn flag_conqueror_master_of_disguise_and_dominator() {
    let (_guard, storage) = test_storage("conqueror").await;
    seed_competition(storage.get_db()).await;
    let service = AchievementsService::new(storage);

    let board = service.compute_board().await.expect("board computation");

    let conqueror = board
        .slots
        .iter()
        .find(|s| s.title == catalog::FLAG_CONQUEROR.title)
        .expect("flag conqueror slot");
    assert_eq!(conqueror.winners[0].name, "alpha");
    assert_eq!(conqueror.metric, 4.0);

    // alpha and beta both placed in all three categories; gamma only in web.
    let disguise = board
        .slots
        .iter()
        .find(|s| s.title == catalog::MASTER_OF_DISGUISE.title)
        .expect("master of disguise slot");
    let mut names: Vec<&str> = disguise.winners.iter().map(|w| w.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["alpha", "beta"]);

    assert_eq!(board.dominator.as_deref(), Some("alpha"));
}

#[tokio::test]
async fn hidden_teams_never_win_anything() {
    let (_guard, storage) = test_storage("hidden").await;
    seed_competition(storage.get_db()).await;
    let service = AchievementsService::new(storage);

    let board = service.compute_board().await.expect("board computation");

    for slot in &board.slots {
        for winner in &slot.winners {
            assert_ne!(winner.name, "ghosts", "hidden team won {}", slot.title);
            assert_ne!(winner.name, "ghost", "hidden team member won {}", slot.title);
        }
    }
    assert_ne!(board.dominator.as_deref(), Some("ghosts"));
}

// =============================================================================
// Raw query sanity
// =============================================================================

#[tokio::test]
async fn top_category_solves_keeps_at_most_three_teams_per_category() {
    let (_guard, storage) = test_storage("top3").await;
    let db = storage.get_db();

    for id in 1..=5 {
        seed_team(db, id, &format!("team-{}", id), false).await;
        seed_user(db, id, &format!("user-{}", id), Some(id)).await;
    }
    seed_challenge(db, 1, "only-web", "web").await;
    for id in 1..=5 {
        seed_solve(db, id, id, id, 1).await;
    }

    let rows = storage.top_category_solves().await.expect("query");
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.category == "web"));
}

#[tokio::test]
async fn distinct_categories_ignores_duplicates() {
    let (_guard, storage) = test_storage("categories_distinct").await;
    let db = storage.get_db();

    seed_challenge(db, 1, "a", "web").await;
    seed_challenge(db, 2, "b", "web").await;
    seed_challenge(db, 3, "c", "pwn").await;

    let mut categories = storage.distinct_categories().await.expect("query");
    categories.sort();
    assert_eq!(categories, vec!["pwn", "web"]);
}
