//! Achievement board assembly
//!
//! Folds the aggregate query rows into the board view model: tie-aware
//! winner lists per award, plus the "dominator" team with the most wins.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::services::catalog::{self, Award};
use crate::storage::{
    CategorySolveRow, FirstBloodCountRow, LoneWolfRow, SeaOrmStorage, TeamAverageRow,
    TeamSolveTotalRow,
};

/// At most this many teams share the master-of-disguise award.
const MAX_DISGUISE_WINNERS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WinnerKind {
    Team,
    User,
}

impl WinnerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WinnerKind::Team => "team",
            WinnerKind::User => "user",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Winner {
    pub id: i64,
    pub name: String,
    pub kind: WinnerKind,
}

impl Winner {
    fn team(id: i64, name: String) -> Self {
        Winner {
            id,
            name,
            kind: WinnerKind::Team,
        }
    }

    fn user(id: i64, name: String) -> Self {
        Winner {
            id,
            name,
            kind: WinnerKind::User,
        }
    }
}

/// One awarded achievement with its (tied) winners.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementSlot {
    pub title: &'static str,
    pub description: &'static str,
    pub winners: Vec<Winner>,
    /// The winning metric value (solve count, first bloods, average).
    /// Zero for awards without a meaningful count.
    pub metric: f64,
}

impl AchievementSlot {
    fn new(award: &'static Award, winners: Vec<Winner>, metric: f64) -> Self {
        AchievementSlot {
            title: award.title,
            description: award.description,
            winners,
            metric,
        }
    }

    pub fn has_metric(&self) -> bool {
        self.metric > 0.0
    }

    /// Metric formatted for display: integral values without a fraction,
    /// averages with two decimals.
    pub fn metric_display(&self) -> String {
        if self.metric.fract() == 0.0 {
            format!("{}", self.metric as i64)
        } else {
            format!("{:.2}", self.metric)
        }
    }
}

/// The transient view model handed to the template. Lives for one
/// request/response cycle (memoized by the page cache).
#[derive(Debug, Clone, Serialize)]
pub struct AchievementBoard {
    pub slots: Vec<AchievementSlot>,
    pub dominator: Option<String>,
    pub generated_at: DateTime<Utc>,
}

/// Everything the fold needs, gathered from storage up front so the
/// assembly itself is pure and unit-testable.
#[derive(Debug, Clone, Default)]
pub struct BoardInputs {
    pub category_rows: Vec<CategorySolveRow>,
    pub first_first_blood: Option<i64>,
    pub most_first_bloods: Option<FirstBloodCountRow>,
    pub lone_wolf: Option<LoneWolfRow>,
    pub collaborative_genius: Option<TeamAverageRow>,
    pub flag_conqueror: Option<TeamSolveTotalRow>,
    pub total_categories: usize,
    pub team_names: HashMap<i64, String>,
}

pub struct AchievementsService {
    storage: Arc<SeaOrmStorage>,
}

impl AchievementsService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        AchievementsService { storage }
    }

    /// Run the aggregate queries and fold them into the board.
    pub async fn compute_board(&self) -> Result<AchievementBoard> {
        let category_rows = self.storage.top_category_solves().await?;
        let first_first_blood = self.storage.earliest_solve_team().await?;
        let most_first_bloods = self.storage.most_first_bloods().await?;
        let lone_wolf = self.storage.lone_wolf().await?;
        let collaborative_genius = self.storage.collaborative_genius().await?;
        let flag_conqueror = self.storage.flag_conqueror().await?;
        let total_categories = self.storage.distinct_categories().await?.len();

        // Bulk-resolve team names for every winner candidate.
        let mut team_ids: BTreeSet<i64> = category_rows.iter().map(|r| r.team_id).collect();
        if let Some(id) = first_first_blood {
            team_ids.insert(id);
        }
        if let Some(ref row) = most_first_bloods {
            team_ids.insert(row.team_id);
        }
        if let Some(ref row) = flag_conqueror {
            team_ids.insert(row.team_id);
        }
        let ids: Vec<i64> = team_ids.into_iter().collect();
        let team_names = self.storage.team_names(&ids).await?;

        let board = assemble_board(BoardInputs {
            category_rows,
            first_first_blood,
            most_first_bloods,
            lone_wolf,
            collaborative_genius,
            flag_conqueror,
            total_categories,
            team_names,
        });

        debug!(
            slots = board.slots.len(),
            dominator = board.dominator.as_deref().unwrap_or("-"),
            "achievement board computed"
        );
        Ok(board)
    }
}

struct CategoryStanding {
    max_solves: i64,
    winners: Vec<Winner>,
}

/// Fold query rows into the board. Awards with no winner are omitted.
pub fn assemble_board(inputs: BoardInputs) -> AchievementBoard {
    // Wins per team, feeding the dominator pick. Category top-3 rows,
    // first first blood, most first bloods, flag conqueror and master of
    // disguise count; lone wolf and collaborative genius do not.
    let mut team_wins: HashMap<i64, u32> = HashMap::new();

    let resolve = |team_id: i64| -> Option<String> {
        let name = inputs.team_names.get(&team_id).cloned();
        if name.is_none() {
            warn!(team_id, "winner team has no resolvable name, skipping");
        }
        name
    };

    // Category awards: strictly more solves replaces the winner list, an
    // equal count joins it.
    let mut standings: HashMap<&'static str, CategoryStanding> = HashMap::new();
    for row in &inputs.category_rows {
        let Some(award) = catalog::category_award(&row.category) else {
            continue;
        };
        let Some(name) = resolve(row.team_id) else {
            continue;
        };

        let standing = standings.entry(award.title).or_insert(CategoryStanding {
            max_solves: 0,
            winners: Vec::new(),
        });
        if row.solves_count > standing.max_solves {
            standing.max_solves = row.solves_count;
            standing.winners = vec![Winner::team(row.team_id, name)];
        } else if row.solves_count == standing.max_solves {
            standing.winners.push(Winner::team(row.team_id, name));
        }

        // Every top-3 placement in an awarded category counts as a win.
        *team_wins.entry(row.team_id).or_default() += 1;
    }

    let mut slots = Vec::new();
    for award in catalog::CATEGORY_AWARDS {
        if let Some(standing) = standings.remove(award.title)
            && !standing.winners.is_empty()
        {
            slots.push(AchievementSlot::new(
                award,
                standing.winners,
                standing.max_solves as f64,
            ));
        }
    }

    if let Some(team_id) = inputs.first_first_blood
        && let Some(name) = resolve(team_id)
    {
        slots.push(AchievementSlot::new(
            &catalog::FIRST_FIRST_BLOOD,
            vec![Winner::team(team_id, name)],
            0.0,
        ));
        *team_wins.entry(team_id).or_default() += 1;
    }

    if let Some(row) = &inputs.most_first_bloods
        && let Some(name) = resolve(row.team_id)
    {
        slots.push(AchievementSlot::new(
            &catalog::DOUBLE_BLOOD,
            vec![Winner::team(row.team_id, name)],
            row.first_bloods as f64,
        ));
        *team_wins.entry(row.team_id).or_default() += 1;
    }

    if let Some(row) = &inputs.lone_wolf {
        slots.push(AchievementSlot::new(
            &catalog::LONE_WOLF,
            vec![Winner::user(row.user_id, row.user_name.clone())],
            row.solves_count as f64,
        ));
    }

    // Master of disguise: teams whose top-3 rows cover every category.
    // Meaningless while no challenges exist.
    if inputs.total_categories > 0 {
        let mut coverage: HashMap<i64, BTreeSet<&str>> = HashMap::new();
        for row in &inputs.category_rows {
            coverage
                .entry(row.team_id)
                .or_default()
                .insert(row.category.as_str());
        }

        let mut qualified: Vec<(i64, usize)> = coverage
            .into_iter()
            .map(|(team_id, categories)| (team_id, categories.len()))
            .filter(|(_, count)| *count >= inputs.total_categories)
            .collect();
        qualified.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        qualified.truncate(MAX_DISGUISE_WINNERS);

        let mut winners = Vec::new();
        for (team_id, _) in qualified {
            if let Some(name) = resolve(team_id) {
                winners.push(Winner::team(team_id, name));
                *team_wins.entry(team_id).or_default() += 1;
            }
        }
        if !winners.is_empty() {
            slots.push(AchievementSlot::new(
                &catalog::MASTER_OF_DISGUISE,
                winners,
                0.0,
            ));
        }
    }

    if let Some(row) = &inputs.collaborative_genius {
        slots.push(AchievementSlot::new(
            &catalog::COLLABORATIVE_GENIUS,
            vec![Winner::team(row.team_id, row.team_name.clone())],
            row.avg_solves,
        ));
    }

    if let Some(row) = &inputs.flag_conqueror
        && let Some(name) = resolve(row.team_id)
    {
        slots.push(AchievementSlot::new(
            &catalog::FLAG_CONQUEROR,
            vec![Winner::team(row.team_id, name)],
            row.total_solves as f64,
        ));
        *team_wins.entry(row.team_id).or_default() += 1;
    }

    // Dominator: most wins, ties resolved to the lowest team id.
    let dominator = team_wins
        .iter()
        .max_by(|(id_a, wins_a), (id_b, wins_b)| wins_a.cmp(wins_b).then(id_b.cmp(id_a)))
        .and_then(|(team_id, _)| inputs.team_names.get(team_id).cloned());

    AchievementBoard {
        slots,
        dominator,
        generated_at: Utc::now(),
    }
}
