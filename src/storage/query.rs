//! Aggregate queries for the achievement board
//!
//! All queries exclude hidden teams. Single-winner queries order by the
//! achievement metric first and break ties by earliest solve time.

use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, EntityTrait, ExprTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
    Statement,
    sea_query::{Expr, Query, SelectStatement},
};

use super::SeaOrmStorage;
use crate::errors::Result;
use migration::entities::{challenge, solve, team};

/// One of the top-3 teams of a challenge category.
#[derive(Debug, Clone, FromQueryResult)]
pub struct CategorySolveRow {
    pub team_id: i64,
    pub category: String,
    pub solves_count: i64,
}

/// Team with the most first-blood solves.
#[derive(Debug, Clone, FromQueryResult)]
pub struct FirstBloodCountRow {
    pub team_id: i64,
    pub first_bloods: i64,
}

/// User with the most individual solves.
#[derive(Debug, Clone, FromQueryResult)]
pub struct LoneWolfRow {
    pub user_id: i64,
    pub user_name: String,
    pub solves_count: i64,
}

/// Team with the highest solves-per-member average.
#[derive(Debug, Clone, FromQueryResult)]
pub struct TeamAverageRow {
    pub team_id: i64,
    pub team_name: String,
    pub avg_solves: f64,
}

/// Team with the most total solves.
#[derive(Debug, Clone, FromQueryResult)]
pub struct TeamSolveTotalRow {
    pub team_id: i64,
    pub total_solves: i64,
}

/// Subquery selecting the ids of hidden teams.
fn hidden_team_ids() -> SelectStatement {
    Query::select()
        .column(team::Column::Id)
        .from(team::Entity)
        .and_where(Expr::col(team::Column::Hidden).eq(true))
        .to_owned()
}

/// Subquery selecting the first solve id of every challenge.
fn first_solve_ids() -> SelectStatement {
    Query::select()
        .expr(Expr::col(solve::Column::Id).min())
        .from(solve::Entity)
        .group_by_col(solve::Column::ChallengeId)
        .to_owned()
}

impl SeaOrmStorage {
    /// Per-(team, category) solve counts, keeping the top 3 teams of each
    /// category. Ranking uses a window function, so this one stays raw SQL.
    pub async fn top_category_solves(&self) -> Result<Vec<CategorySolveRow>> {
        let backend = self.get_db().get_database_backend();
        let sql = r#"
            SELECT team_id, category, solves_count
            FROM (
                SELECT s.team_id AS team_id,
                       c.category AS category,
                       COUNT(s.id) AS solves_count,
                       ROW_NUMBER() OVER (
                           PARTITION BY c.category
                           ORDER BY COUNT(s.id) DESC
                       ) AS category_rank
                FROM solves AS s
                INNER JOIN challenges AS c ON s.challenge_id = c.id
                WHERE s.team_id NOT IN (SELECT id FROM teams WHERE hidden = TRUE)
                GROUP BY s.team_id, c.category
            ) AS ranked
            WHERE category_rank <= 3
        "#;

        let rows = CategorySolveRow::find_by_statement(Statement::from_string(
            backend,
            sql.to_owned(),
        ))
        .all(self.get_db())
        .await?;
        Ok(rows)
    }

    /// Team of the chronologically first solve of the competition.
    pub async fn earliest_solve_team(&self) -> Result<Option<i64>> {
        let row = solve::Entity::find()
            .select_only()
            .column(solve::Column::TeamId)
            .filter(
                Expr::col((solve::Entity, solve::Column::TeamId))
                    .in_subquery(hidden_team_ids())
                    .not(),
            )
            .order_by_asc(solve::Column::SolvedAt)
            .order_by_asc(solve::Column::Id)
            .into_tuple::<i64>()
            .one(self.get_db())
            .await?;
        Ok(row)
    }

    /// Team holding the most first bloods.
    pub async fn most_first_bloods(&self) -> Result<Option<FirstBloodCountRow>> {
        let row = solve::Entity::find()
            .select_only()
            .column(solve::Column::TeamId)
            .column_as(solve::Column::Id.count(), "first_bloods")
            .filter(Expr::col((solve::Entity, solve::Column::Id)).in_subquery(first_solve_ids()))
            .filter(
                Expr::col((solve::Entity, solve::Column::TeamId))
                    .in_subquery(hidden_team_ids())
                    .not(),
            )
            .group_by(solve::Column::TeamId)
            .order_by_desc(Expr::cust("first_bloods"))
            .order_by_asc(solve::Column::SolvedAt.min())
            .into_model::<FirstBloodCountRow>()
            .one(self.get_db())
            .await?;
        Ok(row)
    }

    /// User with the most individual solves. Users without a team fall out
    /// of the NOT IN filter, matching the platform's team mode.
    pub async fn lone_wolf(&self) -> Result<Option<LoneWolfRow>> {
        let backend = self.get_db().get_database_backend();
        let sql = r#"
            SELECT u.id AS user_id,
                   u.name AS user_name,
                   COUNT(s.id) AS solves_count
            FROM users AS u
            INNER JOIN solves AS s ON s.user_id = u.id
            WHERE u.team_id NOT IN (SELECT id FROM teams WHERE hidden = TRUE)
            GROUP BY u.id, u.name
            ORDER BY solves_count DESC, MIN(s.solved_at) ASC
            LIMIT 1
        "#;

        let row =
            LoneWolfRow::find_by_statement(Statement::from_string(backend, sql.to_owned()))
                .one(self.get_db())
                .await?;
        Ok(row)
    }

    /// Team with the highest solves-per-member average.
    pub async fn collaborative_genius(&self) -> Result<Option<TeamAverageRow>> {
        let backend = self.get_db().get_database_backend();
        let sql = r#"
            SELECT t.id AS team_id,
                   t.name AS team_name,
                   COUNT(s.id) * 1.0 / COUNT(DISTINCT u.id) AS avg_solves
            FROM teams AS t
            INNER JOIN users AS u ON u.team_id = t.id
            INNER JOIN solves AS s ON s.user_id = u.id
            WHERE t.hidden = FALSE
            GROUP BY t.id, t.name
            ORDER BY avg_solves DESC, MIN(s.solved_at) ASC
            LIMIT 1
        "#;

        let row =
            TeamAverageRow::find_by_statement(Statement::from_string(backend, sql.to_owned()))
                .one(self.get_db())
                .await?;
        Ok(row)
    }

    /// Team with the most total solves.
    pub async fn flag_conqueror(&self) -> Result<Option<TeamSolveTotalRow>> {
        let row = solve::Entity::find()
            .select_only()
            .column(solve::Column::TeamId)
            .column_as(solve::Column::Id.count(), "total_solves")
            .filter(
                Expr::col((solve::Entity, solve::Column::TeamId))
                    .in_subquery(hidden_team_ids())
                    .not(),
            )
            .group_by(solve::Column::TeamId)
            .order_by_desc(Expr::cust("total_solves"))
            .order_by_asc(solve::Column::SolvedAt.min())
            .into_model::<TeamSolveTotalRow>()
            .one(self.get_db())
            .await?;
        Ok(row)
    }

    /// All distinct challenge categories.
    pub async fn distinct_categories(&self) -> Result<Vec<String>> {
        let categories = challenge::Entity::find()
            .select_only()
            .column(challenge::Column::Category)
            .distinct()
            .into_tuple::<String>()
            .all(self.get_db())
            .await?;
        Ok(categories)
    }

    /// Resolve team names for the given ids.
    pub async fn team_names(&self, ids: &[i64]) -> Result<HashMap<i64, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let teams = team::Entity::find()
            .filter(team::Column::Id.is_in(ids.iter().copied()))
            .all(self.get_db())
            .await?;

        Ok(teams.into_iter().map(|t| (t.id, t.name)).collect())
    }
}
