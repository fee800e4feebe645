use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Team::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Team::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Team::Name).string().not_null())
                    .col(
                        ColumnDef::new(Team::Hidden)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Team::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(User::Name).string().not_null())
                    .col(ColumnDef::new(User::TeamId).big_integer().null())
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Challenge::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Challenge::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Challenge::Name).string().not_null())
                    .col(ColumnDef::new(Challenge::Category).string().not_null())
                    .col(
                        ColumnDef::new(Challenge::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Solve::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Solve::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Solve::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Solve::TeamId).big_integer().not_null())
                    .col(ColumnDef::new(Solve::ChallengeId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Solve::SolvedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_solves_solved_at")
                    .table(Solve::Table)
                    .col(Solve::SolvedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_solves_challenge_id")
                    .table(Solve::Table)
                    .col(Solve::ChallengeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_solves_team_id")
                    .table(Solve::Table)
                    .col(Solve::TeamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_team_id")
                    .table(User::Table)
                    .col(User::TeamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_challenges_category")
                    .table(Challenge::Table)
                    .col(Challenge::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_challenges_category").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_users_team_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_solves_team_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_solves_challenge_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_solves_solved_at").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Solve::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Challenge::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Team::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Team {
    #[sea_orm(iden = "teams")]
    Table,
    Id,
    Name,
    Hidden,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Name,
    TeamId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Challenge {
    #[sea_orm(iden = "challenges")]
    Table,
    Id,
    Name,
    Category,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Solve {
    #[sea_orm(iden = "solves")]
    Table,
    Id,
    UserId,
    TeamId,
    ChallengeId,
    SolvedAt,
}
