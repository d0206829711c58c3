use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SearchHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SearchHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SearchHistory::UserId).big_integer().not_null())
                    .col(ColumnDef::new(SearchHistory::Query).text().not_null())
                    .col(ColumnDef::new(SearchHistory::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_search_history_user")
                    .table(SearchHistory::Table)
                    .col(SearchHistory::UserId)
                    .col(SearchHistory::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FilmStats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FilmStats::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FilmStats::UserId).big_integer().not_null())
                    .col(ColumnDef::new(FilmStats::FilmId).big_integer().not_null())
                    .col(ColumnDef::new(FilmStats::FilmTitle).string().not_null())
                    .col(
                        ColumnDef::new(FilmStats::Count)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(FilmStats::FirstSeenAt).string().not_null())
                    .col(ColumnDef::new(FilmStats::LastSeenAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // The upsert in the stats repository targets this constraint.
        manager
            .create_index(
                Index::create()
                    .name("idx_film_stats_user_film_unique")
                    .table(FilmStats::Table)
                    .col(FilmStats::UserId)
                    .col(FilmStats::FilmId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FilmStats::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SearchHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SearchHistory {
    Table,
    Id,
    UserId,
    Query,
    CreatedAt,
}

#[derive(DeriveIden)]
enum FilmStats {
    Table,
    Id,
    UserId,
    FilmId,
    FilmTitle,
    Count,
    FirstSeenAt,
    LastSeenAt,
}
