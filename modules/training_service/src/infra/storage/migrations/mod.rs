//! Database migrations for the training service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_user_terminations::Migration),
            Box::new(m20250301_000003_create_videos::Migration),
            Box::new(m20250301_000004_create_user_video_progress::Migration),
        ]
    }
}

mod m20250301_000001_create_users {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_users"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Users::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Users::Username)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::Name).string().not_null())
                        .col(
                            ColumnDef::new(Users::Email)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                        .col(ColumnDef::new(Users::Phone).string())
                        .col(ColumnDef::new(Users::Department).string())
                        .col(ColumnDef::new(Users::EmployeeId).string())
                        .col(
                            ColumnDef::new(Users::Role)
                                .string()
                                .not_null()
                                .default("employee"),
                        )
                        .col(
                            ColumnDef::new(Users::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Users::LastLogin).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await?;

            // Employee codes are not unique at the store level
            manager
                .create_index(
                    Index::create()
                        .name("idx_users_employee_id")
                        .table(Users::Table)
                        .col(Users::EmployeeId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Users {
        Table,
        Id,
        Username,
        Name,
        Email,
        PasswordHash,
        Phone,
        Department,
        EmployeeId,
        Role,
        CreatedAt,
        LastLogin,
    }
}

mod m20250301_000002_create_user_terminations {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_user_terminations"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(UserTerminations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UserTerminations::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(UserTerminations::UserId).integer().not_null())
                        .col(ColumnDef::new(UserTerminations::Username).string().not_null())
                        .col(ColumnDef::new(UserTerminations::Name).string().not_null())
                        .col(ColumnDef::new(UserTerminations::Email).string().not_null())
                        .col(ColumnDef::new(UserTerminations::EmployeeId).string())
                        .col(
                            ColumnDef::new(UserTerminations::TerminatedBy)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(UserTerminations::TerminatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(UserTerminations::Reason).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_user_terminations_employee_id")
                        .table(UserTerminations::Table)
                        .col(UserTerminations::EmployeeId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(UserTerminations::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum UserTerminations {
        Table,
        Id,
        UserId,
        Username,
        Name,
        Email,
        EmployeeId,
        TerminatedBy,
        TerminatedAt,
        Reason,
    }
}

mod m20250301_000003_create_videos {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000003_create_videos"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Videos::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Videos::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Videos::Title).string().not_null())
                        .col(ColumnDef::new(Videos::Duration).string().not_null())
                        .col(ColumnDef::new(Videos::Category).string().not_null())
                        .col(ColumnDef::new(Videos::Section).string().not_null())
                        .col(ColumnDef::new(Videos::Module).string())
                        .col(ColumnDef::new(Videos::Description).text().not_null())
                        .col(ColumnDef::new(Videos::Thumbnail).string())
                        .col(ColumnDef::new(Videos::VideoPath).string())
                        .col(ColumnDef::new(Videos::FileSizeMb).double())
                        .col(
                            ColumnDef::new(Videos::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_videos_section")
                        .table(Videos::Table)
                        .col(Videos::Section)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Videos::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Videos {
        Table,
        Id,
        Title,
        Duration,
        Category,
        Section,
        Module,
        Description,
        Thumbnail,
        VideoPath,
        FileSizeMb,
        CreatedAt,
    }
}

mod m20250301_000004_create_user_video_progress {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000004_create_user_video_progress"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(UserVideoProgress::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UserVideoProgress::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(UserVideoProgress::UserId).integer().not_null())
                        .col(ColumnDef::new(UserVideoProgress::VideoId).integer().not_null())
                        .col(
                            ColumnDef::new(UserVideoProgress::CompletedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // One completion per user and video; marking again refreshes the time
            manager
                .create_index(
                    Index::create()
                        .name("idx_user_video_progress_user_video")
                        .table(UserVideoProgress::Table)
                        .col(UserVideoProgress::UserId)
                        .col(UserVideoProgress::VideoId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(UserVideoProgress::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum UserVideoProgress {
        Table,
        Id,
        UserId,
        VideoId,
        CompletedAt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn migration_names_are_distinct_and_ordered() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                "m20250301_000001_create_users",
                "m20250301_000002_create_user_terminations",
                "m20250301_000003_create_videos",
                "m20250301_000004_create_user_video_progress",
            ]
        );
        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }
}
