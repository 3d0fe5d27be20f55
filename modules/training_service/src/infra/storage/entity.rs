//! SeaORM entities for database tables

/// Active users table
pub mod user {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        #[sea_orm(unique)]
        pub username: String,

        pub name: String,

        #[sea_orm(unique)]
        pub email: String,

        /// Argon2 PHC string
        pub password_hash: String,

        pub phone: Option<String>,

        pub department: Option<String>,

        /// Human-readable employee code (agent ID)
        pub employee_id: Option<String>,

        /// `employee` or `admin`
        pub role: String,

        pub created_at: DateTimeUtc,

        pub last_login: Option<DateTimeUtc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Termination history table, rows are never updated
pub mod termination {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "user_terminations")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        /// Id the user had while active (the row itself is gone)
        pub user_id: i32,

        pub username: String,

        pub name: String,

        pub email: String,

        /// Employee code held at termination, eligible for recycling
        pub employee_id: Option<String>,

        /// Administrator who performed the termination
        pub terminated_by: i32,

        pub terminated_at: DateTimeUtc,

        pub reason: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Training videos table
pub mod video {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "videos")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        pub title: String,

        pub duration: String,

        pub category: String,

        /// Chapter label
        pub section: String,

        /// Module label within the section
        pub module: Option<String>,

        pub description: String,

        pub thumbnail: Option<String>,

        pub video_path: Option<String>,

        pub file_size_mb: Option<f64>,

        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Per-user video completion, one row per (user, video)
pub mod progress {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "user_video_progress")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        pub user_id: i32,

        pub video_id: i32,

        pub completed_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
