//! Helpers for integration tests.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_common::db::{DbPool, establish_connection_pool};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Insert a post directly; posts are authored outside this service.
    #[allow(dead_code)]
    pub fn insert_post(&self, category_id: i32, title: &str) -> i32 {
        use pushkind_blog::schema::posts;

        let mut conn = self.pool.get().expect("should acquire DB connection");
        diesel::insert_into(posts::table)
            .values((
                posts::category_id.eq(category_id),
                posts::title.eq(title),
                posts::slug.eq(pushkind_blog::domain::slug::slugify(title)),
                posts::created_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .returning(posts::id)
            .get_result(&mut conn)
            .expect("should create post")
    }
}
