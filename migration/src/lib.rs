//! Database migrations for the wedding planner.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2026_01_01_000001_create_users;
mod m2026_01_01_000002_create_websites;
mod m2026_01_01_000003_create_events;
mod m2026_01_01_000004_create_households_and_guests;
mod m2026_01_01_000005_create_invitations_and_gifts;
mod m2026_01_01_000006_create_questions;
mod m2026_01_01_000007_create_answers;
mod m2026_01_01_000008_create_guest_tags;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2026_01_01_000001_create_users::Migration),
            Box::new(m2026_01_01_000002_create_websites::Migration),
            Box::new(m2026_01_01_000003_create_events::Migration),
            Box::new(m2026_01_01_000004_create_households_and_guests::Migration),
            Box::new(m2026_01_01_000005_create_invitations_and_gifts::Migration),
            Box::new(m2026_01_01_000006_create_questions::Migration),
            Box::new(m2026_01_01_000007_create_answers::Migration),
            Box::new(m2026_01_01_000008_create_guest_tags::Migration),
        ]
    }
}
