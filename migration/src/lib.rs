pub use sea_orm_migration::prelude::*;

mod m20230902_024725_v1_create_users;
mod m20230902_025309_v1_create_tokens;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230902_024725_v1_create_users::Migration),
            Box::new(m20230902_025309_v1_create_tokens::Migration),
        ]
    }
}
