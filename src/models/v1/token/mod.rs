use sea_orm::prelude::*;
use sea_orm::IntoActiveModel;

use crate::entities::v1::tokens::{Column, Entity, Model};
use crate::entities::v1::users;
use crate::helpers::{is_unique_violation, now};
use crate::security::generate_key;

impl Model {
    /// Owner of the token `key`, if any.
    pub async fn user(db: &DatabaseConnection, key: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .inner_join(Entity)
            .filter(Column::Key.eq(key))
            .one(db)
            .await
    }

    pub async fn find_by_user(db: &DatabaseConnection, user_id: Uuid) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await
    }

    pub async fn store(&self, db: &DatabaseConnection) -> Result<Self, DbErr> {
        self.clone().into_active_model().insert(db).await
    }

    /// Returns the user's token, creating one when absent. The flag is `true`
    /// when a new token was written.
    ///
    /// Two racing logins both miss the lookup; the unique index on `user_id`
    /// rejects the second insert, which then reads back the winner's token.
    #[::tracing::instrument(skip(db), fields(user_id = %user_id))]
    pub async fn get_or_create(db: &DatabaseConnection, user_id: Uuid) -> Result<(Self, bool), DbErr> {
        if let Some(token) = Self::find_by_user(db, user_id).await? {
            return Ok((token, false));
        }

        let token = Self {
            key: generate_key(),
            user_id,
            created_at: now(),
        };

        match token.store(db).await {
            Ok(token) => {
                ::tracing::debug!("Token created");
                Ok((token, true))
            }
            Err(e) if is_unique_violation(&e) => {
                ::tracing::debug!("Token created concurrently, reusing it");
                Self::find_by_user(db, user_id)
                    .await?
                    .map(|token| (token, false))
                    .ok_or(e)
            }
            Err(e) => Err(e),
        }
    }
}
