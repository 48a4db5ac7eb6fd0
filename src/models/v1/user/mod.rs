use sea_orm::prelude::*;
use sea_orm::{ActiveValue::Set, IntoActiveModel, PaginatorTrait};

use crate::entities::v1::tokens;
use crate::entities::v1::users::{Column, Entity, Model};
use crate::helpers::now;
use crate::responses::v1::user::User;

impl Model {
    /// Lookup by an already normalized email.
    pub async fn find_by_email<T: ToString>(
        db: &DatabaseConnection,
        email: T,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(email.to_string()))
            .one(db)
            .await
    }

    pub async fn email_exists<T: ToString>(db: &DatabaseConnection, email: T) -> Result<bool, DbErr> {
        let count = Entity::find()
            .filter(Column::Email.eq(email.to_string()))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    pub async fn store(&self, db: &DatabaseConnection) -> Result<Self, DbErr> {
        self.clone().into_active_model().insert(db).await
    }

    /// Writes only the supplied fields. `password` must already be hashed.
    pub async fn update_profile(
        &self,
        db: &DatabaseConnection,
        name: Option<String>,
        password: Option<String>,
    ) -> Result<Self, DbErr> {
        let mut model = self.clone().into_active_model();

        if let Some(name) = name {
            model.name = Set(name);
        }

        if let Some(password) = password {
            model.password = Set(password);
        }

        model.updated_at = Set(now());
        model.update(db).await
    }

    /// The user's token, created on first use.
    pub async fn token(&self, db: &DatabaseConnection) -> Result<(tokens::Model, bool), DbErr> {
        tokens::Model::get_or_create(db, self.id).await
    }
}

impl From<Model> for User {
    fn from(val: Model) -> Self {
        User {
            name: val.name,
            email: val.email,
        }
    }
}

impl From<&Model> for User {
    fn from(val: &Model) -> Self {
        User {
            name: val.name.clone(),
            email: val.email.clone(),
        }
    }
}
