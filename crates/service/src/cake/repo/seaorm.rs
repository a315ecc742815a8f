use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, Set, Unchanged};
use tracing::debug;

use models::cake;

use crate::cake::domain::{Cake, CakeDraft};
use crate::cake::repository::CakeRepository;
use crate::errors::ServiceError;

/// SeaORM-backed repository implementation.
pub struct SeaOrmCakeRepository {
    db: DatabaseConnection,
}

impl SeaOrmCakeRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

impl From<cake::Model> for Cake {
    fn from(m: cake::Model) -> Self {
        Cake { id: m.id, title: m.title, description: m.description }
    }
}

#[async_trait::async_trait]
impl CakeRepository for SeaOrmCakeRepository {
    async fn find_all(&self) -> Result<Vec<Cake>, ServiceError> {
        let rows = cake::find_all(&self.db).await?;
        Ok(rows.into_iter().map(Cake::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Cake>, ServiceError> {
        let found = cake::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Cake::from))
    }

    async fn save(&self, draft: CakeDraft) -> Result<Cake, ServiceError> {
        let Some(id) = draft.id else {
            let am = cake::ActiveModel {
                id: NotSet,
                title: Set(draft.title),
                description: Set(draft.description),
            };
            return Ok(am.insert(&self.db).await?.into());
        };

        let am = cake::ActiveModel {
            id: Unchanged(id),
            title: Set(draft.title.clone()),
            description: Set(draft.description.clone()),
        };
        match am.update(&self.db).await {
            Ok(m) => Ok(m.into()),
            // row vanished between lookup and write: store it under the same id
            Err(DbErr::RecordNotUpdated) => {
                debug!(cake_id = id, "update matched no row; inserting");
                let am = cake::ActiveModel {
                    id: Set(id),
                    title: Set(draft.title),
                    description: Set(draft.description),
                };
                Ok(am.insert(&self.db).await?.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, cake: Cake) -> Result<(), ServiceError> {
        let res = cake::Entity::delete_by_id(cake.id).exec(&self.db).await?;
        debug!(cake_id = cake.id, rows_affected = res.rows_affected, "cake row deleted");
        Ok(())
    }
}
