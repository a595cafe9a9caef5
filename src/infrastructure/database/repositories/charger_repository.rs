//! SeaORM implementation of ChargerRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::domain::{Charger, ChargerRepository, DomainError, DomainResult};
use crate::infrastructure::database::entities::charger;

pub struct SeaOrmChargerRepository {
    db: DatabaseConnection,
}

impl SeaOrmChargerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn model_to_domain(m: charger::Model) -> Charger {
    Charger {
        id: m.id,
        name: m.name,
        location: m.location,
        price_per_hour: m.price_per_hour,
        provider_id: m.provider_id,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

#[async_trait]
impl ChargerRepository for SeaOrmChargerRepository {
    async fn save(&self, c: Charger) -> DomainResult<()> {
        debug!("Saving charger: {}", c.id);

        let model = charger::ActiveModel {
            id: Set(c.id),
            name: Set(c.name),
            location: Set(c.location),
            price_per_hour: Set(c.price_per_hour),
            provider_id: Set(c.provider_id),
            created_at: Set(c.created_at),
            updated_at: Set(c.updated_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Charger>> {
        let model = charger::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }
}
