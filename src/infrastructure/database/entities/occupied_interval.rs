//! Occupied-interval entity
//!
//! One row per committed `[start, end)` range on a charger. Rows are
//! appended only by payment commits; the unique `(charger_id, start_time)`
//! index backstops racing commits for the same slot.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "occupied_intervals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub charger_id: String,

    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::charger::Entity",
        from = "Column::ChargerId",
        to = "super::charger::Column::Id"
    )]
    Charger,
}

impl Related<super::charger::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Charger.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
