use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, QueryOrder, Set};
use serde::Serialize;

/// Administrative bundle of active groups supervised together.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "combined_groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::group_mapping::Entity")]
    Mappings,
}

impl Related<super::group_mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mappings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        name: &str,
        description: Option<String>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        ActiveModel {
            name: Set(name.to_owned()),
            description: Set(description),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn list(db: &DbConn, active: Option<bool>) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find();
        if let Some(active) = active {
            query = query.filter(Column::IsActive.eq(active));
        }
        query.order_by_asc(Column::Name).all(db).await
    }

    pub async fn edit(
        db: &DbConn,
        id: i64,
        name: Option<String>,
        description: Option<String>,
        is_active: Option<bool>,
    ) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Combined group not found".to_string()))?;

        let mut am: ActiveModel = model.into();
        if let Some(name) = name {
            am.name = Set(name);
        }
        if description.is_some() {
            am.description = Set(description);
        }
        if let Some(is_active) = is_active {
            am.is_active = Set(is_active);
        }
        am.updated_at = Set(Utc::now());
        am.update(db).await
    }
}
