use db::models::combined_group;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct CombinedGroupListQuery {
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCombinedGroupRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EditCombinedGroupRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddGroupRequest {
    #[validate(range(min = 1, message = "active_group_id must be a positive id"))]
    pub active_group_id: i64,
}

#[derive(Debug, Serialize, Default)]
pub struct CombinedGroupResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub active_group_ids: Vec<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl CombinedGroupResponse {
    pub fn new(m: combined_group::Model, active_group_ids: Vec<i64>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            is_active: m.is_active,
            active_group_ids,
            created_at: m.created_at.to_rfc3339(),
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}
