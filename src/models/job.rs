use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JobPosition {
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub requirements: Vec<String>,
}
