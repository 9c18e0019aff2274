use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.upload";

#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct Upload {
    pub id: Uuid,
    pub file_name: String,
    pub path: String,
    pub mimetype: Option<String>,
    pub size: Option<i64>,
    pub created_date: Option<DateTime<FixedOffset>>,
    pub updated_date: Option<DateTime<FixedOffset>>,
    pub deleted_date: Option<DateTime<FixedOffset>>,
}
