use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::core::mapping::ColumnDef;

pub const TABLE_NAME: &str = "public.user";

/// Table layout of `public.user`. Repositories derive their select and insert
/// statements from this, bind order on insert follows this order.
pub const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "id"),
    ColumnDef::new("fullname", "fullname").indexed(),
    ColumnDef::new("email", "email").indexed().unique(),
    ColumnDef::new("password", "password").sensitive(),
    ColumnDef::new("phone", "phone").indexed(),
    ColumnDef::new("token_verify", "token_verify").indexed().sensitive(),
    ColumnDef::new("is_active", "is_active").indexed(),
    ColumnDef::new("is_blocked", "is_blocked").indexed(),
    ColumnDef::new("role_id", "role_id").indexed(),
    ColumnDef::new("upload_id", "upload_id").indexed(),
    ColumnDef::new("created_date", "created_date"),
    ColumnDef::new("updated_date", "updated_date"),
    ColumnDef::new("deleted_date", "deleted_date").indexed(),
];

/// Full row, including credential columns. Only the with-credentials
/// repository functions produce this shape.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    pub phone: Option<String>,
    #[serde(default, skip_serializing)]
    pub token_verify: Option<String>,
    pub is_active: bool,
    pub is_blocked: bool,
    pub role_id: Uuid,
    pub upload_id: Option<Uuid>,
    pub created_date: Option<DateTime<FixedOffset>>,
    pub updated_date: Option<DateTime<FixedOffset>>,
    pub deleted_date: Option<DateTime<FixedOffset>>,
}

/// Default read shape, `password` and `token_verify` are never selected.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct PublicUser {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub is_blocked: bool,
    pub role_id: Uuid,
    pub upload_id: Option<Uuid>,
    pub created_date: Option<DateTime<FixedOffset>>,
    pub updated_date: Option<DateTime<FixedOffset>>,
    pub deleted_date: Option<DateTime<FixedOffset>>,
}
