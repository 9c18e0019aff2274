use chrono::Local;
use fake::{Fake, Faker};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::mapping::insert_statement;
use crate::core::security::hash_password;
use crate::model::role::{Role, TABLE_NAME as ROLE_TABLE_NAME};
use crate::model::user::{User, COLUMNS, TABLE_NAME};

pub fn generate_random<T: fake::Dummy<fake::Faker>>() -> T {
    Faker.fake()
}

pub struct TestUser {
    pub user: User,
    pub role: Role,
}

/// Seed a role and an active user with a properly hashed password.
pub async fn generate_test_user(
    db: &PgPool,
    fullname: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<TestUser> {
    let hashed_password = hash_password(password).unwrap();
    let now = Local::now().fixed_offset();
    let role = Role {
        id: Uuid::now_v7(),
        role_name: "member".to_string(),
        description: None,
        created_date: Some(now),
        updated_date: Some(now),
        deleted_date: None,
    };
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, role_name, description, created_date, updated_date)
        VALUES ($1, $2, $3, $4, $5)
        "#,
            ROLE_TABLE_NAME
        )
        .as_str(),
    )
    .bind(role.id)
    .bind(&role.role_name)
    .bind(&role.description)
    .bind(role.created_date)
    .bind(role.updated_date)
    .execute(db)
    .await?;

    let user = User {
        id: Uuid::now_v7(),
        fullname: fullname.to_string(),
        email: email.to_string(),
        password: Some(hashed_password),
        phone: None,
        token_verify: None,
        is_active: true,
        is_blocked: false,
        role_id: role.id,
        upload_id: None,
        created_date: Some(now),
        updated_date: Some(now),
        deleted_date: None,
    };
    let stmt = insert_statement(TABLE_NAME, COLUMNS);
    sqlx::query(stmt.as_str())
        .bind(user.id)
        .bind(&user.fullname)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.phone)
        .bind(&user.token_verify)
        .bind(user.is_active)
        .bind(user.is_blocked)
        .bind(user.role_id)
        .bind(user.upload_id)
        .bind(user.created_date)
        .bind(user.updated_date)
        .bind(user.deleted_date)
        .execute(db)
        .await?;

    Ok(TestUser { user, role })
}
