use chrono::{DateTime, FixedOffset};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        mapping::{insert_statement, select_columns},
        sqlx_utils::{binds_query_as, query_builder, SqlxBinds},
    },
    model::user::{PublicUser, User, COLUMNS, TABLE_NAME},
};

pub async fn get_all_user(
    tx: &mut Transaction<'_, Postgres>,
    page: u32,
    page_size: u32,
    search: Option<String>,
    exclude_soft_delete: Option<bool>,
) -> anyhow::Result<(Vec<PublicUser>, u32, u32)> {
    let mut binds: Vec<SqlxBinds> = vec![];
    let mut filters: Vec<String> = vec![];

    if let Some(search) = search {
        binds.push(SqlxBinds::String(format!("%{}%", search)));
        filters.push(format!(
            "(fullname ILIKE ${} OR email ILIKE ${})",
            binds.len(),
            binds.len()
        ));
    }
    let exclude_soft_delete = exclude_soft_delete.unwrap_or(true);
    if exclude_soft_delete {
        filters.push("deleted_date IS NULL".to_string());
    }

    let limit = page_size;
    let offset = (page - 1) * page_size;
    let stmt = query_builder(
        Some(select_columns(COLUMNS, false)),
        TABLE_NAME,
        &filters,
        vec!["updated_date DESC".to_string()],
        Some(limit),
        Some(offset),
    );
    let stmt_count = query_builder(
        Some("count(id)".to_string()),
        TABLE_NAME,
        &filters,
        vec![],
        None,
        None,
    );

    let q = binds_query_as::<PublicUser>(&stmt, binds.clone());
    let q_count = binds_query_as::<(i64,)>(&stmt_count, binds);
    let data = q.fetch_all(&mut **tx).await?;
    let count = q_count.fetch_one(&mut **tx).await?;
    let num_page = (count.0 as u32).div_ceil(page_size);
    Ok((data, count.0 as u32, num_page))
}

pub async fn get_user_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
    exclude_soft_delete: Option<bool>,
) -> anyhow::Result<Option<PublicUser>> {
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::Uuid(*id)];
    let mut filters: Vec<String> = vec!["id = $1".to_string()];
    let exclude_soft_delete = exclude_soft_delete.unwrap_or(true);
    if exclude_soft_delete {
        filters.push("deleted_date IS NULL".to_string());
    }
    let stmt = query_builder(
        Some(select_columns(COLUMNS, false)),
        TABLE_NAME,
        &filters,
        vec![],
        None,
        None,
    );
    let data = binds_query_as::<PublicUser>(&stmt, binds)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(data)
}

pub async fn get_user_by_email(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
) -> anyhow::Result<Option<PublicUser>> {
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::String(email.to_string())];
    let filters: Vec<String> = vec!["email = $1".to_string(), "deleted_date IS NULL".to_string()];
    let stmt = query_builder(
        Some(select_columns(COLUMNS, false)),
        TABLE_NAME,
        &filters,
        vec![],
        None,
        None,
    );
    let data = binds_query_as::<PublicUser>(&stmt, binds)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(data)
}

/// Explicit with-credentials projection, the only read path that returns
/// `password` and `token_verify`.
pub async fn get_user_with_credentials_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<Option<User>> {
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::Uuid(*id)];
    let filters: Vec<String> = vec!["id = $1".to_string(), "deleted_date IS NULL".to_string()];
    let stmt = query_builder(
        Some(select_columns(COLUMNS, true)),
        TABLE_NAME,
        &filters,
        vec![],
        None,
        None,
    );
    let data = binds_query_as::<User>(&stmt, binds)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(data)
}

pub async fn get_user_with_credentials_by_email(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
) -> anyhow::Result<Option<User>> {
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::String(email.to_string())];
    let filters: Vec<String> = vec!["email = $1".to_string(), "deleted_date IS NULL".to_string()];
    let stmt = query_builder(
        Some(select_columns(COLUMNS, true)),
        TABLE_NAME,
        &filters,
        vec![],
        None,
        None,
    );
    let data = binds_query_as::<User>(&stmt, binds)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(data)
}

pub async fn create_user(tx: &mut Transaction<'_, Postgres>, user: &User) -> anyhow::Result<()> {
    // bind order follows model::user::COLUMNS
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
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn update_user(
    tx: &mut Transaction<'_, Postgres>,
    user: &mut User,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    user.updated_date = Some(*now);
    sqlx::query(
        format!(
            r#"UPDATE {}
            SET fullname = $1, email = $2, password = $3, phone = $4, token_verify = $5,
            is_active = $6, is_blocked = $7, role_id = $8, upload_id = $9, updated_date = $10
            WHERE id = $11"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&user.fullname)
    .bind(&user.email)
    .bind(&user.password)
    .bind(&user.phone)
    .bind(&user.token_verify)
    .bind(user.is_active)
    .bind(user.is_blocked)
    .bind(user.role_id)
    .bind(user.upload_id)
    .bind(user.updated_date)
    .bind(user.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn soft_delete_user(
    tx: &mut Transaction<'_, Postgres>,
    user: &mut User,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    user.updated_date = Some(*now);
    user.deleted_date = Some(*now);
    sqlx::query(
        format!(
            r#"UPDATE {} SET updated_date = $1, deleted_date = $2
            WHERE id = $3"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(user.updated_date)
    .bind(user.deleted_date)
    .bind(user.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Local;
    use fake::{Fake, Faker};
    use sqlx::PgPool;

    use super::*;
    use crate::factory::user::UserFactory;

    #[sqlx::test]
    async fn test_get_all_user_excludes_soft_deleted(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut factory = UserFactory::<()>::new();
        factory.modified_many(|user, idx, _| {
            let mut user = user.clone();
            user.deleted_date = if idx % 2 == 0 {
                Some(Faker.fake())
            } else {
                None
            };
            user
        });
        factory.generate_many(&pool, 6, ()).await?;

        // When
        let mut tx = pool.begin().await?;
        let (data, counts, _) = get_all_user(&mut tx, 1, 10, None, None).await?;
        let (all, all_counts, _) = get_all_user(&mut tx, 1, 10, None, Some(false)).await?;

        // Expect
        assert_eq!(counts, 3);
        assert!(data.iter().all(|user| user.deleted_date.is_none()));
        assert_eq!(all_counts, 6);
        assert_eq!(all.len(), 6);
        Ok(())
    }

    #[sqlx::test]
    async fn test_get_all_user_search(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut factory = UserFactory::<()>::new();
        factory.modified_one(|user, _| {
            let mut user = user.clone();
            user.fullname = "Ann Lee".to_string();
            user
        });
        factory.generate_one(&pool, ()).await?;
        let mut other_factory = UserFactory::<()>::new();
        other_factory.modified_many(|user, idx, _| {
            let mut user = user.clone();
            user.fullname = format!("user-{}", idx);
            user
        });
        other_factory.generate_many(&pool, 3, ()).await?;

        // When
        let mut tx = pool.begin().await?;
        let (data, counts, _) =
            get_all_user(&mut tx, 1, 10, Some("ann".to_string()), None).await?;

        // Expect
        assert_eq!(counts, 1);
        assert_eq!(data[0].fullname, "Ann Lee");
        Ok(())
    }

    #[sqlx::test]
    async fn test_get_user_by_id_include_deleted_scope(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut factory = UserFactory::<()>::new();
        let user = factory.generate_one(&pool, ()).await?;
        let mut tx = pool.begin().await?;
        let now = Local::now().fixed_offset();
        let mut deleted = user.clone();
        soft_delete_user(&mut tx, &mut deleted, &now).await?;

        // When
        let default_scope = get_user_by_id(&mut tx, &user.id, None).await?;
        let include_deleted = get_user_by_id(&mut tx, &user.id, Some(false)).await?;

        // Expect
        assert!(default_scope.is_none());
        assert!(include_deleted.is_some());
        assert!(include_deleted.unwrap().deleted_date.is_some());
        Ok(())
    }

    #[sqlx::test]
    async fn test_default_projection_never_selects_credentials(
        pool: PgPool,
    ) -> anyhow::Result<()> {
        // Given
        let mut factory = UserFactory::<()>::new();
        let user = factory.generate_one(&pool, ()).await?;

        // When
        let mut tx = pool.begin().await?;
        let public_user = get_user_by_id(&mut tx, &user.id, None).await?.unwrap();
        let json = serde_json::to_value(&public_user)?;

        // Expect
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("password"));
        assert!(!obj.contains_key("token_verify"));
        let with_credentials = get_user_with_credentials_by_id(&mut tx, &user.id)
            .await?
            .unwrap();
        assert_eq!(with_credentials.password, user.password);
        Ok(())
    }
}
