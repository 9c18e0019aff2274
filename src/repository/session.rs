use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::sqlx_utils::{binds_query, binds_query_as, query_builder, SqlxBinds},
    model::session::{Session, TABLE_NAME},
};

pub async fn create_session(
    tx: &mut Transaction<'_, Postgres>,
    session: &Session,
) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, user_id, token, ip_address, user_agent, created_date, updated_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(session.id)
    .bind(session.user_id)
    .bind(&session.token)
    .bind(&session.ip_address)
    .bind(&session.user_agent)
    .bind(session.created_date)
    .bind(session.updated_date)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn get_sessions_by_user(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &Uuid,
) -> anyhow::Result<Vec<Session>> {
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::Uuid(*user_id)];
    let filters: Vec<String> = vec!["user_id = $1".to_string()];
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &filters,
        vec!["created_date DESC".to_string()],
        None,
        None,
    );
    let data = binds_query_as::<Session>(&stmt, binds)
        .fetch_all(&mut **tx)
        .await?;
    Ok(data)
}

pub async fn delete_sessions_by_user(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &Uuid,
) -> anyhow::Result<u64> {
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::Uuid(*user_id)];
    let stmt = format!("DELETE FROM {} WHERE user_id = $1", TABLE_NAME);
    let res = binds_query(&stmt, binds).execute(&mut **tx).await?;
    Ok(res.rows_affected())
}
