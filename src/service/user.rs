use chrono::Local;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::security::{hash_password, verify_hash_password},
    error::{map_db_err, AccountError},
    model::user::User,
    repository::{
        role::get_role_by_id,
        session::delete_sessions_by_user,
        upload::get_upload_by_id,
        user::{
            create_user as insert_user, get_user_with_credentials_by_email,
            get_user_with_credentials_by_id, soft_delete_user as mark_user_deleted, update_user,
        },
    },
    schema::user::{CreatePassword, UserForm},
};

/// Pre-write hook, runs before every create and update. When the transient
/// password pair is present it is validated and the resulting plaintext is
/// hashed into `user.password`. When the pair is absent the stored hash is
/// left untouched.
pub fn set_user_password(user: &mut User, form: &CreatePassword) -> Result<(), AccountError> {
    if form.is_empty() {
        return Ok(());
    }
    let valid_password = form.validate()?;
    let hash =
        hash_password(&valid_password).map_err(|err| AccountError::Hash(err.to_string()))?;
    user.password = Some(hash);
    Ok(())
}

async fn check_references(
    tx: &mut Transaction<'_, Postgres>,
    form: &UserForm,
) -> Result<(), AccountError> {
    // an unknown role must fail the write, a generated stand-in role id is
    // not an acceptable fallback
    let role = get_role_by_id(tx, &form.role_id).await.map_err(map_db_err)?;
    if role.is_none() {
        return Err(AccountError::Validation(format!(
            "role with id = {} not found",
            form.role_id
        )));
    }
    if let Some(upload_id) = form.upload_id {
        let upload = get_upload_by_id(tx, &upload_id).await.map_err(map_db_err)?;
        if upload.is_none() {
            return Err(AccountError::Validation(format!(
                "upload with id = {} not found",
                upload_id
            )));
        }
    }
    Ok(())
}

pub async fn create_user(
    tx: &mut Transaction<'_, Postgres>,
    form: &UserForm,
) -> Result<User, AccountError> {
    form.validate()?;
    check_references(tx, form).await?;

    let now = Local::now().fixed_offset();
    let mut user = User {
        id: Uuid::now_v7(),
        fullname: form.fullname.clone(),
        email: form.email.clone(),
        password: None,
        phone: form.phone.clone(),
        token_verify: None,
        is_active: form.is_active.unwrap_or(false),
        is_blocked: form.is_blocked.unwrap_or(false),
        role_id: form.role_id,
        upload_id: form.upload_id,
        created_date: Some(now),
        updated_date: Some(now),
        deleted_date: None,
    };
    set_user_password(&mut user, &form.password)?;
    insert_user(tx, &user).await.map_err(map_db_err)?;
    tracing::info!("created user {}", user.id);
    Ok(user)
}

pub async fn update_user_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
    form: &UserForm,
) -> Result<User, AccountError> {
    form.validate()?;
    let user = get_user_with_credentials_by_id(tx, id)
        .await
        .map_err(map_db_err)?;
    let mut user = user.ok_or_else(|| {
        AccountError::NotFound(format!("user with id = {} not found", id))
    })?;
    check_references(tx, form).await?;

    user.fullname = form.fullname.clone();
    user.email = form.email.clone();
    user.phone = form.phone.clone();
    user.is_active = form.is_active.unwrap_or(user.is_active);
    user.is_blocked = form.is_blocked.unwrap_or(user.is_blocked);
    user.role_id = form.role_id;
    user.upload_id = form.upload_id;
    set_user_password(&mut user, &form.password)?;

    let now = Local::now().fixed_offset();
    update_user(tx, &mut user, &now).await.map_err(map_db_err)?;
    tracing::info!("updated user {}", user.id);
    Ok(user)
}

/// Soft delete: the row keeps existing under `deleted_date`, the user's
/// sessions are revoked in the same transaction.
pub async fn soft_delete_user(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> Result<(), AccountError> {
    let user = get_user_with_credentials_by_id(tx, id)
        .await
        .map_err(map_db_err)?;
    let mut user = user.ok_or_else(|| {
        AccountError::NotFound(format!("user with id = {} not found", id))
    })?;
    let now = Local::now().fixed_offset();
    mark_user_deleted(tx, &mut user, &now)
        .await
        .map_err(map_db_err)?;
    let revoked = delete_sessions_by_user(tx, &user.id)
        .await
        .map_err(map_db_err)?;
    tracing::info!("soft deleted user {}, revoked {} sessions", user.id, revoked);
    Ok(())
}

/// Credential verification against the stored hash. Loads through the
/// with-credentials projection, a mismatch is `Ok(false)`, a missing or
/// corrupt stored hash is an error.
pub async fn verify_user_password(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    candidate: &str,
) -> Result<bool, AccountError> {
    let user = get_user_with_credentials_by_email(tx, email)
        .await
        .map_err(map_db_err)?;
    let user = user.ok_or_else(|| {
        AccountError::NotFound(format!("user with email = {} not found", email))
    })?;
    let password_hash = user
        .password
        .as_deref()
        .ok_or_else(|| AccountError::Hash("user has no stored password hash".to_string()))?;
    let matched = verify_hash_password(candidate, password_hash)
        .map_err(|err| AccountError::Hash(err.to_string()))?;
    Ok(matched)
}
