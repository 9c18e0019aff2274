use chrono::{DateTime, FixedOffset};
use fake::{Dummy, Fake, Faker};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    core::mapping::insert_statement,
    factory::role::RoleFactory,
    model::user::{User, COLUMNS, TABLE_NAME},
};

pub struct UserFactory<T: Clone> {
    modifier_one: fn(x: &User, ext: T) -> User,
    modifier_many: fn(x: &User, idx: usize, ext: T) -> User,
}

impl<T: Clone> Default for UserFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> UserFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &User, ext: T) -> User) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &User, idx: usize, ext: T) -> User) {
        self.modifier_many = modifier
    }

    /// Generates a backing role first, every user row needs a resolvable
    /// role_id. Modifiers may still point role_id at an existing role.
    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<User> {
        let mut role_factory = RoleFactory::new();
        let role = role_factory.generate_one(db, ()).await?;
        let data = UserDummy::new().generate_one(role.id);
        let data = (self.modifier_one)(&data, ext);
        insert_user(db, &data).await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<User>> {
        let mut role_factory = RoleFactory::new();
        let role = role_factory.generate_one(db, ()).await?;
        let mut result: Vec<User> = vec![];
        for idx in 0..num {
            let data = UserDummy::new().generate_one(role.id);
            let data = (self.modifier_many)(&data, idx as usize, ext.clone());
            insert_user(db, &data).await?;
            result.push(data);
        }
        Ok(result)
    }
}

async fn insert_user(db: &PgPool, user: &User) -> anyhow::Result<()> {
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
    Ok(())
}

#[derive(Debug, Default, Deserialize, Dummy, Clone)]
struct UserDummy {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub token_verify: Option<String>,
    pub is_active: bool,
    pub is_blocked: bool,
    pub created_date: Option<DateTime<FixedOffset>>,
    pub updated_date: Option<DateTime<FixedOffset>>,
}

impl UserDummy {
    pub fn new() -> Self {
        Faker.fake::<Self>()
    }

    pub fn generate_one(&self, role_id: Uuid) -> User {
        User {
            id: self.id,
            fullname: self.fullname.clone(),
            // random local parts collide rarely, the id keeps emails unique
            email: format!("{}@factory.local", self.id.simple()),
            password: self.password.clone(),
            // phone column is bounded to 20 chars
            phone: self.phone.clone().map(|p| p.chars().take(20).collect()),
            token_verify: self.token_verify.clone(),
            is_active: self.is_active,
            is_blocked: self.is_blocked,
            role_id,
            upload_id: None,
            created_date: self.created_date,
            updated_date: self.updated_date,
            deleted_date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, Local};
    use sqlx::PgPool;
    use uuid::Uuid;

    use crate::{factory::user::UserFactory, model::user::User};

    #[derive(Clone)]
    struct ExtData {
        pub id: Uuid,
        pub created_date: DateTime<FixedOffset>,
        pub updated_date: DateTime<FixedOffset>,
    }

    #[sqlx::test]
    async fn test_generate_one(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = UserFactory::new();
        factory.generate_one(&pool, ()).await?;

        // Expect
        let num_data: (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM public.user"#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_one_modified(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = UserFactory::<ExtData>::new();
        factory.modified_one(|data, ext| User {
            id: ext.id,
            fullname: "Ann Lee".to_string(),
            email: "ann@example.com".to_string(),
            created_date: Some(ext.created_date),
            updated_date: Some(ext.updated_date),
            ..data.clone()
        });
        let now = Local::now().fixed_offset();
        let ext = ExtData {
            id: Uuid::now_v7(),
            created_date: now,
            updated_date: now,
        };
        factory.generate_one(&pool, ext.clone()).await?;

        // Expect
        let res: (Uuid, String, String, Option<DateTime<FixedOffset>>) = sqlx::query_as(
            r#"SELECT id, fullname, email, created_date FROM public.user"#,
        )
        .fetch_one(&pool)
        .await?;
        assert_eq!(res.0, ext.id);
        assert_eq!(res.1, "Ann Lee".to_string());
        assert_eq!(res.2, "ann@example.com".to_string());
        assert!(res.3.is_some());
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_many(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = UserFactory::new();
        factory.generate_many(&pool, 10, ()).await?;

        // Expect
        let num_data: (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM public.user"#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 10);
        Ok(())
    }
}
