use chrono::{DateTime, FixedOffset};
use fake::{Dummy, Fake, Faker};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::model::role::{Role, TABLE_NAME};

pub struct RoleFactory<T: Clone> {
    modifier_one: fn(x: &Role, ext: T) -> Role,
    modifier_many: fn(x: &Role, idx: usize, ext: T) -> Role,
}

impl<T: Clone> Default for RoleFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> RoleFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Role, ext: T) -> Role) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Role, idx: usize, ext: T) -> Role) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<Role> {
        let data = RoleDummy::new().generate_one();
        let data = (self.modifier_one)(&data, ext);
        insert_role(db, &data).await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<Role>> {
        let mut result: Vec<Role> = vec![];
        for idx in 0..num {
            let data = RoleDummy::new().generate_one();
            let data = (self.modifier_many)(&data, idx as usize, ext.clone());
            insert_role(db, &data).await?;
            result.push(data);
        }
        Ok(result)
    }
}

async fn insert_role(db: &PgPool, role: &Role) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, role_name, description, created_date, updated_date, deleted_date)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(role.id)
    .bind(&role.role_name)
    .bind(&role.description)
    .bind(role.created_date)
    .bind(role.updated_date)
    .bind(role.deleted_date)
    .execute(db)
    .await?;
    Ok(())
}

#[derive(Debug, Default, Deserialize, Dummy, Clone)]
struct RoleDummy {
    pub id: Uuid,
    pub role_name: String,
    pub description: Option<String>,
    pub created_date: Option<DateTime<FixedOffset>>,
    pub updated_date: Option<DateTime<FixedOffset>>,
}

impl RoleDummy {
    pub fn new() -> Self {
        Faker.fake::<Self>()
    }

    // deleted_date stays None, a freshly generated role must be resolvable
    pub fn generate_one(&self) -> Role {
        Role {
            id: self.id,
            role_name: self.role_name.clone(),
            description: self.description.clone(),
            created_date: self.created_date,
            updated_date: self.updated_date,
            deleted_date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::factory::role::RoleFactory;

    #[sqlx::test]
    async fn test_generate_one(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = RoleFactory::new();
        let role = factory.generate_one(&pool, ()).await?;

        // Expect
        let num_data: (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM public.role"#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 1);
        assert!(role.deleted_date.is_none());
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_many(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = RoleFactory::new();
        factory.generate_many(&pool, 4, ()).await?;

        // Expect
        let num_data: (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM public.role"#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 4);
        Ok(())
    }
}
