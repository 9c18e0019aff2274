use chrono::{DateTime, FixedOffset};
use fake::{Dummy, Fake, Faker};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::model::upload::{Upload, TABLE_NAME};

pub struct UploadFactory<T: Clone> {
    modifier_one: fn(x: &Upload, ext: T) -> Upload,
}

impl<T: Clone> Default for UploadFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> UploadFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Upload, ext: T) -> Upload) {
        self.modifier_one = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<Upload> {
        let data = UploadDummy::new().generate_one();
        let data = (self.modifier_one)(&data, ext);
        sqlx::query(
            format!(
                r#"
        INSERT INTO {} (id, file_name, path, mimetype, size, created_date, updated_date, deleted_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
                TABLE_NAME
            )
            .as_str(),
        )
        .bind(data.id)
        .bind(&data.file_name)
        .bind(&data.path)
        .bind(&data.mimetype)
        .bind(data.size)
        .bind(data.created_date)
        .bind(data.updated_date)
        .bind(data.deleted_date)
        .execute(db)
        .await?;
        Ok(data)
    }
}

#[derive(Debug, Default, Deserialize, Dummy, Clone)]
struct UploadDummy {
    pub id: Uuid,
    pub file_name: String,
    pub path: String,
    pub mimetype: Option<String>,
    pub created_date: Option<DateTime<FixedOffset>>,
    pub updated_date: Option<DateTime<FixedOffset>>,
}

impl UploadDummy {
    pub fn new() -> Self {
        Faker.fake::<Self>()
    }

    pub fn generate_one(&self) -> Upload {
        Upload {
            id: self.id,
            file_name: self.file_name.clone(),
            path: self.path.clone(),
            mimetype: self.mimetype.clone(),
            size: Some(1024),
            created_date: self.created_date,
            updated_date: self.updated_date,
            deleted_date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::factory::upload::UploadFactory;

    #[sqlx::test]
    async fn test_generate_one(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = UploadFactory::new();
        let upload = factory.generate_one(&pool, ()).await?;

        // Expect
        let num_data: (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM public.upload"#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 1);
        assert!(upload.deleted_date.is_none());
        Ok(())
    }
}
