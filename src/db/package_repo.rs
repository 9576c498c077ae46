// src/db/package_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::package::{NewPackage, Package, PackagePatch},
};

#[derive(Clone)]
pub struct PackageRepository {
    pool: PgPool,
}

impl PackageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewPackage) -> Result<Package, AppError> {
        // image_url nulo cai no default do banco (foto de stock)
        let pkg = sqlx::query_as::<_, Package>(
            r#"
            INSERT INTO packages (
                title, location, days, price_from, description,
                tag, category, image_url, images, highlights
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7,
                    COALESCE($8, 'https://images.unsplash.com/photo-1488646953014-85cb44e25828?q=80&w=1200'),
                    $9, $10)
            RETURNING *
            "#,
        )
        .bind(&new.title)
        .bind(&new.location)
        .bind(new.days)
        .bind(new.price_from)
        .bind(&new.description)
        .bind(new.tag)
        .bind(new.category)
        .bind(&new.image_url)
        .bind(&new.images)
        .bind(&new.highlights)
        .fetch_one(&self.pool)
        .await?;

        Ok(pkg)
    }

    pub async fn list(&self) -> Result<Vec<Package>, AppError> {
        let packages =
            sqlx::query_as::<_, Package>("SELECT * FROM packages ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(packages)
    }

    pub async fn get(&self, id: Uuid) -> Result<Package, AppError> {
        sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Package not found"))
    }

    pub async fn update(&self, id: Uuid, patch: PackagePatch) -> Result<Package, AppError> {
        let pkg = sqlx::query_as::<_, Package>(
            r#"
            UPDATE packages
            SET title       = COALESCE($2, title),
                location    = COALESCE($3, location),
                days        = COALESCE($4, days),
                price_from  = COALESCE($5, price_from),
                description = COALESCE($6, description),
                tag         = COALESCE($7, tag),
                category    = COALESCE($8, category),
                image_url   = COALESCE($9, image_url),
                images      = COALESCE($10, images),
                highlights  = COALESCE($11, highlights),
                is_active   = COALESCE($12, is_active),
                updated_at  = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.location)
        .bind(patch.days)
        .bind(patch.price_from)
        .bind(patch.description)
        .bind(patch.tag)
        .bind(patch.category)
        .bind(patch.image_url)
        .bind(patch.images)
        .bind(patch.highlights)
        .bind(patch.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Package not found"))?;

        Ok(pkg)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM packages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Package not found"));
        }
        Ok(())
    }
}
