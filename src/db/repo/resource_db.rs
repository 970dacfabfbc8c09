use crate::db::error::DbError;
use crate::db::repo::ResourceRepo;
use crate::db::{Db, DbResult, map_row_opt};
use crate::models::resource::{Resource, ResourceUpdate};
use std::sync::Arc;

pub struct ResourceRepository {
    db: Arc<Db>,
}

impl ResourceRepository {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db: db.clone() }
    }
}

#[async_trait::async_trait]
impl ResourceRepo for ResourceRepository {
    async fn update(&self, update: ResourceUpdate) -> DbResult<Resource> {
        let client = self.db.get_client().await?;

        let stmt = client
            .prepare_cached(
                r#"
            UPDATE calresources_resources
            SET building_id = COALESCE($2, building_id),
                display_name = COALESCE($3, display_name),
                email = COALESCE($4, email),
                resource_type = COALESCE($5, resource_type),
                contact_person_user_id = COALESCE($6, contact_person_user_id),
                updated_at = now()
            WHERE uid = $1
            RETURNING id, uid, building_id, display_name, email, resource_type,
                contact_person_user_id, created_at, updated_at
        "#,
            )
            .await
            .map_err(DbError::from_pg)?;

        let row_opt = client
            .query_opt(
                &stmt,
                &[
                    &update.uid,
                    &update.building_id,
                    &update.display_name,
                    &update.email,
                    &update.resource_type,
                    &update.contact_person_user_id,
                ],
            )
            .await
            .map_err(DbError::from_pg)?;

        map_row_opt(
            row_opt,
            Resource::try_from_row,
            &format!("ResourceRepo::update uid={}", update.uid),
        )?
        .ok_or(DbError::NotFound)
    }

    async fn get_by_uid(&self, uid: &str) -> DbResult<Option<Resource>> {
        let client = self.db.get_client().await?;

        let stmt = client
            .prepare_cached(
                r#"
            SELECT id, uid, building_id, display_name, email, resource_type,
                contact_person_user_id, created_at, updated_at
            FROM calresources_resources
            WHERE uid = $1
        "#,
            )
            .await?;

        let row_opt = client.query_opt(&stmt, &[&uid]).await?;
        map_row_opt(
            row_opt,
            Resource::try_from_row,
            &format!("ResourceRepo::get_by_uid uid={}", uid),
        )
    }
}
