use crate::db::DbResult;
use crate::db::error::DbError;
use crate::db::repo::ResourceRepo;
use crate::models::resource::{NewResource, Resource, ResourceUpdate};
use crate::models::types::{BuildingId, ResourceId};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

/// Ephemeral resource storage with the same semantics as the postgres repository.
pub struct MemoryResourceRepository {
    resources: DashMap<String, Resource>,
    buildings: DashMap<BuildingId, String>,
    next_id: AtomicI64,
}

impl Default for MemoryResourceRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryResourceRepository {
    pub fn new() -> Self {
        Self {
            resources: DashMap::new(),
            buildings: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn add_building(&self, id: BuildingId, display_name: impl Into<String>) {
        self.buildings.insert(id, display_name.into());
    }

    pub fn insert(&self, new: NewResource) -> DbResult<Resource> {
        self.check_building(new.building_id)?;

        match self.resources.entry(new.uid.clone()) {
            Entry::Occupied(_) => Err(DbError::UniqueViolation(format!("uid {} already exists", new.uid))),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let resource = Resource {
                    id: ResourceId(self.next_id.fetch_add(1, Ordering::Relaxed)),
                    uid: new.uid,
                    building_id: new.building_id,
                    display_name: new.display_name,
                    email: new.email,
                    resource_type: new.resource_type,
                    contact_person_user_id: new.contact_person_user_id,
                    created_at: now,
                    updated_at: now,
                };
                slot.insert(resource.clone());
                Ok(resource)
            }
        }
    }

    fn check_building(&self, id: BuildingId) -> DbResult<()> {
        if self.buildings.contains_key(&id) {
            Ok(())
        } else {
            Err(DbError::ForeignKey(format!("building {id} does not exist")))
        }
    }
}

#[async_trait]
impl ResourceRepo for MemoryResourceRepository {
    async fn update(&self, update: ResourceUpdate) -> DbResult<Resource> {
        if let Some(building_id) = update.building_id {
            self.check_building(building_id)?;
        }

        let mut entry = self.resources.get_mut(&update.uid).ok_or(DbError::NotFound)?;
        let resource = entry.value_mut();
        resource.apply(&update);
        resource.updated_at = Utc::now();

        Ok(resource.clone())
    }

    async fn get_by_uid(&self, uid: &str) -> DbResult<Option<Resource>> {
        Ok(self.resources.get(uid).map(|r| r.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo_with_room() -> MemoryResourceRepository {
        let repo = MemoryResourceRepository::new();
        repo.add_building(BuildingId(1), "Headquarters");
        repo.add_building(BuildingId(3), "Annex");
        repo.insert(NewResource {
            uid: "room-42".into(),
            building_id: BuildingId(1),
            display_name: "Small Hall".into(),
            email: "room-42@example.org".into(),
            resource_type: "room".into(),
            contact_person_user_id: None,
        })
        .unwrap();
        repo
    }

    #[tokio::test]
    async fn update_changes_only_set_fields() {
        let repo = repo_with_room();

        let updated = repo
            .update(ResourceUpdate {
                building_id: Some(BuildingId(3)),
                display_name: Some("Main Hall".into()),
                ..ResourceUpdate::new("room-42")
            })
            .await
            .unwrap();

        assert_eq!(updated.id, ResourceId(1));
        assert_eq!(updated.building_id, BuildingId(3));
        assert_eq!(updated.display_name, "Main Hall");
        assert_eq!(updated.email, "room-42@example.org");
        assert!(updated.updated_at >= updated.created_at);

        let stored = repo.get_by_uid("room-42").await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn unknown_uid_is_not_found() {
        let repo = repo_with_room();
        let err = repo.update(ResourceUpdate::new("room-99")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound));
    }

    #[tokio::test]
    async fn unknown_building_is_foreign_key_violation() {
        let repo = repo_with_room();
        let err = repo
            .update(ResourceUpdate {
                building_id: Some(BuildingId(8)),
                ..ResourceUpdate::new("room-42")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKey(_)));

        let stored = repo.get_by_uid("room-42").await.unwrap().unwrap();
        assert_eq!(stored.building_id, BuildingId(1));
    }

    #[test]
    fn duplicate_uid_is_unique_violation() {
        let repo = repo_with_room();
        let err = repo
            .insert(NewResource {
                uid: "room-42".into(),
                building_id: BuildingId(1),
                display_name: "Other".into(),
                email: "other@example.org".into(),
                resource_type: "room".into(),
                contact_person_user_id: None,
            })
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation(_)));
    }
}
