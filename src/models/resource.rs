use crate::db::DbResult;
use crate::models::types::{BuildingId, ResourceId};
use chrono::{DateTime, Utc};
use tokio_postgres::Row;

/// A bookable resource (room, projector, car, ...) as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Database ID
    pub id: ResourceId,
    /// Unique identifier exposed to the calendar backend
    pub uid: String,
    /// Building the resource is located in
    pub building_id: BuildingId,
    pub display_name: String,
    /// Email address used for invitations
    pub email: String,
    /// Category of the resource (e.g., "projector", "vehicle")
    pub resource_type: String,
    /// User ID of the person responsible for this resource
    pub contact_person_user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    pub fn try_from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get::<_, ResourceId>("id")?,
            uid: row.try_get("uid")?,
            building_id: row.try_get::<_, BuildingId>("building_id")?,
            display_name: row.try_get("display_name")?,
            email: row.try_get("email")?,
            resource_type: row.try_get("resource_type")?,
            contact_person_user_id: row.try_get("contact_person_user_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    /// Applies every field set on the update. Unset fields keep their stored value.
    pub fn apply(&mut self, update: &ResourceUpdate) {
        if let Some(building_id) = update.building_id {
            self.building_id = building_id;
        }
        if let Some(display_name) = &update.display_name {
            self.display_name = display_name.clone();
        }
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
        if let Some(resource_type) = &update.resource_type {
            self.resource_type = resource_type.clone();
        }
        if let Some(contact) = &update.contact_person_user_id {
            self.contact_person_user_id = Some(contact.clone());
        }
    }
}

/// Fields for a resource that does not exist yet.
#[derive(Debug, Clone)]
pub struct NewResource {
    pub uid: String,
    pub building_id: BuildingId,
    pub display_name: String,
    pub email: String,
    pub resource_type: String,
    pub contact_person_user_id: Option<String>,
}

/// Partial update of a resource, addressed by uid. A `None` field means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceUpdate {
    pub uid: String,
    pub building_id: Option<BuildingId>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub resource_type: Option<String>,
    pub contact_person_user_id: Option<String>,
}

impl ResourceUpdate {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }

    /// True when nothing besides the uid is set.
    pub fn is_noop(&self) -> bool {
        self.building_id.is_none()
            && self.display_name.is_none()
            && self.email.is_none()
            && self.resource_type.is_none()
            && self.contact_person_user_id.is_none()
    }
}

/// Building ids given on the command line. The value is read like a loose integer cast: leading
/// whitespace is skipped, then an optional sign and the leading digits are taken ("3rd" is 3,
/// "-4" is -4). No digits or a zero means "not provided". Values past the i64 range saturate.
pub fn parse_building_id(raw: &str) -> Option<BuildingId> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first().copied() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for d in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = i64::from(d - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        };
    }

    (value != 0).then_some(BuildingId(value))
}

/// Empty strings count as "not provided".
pub fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.is_empty())
}
