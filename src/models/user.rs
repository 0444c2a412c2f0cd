use serde::Serialize;

use crate::entities::users;
use crate::models::parking_lot::Lifecycle;

/// Domain user without the password hash.
///
/// `is_active` is an administrative gate and is tracked separately from the
/// soft-delete lifecycle: a disabled account still exists, a deleted one
/// must never resolve at all.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub is_superuser: bool,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub lifecycle: Lifecycle,
}

impl User {
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        !self.lifecycle.is_active()
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        let lifecycle = match model.deleted_at {
            Some(at) => Lifecycle::Deleted { at },
            None => Lifecycle::Active,
        };
        Self {
            id: model.id,
            username: model.username,
            is_superuser: model.is_superuser,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
            lifecycle,
        }
    }
}
