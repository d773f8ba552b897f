use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The collections the backend persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Post,
    Comment,
    Category,
}

impl EntityKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityKind::User => "User",
            EntityKind::Post => "Post",
            EntityKind::Comment => "Comment",
            EntityKind::Category => "Category",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behaviour shared by every soft-deletable entity.
pub trait Entity: Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> Uuid;

    /// The user who may mutate this entity besides administrators.
    /// `None` means only administrators may.
    fn owner_id(&self) -> Option<Uuid>;

    fn is_active(&self) -> bool;

    /// Marks the entity inactive. There is no way back.
    fn deactivate(&mut self, at: DateTime<Utc>);

    /// Records a modification time.
    fn touch(&mut self, at: DateTime<Utc>);
}
