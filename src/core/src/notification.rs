use crate::user::{User, UserRole};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "ids", rename_all = "snake_case")]
pub enum NotificationTarget {
    All,
    Roles(Vec<UserRole>),
    Users(Vec<u32>),
    Teams(Vec<u32>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u32,
    pub title: String,
    pub message: String,
    pub target: NotificationTarget,
    pub starts_at: NaiveDateTime,
    #[serde(default)]
    pub ends_at: Option<NaiveDateTime>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Notification {
    pub fn is_live(&self, now: NaiveDateTime) -> bool {
        self.is_active && self.starts_at <= now && self.ends_at.is_none_or(|end| end > now)
    }

    /// Anonymous visitors only see notifications addressed to everyone.
    pub fn is_visible_to(&self, viewer: Option<&User>, now: NaiveDateTime) -> bool {
        if !self.is_live(now) {
            return false;
        }

        match (&self.target, viewer) {
            (NotificationTarget::All, _) => true,
            (_, None) => false,
            (NotificationTarget::Roles(roles), Some(user)) => roles.contains(&user.role),
            (NotificationTarget::Users(ids), Some(user)) => ids.contains(&user.id),
            (NotificationTarget::Teams(ids), Some(user)) => {
                user.team_ids.iter().any(|team_id| ids.contains(team_id))
            }
        }
    }
}

pub fn visible_notifications<'a>(
    notifications: &'a [Notification],
    viewer: Option<&User>,
    now: NaiveDateTime,
) -> Vec<&'a Notification> {
    let mut visible: Vec<&Notification> = notifications
        .iter()
        .filter(|n| n.is_visible_to(viewer, now))
        .collect();

    visible.sort_by(|a, b| b.starts_at.cmp(&a.starts_at));
    visible
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationDraft {
    pub title: String,
    pub message: String,
    pub target: NotificationTarget,
    pub starts_at: NaiveDateTime,
    #[serde(default)]
    pub ends_at: Option<NaiveDateTime>,
}

impl NotificationDraft {
    pub fn into_notification(self, id: u32) -> Notification {
        Notification {
            id,
            title: self.title,
            message: self.message,
            target: self.target,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            is_active: true,
        }
    }
}
