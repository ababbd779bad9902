//! Display model for the profile page. It is built from the session store's
//! cached user, so showing the profile never costs a second request.

use crate::features::auth::{state::Session, types::UserSummary};
use chrono::{DateTime, NaiveDate};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountKind {
    Google,
    Email,
}

impl AccountKind {
    pub fn label(self) -> &'static str {
        match self {
            AccountKind::Google => "Google Account",
            AccountKind::Email => "Email Account",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub account_kind: AccountKind,
    pub member_since: String,
}

impl ProfileView {
    pub fn from_user(user: &UserSummary) -> Self {
        let account_kind = if user.is_federated() {
            AccountKind::Google
        } else {
            AccountKind::Email
        };

        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            account_kind,
            member_since: format_member_since(user.created_at.as_deref()),
        }
    }

    /// `None` unless the session holds a user.
    pub fn from_session(session: &Session) -> Option<Self> {
        session.user().map(Self::from_user)
    }
}

/// Renders a creation timestamp as e.g. "January 1, 2024". Unparseable values
/// are shown as sent.
fn format_member_since(created_at: Option<&str>) -> String {
    let Some(raw) = created_at.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return "Unknown".to_string();
    };

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.date_naive().format("%B %-d, %Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%B %-d, %Y").to_string();
    }

    raw.to_string()
}
