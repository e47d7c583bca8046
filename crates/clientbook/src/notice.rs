//! Transient banners shown to the user.
//!
//! Every outcome of a user action ends up as a [`Notice`]: a short success
//! or error message attached to a region of the screen that disappears on its
//! own after a fixed lifetime. An [`Alert`] is the blocking variant used when
//! the store cannot be opened at all.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::client::Field;

/// Default time a notice stays visible.
pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(3);

/// Tone of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Something worked.
    Success,
    /// Something failed.
    Error,
}

/// Part of the screen a notice is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// The client form as a whole.
    Form,
    /// A single input of the form.
    Field(Field),
    /// The client list.
    List,
}

/// A transient banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Success or error.
    pub kind: NoticeKind,
    /// Where the banner is shown.
    pub region: Region,
    /// Text shown to the user.
    pub message: String,
    /// When the banner was raised.
    pub issued_at: DateTime<Utc>,
    /// When the banner dismisses itself.
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    /// Create a notice issued now.
    #[must_use]
    pub fn new(
        kind: NoticeKind,
        region: Region,
        message: impl Into<String>,
        lifetime: Duration,
    ) -> Self {
        let issued_at = Utc::now();
        let lifetime = TimeDelta::from_std(lifetime).unwrap_or(TimeDelta::MAX);
        Self {
            kind,
            region,
            message: message.into(),
            issued_at,
            expires_at: issued_at.checked_add_signed(lifetime).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Create a success notice.
    #[must_use]
    pub fn success(region: Region, message: impl Into<String>, lifetime: Duration) -> Self {
        Self::new(NoticeKind::Success, region, message, lifetime)
    }

    /// Create an error notice.
    #[must_use]
    pub fn error(region: Region, message: impl Into<String>, lifetime: Duration) -> Self {
        Self::new(NoticeKind::Error, region, message, lifetime)
    }

    /// Whether the notice should no longer be shown at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether this is an error notice.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// A blocking message the user must acknowledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    /// Text shown to the user.
    pub message: String,
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// The set of banners currently on screen.
///
/// A region shows at most one banner of each kind: posting a new one
/// replaces the old.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
}

impl NoticeBoard {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notice, replacing any notice of the same kind in its region.
    pub fn post(&mut self, notice: Notice) {
        self.dismiss(notice.region, notice.kind);
        self.notices.push(notice);
    }

    /// Remove the notice of `kind` shown in `region`, if any.
    pub fn dismiss(&mut self, region: Region, kind: NoticeKind) {
        self.notices
            .retain(|n| !(n.region == region && n.kind == kind));
    }

    /// Drop expired notices and return those still visible at `now`.
    pub fn active(&mut self, now: DateTime<Utc>) -> &[Notice] {
        self.notices.retain(|n| !n.is_expired(now));
        &self.notices
    }

    /// Notices currently held, expired or not.
    #[must_use]
    pub fn all(&self) -> &[Notice] {
        &self.notices
    }
}
