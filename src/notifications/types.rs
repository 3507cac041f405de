//! Notification Record Types
//!
//! The notification record, the payload collaborators hand to the store, and
//! the per-kind style table used by the presentation surface and toast sink.

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::notifications::error::NotificationError;

/// Closed set of notification kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Reminder,
    Delay,
    Confirmation,
    Cancellation,
    Arrival,
    Info,
}

impl NotificationKind {
    /// Every kind, in declaration order
    pub const ALL: [NotificationKind; 6] = [
        NotificationKind::Reminder,
        NotificationKind::Delay,
        NotificationKind::Confirmation,
        NotificationKind::Cancellation,
        NotificationKind::Arrival,
        NotificationKind::Info,
    ];

    /// Lowercase name used in configuration and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Reminder => "reminder",
            NotificationKind::Delay => "delay",
            NotificationKind::Confirmation => "confirmation",
            NotificationKind::Cancellation => "cancellation",
            NotificationKind::Arrival => "arrival",
            NotificationKind::Info => "info",
        }
    }

    /// Look up the presentation style for this kind
    pub fn style(&self) -> &'static KindStyle {
        &KIND_STYLES[*self as usize]
    }

    /// Toast severity for this kind
    pub fn severity(&self) -> ToastSeverity {
        self.style().severity
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = NotificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        NotificationKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| NotificationError::InvalidKind(s.to_string()))
    }
}

/// Severity passed to the toast sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastSeverity {
    Default,
    Destructive,
}

impl ToastSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastSeverity::Default => "default",
            ToastSeverity::Destructive => "destructive",
        }
    }
}

/// Icon shown next to a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKey {
    Bell,
    Clock,
    CheckCircle,
    XCircle,
    Calendar,
    AlertCircle,
}

impl IconKey {
    pub fn name(&self) -> &'static str {
        match self {
            IconKey::Bell => "bell",
            IconKey::Clock => "clock",
            IconKey::CheckCircle => "check-circle",
            IconKey::XCircle => "x-circle",
            IconKey::Calendar => "calendar",
            IconKey::AlertCircle => "alert-circle",
        }
    }

    /// Single-width terminal glyph for the icon
    pub fn glyph(&self) -> &'static str {
        match self {
            IconKey::Bell => "♪",
            IconKey::Clock => "◷",
            IconKey::CheckCircle => "✔",
            IconKey::XCircle => "✖",
            IconKey::Calendar => "▦",
            IconKey::AlertCircle => "ⓘ",
        }
    }
}

/// Theme colour token, mapped onto terminal colours by the display layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourToken {
    Primary,
    Warning,
    Success,
    Destructive,
    Secondary,
    Muted,
}

/// Presentation attributes for a notification kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindStyle {
    pub icon: IconKey,
    pub colour: ColourToken,
    pub severity: ToastSeverity,
}

// Indexed by `NotificationKind as usize`. Only delay and cancellation are destructive.
const KIND_STYLES: [KindStyle; 6] = [
    KindStyle { icon: IconKey::Bell, colour: ColourToken::Primary, severity: ToastSeverity::Default },
    KindStyle { icon: IconKey::Clock, colour: ColourToken::Warning, severity: ToastSeverity::Destructive },
    KindStyle { icon: IconKey::CheckCircle, colour: ColourToken::Success, severity: ToastSeverity::Default },
    KindStyle { icon: IconKey::XCircle, colour: ColourToken::Destructive, severity: ToastSeverity::Destructive },
    KindStyle { icon: IconKey::Calendar, colour: ColourToken::Secondary, severity: ToastSeverity::Default },
    KindStyle { icon: IconKey::AlertCircle, colour: ColourToken::Muted, severity: ToastSeverity::Default },
];

/// Opaque notification identifier, rendered as `notif-<uuid>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(Uuid);

impl NotificationId {
    const PREFIX: &'static str = "notif-";

    /// Generate a fresh, time-ordered identifier
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for NotificationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix(Self::PREFIX).unwrap_or(s);
        Uuid::parse_str(raw).map(Self)
    }
}

impl Serialize for NotificationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NotificationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single notification record held by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    /// Deep link reserved for navigation; never followed by the feed itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

impl Notification {
    /// Stamp a payload with a fresh id and the current time
    pub(crate) fn from_payload(payload: NewNotification) -> Self {
        Self {
            id: NotificationId::generate(),
            kind: payload.kind,
            title: payload.title,
            message: payload.message,
            timestamp: Utc::now(),
            read: false,
            action_url: payload.action_url,
        }
    }

    pub fn is_unread(&self) -> bool {
        !self.read
    }
}

/// Notification payload accepted by the store; id, timestamp and read
/// state are assigned on insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

impl NewNotification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            action_url: None,
        }
    }

    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }

    /// Confirmation raised once a new child has been registered at the desk
    pub fn child_registered(child_name: &str, age: u32, parent_name: &str) -> Self {
        Self::new(
            NotificationKind::Confirmation,
            "New Child Registered",
            format!(
                "{} ({} years old) has been successfully registered with parent {}",
                child_name, age, parent_name
            ),
        )
    }

    /// Confirmation raised once a therapy session has been booked
    pub fn appointment_booked(child_name: &str, date: &str, time_slot: &str, practitioner: &str) -> Self {
        Self::new(
            NotificationKind::Confirmation,
            "Appointment Booked",
            format!(
                "Session for {} scheduled on {} at {} with {}",
                child_name, date, time_slot, practitioner
            ),
        )
    }
}

/// Transient alert forwarded to the toast sink for every new arrival
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub body: String,
    pub severity: ToastSeverity,
    pub icon: IconKey,
}

impl Toast {
    pub fn for_notification(notification: &Notification) -> Self {
        let style = notification.kind.style();
        Self {
            title: notification.title.clone(),
            body: notification.message.clone(),
            severity: style.severity,
            icon: style.icon,
        }
    }
}
