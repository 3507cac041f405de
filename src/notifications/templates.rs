//! Synthetic Notification Templates
//!
//! Fixed template pools used by the synthetic generator, one pool per timed
//! notification kind. Each pool declares a title, a message with `{field}`
//! placeholders, and the field values of every entry.

use crate::notifications::types::{NewNotification, NotificationKind};

/// Field values for one template entry
pub type TemplateFields = &'static [(&'static str, &'static str)];

/// A declared pool of interchangeable templates for one kind
#[derive(Debug)]
pub struct TemplatePool {
    pub kind: NotificationKind,
    pub title: &'static str,
    pub message: &'static str,
    pub entries: &'static [TemplateFields],
}

impl TemplatePool {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render entry `index` into a payload. Out-of-range indices wrap.
    pub fn render(&self, index: usize) -> NewNotification {
        let fields = self.entries[index % self.entries.len()];
        NewNotification::new(
            self.kind,
            interpolate(self.title, fields),
            interpolate(self.message, fields),
        )
    }
}

pub static REMINDER_POOL: TemplatePool = TemplatePool {
    kind: NotificationKind::Reminder,
    title: "Session Reminder",
    message: "{child} has a session in {time} with {practitioner}",
    entries: &[
        &[("child", "Emma S."), ("practitioner", "Dr. Sarah Chen"), ("time", "15 minutes")],
        &[("child", "Noah J."), ("practitioner", "Dr. Michael Brown"), ("time", "30 minutes")],
        &[("child", "Olivia R."), ("practitioner", "Dr. Emily Parker"), ("time", "10 minutes")],
    ],
};

pub static DELAY_POOL: TemplatePool = TemplatePool {
    kind: NotificationKind::Delay,
    title: "Practitioner Running Late",
    message: "{practitioner} is running {minutes} minutes late for {child}'s session",
    entries: &[
        &[("practitioner", "Dr. Sarah Chen"), ("minutes", "15"), ("child", "Lucas M.")],
        &[("practitioner", "Dr. James Wilson"), ("minutes", "10"), ("child", "Emma S.")],
        &[("practitioner", "Dr. Emily Parker"), ("minutes", "20"), ("child", "Noah J.")],
    ],
};

pub static ARRIVAL_POOL: TemplatePool = TemplatePool {
    kind: NotificationKind::Arrival,
    title: "Child Arrival",
    message: "{child} {status}",
    entries: &[
        &[("child", "Emma S."), ("status", "has arrived")],
        &[("child", "Lucas M."), ("status", "has arrived early")],
        &[("child", "Noah J."), ("status", "is in the waiting area")],
    ],
};

pub static CONFIRMATION_POOL: TemplatePool = TemplatePool {
    kind: NotificationKind::Confirmation,
    title: "Session Confirmed",
    message: "Parent confirmed {child}'s session for {date} at {time}",
    entries: &[
        &[("child", "Olivia R."), ("date", "Tomorrow"), ("time", "10:00 AM")],
        &[("child", "Noah J."), ("date", "Friday"), ("time", "2:00 PM")],
        &[("child", "Emma S."), ("date", "Monday"), ("time", "9:00 AM")],
    ],
};

pub static CANCELLATION_POOL: TemplatePool = TemplatePool {
    kind: NotificationKind::Cancellation,
    title: "Session Cancelled",
    message: "{child}'s session has been cancelled - {reason}",
    entries: &[
        &[("child", "Lucas M."), ("reason", "Child is unwell")],
        &[("child", "Emma S."), ("reason", "Family emergency")],
        &[("child", "Noah J."), ("reason", "Rescheduling needed")],
    ],
};

/// Template pool driving the timer for `kind`. Info notifications are never
/// synthesized.
pub fn pool_for(kind: NotificationKind) -> Option<&'static TemplatePool> {
    match kind {
        NotificationKind::Reminder => Some(&REMINDER_POOL),
        NotificationKind::Delay => Some(&DELAY_POOL),
        NotificationKind::Arrival => Some(&ARRIVAL_POOL),
        NotificationKind::Confirmation => Some(&CONFIRMATION_POOL),
        NotificationKind::Cancellation => Some(&CANCELLATION_POOL),
        NotificationKind::Info => None,
    }
}

/// First startup seed: an upcoming session reminder
pub fn seed_reminder() -> NewNotification {
    NewNotification::new(
        NotificationKind::Reminder,
        "Upcoming Session",
        "Emma S. has a session in 15 minutes with Dr. Sarah Chen",
    )
}

/// Second startup seed: a practitioner delay
pub fn seed_delay() -> NewNotification {
    NewNotification::new(
        NotificationKind::Delay,
        "Practitioner Delay",
        "Dr. James Wilson running 10 minutes late for Lucas M.'s session",
    )
}

/// Replace `{name}` placeholders with field values. Unknown placeholders
/// are left as written.
pub fn interpolate(template: &str, fields: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        match after_open.find('}') {
            Some(close) => {
                let name = &after_open[..close];
                match fields.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) => output.push_str(value),
                    None => {
                        output.push('{');
                        output.push_str(name);
                        output.push('}');
                    }
                }
                rest = &after_open[close + 1..];
            }
            None => {
                output.push_str(&rest[open..]);
                rest = "";
            }
        }
    }

    output.push_str(rest);
    output
}
