//! Notification centre: bell trigger and slide-over panel
//!
//! Renders the store's current state as text and turns clicks into store
//! mutations. The only state held here is whether the panel is open; every
//! notification detail is read from the store on demand.

use chrono::{DateTime, Utc};
use log::debug;

use crate::display::badge::badge_label;
use crate::display::colours::ColourManager;
use crate::display::format::format_relative;
use crate::notifications::{ColourToken, IconKey, NotificationId, NotificationStore};

const PANEL_TITLE: &str = "Notifications";
const EMPTY_HEADLINE: &str = "No notifications yet";
const EMPTY_DETAIL: &str = "We'll notify you about sessions and updates";
const MARK_ALL_LABEL: &str = "[Mark all read]";
const CLEAR_ALL_LABEL: &str = "[Clear all]";
const DISMISS_LABEL: &str = "[x]";
const UNREAD_MARKER: &str = "●";

/// Something the user can click in the notification centre
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The bell button; toggles the panel
    Bell,
    /// The body of a notification row
    Row(NotificationId),
    /// The dismiss control nested inside a notification row
    Dismiss(NotificationId),
    MarkAllRead,
    ClearAll,
}

impl ClickTarget {
    /// Row enclosing this target, if any
    fn enclosing_row(&self) -> Option<NotificationId> {
        match self {
            ClickTarget::Row(id) | ClickTarget::Dismiss(id) => Some(*id),
            _ => None,
        }
    }
}

/// A click travelling from its target out through enclosing elements
#[derive(Debug)]
struct ClickEvent {
    target: ClickTarget,
    propagation_stopped: bool,
}

impl ClickEvent {
    fn new(target: ClickTarget) -> Self {
        Self {
            target,
            propagation_stopped: false,
        }
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Display model for one notification row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelItem {
    pub id: NotificationId,
    pub icon: IconKey,
    pub colour: ColourToken,
    pub title: String,
    pub message: String,
    pub relative_time: String,
    pub unread: bool,
}

/// Bell trigger plus slide-over notification panel
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    store: NotificationStore,
    colours: ColourManager,
    open: bool,
}

impl NotificationCenter {
    pub fn new(store: NotificationStore, colours: ColourManager) -> Self {
        Self {
            store,
            colours,
            open: false,
        }
    }

    pub fn store(&self) -> &NotificationStore {
        &self.store
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Badge text for the bell, `None` when hidden
    pub fn badge(&self) -> Option<String> {
        badge_label(self.store.unread_count())
    }

    /// Whether "mark all read" and "clear all" can be used
    pub fn bulk_controls_enabled(&self) -> bool {
        !self.store.is_empty()
    }

    /// Handle a click. Returns false when the target was not interactable.
    pub fn click(&mut self, target: ClickTarget) -> bool {
        let mut event = ClickEvent::new(target);

        match event.target {
            ClickTarget::Bell => {
                self.open = !self.open;
                debug!("Notification panel {}", if self.open { "opened" } else { "closed" });
                return true;
            }
            ClickTarget::MarkAllRead | ClickTarget::ClearAll if !self.bulk_controls_enabled() => {
                debug!("Ignoring {:?} on an empty feed", event.target);
                return false;
            }
            ClickTarget::MarkAllRead => {
                self.store.mark_all_as_read();
                return true;
            }
            ClickTarget::ClearAll => {
                self.store.clear_all();
                return true;
            }
            ClickTarget::Dismiss(id) => {
                // Dismissing must not also mark the row read
                event.stop_propagation();
                self.store.clear_one(&id);
            }
            ClickTarget::Row(_) => {}
        }

        if !event.propagation_stopped {
            if let Some(row) = event.target.enclosing_row() {
                self.store.mark_as_read(&row);
            }
        }
        true
    }

    /// Display models for every notification, newest first
    pub fn items(&self, now: DateTime<Utc>) -> Vec<PanelItem> {
        self.store
            .notifications()
            .into_iter()
            .map(|notification| {
                let style = notification.kind.style();
                PanelItem {
                    id: notification.id,
                    icon: style.icon,
                    colour: style.colour,
                    relative_time: format_relative(notification.timestamp, now),
                    unread: !notification.read,
                    title: notification.title,
                    message: notification.message,
                }
            })
            .collect()
    }

    /// Render the bell trigger with its badge
    pub fn render_trigger(&self) -> String {
        let bell = IconKey::Bell.glyph();
        match self.badge() {
            Some(label) => format!(
                "[{} {}]",
                bell,
                self.colours.token(&label, ColourToken::Destructive)
            ),
            None => format!("[{}]", bell),
        }
    }

    /// Render the panel contents
    pub fn render_panel(&self, now: DateTime<Utc>) -> String {
        let items = self.items(now);
        let mut lines = Vec::new();

        if items.is_empty() {
            lines.push(self.colours.strong(PANEL_TITLE).to_string());
            lines.push(String::new());
            lines.push(format!(
                "  {} {}",
                self.colours.muted(IconKey::Bell.glyph()),
                self.colours.muted(EMPTY_HEADLINE)
            ));
            lines.push(format!("    {}", self.colours.muted(EMPTY_DETAIL)));
            return lines.join("\n");
        }

        lines.push(format!(
            "{}  {} {}",
            self.colours.strong(PANEL_TITLE),
            MARK_ALL_LABEL,
            CLEAR_ALL_LABEL
        ));
        lines.push(String::new());

        for item in &items {
            let (gutter, title) = if item.unread {
                ("▌", format!("{} {}", self.colours.strong(&item.title), self.colours.token(UNREAD_MARKER, ColourToken::Primary)))
            } else {
                (" ", item.title.clone())
            };
            lines.push(format!(
                "{} {} {}  {}",
                gutter,
                self.colours.token(item.icon.glyph(), item.colour),
                title,
                DISMISS_LABEL
            ));
            lines.push(format!("{}   {}", gutter, item.message));
            lines.push(format!("{}   {}", gutter, self.colours.muted(&item.relative_time)));
        }

        lines.join("\n")
    }
}
