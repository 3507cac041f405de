//! Unread badge shown on the bell trigger

/// Highest count shown verbatim; larger counts render as "9+"
pub const BADGE_CAP: usize = 9;

/// Badge text for an unread count, or `None` when the badge is hidden
pub fn badge_label(unread: usize) -> Option<String> {
    match unread {
        0 => None,
        n if n > BADGE_CAP => Some(format!("{}+", BADGE_CAP)),
        n => Some(n.to_string()),
    }
}
