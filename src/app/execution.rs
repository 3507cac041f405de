//! Application execution and session management

use anyhow::Result;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use log::{debug, info};
use crate::{cli, config, display};
use crate::display::{CompactFormat, NotificationCenter};
use crate::notifications::{FeedSession, Notification, NotificationStore};

/// What a finished session leaves behind
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub total: usize,
    pub unread: usize,
    pub published: u64,
    pub elapsed: Duration,
    pub notifications: Vec<Notification>,
}

impl CompactFormat for SessionReport {
    fn to_compact_format(&self) -> String {
        format!(
            "Notifications: {} | Unread: {} | Published: {} | Elapsed: {}s",
            self.total,
            self.unread,
            self.published,
            self.elapsed.as_secs()
        )
    }
}

/// Why the panel loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Elapsed,
    Interrupted,
}

/// Run one reception-desk session until `--run-for` elapses or ctrl-c
pub async fn run_session(
    args: &cli::Args,
    config: &config::ConfigManager,
    colours: display::ColourManager,
) -> Result<SessionReport> {
    let generator_config = cli::args_to_generator_config(args, Some(config))?;
    let run_for = cli::args_to_run_duration(args)?;

    let sink = display::ConsoleToastSink::stdout(colours.clone());
    let store = NotificationStore::new(Arc::new(sink));

    let mut session = FeedSession::builder()
        .store(store.clone())
        .generator(generator_config)
        .build()?;
    session.start_generator()?;

    let mut center = NotificationCenter::new(store.clone(), colours);
    center.set_open(true);

    info!("Feed session running for {}s", run_for.as_secs());
    let started = tokio::time::Instant::now();
    let reason = drive_panel(&center, run_for, &mut std::io::stdout()).await?;
    debug!("Panel loop stopped: {:?}", reason);

    let published = session.generator_handle().map_or(0, |h| h.published_count());
    let notifications = store.notifications();
    session.shutdown().await;

    Ok(SessionReport {
        total: notifications.len(),
        unread: notifications.iter().filter(|n| n.is_unread()).count(),
        published,
        elapsed: started.elapsed(),
        notifications,
    })
}

/// Re-render the trigger and panel after every store change.
///
/// The center holds a store handle for the whole loop, so the revision
/// channel stays open until the deadline or an interrupt ends it.
pub async fn drive_panel(
    center: &NotificationCenter,
    run_for: Duration,
    out: &mut dyn Write,
) -> Result<StopReason> {
    let mut revisions = center.store().subscribe();
    render(center, out)?;

    let deadline = tokio::time::sleep(run_for);
    tokio::pin!(deadline);
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);

    loop {
        tokio::select! {
            _ = &mut deadline => return Ok(StopReason::Elapsed),
            _ = &mut interrupted => {
                info!("Interrupted, shutting down");
                return Ok(StopReason::Interrupted);
            }
            Ok(()) = revisions.changed() => render(center, out)?,
        }
    }
}

fn render(center: &NotificationCenter, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\n{}", center.render_trigger())?;
    if center.is_open() {
        writeln!(out, "{}", center.render_panel(Utc::now()))?;
    }
    out.flush()?;
    Ok(())
}

/// Print the final feed as pretty JSON
pub fn dump_json(report: &SessionReport, out: &mut dyn Write) -> Result<()> {
    let json = serde_json::to_string_pretty(&report.notifications)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{NewNotification, NotificationKind, NullToastSink};

    fn center() -> NotificationCenter {
        let store = NotificationStore::new(Arc::new(NullToastSink));
        let mut center = NotificationCenter::new(store, display::ColourManager::with_colours(false));
        center.set_open(true);
        center
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_panel_renders_on_every_change() {
        let center = center();
        let store = center.store().clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            store.add(NewNotification::new(NotificationKind::Arrival, "Child Arrival", "Emma S. has arrived"));
        });

        let mut out = Vec::new();
        let reason = drive_panel(&center, Duration::from_secs(3), &mut out).await.unwrap();
        assert_eq!(reason, StopReason::Elapsed);

        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("\n[♪]\nNotifications"));
        assert!(output.contains("No notifications yet"));
        assert!(output.contains("[♪ 1]"));
        assert!(output.contains("▦ Child Arrival"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_panel_outlives_other_store_handles() {
        let center = center();
        let mut out = Vec::new();

        let reason = drive_panel(&center, Duration::from_secs(2), &mut out).await.unwrap();
        assert_eq!(reason, StopReason::Elapsed);

        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.matches("[♪]").count(), 1);
    }

    #[test]
    fn test_report_compact_format_and_json() {
        let report = SessionReport {
            total: 0,
            unread: 0,
            published: 3,
            elapsed: Duration::from_secs(120),
            notifications: Vec::new(),
        };
        assert_eq!(
            report.to_compact_format(),
            "Notifications: 0 | Unread: 0 | Published: 3 | Elapsed: 120s"
        );

        let mut out = Vec::new();
        dump_json(&report, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
