use std::sync::Arc;
use std::time::Duration;

use deskfeed::display::{ClickTarget, ColourManager, NotificationCenter};
use deskfeed::notifications::{
    forward_to_store, ChannelPublisher, FeedSession, GeneratorConfig, NewNotification, NotificationError,
    NotificationKind, NotificationPublisher, NotificationStore, PublishOutcome, RecordingToastSink, SequencePicker,
    SyntheticGenerator, ToastSeverity,
};

fn recording_store() -> (NotificationStore, Arc<RecordingToastSink>) {
    let sink = Arc::new(RecordingToastSink::new());
    (NotificationStore::new(sink.clone()), sink)
}

#[tokio::test(start_paused = true)]
async fn test_seeded_feed_through_channel() {
    let (store, sink) = recording_store();
    let (publisher, receiver) = ChannelPublisher::new();
    let forwarder = forward_to_store(receiver, store.clone());

    let generator = SyntheticGenerator::with_picker(GeneratorConfig::default(), Arc::new(SequencePicker::constant(0)));
    let handle = generator.start(Arc::new(publisher)).unwrap();

    tokio::time::sleep(Duration::from_secs(6)).await;

    let titles: Vec<String> = store.notifications().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["Practitioner Delay", "Upcoming Session"]);
    assert_eq!(store.unread_count(), 2);

    let severities: Vec<ToastSeverity> = sink.toasts().iter().map(|t| t.severity).collect();
    assert_eq!(severities, vec![ToastSeverity::Default, ToastSeverity::Destructive]);

    // Dropping the handle releases the publisher, which ends the forwarder
    drop(handle);
    drop(generator);
    let forwarded = tokio::time::timeout(Duration::from_secs(1), forwarder).await.unwrap().unwrap();
    assert_eq!(forwarded, 2);
}

#[tokio::test(start_paused = true)]
async fn test_session_lifecycle_with_panel() {
    let (store, _sink) = recording_store();
    let mut session = FeedSession::builder()
        .store(store.clone())
        .generator(GeneratorConfig::default())
        .picker(Arc::new(SequencePicker::constant(0)))
        .build()
        .unwrap();
    session.start_generator().unwrap();

    let mut center = NotificationCenter::new(store.clone(), ColourManager::with_colours(false));

    tokio::time::sleep(Duration::from_secs(46)).await;
    // Two seeds plus the first reminder tick at 45 s
    assert_eq!(store.len(), 3);
    assert_eq!(center.badge().as_deref(), Some("3"));

    let newest = store.notifications()[0].id;
    center.click(ClickTarget::Row(newest));
    assert_eq!(center.badge().as_deref(), Some("2"));

    let oldest = store.notifications()[2].id;
    center.click(ClickTarget::Dismiss(oldest));
    assert_eq!(store.len(), 2);
    assert_eq!(store.unread_count(), 1);

    center.click(ClickTarget::MarkAllRead);
    assert_eq!(center.badge(), None);

    session.shutdown().await;
    assert!(store.is_closed());

    // Late events after teardown are ignored
    assert_eq!(
        store.publish(NewNotification::new(NotificationKind::Info, "Late", "ignored")),
        PublishOutcome::Dropped
    );
    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(store.len(), 2);
}

#[test]
fn test_session_requires_store() {
    let result = FeedSession::builder().build();
    assert!(matches!(result, Err(NotificationError::MissingContext { .. })));
}

#[test]
fn test_collaborator_payloads_reach_the_feed() {
    let (store, sink) = recording_store();

    store.add(NewNotification::child_registered("Mia K.", 4, "Anna K."));
    store.add(NewNotification::appointment_booked("Noah J.", "March 3rd, 2025", "10:30 AM", "Dr. Emily Parker"));

    let notifications = store.notifications();
    assert_eq!(notifications[0].title, "Appointment Booked");
    assert_eq!(notifications[1].title, "New Child Registered");
    assert!(notifications.iter().all(|n| n.kind == NotificationKind::Confirmation));
    assert_eq!(sink.len(), 2);
}
