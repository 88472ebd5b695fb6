use chartx::api::{DataEvent, DataEventQueue};

#[test]
fn appends_coalesce_keeping_the_newest_time() {
    let mut queue = DataEventQueue::new();
    queue.push("price", DataEvent::Appended { latest_time: 100 });
    queue.push("price", DataEvent::Appended { latest_time: 300 });
    queue.push("price", DataEvent::Appended { latest_time: 200 });

    assert_eq!(queue.len(), 1);
    assert_eq!(
        queue.pending("price"),
        Some(DataEvent::Appended { latest_time: 300 })
    );
}

#[test]
fn update_after_append_keeps_the_append_timestamp() {
    let mut queue = DataEventQueue::new();
    queue.push("price", DataEvent::Appended { latest_time: 100 });
    queue.push("price", DataEvent::Updated);

    assert_eq!(
        queue.pending("price"),
        Some(DataEvent::Appended { latest_time: 100 })
    );
}

#[test]
fn replace_discards_a_stale_append_timestamp() {
    let mut queue = DataEventQueue::new();
    queue.push("price", DataEvent::Appended { latest_time: 100 });
    queue.push("price", DataEvent::Replaced);

    assert_eq!(queue.pending("price"), Some(DataEvent::Replaced));
}

#[test]
fn append_after_clear_still_carries_its_timestamp() {
    let mut queue = DataEventQueue::new();
    queue.push("price", DataEvent::Cleared);
    queue.push("price", DataEvent::Appended { latest_time: 500 });

    assert_eq!(
        queue.pending("price"),
        Some(DataEvent::Appended { latest_time: 500 })
    );
}

#[test]
fn series_coalesce_independently_in_first_change_order() {
    let mut queue = DataEventQueue::new();
    queue.push("price", DataEvent::Appended { latest_time: 100 });
    queue.push("volume", DataEvent::Cleared);
    queue.push("price", DataEvent::Updated);

    assert_eq!(queue.len(), 2);
    let drained = queue.drain();
    let order: Vec<&str> = drained.keys().map(String::as_str).collect();
    assert_eq!(order, vec!["price", "volume"]);
    assert!(queue.is_empty());
}

#[test]
fn forget_drops_pending_events_for_a_series() {
    let mut queue = DataEventQueue::new();
    queue.push("price", DataEvent::Updated);
    queue.forget("price");
    assert!(queue.is_empty());
    assert_eq!(queue.pending("price"), None);
}
