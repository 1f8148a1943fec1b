use super::*;

#[test]
fn pops_in_due_order_then_schedule_order() {
    let mut q = TimerQueue::default();
    q.schedule(500, Deferred::Advance);
    q.schedule(100, Deferred::Snap);
    q.schedule(100, Deferred::Lock);

    assert_eq!(q.pop_due(99), None);
    assert_eq!(q.pop_due(1000), Some((100, Deferred::Snap)));
    assert_eq!(q.pop_due(1000), Some((100, Deferred::Lock)));
    assert_eq!(q.pop_due(1000), Some((500, Deferred::Advance)));
    assert_eq!(q.pop_due(1000), None);
}

#[test]
fn cancel_drops_every_matching_timer() {
    let mut q = TimerQueue::default();
    q.schedule(10, Deferred::Advance);
    q.schedule(20, Deferred::Snap);
    q.schedule(30, Deferred::Advance);
    q.cancel(Deferred::Advance);
    assert!(!q.is_pending(Deferred::Advance));
    assert!(!q.is_empty());
    q.clear();
    assert!(q.is_empty());
}

#[test]
fn next_due_tracks_the_earliest_timer() {
    let mut q = TimerQueue::default();
    assert!(q.is_empty());
    assert_eq!(q.next_due(), None);
    q.schedule(600, Deferred::Advance);
    q.schedule(400, Deferred::Lock);
    assert_eq!(q.next_due(), Some(400));
    q.cancel(Deferred::Lock);
    assert_eq!(q.next_due(), Some(600));
}
