use supplyline::domain::demand::{DemandBacklog, DemandRequest, ExpiryPolicy};
use supplyline::domain::id::NodeId;

fn request(customer: &str, amount: f64, start_day: u32, end_day: u32) -> DemandRequest {
    DemandRequest { customer: NodeId::new(customer), amount, post_day: 0, start_day, end_day }
}

#[test]
fn test_sort_is_earliest_deadline_first_and_stable() {
    let mut backlog = DemandBacklog::new();
    backlog.absorb(vec![
        request("C1", 10.0, 0, 5),
        request("C2", 20.0, 0, 3),
        request("C3", 30.0, 0, 5),
    ]);

    backlog.sort_by_deadline();

    let amounts: Vec<f64> = backlog.pending().iter().map(|r| r.amount).collect();
    assert_eq!(
        amounts,
        vec![20.0, 10.0, 30.0],
        "Deadline ties must preserve arrival order"
    );
}

#[test]
fn test_absorb_appends_behind_carried_requests() {
    let mut backlog = DemandBacklog::new();
    backlog.absorb(vec![request("C1", 10.0, 0, 9)]);
    backlog.absorb(vec![request("C2", 20.0, 1, 9)]);

    let customers: Vec<&str> = backlog.pending().iter().map(|r| r.customer.as_str()).collect();
    assert_eq!(customers, vec!["C1", "C2"]);
}

#[test]
fn test_retain_policy_never_drops() {
    let mut backlog = DemandBacklog::new();
    backlog.absorb(vec![request("C1", 10.0, 0, 1)]);

    let missed = backlog.expire(40, ExpiryPolicy::Retain);

    assert_eq!(missed, 0);
    assert_eq!(backlog.pending_len(), 1, "Retain must keep stale requests pending");
    assert_eq!(backlog.missed_len(), 0);
}

#[test]
fn test_report_missed_policy_moves_stale_requests() {
    let mut backlog = DemandBacklog::new();
    backlog.absorb(vec![
        request("C1", 10.0, 0, 1),
        request("C2", 20.0, 0, 10),
    ]);

    let missed = backlog.expire(2, ExpiryPolicy::ReportMissed);

    assert_eq!(missed, 1);
    assert_eq!(backlog.pending_len(), 1);
    assert_eq!(backlog.missed_len(), 1);
    assert_eq!(backlog.pending()[0].customer, NodeId::new("C2"));
    assert_eq!(backlog.missed()[0].customer, NodeId::new("C1"));
}

#[test]
fn test_window_end_day_is_inclusive_for_expiry() {
    let mut backlog = DemandBacklog::new();
    backlog.absorb(vec![request("C1", 10.0, 0, 5)]);

    // On the end day itself the request is still deliverable.
    assert_eq!(backlog.expire(5, ExpiryPolicy::ReportMissed), 0);
    assert_eq!(backlog.expire(6, ExpiryPolicy::ReportMissed), 1);
}

#[test]
fn test_drain_and_carry_round_trip() {
    let mut backlog = DemandBacklog::new();
    backlog.absorb(vec![request("C1", 10.0, 0, 5), request("C2", 20.0, 0, 6)]);

    let mut drained = backlog.drain_pending();
    assert!(backlog.is_empty());

    drained.remove(0); // C1 fulfilled
    backlog.carry(drained);

    assert_eq!(backlog.pending_len(), 1);
    assert_eq!(backlog.pending()[0].customer, NodeId::new("C2"));
}
