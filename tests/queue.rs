//! Tests for the bounded delivery queue's drop-and-count contract.

use prismalog::queue::{DeliveryQueue, Event};
use prismalog::{Level, Record};

fn record(n: usize) -> Record {
    Record::new(Level::Info, "test", &format!("message {n}"))
}

fn recv_record(rx: &crossbeam_channel::Receiver<Event>) -> Record {
    match rx.try_recv().expect("queue should hold an event") {
        Event::Record(record) => record,
        _ => panic!("expected a record event"),
    }
}

#[test]
fn accepts_up_to_capacity_then_drops() {
    let (queue, rx) = DeliveryQueue::with_capacity(2);

    assert!(queue.enqueue(record(1)));
    assert!(queue.enqueue(record(2)));
    assert!(!queue.enqueue(record(3)));
    assert!(!queue.enqueue(record(4)));
    assert!(!queue.enqueue(record(5)));
    assert_eq!(queue.dropped(), 3);

    // Only the accepted records are in the channel, in FIFO order.
    assert_eq!(recv_record(&rx).message, "message 1");
    assert_eq!(recv_record(&rx).message, "message 2");
    assert!(rx.try_recv().is_err());
}

#[test]
fn drop_notice_piggybacks_on_next_accepted_record() {
    let (queue, rx) = DeliveryQueue::with_capacity(2);

    assert!(queue.enqueue(record(1)));
    assert!(queue.enqueue(record(2)));
    assert!(!queue.enqueue(record(3)));
    assert!(!queue.enqueue(record(4)));

    // Drain, then the next successful enqueue carries the notice.
    recv_record(&rx);
    recv_record(&rx);
    assert!(queue.enqueue(record(5)));

    assert_eq!(recv_record(&rx).message, "message 5");
    let notice = recv_record(&rx);
    assert_eq!(notice.level, Level::Warning);
    assert_eq!(notice.logger, "prismalog");
    assert!(notice.message.contains("2 records dropped"));
    assert_eq!(queue.dropped(), 0);
}

#[test]
fn notice_count_is_recredited_when_it_cannot_be_queued() {
    let (queue, rx) = DeliveryQueue::with_capacity(2);

    assert!(queue.enqueue(record(1)));
    assert!(queue.enqueue(record(2)));
    assert!(!queue.enqueue(record(3)));
    assert_eq!(queue.dropped(), 1);

    // One slot frees up, record 4 takes it, and the notice finds the queue
    // full again — the count must survive for the next opportunity.
    recv_record(&rx);
    assert!(queue.enqueue(record(4)));
    assert_eq!(queue.dropped(), 1);

    // Fully drained, the next accepted record finally carries the notice.
    recv_record(&rx);
    recv_record(&rx);
    assert!(queue.enqueue(record(5)));
    assert_eq!(recv_record(&rx).message, "message 5");
    let notice = recv_record(&rx);
    assert!(notice.message.contains("1 records dropped"));
    assert_eq!(queue.dropped(), 0);
}

#[test]
fn dropped_is_zero_without_overflow() {
    let (queue, _rx) = DeliveryQueue::with_capacity(8);
    assert!(queue.enqueue(record(1)));
    assert_eq!(queue.dropped(), 0);
}
