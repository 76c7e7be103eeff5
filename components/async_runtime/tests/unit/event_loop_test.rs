//! Unit tests for EventLoop

use async_runtime::{EventLoop, EventLoopConfig};
use core_types::ErrorKind;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[test]
fn new_event_loop_is_idle() {
    let event_loop = EventLoop::new();
    assert!(event_loop.is_idle());
    assert_eq!(event_loop.iterations(), 0);
}

#[test]
fn set_timeout_adds_pending_timer() {
    let event_loop = EventLoop::new();
    event_loop.set_timeout(Duration::ZERO, |_| {}).unwrap();
    assert!(!event_loop.is_idle());
    assert_eq!(event_loop.pending_timers(), 1);
}

#[test]
fn timer_ids_are_distinct() {
    let event_loop = EventLoop::new();
    let a = event_loop.set_timeout(Duration::ZERO, |_| {}).unwrap();
    let b = event_loop.set_timeout(Duration::ZERO, |_| {}).unwrap();
    assert_ne!(a, b);
}

#[test]
fn zero_delay_timers_fire_in_fifo_order() {
    let event_loop = EventLoop::new();
    let results = Rc::new(RefCell::new(vec![]));

    for i in 1..=5 {
        let r = Rc::clone(&results);
        event_loop
            .set_timeout(Duration::ZERO, move |_| r.borrow_mut().push(i))
            .unwrap();
    }

    event_loop.run_until_done();
    assert_eq!(*results.borrow(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn shorter_delay_fires_first() {
    let event_loop = EventLoop::new();
    let results = Rc::new(RefCell::new(vec![]));

    let r = Rc::clone(&results);
    event_loop
        .set_timeout(Duration::from_millis(15), move |_| r.borrow_mut().push("late"))
        .unwrap();
    let r = Rc::clone(&results);
    event_loop
        .set_timeout(Duration::ZERO, move |_| r.borrow_mut().push("early"))
        .unwrap();

    event_loop.run_until_done();
    assert_eq!(*results.borrow(), vec!["early", "late"]);
}

#[test]
fn callback_receives_its_own_timer_id() {
    let event_loop = EventLoop::new();
    let seen = Rc::new(RefCell::new(None));

    let s = Rc::clone(&seen);
    let id = event_loop
        .set_timeout(Duration::ZERO, move |id| *s.borrow_mut() = Some(id))
        .unwrap();

    event_loop.run_once();
    assert_eq!(*seen.borrow(), Some(id));
}

#[test]
fn each_timer_fires_exactly_once() {
    let event_loop = EventLoop::new();
    let count = Rc::new(RefCell::new(0));

    let c = Rc::clone(&count);
    event_loop
        .set_timeout(Duration::ZERO, move |_| *c.borrow_mut() += 1)
        .unwrap();

    assert_eq!(event_loop.run_once(), 1);
    assert_eq!(event_loop.run_once(), 0);
    assert_eq!(event_loop.run_until_done(), 0);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn run_once_counts_iterations() {
    let event_loop = EventLoop::new();
    event_loop.run_once();
    event_loop.run_once();
    assert_eq!(event_loop.iterations(), 2);
}

#[test]
fn registration_beyond_capacity_fails() {
    let config = EventLoopConfig::new().with_max_pending_timers(2);
    let event_loop = EventLoop::with_config(config);

    event_loop.set_timeout(Duration::ZERO, |_| {}).unwrap();
    event_loop.set_timeout(Duration::ZERO, |_| {}).unwrap();
    let error = event_loop.set_timeout(Duration::ZERO, |_| {}).unwrap_err();
    assert_eq!(error.kind, ErrorKind::SchedulingFailed);

    event_loop.run_until_done();
    assert!(event_loop.set_timeout(Duration::ZERO, |_| {}).is_ok());
}

#[test]
fn unrepresentable_delay_fails() {
    let event_loop = EventLoop::new();
    let error = event_loop
        .set_timeout(Duration::MAX, |_| {})
        .unwrap_err();
    assert_eq!(error.kind, ErrorKind::SchedulingFailed);
    assert!(event_loop.is_idle());
}

#[test]
fn clones_share_the_timer_queue() {
    let event_loop = EventLoop::new();
    let handle = event_loop.clone();
    handle.set_timeout(Duration::ZERO, |_| {}).unwrap();
    assert_eq!(event_loop.pending_timers(), 1);
    assert_eq!(event_loop.run_until_done(), 1);
    assert!(handle.is_idle());
}

#[test]
fn block_on_ready_future() {
    let event_loop = EventLoop::new();
    assert_eq!(event_loop.block_on(async { 5 }), Some(5));
}
