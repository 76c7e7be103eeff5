//! End-to-End Integration Tests
//!
//! Tests the full call -> schedule -> complete pipeline through the public
//! calculator API on a live event loop.

use async_runtime::{EventLoop, EventLoopConfig, PromiseState};
use core_types::ErrorKind;
use lazy_calc::Calculator;
use std::cell::RefCell;
use std::rc::Rc;

/// Test: the reference scenario
#[test]
fn test_e2e_reference_scenario() {
    let calc = Calculator::new(EventLoop::new());

    let add = calc.add(2.0, 3.0);
    let sub = calc.sub(5.0, 3.0);
    let mul = calc.mul(4.0, 2.5);
    let div = calc.div(10.0, 2.0);
    let div_zero = calc.div(1.0, 0.0);

    for promise in [&add, &sub, &mul, &div, &div_zero] {
        assert_eq!(promise.state(), PromiseState::Pending);
    }

    calc.scheduler().run_until_done();

    assert_eq!(add.value(), Some(5.0));
    assert_eq!(sub.value(), Some(2.0));
    assert_eq!(mul.value(), Some(10.0));
    assert_eq!(div.value(), Some(5.0));
    assert_eq!(
        div_zero.error().map(|e| e.to_string()),
        Some("division by zero".to_string())
    );
}

/// Test: calls made in one frame settle on one loop turn, in call order
#[test]
fn test_e2e_single_turn_fifo() {
    let calc = Calculator::new(EventLoop::new());
    let order = Rc::new(RefCell::new(vec![]));

    for (i, b) in [1.0, 0.0, 2.0, 0.0].into_iter().enumerate() {
        let o = Rc::clone(&order);
        calc.div(8.0, b)
            .on_settled(move |outcome| o.borrow_mut().push((i, outcome.is_ok())));
    }

    assert_eq!(calc.scheduler().run_once(), 4);
    assert_eq!(
        *order.borrow(),
        vec![(0, true), (1, false), (2, true), (3, false)]
    );
}

/// Test: settled outcomes never change afterwards
#[test]
fn test_e2e_outcome_is_final() {
    let calc = Calculator::new(EventLoop::new());
    let promise = calc.div(1.0, 0.0);
    calc.scheduler().run_until_done();
    let first = promise.outcome();

    // More traffic on the loop leaves the settled promise untouched.
    let _ = calc.add(1.0, 1.0);
    calc.scheduler().run_until_done();
    assert_eq!(promise.outcome(), first);
    assert_eq!(promise.state(), PromiseState::Rejected);
}

/// Test: a saturated loop rejects new calls synchronously
#[test]
fn test_e2e_saturated_loop() {
    let event_loop = EventLoop::with_config(EventLoopConfig::new().with_max_pending_timers(2));
    let calc = Calculator::new(event_loop);

    let a = calc.add(1.0, 1.0);
    let b = calc.add(2.0, 2.0);
    let c = calc.add(3.0, 3.0);

    assert!(a.is_pending());
    assert!(b.is_pending());
    assert_eq!(c.error().map(|e| e.kind), Some(ErrorKind::SchedulingFailed));

    calc.scheduler().run_until_done();
    assert_eq!(a.value(), Some(2.0));
    assert_eq!(b.value(), Some(4.0));
}

/// Test: async composition awaited through the loop
#[test]
fn test_e2e_async_composition() {
    let calc = Calculator::new(EventLoop::new());
    let event_loop = calc.scheduler().clone();

    let result = event_loop.block_on(async {
        let sum = calc.add(1.0, 2.0).await?;
        let product = calc.mul(sum, 16.0).await?;
        calc.div(product, 4.0).await
    });

    assert_eq!(result, Some(Ok(12.0)));
}

/// Test: a rejection short-circuits async composition
#[test]
fn test_e2e_async_rejection() {
    let calc = Calculator::new(EventLoop::new());
    let event_loop = calc.scheduler().clone();

    let result = event_loop
        .block_on(async {
            let quotient = calc.div(1.0, 0.0).await?;
            calc.add(quotient, 1.0).await
        })
        .unwrap();

    assert_eq!(result.unwrap_err().kind, ErrorKind::DivisionByZero);
}
