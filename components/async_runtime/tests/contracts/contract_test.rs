//! Contract tests for async_runtime component
//!
//! These tests pin down the public surface other components rely on.

use async_runtime::{
    submit, EventLoop, ManualScheduler, Promise, PromiseState, Rejected, Resolver,
    ScheduledTask, Scheduler, TimerId,
};
use core_types::{CalcError, Operation, OperationRequest, Settlement};

mod event_loop_contract {
    use super::*;
    use std::time::Duration;

    #[test]
    fn event_loop_new_returns_self() {
        let event_loop = EventLoop::new();
        let _ = event_loop;
    }

    #[test]
    fn event_loop_set_timeout_returns_timer_id() {
        let event_loop = EventLoop::new();
        let id: Result<TimerId, CalcError> = event_loop.set_timeout(Duration::ZERO, |_| {});
        assert!(id.is_ok());
    }

    #[test]
    fn event_loop_is_a_scheduler() {
        fn takes_scheduler<S: Scheduler>(_: &S) {}
        takes_scheduler(&EventLoop::new());
    }
}

mod promise_contract {
    use super::*;

    #[test]
    fn promise_with_resolver_returns_pair() {
        let pair: (Promise, Resolver) = Promise::with_resolver();
        let _ = pair;
    }

    #[test]
    fn promise_outcome_is_settlement() {
        let (promise, resolver) = Promise::with_resolver();
        resolver.resolve(1.0);
        let _outcome: Option<Settlement> = promise.outcome();
    }

    #[test]
    fn promise_is_a_future_of_settlement() {
        fn takes_future<F: std::future::Future<Output = Settlement>>(_: F) {}
        let (promise, _resolver) = Promise::with_resolver();
        takes_future(promise);
    }

    #[test]
    fn resolver_reject_takes_calc_error() {
        let (promise, resolver) = Promise::with_resolver();
        resolver.reject(CalcError::division_by_zero());
        assert!(matches!(promise.state(), PromiseState::Rejected));
    }
}

mod promise_state_contract {
    use super::*;

    #[test]
    fn promise_state_has_pending_variant() {
        let state = PromiseState::Pending;
        assert!(matches!(state, PromiseState::Pending));
    }

    #[test]
    fn promise_state_has_fulfilled_variant() {
        let state = PromiseState::Fulfilled;
        assert!(matches!(state, PromiseState::Fulfilled));
    }

    #[test]
    fn promise_state_has_rejected_variant() {
        let state = PromiseState::Rejected;
        assert!(matches!(state, PromiseState::Rejected));
    }
}

mod scheduler_contract {
    use super::*;

    #[test]
    fn schedule_hands_task_back_on_failure() {
        let scheduler = ManualScheduler::with_capacity(0);
        let (promise, resolver) = Promise::with_resolver();
        let task = ScheduledTask::new(OperationRequest::new(Operation::Add, 1.0, 2.0), resolver);

        let Err(Rejected { task, error }) = scheduler.schedule(task) else {
            panic!("expected registration to fail");
        };
        assert!(promise.is_pending());
        assert_eq!(task.request().operand2(), 2.0);
        task.abort(error);
        assert!(!promise.is_pending());
    }

    #[test]
    fn submit_returns_promise() {
        let scheduler = ManualScheduler::new();
        let promise: Promise = submit(&scheduler, OperationRequest::new(Operation::Add, 1.0, 2.0));
        let _ = promise;
    }
}
