//! Promise and its one-shot resolver.
//!
//! A [`Promise`] is the observable side of a deferred result. The right to
//! settle it lives in a separate [`Resolver`] that is consumed by value, so a
//! promise can be settled at most once. The outcome is remembered: observers
//! attached after settlement still see it.

use core_types::{CalcError, Settlement};
use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

/// The state of a Promise.
///
/// Once settled (Fulfilled or Rejected), a Promise cannot change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromiseState {
    /// The initial state; the promise is neither fulfilled nor rejected.
    Pending,
    /// The promise has been resolved with a value.
    Fulfilled,
    /// The promise has been rejected with an error.
    Rejected,
}

/// A reaction to be triggered when a Promise settles.
type PromiseReaction = Box<dyn FnOnce(&Settlement)>;

#[derive(Default)]
struct PromiseInner {
    outcome: Option<Settlement>,
    reactions: Vec<PromiseReaction>,
    wakers: Vec<Waker>,
}

impl PromiseInner {
    fn state(&self) -> PromiseState {
        match self.outcome {
            None => PromiseState::Pending,
            Some(Ok(_)) => PromiseState::Fulfilled,
            Some(Err(_)) => PromiseState::Rejected,
        }
    }
}

/// A handle on a result that will be available later.
///
/// Cloning a Promise yields another handle on the same outcome.
///
/// # Examples
///
/// ```
/// use async_runtime::{Promise, PromiseState};
///
/// let (promise, resolver) = Promise::with_resolver();
/// assert_eq!(promise.state(), PromiseState::Pending);
///
/// resolver.resolve(42.0);
/// assert_eq!(promise.state(), PromiseState::Fulfilled);
/// assert_eq!(promise.value(), Some(42.0));
/// ```
#[derive(Clone)]
pub struct Promise {
    inner: Rc<RefCell<PromiseInner>>,
}

impl Promise {
    /// Creates a pending Promise together with the only Resolver able to
    /// settle it.
    pub fn with_resolver() -> (Promise, Resolver) {
        let inner = Rc::new(RefCell::new(PromiseInner::default()));
        let resolver = Resolver {
            inner: Some(Rc::clone(&inner)),
        };
        (Promise { inner }, resolver)
    }

    /// The current state.
    pub fn state(&self) -> PromiseState {
        self.inner.borrow().state()
    }

    /// Returns true while the promise is neither fulfilled nor rejected.
    pub fn is_pending(&self) -> bool {
        self.state() == PromiseState::Pending
    }

    /// The settled outcome, if any.
    pub fn outcome(&self) -> Option<Settlement> {
        self.inner.borrow().outcome.clone()
    }

    /// The fulfilment value, if fulfilled.
    pub fn value(&self) -> Option<f64> {
        match self.inner.borrow().outcome {
            Some(Ok(value)) => Some(value),
            _ => None,
        }
    }

    /// The rejection error, if rejected.
    pub fn error(&self) -> Option<CalcError> {
        match &self.inner.borrow().outcome {
            Some(Err(error)) => Some(error.clone()),
            _ => None,
        }
    }

    /// Registers a callback for the outcome.
    ///
    /// If the promise has already settled the callback runs immediately,
    /// otherwise it runs when the promise settles.
    pub fn on_settled<F>(&self, callback: F)
    where
        F: FnOnce(&Settlement) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        match inner.outcome.clone() {
            Some(outcome) => {
                drop(inner);
                callback(&outcome);
            }
            None => inner.reactions.push(Box::new(callback)),
        }
    }

    /// Adds handlers for fulfillment and rejection.
    pub fn then<F, R>(&self, on_fulfilled: F, on_rejected: R)
    where
        F: FnOnce(f64) + 'static,
        R: FnOnce(&CalcError) + 'static,
    {
        self.on_settled(move |outcome| match outcome {
            Ok(value) => on_fulfilled(*value),
            Err(error) => on_rejected(error),
        });
    }

    /// Checks if there are pending reactions.
    pub fn has_pending_reactions(&self) -> bool {
        !self.inner.borrow().reactions.is_empty()
    }
}

impl fmt::Debug for Promise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Promise")
            .field("state", &inner.state())
            .field("outcome", &inner.outcome)
            .field("reactions", &inner.reactions.len())
            .finish()
    }
}

impl Future for Promise {
    type Output = Settlement;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Settlement> {
        let mut inner = self.inner.borrow_mut();
        if let Some(outcome) = inner.outcome.clone() {
            return Poll::Ready(outcome);
        }
        if !inner.wakers.iter().any(|w| w.will_wake(cx.waker())) {
            inner.wakers.push(cx.waker().clone());
        }
        Poll::Pending
    }
}

/// The capability to settle one Promise.
///
/// Every settling method takes `self`, so a Resolver settles its promise at
/// most once. Dropping an unused Resolver rejects the promise with
/// [`core_types::ErrorKind::Abandoned`].
pub struct Resolver {
    inner: Option<Rc<RefCell<PromiseInner>>>,
}

impl Resolver {
    /// Fulfils the promise with `value`.
    pub fn resolve(self, value: f64) {
        self.settle(Ok(value));
    }

    /// Rejects the promise with `error`.
    pub fn reject(self, error: CalcError) {
        self.settle(Err(error));
    }

    /// Settles the promise with `outcome`.
    pub fn settle(mut self, outcome: Settlement) {
        if let Some(inner) = self.inner.take() {
            complete(&inner, outcome);
        }
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("armed", &self.inner.is_some())
            .finish()
    }
}

impl Drop for Resolver {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.take() {
            complete(&inner, Err(CalcError::abandoned()));
        }
    }
}

fn complete(inner: &Rc<RefCell<PromiseInner>>, outcome: Settlement) {
    let (reactions, wakers) = {
        let mut state = inner.borrow_mut();
        if state.outcome.is_some() {
            return;
        }
        state.outcome = Some(outcome.clone());
        (
            std::mem::take(&mut state.reactions),
            std::mem::take(&mut state.wakers),
        )
    };

    // Reactions may inspect or observe the promise again, so no borrow is
    // held while they run.
    for reaction in reactions {
        reaction(&outcome);
    }
    for waker in wakers {
        waker.wake();
    }
}
