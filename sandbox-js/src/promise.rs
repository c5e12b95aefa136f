use crate::completion::Thrown;
use crate::value::Value;
use futures::future::{LocalBoxFuture, Shared};
use futures::FutureExt;
use std::cell::RefCell;
use std::rc::Rc;

pub type PromiseResult = Result<Value, Thrown>;

type SharedFuture = Shared<LocalBoxFuture<'static, PromiseResult>>;

enum PromiseState {
  Settled(PromiseResult),
  Pending(SharedFuture),
}

/// The host promise abstraction.
///
/// Hosts build promises from arbitrary futures and inject them through the
/// globals table (typically as the return value of a host function); user
/// `async` functions always return one. `await` joins: the join is cached, so
/// a promise settles exactly once and every subsequent join observes the same
/// result.
#[derive(Clone)]
pub struct JsPromise {
  inner: Rc<RefCell<PromiseState>>,
}

impl JsPromise {
  pub fn resolved(value: Value) -> JsPromise {
    JsPromise {
      inner: Rc::new(RefCell::new(PromiseState::Settled(Ok(value)))),
    }
  }

  pub fn rejected(value: Value) -> JsPromise {
    JsPromise {
      inner: Rc::new(RefCell::new(PromiseState::Settled(Err(Thrown::new(value))))),
    }
  }

  pub(crate) fn settled(result: PromiseResult) -> JsPromise {
    JsPromise {
      inner: Rc::new(RefCell::new(PromiseState::Settled(result))),
    }
  }

  /// Wrap a host future. The future runs when the promise is first awaited;
  /// evaluation suspends cooperatively until it completes.
  pub fn from_future(future: LocalBoxFuture<'static, PromiseResult>) -> JsPromise {
    JsPromise {
      inner: Rc::new(RefCell::new(PromiseState::Pending(future.shared()))),
    }
  }

  /// Await-style join. Idempotent: the first join drives the inner future,
  /// later joins return the cached result.
  pub async fn join(&self) -> PromiseResult {
    let future = match &*self.inner.borrow() {
      PromiseState::Settled(result) => return result.clone(),
      PromiseState::Pending(future) => future.clone(),
    };
    let result = future.await;
    *self.inner.borrow_mut() = PromiseState::Settled(result.clone());
    result
  }

  pub fn is_settled(&self) -> bool {
    matches!(&*self.inner.borrow(), PromiseState::Settled(_))
  }

  pub fn ptr_eq(&self, other: &JsPromise) -> bool {
    Rc::ptr_eq(&self.inner, &other.inner)
  }
}
