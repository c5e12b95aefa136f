use std::sync::atomic::{AtomicUsize, Ordering};

// Process-wide counters of live runtime objects. Evaluator logic never reads
// these; they exist so tests can assert deterministic teardown.
static ENV_COUNT: AtomicUsize = AtomicUsize::new(0);
static FN_COUNT: AtomicUsize = AtomicUsize::new(0);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MemStats {
  pub env_count: usize,
  pub fn_count: usize,
}

pub fn snapshot() -> MemStats {
  MemStats {
    env_count: ENV_COUNT.load(Ordering::SeqCst),
    fn_count: FN_COUNT.load(Ordering::SeqCst),
  }
}

pub fn reset() {
  ENV_COUNT.store(0, Ordering::SeqCst);
  FN_COUNT.store(0, Ordering::SeqCst);
}

pub(crate) fn env_created() {
  ENV_COUNT.fetch_add(1, Ordering::SeqCst);
}

pub(crate) fn env_destroyed() {
  let prev = ENV_COUNT.fetch_sub(1, Ordering::SeqCst);
  debug_assert!(prev > 0, "environment count underflow");
}

pub(crate) fn fn_created() {
  FN_COUNT.fetch_add(1, Ordering::SeqCst);
}

pub(crate) fn fn_destroyed() {
  let prev = FN_COUNT.fetch_sub(1, Ordering::SeqCst);
  debug_assert!(prev > 0, "function count underflow");
}
