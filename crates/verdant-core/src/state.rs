//! Observable lifecycle state.
//!
//! Provides [`StateHandle`], a cheap-to-clone handle that stores the current
//! state of some long-lived object (a section editor, a slice manager) and
//! broadcasts every transition to subscribers. UI layers subscribe instead of
//! polling.
//!
//! # Usage
//!
//! ```rust
//! use verdant_core::StateHandle;
//!
//! let handle = StateHandle::new("hero", "loading".to_string());
//! handle.set("ready".to_string());
//! assert_eq!(handle.get(), "ready");
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Thread-safe handle for observing and updating a state value.
///
/// Cheap to clone (Arc internals). State changes are broadcast
/// to all subscribers via a watch channel.
pub struct StateHandle<S> {
    inner: Arc<StateHandleInner<S>>,
}

struct StateHandleInner<S> {
    name: String,
    tx: watch::Sender<S>,
}

impl<S> Clone for StateHandle<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> StateHandle<S>
where
    S: Clone + PartialEq + fmt::Display + Send + Sync + 'static,
{
    /// Create a new handle with the given name and initial state.
    pub fn new(name: impl Into<String>, initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            inner: Arc::new(StateHandleInner {
                name: name.into(),
                tx,
            }),
        }
    }

    /// Name the handle was created with.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Current state.
    pub fn get(&self) -> S {
        self.inner.tx.borrow().clone()
    }

    /// Replace the state and notify subscribers.
    pub fn set(&self, state: S) {
        log::debug!("'{}' → {state}", self.inner.name);
        self.inner.tx.send_replace(state);
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.inner.tx.subscribe()
    }

    /// Wait until `accept` returns true for the current state, or time out.
    pub async fn wait_for<F>(&self, timeout: Duration, accept: F) -> Result<S, String>
    where
        F: Fn(&S) -> bool,
    {
        let mut rx = self.subscribe();
        let deadline = tokio::time::sleep(timeout);
        tokio::pin!(deadline);

        {
            let state = rx.borrow_and_update().clone();
            if accept(&state) {
                return Ok(state);
            }
        }

        loop {
            tokio::select! {
                _ = &mut deadline => {
                    return Err(format!(
                        "'{}' did not reach the expected state after {timeout:?} (state: {})",
                        self.inner.name, self.get()
                    ));
                }
                result = rx.changed() => {
                    if result.is_err() {
                        return Err(format!("'{}' channel closed", self.inner.name));
                    }
                    let state = rx.borrow().clone();
                    if accept(&state) {
                        return Ok(state);
                    }
                }
            }
        }
    }
}

impl<S> fmt::Debug for StateHandle<S>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateHandle")
            .field("name", &self.inner.name)
            .field("state", &*self.inner.tx.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Phase {
        Idle,
        Busy,
        Done,
    }

    impl fmt::Display for Phase {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let s = match self {
                Phase::Idle => "idle",
                Phase::Busy => "busy",
                Phase::Done => "done",
            };
            write!(f, "{s}")
        }
    }

    #[test]
    fn test_initial_state() {
        let handle = StateHandle::new("test", Phase::Idle);
        assert_eq!(handle.name(), "test");
        assert_eq!(handle.get(), Phase::Idle);
    }

    #[test]
    fn test_clone_shares_state() {
        let a = StateHandle::new("shared", Phase::Idle);
        let b = a.clone();
        a.set(Phase::Busy);
        assert_eq!(b.get(), Phase::Busy);
    }

    #[test]
    fn test_subscribe_sees_latest() {
        let handle = StateHandle::new("test", Phase::Idle);
        let mut rx = handle.subscribe();
        assert_eq!(*rx.borrow(), Phase::Idle);
        handle.set(Phase::Done);
        assert_eq!(*rx.borrow_and_update(), Phase::Done);
    }

    #[tokio::test]
    async fn test_wait_for_success() {
        let handle = StateHandle::new("test", Phase::Idle);
        let h = handle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            h.set(Phase::Busy);
            tokio::time::sleep(Duration::from_millis(10)).await;
            h.set(Phase::Done);
        });

        let state = handle
            .wait_for(Duration::from_secs(1), |s| *s == Phase::Done)
            .await;
        assert_eq!(state, Ok(Phase::Done));
    }

    #[tokio::test]
    async fn test_wait_for_already_there() {
        let handle = StateHandle::new("instant", Phase::Done);
        let state = handle
            .wait_for(Duration::from_millis(10), |s| *s == Phase::Done)
            .await;
        assert!(state.is_ok());
    }

    #[tokio::test]
    async fn test_wait_for_timeout() {
        let handle = StateHandle::new("slow", Phase::Busy);
        let result = handle
            .wait_for(Duration::from_millis(20), |s| *s == Phase::Done)
            .await;
        let err = result.unwrap_err();
        assert!(err.contains("slow"));
        assert!(err.contains("busy"));
    }

    #[test]
    fn test_debug_output() {
        let handle = StateHandle::new("debug-test", Phase::Idle);
        let debug = format!("{handle:?}");
        assert!(debug.contains("debug-test"));
        assert!(debug.contains("Idle"));
    }

    fn _assert_send_sync<T: Send + Sync>() {}
    #[test]
    fn test_handle_send_sync() {
        _assert_send_sync::<StateHandle<Phase>>();
    }
}
