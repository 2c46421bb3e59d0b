//! Error teeing into the state store
//!
//! Two wrapping entry points on [`CallStateStore`] share one contract: run
//! the wrapped operation, and if it fails, record the failure under the given
//! operation name before handing the *same* failure back to the caller.
//! Teeing is transparent — it never changes a success value, never converts a
//! failure into a success, never retries, and adds no completion delay beyond
//! the operation's own.

use std::future::Future;

use super::store::CallStateStore;

impl CallStateStore {
    /// Tee a synchronous operation's failure into the store
    ///
    /// # Examples
    ///
    /// ```rust
    /// use callstate_core::{CallSdkError, CallStateStore};
    ///
    /// let store = CallStateStore::new();
    /// let result: Result<(), CallSdkError> =
    ///     store.with_error_teed_to_state("Call.feature", || {
    ///         Err(CallSdkError::rejected("no such feature"))
    ///     });
    ///
    /// assert!(result.is_err());
    /// assert!(store.error("Call.feature").is_some());
    /// ```
    pub fn with_error_teed_to_state<T, E, F>(&self, operation: &str, f: F) -> Result<T, E>
    where
        E: std::fmt::Display,
        F: FnOnce() -> Result<T, E>,
    {
        match f() {
            Ok(value) => Ok(value),
            Err(error) => {
                self.record_error(operation, &error);
                Err(error)
            }
        }
    }

    /// Tee a deferred operation's failure into the store
    ///
    /// Awaits the operation to completion; on rejection the failure is
    /// recorded under `operation` and then returned unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use callstate_core::{CallSdkError, CallStateStore};
    ///
    /// # tokio_test::block_on(async {
    /// let store = CallStateStore::new();
    /// let result: Result<u32, CallSdkError> = store
    ///     .with_async_error_teed_to_state("Call.hold", async { Ok(7) })
    ///     .await;
    ///
    /// assert_eq!(result.unwrap(), 7);
    /// assert!(store.error("Call.hold").is_none());
    /// # })
    /// ```
    pub async fn with_async_error_teed_to_state<T, E, Fut>(
        &self,
        operation: &str,
        fut: Fut,
    ) -> Result<T, E>
    where
        E: std::fmt::Display,
        Fut: Future<Output = Result<T, E>>,
    {
        match fut.await {
            Ok(value) => Ok(value),
            Err(error) => {
                self.record_error(operation, &error);
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::CallSdkError;
    use crate::state::CallStateStore;

    #[test]
    fn sync_tee_passes_success_through_untouched() {
        let store = CallStateStore::new();
        let result: Result<u32, CallSdkError> =
            store.with_error_teed_to_state("Call.feature", || Ok(7));

        assert_eq!(result.unwrap(), 7);
        assert!(store.error("Call.feature").is_none());
    }

    #[test]
    fn sync_tee_records_and_rethrows_failure() {
        let store = CallStateStore::new();
        let failure = CallSdkError::rejected("boom");
        let result: Result<(), CallSdkError> =
            store.with_error_teed_to_state("Call.feature", || Err(failure.clone()));

        assert_eq!(result.unwrap_err(), failure);
        let record = store.error("Call.feature").expect("recorded");
        assert_eq!(record.message, failure.to_string());
    }

    #[tokio::test]
    async fn async_tee_passes_success_through_untouched() {
        let store = CallStateStore::new();
        let result: Result<&str, CallSdkError> = store
            .with_async_error_teed_to_state("Call.mute", async { Ok("done") })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert!(store.errors().is_empty());
    }

    #[tokio::test]
    async fn async_tee_records_and_rethrows_failure() {
        let store = CallStateStore::new();
        let failure = CallSdkError::connection_lost("socket closed");
        let result: Result<(), CallSdkError> = store
            .with_async_error_teed_to_state("Call.hold", async { Err(failure.clone()) })
            .await;

        assert_eq!(result.unwrap_err(), failure);
        let record = store.error("Call.hold").expect("recorded");
        assert_eq!(record.operation, "Call.hold");
        assert_eq!(record.message, failure.to_string());
    }

    #[tokio::test]
    async fn failures_stay_keyed_per_operation() {
        let store = CallStateStore::new();
        let _: Result<(), CallSdkError> = store
            .with_async_error_teed_to_state("Call.mute", async {
                Err(CallSdkError::rejected("mic"))
            })
            .await;
        let _: Result<(), CallSdkError> = store
            .with_async_error_teed_to_state("Call.hold", async { Ok(()) })
            .await;

        assert!(store.error("Call.mute").is_some());
        assert!(store.error("Call.hold").is_none());
    }
}
