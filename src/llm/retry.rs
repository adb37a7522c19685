use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{LlmError, LlmResult, NoteModel};

/// Bounded retry with a fixed delay between attempts.
#[derive(Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
    retryable: fn(&LlmError) -> bool,
}

impl RetryPolicy {
    /// `max_attempts` counts the first try; it is raised to at least one.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            retryable: LlmError::is_retryable,
        }
    }

    pub fn with_predicate(mut self, retryable: fn(&LlmError) -> bool) -> Self {
        self.retryable = retryable;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// attempts run out. The last error is returned.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> LlmResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = LlmResult<T>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_attempts && (self.retryable)(&e) => {
                    tracing::debug!(
                        call = label,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "retrying after {:?}",
                        self.delay
                    );
                    if !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl std::fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}

/// Any [`NoteModel`] with a retry policy applied to both calls.
pub struct RetryingModel<M> {
    inner: M,
    policy: RetryPolicy,
}

impl<M: NoteModel> RetryingModel<M> {
    pub fn new(inner: M, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }
}

#[async_trait]
impl<M: NoteModel> NoteModel for RetryingModel<M> {
    async fn judge(&self, text: &str, name_hint: &str) -> LlmResult<Option<String>> {
        self.policy
            .run("judge", move || self.inner.judge(text, name_hint))
            .await
    }

    async fn generate(
        &self,
        text: &str,
        name_hint: &str,
        created_at: DateTime<Utc>,
    ) -> LlmResult<Option<String>> {
        self.policy
            .run("generate", move || {
                self.inner.generate(text, name_hint, created_at)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Fails with the scripted errors first, then answers "Yes".
    struct Flaky {
        errors: Mutex<Vec<LlmError>>,
        calls: AtomicU32,
    }

    impl Flaky {
        fn new(mut errors: Vec<LlmError>) -> Self {
            errors.reverse();
            Self {
                errors: Mutex::new(errors),
                calls: AtomicU32::new(0),
            }
        }

        fn next(&self) -> LlmResult<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.errors.lock().unwrap().pop() {
                Some(e) => Err(e),
                None => Ok(Some("Yes".to_string())),
            }
        }
    }

    #[async_trait]
    impl NoteModel for Flaky {
        async fn judge(&self, _text: &str, _hint: &str) -> LlmResult<Option<String>> {
            self.next()
        }

        async fn generate(
            &self,
            _text: &str,
            _hint: &str,
            _created_at: DateTime<Utc>,
        ) -> LlmResult<Option<String>> {
            self.next()
        }
    }

    fn server_error() -> LlmError {
        LlmError::Server {
            status: 502,
            message: "bad gateway".to_string(),
        }
    }

    #[tokio::test]
    async fn test_retries_transient_errors_until_success() {
        let flaky = Flaky::new(vec![
            LlmError::RateLimited("429".to_string()),
            server_error(),
        ]);
        let model = RetryingModel::new(flaky, RetryPolicy::new(3, Duration::ZERO));

        let verdict = model.judge("text", "name").await.unwrap();
        assert_eq!(verdict.as_deref(), Some("Yes"));
        assert_eq!(model.inner().calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let flaky = Flaky::new(vec![server_error(), server_error(), server_error()]);
        let model = RetryingModel::new(flaky, RetryPolicy::new(2, Duration::ZERO));

        let result = model.generate("text", "name", Utc::now()).await;
        assert!(matches!(result, Err(LlmError::Server { status: 502, .. })));
        assert_eq!(model.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let flaky = Flaky::new(vec![LlmError::Client {
            status: 400,
            message: "bad request".to_string(),
        }]);
        let model = RetryingModel::new(flaky, RetryPolicy::new(5, Duration::ZERO));

        let result = model.judge("text", "name").await;
        assert!(matches!(result, Err(LlmError::Client { status: 400, .. })));
        assert_eq!(model.inner().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_custom_predicate() {
        let flaky = Flaky::new(vec![LlmError::Transport("reset".to_string())]);
        let policy = RetryPolicy::new(3, Duration::ZERO).with_predicate(|_| false);
        let model = RetryingModel::new(flaky, policy);

        assert!(model.judge("text", "name").await.is_err());
        assert_eq!(model.inner().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_single_attempt_policy() {
        let flaky = Flaky::new(vec![server_error()]);
        let model = RetryingModel::new(flaky, RetryPolicy::new(1, Duration::ZERO));

        assert!(model.judge("text", "name").await.is_err());
        assert_eq!(model.inner().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zero_attempts_is_raised_to_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
    }
}
