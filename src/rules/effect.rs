//! Asynchronous, fallible side effects attached to rules.

use crate::rules::error::EffectError;
use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Boxed future produced by one run of an effect.
pub type EffectFuture = BoxFuture<'static, Result<(), EffectError>>;

/// Type alias for effect factories.
/// Each call creates a fresh future, so one effect can run many times.
type EffectFactory = Arc<dyn Fn() -> EffectFuture + Send + Sync>;

/// A zero-argument asynchronous operation that may fail.
///
/// Effects are cheap to clone; clones share the same factory.
///
/// # Example
///
/// ```rust
/// use statecraft::rules::{Effect, EffectError};
///
/// # tokio_test_block_on(async {
/// let ok = Effect::new(|| async { Ok(()) });
/// assert!(ok.run().await.is_ok());
///
/// let broken = Effect::from_fn(|| Err(EffectError::failed("speaker unplugged")));
/// assert!(broken.run().await.is_err());
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone)]
pub struct Effect {
    factory: EffectFactory,
}

impl Effect {
    /// Create an effect from an async closure.
    pub fn new<F, Fut>(effect: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), EffectError>> + Send + 'static,
    {
        Self {
            factory: Arc::new(move || effect().boxed()),
        }
    }

    /// Create an effect from a synchronous closure.
    pub fn from_fn<F>(effect: F) -> Self
    where
        F: Fn() -> Result<(), EffectError> + Send + Sync + 'static,
    {
        Self::new(move || futures::future::ready(effect()))
    }

    /// Wrap this effect with a deadline.
    ///
    /// A run that exceeds `limit` is dropped and reported as
    /// [`EffectError::TimedOut`]. Requires a Tokio runtime with timers.
    pub fn with_timeout(self, limit: Duration) -> Self {
        let inner = self.factory;
        Self::new(move || {
            let run = inner();
            async move {
                match tokio::time::timeout(limit, run).await {
                    Ok(result) => result,
                    Err(_) => Err(EffectError::TimedOut(limit)),
                }
            }
        })
    }

    /// Run the effect once.
    pub async fn run(&self) -> Result<(), EffectError> {
        (self.factory)().await
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn effect_runs_fresh_future_each_time() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let effect = Effect::new(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        effect.run().await.unwrap();
        effect.clone().run().await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn sync_effect_failure_is_returned() {
        let effect = Effect::from_fn(|| Err(EffectError::failed("no device")));

        assert_eq!(
            effect.run().await,
            Err(EffectError::Failed("no device".to_string()))
        );
    }

    #[tokio::test]
    async fn timeout_reports_slow_effect() {
        let effect = Effect::new(|| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .with_timeout(Duration::from_millis(20));

        assert_eq!(
            effect.run().await,
            Err(EffectError::TimedOut(Duration::from_millis(20)))
        );
    }

    #[tokio::test]
    async fn timeout_passes_through_fast_effect() {
        let effect = Effect::from_fn(|| Ok(())).with_timeout(Duration::from_secs(1));

        assert!(effect.run().await.is_ok());
    }
}
