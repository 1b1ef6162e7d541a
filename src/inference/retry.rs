//! Bounded exponential backoff around the inference exchange.

use std::time::Duration;

use crate::config::RetryConfig;

use super::client::InferenceTransport;
use super::error::InferenceError;
use super::request::GenerateContentRequest;

/// Immutable retry settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Factor applied to the delay after every retry.
    pub backoff_multiplier: f64,
}

impl RetryPolicy {
    /// Build a policy. A multiplier that is not finite or is below `1.0`
    /// is clamped to `1.0`, giving a constant delay.
    pub fn new(max_retries: u32, initial_delay: Duration, backoff_multiplier: f64) -> Self {
        let backoff_multiplier = if backoff_multiplier.is_finite() && backoff_multiplier >= 1.0 {
            backoff_multiplier
        } else {
            tracing::warn!(backoff_multiplier, "Invalid backoff multiplier, using 1.0");
            1.0
        };

        Self {
            max_retries,
            initial_delay,
            backoff_multiplier,
        }
    }

    /// Total number of physical attempts this policy allows.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before retry `index` (0-based): `initial_delay * multiplier^index`.
    pub fn delay_for(&self, index: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(index as i32);
        scale(self.initial_delay, factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(
            config.max_retries,
            Duration::from_millis(config.initial_delay_ms),
            config.backoff_multiplier,
        )
    }
}

/// Send `request` through `transport`, retrying exchange failures.
///
/// Returns the raw response body of the first successful attempt. Once the
/// retry budget is spent the last failure is wrapped in
/// [`InferenceError::CallExhausted`]. Non-retryable failures are returned
/// as-is without another attempt.
pub async fn invoke<T>(
    transport: &T,
    request: &GenerateContentRequest,
    policy: &RetryPolicy,
) -> Result<String, InferenceError>
where
    T: InferenceTransport,
{
    let mut attempts: u32 = 0;
    let mut remaining = policy.max_retries;
    let mut delay = policy.initial_delay;

    loop {
        attempts += 1;
        tracing::debug!(attempt = attempts, "Sending inference request");

        let err = match transport.send(request).await {
            Ok(body) => return Ok(body),
            Err(err) => err,
        };

        if !err.is_retryable() {
            return Err(err);
        }

        if remaining == 0 {
            tracing::error!(
                attempts,
                error_type = err.error_type(),
                error = %err,
                "Inference retries exhausted"
            );
            return Err(InferenceError::CallExhausted {
                attempts,
                last: Box::new(err),
            });
        }

        tracing::warn!(
            attempt = attempts,
            remaining,
            delay_ms = delay.as_millis() as u64,
            error_type = err.error_type(),
            error = %err,
            "Inference attempt failed, backing off"
        );

        tokio::time::sleep(delay).await;
        delay = scale(delay, policy.backoff_multiplier);
        remaining -= 1;
    }
}

/// Multiply a delay, saturating on overflow.
///
/// A factor that yields NaN or a negative delay leaves `delay` unchanged.
fn scale(delay: Duration, factor: f64) -> Duration {
    let secs = delay.as_secs_f64() * factor;
    if secs.is_nan() || secs < 0.0 {
        return delay;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}
