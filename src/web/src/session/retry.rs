use log::warn;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Runs `op` up to `attempts` times, doubling the pause after every failure.
pub async fn retry_with_backoff<T, E, F, Fut>(attempts: u32, base_delay: Duration, mut op: F) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = attempts.max(1);
    let mut delay = base_delay;
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < attempts => {
                warn!(
                    "attempt {}/{} failed: {}, retrying in {} ms",
                    attempt,
                    attempts,
                    e,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
