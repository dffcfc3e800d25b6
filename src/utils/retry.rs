use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retries `op` up to `max_attempts` times with an exponentially growing
/// delay between attempts (base, 2x base, 4x base, ...). Each retry restarts
/// the whole operation; nothing is resumed from partial output. After the
/// last attempt fails, the terminal error embeds the last failure's message.
pub async fn retry_with_backoff<T, F, Fut>(
    max_attempts: u32,
    base_delay: Duration,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                warn!(attempt, error = %err, "attempt failed");
                if attempt >= max_attempts {
                    return Err(Error::Generation(format!(
                        "Failed to process content after {} attempts. {}",
                        max_attempts, err
                    )));
                }
                tokio::time::sleep(base_delay * 2u32.pow(attempt - 1)).await;
            }
        }
    }
}
