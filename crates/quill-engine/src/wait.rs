use crate::driver::{Driver, find_optional};
use quill_common::protocol::{ElementId, Locator};
use quill_common::{QuillError, Result};
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Poll until the browser reports a URL other than `from`.
pub async fn wait_for_url_change<D: Driver + ?Sized>(
    driver: &mut D,
    from: &str,
    timeout: Duration,
    interval: Duration,
) -> Result<String> {
    let deadline = Instant::now() + timeout;
    loop {
        let current = driver.current_url().await?;
        if current != from {
            debug!("url changed: {} -> {}", from, current);
            return Ok(current);
        }
        if Instant::now() >= deadline {
            return Err(QuillError::WaitTimeout {
                what: format!("url to change from {}", from),
                timeout,
            });
        }
        sleep(interval).await;
    }
}

/// Poll until an element matching `locator` is present.
pub async fn wait_for_element<D: Driver + ?Sized>(
    driver: &mut D,
    locator: &Locator,
    timeout: Duration,
    interval: Duration,
) -> Result<ElementId> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(element) = find_optional(driver, locator).await? {
            return Ok(element);
        }
        if Instant::now() >= deadline {
            return Err(QuillError::WaitTimeout {
                what: locator.to_string(),
                timeout,
            });
        }
        sleep(interval).await;
    }
}
