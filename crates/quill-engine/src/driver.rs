use async_trait::async_trait;
pub use quill_common::error::DriverError;
use quill_common::protocol::{ElementId, Locator};
use quill_common::{QuillError, Result};

#[derive(Debug, Clone)]
pub struct NavigationResult {
    pub url: String,
    pub title: String,
}

/// The browser collaborator every capability talks through. The engine never
/// touches the network itself.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Open the browser session.
    async fn launch(&mut self) -> std::result::Result<(), DriverError>;

    /// Close the session and release the browser.
    async fn close(&mut self) -> std::result::Result<(), DriverError>;

    async fn is_ready(&self) -> bool;

    /// Navigate to an absolute URL. Invalidates every element handle.
    async fn navigate(&mut self, url: &str) -> std::result::Result<NavigationResult, DriverError>;

    async fn current_url(&mut self) -> std::result::Result<String, DriverError>;

    async fn title(&mut self) -> std::result::Result<String, DriverError>;

    async fn page_source(&mut self) -> std::result::Result<String, DriverError>;

    /// All elements in the current browsing context matching `locator`, in
    /// document order. An empty vector is not an error.
    async fn find_all(
        &mut self,
        locator: &Locator,
    ) -> std::result::Result<Vec<ElementId>, DriverError>;

    /// Descendants of `parent` matching `locator`.
    async fn find_all_in(
        &mut self,
        parent: ElementId,
        locator: &Locator,
    ) -> std::result::Result<Vec<ElementId>, DriverError>;

    async fn click(&mut self, element: ElementId) -> std::result::Result<(), DriverError>;

    /// Rendered text of the element.
    async fn text(&mut self, element: ElementId) -> std::result::Result<String, DriverError>;

    async fn outer_html(&mut self, element: ElementId)
    -> std::result::Result<String, DriverError>;

    /// Clear the field, then type `text` into it.
    async fn set_text(
        &mut self,
        element: ElementId,
        text: &str,
    ) -> std::result::Result<(), DriverError>;

    /// Current `value` property of a form control.
    async fn value(
        &mut self,
        element: ElementId,
    ) -> std::result::Result<Option<String>, DriverError>;

    async fn attribute(
        &mut self,
        element: ElementId,
        name: &str,
    ) -> std::result::Result<Option<String>, DriverError>;

    async fn is_selected(&mut self, element: ElementId) -> std::result::Result<bool, DriverError>;

    async fn is_displayed(&mut self, element: ElementId)
    -> std::result::Result<bool, DriverError>;

    async fn select_by_label(
        &mut self,
        element: ElementId,
        label: &str,
    ) -> std::result::Result<(), DriverError>;

    async fn select_by_index(
        &mut self,
        element: ElementId,
        index: usize,
    ) -> std::result::Result<(), DriverError>;

    /// Run a script in the page and return its result.
    async fn execute_script(
        &mut self,
        _script: &str,
        _args: Vec<serde_json::Value>,
    ) -> std::result::Result<serde_json::Value, DriverError> {
        Err(DriverError::NotSupported("execute_script".into()))
    }

    /// Switch the browsing context into the given frame element.
    async fn enter_frame(&mut self, _frame: ElementId) -> std::result::Result<(), DriverError> {
        Err(DriverError::NotSupported("enter_frame".into()))
    }

    /// Switch back to the top-level document.
    async fn enter_default_content(&mut self) -> std::result::Result<(), DriverError> {
        Err(DriverError::NotSupported("enter_default_content".into()))
    }

    /// Text of the open alert dialog, if any.
    async fn alert_text(&mut self) -> std::result::Result<Option<String>, DriverError> {
        Ok(None)
    }

    async fn dismiss_alert(&mut self) -> std::result::Result<(), DriverError> {
        Err(DriverError::NotSupported("dismiss_alert".into()))
    }

    /// Drop handles the caller is done with. Releasing an unknown handle is
    /// not an error.
    async fn release(&mut self, _elements: &[ElementId]) {}
}

/// First element matching `locator`, or `ElementNotFound`.
pub async fn find_first<D: Driver + ?Sized>(driver: &mut D, locator: &Locator) -> Result<ElementId> {
    find_optional(driver, locator)
        .await?
        .ok_or_else(|| QuillError::ElementNotFound(locator.to_string()))
}

/// Keep the first handle and release the rest.
async fn keep_first<D: Driver + ?Sized>(
    driver: &mut D,
    found: Vec<ElementId>,
) -> Option<ElementId> {
    let (first, rest) = found.split_first()?;
    driver.release(rest).await;
    Some(*first)
}

pub async fn find_optional<D: Driver + ?Sized>(
    driver: &mut D,
    locator: &Locator,
) -> Result<Option<ElementId>> {
    let found = driver.find_all(locator).await?;
    Ok(keep_first(driver, found).await)
}

pub async fn find_first_in<D: Driver + ?Sized>(
    driver: &mut D,
    parent: ElementId,
    locator: &Locator,
) -> Result<ElementId> {
    let found = driver.find_all_in(parent, locator).await?;
    keep_first(driver, found)
        .await
        .ok_or_else(|| QuillError::ElementNotFound(format!("{} inside {}", locator, parent)))
}

/// Number of elements matching `locator`. No handles outlive the call.
pub async fn count<D: Driver + ?Sized>(driver: &mut D, locator: &Locator) -> Result<usize> {
    let found = driver.find_all(locator).await?;
    driver.release(&found).await;
    Ok(found.len())
}

pub async fn is_present<D: Driver + ?Sized>(driver: &mut D, locator: &Locator) -> Result<bool> {
    Ok(count(driver, locator).await? > 0)
}
