use crate::webdriver::{BrowserKind, WebDriverClient};
use async_trait::async_trait;
use fantoccini::Client;
use fantoccini::elements::Element;
use quill_engine::driver::{Driver, DriverError, NavigationResult};
use quill_engine::protocol::{ElementId, Locator};
use std::collections::HashMap;
use tracing::{debug, info};

/// Element handles issued for one page. Every handle is dropped when the
/// page URL changes, fragment aside, so handles never outlive their document.
struct Registry<T> {
    page: Option<String>,
    items: HashMap<u64, T>,
    next_id: u64,
}

impl<T> Registry<T> {
    fn new() -> Self {
        Self {
            page: None,
            items: HashMap::new(),
            next_id: 0,
        }
    }

    fn get(&self, id: ElementId) -> Result<&T, DriverError> {
        self.items.get(&id.0).ok_or(DriverError::StaleElement(id))
    }

    fn issue(&mut self, found: Vec<T>) -> Vec<ElementId> {
        found
            .into_iter()
            .map(|item| {
                self.next_id += 1;
                self.items.insert(self.next_id, item);
                ElementId(self.next_id)
            })
            .collect()
    }

    fn release(&mut self, ids: &[ElementId]) {
        for id in ids {
            self.items.remove(&id.0);
        }
    }

    /// Record the URL the browser reports. A different page drops every
    /// handle.
    fn observe(&mut self, url: &str) {
        let page = url.split('#').next().unwrap_or(url);
        if self.page.as_deref() != Some(page) {
            if !self.items.is_empty() {
                debug!("page changed to {}, dropping {} handles", page, self.items.len());
            }
            self.items.clear();
            self.page = Some(page.to_string());
        }
    }

    fn clear(&mut self) {
        self.items.clear();
        self.page = None;
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// [`Driver`] over a remote WebDriver endpoint (chromedriver, geckodriver,
/// Selenium). Element handles index a per-page registry of fantoccini
/// elements.
pub struct WebDriverBackend {
    client: Option<WebDriverClient>,
    webdriver_url: String,
    browser: BrowserKind,
    headless: bool,
    elements: Registry<Element>,
}

impl WebDriverBackend {
    pub fn new(webdriver_url: impl Into<String>, browser: BrowserKind, headless: bool) -> Self {
        Self {
            client: None,
            webdriver_url: webdriver_url.into(),
            browser,
            headless,
            elements: Registry::new(),
        }
    }

    /// Handles currently resolvable.
    pub fn live_handles(&self) -> usize {
        self.elements.len()
    }

    fn client(&self) -> Result<&Client, DriverError> {
        self.client
            .as_ref()
            .map(|c| &c.client)
            .ok_or(DriverError::NotReady)
    }

    fn element(&self, id: ElementId) -> Result<&Element, DriverError> {
        self.elements.get(id)
    }

    async fn navigation_result(&self) -> Result<NavigationResult, DriverError> {
        let client = self.client()?;
        let title = client.title().await.unwrap_or_default();
        let url = client
            .current_url()
            .await
            .map(|u| u.to_string())
            .unwrap_or_default();
        Ok(NavigationResult { url, title })
    }
}

fn command(e: impl std::fmt::Display) -> DriverError {
    DriverError::Command(e.to_string())
}

/// A [`Locator`] lowered to the strategy and owned value fantoccini queries by.
struct Query {
    by: By,
    value: String,
}

enum By {
    Css,
    XPath,
}

impl Query {
    fn new(locator: &Locator) -> Self {
        match locator {
            Locator::XPath(path) => Query {
                by: By::XPath,
                value: path.clone(),
            },
            other => Query {
                by: By::Css,
                value: other.to_css().unwrap_or_default(),
            },
        }
    }

    fn as_fantoccini(&self) -> fantoccini::Locator<'_> {
        match self.by {
            By::Css => fantoccini::Locator::Css(&self.value),
            By::XPath => fantoccini::Locator::XPath(&self.value),
        }
    }
}

#[async_trait]
impl Driver for WebDriverBackend {
    async fn launch(&mut self) -> Result<(), DriverError> {
        info!(
            "Connecting to WebDriver at {} ({}, headless: {})",
            self.webdriver_url, self.browser, self.headless
        );
        let caps = self.browser.capabilities(self.headless);
        let client = WebDriverClient::connect(&self.webdriver_url, caps).await?;
        self.client = Some(client);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        self.elements.clear();
        if let Some(client) = self.client.take() {
            client.close().await?;
        }
        Ok(())
    }

    async fn is_ready(&self) -> bool {
        self.client.is_some()
    }

    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, DriverError> {
        self.elements.clear();
        info!("Navigating to: {}", url);
        self.client()?
            .goto(url)
            .await
            .map_err(|e| DriverError::Navigation(e.to_string()))?;
        let result = self.navigation_result().await?;
        self.elements.observe(&result.url);
        Ok(result)
    }

    async fn current_url(&mut self) -> Result<String, DriverError> {
        let url = self.client()?.current_url().await.map_err(command)?.to_string();
        self.elements.observe(&url);
        Ok(url)
    }

    async fn title(&mut self) -> Result<String, DriverError> {
        self.client()?.title().await.map_err(command)
    }

    async fn page_source(&mut self) -> Result<String, DriverError> {
        self.client()?.source().await.map_err(command)
    }

    async fn find_all(&mut self, locator: &Locator) -> Result<Vec<ElementId>, DriverError> {
        let query = Query::new(locator);
        let found = self
            .client()?
            .find_all(query.as_fantoccini())
            .await
            .map_err(command)?;
        debug!("{} matched {} elements", locator, found.len());
        Ok(self.elements.issue(found))
    }

    async fn find_all_in(
        &mut self,
        parent: ElementId,
        locator: &Locator,
    ) -> Result<Vec<ElementId>, DriverError> {
        let query = Query::new(locator);
        let found = self
            .element(parent)?
            .find_all(query.as_fantoccini())
            .await
            .map_err(command)?;
        Ok(self.elements.issue(found))
    }

    async fn click(&mut self, element: ElementId) -> Result<(), DriverError> {
        self.element(element)?.click().await.map_err(command)
    }

    async fn text(&mut self, element: ElementId) -> Result<String, DriverError> {
        self.element(element)?.text().await.map_err(command)
    }

    async fn outer_html(&mut self, element: ElementId) -> Result<String, DriverError> {
        self.element(element)?.html(false).await.map_err(command)
    }

    async fn set_text(&mut self, element: ElementId, text: &str) -> Result<(), DriverError> {
        let el = self.element(element)?;
        el.clear().await.map_err(command)?;
        el.send_keys(text).await.map_err(command)
    }

    async fn value(&mut self, element: ElementId) -> Result<Option<String>, DriverError> {
        self.element(element)?.prop("value").await.map_err(command)
    }

    async fn attribute(
        &mut self,
        element: ElementId,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        self.element(element)?.attr(name).await.map_err(command)
    }

    async fn is_selected(&mut self, element: ElementId) -> Result<bool, DriverError> {
        self.element(element)?.is_selected().await.map_err(command)
    }

    async fn is_displayed(&mut self, element: ElementId) -> Result<bool, DriverError> {
        self.element(element)?.is_displayed().await.map_err(command)
    }

    async fn select_by_label(&mut self, element: ElementId, label: &str) -> Result<(), DriverError> {
        self.element(element)?
            .select_by_label(label)
            .await
            .map_err(command)
    }

    async fn select_by_index(&mut self, element: ElementId, index: usize) -> Result<(), DriverError> {
        self.element(element)?
            .select_by_index(index)
            .await
            .map_err(command)
    }

    async fn execute_script(
        &mut self,
        script: &str,
        args: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, DriverError> {
        self.client()?
            .execute(script, args)
            .await
            .map_err(|e| DriverError::Script(e.to_string()))
    }

    async fn enter_frame(&mut self, frame: ElementId) -> Result<(), DriverError> {
        self.element(frame)?
            .clone()
            .enter_frame()
            .await
            .map(|_| ())
            .map_err(command)
    }

    async fn enter_default_content(&mut self) -> Result<(), DriverError> {
        self.client()?.enter_frame(None).await.map_err(command)
    }

    async fn alert_text(&mut self) -> Result<Option<String>, DriverError> {
        match self.client()?.get_alert_text().await {
            Ok(text) => Ok(Some(text)),
            Err(e) => {
                debug!("no alert open: {}", e);
                Ok(None)
            }
        }
    }

    async fn dismiss_alert(&mut self) -> Result<(), DriverError> {
        self.client()?.dismiss_alert().await.map_err(command)
    }

    async fn release(&mut self, elements: &[ElementId]) {
        self.elements.release(elements);
    }
}
