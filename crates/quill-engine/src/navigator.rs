use crate::driver::{Driver, find_first_in, find_optional, is_present};
use crate::site::{History, Site};
use crate::wait::wait_for_url_change;
use quill_common::protocol::{Endpoint, Locator};
use quill_common::{QuillError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::{debug, info};

static PAGE_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(\d+)/$").expect("valid page index pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    pub fn name(self) -> &'static str {
        match self {
            Direction::Next => "next",
            Direction::Previous => "previous",
        }
    }

    /// The `<li>` that wraps the pagination link.
    pub fn control(self) -> Locator {
        Locator::css(format!("li.{}", self.name()))
    }
}

impl FromStr for Direction {
    type Err = QuillError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "next" => Ok(Direction::Next),
            "previous" => Ok(Direction::Previous),
            other => Err(QuillError::invalid_argument("pagination direction", other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Page index from a URL ending in `/<digits>/`.
pub fn page_index(url: &str) -> Option<u32> {
    PAGE_INDEX
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

impl<D: Driver + ?Sized> Site<'_, D> {
    /// Bring the browser to `endpoint`. A no-op when it is already there.
    pub async fn switch_to(&mut self, endpoint: Endpoint) -> Result<()> {
        let target = endpoint.url(self.base_url());
        self.open_url(&target).await
    }

    /// Navigate to an absolute URL and block until the browser reports it left
    /// the previous one.
    pub(crate) async fn open_url(&mut self, target: &str) -> Result<()> {
        let before = self.driver.current_url().await?;
        if before == target {
            debug!("already at {}", target);
            return Ok(());
        }

        info!("navigating to {}", target);
        let loaded = self.driver.navigate(target).await?;
        debug!("loaded {:?} at {}", loaded.title, loaded.url);
        let timeouts = &self.config.timeouts;
        wait_for_url_change(
            self.driver,
            &before,
            timeouts.navigation(),
            timeouts.poll_interval(),
        )
        .await?;
        Ok(())
    }

    pub async fn has_control(&mut self, direction: Direction) -> Result<bool> {
        is_present(self.driver, &direction.control()).await
    }

    /// Follow the pagination link in `direction`. Returns whether the page
    /// index moved by exactly one.
    pub async fn paginate(&mut self, direction: Direction) -> Result<bool> {
        let before = self.driver.current_url().await?;
        let old = page_index(&before).unwrap_or(1);

        let control = find_optional(self.driver, &direction.control()).await?;
        self.log
            .record(format!("paginate.{}.control", direction), control.is_some());
        let control = control.ok_or_else(|| {
            QuillError::ElementNotFound(format!("{} pagination control", direction))
        })?;

        let link = find_first_in(self.driver, control, &Locator::css("a")).await?;
        let href = self.driver.attribute(link, "href").await?;
        self.driver.click(link).await?;

        let timeouts = &self.config.timeouts;
        let after = wait_for_url_change(
            self.driver,
            &before,
            timeouts.navigation(),
            timeouts.poll_interval(),
        )
        .await?;
        let new = page_index(&after).unwrap_or(1);
        self.history = History {
            previous: old,
            current: new,
        };
        debug!("paginated {} from page {} to {}", direction, old, new);

        // The browser must land where the link pointed.
        let target = href.map(|h| self.absolute_url(&h));
        self.log.record(
            format!("paginate.{}.target", direction),
            target.as_deref() == Some(after.as_str()),
        );

        Ok(self
            .log
            .record(format!("paginate.{}.delta", direction), old.abs_diff(new) == 1))
    }
}
