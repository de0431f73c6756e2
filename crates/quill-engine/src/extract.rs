//! Extraction strategies: one per fixture layout, all converging on the same
//! ordered sequence of [`QuoteRecord`]s.

use crate::config::{PageTermination, TablefulTermination};
use crate::driver::{Driver, count, find_first, find_optional};
use crate::navigator::Direction;
use crate::parser;
use crate::site::Site;
use quill_common::protocol::{Endpoint, Locator, QuoteRecord};
use quill_common::{QuillError, Result};
use tracing::{info, warn};

const QUOTE: &str = ".quote";
const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

impl<D: Driver + ?Sized> Site<'_, D> {
    /// Every quote block in the current browsing context, in document order.
    async fn quotes_on_page(&mut self, collect_authors: bool) -> Result<Vec<QuoteRecord>> {
        let blocks = self.driver.find_all(&Locator::css(QUOTE)).await?;
        if blocks.is_empty() {
            let url = self.driver.current_url().await?;
            return Err(QuillError::EmptyResultSet(url));
        }

        let mut records = Vec::with_capacity(blocks.len());
        for &block in &blocks {
            let html = self.driver.outer_html(block).await?;
            let parsed = parser::parse_quote_block(&html, self.config.author_marker)?;
            if collect_authors && let Some(href) = parsed.author_url {
                let profile = self.absolute_url(&href);
                self.authors
                    .entry(parsed.record.author.clone())
                    .or_insert(profile);
            }
            records.push(parsed.record);
        }
        self.driver.release(&blocks).await;
        Ok(records)
    }

    async fn first_quote(&mut self) -> Result<QuoteRecord> {
        let mut records = self.quotes_on_page(false).await?;
        Ok(records.swap_remove(0))
    }

    /// Walk a client-paginated listing from its first page.
    async fn walk_pages(
        &mut self,
        endpoint: Endpoint,
        termination: PageTermination,
        collect_authors: bool,
    ) -> Result<Vec<QuoteRecord>> {
        self.switch_to(endpoint).await?;

        let mut records = Vec::new();
        let mut pages = 0;
        loop {
            records.extend(self.quotes_on_page(collect_authors).await?);
            pages += 1;

            let done = match termination {
                PageTermination::NextAbsent => !self.has_control(Direction::Next).await?,
                PageTermination::PreviousPresent => {
                    self.has_control(Direction::Previous).await?
                        || !self.has_control(Direction::Next).await?
                }
            };
            if done {
                break;
            }
            self.paginate(Direction::Next).await?;
        }

        info!("{}: {} records over {} pages", endpoint, records.len(), pages);
        Ok(records)
    }

    /// The paginated HTML listing. Also fills the authors map from the
    /// `(about)` links.
    pub async fn extract_base(&mut self) -> Result<Vec<QuoteRecord>> {
        let termination = self.config.pagination.base;
        self.walk_pages(Endpoint::Base, termination, true).await
    }

    /// The JavaScript-rendered listing.
    pub async fn extract_js(&mut self) -> Result<Vec<QuoteRecord>> {
        let termination = self.config.pagination.js;
        self.walk_pages(Endpoint::Js, termination, false).await
    }

    /// The infinite-scroll listing: scroll to the bottom until the number of
    /// quotes stops growing.
    pub async fn extract_scroll(&mut self) -> Result<Vec<QuoteRecord>> {
        self.switch_to(Endpoint::Scroll).await?;

        let quotes = Locator::css(QUOTE);
        let mut seen = count(self.driver, &quotes).await?;
        let mut grew = false;
        let mut stable = false;
        for _ in 0..self.config.timeouts.max_scroll_rounds {
            self.driver.execute_script(SCROLL_TO_BOTTOM, vec![]).await?;
            tokio::time::sleep(self.config.timeouts.scroll_delay()).await;

            let now = count(self.driver, &quotes).await?;
            if now == seen {
                stable = true;
                break;
            }
            grew = true;
            seen = now;
        }
        if !stable {
            warn!(
                "scroll: {} quotes and still growing after {} rounds",
                seen, self.config.timeouts.max_scroll_rounds
            );
        }
        self.log.record("scroll.grew", grew);

        let records = self.quotes_on_page(false).await?;
        info!("scroll: {} records", records.len());
        Ok(records)
    }

    async fn table_page(&mut self) -> Result<Vec<QuoteRecord>> {
        let table = find_first(self.driver, &Locator::css("table")).await?;
        let html = self.driver.outer_html(table).await?;
        let records = parser::parse_table(&html)?;
        if records.is_empty() {
            let url = self.driver.current_url().await?;
            return Err(QuillError::EmptyResultSet(url));
        }
        Ok(records)
    }

    /// The table layout. It has no pagination control, so page URLs are
    /// built directly.
    pub async fn extract_tableful(&mut self) -> Result<Vec<QuoteRecord>> {
        self.switch_to(Endpoint::Tableful).await?;
        let mut records = self.table_page().await?;

        let termination = self.config.tableful.clone();
        let listing = Endpoint::Tableful.url(self.base_url());
        let mut page = 1;
        loop {
            page += 1;
            if let TablefulTermination::FixedPages(last) = termination
                && page > last
            {
                break;
            }

            self.open_url(&format!("{}/page/{}/", listing, page)).await?;
            if let TablefulTermination::EndMarker(marker) = &termination
                && self.driver.page_source().await?.contains(marker.as_str())
            {
                break;
            }
            records.extend(self.table_page().await?);
        }

        info!("tableful: {} records over {} pages", records.len(), page - 1);
        Ok(records)
    }

    /// The page embedding the listing in a named iframe.
    pub async fn extract_iframe(&mut self) -> Result<QuoteRecord> {
        self.switch_to(Endpoint::Iframe).await?;
        let outer = self.driver.page_source().await?;

        let name = self.config.frames.iframe.clone();
        let locator = Locator::tag("iframe", &[("name", name.as_str())]);
        let frame = find_first(self.driver, &locator).await?;
        self.driver.enter_frame(frame).await?;

        let result = async {
            let inner = self.driver.page_source().await?;
            self.log.record("iframe.distinct", inner != outer);
            self.first_quote().await
        }
        .await;
        self.driver.enter_default_content().await?;
        result
    }

    /// The frameset page: one frame holds a quote, its sibling plain text.
    pub async fn extract_frames(&mut self) -> Result<QuoteRecord> {
        self.switch_to(Endpoint::Frames).await?;

        let frames = self.config.frames.clone();
        let record_frame = find_optional(
            self.driver,
            &Locator::tag("frame", &[("name", frames.record_frame.as_str())]),
        )
        .await?;
        let text_frame = find_optional(
            self.driver,
            &Locator::tag("frame", &[("name", frames.text_frame.as_str())]),
        )
        .await?;
        self.log.record(
            "frames.present",
            record_frame.is_some() && text_frame.is_some(),
        );
        let (Some(record_frame), Some(text_frame)) = (record_frame, text_frame) else {
            return Err(QuillError::ElementNotFound(format!(
                "frames {:?} and {:?}",
                frames.record_frame, frames.text_frame
            )));
        };

        self.driver.enter_frame(text_frame).await?;
        let text = async {
            let body = find_first(self.driver, &Locator::css("body")).await?;
            self.driver.text(body).await.map_err(QuillError::from)
        }
        .await;
        self.driver.enter_default_content().await?;
        self.log
            .record("frames.text_frame", !text?.trim().is_empty());

        self.driver.enter_frame(record_frame).await?;
        let result = self.first_quote().await;
        self.driver.enter_default_content().await?;
        result
    }

    /// A single quote from the random endpoint.
    pub async fn extract_random(&mut self) -> Result<QuoteRecord> {
        self.switch_to(Endpoint::Random).await?;
        self.first_quote().await
    }
}
