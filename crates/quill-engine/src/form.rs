//! Form and filter interaction. Every mutation of browser state is followed
//! by a read-back check, and an operation's outcome is the conjunction of its
//! checks.

use crate::driver::{Driver, find_first, find_optional};
use crate::parser;
use crate::site::Site;
use crate::wait::wait_for_element;
use quill_common::protocol::{ElementId, Endpoint, Locator, QuoteRecord};
use quill_common::{QuillError, Result};
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

const FORM_NAME: &str = "Albert Einstein";
const FORM_COMMENT: &str = "Imagination is more important than knowledge.\nKnowledge is limited.";
const FORM_GENDER: &str = "male";
const FORM_GENDER_OTHER: &str = "female";
const FORM_TOPICS: [&str; 2] = ["inspirational", "life"];
const FORM_DROPDOWN: &str = "Mark Twain";
const FORM_RATING: &str = "5";

const NAME_BY_XPATH: &str = "//form//input[@id='name']";
const COMMENT_BY_CSS: &str = "form textarea";

const CONFIRMATION_TEXT: &str = "Thank you";
const CONFIRMATION_TITLE: &str = "Submitted";

impl<D: Driver + ?Sized> Site<'_, D> {
    async fn value_of(&mut self, element: ElementId) -> Result<String> {
        Ok(self.driver.value(element).await?.unwrap_or_default())
    }

    /// Index of the `#tag` option labelled `tag`. The fixture rebuilds the tag
    /// list after the author changes, so it is polled for.
    async fn tag_option_index(&mut self, tag: &str) -> Result<usize> {
        let timeout = self.config.timeouts.session();
        let deadline = Instant::now() + timeout;
        loop {
            let options = self.driver.find_all(&Locator::css("#tag option")).await?;
            let mut found = None;
            for (index, &option) in options.iter().enumerate() {
                if self.driver.text(option).await?.trim() == tag {
                    found = Some(index);
                    break;
                }
            }
            self.driver.release(&options).await;
            if let Some(index) = found {
                return Ok(index);
            }
            if Instant::now() >= deadline {
                return Err(QuillError::WaitTimeout {
                    what: format!("tag option {:?}", tag),
                    timeout,
                });
            }
            sleep(self.config.timeouts.poll_interval()).await;
        }
    }

    /// Pick `author` by its label and `tag` by its position, submit, and
    /// report whether both controls read back what was asked for.
    pub async fn select_filters(&mut self, author: &str, tag: &str) -> Result<bool> {
        let author_select = find_first(self.driver, &Locator::id("author")).await?;
        self.driver.select_by_label(author_select, author).await?;
        let author_select = find_first(self.driver, &Locator::id("author")).await?;
        let selected_author = self.value_of(author_select).await?;
        let author_ok = self
            .log
            .record("search.author_selected", selected_author == author);

        let index = self.tag_option_index(tag).await?;
        let tag_select = find_first(self.driver, &Locator::id("tag")).await?;
        self.driver.select_by_index(tag_select, index).await?;
        let selected_tag = self.value_of(tag_select).await?;
        let tag_ok = self.log.record("search.tag_selected", selected_tag == tag);

        let submit = find_first(self.driver, &Locator::css("input[type=\"submit\"]")).await?;
        self.driver.click(submit).await?;
        debug!("submitted filters {:?} / {:?}", author, tag);

        Ok(author_ok && tag_ok)
    }

    /// Filter the search page and parse the result set.
    pub async fn search(&mut self, author: &str, tag: &str) -> Result<Vec<QuoteRecord>> {
        self.switch_to(Endpoint::Search).await?;
        let filtered = self.select_filters(author, tag).await?;
        self.log.record("search.filters", filtered);

        let timeouts = &self.config.timeouts;
        let results = wait_for_element(
            self.driver,
            &Locator::css(".results"),
            timeouts.session(),
            timeouts.poll_interval(),
        )
        .await?;
        let html = self.driver.outer_html(results).await?;
        let records = parser::parse_filter_results(&html)?;
        if records.is_empty() {
            return Err(QuillError::EmptyResultSet(format!(
                "search for {:?} / {:?}",
                author, tag
            )));
        }

        self.log.record(
            "search.author_match",
            records.iter().all(|r| r.author == author),
        );
        self.log.record(
            "search.tag_match",
            records.iter().all(|r| r.tags.iter().any(|t| t == tag)),
        );
        info!("search: {} records for {:?} / {:?}", records.len(), author, tag);
        Ok(records)
    }

    async fn click_and_check(&mut self, name: &str, locator: &Locator) -> Result<bool> {
        let element = find_first(self.driver, locator).await?;
        self.driver.click(element).await?;
        let selected = self.driver.is_selected(element).await?;
        Ok(self.log.record(name, selected))
    }

    async fn set_and_check(&mut self, name: &str, locator: &Locator, text: &str) -> Result<bool> {
        let element = find_first(self.driver, locator).await?;
        self.driver.set_text(element, text).await?;
        let value = self.value_of(element).await?;
        Ok(self.log.record(name, value == text))
    }

    async fn confirmation_seen(&mut self) -> Result<bool> {
        let deadline = Instant::now() + self.config.timeouts.session();
        loop {
            let title = self.driver.title().await?;
            let text = match find_optional(self.driver, &Locator::css("body")).await? {
                Some(body) => self.driver.text(body).await?,
                None => String::new(),
            };
            if text.contains(CONFIRMATION_TEXT) || title.contains(CONFIRMATION_TITLE) {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            sleep(self.config.timeouts.poll_interval()).await;
        }
    }

    /// Exercise every widget kind on the form page, then submit it.
    pub async fn fill_form(&mut self) -> Result<bool> {
        self.switch_to(Endpoint::Form).await?;
        let mut ok = true;

        ok &= self
            .set_and_check("form.text", &Locator::id("name"), FORM_NAME)
            .await?;
        ok &= self
            .set_and_check("form.textarea", &Locator::id("comment"), FORM_COMMENT)
            .await?;

        let gender = Locator::tag("input", &[("name", "gender"), ("value", FORM_GENDER)]);
        ok &= self.click_and_check("form.radio", &gender).await?;
        let other = Locator::tag("input", &[("name", "gender"), ("value", FORM_GENDER_OTHER)]);
        let other = find_first(self.driver, &other).await?;
        let exclusive = !self.driver.is_selected(other).await?;
        ok &= self.log.record("form.radio_exclusive", exclusive);

        for topic in FORM_TOPICS {
            let checkbox = Locator::tag("input", &[("name", "topics"), ("value", topic)]);
            ok &= self
                .click_and_check(&format!("form.checkbox.{}", topic), &checkbox)
                .await?;
        }

        ok &= self.pick_dropdown(FORM_DROPDOWN).await?;

        let rating = Locator::css(format!(
            "table#ratings input[type=\"radio\"][value=\"{}\"]",
            FORM_RATING
        ));
        ok &= self.click_and_check("form.table_radio", &rating).await?;

        // Same controls again, reached by raw paths instead of id.
        let by_xpath = find_first(self.driver, &Locator::xpath(NAME_BY_XPATH)).await?;
        let value = self.value_of(by_xpath).await?;
        ok &= self.log.record("form.xpath_readback", value == FORM_NAME);
        let by_css = find_first(self.driver, &Locator::css(COMMENT_BY_CSS)).await?;
        let value = self.value_of(by_css).await?;
        ok &= self.log.record("form.css_readback", value == FORM_COMMENT);

        let submit = find_first(self.driver, &Locator::css("form [type=\"submit\"]")).await?;
        self.driver.click(submit).await?;
        if let Some(alert) = self.driver.alert_text().await? {
            info!("form: dismissing alert {:?}", alert);
            self.driver.dismiss_alert().await?;
        }

        let confirmed = self.confirmation_seen().await?;
        ok &= self.log.record("form.submitted", confirmed);
        Ok(ok)
    }

    /// The dropdown is rendered by script: open it, click the entry, and
    /// check the toggle now shows the entry's label.
    async fn pick_dropdown(&mut self, label: &str) -> Result<bool> {
        let toggle = Locator::css("#author-dropdown .dropdown-toggle");
        let element = find_first(self.driver, &toggle).await?;
        self.driver.click(element).await?;

        let items = self
            .driver
            .find_all(&Locator::css("#author-dropdown .dropdown-item"))
            .await?;
        let open = match items.first() {
            Some(&first) => self.driver.is_displayed(first).await?,
            None => false,
        };
        self.log.record("form.dropdown_open", open);

        let mut picked = None;
        for &item in &items {
            if self.driver.text(item).await?.trim() == label {
                picked = Some(item);
                break;
            }
        }
        let item = picked
            .ok_or_else(|| QuillError::ElementNotFound(format!("dropdown entry {:?}", label)))?;
        self.driver.click(item).await?;
        self.driver.release(&items).await;

        let element = find_first(self.driver, &toggle).await?;
        let shown = self.driver.text(element).await?;
        let picked = self.log.record("form.dropdown", shown.trim() == label);
        Ok(open && picked)
    }
}
