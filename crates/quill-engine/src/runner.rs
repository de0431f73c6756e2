//! The run orchestrator: an explicit registry of zero-argument capabilities,
//! invoked in lexical order against one browser session.

use crate::action_log::ActionLog;
use crate::config::QuillConfig;
use crate::driver::Driver;
use crate::site::Site;
use quill_common::protocol::QuoteRecord;
use quill_common::{QuillError, Result};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    Base,
    Form,
    Frames,
    Iframe,
    Js,
    Random,
    Scroll,
    Search,
    Session,
    Tableful,
}

impl Capability {
    /// Every capability, sorted by name.
    pub const ALL: [Capability; 10] = [
        Capability::Base,
        Capability::Form,
        Capability::Frames,
        Capability::Iframe,
        Capability::Js,
        Capability::Random,
        Capability::Scroll,
        Capability::Search,
        Capability::Session,
        Capability::Tableful,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Capability::Base => "base",
            Capability::Form => "form",
            Capability::Frames => "frames",
            Capability::Iframe => "iframe",
            Capability::Js => "js",
            Capability::Random => "random",
            Capability::Scroll => "scroll",
            Capability::Search => "search",
            Capability::Session => "session",
            Capability::Tableful => "tableful",
        }
    }
}

impl FromStr for Capability {
    type Err = QuillError;

    fn from_str(s: &str) -> Result<Self> {
        Capability::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| QuillError::invalid_argument("capability", s))
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct CapabilityOutcome {
    pub capability: Capability,
    pub passed: bool,
    pub records: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcomes: Vec<CapabilityOutcome>,
    pub authors: usize,
    /// Conjunction of every outcome in the action log.
    pub passed: bool,
}

impl<D: Driver + ?Sized> Site<'_, D> {
    /// Shared checks for a complete listing.
    fn verify_listing(&mut self, name: &str, records: &[QuoteRecord]) -> bool {
        let expected = self.config.fixture.expected_records;
        let count = self
            .log
            .record(format!("{}.count", name), records.len() == expected);
        let authors = self.log.record(
            format!("{}.authors", name),
            records.iter().all(|r| !r.author.is_empty()),
        );
        let texts = self.log.record(
            format!("{}.texts", name),
            records.iter().all(|r| !r.text.is_empty()),
        );
        count && authors && texts
    }

    fn verify_single(&mut self, name: &str, record: &QuoteRecord) -> bool {
        self.log.record(
            format!("{}.record", name),
            !record.text.is_empty() && !record.author.is_empty(),
        )
    }

    /// Run one capability; returns whether its checks passed and how many
    /// records it produced.
    pub async fn run_capability(&mut self, capability: Capability) -> Result<(bool, usize)> {
        let fixture = self.config.fixture.clone();
        let outcome = match capability {
            Capability::Base => {
                let records = self.extract_base().await?;
                let listing = self.verify_listing("base", &records);
                let profiles = !self.authors.is_empty();
                let authors = self.log.record("base.author_profiles", profiles);
                (listing && authors, records.len())
            }
            Capability::Js => {
                let records = self.extract_js().await?;
                (self.verify_listing("js", &records), records.len())
            }
            Capability::Scroll => {
                let records = self.extract_scroll().await?;
                (self.verify_listing("scroll", &records), records.len())
            }
            Capability::Tableful => {
                let records = self.extract_tableful().await?;
                (self.verify_listing("tableful", &records), records.len())
            }
            Capability::Iframe => {
                let record = self.extract_iframe().await?;
                (self.verify_single("iframe", &record), 1)
            }
            Capability::Frames => {
                let record = self.extract_frames().await?;
                (self.verify_single("frames", &record), 1)
            }
            Capability::Random => {
                let record = self.extract_random().await?;
                (self.verify_single("random", &record), 1)
            }
            Capability::Search => {
                let records = self
                    .search(&fixture.search_author, &fixture.search_tag)
                    .await?;
                let passed = self.log.get("search.filters").unwrap_or(false)
                    && self.log.get("search.author_match").unwrap_or(false)
                    && self.log.get("search.tag_match").unwrap_or(false);
                (passed, records.len())
            }
            Capability::Form => (self.fill_form().await?, 0),
            Capability::Session => {
                let logged_in = self.login(&fixture.username, &fixture.password).await?;
                let logged_out = self.logout().await?;
                (logged_in && logged_out, 0)
            }
        };
        Ok(outcome)
    }
}

/// Invoke `capabilities` in order, recording each one's outcome as
/// `capability.<name>`. The first error aborts the run.
pub async fn run<D: Driver + ?Sized>(
    driver: &mut D,
    config: &QuillConfig,
    log: &mut ActionLog,
    capabilities: &[Capability],
) -> Result<RunReport> {
    let mut site = Site::new(driver, log, config);
    let mut outcomes = Vec::with_capacity(capabilities.len());

    for &capability in capabilities {
        info!("running {}", capability);
        let started = Instant::now();
        let (passed, records) = site.run_capability(capability).await?;
        let passed = site
            .log
            .record(format!("capability.{}", capability), passed);
        outcomes.push(CapabilityOutcome {
            capability,
            passed,
            records,
            elapsed: started.elapsed(),
        });
    }

    Ok(RunReport {
        outcomes,
        authors: site.authors.len(),
        passed: site.log.summary(),
    })
}
