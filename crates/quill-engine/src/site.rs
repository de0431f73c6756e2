use crate::action_log::ActionLog;
use crate::config::QuillConfig;
use crate::driver::Driver;
use std::collections::BTreeMap;

/// Author name to absolute profile URL, filled while walking the base listing.
pub type AuthorsMap = BTreeMap<String, String>;

/// Page indices seen by the last pagination step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct History {
    pub previous: u32,
    pub current: u32,
}

/// One run against the fixture site: the browser, the verification log every
/// operation writes into, and the transient state shared between operations.
///
/// Capabilities are implemented as methods on this type across the
/// `navigator`, `extract`, `form` and `session` modules.
pub struct Site<'a, D: Driver + ?Sized> {
    pub(crate) driver: &'a mut D,
    pub(crate) log: &'a mut ActionLog,
    pub(crate) config: &'a QuillConfig,
    pub(crate) history: History,
    pub(crate) authors: AuthorsMap,
}

impl<'a, D: Driver + ?Sized> Site<'a, D> {
    pub fn new(driver: &'a mut D, log: &'a mut ActionLog, config: &'a QuillConfig) -> Self {
        Self {
            driver,
            log,
            config,
            history: History::default(),
            authors: AuthorsMap::new(),
        }
    }

    pub fn log(&self) -> &ActionLog {
        self.log
    }

    pub fn config(&self) -> &QuillConfig {
        self.config
    }

    pub fn history(&self) -> History {
        self.history
    }

    pub fn authors(&self) -> &AuthorsMap {
        &self.authors
    }

    pub fn driver(&mut self) -> &mut D {
        self.driver
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// `href` resolved against the site root.
    pub(crate) fn absolute_url(&self, href: &str) -> String {
        url::Url::parse(self.base_url())
            .and_then(|base| base.join(href))
            .map(|u| u.to_string())
            .unwrap_or_else(|_| href.to_string())
    }
}
