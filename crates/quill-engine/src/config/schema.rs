use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuillConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Written as a one-key map, e.g. `fixed_pages: 10` or `end_marker: "..."`.
    #[serde(default, with = "serde_yaml::with::singleton_map")]
    pub tableful: TablefulTermination,
    #[serde(default)]
    pub frames: FramesConfig,
    #[serde(default)]
    pub author_marker: AuthorMarker,
    #[serde(default)]
    pub fixture: FixtureConfig,
}

impl Default for QuillConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeouts: TimeoutConfig::default(),
            pagination: PaginationConfig::default(),
            tableful: TablefulTermination::default(),
            frames: FramesConfig::default(),
            author_marker: AuthorMarker::default(),
            fixture: FixtureConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    "http://quotes.toscrape.com".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_navigation_ms")]
    pub navigation_ms: u64,
    #[serde(default = "default_session_ms")]
    pub session_ms: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_scroll_delay_ms")]
    pub scroll_delay_ms: u64,
    #[serde(default = "default_max_scroll_rounds")]
    pub max_scroll_rounds: usize,
}

impl TimeoutConfig {
    pub fn navigation(&self) -> Duration {
        Duration::from_millis(self.navigation_ms)
    }

    pub fn session(&self) -> Duration {
        Duration::from_millis(self.session_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            navigation_ms: default_navigation_ms(),
            session_ms: default_session_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            scroll_delay_ms: default_scroll_delay_ms(),
            max_scroll_rounds: default_max_scroll_rounds(),
        }
    }
}

fn default_navigation_ms() -> u64 {
    60000
}

fn default_session_ms() -> u64 {
    10000
}

fn default_poll_interval_ms() -> u64 {
    250
}

fn default_scroll_delay_ms() -> u64 {
    500
}

fn default_max_scroll_rounds() -> usize {
    50
}

/// When a client-side paginated listing is considered exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageTermination {
    /// Stop on the first page without a "next" control.
    #[default]
    NextAbsent,
    /// Stop on the first page that shows a "previous" control. Bounds the
    /// walk to two pages.
    PreviousPresent,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationConfig {
    #[serde(default)]
    pub base: PageTermination,
    #[serde(default)]
    pub js: PageTermination,
}

/// End condition for the table layout, which has no pagination control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TablefulTermination {
    FixedPages(u32),
    EndMarker(String),
}

impl Default for TablefulTermination {
    fn default() -> Self {
        TablefulTermination::FixedPages(10)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FramesConfig {
    #[serde(default = "default_iframe")]
    pub iframe: String,
    #[serde(default = "default_record_frame")]
    pub record_frame: String,
    #[serde(default = "default_text_frame")]
    pub text_frame: String,
}

impl Default for FramesConfig {
    fn default() -> Self {
        Self {
            iframe: default_iframe(),
            record_frame: default_record_frame(),
            text_frame: default_text_frame(),
        }
    }
}

fn default_iframe() -> String {
    "quote".to_string()
}

fn default_record_frame() -> String {
    "quote".to_string()
}

fn default_text_frame() -> String {
    "header".to_string()
}

/// How the author element is marked inside a quote block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorMarker {
    /// `<small class="author">`
    #[default]
    Class,
    /// `<author>`
    Tag,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureConfig {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default = "default_search_author")]
    pub search_author: String,
    #[serde(default = "default_search_tag")]
    pub search_tag: String,
    #[serde(default = "default_expected_records")]
    pub expected_records: usize,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
            search_author: default_search_author(),
            search_tag: default_search_tag(),
            expected_records: default_expected_records(),
        }
    }
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "admin".to_string()
}

fn default_search_author() -> String {
    "Mark Twain".to_string()
}

fn default_search_tag() -> String {
    "classic".to_string()
}

fn default_expected_records() -> usize {
    100
}
