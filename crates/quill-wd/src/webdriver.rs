use fantoccini::{Client, ClientBuilder};
use quill_common::{DriverError, QuillError};
use serde_json::{Map, Value, json};
use std::fmt;
use std::str::FromStr;

/// Browser the remote WebDriver endpoint should start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserKind {
    #[default]
    Chrome,
    Firefox,
}

impl BrowserKind {
    pub fn name(self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chrome",
            BrowserKind::Firefox => "firefox",
        }
    }

    /// W3C capabilities for a new session.
    pub fn capabilities(self, headless: bool) -> Map<String, Value> {
        let mut caps = Map::new();
        match self {
            BrowserKind::Chrome => {
                caps.insert("browserName".to_string(), json!("chrome"));
                let mut args = vec!["--no-sandbox".to_string()];
                if headless {
                    args.push("--headless=new".to_string());
                    args.push("--disable-gpu".to_string());
                    args.push("--disable-dev-shm-usage".to_string());
                }
                caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
            }
            BrowserKind::Firefox => {
                caps.insert("browserName".to_string(), json!("firefox"));
                let mut args = Vec::new();
                if headless {
                    args.push("--headless".to_string());
                }
                caps.insert("moz:firefoxOptions".to_string(), json!({ "args": args }));
            }
        }
        caps
    }
}

impl FromStr for BrowserKind {
    type Err = QuillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chrome" => Ok(BrowserKind::Chrome),
            "firefox" => Ok(BrowserKind::Firefox),
            _ => Err(QuillError::invalid_argument("driver", s)),
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub struct WebDriverClient {
    pub client: Client,
}

impl WebDriverClient {
    pub async fn connect(url: &str, capabilities: Map<String, Value>) -> Result<Self, DriverError> {
        let client = ClientBuilder::native()
            .capabilities(capabilities)
            .connect(url)
            .await
            .map_err(|e| DriverError::Connect(format!("{}: {}", url, e)))?;

        Ok(Self { client })
    }

    pub async fn close(self) -> Result<(), DriverError> {
        self.client
            .close()
            .await
            .map_err(|e| DriverError::Command(format!("Failed to close session: {}", e)))
    }
}
