use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical record every extraction strategy converges to, whatever the
/// layout it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub text: String,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl QuoteRecord {
    pub fn new(text: impl Into<String>, author: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            tags,
        }
    }
}

impl fmt::Display for QuoteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {}", self.text, self.author)?;
        if !self.tags.is_empty() {
            write!(f, " [{}]", self.tags.join(", "))?;
        }
        Ok(())
    }
}

/// Opaque handle to an element owned by a driver session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How an element is located in the current document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locator {
    Id(String),
    Name(String),
    Css(String),
    XPath(String),
    Tag {
        tag: String,
        attrs: Vec<(String, String)>,
    },
}

impl Locator {
    pub fn id(id: impl Into<String>) -> Self {
        Locator::Id(id.into())
    }

    pub fn name(name: impl Into<String>) -> Self {
        Locator::Name(name.into())
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(path: impl Into<String>) -> Self {
        Locator::XPath(path.into())
    }

    pub fn tag(tag: impl Into<String>, attrs: &[(&str, &str)]) -> Self {
        Locator::Tag {
            tag: tag.into(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// CSS equivalent of the locator. XPath has none.
    pub fn to_css(&self) -> Option<String> {
        match self {
            Locator::Id(id) => Some(format!("#{}", id)),
            Locator::Name(name) => Some(format!("[name=\"{}\"]", name)),
            Locator::Css(selector) => Some(selector.clone()),
            Locator::Tag { tag, attrs } => {
                let mut css = tag.clone();
                for (k, v) in attrs {
                    css.push_str(&format!("[{}=\"{}\"]", k, v));
                }
                Some(css)
            }
            Locator::XPath(_) => None,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::XPath(path) => write!(f, "xpath {}", path),
            other => write!(f, "css {}", other.to_css().unwrap_or_default()),
        }
    }
}

/// Logical pages of the fixture site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Base,
    Scroll,
    Login,
    Search,
    Js,
    Tableful,
    Iframe,
    Frames,
    Form,
    Random,
}

impl Endpoint {
    pub const ALL: [Endpoint; 10] = [
        Endpoint::Base,
        Endpoint::Scroll,
        Endpoint::Login,
        Endpoint::Search,
        Endpoint::Js,
        Endpoint::Tableful,
        Endpoint::Iframe,
        Endpoint::Frames,
        Endpoint::Form,
        Endpoint::Random,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Base => "/",
            Endpoint::Scroll => "/scroll",
            Endpoint::Login => "/login",
            Endpoint::Search => "/search.aspx",
            Endpoint::Js => "/js",
            Endpoint::Tableful => "/tableful",
            Endpoint::Iframe => "/iframe",
            Endpoint::Frames => "/frames",
            Endpoint::Form => "/form",
            Endpoint::Random => "/random",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Base => "base",
            Endpoint::Scroll => "scroll",
            Endpoint::Login => "login",
            Endpoint::Search => "search",
            Endpoint::Js => "js",
            Endpoint::Tableful => "tableful",
            Endpoint::Iframe => "iframe",
            Endpoint::Frames => "frames",
            Endpoint::Form => "form",
            Endpoint::Random => "random",
        }
    }

    /// Absolute URL of the endpoint below `base_url`.
    pub fn url(self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
