//! In-memory stand-in for the browser: serves a fake copy of the fixture site
//! and answers locator queries by running CSS selectors over the HTML.
#![allow(dead_code)]

use async_trait::async_trait;
use quill_engine::config::QuillConfig;
use quill_engine::driver::{Driver, DriverError, NavigationResult};
use quill_engine::protocol::{ElementId, Locator};
use scraper::{ElementRef, Html, Selector};
use std::collections::{HashMap, VecDeque};

pub const BASE: &str = "http://quotes.test";
pub const PAGES: usize = 10;
pub const PER_PAGE: usize = 10;

const SESSION_SLOT: &str = "<!--session-->";
const MORE_SLOT: &str = "<!--more-->";

pub const AUTHORS: [&str; 10] = [
    "Albert Einstein",
    "J.K. Rowling",
    "Jane Austen",
    "Marilyn Monroe",
    "André Gide",
    "Thomas A. Edison",
    "Eleanor Roosevelt",
    "Steve Martin",
    "Mark Twain",
    "Dr. Seuss",
];

pub const TAGS: [&str; 8] = [
    "life",
    "love",
    "inspirational",
    "humor",
    "books",
    "classic",
    "truth",
    "friendship",
];

#[derive(Debug, Clone)]
pub struct Quote {
    pub text: String,
    pub author: String,
    pub tags: Vec<String>,
}

/// The hundred quotes every listing layout shows.
pub fn dataset() -> Vec<Quote> {
    (0..PAGES * PER_PAGE)
        .map(|i| Quote {
            text: format!("“Quote number {}.”", i),
            author: AUTHORS[i % AUTHORS.len()].to_string(),
            tags: if i % 7 == 0 {
                Vec::new()
            } else {
                vec![TAGS[i % 8].to_string(), TAGS[(i + 3) % 8].to_string()]
            },
        })
        .collect()
}

pub fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

pub fn test_config() -> QuillConfig {
    let mut config = QuillConfig::default();
    config.base_url = BASE.to_string();
    config.timeouts.navigation_ms = 100;
    config.timeouts.session_ms = 100;
    config.timeouts.poll_interval_ms = 1;
    config.timeouts.scroll_delay_ms = 0;
    config
}

#[derive(Debug, Clone)]
struct Handle {
    doc: String,
    ordinal: usize,
}

type Slot = (String, usize);

#[derive(Debug, Default)]
pub struct MockDriver {
    pub pages: HashMap<String, String>,
    /// XPath expressions the mock understands, mapped to equivalent CSS.
    pub xpath: HashMap<String, String>,
    pub scroll_batches: VecDeque<String>,
    pub credentials: (String, String),
    pub alert_on_submit: Option<String>,
    pub logged_in: bool,
    /// Calls to `navigate`, not counting link clicks.
    pub navigations: usize,
    pub scripts: Vec<String>,
    pub closed: bool,
    url: String,
    frames: Vec<String>,
    handles: HashMap<u64, Handle>,
    next_id: u64,
    values: HashMap<Slot, String>,
    texts: HashMap<Slot, String>,
    checked: HashMap<Slot, bool>,
    alert: Option<String>,
}

fn all_elements() -> Selector {
    Selector::parse("*").unwrap()
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn element_text(el: ElementRef<'_>) -> String {
    collapse(&el.text().collect::<Vec<_>>().join(" "))
}

fn option_value(option: ElementRef<'_>) -> String {
    option
        .value()
        .attr("value")
        .map(str::to_string)
        .unwrap_or_else(|| element_text(option))
}

fn position(all: &[ElementRef<'_>], el: ElementRef<'_>) -> Option<usize> {
    all.iter().position(|x| x.id() == el.id())
}

enum ClickEffect {
    Follow(String),
    Radio { group: Vec<usize> },
    Checkbox,
    Submit { action: String, fields: Vec<(String, usize)> },
    Dropdown { toggle: usize, label: String },
    Nothing,
}

impl MockDriver {
    pub fn new() -> Self {
        Self {
            url: "about:blank".to_string(),
            ..Default::default()
        }
    }

    pub fn page(mut self, path: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url(path), html.into());
        self
    }

    pub fn resolve(&self, href: &str) -> String {
        url::Url::parse(BASE)
            .and_then(|base| base.join(href))
            .map(|u| u.to_string())
            .unwrap_or_else(|_| href.to_string())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Handles issued since the last navigation and not yet released.
    pub fn live_handles(&self) -> usize {
        self.handles.len()
    }

    fn context(&self) -> String {
        self.frames.last().cloned().unwrap_or_else(|| self.url.clone())
    }

    fn doc_html(&self, key: &str) -> String {
        let html = self.pages.get(key).cloned().unwrap_or_else(|| {
            "<html><head><title>404</title></head><body>Not found</body></html>".to_string()
        });
        let session = if self.logged_in {
            r#"<a href="/logout">Logout</a>"#
        } else {
            r#"<a href="/login">Login</a>"#
        };
        html.replace(SESSION_SLOT, session)
    }

    fn go(&mut self, target: &str) {
        let target = self.resolve(target);
        self.frames.clear();
        self.handles.clear();
        self.values.clear();
        self.texts.clear();
        self.checked.clear();
        if target == url("/logout") {
            self.logged_in = false;
            self.url = url("/");
        } else {
            self.url = target;
        }
    }

    fn issue(&mut self, doc: String, ordinal: usize) -> ElementId {
        self.next_id += 1;
        self.handles.insert(self.next_id, Handle { doc, ordinal });
        ElementId(self.next_id)
    }

    fn slot(&self, id: ElementId) -> Result<Slot, DriverError> {
        let handle = self
            .handles
            .get(&id.0)
            .ok_or(DriverError::StaleElement(id))?;
        Ok((handle.doc.clone(), handle.ordinal))
    }

    fn inspect<T>(
        &self,
        id: ElementId,
        f: impl FnOnce(ElementRef<'_>, &[ElementRef<'_>]) -> T,
    ) -> Result<T, DriverError> {
        let (doc, ordinal) = self.slot(id)?;
        let html = Html::parse_document(&self.doc_html(&doc));
        let selector = all_elements();
        let all: Vec<ElementRef<'_>> = html.select(&selector).collect();
        let el = *all.get(ordinal).ok_or(DriverError::StaleElement(id))?;
        Ok(f(el, &all))
    }

    fn css_for(&self, locator: &Locator) -> Result<Selector, DriverError> {
        let css = match locator {
            Locator::XPath(path) => self
                .xpath
                .get(path)
                .cloned()
                .ok_or_else(|| DriverError::NotSupported(format!("xpath {}", path)))?,
            other => other.to_css().unwrap_or_default(),
        };
        Selector::parse(&css).map_err(|e| DriverError::Command(format!("{:?}", e)))
    }

    fn query(
        &mut self,
        within: Option<ElementId>,
        locator: &Locator,
    ) -> Result<Vec<ElementId>, DriverError> {
        let selector = self.css_for(locator)?;
        let (doc, scope) = match within {
            Some(id) => {
                let (doc, ordinal) = self.slot(id)?;
                (doc, Some(ordinal))
            }
            None => (self.context(), None),
        };

        let ordinals: Vec<usize> = {
            let html = Html::parse_document(&self.doc_html(&doc));
            let every = all_elements();
            let all: Vec<ElementRef<'_>> = html.select(&every).collect();
            match scope {
                None => all
                    .iter()
                    .enumerate()
                    .filter(|(_, el)| selector.matches(el))
                    .map(|(i, _)| i)
                    .collect(),
                Some(ordinal) => all[ordinal]
                    .select(&selector)
                    .filter_map(|el| position(&all, el))
                    .collect(),
            }
        };

        Ok(ordinals
            .into_iter()
            .map(|ordinal| self.issue(doc.clone(), ordinal))
            .collect())
    }

    fn options(&self, select: ElementId) -> Result<Vec<(String, String)>, DriverError> {
        self.inspect(select, |el, _| {
            let option = Selector::parse("option").unwrap();
            el.select(&option)
                .map(|o| (option_value(o), element_text(o)))
                .collect()
        })
    }

    fn submit(&mut self, action: &str, fields: Vec<(String, usize)>, doc: &str) {
        let field = |name: &str| {
            fields
                .iter()
                .find(|(n, _)| n == name)
                .and_then(|(_, ordinal)| self.values.get(&(doc.to_string(), *ordinal)))
                .cloned()
                .unwrap_or_default()
        };
        let target = self.resolve(action);
        if target == url("/login") {
            let (user, pass) = self.credentials.clone();
            if field("username") == user && field("password") == pass {
                self.logged_in = true;
                self.go("/");
            } else {
                self.go("/login");
            }
            return;
        }
        if let Some(alert) = self.alert_on_submit.clone() {
            self.alert = Some(alert);
        }
        self.go(&target);
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn launch(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        self.closed = true;
        Ok(())
    }

    async fn is_ready(&self) -> bool {
        !self.closed
    }

    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, DriverError> {
        self.navigations += 1;
        self.go(url);
        Ok(NavigationResult {
            url: self.url.clone(),
            title: self.title().await?,
        })
    }

    async fn current_url(&mut self) -> Result<String, DriverError> {
        Ok(self.url.clone())
    }

    async fn title(&mut self) -> Result<String, DriverError> {
        let html = Html::parse_document(&self.doc_html(&self.url));
        let title = Selector::parse("title").unwrap();
        Ok(html
            .select(&title)
            .next()
            .map(element_text)
            .unwrap_or_default())
    }

    async fn page_source(&mut self) -> Result<String, DriverError> {
        Ok(self.doc_html(&self.context()))
    }

    async fn find_all(&mut self, locator: &Locator) -> Result<Vec<ElementId>, DriverError> {
        self.query(None, locator)
    }

    async fn find_all_in(
        &mut self,
        parent: ElementId,
        locator: &Locator,
    ) -> Result<Vec<ElementId>, DriverError> {
        self.query(Some(parent), locator)
    }

    async fn click(&mut self, element: ElementId) -> Result<(), DriverError> {
        let (doc, ordinal) = self.slot(element)?;
        let effect = self.inspect(element, |el, all| {
            let node = el.value();
            let kind = node.attr("type").unwrap_or_default();
            match node.name() {
                "a" if node.attr("href").is_some() => {
                    ClickEffect::Follow(node.attr("href").unwrap_or_default().to_string())
                }
                "input" if kind == "radio" => {
                    let name = node.attr("name").unwrap_or_default();
                    let group = all
                        .iter()
                        .enumerate()
                        .filter(|(_, e)| {
                            e.value().name() == "input"
                                && e.value().attr("type") == Some("radio")
                                && e.value().attr("name") == Some(name)
                        })
                        .map(|(i, _)| i)
                        .collect();
                    ClickEffect::Radio { group }
                }
                "input" if kind == "checkbox" => ClickEffect::Checkbox,
                "input" | "button" if kind == "submit" => {
                    let form = el
                        .ancestors()
                        .filter_map(ElementRef::wrap)
                        .find(|a| a.value().name() == "form");
                    match form {
                        Some(form) => {
                            let named = Selector::parse("[name]").unwrap();
                            let fields = form
                                .select(&named)
                                .filter_map(|f| {
                                    let name = f.value().attr("name")?.to_string();
                                    Some((name, position(all, f)?))
                                })
                                .collect();
                            ClickEffect::Submit {
                                action: form.value().attr("action").unwrap_or("/").to_string(),
                                fields,
                            }
                        }
                        None => ClickEffect::Nothing,
                    }
                }
                _ if node.classes().any(|c| c == "dropdown-item") => {
                    let toggle = Selector::parse(".dropdown-toggle").unwrap();
                    el.ancestors()
                        .filter_map(ElementRef::wrap)
                        .find(|a| a.value().classes().any(|c| c == "dropdown"))
                        .and_then(|dropdown| dropdown.select(&toggle).next())
                        .and_then(|t| position(all, t))
                        .map(|toggle| ClickEffect::Dropdown {
                            toggle,
                            label: element_text(el),
                        })
                        .unwrap_or(ClickEffect::Nothing)
                }
                _ => ClickEffect::Nothing,
            }
        })?;

        match effect {
            ClickEffect::Follow(href) => self.go(&href),
            ClickEffect::Radio { group } => {
                for i in group {
                    self.checked.insert((doc.clone(), i), i == ordinal);
                }
            }
            ClickEffect::Checkbox => {
                let now = self.is_selected(element).await?;
                self.checked.insert((doc, ordinal), !now);
            }
            ClickEffect::Submit { action, fields } => self.submit(&action, fields, &doc),
            ClickEffect::Dropdown { toggle, label } => {
                self.texts.insert((doc, toggle), label);
            }
            ClickEffect::Nothing => {}
        }
        Ok(())
    }

    async fn text(&mut self, element: ElementId) -> Result<String, DriverError> {
        if let Some(text) = self.texts.get(&self.slot(element)?) {
            return Ok(text.clone());
        }
        self.inspect(element, |el, _| element_text(el))
    }

    async fn outer_html(&mut self, element: ElementId) -> Result<String, DriverError> {
        self.inspect(element, |el, _| el.html())
    }

    async fn set_text(&mut self, element: ElementId, text: &str) -> Result<(), DriverError> {
        let slot = self.slot(element)?;
        self.values.insert(slot, text.to_string());
        Ok(())
    }

    async fn value(&mut self, element: ElementId) -> Result<Option<String>, DriverError> {
        if let Some(value) = self.values.get(&self.slot(element)?) {
            return Ok(Some(value.clone()));
        }
        self.inspect(element, |el, _| {
            let node = el.value();
            match node.name() {
                "textarea" => Some(element_text(el)),
                "select" => {
                    let option = Selector::parse("option").unwrap();
                    let options: Vec<_> = el.select(&option).collect();
                    options
                        .iter()
                        .find(|o| o.value().attr("selected").is_some())
                        .or(options.first())
                        .map(|o| option_value(*o))
                }
                _ => Some(node.attr("value").unwrap_or_default().to_string()),
            }
        })
    }

    async fn attribute(
        &mut self,
        element: ElementId,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        self.inspect(element, |el, _| el.value().attr(name).map(str::to_string))
    }

    async fn is_selected(&mut self, element: ElementId) -> Result<bool, DriverError> {
        if let Some(checked) = self.checked.get(&self.slot(element)?) {
            return Ok(*checked);
        }
        self.inspect(element, |el, _| {
            el.value().attr("checked").is_some() || el.value().attr("selected").is_some()
        })
    }

    async fn is_displayed(&mut self, element: ElementId) -> Result<bool, DriverError> {
        self.slot(element).map(|_| true)
    }

    async fn select_by_label(&mut self, element: ElementId, label: &str) -> Result<(), DriverError> {
        let value = self
            .options(element)?
            .into_iter()
            .find(|(_, text)| text == label)
            .map(|(value, _)| value)
            .ok_or_else(|| DriverError::Command(format!("no option labelled {:?}", label)))?;
        let slot = self.slot(element)?;
        self.values.insert(slot, value);
        Ok(())
    }

    async fn select_by_index(&mut self, element: ElementId, index: usize) -> Result<(), DriverError> {
        let (value, _) = self
            .options(element)?
            .into_iter()
            .nth(index)
            .ok_or_else(|| DriverError::Command(format!("no option at {}", index)))?;
        let slot = self.slot(element)?;
        self.values.insert(slot, value);
        Ok(())
    }

    async fn execute_script(
        &mut self,
        script: &str,
        _args: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, DriverError> {
        self.scripts.push(script.to_string());
        if script.contains("scrollTo")
            && let Some(batch) = self.scroll_batches.pop_front()
            && let Some(page) = self.pages.get_mut(&self.url)
        {
            *page = page.replace(MORE_SLOT, &format!("{}{}", batch, MORE_SLOT));
        }
        Ok(serde_json::Value::Null)
    }

    async fn enter_frame(&mut self, frame: ElementId) -> Result<(), DriverError> {
        let src = self
            .inspect(frame, |el, _| el.value().attr("src").map(str::to_string))?
            .ok_or_else(|| DriverError::Command("frame without src".into()))?;
        let doc = self.resolve(&src);
        self.frames.push(doc);
        Ok(())
    }

    async fn enter_default_content(&mut self) -> Result<(), DriverError> {
        self.frames.clear();
        Ok(())
    }

    async fn release(&mut self, elements: &[ElementId]) {
        for id in elements {
            self.handles.remove(&id.0);
        }
    }

    async fn alert_text(&mut self) -> Result<Option<String>, DriverError> {
        Ok(self.alert.clone())
    }

    async fn dismiss_alert(&mut self) -> Result<(), DriverError> {
        self.alert = None;
        Ok(())
    }
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<html><head><title>{}</title></head><body>
<div class="header-box">{}</div>
{}
</body></html>"#,
        title, SESSION_SLOT, body
    )
}

pub fn quote_block(quote: &Quote, about: bool) -> String {
    let tags: String = quote
        .tags
        .iter()
        .map(|t| format!(r#"<a class="tag" href="/tag/{0}/page/1/">{0}</a> "#, t))
        .collect();
    let about = if about {
        format!(
            r#"<a href="/author/{}">(about)</a>"#,
            quote.author.replace(' ', "-")
        )
    } else {
        String::new()
    };
    format!(
        r#"<div class="quote">
    <span class="text">{}</span>
    <span>by <small class="author">{}</small> {}</span>
    <div class="tags">Tags: {}</div>
</div>"#,
        quote.text, quote.author, about, tags
    )
}

fn pager(prefix: &str, page: usize) -> String {
    let mut html = String::from(r#"<nav><ul class="pager">"#);
    if page > 1 {
        html.push_str(&format!(
            r#"<li class="previous"><a href="{}/page/{}/">Previous</a></li>"#,
            prefix,
            page - 1
        ));
    }
    if page < PAGES {
        html.push_str(&format!(
            r#"<li class="next"><a href="{}/page/{}/">Next</a></li>"#,
            prefix,
            page + 1
        ));
    }
    html.push_str("</ul></nav>");
    html
}

fn listing_page(quotes: &[Quote], prefix: &str, page: usize, about: bool) -> String {
    let chunk = &quotes[(page - 1) * PER_PAGE..page * PER_PAGE];
    let blocks: String = chunk.iter().map(|q| quote_block(q, about)).collect();
    layout(
        "Quotes to Scrape",
        &format!("<div class=\"col-md-8\">{}{}</div>", blocks, pager(prefix, page)),
    )
}

fn table_page(quotes: &[Quote], page: usize) -> String {
    let chunk = &quotes[(page - 1) * PER_PAGE..page * PER_PAGE];
    let mut rows = String::from("<tr><td>Quotes by: GoodReads.com</td></tr>");
    for quote in chunk {
        let tags: String = quote
            .tags
            .iter()
            .map(|t| format!(r#"<a href="/tag/{0}/">{0}</a> "#, t))
            .collect();
        rows.push_str(&format!(
            r#"<tr><td style="padding-top: 2em;">{} Author: {}</td></tr><tr><td>Tags: {}</td></tr>"#,
            quote.text, quote.author, tags
        ));
        rows.push_str("<tr><td></td></tr>");
    }
    let footer = if page < PAGES {
        format!(r#"<a href="/tableful/page/{}/">Next</a>"#, page + 1)
    } else {
        "Last page".to_string()
    };
    rows.push_str(&format!("<tr><td>{}</td></tr>", footer));
    layout("Quotes to Scrape", &format!(r#"<table border="1">{}</table>"#, rows))
}

fn select(id: &str, labels: &[&str]) -> String {
    let options: String = labels
        .iter()
        .map(|l| format!(r#"<option value="{0}">{0}</option>"#, l))
        .collect();
    format!(
        r#"<select id="{0}" name="{0}"><option value="">----------</option>{1}</select>"#,
        id, options
    )
}

pub const FORM_PAGE: &str = r#"<form action="/form/submitted" method="post">
    <input type="text" id="name" name="name">
    <textarea id="comment" name="comment"></textarea>
    <label><input type="radio" name="gender" value="male"> male</label>
    <label><input type="radio" name="gender" value="female" checked> female</label>
    <input type="checkbox" name="topics" value="inspirational">
    <input type="checkbox" name="topics" value="life">
    <input type="checkbox" name="topics" value="humor">
    <div id="author-dropdown" class="dropdown">
        <button type="button" class="dropdown-toggle">Choose an author</button>
        <ul class="dropdown-menu">
            <li class="dropdown-item">Jane Austen</li>
            <li class="dropdown-item">Mark Twain</li>
        </ul>
    </div>
    <table id="ratings"><tr>
        <td><input type="radio" name="rating" value="1"></td>
        <td><input type="radio" name="rating" value="3"></td>
        <td><input type="radio" name="rating" value="5"></td>
    </tr></table>
    <input type="submit" value="Send">
</form>"#;

/// A complete fake of the fixture site with every endpoint populated.
pub fn fixture_site() -> MockDriver {
    let quotes = dataset();
    let mut driver = MockDriver::new();
    driver.credentials = ("admin".to_string(), "admin".to_string());
    driver
        .xpath
        .insert("//form//input[@id='name']".into(), "form input#name".into());

    for page in 1..=PAGES {
        let base = listing_page(&quotes, "", page, true);
        let js = listing_page(&quotes, "/js", page, false);
        let table = table_page(&quotes, page);
        if page == 1 {
            driver.pages.insert(url("/"), base.clone());
            driver.pages.insert(url("/js"), js.clone());
            driver.pages.insert(url("/tableful"), table.clone());
        }
        driver.pages.insert(url(&format!("/page/{}/", page)), base);
        driver.pages.insert(url(&format!("/js/page/{}/", page)), js);
        driver
            .pages
            .insert(url(&format!("/tableful/page/{}/", page)), table);
    }
    driver.pages.insert(
        url(&format!("/tableful/page/{}/", PAGES + 1)),
        layout("Quotes to Scrape", "No quotes found!"),
    );

    let first: String = quotes[..PER_PAGE].iter().map(|q| quote_block(q, false)).collect();
    driver.pages.insert(
        url("/scroll"),
        layout(
            "Quotes to Scrape",
            &format!(r#"<div class="quotes">{}{}</div>"#, first, MORE_SLOT),
        ),
    );
    driver.scroll_batches = quotes[PER_PAGE..]
        .chunks(PER_PAGE)
        .map(|chunk| chunk.iter().map(|q| quote_block(q, false)).collect())
        .collect();

    driver.pages.insert(
        url("/random"),
        layout("Quotes to Scrape", &quote_block(&quotes[42], true)),
    );
    driver.pages.insert(
        url("/iframe"),
        layout(
            "Quotes in an iframe",
            r#"<iframe name="quote" src="/" width="100%"></iframe>"#,
        ),
    );
    driver.pages.insert(
        url("/frames"),
        r#"<html><head><title>Frames</title></head>
<frameset rows="20%,80%">
<frame name="header" src="/frames/header">
<frame name="quote" src="/frames/quote">
</frameset></html>"#
            .to_string(),
    );
    driver.pages.insert(
        url("/frames/header"),
        "<html><body><h1>Quotes to Scrape</h1></body></html>".to_string(),
    );
    driver.pages.insert(
        url("/frames/quote"),
        format!("<html><body>{}</body></html>", quote_block(&quotes[3], false)),
    );

    driver.pages.insert(
        url("/login"),
        layout(
            "Login",
            r#"<form action="/login" method="post">
    <input type="text" id="username" name="username">
    <input type="password" id="password" name="password">
    <input type="submit" value="Login">
</form>"#,
        ),
    );

    driver.pages.insert(
        url("/search.aspx"),
        layout(
            "Search",
            &format!(
                r#"<form action="/search/results" method="post">{}{}<input type="submit" name="submit_button" value="Search"></form>"#,
                select("author", &AUTHORS),
                select("tag", &TAGS)
            ),
        ),
    );
    let hits: String = quotes
        .iter()
        .filter(|q| q.author == "Mark Twain" && q.tags.iter().any(|t| t == "classic"))
        .map(|q| {
            format!(
                r#"<span class="content">{}</span><span class="author">{}</span><span class="tag">classic</span>"#,
                q.text, q.author
            )
        })
        .collect();
    driver.pages.insert(
        url("/search/results"),
        layout("Search", &format!(r#"<div class="results">{}</div>"#, hits)),
    );

    driver.pages.insert(url("/form"), layout("Form", FORM_PAGE));
    driver.pages.insert(
        url("/form/submitted"),
        layout("Submitted", "<p>Thank you for your submission.</p>"),
    );

    driver
}
