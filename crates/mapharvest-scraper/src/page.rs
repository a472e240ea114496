//! The narrow browser capability the scraper is written against.
//!
//! Everything above this module talks to a [`Page`]; only
//! [`crate::browser::ChromiumPage`] knows about a real browser. Tests drive
//! the same code through a scripted fake.

use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::PageError;

/// How to find elements on the rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Css(Cow<'static, str>),
    XPath(Cow<'static, str>),
}

impl Locator {
    #[must_use]
    pub const fn css(selector: &'static str) -> Self {
        Locator::Css(Cow::Borrowed(selector))
    }

    #[must_use]
    pub const fn xpath(expr: &'static str) -> Self {
        Locator::XPath(Cow::Borrowed(expr))
    }

    /// The clickable container of the result link whose `href` is exactly
    /// `href`.
    #[must_use]
    pub fn listing(href: &str) -> Self {
        Locator::XPath(Cow::Owned(format!("//a[@href={}]/..", xpath_literal(href))))
    }

    #[must_use]
    pub fn expression(&self) -> &str {
        match self {
            Locator::Css(s) | Locator::XPath(s) => s,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css={s}"),
            Locator::XPath(s) => write!(f, "xpath={s}"),
        }
    }
}

/// Quotes `value` as an XPath 1.0 string literal.
///
/// XPath has no escape sequences, so a value containing both quote kinds is
/// spelled as a `concat(...)` of pieces.
fn xpath_literal(value: &str) -> String {
    if !value.contains('"') {
        return format!("\"{value}\"");
    }
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    let pieces: Vec<String> = value
        .split('"')
        .map(|piece| format!("\"{piece}\""))
        .collect();
    format!("concat({})", pieces.join(", '\"', "))
}

/// An exclusively owned browser tab.
///
/// Element-addressed calls take a [`Locator`] plus the zero-based index of
/// the match they act on. Implementations must not retry internally; the
/// caller decides retry policy.
#[async_trait]
pub trait Page: Send + Sync {
    /// Navigates to `url`, failing if the load does not finish within `timeout`.
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), PageError>;

    /// Number of elements currently matching `locator`.
    async fn count(&self, locator: &Locator) -> Result<usize, PageError>;

    async fn inner_text(&self, locator: &Locator, nth: usize) -> Result<String, PageError>;

    async fn attribute(
        &self,
        locator: &Locator,
        nth: usize,
        name: &str,
    ) -> Result<Option<String>, PageError>;

    async fn click(&self, locator: &Locator, nth: usize, timeout: Duration)
        -> Result<(), PageError>;

    async fn hover(&self, locator: &Locator, nth: usize) -> Result<(), PageError>;

    /// Replaces the content of the first input matching `locator` with `text`.
    async fn fill(&self, locator: &Locator, text: &str) -> Result<(), PageError>;

    /// Sends a single key press (e.g. `"Enter"`) to the first match of `locator`.
    async fn press(&self, locator: &Locator, key: &str) -> Result<(), PageError>;

    /// Scrolls the results panel vertically by `delta_y` pixels.
    async fn scroll(&self, delta_y: u32) -> Result<(), PageError>;

    /// Waits until at least one element matches `locator`.
    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<(), PageError>;

    async fn current_url(&self) -> Result<String, PageError>;

    /// A fixed-duration wait between page interactions.
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
