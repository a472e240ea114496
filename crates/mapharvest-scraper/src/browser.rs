//! [`Page`] backed by a real Chromium session over the DevTools protocol.
//!
//! Element lookups run as small scripts inside the page so CSS and XPath
//! locators share one code path. Typing and key presses go through
//! chromiumoxide's element API so the page sees real input events.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use futures::StreamExt;
use mapharvest_core::AppConfig;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::error::{PageError, ScraperError};
use crate::page::{Locator, Page};

const WAIT_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct BrowserSettings {
    pub headless: bool,
    pub chrome_path: Option<PathBuf>,
    pub window: (u32, u32),
}

impl BrowserSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            headless: config.headless,
            chrome_path: config.chrome_path.clone(),
            window: (1920, 1080),
        }
    }
}

pub struct ChromiumPage {
    browser: Browser,
    page: chromiumoxide::Page,
    handler: JoinHandle<()>,
}

impl ChromiumPage {
    /// Starts a browser and opens a blank tab.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Launch`] if the browser binary cannot be
    /// started or the first tab cannot be opened.
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, ScraperError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--lang=en-US")
            .window_size(settings.window.0, settings.window.1);
        if !settings.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &settings.chrome_path {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(ScraperError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScraperError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "browser handler event error");
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScraperError::Launch(e.to_string()))?;

        tracing::info!(headless = settings.headless, "browser launched");
        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    /// Closes the browser. Errors on the way down are logged, not returned.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!(error = %e, "browser did not close cleanly");
        }
        self.handler.abort();
    }

    fn ensure_open(&self) -> Result<(), PageError> {
        if self.handler.is_finished() {
            Err(PageError::Closed)
        } else {
            Ok(())
        }
    }

    async fn eval<T: DeserializeOwned>(&self, script: String) -> Result<T, PageError> {
        self.ensure_open()?;
        self.page
            .evaluate(script)
            .await
            .map_err(|e| PageError::Protocol(e.to_string()))?
            .into_value()
            .map_err(|e| PageError::Protocol(e.to_string()))
    }

    async fn element(&self, locator: &Locator) -> Result<Element, PageError> {
        self.ensure_open()?;
        let found = match locator {
            Locator::Css(selector) => self.page.find_element(selector.as_ref()).await,
            Locator::XPath(expr) => self.page.find_xpath(expr.as_ref()).await,
        };
        found.map_err(|_| PageError::NotFound(locator.to_string()))
    }
}

/// A JS expression evaluating to the array of nodes `locator` matches.
fn nodes_js(locator: &Locator) -> Result<String, PageError> {
    let expr = js_string(locator.expression())?;
    Ok(match locator {
        Locator::Css(_) => format!("Array.from(document.querySelectorAll({expr}))"),
        Locator::XPath(_) => format!(
            "(() => {{ const r = document.evaluate({expr}, document, null, \
             XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); const out = []; \
             for (let i = 0; i < r.snapshotLength; i++) out.push(r.snapshotItem(i)); \
             return out; }})()"
        ),
    })
}

fn js_string(value: &str) -> Result<String, PageError> {
    serde_json::to_string(value).map_err(|e| PageError::Protocol(e.to_string()))
}

#[derive(Deserialize)]
struct AttributeLookup {
    found: bool,
    value: Option<String>,
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[async_trait]
impl Page for ChromiumPage {
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), PageError> {
        self.ensure_open()?;
        match tokio::time::timeout(timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(PageError::Protocol(e.to_string())),
            Err(_) => Err(PageError::Timeout {
                what: format!("navigation to {url}"),
                timeout_ms: millis(timeout),
            }),
        }
    }

    async fn count(&self, locator: &Locator) -> Result<usize, PageError> {
        let nodes = nodes_js(locator)?;
        self.eval(format!("({nodes}).length")).await
    }

    async fn inner_text(&self, locator: &Locator, nth: usize) -> Result<String, PageError> {
        let nodes = nodes_js(locator)?;
        let text: Option<String> = self
            .eval(format!(
                "(() => {{ const n = ({nodes})[{nth}]; \
                 return n ? (n.innerText ?? n.textContent ?? '') : null; }})()"
            ))
            .await?;
        text.ok_or_else(|| PageError::NotFound(format!("{locator} [{nth}]")))
    }

    async fn attribute(
        &self,
        locator: &Locator,
        nth: usize,
        name: &str,
    ) -> Result<Option<String>, PageError> {
        let nodes = nodes_js(locator)?;
        let name = js_string(name)?;
        let lookup: AttributeLookup = self
            .eval(format!(
                "(() => {{ const n = ({nodes})[{nth}]; \
                 return n ? {{ found: true, value: n.getAttribute({name}) }} \
                 : {{ found: false, value: null }}; }})()"
            ))
            .await?;
        if lookup.found {
            Ok(lookup.value)
        } else {
            Err(PageError::NotFound(format!("{locator} [{nth}]")))
        }
    }

    async fn click(
        &self,
        locator: &Locator,
        nth: usize,
        timeout: Duration,
    ) -> Result<(), PageError> {
        let nodes = nodes_js(locator)?;
        let script = format!(
            "(() => {{ const n = ({nodes})[{nth}]; if (!n) return false; \
             n.scrollIntoView({{ block: 'center' }}); n.click(); return true; }})()"
        );
        let clicked: bool = match tokio::time::timeout(timeout, self.eval(script)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(PageError::Timeout {
                    what: format!("click on {locator}"),
                    timeout_ms: millis(timeout),
                })
            }
        };
        if clicked {
            Ok(())
        } else {
            Err(PageError::NotFound(format!("{locator} [{nth}]")))
        }
    }

    async fn hover(&self, locator: &Locator, nth: usize) -> Result<(), PageError> {
        let nodes = nodes_js(locator)?;
        let hovered: bool = self
            .eval(format!(
                "(() => {{ const n = ({nodes})[{nth}]; if (!n) return false; \
                 for (const t of ['mouseover', 'mouseenter']) \
                 n.dispatchEvent(new MouseEvent(t, {{ bubbles: true }})); \
                 return true; }})()"
            ))
            .await?;
        if hovered {
            Ok(())
        } else {
            Err(PageError::NotFound(format!("{locator} [{nth}]")))
        }
    }

    async fn fill(&self, locator: &Locator, text: &str) -> Result<(), PageError> {
        let element = self.element(locator).await?;
        element
            .click()
            .await
            .map_err(|e| PageError::Protocol(e.to_string()))?;
        let nodes = nodes_js(locator)?;
        let _: bool = self
            .eval(format!(
                "(() => {{ const n = ({nodes})[0]; if (!n) return false; \
                 n.value = ''; return true; }})()"
            ))
            .await?;
        element
            .type_str(text)
            .await
            .map_err(|e| PageError::Protocol(e.to_string()))?;
        Ok(())
    }

    async fn press(&self, locator: &Locator, key: &str) -> Result<(), PageError> {
        let element = self.element(locator).await?;
        element
            .press_key(key)
            .await
            .map_err(|e| PageError::Protocol(e.to_string()))?;
        Ok(())
    }

    async fn scroll(&self, delta_y: u32) -> Result<(), PageError> {
        let _: bool = self
            .eval(format!(
                "(() => {{ const feed = document.querySelector('div[role=\"feed\"]'); \
                 const target = feed || document.scrollingElement; \
                 target.scrollBy(0, {delta_y}); return !!feed; }})()"
            ))
            .await?;
        Ok(())
    }

    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<(), PageError> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.count(locator).await {
                Ok(n) if n > 0 => return Ok(()),
                Ok(_) => {}
                Err(PageError::Closed) => return Err(PageError::Closed),
                Err(e) => tracing::trace!(error = %e, "wait check failed"),
            }
            if Instant::now() >= deadline {
                return Err(PageError::Timeout {
                    what: locator.to_string(),
                    timeout_ms: millis(timeout),
                });
            }
            tokio::time::sleep(WAIT_POLL).await;
        }
    }

    async fn current_url(&self) -> Result<String, PageError> {
        self.ensure_open()?;
        self.page
            .url()
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| PageError::Protocol(e.to_string()))
    }
}
