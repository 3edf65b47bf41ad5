//! Browser-driven fetcher.
//!
//! Launches Chrome through the DevTools protocol, loads the page, optionally
//! operates a dropdown, and returns the rendered document. The browser is
//! owned by a [`BrowserSession`] that is closed on the normal path and killed
//! from `Drop` on every other path (early return, panic, cancelled future),
//! so a recurring job never accumulates Chrome processes.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::NavigateParams;
use chromiumoxide::Page;
use futures::StreamExt;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{InteractionError, Result};
use crate::traits::fetcher::Fetcher;
use crate::types::interaction::{DropdownInteraction, DropdownMode, DropdownOption};
use crate::types::page::PageSnapshot;

/// Upper bound for the initial navigation.
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound for the dropdown control (and custom options) to become visible.
pub const CONTROL_VISIBLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound for the content region to appear after a selection.
pub const CONTENT_WAIT_TIMEOUT: Duration = Duration::from_secs(15);

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Attribute used to tag the custom-widget option chosen for clicking.
const OPTION_MARKER: &str = "data-monitor-option";

/// Fetcher that renders the page in a real browser before capturing it.
///
/// # Example
///
/// ```rust,ignore
/// use extraction::fetchers::RenderedFetcher;
/// use extraction::types::interaction::DropdownInteraction;
///
/// let fetcher = RenderedFetcher::new()
///     .with_content_selector("#resultados")
///     .with_dropdown(DropdownInteraction::new("#especialidad").with_label("Matemática"));
/// let page = fetcher.fetch("https://example.com/vacantes").await?;
/// ```
#[derive(Debug, Clone)]
pub struct RenderedFetcher {
    headless: bool,
    content_selector: String,
    dropdown: Option<DropdownInteraction>,
}

impl Default for RenderedFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderedFetcher {
    /// Headless, no dropdown, content selector `body`.
    pub fn new() -> Self {
        Self {
            headless: true,
            content_selector: "body".to_string(),
            dropdown: None,
        }
    }

    /// Show the browser window when `false`.
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Selector waited for after a dropdown selection.
    pub fn with_content_selector(mut self, selector: impl Into<String>) -> Self {
        self.content_selector = selector.into();
        self
    }

    /// Operate this dropdown after navigation.
    pub fn with_dropdown(mut self, dropdown: DropdownInteraction) -> Self {
        self.dropdown = Some(dropdown);
        self
    }

    /// Content selector worth waiting for: set and not the whole body.
    fn content_wait_selector(&self) -> Option<&str> {
        let selector = self.content_selector.trim();
        (!selector.is_empty() && selector != "body").then_some(selector)
    }

    async fn render(
        &self,
        session: &BrowserSession,
        url: &str,
        option: Option<&DropdownOption>,
    ) -> std::result::Result<String, InteractionError> {
        let page = session
            .browser()?
            .new_page("about:blank")
            .await
            .map_err(browser_error)?;

        self.navigate(&page, url).await?;

        if let (Some(dropdown), Some(option)) = (self.dropdown.as_ref(), option) {
            self.operate_dropdown(&page, dropdown, option).await?;
        }

        page.content().await.map_err(browser_error)
    }

    /// Navigate and wait for DOM-ready only; slow subresources are not awaited.
    async fn navigate(&self, page: &Page, url: &str) -> std::result::Result<(), InteractionError> {
        let started = tokio::time::Instant::now();
        let navigation_error = |reason: String| InteractionError::Navigation {
            url: url.to_string(),
            reason,
        };

        let response =
            match tokio::time::timeout(NAVIGATION_TIMEOUT, page.execute(NavigateParams::new(url)))
                .await
            {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => return Err(navigation_error(e.to_string())),
                Err(_) => {
                    return Err(InteractionError::Timeout {
                        what: format!("navigation to {url}"),
                        duration: NAVIGATION_TIMEOUT,
                    })
                }
            };
        if let Some(reason) = response.result.error_text.clone() {
            return Err(navigation_error(reason));
        }

        wait_until(
            || evaluate_bool(page, DOM_READY_SCRIPT.to_string()),
            format!("DOMContentLoaded on {url}"),
            NAVIGATION_TIMEOUT.saturating_sub(started.elapsed()),
        )
        .await?;

        debug!(url = %url, "DOM ready");
        Ok(())
    }

    async fn operate_dropdown(
        &self,
        page: &Page,
        dropdown: &DropdownInteraction,
        option: &DropdownOption,
    ) -> std::result::Result<(), InteractionError> {
        info!(
            selector = %dropdown.selector,
            option = %option,
            mode = ?dropdown.mode,
            "Operating dropdown"
        );

        wait_until(
            || evaluate_bool(page, visible_script(&dropdown.selector)),
            format!("dropdown {:?} to be visible", dropdown.selector),
            CONTROL_VISIBLE_TIMEOUT,
        )
        .await?;

        match dropdown.mode {
            DropdownMode::Custom => {
                let control = page
                    .find_element(dropdown.selector.as_str())
                    .await
                    .map_err(browser_error)?;
                control.click().await.map_err(browser_error)?;
                tokio::time::sleep(dropdown.settle_delay).await;

                wait_until(
                    || {
                        evaluate_bool(
                            page,
                            mark_option_script(&dropdown.option_selector, option.text()),
                        )
                    },
                    format!("option {option} in {:?}", dropdown.option_selector),
                    CONTROL_VISIBLE_TIMEOUT,
                )
                .await?;

                let item = page
                    .find_element(format!("[{OPTION_MARKER}]"))
                    .await
                    .map_err(browser_error)?;
                item.click().await.map_err(browser_error)?;
            }
            DropdownMode::Native => {
                tokio::time::sleep(dropdown.settle_delay).await;
                let selected =
                    evaluate_bool(page, select_option_script(&dropdown.selector, option)).await?;
                if !selected {
                    return Err(InteractionError::OptionNotFound {
                        selector: dropdown.selector.clone(),
                        option: option.to_string(),
                    });
                }
            }
        }

        tokio::time::sleep(dropdown.settle_delay).await;

        if let Some(selector) = self.content_wait_selector() {
            let waited = wait_until(
                || evaluate_bool(page, present_script(selector)),
                format!("content {selector:?}"),
                CONTENT_WAIT_TIMEOUT,
            )
            .await;
            if let Err(e) = waited {
                debug!(error = %e, "Content selector did not appear, capturing anyway");
            }
        }

        Ok(())
    }
}

#[async_trait]
impl Fetcher for RenderedFetcher {
    async fn fetch(&self, url: &str) -> Result<PageSnapshot> {
        // Validate before paying for a browser launch.
        let option = self
            .dropdown
            .as_ref()
            .map(DropdownInteraction::resolve_option)
            .transpose()?;

        let session = BrowserSession::launch(self.headless).await?;
        let outcome = self.render(&session, url, option.as_ref()).await;
        session.close().await;

        let html = outcome.map_err(|e| {
            debug!(url = %url, error = %e, "Rendered fetch failed");
            e
        })?;

        debug!(url = %url, content_length = html.len(), "Rendered page captured");
        Ok(PageSnapshot::new(url, html))
    }

    fn name(&self) -> &str {
        "rendered"
    }
}

/// A launched browser plus the task pumping its DevTools connection.
struct BrowserSession {
    browser: Option<Browser>,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    async fn launch(headless: bool) -> std::result::Result<Self, InteractionError> {
        let mut builder = BrowserConfig::builder();
        if !headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(InteractionError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| InteractionError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "Browser handler stopped");
                    break;
                }
            }
        });

        debug!(headless, "Browser launched");
        Ok(Self {
            browser: Some(browser),
            handler,
        })
    }

    fn browser(&self) -> std::result::Result<&Browser, InteractionError> {
        self.browser
            .as_ref()
            .ok_or_else(|| InteractionError::Browser("browser session already closed".to_string()))
    }

    /// Close the browser and reap the process. Never fails the fetch.
    async fn close(mut self) {
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!(error = %e, "Failed to close browser cleanly");
            }
            if let Err(e) = browser.wait().await {
                warn!(error = %e, "Failed to wait for browser exit");
            }
            debug!("Browser closed");
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if self.browser.is_some() {
            // Dropping the Browser kills the child process.
            warn!("Browser session dropped without close, killing browser");
        }
        self.handler.abort();
    }
}

fn browser_error(e: impl std::fmt::Display) -> InteractionError {
    InteractionError::Browser(e.to_string())
}

async fn evaluate_bool(
    page: &Page,
    script: String,
) -> std::result::Result<bool, InteractionError> {
    page.evaluate(script)
        .await
        .map_err(browser_error)?
        .into_value::<bool>()
        .map_err(browser_error)
}

/// Poll `check` until it yields `true` or `timeout` expires.
///
/// Evaluation errors while polling count as "not yet": the page may still
/// be swapping its execution context.
async fn wait_until<F, Fut>(
    mut check: F,
    what: String,
    timeout: Duration,
) -> std::result::Result<(), InteractionError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<bool, InteractionError>>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        match check().await {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(e) => debug!(error = %e, what = %what, "Wait check failed, retrying"),
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(InteractionError::Timeout {
                what,
                duration: timeout,
            });
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Encode a string as a JavaScript string literal.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

const IS_VISIBLE_FN: &str = "const isVisible = (el) => { \
    const style = window.getComputedStyle(el); \
    const rect = el.getBoundingClientRect(); \
    return style.visibility !== 'hidden' && style.display !== 'none' && rect.width > 0 && rect.height > 0; \
};";

/// True once the navigated document (not the initial blank page) has parsed.
const DOM_READY_SCRIPT: &str =
    "document.URL !== 'about:blank' && document.readyState !== 'loading'";

fn visible_script(selector: &str) -> String {
    format!(
        "(() => {{ {IS_VISIBLE_FN} const el = document.querySelector({sel}); return !!el && isVisible(el); }})()",
        sel = js_string(selector),
    )
}

fn present_script(selector: &str) -> String {
    format!("document.querySelector({}) !== null", js_string(selector))
}

/// Select an option of a native `<select>` and fire the events frameworks listen to.
fn select_option_script(selector: &str, option: &DropdownOption) -> String {
    let (by_value, wanted) = match option {
        DropdownOption::Value(v) => (true, v.as_str()),
        DropdownOption::Label(l) => (false, l.as_str()),
    };
    format!(
        "(() => {{ \
            const el = document.querySelector({sel}); \
            if (!el || !el.options) return false; \
            const wanted = {wanted}; \
            const opt = Array.from(el.options).find(o => {by_value} ? o.value === wanted : o.label.trim() === wanted); \
            if (!opt) return false; \
            el.value = opt.value; \
            opt.selected = true; \
            el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
            el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
            return true; \
        }})()",
        sel = js_string(selector),
        wanted = js_string(wanted),
    )
}

/// Tag the first option whose text contains `text` and report whether it is visible.
///
/// Text matching is case-insensitive on whitespace-normalized content.
fn mark_option_script(option_selector: &str, text: &str) -> String {
    format!(
        "(() => {{ {IS_VISIBLE_FN} \
            const norm = (s) => (s || '').replace(/\\s+/g, ' ').trim().toLowerCase(); \
            const wanted = norm({wanted}); \
            document.querySelectorAll('[{OPTION_MARKER}]').forEach(e => e.removeAttribute('{OPTION_MARKER}')); \
            const el = Array.from(document.querySelectorAll({sel})).find(e => norm(e.textContent).includes(wanted)); \
            if (!el) return false; \
            el.setAttribute('{OPTION_MARKER}', '1'); \
            return isVisible(el); \
        }})()",
        sel = js_string(option_selector),
        wanted = js_string(text),
    )
}
