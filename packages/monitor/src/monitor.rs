//! One check: fetch, extract, filter, compose and notify.

use std::path::PathBuf;

use anyhow::{Context, Result};
use extraction::{
    extract_content, filter_table_rows, Fetcher, FilterResult, RenderedFetcher, StaticFetcher,
};
use notifier::{compose_message, Notifier};
use tracing::{debug, info};

use crate::config::Config;
use crate::message::{compose_body, compose_title};

/// Per-invocation switches from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Log the message instead of sending it
    pub dry_run: bool,

    /// Write the fetched HTML here before extraction
    pub dump_html: Option<PathBuf>,
}

/// What a completed check found and reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub matches: usize,
    pub title: String,
    pub body: String,
}

/// Static or rendered fetcher, as configured.
pub fn build_fetcher(config: &Config) -> Box<dyn Fetcher> {
    if !config.use_browser {
        return Box::new(StaticFetcher::new());
    }

    let mut fetcher = RenderedFetcher::new()
        .with_headless(config.headless)
        .with_content_selector(config.content_selector.clone());
    if let Some(dropdown) = &config.dropdown {
        fetcher = fetcher.with_dropdown(dropdown.clone());
    }
    Box::new(fetcher)
}

/// Notifier with every channel whose credentials are configured.
pub fn build_notifier(config: &Config) -> Notifier {
    Notifier::from_options(&config.ntfy, &config.telegram)
}

pub struct Monitor<F: Fetcher> {
    config: Config,
    fetcher: F,
    notifier: Notifier,
    options: RunOptions,
}

impl<F: Fetcher> Monitor<F> {
    pub fn new(config: Config, fetcher: F, notifier: Notifier) -> Self {
        Self {
            config,
            fetcher,
            notifier,
            options: RunOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Run one check. Any fetch or extraction failure aborts before notifying.
    pub async fn run(&self) -> Result<RunReport> {
        let url = &self.config.target_url;
        info!(url = %url, fetcher = self.fetcher.name(), "Checking {url}");

        let page = self
            .fetcher
            .fetch(url)
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;

        if let Some(path) = &self.options.dump_html {
            tokio::fs::write(path, &page.html)
                .await
                .with_context(|| format!("Failed to write HTML dump to {}", path.display()))?;
            info!(path = %path.display(), bytes = page.content_length(), "HTML dumped");
        }

        let region = extract_content(&page.html, &self.config.content_selector)
            .context("Failed to extract content region")?;

        let rows = match filter_table_rows(
            &region,
            &self.config.table_filter_label,
            &self.config.table_filter_value,
            &self.config.table_cell_names,
        ) {
            FilterResult::Filtered(rows) => rows,
            FilterResult::Unfiltered(_) => {
                debug!("Table filter not configured; reporting zero rows");
                Vec::new()
            }
        };

        let title = compose_title(rows.len(), &self.config.table_filter_value);
        let body = compose_body(&rows);
        info!(matches = rows.len(), "Check complete");

        if self.options.dry_run {
            info!(
                channels = ?self.notifier.channel_names(),
                "Dry run, notification not sent:\n{}",
                compose_message(&title, &body)
            );
        } else {
            self.notifier.notify(&title, &body).await;
        }

        Ok(RunReport {
            matches: rows.len(),
            title,
            body,
        })
    }
}
