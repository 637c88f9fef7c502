//! Fetch command: download and cache the schedule document.

use std::io::Write;

use anyhow::{Context, Result, bail};

use konf_fetch::FetchError;

use crate::Config;
use crate::commands::util::snippet;

pub fn run<W: Write>(writer: &mut W, config: &Config, url: Option<&str>) -> Result<()> {
    let url = url.unwrap_or(&config.schedule_url);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let client = konf_fetch::Client::new()?;

    let body = match runtime.block_on(client.fetch_document(url)) {
        Ok(body) => body,
        Err(FetchError::HtmlPayload { body }) => {
            writeln!(
                writer,
                "Received HTML instead of a schedule document. First part of the payload:"
            )?;
            writeln!(writer, "{}", snippet(&body))?;
            bail!("schedule fetch from {url} did not return a schedule document");
        }
        Err(err) => return Err(err.into()),
    };

    // Validate before touching the cache so a bad fetch never clobbers a
    // good document.
    let doc = match konf_core::parse_document(&body) {
        Ok(doc) => doc,
        Err(err) => {
            writeln!(writer, "First part of the fetched payload:")?;
            writeln!(writer, "{}", snippet(&body))?;
            return Err(anyhow::Error::new(err).context("fetched document is not a valid schedule"));
        }
    };

    if let Some(parent) = config.schedule_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create cache directory")?;
    }
    std::fs::write(&config.schedule_path, &body)
        .with_context(|| format!("failed to write {}", config.schedule_path.display()))?;

    writeln!(
        writer,
        "Fetched {} day(s) to {}",
        doc.schedule.days.len(),
        config.schedule_path.display()
    )?;
    Ok(())
}
