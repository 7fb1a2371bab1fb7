//! `avg scan` - Scan a single file.

use anyhow::{bail, Context as _, Result};
use colored::Colorize;
use malice_avg::{
    presenter, sample, ClientError, ElasticsearchStore, HttpConfig, PluginDocument, ScanResult,
    WebhookClient,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::Context;
use crate::cli::args::ScanArgs;
use crate::config::Config;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: ScanArgs) -> Result<()> {
    scan(&ctx, &args, &mut std::io::stdout()).await
}

/// Scan, file the result with Malice, then write it to `out`.
///
/// Store and webhook failures are reported as warnings and never change
/// the printed result.
pub async fn scan(ctx: &Context, args: &ScanArgs, out: &mut impl Write) -> Result<()> {
    let config = ctx.config.clone().with_elasticsearch(args.elasticsearch.clone());
    let path = absolute(&args.file)?;

    if !path.is_file() {
        bail!("file not found: {}", path.display());
    }
    if args.callback && config.endpoint.is_none() {
        bail!("--callback requires MALICE_ENDPOINT to be set");
    }

    let result = ctx
        .scanner()
        .scan(&path)
        .await
        .with_context(|| format!("failed to scan {}", path.display()))?;
    let markdown = presenter::markdown_table(&result);
    let result = result.with_markdown(markdown);
    debug!(infected = result.infected, signature = %result.signature, "scan finished");

    let scan_id = sample::scan_id(config.scan_id.as_deref(), &path).await?;

    if let Some(url) = &config.elasticsearch {
        if let Err(err) = store(url, &scan_id, &result).await {
            warning(&format!("failed to store results: {err}"));
        }
    }

    if args.callback {
        match callback(&config, args.proxy, &scan_id, &result).await {
            Ok(body) if ctx.verbose => eprintln!("{} {}", "Webhook response:".dimmed(), body),
            Ok(_) => {}
            Err(err) => warning(&format!("callback failed: {err}")),
        }
    }

    writeln!(out, "{}", OutputFormat::from_table_flag(args.table).render(&result)?)?;
    Ok(())
}

async fn store(url: &str, scan_id: &str, result: &ScanResult) -> Result<(), ClientError> {
    ElasticsearchStore::new(url)?
        .write(&PluginDocument::new(scan_id, result))
        .await?;
    info!(id = %scan_id, "results stored in elasticsearch");
    Ok(())
}

async fn callback(
    config: &Config,
    use_proxy: bool,
    scan_id: &str,
    result: &ScanResult,
) -> Result<String> {
    let Some(endpoint) = &config.endpoint else {
        bail!("MALICE_ENDPOINT is not set");
    };

    let mut http = HttpConfig::new();
    if use_proxy {
        match &config.proxy {
            Some(proxy) => http = http.proxy(proxy),
            None => warning("--proxy given but MALICE_PROXY is not set"),
        }
    }

    Ok(WebhookClient::with_config(endpoint, &http)?
        .send(scan_id, result)
        .await?)
}

fn warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow(), message);
}

/// The scanner's report echoes paths verbatim, so always hand it an absolute one.
fn absolute(file: &Path) -> Result<PathBuf> {
    if file.is_absolute() {
        return Ok(file.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(file))
}
