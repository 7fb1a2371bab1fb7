//! `avg web` - Serve scans over HTTP.

use anyhow::Result;
use std::sync::Arc;

use super::Context;
use crate::cli::args::WebArgs;

pub async fn execute(ctx: Context, args: WebArgs) -> Result<()> {
    let upload_dir = args.upload_dir.unwrap_or_else(std::env::temp_dir);
    tokio::fs::create_dir_all(&upload_dir).await?;

    crate::web::serve(args.addr, Arc::new(ctx.scanner()), upload_dir).await
}
