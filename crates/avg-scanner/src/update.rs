//! Virus definition updates.

use std::path::Path;
use tracing::{debug, info};

use crate::error::Result;
use crate::scanner::Scanner;

impl Scanner {
    /// Refresh the virus definitions and stamp the update date
    ///
    /// Returns the `YYYYMMDD` date written to the stamp file.
    pub async fn update_definitions(&self) -> Result<String> {
        let config = self.config();

        let output = {
            let _daemon = self.daemon().ensure_running().await?;
            info!(updater = %config.updater, "updating AVG definitions");
            self.runner()
                .run(&config.updater, &[], config.update_timeout)
                .await?
        };
        debug!(output = %output.output, "AVG update");
        output.check(&config.updater, &config.update_exit_codes())?;

        let today = chrono::Local::now().format("%Y%m%d").to_string();
        write_stamp(&config.updated_stamp, &today).await?;
        info!(updated = %today, "AVG definitions updated");
        Ok(today)
    }

    /// Date of the last definitions update, if one was recorded
    pub async fn last_update(&self) -> Option<String> {
        tokio::fs::read_to_string(&self.config().updated_stamp)
            .await
            .ok()
            .map(|stamp| stamp.trim().to_string())
    }
}

async fn write_stamp(path: &Path, date: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, date).await?;
    Ok(())
}
