use async_trait::async_trait;
use malice_avg::{CommandOutput, CommandRunner, ScanError};
use std::time::Duration;

/// Daemon always up; every scanned file is reported as EICAR.
pub struct EicarRunner;

#[async_trait]
impl CommandRunner for EicarRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> Result<CommandOutput, ScanError> {
        if program.ends_with("avgd") {
            return Ok(CommandOutput::new(Some(0), ""));
        }
        if args == ["-v"] {
            return Ok(CommandOutput::new(
                Some(0),
                "Anti-Virus scanner version: 13.0.3118\n",
            ));
        }
        let report = format!(
            "Virus database version: 4793/15563\n\
             Virus database release date: Tue, 01 Mar 2016 16:56:00 +0000\n\
             \n\
             {}  Virus identified EICAR_Test\n\
             \n\
             Infections found  :  1(1)\n",
            args[0]
        );
        Ok(CommandOutput::new(Some(5), report))
    }
}
