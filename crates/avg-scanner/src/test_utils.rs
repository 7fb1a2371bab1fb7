#[cfg(test)]
pub mod fake {
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::sync::Barrier;

    use crate::error::{Result, ScanError};
    use crate::process::{CommandOutput, CommandRunner};

    pub const EICAR_REPORT: &str = "AVG command line Anti-Virus scanner\n\
        Virus database version: 4793/15563\n\
        Virus database release date: Tue, 01 Mar 2016 16:56:00 +0000\n\
        \n\
        /malware/EICAR  Virus identified EICAR_Test\n\
        \n\
        Files scanned     :  1(1)\n\
        Infections found  :  1(1)\n";

    pub const VERSION_REPORT: &str = "Anti-Virus scanner version: 13.0.3118\n";

    /// Scripted reply to one `avgscan <path>` call
    pub enum Reply {
        Output(CommandOutput),
        Timeout,
    }

    /// Stands in for `avgd`, `avgscan` and `avgupdate`
    pub struct FakeRunner {
        pub daemon_running: AtomicBool,
        pub start_code: i32,
        pub start_delay: Duration,
        pub starts: AtomicUsize,
        pub status_probes: AtomicUsize,
        pub scans: AtomicUsize,
        pub scan_barrier: Option<Arc<Barrier>>,
        pub replies: Mutex<VecDeque<Reply>>,
        pub default_reply: CommandOutput,
        pub version: String,
        pub update_code: i32,
        pub updates: AtomicUsize,
    }

    impl FakeRunner {
        pub fn new() -> Self {
            Self {
                daemon_running: AtomicBool::new(true),
                start_code: 0,
                start_delay: Duration::ZERO,
                starts: AtomicUsize::new(0),
                status_probes: AtomicUsize::new(0),
                scans: AtomicUsize::new(0),
                scan_barrier: None,
                replies: Mutex::new(VecDeque::new()),
                default_reply: CommandOutput::new(Some(5), EICAR_REPORT),
                version: VERSION_REPORT.to_string(),
                update_code: 0,
                updates: AtomicUsize::new(0),
            }
        }

        pub fn daemon_down(self) -> Self {
            self.daemon_running.store(false, Ordering::SeqCst);
            self
        }

        pub fn start_code(mut self, code: i32) -> Self {
            self.start_code = code;
            self
        }

        pub fn start_delay(mut self, delay: Duration) -> Self {
            self.start_delay = delay;
            self
        }

        pub fn scan_barrier(mut self, barrier: Arc<Barrier>) -> Self {
            self.scan_barrier = Some(barrier);
            self
        }

        pub fn reply(self, reply: Reply) -> Self {
            self.replies.lock().unwrap().push_back(reply);
            self
        }

        pub fn default_reply(mut self, output: CommandOutput) -> Self {
            self.default_reply = output;
            self
        }

        pub fn version(mut self, version: &str) -> Self {
            self.version = version.to_string();
            self
        }

        pub fn update_code(mut self, code: i32) -> Self {
            self.update_code = code;
            self
        }

        pub fn starts(&self) -> usize {
            self.starts.load(Ordering::SeqCst)
        }

        pub fn status_probes(&self) -> usize {
            self.status_probes.load(Ordering::SeqCst)
        }

        pub fn scans(&self) -> usize {
            self.scans.load(Ordering::SeqCst)
        }

        async fn daemon(&self, action: &str) -> CommandOutput {
            match action {
                "status" => {
                    self.status_probes.fetch_add(1, Ordering::SeqCst);
                    let code = if self.daemon_running.load(Ordering::SeqCst) { 0 } else { 3 };
                    CommandOutput::new(Some(code), "")
                }
                "start" => {
                    self.starts.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(self.start_delay).await;
                    if self.start_code == 0 {
                        self.daemon_running.store(true, Ordering::SeqCst);
                    }
                    CommandOutput::new(Some(self.start_code), "Starting AVG daemon")
                }
                _ => CommandOutput::new(Some(1), "unknown action"),
            }
        }
    }

    #[async_trait]
    impl CommandRunner for FakeRunner {
        async fn run(&self, program: &str, args: &[&str], timeout: Duration) -> Result<CommandOutput> {
            if program.ends_with("avgd") {
                return Ok(self.daemon(args.first().copied().unwrap_or_default()).await);
            }
            if program.ends_with("avgupdate") {
                self.updates.fetch_add(1, Ordering::SeqCst);
                return Ok(CommandOutput::new(Some(self.update_code), "Update finished"));
            }
            if args == ["-v"] {
                return Ok(CommandOutput::new(Some(0), self.version.clone()));
            }

            self.scans.fetch_add(1, Ordering::SeqCst);
            if let Some(barrier) = &self.scan_barrier {
                barrier.wait().await;
            }
            let reply = self.replies.lock().unwrap().pop_front();
            match reply {
                Some(Reply::Output(output)) => Ok(output),
                Some(Reply::Timeout) => Err(ScanError::Timeout {
                    program: program.to_string(),
                    timeout,
                }),
                None => Ok(self.default_reply.clone()),
            }
        }
    }
}
