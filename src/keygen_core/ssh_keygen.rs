use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::io::AsyncReadExt;
use tokio::process::{ChildStderr, Command};
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};

use crate::config::ServiceConfig;
use crate::error::GenerationError;
use crate::keygen_core::scratch::ScratchFiles;
use crate::model_core::{KeyPair, KeyRequest};

/// Runs an `ssh-keygen` compatible program to produce one keypair per call.
#[derive(Debug, Clone)]
pub struct SshKeygen {
    program: PathBuf,
    scratch_dir: PathBuf,
    timeout: Duration,
}

impl SshKeygen {
    pub fn new(program: impl Into<PathBuf>, scratch_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            scratch_dir: scratch_dir.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(
            config.keygen_program.clone(),
            config.scratch_dir.clone(),
            config.keygen_timeout,
        )
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    pub async fn generate(&self, request: &KeyRequest) -> Result<KeyPair, GenerationError> {
        // armed before the child exists so every return path cleans up
        let scratch = ScratchFiles::new(&self.scratch_dir);
        let started = Instant::now();
        let deadline = started + self.timeout;

        let mut cmd = self.command();
        cmd.args(keygen_args(request, scratch.private_key_path()));
        debug!(
            "Generating {} key of {} bits in scratch {}",
            request.key_type(),
            request.size(),
            scratch.id()
        );

        let mut child = cmd.spawn().map_err(|source| GenerationError::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;
        let stderr = StderrDrain::spawn(child.stderr.take());

        let status = match timeout_at(deadline, child.wait()).await {
            Ok(status) => status.map_err(GenerationError::Wait)?,
            Err(_) => {
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill key generator for scratch {}: {}", scratch.id(), e);
                }
                return Err(GenerationError::TimedOut(self.timeout));
            }
        };

        if !status.success() {
            return Err(GenerationError::ToolFailed {
                status,
                stderr: stderr.finish(deadline).await,
            });
        }

        let private_key = read_key(scratch.private_key_path()).await?;
        let public_key = read_key(scratch.public_key_path()).await?;

        info!(
            "Generated {} key of {} bits in {:?}",
            request.key_type(),
            request.size(),
            started.elapsed()
        );
        Ok(KeyPair::new(public_key, private_key))
    }
}

/// `-t <type> -b <size> -f <output> -N "" -q -C ""`
pub fn keygen_args(request: &KeyRequest, output: &Path) -> Vec<OsString> {
    vec![
        "-t".into(),
        request.key_type().as_str().into(),
        "-b".into(),
        request.size().to_string().into(),
        "-f".into(),
        output.as_os_str().to_owned(),
        "-N".into(),
        "".into(),
        "-q".into(),
        "-C".into(),
        "".into(),
    ]
}

async fn read_key(path: &Path) -> Result<String, GenerationError> {
    tokio::fs::read_to_string(path)
        .await
        .map(|contents| contents.trim().to_string())
        .map_err(|source| GenerationError::MissingOutput {
            path: path.to_path_buf(),
            source,
        })
}

// kept in memory, the rest is read and discarded
const STDERR_LIMIT: usize = 64 * 1024;

/// Reads the child's stderr while it runs so a chatty tool never blocks on a
/// full pipe.
struct StderrDrain {
    captured: Arc<Mutex<Vec<u8>>>,
    task: JoinHandle<()>,
}

impl StderrDrain {
    fn spawn(stderr: Option<ChildStderr>) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&captured);
        let task = tokio::spawn(async move {
            let Some(mut stderr) = stderr else {
                return;
            };
            let mut chunk = [0u8; 4096];
            loop {
                match stderr.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        let mut buffer = sink.lock().unwrap_or_else(PoisonError::into_inner);
                        let room = STDERR_LIMIT.saturating_sub(buffer.len());
                        buffer.extend_from_slice(&chunk[..n.min(room)]);
                    }
                }
            }
        });
        Self { captured, task }
    }

    /// Waits for end of stream until `deadline`, then returns what was read.
    /// The pipe stays open while anything the tool left behind holds it.
    async fn finish(mut self, deadline: Instant) -> String {
        if timeout_at(deadline, &mut self.task).await.is_err() {
            debug!("Key generator stderr still open at deadline");
        }
        let buffer = self.captured.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).trim().to_string()
    }
}

impl Drop for StderrDrain {
    fn drop(&mut self) {
        self.task.abort();
    }
}
