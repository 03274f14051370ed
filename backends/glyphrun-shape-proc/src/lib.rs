//! Subprocess shaping backend for glyphrun
//!
//! Shaping itself is delegated to an external engine (a `raqm`-style
//! command-line tool) invoked as
//!
//! ```text
//! <program> <font file> <text> <ltr|rtl> <language>
//! ```
//!
//! Its stdout is read by [`parse_output`]. The wait is bounded: an engine that
//! does not finish within the configured timeout is killed and reported as
//! [`ShapingError::Timeout`]. The same deadline covers draining its pipes, so
//! a background process that inherited stdout cannot hold the call open.

use std::ffi::OsString;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use glyphrun_core::{
    error::{Result, ShapingError},
    traits::Shaper,
    types::{ShapingRequest, ShapingResult},
};

mod parse;

pub use parse::parse_output;

/// Engine binary used when nothing else is configured
pub const DEFAULT_PROGRAM: &str = "raqm";

/// How long the engine may run before it is killed
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Shapes text by running an external engine once per request
#[derive(Debug, Clone)]
pub struct ProcessShaper {
    program: OsString,
    /// Arguments placed before the request's own arguments
    leading_args: Vec<OsString>,
    timeout: Duration,
}

impl ProcessShaper {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Arguments to pass ahead of `<font> <text> <direction> <language>`
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        Path::new(&self.program)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn command(&self, request: &ShapingRequest) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args)
            .arg(&request.font_file)
            .arg(&request.text)
            .arg(request.direction.as_str())
            .arg(&request.language)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Run the engine and collect its stdout, failing on non-zero exit
    fn run(&self, request: &ShapingRequest) -> std::result::Result<String, ShapingError> {
        let program = self.program.to_string_lossy().into_owned();
        let child = self
            .command(request)
            .spawn()
            .map_err(|e| ShapingError::Spawn {
                program: program.clone(),
                reason: e.to_string(),
            })?;
        let mut child = ChildGuard(Some(child));

        // Drain both pipes concurrently so a chatty engine can't block on a full pipe
        let stdout = child.take_pipe(|c| {
            c.stdout
                .take()
                .map(|p| Box::new(p) as Box<dyn Read + Send>)
        });
        let stderr = child.take_pipe(|c| {
            c.stderr
                .take()
                .map(|p| Box::new(p) as Box<dyn Read + Send>)
        });

        // On failure the readers are left detached: a grandchild may still hold the pipes
        let deadline = Instant::now() + self.timeout;
        let status = child
            .wait_until(deadline, self.timeout)
            .and_then(|status| {
                let stdout = collect(stdout, deadline, self.timeout)?;
                let stderr = collect(stderr, deadline, self.timeout)?;
                Ok((status, stdout, stderr))
            })
            .map_err(|e| {
                log::warn!("ProcessShaper: {}: {}", program, e);
                e
            });
        let (status, stdout, stderr) = status?;

        if !status.success() {
            let diagnostic = String::from_utf8_lossy(&stderr).trim().to_string();
            log::debug!("ProcessShaper: {} failed with {}: {}", program, status, diagnostic);
            return Err(ShapingError::ProcessFailed {
                status: status.to_string(),
                diagnostic,
            });
        }

        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

impl Default for ProcessShaper {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl Shaper for ProcessShaper {
    fn name(&self) -> &'static str {
        "process"
    }

    fn shape(&self, request: &ShapingRequest) -> Result<ShapingResult> {
        if request.text.is_empty() {
            return Ok(ShapingResult::empty(request.direction));
        }

        let stdout = self.run(request)?;
        let glyphs = parse_output(&stdout)?;

        log::debug!(
            "ProcessShaper: {} glyphs for {:?} ({}, {})",
            glyphs.len(),
            request.text,
            request.direction,
            request.language
        );

        Ok(ShapingResult::new(glyphs, request.direction))
    }
}

/// Owns the child for the duration of one call and reaps it on every exit path
struct ChildGuard(Option<Child>);

impl ChildGuard {
    fn take_pipe(
        &mut self,
        take: impl FnOnce(&mut Child) -> Option<Box<dyn Read + Send>>,
    ) -> Option<Receiver<Vec<u8>>> {
        let mut pipe = self.0.as_mut().and_then(take)?;
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            if let Err(e) = pipe.read_to_end(&mut buf) {
                log::warn!("ProcessShaper: error reading pipe: {}", e);
            }
            // The receiver is gone once the call has timed out
            let _ = tx.send(buf);
        });
        Some(rx)
    }

    /// Poll until the child exits, killing it once `deadline` has passed
    fn wait_until(
        &mut self,
        deadline: Instant,
        timeout: Duration,
    ) -> std::result::Result<ExitStatus, ShapingError> {
        loop {
            let Some(child) = self.0.as_mut() else {
                return Err(ShapingError::ProcessFailed {
                    status: "unknown".into(),
                    diagnostic: "shaping engine was already reaped".into(),
                });
            };
            match child.try_wait() {
                Ok(Some(status)) => {
                    self.0 = None;
                    return Ok(status);
                },
                Ok(None) if Instant::now() >= deadline => {
                    self.reap();
                    return Err(ShapingError::Timeout { after: timeout });
                },
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    self.reap();
                    return Err(ShapingError::ProcessFailed {
                        status: "unknown".into(),
                        diagnostic: e.to_string(),
                    });
                },
            }
        }
    }

    fn reap(&mut self) {
        if let Some(mut child) = self.0.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        self.reap();
    }
}

/// Wait for a reader's buffer, giving up at `deadline`
fn collect(
    pipe: Option<Receiver<Vec<u8>>>,
    deadline: Instant,
    timeout: Duration,
) -> std::result::Result<Vec<u8>, ShapingError> {
    let Some(rx) = pipe else {
        return Ok(Vec::new());
    };
    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(buf) => Ok(buf),
        Err(RecvTimeoutError::Timeout) => Err(ShapingError::Timeout { after: timeout }),
        Err(RecvTimeoutError::Disconnected) => {
            log::warn!("ProcessShaper: pipe reader panicked");
            Ok(Vec::new())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphrun_core::types::Direction;

    #[test]
    fn defaults() {
        let shaper = ProcessShaper::default();
        assert_eq!(shaper.program(), Path::new("raqm"));
        assert_eq!(shaper.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(shaper.name(), "process");
    }

    #[test]
    fn empty_text_never_spawns() {
        let shaper = ProcessShaper::new("/nonexistent/engine");
        let request = ShapingRequest::new("font.ttf", "", Direction::RightToLeft, "urd");
        let result = shaper.shape(&request).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.direction, Direction::RightToLeft);
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let shaper = ProcessShaper::new("/nonexistent/engine");
        let request = ShapingRequest::new("font.ttf", "abc", Direction::LeftToRight, "eng");
        let err = shaper.shape(&request).unwrap_err();
        assert!(matches!(
            err,
            glyphrun_core::GlyphrunError::Shaping(ShapingError::Spawn { .. })
        ));
    }
}
