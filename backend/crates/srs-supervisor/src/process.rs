//! Child process spawning and teardown.

use crate::error::{Result as SupervisorResult, SupervisorError};

use std::ffi::{OsStr, OsString};
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use error_location::ErrorLocation;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

/// Where a supervised child is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildState {
    Spawned,
    Reachable,
    UnderTest,
    SignaledExit,
    Terminated,
}

/// Everything needed to start a child process.
#[derive(Debug, Clone)]
pub struct ProcessSpec {
    program: PathBuf,
    args: Vec<OsString>,
    env: Vec<(OsString, OsString)>,
    current_dir: Option<PathBuf>,
    inherit_stdin: bool,
    inherit_stdout: bool,
    inherit_stderr: bool,
}

impl ProcessSpec {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            current_dir: None,
            inherit_stdin: true,
            inherit_stdout: true,
            inherit_stderr: true,
        }
    }

    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn env<K: AsRef<OsStr>, V: AsRef<OsStr>>(mut self, key: K, value: V) -> Self {
        self.env
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    pub fn current_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Share our stdin with the child (default) or give it an empty one
    pub fn inherit_input(mut self, stdin: bool) -> Self {
        self.inherit_stdin = stdin;
        self
    }

    /// Pass the child's stdout/stderr through to ours (default) or discard them
    pub fn inherit_output(mut self, stdout: bool, stderr: bool) -> Self {
        self.inherit_stdout = stdout;
        self.inherit_stderr = stderr;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .stdin(stdio(self.inherit_stdin))
            .stdout(stdio(self.inherit_stdout))
            .stderr(stdio(self.inherit_stderr))
            .kill_on_drop(true);

        if let Some(ref dir) = self.current_dir {
            command.current_dir(dir);
        }

        command
    }
}

fn stdio(inherit: bool) -> Stdio {
    if inherit {
        Stdio::inherit()
    } else {
        Stdio::null()
    }
}

/// Start the process described by `spec`.
#[track_caller]
pub fn spawn(spec: &ProcessSpec) -> SupervisorResult<ChildGuard> {
    let child = spec
        .command()
        .spawn()
        .map_err(|source| SupervisorError::Spawn {
            program: spec.program.clone(),
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;

    let pid = child.id();
    info!(
        "Spawned {} (pid {})",
        spec.program.display(),
        pid.unwrap_or_default()
    );

    Ok(ChildGuard {
        child,
        pid,
        state: ChildState::Spawned,
    })
}

/// Owns a running child. A child that has not been reaped when the guard is
/// dropped gets killed.
#[derive(Debug)]
pub struct ChildGuard {
    child: Child,
    pid: Option<u32>,
    state: ChildState,
}

impl ChildGuard {
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub fn state(&self) -> ChildState {
        self.state
    }

    pub fn set_state(&mut self, state: ChildState) {
        debug!("Child {:?}: {:?} -> {:?}", self.pid, self.state, state);
        self.state = state;
    }

    /// Exit status if the child has already exited, without blocking.
    pub fn try_exit_status(&mut self) -> SupervisorResult<Option<ExitStatus>> {
        let status = self.child.try_wait()?;
        if status.is_some() {
            self.state = ChildState::Terminated;
        }
        Ok(status)
    }

    /// Wait for the child to exit on its own.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> SupervisorResult<ExitStatus> {
        match tokio::time::timeout(timeout, self.child.wait()).await {
            Ok(Ok(status)) => {
                self.set_state(ChildState::Terminated);
                Ok(status)
            }
            Ok(Err(source)) => Err(SupervisorError::Io {
                source,
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(_) => Err(SupervisorError::ExitTimeout {
                timeout_ms: timeout.as_millis() as u64,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Ask the child to stop, then kill it if it is still running after `grace`.
    pub async fn terminate(&mut self, grace: Duration) -> SupervisorResult<ExitStatus> {
        if let Some(status) = self.try_exit_status()? {
            return Ok(status);
        }

        #[cfg(unix)]
        if let Some(pid) = self.pid {
            use nix::sys::signal::{Signal, kill};
            use nix::unistd::Pid;

            info!("Sending SIGTERM to pid {pid}");
            if let Err(e) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
                debug!("SIGTERM to pid {pid} failed: {e}");
            }

            if let Ok(Ok(status)) = tokio::time::timeout(grace, self.child.wait()).await {
                self.set_state(ChildState::Terminated);
                return Ok(status);
            }
        }

        #[cfg(not(unix))]
        let _ = grace;

        warn!("Force killing child process (pid {:?})", self.pid);
        self.child.kill().await?;
        let status = self.child.wait().await?;
        self.set_state(ChildState::Terminated);
        Ok(status)
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if self.state == ChildState::Terminated {
            return;
        }

        warn!("Child (pid {:?}) still running on drop, killing", self.pid);
        if let Err(e) = self.child.start_kill() {
            debug!("Kill on drop failed: {e}");
        }
    }
}
