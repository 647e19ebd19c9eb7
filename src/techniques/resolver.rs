use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use async_trait::async_trait;
use crate::errors::PwnError;
use crate::models::ResolvedBinary;
use tracing::debug;

/// Looks a binary name up in the current environment.
///
/// "Not installed" is a normal answer (`ResolvedBinary::Missing`); errors are
/// reserved for a lookup mechanism that could not give any answer.
#[async_trait]
pub trait BinaryResolver: Send + Sync {
    async fn resolve(&self, name: &str) -> Result<ResolvedBinary, PwnError>;
}

/// Resolves names through `which`, i.e. a `PATH` search.
#[derive(Debug, Clone)]
pub struct WhichResolver {
    program: PathBuf,
    timeout: Duration,
}

impl WhichResolver {
    pub fn new(timeout: Duration) -> Self {
        Self {
            program: PathBuf::from("which"),
            timeout,
        }
    }

    /// Use a different lookup program with `which`'s contract.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }
}

impl Default for WhichResolver {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

#[async_trait]
impl BinaryResolver for WhichResolver {
    async fn resolve(&self, name: &str) -> Result<ResolvedBinary, PwnError> {
        let mut command = tokio::process::Command::new(&self.program);
        command
            .arg(name)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| PwnError::resolution_unavailable(
                name,
                format!("{} timed out after {:?}", self.program.display(), self.timeout),
            ))?
            .map_err(|e| PwnError::resolution_unavailable(
                name,
                format!("failed to run {}: {}", self.program.display(), e),
            ))?;

        match output.status.code() {
            Some(0) => {
                let stdout = String::from_utf8(output.stdout).map_err(|_| {
                    PwnError::resolution_unavailable(name, "lookup printed a non UTF-8 path")
                })?;
                let path = stdout.lines().next().unwrap_or("").trim();
                if path.is_empty() {
                    return Err(PwnError::resolution_unavailable(name, "lookup succeeded without a path"));
                }
                debug!(command = %name, path = %path, "Resolved");
                Ok(ResolvedBinary::found(path))
            }
            Some(code) => {
                debug!(command = %name, exit_code = code, "Not installed");
                Ok(ResolvedBinary::missing())
            }
            None => Err(PwnError::resolution_unavailable(
                name,
                format!("{} was terminated by a signal", self.program.display()),
            )),
        }
    }
}

/// Answers from a fixed name-to-path table. Names not in the table are
/// reported missing.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    installed: HashMap<String, PathBuf>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binary(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.installed.insert(name.into(), path.into());
        self
    }
}

#[async_trait]
impl BinaryResolver for StaticResolver {
    async fn resolve(&self, name: &str) -> Result<ResolvedBinary, PwnError> {
        Ok(match self.installed.get(name) {
            Some(path) => ResolvedBinary::found(path.clone()),
            None => ResolvedBinary::missing(),
        })
    }
}
