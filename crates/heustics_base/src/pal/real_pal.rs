use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, instrument};

use crate::{HeusticsError, HeusticsResult, error::ErrorKind};

use super::FilePath;
use super::traits::{CommandOutput, Pal, command_line};

/// PAL implementation backed by the real filesystem and process table.
///
/// All file paths are resolved relative to the base directory, which is also the
/// working directory of spawned commands.
#[derive(Debug)]
pub struct RealPal {
    base_dir: PathBuf,
}

impl RealPal {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn resolve_path(&self, path: &FilePath) -> PathBuf {
        self.base_dir.join(path.as_path())
    }

    fn file_error(path: PathBuf, source: std::io::Error) -> Box<HeusticsError> {
        Box::new(HeusticsError::new(ErrorKind::FileError { path, source }))
    }
}

impl Pal for RealPal {
    #[instrument(skip(self), fields(path = %path))]
    fn file_exists(&self, path: &FilePath) -> HeusticsResult<bool> {
        let resolved = self.resolve_path(path);
        let exists = resolved.is_file();
        debug!(exists, resolved = %resolved.display(), "checked file existence");
        Ok(exists)
    }

    #[instrument(skip(self), fields(path = %path))]
    fn read_file(&self, path: &FilePath) -> HeusticsResult<Box<dyn Read + 'static>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "opening file for reading");
        let file = fs::File::open(&resolved).map_err(|e| {
            debug!(error = %e, "failed to open file");
            Self::file_error(resolved, e)
        })?;
        Ok(Box::new(file))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn create_file(&self, path: &FilePath) -> HeusticsResult<Box<dyn Write>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "creating file");
        let file = fs::File::create(&resolved).map_err(|e| {
            debug!(error = %e, "failed to create file");
            Self::file_error(resolved, e)
        })?;
        Ok(Box::new(file))
    }

    #[instrument(skip(self, args), fields(command = %command_line(program, args)))]
    fn run_command(&self, program: &str, args: &[String]) -> HeusticsResult<CommandOutput> {
        debug!(cwd = %self.base_dir.display(), "spawning command");
        let output = Command::new(program)
            .args(args)
            .current_dir(&self.base_dir)
            .output()
            .map_err(|e| {
                debug!(error = %e, "failed to spawn command");
                Box::new(HeusticsError::new(ErrorKind::CommandError {
                    command: command_line(program, args),
                    status: None,
                    stderr: e.to_string(),
                }))
            })?;
        let result = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(status = ?result.status, "command finished");
        Ok(result)
    }
}
