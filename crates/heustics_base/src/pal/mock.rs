use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::sync::{Arc, Mutex};

use crate::HeusticsError;
use crate::HeusticsResult;
use crate::error::ErrorKind;

use super::FilePath;
use super::traits::{CommandOutput, Pal, command_line};

/* 📖 # Why does MockPal script command output by command line?

Callers shell out with fully rendered arguments (`go list -f ... ./libs/...`).
Keying responses by that exact command line makes a test state precisely which invocations
it expects, and an unexpected invocation fails loudly instead of returning empty output.
*/

/// In-memory PAL implementation for testing.
///
/// # Examples
///
/// ```
/// use heustics_base::{pal::MockPal, CommandOutput, Pal, FilePath};
///
/// let mock = MockPal::new();
/// mock.add_file(FilePath::from("files.json"), b"[]".to_vec());
/// mock.add_command("go version", CommandOutput::success("go1.22\n"));
///
/// assert_eq!(mock.read_file_to_string(&FilePath::from("files.json")).unwrap(), "[]");
/// assert_eq!(mock.run_command("go", &["version".into()]).unwrap().stdout, "go1.22\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockPal {
    files: Arc<Mutex<HashMap<FilePath, Vec<u8>>>>,
    commands: Arc<Mutex<HashMap<String, CommandOutput>>>,
    invocations: Arc<Mutex<Vec<String>>>,
}

impl MockPal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the mock storage.
    pub fn add_file(&self, path: FilePath, content: Vec<u8>) {
        self.files.lock().unwrap().insert(path, content);
    }

    /// Returns the contents of a stored file, if present.
    pub fn file_contents(&self, path: &FilePath) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }

    /// Returns all stored file paths in sorted order.
    pub fn file_paths(&self) -> Vec<FilePath> {
        let mut paths: Vec<FilePath> = self.files.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Registers the output returned when `command` (program and arguments joined by
    /// spaces) is run.
    pub fn add_command(&self, command: impl Into<String>, output: CommandOutput) {
        self.commands.lock().unwrap().insert(command.into(), output);
    }

    /// Command lines run so far, in invocation order.
    pub fn invocations(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }
}

impl Pal for MockPal {
    fn file_exists(&self, path: &FilePath) -> HeusticsResult<bool> {
        Ok(self.files.lock().unwrap().contains_key(path))
    }

    fn read_file(&self, path: &FilePath) -> HeusticsResult<Box<dyn Read + 'static>> {
        let files = self.files.lock().unwrap();
        let content = files
            .get(path)
            .ok_or_else(|| {
                Box::new(HeusticsError::new(ErrorKind::FileError {
                    path: path.as_path().to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("File not found: {}", path),
                    ),
                }))
            })?
            .clone();
        Ok(Box::new(Cursor::new(content)))
    }

    fn create_file(&self, path: &FilePath) -> HeusticsResult<Box<dyn Write>> {
        Ok(Box::new(MockFileWriter {
            path: path.clone(),
            files: Arc::clone(&self.files),
            buffer: Vec::new(),
        }))
    }

    fn run_command(&self, program: &str, args: &[String]) -> HeusticsResult<CommandOutput> {
        let command = command_line(program, args);
        self.invocations.lock().unwrap().push(command.clone());
        self.commands
            .lock()
            .unwrap()
            .get(&command)
            .cloned()
            .ok_or_else(|| {
                Box::new(HeusticsError::new(ErrorKind::CommandError {
                    command,
                    status: None,
                    stderr: "no output registered in MockPal".to_string(),
                }))
            })
    }
}

/// Buffers writes and stores them in the mock storage when dropped.
struct MockFileWriter {
    path: FilePath,
    files: Arc<Mutex<HashMap<FilePath, Vec<u8>>>>,
    buffer: Vec<u8>,
}

impl Write for MockFileWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Drop for MockFileWriter {
    fn drop(&mut self) {
        if let Ok(mut files) = self.files.lock() {
            files.insert(self.path.clone(), std::mem::take(&mut self.buffer));
        }
    }
}
