//! Shared testing utilities for prompt-engine CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated working directory with a `prompts/` folder for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        fs::create_dir_all(root.path().join("prompts")).expect("Failed to create prompts directory");
        Self { root }
    }

    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    pub fn prompts_dir(&self) -> PathBuf {
        self.root.path().join("prompts")
    }

    /// Build a command for the compiled `prompt-engine` binary inside the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("prompt-engine").expect("Failed to locate prompt-engine binary");
        cmd.current_dir(self.work_dir()).env_remove("RUST_LOG");
        cmd
    }

    /// Write a prompt definition into `prompts/`.
    pub fn write_prompt(&self, file_name: &str, content: &str) -> PathBuf {
        let path = self.prompts_dir().join(file_name);
        fs::write(&path, content).expect("Failed to write prompt definition");
        path
    }

    /// Write an arbitrary file relative to the work directory.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }
}

/// Greeting prompt used across CLI tests.
#[allow(dead_code)]
pub const GREETING_YAML: &str = r#"key: greeting
model: test-model
version: 3
userTemplate: "Hello {{name}}, you are {{age}} years old."
argsSchema:
  type: object
  required: [name, age]
  properties:
    name:
      type: string
      x-aliases: [Person.fullName]
    age:
      type: integer
      x-deepSearch: true
"#;
