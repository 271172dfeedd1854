//! Narrow seam for running external commands.
//!
//! Everything that shells out (the git driver, tool lookups) goes through
//! [`CommandRunner`] so tests can substitute a scripted implementation.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} {} exited with {}: {}", .args.join(" "), exit_label(.code), .output.trim())]
    Failed {
        program: String,
        args: Vec<String>,
        code: Option<i32>,
        output: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "signal".to_string(),
    }
}

/// Runs a command and captures its combined output.
pub trait CommandRunner {
    /// Run `program` with `args`, returning stdout followed by stderr.
    ///
    /// A non-zero exit status is an error carrying the captured output.
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError>;

    /// Resolve an executable the same way the runner would when spawning it.
    fn lookup(&self, program: &str) -> Option<PathBuf>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        (**self).run(program, args)
    }

    fn lookup(&self, program: &str) -> Option<PathBuf> {
        (**self).lookup(program)
    }
}

/// Runs commands as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        tracing::debug!(program, ?args, "running command");
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            tracing::warn!(program, output = %combined.trim(), "command failed");
            return Err(CommandError::Failed {
                program: program.to_string(),
                args: args.iter().map(|a| a.to_string()).collect(),
                code: output.status.code(),
                output: combined,
            });
        }
        Ok(combined)
    }

    fn lookup(&self, program: &str) -> Option<PathBuf> {
        find_on_path(program)
    }
}

/// Locate an executable `program` in the directories listed in `PATH`.
pub fn find_on_path(program: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    find_in(program, &path)
}

fn find_in(program: &str, search_path: &OsStr) -> Option<PathBuf> {
    let file_name = format!("{program}{}", std::env::consts::EXE_SUFFIX);
    std::env::split_paths(search_path)
        .map(|dir| dir.join(&file_name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_error_includes_output_and_status() {
        let err = CommandError::Failed {
            program: "git".to_string(),
            args: vec!["push".to_string(), "origin".to_string()],
            code: Some(128),
            output: "fatal: no remote\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "git push origin exited with status 128: fatal: no remote"
        );
    }

    #[test]
    fn find_on_path_misses_unknown_programs() {
        assert!(find_on_path("pctl-definitely-not-a-real-binary").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn find_in_skips_files_without_execute_bits() {
        use std::os::unix::fs::PermissionsExt;

        let plain = tempfile::TempDir::new().expect("tempdir should succeed");
        let runnable = tempfile::TempDir::new().expect("tempdir should succeed");
        for (dir, mode) in [(&plain, 0o644), (&runnable, 0o755)] {
            let tool = dir.path().join("git");
            std::fs::write(&tool, "#!/bin/sh\n").expect("write should succeed");
            std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(mode))
                .expect("chmod should succeed");
        }

        let only_plain = std::env::join_paths([plain.path()]).expect("join should succeed");
        assert_eq!(find_in("git", &only_plain), None);

        let both = std::env::join_paths([plain.path(), runnable.path()])
            .expect("join should succeed");
        assert_eq!(find_in("git", &both), Some(runnable.path().join("git")));
    }

    #[test]
    fn find_in_ignores_directories() {
        let dir = tempfile::TempDir::new().expect("tempdir should succeed");
        std::fs::create_dir(dir.path().join("git")).expect("mkdir should succeed");
        let search = std::env::join_paths([dir.path()]).expect("join should succeed");
        assert_eq!(find_in("git", &search), None);
    }

    #[cfg(unix)]
    #[test]
    fn process_runner_captures_output() {
        let out = ProcessRunner::new()
            .run("sh", &["-c", "echo out; echo err 1>&2"])
            .unwrap();
        assert_eq!(out, "out\nerr\n");
    }

    #[cfg(unix)]
    #[test]
    fn process_runner_reports_non_zero_exit() {
        let err = ProcessRunner::new()
            .run("sh", &["-c", "echo boom; exit 3"])
            .unwrap_err();
        match err {
            CommandError::Failed { code, output, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(output, "boom\n");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
