use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{OwnershipError, Result};

/// Produces raw per-line authorship text for a tracked file.
///
/// The text carries one authorship tag per source line, so an identity's
/// line share is its substring count over the line count.
pub trait BlameSource {
    fn blame(&mut self, path: &str) -> Result<String>;
}

/// `git blame -e` backed authorship source.
///
/// Every call spawns a git process; callers cache results per path.
#[derive(Debug, Clone)]
pub struct GitBlame {
    repo_root: PathBuf,
}

impl GitBlame {
    pub fn new(repo_root: impl AsRef<Path>) -> Self {
        Self {
            repo_root: repo_root.as_ref().to_path_buf(),
        }
    }
}

impl BlameSource for GitBlame {
    fn blame(&mut self, path: &str) -> Result<String> {
        log::debug!("git blame {path}");
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_root)
            .arg("blame")
            .arg(path)
            .arg("-e")
            .output()?;
        if !output.status.success() {
            return Err(OwnershipError::GitCommand {
                command: format!("blame {path} -e"),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Every path git tracks under `repo_root`, in index order.
pub fn tracked_files(repo_root: impl AsRef<Path>) -> Result<Vec<String>> {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo_root.as_ref())
        .arg("ls-files")
        .arg("-z")
        .output()?;
    if !output.status.success() {
        return Err(OwnershipError::GitCommand {
            command: "ls-files -z".to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout
        .split('\0')
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{tracked_files, BlameSource, GitBlame};
    use std::fs;
    use std::path::Path;

    fn git_ok(repo: &Path, args: &[&str]) {
        let out = std::process::Command::new("git")
            .arg("-C")
            .arg(repo)
            .args(args)
            .output()
            .expect("git command");
        assert!(
            out.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&out.stderr)
        );
    }

    fn setup_repo() -> tempfile::TempDir {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let repo = dir.path();

        git_ok(repo, &["init"]);
        git_ok(repo, &["config", "user.email", "test@example.com"]);
        git_ok(repo, &["config", "user.name", "Test"]);

        fs::write(repo.join("a.txt"), "alpha\nbravo\n").expect("write a");
        git_ok(repo, &["add", "."]);
        git_ok(repo, &["commit", "-m", "c1"]);
        dir
    }

    #[test]
    fn blame_tags_every_line_with_the_author_email() {
        let dir = setup_repo();

        let text = GitBlame::new(dir.path()).blame("a.txt").expect("blame");
        assert_eq!(text.matches('\n').count(), 2);
        assert_eq!(text.matches("test@example.com").count(), 2);
    }

    #[test]
    fn blame_of_untracked_path_is_an_error() {
        let dir = setup_repo();

        let err = GitBlame::new(dir.path()).blame("missing.txt").unwrap_err();
        assert!(err.to_string().contains("blame missing.txt"));
    }

    #[test]
    fn tracked_files_lists_committed_paths() {
        let dir = setup_repo();

        let files = tracked_files(dir.path()).expect("ls-files");
        assert_eq!(files, vec!["a.txt".to_string()]);
    }
}
