// Source cleanup after a document's results are persisted.
//
// Deleting a scanned document can transiently fail while another program
// still holds it open. Permission errors are retried under a bounded policy;
// anything else is reported straight away.

use crate::error::BatchError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

fn default_max_attempts() -> u32 {
    5
}

fn default_delay_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Pause between attempts in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay_ms: delay.as_millis() as u64,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Delete `path`, clearing the read-only flag first.
    ///
    /// Returns `Ok(true)` when the file was removed and `Ok(false)` when it
    /// was already gone.
    pub fn remove_file(&self, path: &Path) -> Result<bool, BatchError> {
        self.remove_with(path, Self::try_remove)
    }

    fn remove_with<F>(&self, path: &Path, mut remove: F) -> Result<bool, BatchError>
    where
        F: FnMut(&Path) -> std::io::Result<()>,
    {
        let attempts = self.max_attempts.max(1);

        for attempt in 1..=attempts {
            if !path.exists() {
                return Ok(false);
            }

            match remove(path) {
                Ok(()) => {
                    log::info!("Deleted source {}", path.display());
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                    if attempt == attempts {
                        return Err(BatchError::CleanupExhausted {
                            path: path.to_path_buf(),
                            attempts,
                            source: e,
                        });
                    }
                    log::warn!(
                        "{} is locked, retrying delete ({attempt}/{attempts})",
                        path.display()
                    );
                    std::thread::sleep(self.delay());
                }
                Err(e) => {
                    return Err(BatchError::CleanupFailed {
                        path: path.to_path_buf(),
                        source: e,
                    });
                }
            }
        }

        Ok(false)
    }

    fn try_remove(path: &Path) -> std::io::Result<()> {
        let mut permissions = fs::metadata(path)?.permissions();
        if permissions.readonly() {
            #[allow(clippy::permissions_set_readonly_false)]
            permissions.set_readonly(false);
            fs::set_permissions(path, permissions)?;
        }
        fs::remove_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        fs::write(&path, b"scan").unwrap();

        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        assert!(policy.remove_file(&path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn removes_read_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locked.pdf");
        fs::write(&path, b"scan").unwrap();
        let mut permissions = fs::metadata(&path).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&path, permissions).unwrap();

        let policy = RetryPolicy::new(2, Duration::from_millis(1));
        assert!(policy.remove_file(&path).unwrap());
        assert!(!path.exists());
    }

    fn locked(_path: &Path) -> std::io::Result<()> {
        Err(std::io::Error::from(ErrorKind::PermissionDenied))
    }

    fn scanned_file(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("held.pdf");
        fs::write(&path, b"scan").unwrap();
        path
    }

    #[test]
    fn locked_file_exhausts_single_attempt() {
        let dir = tempfile::tempdir().unwrap();
        let path = scanned_file(dir.path());
        let mut calls = 0;

        let policy = RetryPolicy::new(1, Duration::from_millis(1));
        let result = policy.remove_with(&path, |p| {
            calls += 1;
            locked(p)
        });

        assert!(matches!(
            result,
            Err(BatchError::CleanupExhausted { attempts: 1, .. })
        ));
        assert_eq!(calls, 1);
        assert!(path.exists());
    }

    #[test]
    fn locked_file_is_retried_until_attempts_run_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = scanned_file(dir.path());
        let mut calls = 0;

        let policy = RetryPolicy::new(2, Duration::from_millis(20));
        let started = std::time::Instant::now();
        let result = policy.remove_with(&path, |p| {
            calls += 1;
            locked(p)
        });

        assert!(matches!(
            result,
            Err(BatchError::CleanupExhausted { attempts: 2, .. })
        ));
        assert_eq!(calls, 2);
        // one pause between the two attempts, none after the last
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn lock_released_on_retry() {
        let dir = tempfile::tempdir().unwrap();
        let path = scanned_file(dir.path());
        let mut calls = 0;

        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let removed = policy
            .remove_with(&path, |p| {
                calls += 1;
                if calls == 1 {
                    locked(p)
                } else {
                    fs::remove_file(p)
                }
            })
            .unwrap();

        assert!(removed);
        assert_eq!(calls, 2);
        assert!(!path.exists());
    }

    #[test]
    fn other_errors_are_not_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = scanned_file(dir.path());
        let mut calls = 0;

        let policy = RetryPolicy::new(5, Duration::from_millis(1));
        let result = policy.remove_with(&path, |_| {
            calls += 1;
            Err(std::io::Error::from(ErrorKind::Other))
        });

        assert!(matches!(result, Err(BatchError::CleanupFailed { .. })));
        assert_eq!(calls, 1);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let policy = RetryPolicy::default();
        assert!(!policy.remove_file(&dir.path().join("gone.pdf")).unwrap());
    }
}
