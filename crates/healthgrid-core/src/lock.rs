//! Cooperative document lock guarding every workbook mutation
//!
//! Waiting is bounded. When the lock cannot be had in time the caller gets
//! [`LockOutcome::TimedOut`] and is expected to carry on unlocked.

use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

use fs2::FileExt;
use tracing::{debug, warn};

use crate::error::{HealthError, Result};

/// A lock that can be tried without blocking
pub trait DocumentLock {
    /// Attempt to take the lock; `Ok(false)` when someone else holds it
    fn try_acquire(&self) -> Result<bool>;

    fn release(&self) -> Result<()>;
}

/// Advisory exclusive lock on a file next to the store.
///
/// The OS drops the lock when the holding process exits, so a crashed
/// batch never leaves the store locked.
#[derive(Debug)]
pub struct FileLock {
    path: PathBuf,
    held: Mutex<Option<File>>,
}

impl FileLock {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileLock {
            path: path.into(),
            held: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn held(&self) -> Result<MutexGuard<'_, Option<File>>> {
        self.held
            .lock()
            .map_err(|_| HealthError::Other(format!("lock state poisoned for {}", self.path.display())))
    }

    fn open(&self) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|e| HealthError::store_operation(&format!("open lock {}", self.path.display()), e))
    }
}

fn is_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

impl DocumentLock for FileLock {
    fn try_acquire(&self) -> Result<bool> {
        let mut held = self.held()?;
        if held.is_some() {
            return Ok(false);
        }
        let mut file = self.open()?;
        match file.try_lock_exclusive() {
            Ok(()) => {
                file.set_len(0)?;
                file.seek(SeekFrom::Start(0))?;
                writeln!(file, "{}", std::process::id())?;
                *held = Some(file);
                Ok(true)
            }
            Err(e) if is_contended(&e) => Ok(false),
            Err(e) => Err(HealthError::store_operation(
                &format!("acquire lock {}", self.path.display()),
                e,
            )),
        }
    }

    fn release(&self) -> Result<()> {
        if let Some(file) = self.held()?.take() {
            file.unlock()
                .map_err(|e| HealthError::store_operation(&format!("release lock {}", self.path.display()), e))?;
        }
        Ok(())
    }
}

/// In-process lock, shared by cloning
#[derive(Debug, Clone, Default)]
pub struct ProcessLock {
    held: Arc<AtomicBool>,
}

impl ProcessLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

impl DocumentLock for ProcessLock {
    fn try_acquire(&self) -> Result<bool> {
        Ok(self
            .held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok())
    }

    fn release(&self) -> Result<()> {
        self.held.store(false, Ordering::Release);
        Ok(())
    }
}

/// Held lock; released on drop
pub struct LockGuard<'a> {
    lock: &'a dyn DocumentLock,
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.lock.release() {
            warn!(error = %e, "failed to release document lock");
        }
    }
}

pub enum LockOutcome<'a> {
    Acquired(LockGuard<'a>),
    TimedOut,
}

impl LockOutcome<'_> {
    pub fn acquired(&self) -> bool {
        matches!(self, LockOutcome::Acquired(_))
    }
}

/// Poll `lock` until acquired or `timeout` elapses
pub fn wait_lock(lock: &dyn DocumentLock, timeout: Duration, poll: Duration) -> Result<LockOutcome<'_>> {
    let start = Instant::now();
    loop {
        if lock.try_acquire()? {
            debug!(waited = ?start.elapsed(), "document lock acquired");
            return Ok(LockOutcome::Acquired(LockGuard { lock }));
        }
        if start.elapsed() >= timeout {
            warn!(timeout = ?timeout, "document lock not acquired, proceeding unlocked");
            return Ok(LockOutcome::TimedOut);
        }
        thread::sleep(poll.min(timeout.saturating_sub(start.elapsed())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_process_lock_is_exclusive() {
        let lock = ProcessLock::new();
        assert!(lock.try_acquire().unwrap());
        assert!(!lock.try_acquire().unwrap());
        lock.release().unwrap();
        assert!(lock.try_acquire().unwrap());
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let lock = ProcessLock::new();
        {
            let outcome = wait_lock(&lock, Duration::from_millis(10), Duration::from_millis(1)).unwrap();
            assert!(outcome.acquired());
            assert!(lock.is_held());
        }
        assert!(!lock.is_held());
    }

    #[test]
    fn test_wait_times_out_when_held() {
        let lock = ProcessLock::new();
        let other = lock.clone();
        assert!(other.try_acquire().unwrap());
        let outcome = wait_lock(&lock, Duration::from_millis(20), Duration::from_millis(5)).unwrap();
        assert!(!outcome.acquired());
        assert!(other.is_held());
    }

    #[test]
    fn test_file_lock_round_trip() {
        let dir = tempdir().unwrap();
        let lock = FileLock::new(dir.path().join("healthgrid.lock"));
        assert!(lock.try_acquire().unwrap());
        assert!(lock.path().exists());
        assert!(!lock.try_acquire().unwrap());

        let other = FileLock::new(lock.path());
        assert!(!other.try_acquire().unwrap());
        lock.release().unwrap();
        assert!(other.try_acquire().unwrap());
        other.release().unwrap();
        lock.release().unwrap();
    }

    #[test]
    fn test_file_lock_freed_when_holder_dropped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("healthgrid.lock");
        {
            let crashed = FileLock::new(&path);
            assert!(crashed.try_acquire().unwrap());
        }
        let lock = FileLock::new(&path);
        assert!(wait_lock(&lock, Duration::ZERO, Duration::from_millis(1))
            .unwrap()
            .acquired());
    }

    #[test]
    fn test_file_lock_wait_times_out_while_held() {
        let dir = tempdir().unwrap();
        let holder = FileLock::new(dir.path().join("healthgrid.lock"));
        assert!(holder.try_acquire().unwrap());
        let waiter = FileLock::new(holder.path());
        let outcome = wait_lock(&waiter, Duration::from_millis(20), Duration::from_millis(5)).unwrap();
        assert!(!outcome.acquired());
    }
}
