// Author: Dustin Pilgrim
// License: MIT

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use eventline::runtime::{self, LogLevel};

pub fn default_log_path(file: &str) -> PathBuf {
    let base = std::env::var_os("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/state")))
        .unwrap_or_else(|| PathBuf::from("/tmp"));
    base.join("roiguard").join(file)
}

#[derive(Debug, Clone)]
pub struct LogOptions {
    /// `None` disables the file sink.
    pub file: Option<PathBuf>,
    pub verbose: bool,
}

impl LogOptions {
    /// Console is on when asked for, or when there is no file to write to.
    fn console(&self) -> bool {
        self.verbose || self.file.is_none()
    }
}

pub fn init_logging(opts: &LogOptions) -> Result<(), String> {
    block_on(runtime::init());

    if let Some(path) = opts.file.as_deref() {
        ensure_parent_dir(path).map_err(|e| format!("create log dir: {e}"))?;
        runtime::enable_file_output(path).map_err(|e| format!("enable file output: {e}"))?;
    }

    runtime::enable_console_output(opts.console());
    runtime::enable_console_color(opts.verbose);

    runtime::set_log_level(if opts.verbose { LogLevel::Debug } else { LogLevel::Info });

    Ok(())
}

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

// eventline's init is async; drive it inline rather than pull in an executor.
fn block_on<F: Future>(mut fut: F) -> F::Output {
    unsafe fn clone(_: *const ()) -> RawWaker {
        RawWaker::new(std::ptr::null(), &VTABLE)
    }
    unsafe fn wake(_: *const ()) {}
    unsafe fn wake_by_ref(_: *const ()) {}
    unsafe fn drop(_: *const ()) {}

    static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, wake, wake_by_ref, drop);

    let waker = unsafe { Waker::from_raw(RawWaker::new(std::ptr::null(), &VTABLE)) };
    let mut cx = Context::from_waker(&waker);

    // SAFETY: we don't move `fut` after pinning.
    let mut fut = unsafe { Pin::new_unchecked(&mut fut) };

    loop {
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(v) => return v,
            Poll::Pending => std::thread::yield_now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_falls_back_when_no_file() {
        let quiet_file = LogOptions {
            file: Some(PathBuf::from("/tmp/x.log")),
            verbose: false,
        };
        assert!(!quiet_file.console());
        let no_file = LogOptions {
            file: None,
            verbose: false,
        };
        assert!(no_file.console());
    }

    #[test]
    fn log_path_ends_in_app_dir() {
        let p = default_log_path("roiguard.log");
        assert!(p.ends_with("roiguard/roiguard.log"));
    }

    #[test]
    fn ensure_parent_dir_creates_nested_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log = dir.path().join("a/b/c.log");
        ensure_parent_dir(&log).expect("created");
        assert!(dir.path().join("a/b").is_dir());
    }
}
