use crate::error::DaemonError;
use std::fs;
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const STOP_POLL_INTERVAL: Duration = Duration::from_millis(100);
const STOP_TIMEOUT: Duration = Duration::from_secs(10);

pub enum Forked {
    Parent,
    Child,
}

pub fn pid_file_path() -> PathBuf {
    PathBuf::from("/tmp/haddock-bot.pid")
}

/// Log file lives in the directory `start` was invoked from, resolved before
/// the daemon moves to `/`.
pub fn log_file_path() -> PathBuf {
    std::env::current_dir()
        .map(|dir| dir.join("haddock-bot.log"))
        .unwrap_or_else(|_| PathBuf::from("haddock-bot.log"))
}

pub fn read_pid(pid_file: &Path) -> Option<i32> {
    let contents = fs::read_to_string(pid_file).ok()?;
    contents.trim().parse().ok()
}

/// `kill(pid, 0)` probes for existence; EPERM still means the pid is alive.
pub fn is_running(pid: i32) -> bool {
    if unsafe { libc::kill(pid, 0) } == 0 {
        return true;
    }
    std::io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}

pub fn write_pid_file(pid_file: &Path) -> Result<(), DaemonError> {
    fs::write(pid_file, format!("{}\n", std::process::id())).map_err(DaemonError::PidFile)
}

pub fn detect_and_clean_stale_pid_file(pid_file: &Path) -> Result<(), DaemonError> {
    if !pid_file.exists() {
        return Ok(());
    }

    match read_pid(pid_file) {
        Some(pid) if is_running(pid) => Err(DaemonError::AlreadyRunning {
            pid,
            pid_file: pid_file.display().to_string(),
        }),
        Some(_) => {
            // Stale pid file, remove it
            tracing::info!("Removing stale pid file at {}", pid_file.display());
            fs::remove_file(pid_file).map_err(DaemonError::PidFile)?;
            Ok(())
        }
        None => {
            tracing::warn!(
                "Unreadable pid file at {}, attempting cleanup",
                pid_file.display()
            );
            fs::remove_file(pid_file).map_err(DaemonError::PidFile)?;
            Ok(())
        }
    }
}

pub fn daemonize(log_path: &Path) -> Result<Forked, DaemonError> {
    match unsafe { libc::fork() } {
        -1 => return Err(DaemonError::Daemonize(std::io::Error::last_os_error())),
        0 => {}
        child => {
            // Reap the intermediate child; the daemon itself is re-parented to init.
            unsafe { libc::waitpid(child, std::ptr::null_mut(), 0) };
            return Ok(Forked::Parent);
        }
    }

    if unsafe { libc::setsid() } == -1 {
        return Err(DaemonError::Daemonize(std::io::Error::last_os_error()));
    }

    // Second fork: the session leader exits so the daemon cannot reacquire a
    // controlling terminal.
    match unsafe { libc::fork() } {
        -1 => return Err(DaemonError::Daemonize(std::io::Error::last_os_error())),
        0 => {}
        _ => unsafe { libc::_exit(0) },
    }

    redirect_stdio(log_path)?;
    let _ = std::env::set_current_dir("/");
    Ok(Forked::Child)
}

fn redirect_stdio(log_path: &Path) -> Result<(), DaemonError> {
    let devnull = fs::OpenOptions::new()
        .read(true)
        .open("/dev/null")
        .map_err(DaemonError::Daemonize)?;
    let log = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(DaemonError::Daemonize)?;

    unsafe {
        libc::dup2(devnull.as_raw_fd(), libc::STDIN_FILENO);
        libc::dup2(log.as_raw_fd(), libc::STDOUT_FILENO);
        libc::dup2(log.as_raw_fd(), libc::STDERR_FILENO);
    }
    Ok(())
}

pub fn stop(pid_file: &Path) -> Result<(), DaemonError> {
    let Some(pid) = read_pid(pid_file) else {
        return Err(DaemonError::NotRunning(pid_file.display().to_string()));
    };
    if !is_running(pid) {
        let _ = fs::remove_file(pid_file);
        return Err(DaemonError::NotRunning(pid_file.display().to_string()));
    }

    if unsafe { libc::kill(pid, libc::SIGTERM) } != 0 {
        return Err(DaemonError::Signal(std::io::Error::last_os_error()));
    }

    let deadline = Instant::now() + STOP_TIMEOUT;
    while is_running(pid) {
        if Instant::now() >= deadline {
            tracing::warn!(pid, "Daemon did not exit after SIGTERM, sending SIGKILL");
            unsafe { libc::kill(pid, libc::SIGKILL) };
            break;
        }
        std::thread::sleep(STOP_POLL_INTERVAL);
    }

    if pid_file.exists() {
        let _ = fs::remove_file(pid_file);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Far above any real pid_max, so kill(pid, 0) reports ESRCH.
    const DEAD_PID: i32 = 999_999_999;

    #[test]
    fn read_pid_missing_file_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(read_pid(&tmp.path().join("nonexistent.pid")), None);
    }

    #[test]
    fn read_pid_garbage_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("garbage.pid");
        fs::write(&path, "not a pid\n").unwrap();
        assert_eq!(read_pid(&path), None);
    }

    #[test]
    fn write_then_read_pid_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("own.pid");
        write_pid_file(&path).unwrap();
        assert_eq!(read_pid(&path), Some(std::process::id() as i32));
    }

    #[test]
    fn current_process_is_running() {
        assert!(is_running(std::process::id() as i32));
    }

    #[test]
    fn dead_pid_is_not_running() {
        assert!(!is_running(DEAD_PID));
    }

    #[test]
    fn no_pid_file_returns_ok() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(detect_and_clean_stale_pid_file(&tmp.path().join("none.pid")).is_ok());
    }

    #[test]
    fn stale_pid_file_is_removed() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("stale.pid");
        fs::write(&path, format!("{DEAD_PID}\n")).unwrap();
        assert!(detect_and_clean_stale_pid_file(&path).is_ok());
        assert!(!path.exists());
    }

    #[test]
    fn unreadable_pid_file_is_removed() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.pid");
        fs::write(&path, "???\n").unwrap();
        assert!(detect_and_clean_stale_pid_file(&path).is_ok());
        assert!(!path.exists());
    }

    #[test]
    fn live_pid_file_returns_already_running() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("live.pid");
        write_pid_file(&path).unwrap();
        let result = detect_and_clean_stale_pid_file(&path);
        assert!(matches!(
            result,
            Err(DaemonError::AlreadyRunning { .. })
        ));
        assert!(path.exists());
    }

    #[test]
    fn stop_without_pid_file_is_not_running() {
        let tmp = tempfile::tempdir().unwrap();
        let result = stop(&tmp.path().join("none.pid"));
        assert!(matches!(result, Err(DaemonError::NotRunning(_))));
    }

    #[test]
    fn stop_with_dead_pid_cleans_up_and_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("dead.pid");
        fs::write(&path, format!("{DEAD_PID}\n")).unwrap();
        let result = stop(&path);
        assert!(matches!(result, Err(DaemonError::NotRunning(_))));
        assert!(!path.exists());
    }
}
