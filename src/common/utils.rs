//! Small helpers shared by commands and configuration code.

use std::path::Path;

/// Render a path for log output with the home directory collapsed to `~`.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(relative) = path.strip_prefix(&home)
    {
        return format!("~/{}", relative.display());
    }
    path.display().to_string()
}

/// Check whether a process with the given PID is alive.
pub fn is_process_running(pid: u32) -> bool {
    Path::new(&format!("/proc/{pid}")).exists()
}

/// Directory for runtime files such as the instance lock.
pub fn runtime_dir() -> std::path::PathBuf {
    dirs::runtime_dir().unwrap_or_else(std::env::temp_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_path_collapses_home() {
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".config").join("bannerwatch");
            assert_eq!(private_path(&path), "~/.config/bannerwatch");
        }
    }

    #[test]
    fn test_private_path_leaves_other_paths() {
        let path = Path::new("/etc/bannerwatch.toml");
        assert_eq!(private_path(path), "/etc/bannerwatch.toml");
    }

    #[test]
    fn test_current_process_is_running() {
        assert!(is_process_running(std::process::id()));
    }
}
