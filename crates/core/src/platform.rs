//! Platform detection
//!
//! Provides OS and architecture information using standard Unix conventions:
//! - macOS → `"darwin"` (kernel name)
//! - Linux → `"linux"`
//! - Windows → `"windows"`
//!
//! Platform info is cached on first access for optimal performance.

use std::sync::LazyLock;

/// Current platform information (cached)
///
/// # Example
/// ```
/// use synctropy_core::platform::CURRENT_PLATFORM;
///
/// let label = format!("{}-{}", CURRENT_PLATFORM.os, CURRENT_PLATFORM.arch);
/// assert!(!label.is_empty());
/// ```
pub static CURRENT_PLATFORM: LazyLock<Platform> = LazyLock::new(Platform::detect);

/// Platform information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// OS: "darwin" (macOS), "linux", "windows", "unknown"
    pub os: &'static str,
    /// CPU architecture: "x86_64", "aarch64", etc.
    pub arch: &'static str,
}

impl Platform {
    /// Detect the platform this binary was compiled for
    pub fn detect() -> Self {
        Self {
            os: Self::detect_os(),
            arch: std::env::consts::ARCH,
        }
    }

    const fn detect_os() -> &'static str {
        #[cfg(target_os = "macos")]
        {
            "darwin"
        }

        #[cfg(target_os = "linux")]
        {
            "linux"
        }

        #[cfg(target_os = "windows")]
        {
            "windows"
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            "unknown"
        }
    }

    /// `os/arch` label shown by `synctropy info`
    pub fn label(&self) -> String {
        format!("{}/{}", self.os, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_joins_os_and_arch() {
        let platform = Platform {
            os: "linux",
            arch: "x86_64",
        };
        assert_eq!(platform.label(), "linux/x86_64");
    }

    #[test]
    fn test_current_platform_arch_matches_consts() {
        assert_eq!(CURRENT_PLATFORM.arch, std::env::consts::ARCH);
    }
}
