//! Environment probing: OS family, version, architecture, shell and profile
//!
//! Everything later steps branch on is resolved here, once, before any
//! mutation. Unsupported environments fail fast with a preflight error.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;

use crate::error::{DevprepError, Result};

const MIN_UBUNTU_MAJOR: u32 = 20;
const MIN_MACOS_MAJOR: u32 = 12;

/// Filesystem paths whose presence marks a virtualized guest
const GUEST_MARKERS: &[&str] = &[
    "/.dockerenv",
    "/run/.containerenv",
    "/proc/sys/fs/binfmt_misc/WSLInterop",
    "/sys/hypervisor/uuid",
];

/// Canonical operating system name after alias collapsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OsName {
    Ubuntu,
    Macos,
}

impl std::fmt::Display for OsName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsName::Ubuntu => write!(f, "Ubuntu"),
            OsName::Macos => write!(f, "macOS"),
        }
    }
}

/// Supported interactive shells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellKind {
    Bash,
    Zsh,
}

impl ShellKind {
    /// Candidate profile files in resolution order, relative to home
    fn profile_candidates(self) -> &'static [&'static str] {
        match self {
            ShellKind::Zsh => &[".zshrc", ".zprofile"],
            ShellKind::Bash => &[".bashrc", ".bash_profile"],
        }
    }
}

impl std::fmt::Display for ShellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellKind::Bash => write!(f, "bash"),
            ShellKind::Zsh => write!(f, "zsh"),
        }
    }
}

/// Facts about the machine, computed once at startup and read-only after
#[derive(Debug, Clone, Serialize)]
pub struct SystemProfile {
    pub os: OsName,
    pub os_version: String,
    pub os_major: u32,
    pub arch: String,
    pub kernel_family: String,
    pub virtualized_guest: bool,
    pub shell: ShellKind,
    pub profile_path: PathBuf,
}

/// Probe the machine and fail fast on anything outside the supported set
pub fn probe() -> Result<SystemProfile> {
    let (os, os_version) = detect_os()?;
    let os_major = major_version(&os_version).ok_or_else(|| DevprepError::UnsupportedPlatform {
        os: os.to_string(),
        version: os_version.clone(),
    })?;
    check_supported(os, os_major, &os_version)?;

    let shell = detect_shell()?;
    let home = dirs::home_dir().ok_or(DevprepError::HomeNotFound)?;
    let profile_path = resolve_profile(&home, shell)?;

    Ok(SystemProfile {
        os,
        os_version,
        os_major,
        arch: normalize_arch(std::env::consts::ARCH),
        kernel_family: kernel_family(os).to_string(),
        virtualized_guest: GUEST_MARKERS.iter().any(|m| Path::new(m).exists()),
        shell,
        profile_path,
    })
}

fn detect_os() -> Result<(OsName, String)> {
    match std::env::consts::OS {
        "linux" => {
            let content = std::fs::read_to_string("/etc/os-release").map_err(|_| {
                DevprepError::UnsupportedPlatform {
                    os: "linux".to_string(),
                    version: "unknown".to_string(),
                }
            })?;
            parse_os_release(&content).ok_or_else(|| DevprepError::UnsupportedPlatform {
                os: "linux".to_string(),
                version: "unknown".to_string(),
            })
        }
        "macos" => {
            let output = Command::new("sw_vers")
                .arg("-productVersion")
                .output()
                .map_err(|_| DevprepError::RequiredToolMissing {
                    tool: "sw_vers".to_string(),
                })?;
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            Ok((OsName::Macos, version))
        }
        other => Err(DevprepError::UnsupportedPlatform {
            os: other.to_string(),
            version: "unknown".to_string(),
        }),
    }
}

/// Parse `/etc/os-release`, collapsing Ubuntu-derived vendor strings
fn parse_os_release(content: &str) -> Option<(OsName, String)> {
    let mut id = None;
    let mut id_like = None;
    let mut version_id = None;

    for line in content.lines() {
        if let Some(value) = line.strip_prefix("ID=") {
            id = Some(unquote(value).to_lowercase());
        } else if let Some(value) = line.strip_prefix("ID_LIKE=") {
            id_like = Some(unquote(value).to_lowercase());
        } else if let Some(value) = line.strip_prefix("VERSION_ID=") {
            version_id = Some(unquote(value).to_string());
        }
    }

    let id = id?;
    let is_ubuntu = id == "ubuntu"
        || id_like
            .as_deref()
            .is_some_and(|l| l.split_whitespace().any(|part| part == "ubuntu"));
    if !is_ubuntu {
        return None;
    }
    Some((OsName::Ubuntu, version_id?))
}

fn unquote(value: &str) -> &str {
    value.trim().trim_matches('"').trim_matches('\'')
}

fn major_version(version: &str) -> Option<u32> {
    version.split('.').next()?.parse().ok()
}

fn check_supported(os: OsName, major: u32, version: &str) -> Result<()> {
    let minimum = match os {
        OsName::Ubuntu => MIN_UBUNTU_MAJOR,
        OsName::Macos => MIN_MACOS_MAJOR,
    };
    if major < minimum {
        return Err(DevprepError::UnsupportedPlatform {
            os: os.to_string(),
            version: version.to_string(),
        });
    }
    Ok(())
}

/// Collapse architecture aliases to one canonical name per family
fn normalize_arch(arch: &str) -> String {
    match arch {
        "aarch64" | "arm64" => "arm64".to_string(),
        "x86_64" | "amd64" => "x86_64".to_string(),
        other => other.to_string(),
    }
}

fn kernel_family(os: OsName) -> &'static str {
    match os {
        OsName::Ubuntu => "linux",
        OsName::Macos => "darwin",
    }
}

fn detect_shell() -> Result<ShellKind> {
    let shell_var = std::env::var("SHELL").unwrap_or_default();
    let name = Path::new(&shell_var)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_string();
    match name.as_str() {
        "bash" => Ok(ShellKind::Bash),
        "zsh" => Ok(ShellKind::Zsh),
        _ => Err(DevprepError::UnsupportedShell {
            shell: if name.is_empty() {
                "unknown".to_string()
            } else {
                name
            },
        }),
    }
}

/// Resolve the first existing profile file for the shell; never creates one
fn resolve_profile(home: &Path, shell: ShellKind) -> Result<PathBuf> {
    for candidate in shell.profile_candidates() {
        let path = home.join(candidate);
        if path.is_file() {
            return Ok(path);
        }
    }
    Err(DevprepError::ProfileNotFound {
        shell: shell.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const UBUNTU_OS_RELEASE: &str = r#"PRETTY_NAME="Ubuntu 22.04.4 LTS"
NAME="Ubuntu"
VERSION_ID="22.04"
VERSION="22.04.4 LTS (Jammy Jellyfish)"
ID=ubuntu
ID_LIKE=debian
"#;

    #[test]
    fn test_parse_os_release_ubuntu() {
        let (os, version) = parse_os_release(UBUNTU_OS_RELEASE).unwrap();
        assert_eq!(os, OsName::Ubuntu);
        assert_eq!(version, "22.04");
    }

    #[test]
    fn test_parse_os_release_ubuntu_derivative() {
        let content = "ID=neon\nID_LIKE=\"ubuntu debian\"\nVERSION_ID=\"22.04\"\n";
        let (os, version) = parse_os_release(content).unwrap();
        assert_eq!(os, OsName::Ubuntu);
        assert_eq!(version, "22.04");
    }

    #[test]
    fn test_parse_os_release_rejects_other_distros() {
        let content = "ID=fedora\nVERSION_ID=\"39\"\n";
        assert!(parse_os_release(content).is_none());
    }

    #[test]
    fn test_major_version() {
        assert_eq!(major_version("22.04"), Some(22));
        assert_eq!(major_version("14.5"), Some(14));
        assert_eq!(major_version("garbage"), None);
    }

    #[test]
    fn test_check_supported_bounds() {
        assert!(check_supported(OsName::Ubuntu, 22, "22.04").is_ok());
        assert!(check_supported(OsName::Ubuntu, 18, "18.04").is_err());
        assert!(check_supported(OsName::Macos, 14, "14.5").is_ok());
        assert!(check_supported(OsName::Macos, 11, "11.7").is_err());
    }

    #[test]
    fn test_normalize_arch() {
        assert_eq!(normalize_arch("aarch64"), "arm64");
        assert_eq!(normalize_arch("arm64"), "arm64");
        assert_eq!(normalize_arch("x86_64"), "x86_64");
        assert_eq!(normalize_arch("amd64"), "x86_64");
        assert_eq!(normalize_arch("riscv64"), "riscv64");
    }

    #[test]
    fn test_resolve_profile_prefers_rc_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".zshrc"), "").unwrap();
        std::fs::write(temp.path().join(".zprofile"), "").unwrap();

        let resolved = resolve_profile(temp.path(), ShellKind::Zsh).unwrap();
        assert_eq!(resolved, temp.path().join(".zshrc"));
    }

    #[test]
    fn test_resolve_profile_falls_back() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".bash_profile"), "").unwrap();

        let resolved = resolve_profile(temp.path(), ShellKind::Bash).unwrap();
        assert_eq!(resolved, temp.path().join(".bash_profile"));
    }

    #[test]
    fn test_resolve_profile_never_creates() {
        let temp = TempDir::new().unwrap();

        let result = resolve_profile(temp.path(), ShellKind::Bash);
        assert!(matches!(result, Err(DevprepError::ProfileNotFound { .. })));
        assert!(std::fs::read_dir(temp.path()).unwrap().next().is_none());
    }
}
