use sysinfo::System;

/// What `uname` reports about the machine the shell runs on.
pub trait HostInfo {
    fn system_name(&self) -> String;
    fn release_version(&self) -> String;
}

/// The real host, as seen by the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl HostInfo for SystemHost {
    fn system_name(&self) -> String {
        // Kernel names, not distribution names, so Ubuntu still reports "Linux".
        match std::env::consts::OS {
            "linux" | "android" => "Linux".to_string(),
            "macos" | "ios" => "Darwin".to_string(),
            "windows" => "Windows".to_string(),
            "freebsd" => "FreeBSD".to_string(),
            other => System::name().unwrap_or_else(|| other.to_string()),
        }
    }

    fn release_version(&self) -> String {
        System::kernel_version().unwrap_or_else(|| "unknown".to_string())
    }
}
