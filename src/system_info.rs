use std::fmt::Display;

const NOT_AVAILABLE: &str = "not available";

// Describes the machine the validator runs on. Only ever displayed
#[derive(Debug, PartialEq, Clone)]
pub struct SystemInfo {
    pub language: String,
    pub os: String,
    pub processor: String,
    pub memory: String,
    pub motherboard: String,
}

impl Display for SystemInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Language:    {}", self.language)?;
        writeln!(f, "OS:          {}", self.os)?;
        writeln!(f, "Processor:   {}", self.processor)?;
        writeln!(f, "Memory:      {}", self.memory)?;
        write!(f, "Motherboard: {}", self.motherboard)
    }
}

pub trait SystemInfoProvider {
    fn system_info(&self) -> SystemInfo;
}

// Reads what is known about the target at compile time
pub struct HostSystemInfo;

fn os_name(os: &str) -> String {
    match os {
        "linux" => "Linux",
        "macos" => "MacOS",
        "windows" => "Windows",
        "android" => "Android",
        "ios" => "iOS",
        "freebsd" => "FreeBSD",
        other => other,
    }.to_string()
}

impl SystemInfoProvider for HostSystemInfo {
    fn system_info(&self) -> SystemInfo {
        SystemInfo {
            language: format!("Rust ({} {})", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            os: os_name(std::env::consts::OS),
            processor: std::env::consts::ARCH.to_string(),
            memory: NOT_AVAILABLE.to_string(),
            motherboard: NOT_AVAILABLE.to_string(),
        }
    }
}
