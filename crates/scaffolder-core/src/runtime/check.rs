//! Detection of the external tools the post-generation steps rely on

use colored::Colorize;
use std::fmt;
use std::process::Command;

/// External tools used after the template is expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalTool {
    Make,
    Uv,
    Git,
    Gh,
}

impl ExternalTool {
    pub const ALL: [ExternalTool; 4] = [
        ExternalTool::Make,
        ExternalTool::Uv,
        ExternalTool::Git,
        ExternalTool::Gh,
    ];

    pub fn binary(&self) -> &'static str {
        match self {
            ExternalTool::Make => "make",
            ExternalTool::Uv => "uv",
            ExternalTool::Git => "git",
            ExternalTool::Gh => "gh",
        }
    }

    /// What the tool is needed for, shown next to its status
    pub fn purpose(&self) -> &'static str {
        match self {
            ExternalTool::Make => "environment setup",
            ExternalTool::Uv => "pre-commit hooks",
            ExternalTool::Git => "local repository",
            ExternalTool::Gh => "remote repository",
        }
    }
}

impl fmt::Display for ExternalTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

/// Tool detection result
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub tool: ExternalTool,
    pub version: Option<String>,
    pub available: bool,
}

impl ToolInfo {
    pub fn label(&self) -> String {
        match (&self.version, self.available) {
            (Some(version), true) => format!("{} ({})", self.tool, version),
            (None, true) => format!("{} (unknown version)", self.tool),
            _ => format!("{} (not installed)", self.tool),
        }
    }
}

/// Check whether `binary --version` runs, keeping the first line of its output
fn detect_binary(binary: &str) -> (bool, Option<String>) {
    match Command::new(binary).arg("--version").output() {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout)
                .lines()
                .next()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty());
            (true, version)
        }
        _ => (false, None),
    }
}

pub fn detect(tool: ExternalTool) -> ToolInfo {
    let (available, version) = detect_binary(tool.binary());
    ToolInfo {
        tool,
        version,
        available,
    }
}

/// Detect every tool. Missing tools are reported, never treated as errors:
/// each step that needs one degrades on its own.
pub fn detect_tools() -> Vec<ToolInfo> {
    ExternalTool::ALL.iter().copied().map(detect).collect()
}

/// Print one status line per tool; returns how many are missing
pub fn print_tool_report(tools: &[ToolInfo]) -> usize {
    println!("{}", "External tools".cyan().bold());
    for info in tools {
        let status = if info.available {
            "ok".green()
        } else {
            "missing".red()
        };
        println!(
            "  {:<8} {:<40} {}",
            status,
            info.label(),
            info.tool.purpose().dimmed()
        );
    }
    tools.iter().filter(|t| !t.available).count()
}
