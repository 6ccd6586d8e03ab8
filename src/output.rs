// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (no headers), and JSON output modes.

use crate::state::Container;
use crate::types::PortMapping;
use serde::Serialize;
use std::time::Instant;

const COLUMN_WIDTH: usize = 10;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with headers and progress messages
    Normal,
    /// Bare data only, for piping into other tools
    Quiet,
    /// JSON for scripting
    Json,
}

impl OutputMode {
    pub fn from_flags(quiet: bool, json: bool) -> Self {
        if json {
            OutputMode::Json
        } else if quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Print a progress message (only in normal mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print the outcome of a finished operation.
    ///
    /// Normal mode prints `message` with timing, JSON mode prints `report`
    /// as one document, quiet mode prints nothing.
    pub fn finished<T: Serialize>(&self, message: &str, report: &T) {
        if let Some(line) = self.finished_line(message, report) {
            println!("{line}");
        }
    }

    fn finished_line<T: Serialize>(&self, message: &str, report: &T) -> Option<String> {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    Some(format!("{message} ({:.1}s)", elapsed))
                } else {
                    Some(message.to_string())
                }
            }
            OutputMode::Quiet => None,
            OutputMode::Json => serde_json::to_string(report).ok(),
        }
    }

    /// Print an error message on a single line.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "error",
                    message,
                    duration_secs: self.start_time.map(|_| self.elapsed_secs()),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }

    /// Print one container ID per line.
    pub fn container_ids(&self, containers: &[Container]) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                for container in containers {
                    println!("{}", container.id);
                }
            }
            OutputMode::Json => {
                let ids: Vec<&str> = containers.iter().map(|c| c.id.as_str()).collect();
                print_json(&ids);
            }
        }
    }

    /// Print port pairs as a right-aligned table.
    pub fn port_table(&self, ports: &[PortMapping]) {
        match self.mode {
            OutputMode::Normal => {
                println!("{}", port_header());
                for port in ports {
                    println!("{}", port_row(port));
                }
            }
            OutputMode::Quiet => {
                for port in ports {
                    println!("{}", port_row(port));
                }
            }
            OutputMode::Json => print_json(&ports),
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        println!("{json}");
    }
}

pub fn port_header() -> String {
    format!(
        "{:>width$} {:>width$}",
        "host_port",
        "guest_port",
        width = COLUMN_WIDTH
    )
}

pub fn port_row(port: &PortMapping) -> String {
    format!(
        "{:>width$} {:>width$}",
        port.host_port,
        port.guest_port,
        width = COLUMN_WIDTH
    )
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}
