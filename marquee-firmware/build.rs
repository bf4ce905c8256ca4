//! Build script for marquee-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml at compile time
//! - Emits the validated configuration as Rust constants
//! - Checks that the CYW43 firmware blobs are present

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use marquee_core::config::{ConfigError, DeviceConfig};

const CYW43_BLOBS: [&str; 2] = ["cyw43-firmware/43439A0.bin", "cyw43-firmware/43439A0_clm.bin"];

fn main() {
    setup_linker();
    check_wifi_blobs();
    let config = validate_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// The radio firmware is not redistributed with the sources
fn check_wifi_blobs() {
    let missing: Vec<_> = CYW43_BLOBS
        .iter()
        .filter(|blob| {
            println!("cargo:rerun-if-changed={}", blob);
            !Path::new(blob).exists()
        })
        .collect();

    if !missing.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: CYW43439 firmware not found!                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ║                                                                  ║\n\
            ║  Copy them from embassy-rs/embassy, cyw43-firmware/.             ║\n\
            ║  See cyw43-firmware/README.md.                                   ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            missing
                .iter()
                .map(|m| format!("║  • {:<62} ║", m))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

/// Validate device.toml at compile time
fn validate_config() -> DeviceConfig {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a device.toml configuration file with     ║\n\
            ║  at least [wifi] ssid. Create one in the marquee-firmware        ║\n\
            ║  directory.                                                      ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Syntax and types in one pass; unknown keys are ignored
    let config: DeviceConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid device.toml                                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml failed validation                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(describe(e))
        );
    }

    println!("cargo:warning=device.toml validated successfully");
    config
}

fn describe(error: ConfigError) -> &'static str {
    match error {
        ConfigError::EmptySsid => "[wifi] ssid must not be empty",
        ConfigError::InvalidPassword => "[wifi] password must be empty (open) or 8-63 characters",
        ConfigError::NoConnectAttempts => "[wifi] connect_attempts must be at least 1",
        ConfigError::ZeroPort => "[server] port must not be 0",
        ConfigError::InvalidGeometry => {
            "[panel] width must be 1-128, height 8-64 and a multiple of 8"
        }
        ConfigError::InvalidAddress => "[panel] address must be a 7-bit I2C address",
        ConfigError::EmptyDefaultText => "[message] default_text must not be empty",
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the configuration as constants to OUT_DIR/device_config.rs
fn generate_config(config: &DeviceConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("device_config.rs")).unwrap();

    let wifi = &config.wifi;
    let server = &config.server;
    let panel = &config.panel;
    let message = &config.message;

    writeln!(f, "// Generated from device.toml by build.rs").unwrap();
    writeln!(f, "pub const WIFI_SSID: &str = {:?};", wifi.ssid.as_str()).unwrap();
    writeln!(f, "pub const WIFI_PASSWORD: &str = {:?};", wifi.password.as_str()).unwrap();
    writeln!(f, "pub const CONNECT_ATTEMPTS: u8 = {};", wifi.connect_attempts).unwrap();
    writeln!(f, "pub const RETRY_INTERVAL_MS: u64 = {};", wifi.retry_interval_ms).unwrap();
    writeln!(f, "pub const SERVER_PORT: u16 = {};", server.port).unwrap();
    writeln!(f, "pub const READ_TIMEOUT_MS: u64 = {};", server.read_timeout_ms).unwrap();
    writeln!(f, "pub const PANEL_WIDTH: u16 = {};", panel.width).unwrap();
    writeln!(f, "pub const PANEL_HEIGHT: u16 = {};", panel.height).unwrap();
    writeln!(f, "pub const PANEL_ADDRESS: u8 = {:#04x};", panel.address).unwrap();
    writeln!(f, "pub const PANEL_EXTERNAL_VCC: bool = {};", panel.external_vcc).unwrap();
    writeln!(
        f,
        "pub const DEFAULT_TEXT: &str = {:?};",
        message.default_text.as_str()
    )
    .unwrap();
    writeln!(f, "pub const IP_DISPLAY_MS: u64 = {};", message.ip_display_ms).unwrap();
}
