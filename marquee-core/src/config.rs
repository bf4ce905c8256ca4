//! Device configuration
//!
//! Read from `device.toml` by the firmware build script, validated there,
//! and compiled into the image. Missing sections and fields take the
//! defaults below.

use heapless::String;

#[cfg(any(test, feature = "serde"))]
use serde::{Deserialize, Serialize};

use marquee_display::{DisplayError, Panel};

/// Maximum SSID length (802.11)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WPA2 passphrase length
pub const MAX_PASSWORD_LEN: usize = 63;

/// Minimum WPA2 passphrase length; an empty password means an open network
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum length of the fallback message
pub const MAX_DEFAULT_TEXT_LEN: usize = 64;

/// Message shown when nothing has been saved yet
pub const DEFAULT_MESSAGE: &str = "Hello Wi-Fi!";

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `wifi.ssid` is empty
    EmptySsid,
    /// `wifi.password` is neither empty nor 8 to 63 characters
    InvalidPassword,
    /// `wifi.connect_attempts` is zero
    NoConnectAttempts,
    /// `server.port` is zero
    ZeroPort,
    /// `panel.width` / `panel.height` not supported
    InvalidGeometry,
    /// `panel.address` does not fit in 7 bits
    InvalidAddress,
    /// `message.default_text` is empty
    EmptyDefaultText,
}

impl From<DisplayError> for ConfigError {
    fn from(e: DisplayError) -> Self {
        match e {
            DisplayError::InvalidAddress => ConfigError::InvalidAddress,
            _ => ConfigError::InvalidGeometry,
        }
    }
}

/// Wi-Fi station settings
// no defmt::Format: holds the passphrase
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(Serialize, Deserialize), serde(default))]
pub struct WifiConfig {
    pub ssid: String<MAX_SSID_LEN>,
    pub password: String<MAX_PASSWORD_LEN>,
    /// Join polls before giving up
    pub connect_attempts: u8,
    /// Delay between join polls
    pub retry_interval_ms: u32,
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self {
            ssid: String::new(),
            password: String::new(),
            connect_attempts: 20,
            retry_interval_ms: 500,
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(any(test, feature = "serde"), derive(Serialize, Deserialize), serde(default))]
pub struct ServerConfig {
    pub port: u16,
    /// Idle time after which a half-sent request is abandoned
    pub read_timeout_ms: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 80,
            read_timeout_ms: 5_000,
        }
    }
}

/// OLED panel settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(any(test, feature = "serde"), derive(Serialize, Deserialize), serde(default))]
pub struct PanelConfig {
    pub width: u16,
    pub height: u16,
    /// 7-bit I2C address
    pub address: u8,
    /// Panel powered from an external VCC instead of the charge pump
    pub external_vcc: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
            address: marquee_display::panel::DEFAULT_ADDRESS,
            external_vcc: false,
        }
    }
}

impl PanelConfig {
    /// Build the validated panel description
    pub fn to_panel(&self) -> Result<Panel, DisplayError> {
        Panel::new(self.width, self.height, self.address, self.external_vcc)
    }
}

/// Message settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(any(test, feature = "serde"), derive(Serialize, Deserialize), serde(default))]
pub struct MessageConfig {
    /// Shown when no message has been saved
    pub default_text: String<MAX_DEFAULT_TEXT_LEN>,
    /// How long the IP address stays on screen after joining
    pub ip_display_ms: u32,
}

impl Default for MessageConfig {
    fn default() -> Self {
        let mut default_text = String::new();
        let _ = default_text.push_str(DEFAULT_MESSAGE);
        Self {
            default_text,
            ip_display_ms: 2_000,
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(any(test, feature = "serde"), derive(Serialize, Deserialize), serde(default))]
pub struct DeviceConfig {
    pub wifi: WifiConfig,
    pub server: ServerConfig,
    pub panel: PanelConfig,
    pub message: MessageConfig,
}

impl DeviceConfig {
    /// Check every field; returns the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wifi.ssid.is_empty() {
            return Err(ConfigError::EmptySsid);
        }
        let password_len = self.wifi.password.len();
        if password_len != 0 && password_len < MIN_PASSWORD_LEN {
            return Err(ConfigError::InvalidPassword);
        }
        if self.wifi.connect_attempts == 0 {
            return Err(ConfigError::NoConnectAttempts);
        }
        if self.server.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        self.panel.to_panel()?;
        if self.message.default_text.is_empty() {
            return Err(ConfigError::EmptyDefaultText);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> DeviceConfig {
        let mut config = DeviceConfig::default();
        let _ = config.wifi.ssid.push_str("workshop");
        let _ = config.wifi.password.push_str("correct horse");
        config
    }

    #[test]
    fn test_defaults() {
        let config = DeviceConfig::default();
        assert_eq!(config.wifi.connect_attempts, 20);
        assert_eq!(config.wifi.retry_interval_ms, 500);
        assert_eq!(config.server.port, 80);
        assert_eq!(config.panel.width, 128);
        assert_eq!(config.panel.height, 64);
        assert_eq!(config.panel.address, 0x3C);
        assert_eq!(config.message.default_text.as_str(), "Hello Wi-Fi!");
        assert_eq!(config.message.ip_display_ms, 2_000);
    }

    #[test]
    fn test_default_needs_ssid() {
        assert_eq!(DeviceConfig::default().validate(), Err(ConfigError::EmptySsid));
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn test_password_rules() {
        let mut config = valid();
        config.wifi.password.clear();
        assert_eq!(config.validate(), Ok(()));

        let _ = config.wifi.password.push_str("short");
        assert_eq!(config.validate(), Err(ConfigError::InvalidPassword));
    }

    #[test]
    fn test_zero_port() {
        let mut config = valid();
        config.server.port = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroPort));
    }

    #[test]
    fn test_zero_attempts() {
        let mut config = valid();
        config.wifi.connect_attempts = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoConnectAttempts));
    }

    #[test]
    fn test_bad_geometry() {
        let mut config = valid();
        config.panel.height = 60;
        assert_eq!(config.validate(), Err(ConfigError::InvalidGeometry));

        config.panel.height = 64;
        config.panel.width = 200;
        assert_eq!(config.validate(), Err(ConfigError::InvalidGeometry));
    }

    #[test]
    fn test_bad_address() {
        let mut config = valid();
        config.panel.address = 0x80;
        assert_eq!(config.validate(), Err(ConfigError::InvalidAddress));
    }

    #[test]
    fn test_empty_default_text() {
        let mut config = valid();
        config.message.default_text.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyDefaultText));
    }

    #[test]
    fn test_panel_config_to_panel() {
        let panel = PanelConfig {
            width: 128,
            height: 32,
            address: 0x3D,
            external_vcc: true,
        }
        .to_panel()
        .unwrap();
        assert_eq!(panel.pages(), 4);
        assert_eq!(panel.address(), 0x3D);
        assert!(panel.external_vcc());
    }

    mod toml_parsing {
        use super::*;

        #[test]
        fn test_full_file() {
            let config: DeviceConfig = toml::from_str(
                r#"
                [wifi]
                ssid = "workshop"
                password = "correct horse"
                connect_attempts = 10
                retry_interval_ms = 250

                [server]
                port = 8080

                [panel]
                width = 128
                height = 32
                address = 0x3D

                [message]
                default_text = "Ready"
                "#,
            )
            .unwrap();

            assert_eq!(config.wifi.ssid.as_str(), "workshop");
            assert_eq!(config.wifi.connect_attempts, 10);
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.server.read_timeout_ms, 5_000);
            assert_eq!(config.panel.height, 32);
            assert_eq!(config.panel.address, 0x3D);
            assert!(!config.panel.external_vcc);
            assert_eq!(config.message.default_text.as_str(), "Ready");
            assert_eq!(config.message.ip_display_ms, 2_000);
            assert_eq!(config.validate(), Ok(()));
        }

        #[test]
        fn test_missing_sections_use_defaults() {
            let config: DeviceConfig = toml::from_str("[wifi]\nssid = \"x\"\n").unwrap();
            assert_eq!(config.server, ServerConfig::default());
            assert_eq!(config.panel, PanelConfig::default());
            assert_eq!(config.validate(), Ok(()));
        }

        #[test]
        fn test_oversized_ssid_rejected() {
            let raw = format!("[wifi]\nssid = \"{}\"\n", "s".repeat(MAX_SSID_LEN + 1));
            assert!(toml::from_str::<DeviceConfig>(&raw).is_err());
        }
    }
}
