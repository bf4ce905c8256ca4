//! Device configuration compiled in from device.toml
//!
//! `build.rs` has already validated every value, so the constructors here
//! only fail if the generated file was edited by hand.

use marquee_display::{DisplayError, Panel};

include!(concat!(env!("OUT_DIR"), "/device_config.rs"));

/// Panel description from `[panel]`
pub fn panel() -> Result<Panel, DisplayError> {
    Panel::new(PANEL_WIDTH, PANEL_HEIGHT, PANEL_ADDRESS, PANEL_EXTERNAL_VCC)
}
