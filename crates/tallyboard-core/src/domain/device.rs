//! Output devices and stored-name resolution.
//!
//! Audio subsystems report product names such as
//! `"Speakers (Realtek High Definition Audio)"`.  The parenthetical part
//! changes with drivers and is not stable across machines, so the settings
//! file stores only the part before `" ("`.

/// Marker that starts the unstable parenthetical suffix of a product name.
const SUFFIX_MARKER: &str = " (";

/// An audio output device as listed by the audio subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDevice {
    name: String,
}

impl OutputDevice {
    /// Creates a device from a raw product name, stripping any `" (...)"` suffix.
    pub fn new(product_name: &str) -> Self {
        let name = product_name
            .split(SUFFIX_MARKER)
            .next()
            .unwrap_or_default()
            .to_string();
        Self { name }
    }

    /// Display name without the parenthetical suffix.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for OutputDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Resolves a stored device name to its index in `devices`.
///
/// The match is exact and case-sensitive.  A missing or empty name, or a
/// name that is not in the list, resolves to `0` (the first device).
pub fn resolve_device_index(devices: &[OutputDevice], stored_name: Option<&str>) -> usize {
    match stored_name {
        Some(name) if !name.is_empty() => devices
            .iter()
            .position(|device| device.name() == name)
            .unwrap_or(0),
        _ => 0,
    }
}

/// Name of the device at `index`, or `None` when the index is out of range.
pub fn device_name_at(devices: &[OutputDevice], index: usize) -> Option<&str> {
    devices.get(index).map(OutputDevice::name)
}
