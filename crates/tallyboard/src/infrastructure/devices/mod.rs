//! Output device enumeration.
//!
//! Real enumeration needs the platform audio API, which is outside this
//! crate.  [`StaticDeviceDirectory`] serves a fixed list of product names,
//! supplied on the command line or by a test, and strips their
//! parenthetical suffixes the same way a live enumeration would.

use tallyboard_core::OutputDevice;

use crate::application::ports::DeviceDirectory;

/// Name reported for the single device of an otherwise empty directory.
pub const DEFAULT_DEVICE_NAME: &str = "Default Output Device";

/// A device directory backed by a fixed list of product names.
#[derive(Debug, Clone, Default)]
pub struct StaticDeviceDirectory {
    product_names: Vec<String>,
}

impl StaticDeviceDirectory {
    pub fn new<I, S>(product_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            product_names: product_names.into_iter().map(Into::into).collect(),
        }
    }
}

impl DeviceDirectory for StaticDeviceDirectory {
    fn list_devices(&self) -> Vec<OutputDevice> {
        self.product_names
            .iter()
            .map(|name| OutputDevice::new(name))
            .collect()
    }
}
