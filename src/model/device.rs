//! Simulated device profiles

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the fixed device profiles every page is scanned under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Desktop,
    Tablet,
    Mobile,
}

/// Screen geometry of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Full static description of a device, as used by screenshot collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    pub viewport: Viewport,
    pub device_scale_factor: u8,
    pub is_mobile: bool,
    pub user_agent: &'static str,
}

const DESKTOP: DeviceProfile = DeviceProfile {
    viewport: Viewport {
        width: 1920,
        height: 1080,
    },
    device_scale_factor: 1,
    is_mobile: false,
    user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
};

const TABLET: DeviceProfile = DeviceProfile {
    viewport: Viewport {
        width: 768,
        height: 1024,
    },
    device_scale_factor: 2,
    is_mobile: true,
    user_agent: "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1",
};

const MOBILE: DeviceProfile = DeviceProfile {
    viewport: Viewport {
        width: 375,
        height: 812,
    },
    device_scale_factor: 3,
    is_mobile: true,
    user_agent: "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1",
};

impl Device {
    /// All devices in scan order
    pub const ALL: [Device; 3] = [Device::Desktop, Device::Tablet, Device::Mobile];

    pub fn profile(&self) -> &'static DeviceProfile {
        match self {
            Self::Desktop => &DESKTOP,
            Self::Tablet => &TABLET,
            Self::Mobile => &MOBILE,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.profile().viewport
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
            Self::Mobile => "mobile",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "desktop" => Some(Self::Desktop),
            "tablet" => Some(Self::Tablet),
            "mobile" => Some(Self::Mobile),
            _ => None,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
