use serde::{Deserialize, Serialize};

/// Screen orientation as reported by the platform orientation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenOrientation {
    PortraitUp,
    PortraitDown,
    LandscapeLeft,
    LandscapeRight,
    #[default]
    Unknown,
}

impl ScreenOrientation {
    /// Resolve `Unknown` from the viewport aspect ratio.
    ///
    /// A wider-than-tall viewport is taken as landscape-left; anything else
    /// as portrait-up. Known orientations are returned unchanged.
    pub fn resolve(self, viewport_width: u32, viewport_height: u32) -> Self {
        match self {
            ScreenOrientation::Unknown if viewport_width > viewport_height => {
                ScreenOrientation::LandscapeLeft
            }
            ScreenOrientation::Unknown => ScreenOrientation::PortraitUp,
            known => known,
        }
    }

    pub fn is_landscape(self) -> bool {
        matches!(
            self,
            ScreenOrientation::LandscapeLeft | ScreenOrientation::LandscapeRight
        )
    }
}

impl std::str::FromStr for ScreenOrientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "portrait_up" | "portrait" => Ok(ScreenOrientation::PortraitUp),
            "portrait_down" => Ok(ScreenOrientation::PortraitDown),
            "landscape_left" | "landscape" => Ok(ScreenOrientation::LandscapeLeft),
            "landscape_right" => Ok(ScreenOrientation::LandscapeRight),
            "unknown" => Ok(ScreenOrientation::Unknown),
            other => Err(format!("unknown screen orientation: {other}")),
        }
    }
}

/// One raw reading from a motion sensor.
///
/// For the orientation sensor these are rotation angles around the device
/// Z/X/Y axes; for the angular-rate sensor they are rates (rad/s) around the
/// same axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationSample {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
    #[serde(rename = "timestamp")]
    pub timestamp_secs: f64,
}

impl OrientationSample {
    pub fn new(alpha: f32, beta: f32, gamma: f32, timestamp_secs: f64) -> Self {
        Self {
            alpha,
            beta,
            gamma,
            timestamp_secs,
        }
    }
}
