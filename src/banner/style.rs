//! Banner size presets and the derived inline style.

use crate::banner::contrast::text_color_for;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size selector of the banner generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl BannerSize {
    /// Map a selector value to a size. Anything unrecognized is `Medium`.
    pub fn from_selector(value: &str) -> Self {
        match value.trim() {
            "small" => BannerSize::Small,
            "large" => BannerSize::Large,
            _ => BannerSize::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BannerSize::Small => "small",
            BannerSize::Medium => "medium",
            BannerSize::Large => "large",
        }
    }

    /// Fixed padding / font-size / icon-size tuple for this size.
    pub fn metrics(&self) -> SizeMetrics {
        match self {
            BannerSize::Small => SizeMetrics {
                padding: "8px 16px",
                font_size: "14px",
                icon_size: "18px",
            },
            BannerSize::Large => SizeMetrics {
                padding: "16px 24px",
                font_size: "18px",
                icon_size: "22px",
            },
            BannerSize::Medium => SizeMetrics {
                padding: "12px 20px",
                font_size: "16px",
                icon_size: "20px",
            },
        }
    }
}

impl fmt::Display for BannerSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeMetrics {
    pub padding: &'static str,
    pub font_size: &'static str,
    pub icon_size: &'static str,
}

/// User-chosen banner settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerConfig {
    pub size: BannerSize,
    /// Background as `#RRGGBB`
    pub color: String,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            size: BannerSize::Medium,
            color: "#4F46E5".to_string(),
        }
    }
}

/// Computed appearance of the banner preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerStyle {
    pub padding: &'static str,
    pub font_size: &'static str,
    pub icon_size: &'static str,
    pub background_color: String,
    pub text_color: &'static str,
}

impl BannerStyle {
    pub fn resolve(config: &BannerConfig) -> Self {
        let metrics = config.size.metrics();
        Self {
            padding: metrics.padding,
            font_size: metrics.font_size,
            icon_size: metrics.icon_size,
            background_color: config.color.clone(),
            text_color: text_color_for(&config.color),
        }
    }

    /// Inline style for the banner container.
    pub fn container_css(&self) -> String {
        format!(
            "padding: {}; font-size: {}; background-color: {}; color: {};",
            self.padding, self.font_size, self.background_color, self.text_color
        )
    }

    /// Inline style for the banner icon.
    pub fn icon_css(&self) -> String {
        format!("font-size: {};", self.icon_size)
    }
}
