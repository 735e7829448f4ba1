//! Mansion configuration file handling

use anyhow::{Context, Result};
use mansion_carousel::CarouselConfig;
use mansion_palette::{BatchOptions, ExtractorConfig, PLACEHOLDER_MARKER};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "mansion.toml";

/// Top-level configuration (mansion.toml)
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct MansionConfig {
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub analysis: ExtractorConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
}

/// Build-time color table generation
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExtractConfig {
    /// Directory scanned for dish photos
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
    /// Where the precomputed table is written
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Table keys are this prefix followed by the file name
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Files whose name contains this are skipped
    #[serde(default = "default_skip_pattern")]
    pub skip_pattern: String,
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("public/dishes")
}

fn default_output() -> PathBuf {
    PathBuf::from("lib/dish-colors.json")
}

fn default_key_prefix() -> String {
    "/dishes/".to_string()
}

fn default_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "webp"]
        .iter()
        .map(|e| e.to_string())
        .collect()
}

fn default_skip_pattern() -> String {
    PLACEHOLDER_MARKER.to_string()
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            images_dir: default_images_dir(),
            output: default_output(),
            key_prefix: default_key_prefix(),
            extensions: default_extensions(),
            skip_pattern: default_skip_pattern(),
        }
    }
}

impl ExtractConfig {
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            images_dir: self.images_dir.clone(),
            key_prefix: self.key_prefix.clone(),
            extensions: self.extensions.clone(),
            skip_pattern: self.skip_pattern.clone(),
        }
    }
}

impl MansionConfig {
    /// Load `mansion.toml` from a directory, or the given file.
    ///
    /// A directory without a config file yields the defaults; an explicitly
    /// named file must exist.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            if path.is_dir() {
                tracing::debug!(
                    "no {} in {}, using defaults",
                    CONFIG_FILE,
                    path.display()
                );
                return Ok(Self::default());
            }
            anyhow::bail!(
                "Config file {} not found. Run `mansion init` to create one.",
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: MansionConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        tracing::debug!("loaded {}", config_path.display());
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

/// Commented `mansion.toml` carrying every default
pub fn default_template() -> &'static str {
    r#"# Mansion configuration
#
# Every key is optional. Removing a key restores the value shown here.

[extract]
# Dish photos scanned by `mansion extract`
images_dir = "public/dishes"
# Precomputed color table read by the menu at runtime
output = "lib/dish-colors.json"
# Table keys are this prefix followed by the file name
key_prefix = "/dishes/"
extensions = ["jpg", "jpeg", "png", "webp"]
# Files whose name contains this are skipped
skip_pattern = "placeholder"

[analysis]
# Changing any of these invalidates a previously generated table
sample_size = 100
pixel_stride = 4
alpha_threshold = 128
quantize_step = 32

[carousel]
# "single-step" moves one dish per gesture, "continuous" follows the wheel
wheel_mode = "single-step"
trackpad_sensitivity = 0.008
mouse_sensitivity = 0.004
continuous_trackpad_sensitivity = 0.006
continuous_mouse_sensitivity = 0.003
trackpad_delta_limit = 50.0
wheel_threshold = 0.8
wheel_carry = 0.5
wheel_cooldown_ms = 50.0
continuous_snap_delay_ms = 150.0

snap_duration_ms = 300.0
# linear, ease-out-cubic, ease-in-out-cubic
snap_easing = "ease-in-out-cubic"

# Drag gain is touch_sensitivity / viewport_height per pixel
touch_sensitivity = 3.5
drag_exponent = 0.9
touch_velocity_scale = 0.05
velocity_smoothing = 0.3
fling_min_velocity = 0.02
fling_max_idle_ms = 100.0
fling_velocity_factor = 0.5
inertia_damping = 0.92
inertia_min_velocity = 0.01

overscroll_resistance = 0.5
max_overscroll = 0.3

render_radius = 2.0
jump_preload_distance = 3

# Right-edge strip reserved for the category index
edge_strip = 0.03
viewport_width = 375.0
viewport_height = 800.0
"#
}

/// Write the default template into `dir`. Refuses to overwrite unless `force`.
pub fn write_default(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    fs::write(&path, default_template())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
