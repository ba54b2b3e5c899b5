use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse TOML in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_fps")]
    pub fps: usize,
    // --- Side bar ---
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: usize,
    #[serde(default = "default_row_height")]
    pub row_height: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            sidebar_width: default_sidebar_width(),
            row_height: default_row_height(),
        }
    }
}

fn default_width() -> usize {
    1600
}
fn default_height() -> usize {
    900
}
fn default_fps() -> usize {
    60
}
fn default_sidebar_width() -> usize {
    300
}
fn default_row_height() -> usize {
    25
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    // --- Projection ---
    /// Horizontal field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,

    // --- Orbit ---
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
    #[serde(default = "default_distance")]
    pub distance: f32,
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    #[serde(default = "default_pitch_margin")]
    pub pitch_margin: f32,

    // --- Controls ---
    /// Radians per frame while an arrow key is held.
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
    #[serde(default = "default_zoom_speed")]
    pub zoom_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
            yaw: 0.0,
            pitch: 0.0,
            distance: default_distance(),
            min_distance: default_min_distance(),
            pitch_margin: default_pitch_margin(),
            rotation_speed: default_rotation_speed(),
            zoom_speed: default_zoom_speed(),
        }
    }
}

fn default_fov() -> f32 {
    60.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}
fn default_distance() -> f32 {
    10.0
}
fn default_min_distance() -> f32 {
    2.0
}
fn default_pitch_margin() -> f32 {
    0.1
}
fn default_rotation_speed() -> f32 {
    0.01
}
fn default_zoom_speed() -> f32 {
    0.2
}

#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_resources")]
    pub resources: String,
    /// File loaded at start-up; the first library entry when unset.
    #[serde(default)]
    pub path: Option<String>,
    /// Yaw applied to every model once at load time, in degrees.
    #[serde(default = "default_initial_yaw")]
    pub initial_yaw: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            resources: default_resources(),
            path: None,
            initial_yaw: default_initial_yaw(),
        }
    }
}

fn default_resources() -> String {
    "resources".to_string()
}
fn default_initial_yaw() -> f32 {
    -45.0
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_mode")]
    pub mode: String, // "wireframe", "solid"
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    #[serde(default = "default_mesh_color")]
    pub mesh_color: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            output: default_output(),
            background: default_background(),
            mesh_color: default_mesh_color(),
        }
    }
}

fn default_mode() -> String {
    "wireframe".to_string()
}
fn default_output() -> String {
    "output.png".to_string()
}
fn default_background() -> [u8; 3] {
    [47, 79, 79]
}
fn default_mesh_color() -> [u8; 3] {
    [255, 165, 0]
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the projection or the orbit cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".into()));
        }
        if self.window.sidebar_width >= self.window.width {
            return Err(ConfigError::Invalid(format!(
                "sidebar_width {} leaves no room in a {} px window",
                self.window.sidebar_width, self.window.width
            )));
        }
        if !(camera.fov > 0.0 && camera.fov < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov must be between 0 and 180 degrees, got {}",
                camera.fov
            )));
        }
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(ConfigError::Invalid(format!(
                "expected 0 < near < far, got near = {}, far = {}",
                camera.near, camera.far
            )));
        }
        if camera.min_distance <= 0.0 {
            return Err(ConfigError::Invalid("min_distance must be positive".into()));
        }
        if !(camera.pitch_margin > 0.0 && camera.pitch_margin < std::f32::consts::FRAC_PI_2) {
            return Err(ConfigError::Invalid(format!(
                "pitch_margin must be inside (0, pi/2), got {}",
                camera.pitch_margin
            )));
        }
        Ok(())
    }
}
