//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/variants/<name>.toml` when `MS_VARIANT=<name>` is set
//! 3. `config/user.toml` (gitignored, user overrides)
//! 4. Environment variables (`MS_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use moonscroll_core::linear_rgb_from_hex;
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Environment variable selecting a variant overlay
pub const VARIANT_ENV: &str = "MS_VARIANT";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Star field configuration
    #[serde(default)]
    pub starfield: StarfieldConfig,
    /// Group node holding the first ring and the cube
    #[serde(default)]
    pub group: GroupConfig,
    /// Torus rings
    #[serde(default = "default_rings")]
    pub rings: Vec<RingConfig>,
    /// Textured cube
    #[serde(default)]
    pub cube: CubeConfig,
    /// Moon sphere
    #[serde(default)]
    pub moon: MoonConfig,
    /// Scene lights
    #[serde(default)]
    pub lights: LightsConfig,
    /// Object animation
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Camera follower selection and tuning
    #[serde(default)]
    pub follower: FollowerConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            starfield: StarfieldConfig::default(),
            group: GroupConfig::default(),
            rings: default_rings(),
            cube: CubeConfig::default(),
            moon: MoonConfig::default(),
            lights: LightsConfig::default(),
            animation: AnimationConfig::default(),
            follower: FollowerConfig::default(),
            rendering: RenderingConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/variants/$MS_VARIANT.toml`
    /// 3. `config/user.toml`
    /// 4. Environment variables (`MS_*`)
    pub fn load() -> Result<Self, ConfigError> {
        let variant = std::env::var(VARIANT_ENV).ok().filter(|v| !v.is_empty());
        Self::load_from("config", variant.as_deref())
    }

    /// Load configuration from a specific config directory
    ///
    /// A named variant must exist under `variants/`.
    pub fn load_from<P: AsRef<Path>>(config_dir: P, variant: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        // Load default config
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Variant overlay
        if let Some(name) = variant {
            let variant_path = config_dir.join("variants").join(format!("{}.toml", name));
            if !variant_path.exists() {
                return Err(ConfigError::new(format!(
                    "unknown variant '{}' ({} not found)",
                    name,
                    variant_path.display()
                )));
            }
            figment = figment.merge(Toml::file(&variant_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // MS_WINDOW__TITLE=Test -> window.title = "Test"
        // MS_VARIANT itself is not a config key
        figment = figment.merge(Env::prefixed("MS_").ignore(&["VARIANT"]).split("__"));

        let config: Self = figment.extract().map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject numeric settings the scene and followers cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let spread = self.starfield.spread;
        if !spread.is_finite() || spread < 0.0 {
            return Err(ConfigError::new(format!(
                "starfield.spread must be finite and non-negative, got {}",
                spread
            )));
        }

        let camera = &self.camera;
        if !(camera.near.is_finite() && camera.far.is_finite() && camera.near > 0.0) {
            return Err(ConfigError::new(format!(
                "camera.near and camera.far must be finite with near > 0, got {} and {}",
                camera.near, camera.far
            )));
        }
        if camera.near >= camera.far {
            return Err(ConfigError::new(format!(
                "camera.near ({}) must be less than camera.far ({})",
                camera.near, camera.far
            )));
        }

        let orbit = &self.follower.orbit;
        for (name, value) in [
            ("min_distance", orbit.min_distance),
            ("max_distance", orbit.max_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::new(format!(
                    "follower.orbit.{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        if orbit.min_distance > orbit.max_distance {
            return Err(ConfigError::new(format!(
                "follower.orbit.min_distance ({}) exceeds max_distance ({})",
                orbit.min_distance, orbit.max_distance
            )));
        }
        if !orbit.damping_factor.is_finite() {
            return Err(ConfigError::new(format!(
                "follower.orbit.damping_factor must be finite, got {}",
                orbit.damping_factor
            )));
        }

        if !self.animation.reference_hz.is_finite() {
            return Err(ConfigError::new(format!(
                "animation.reference_hz must be finite, got {}",
                self.animation.reference_hz
            )));
        }

        Ok(())
    }
}

/// An sRGB colour written as `"#RRGGBB"` (or `"0xRRGGBB"`) in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub u32);

impl HexColor {
    pub const WHITE: Self = Self(0xffffff);
    pub const BLACK: Self = Self(0x000000);

    /// Linear RGB components
    pub fn to_linear(self) -> [f32; 3] {
        linear_rgb_from_hex(self.0)
    }
}

impl std::str::FromStr for HexColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConfigError::new(format!("invalid colour '{}': expected 6 hex digits", s)));
        }
        u32::from_str_radix(digits, 16)
            .map(HexColor)
            .map_err(|e| ConfigError::new(format!("invalid colour '{}': {}", s, e)))
    }
}

impl TryFrom<String> for HexColor {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        format!("#{:06X}", color.0)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Moonscroll".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Starting position [x, y, z]
    pub start_position: [f32; 3],
    /// Starting Euler rotation in radians [x, y, z]
    pub start_rotation: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [-3.0, 0.0, 30.0],
            start_rotation: [0.0, 0.0, 0.0],
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Star field configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarfieldConfig {
    /// Number of stars
    pub count: usize,
    /// Width of the cube the stars are scattered in, centred on the origin
    pub spread: f32,
    /// Star sphere radius
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub color: HexColor,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 250,
            spread: 200.0,
            radius: 0.25,
            width_segments: 32,
            height_segments: 16,
            color: HexColor::WHITE,
        }
    }
}

/// Group node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConfig {
    pub position: [f32; 3],
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            position: [2.0, 0.0, 0.0],
        }
    }
}

/// One torus ring
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    pub radius: f32,
    pub tube: f32,
    pub radial_segments: u32,
    pub tubular_segments: u32,
    pub color: HexColor,
    /// Initial Euler rotation in radians
    pub rotation: [f32; 3],
    /// Rotation added every tick, radians per axis
    pub spin: [f32; 3],
    /// Parent the ring to the group node
    pub in_group: bool,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            radius: 6.0,
            tube: 0.05,
            radial_segments: 8,
            tubular_segments: 8,
            color: HexColor::WHITE,
            rotation: [0.0, 0.0, 0.0],
            spin: [0.001, 0.005, 0.0],
            in_group: true,
        }
    }
}

fn default_rings() -> Vec<RingConfig> {
    vec![RingConfig::default()]
}

/// Cube configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CubeConfig {
    /// Edge length
    pub size: f32,
    /// Colour map image path
    pub texture: Option<String>,
    /// Initial Euler rotation in radians
    pub rotation: [f32; 3],
    /// Rotation added every tick
    pub spin: [f32; 3],
    /// Rotation added on every scroll event
    pub scroll_spin: [f32; 3],
    /// Parent the cube to the group node
    pub in_group: bool,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            size: 5.0,
            texture: Some("assets/cube.png".to_string()),
            rotation: [1.0, 10.0, 0.0],
            spin: [0.0, 0.0, 0.0],
            scroll_spin: [0.05, 0.0, 0.0],
            in_group: true,
        }
    }
}

/// Moon configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoonConfig {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub color: HexColor,
    /// Colour map image path
    pub texture: Option<String>,
    pub position: [f32; 3],
    /// Rotation added every tick
    pub spin: [f32; 3],
    /// Rotation added on every scroll event
    pub scroll_spin: [f32; 3],
    /// Respond to scene lights
    pub lit: bool,
}

impl Default for MoonConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            width_segments: 32,
            height_segments: 32,
            color: HexColor(0xCE65ED),
            texture: Some("assets/moon.jpg".to_string()),
            position: [-15.0, 0.0, 33.0],
            spin: [0.0, -0.0001, 0.0],
            scroll_spin: [0.025, 0.025, 0.025],
            lit: true,
        }
    }
}

/// Light configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightsConfig {
    pub point_position: [f32; 3],
    pub point_color: HexColor,
    pub point_intensity: f32,
    pub ambient_color: HexColor,
    pub ambient_intensity: f32,
}

impl Default for LightsConfig {
    fn default() -> Self {
        Self {
            point_position: [13.0, 5.0, 15.0],
            point_color: HexColor::WHITE,
            point_intensity: 1.5,
            ambient_color: HexColor::WHITE,
            ambient_intensity: 0.15,
        }
    }
}

/// How per-tick spin is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationModeKind {
    /// The configured spin every tick, whatever the frame rate
    PerTick,
    /// The configured spin scaled by elapsed time
    TimeScaled,
}

/// Animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub rotation_mode: RotationModeKind,
    /// Frame rate at which time-scaled spin matches per-tick spin
    pub reference_hz: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            rotation_mode: RotationModeKind::PerTick,
            reference_hz: 60.0,
        }
    }
}

/// Camera positioning source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowerMode {
    /// Camera follows the page scroll offset
    Scroll,
    /// Camera orbits a target under pointer drag
    Orbit,
}

/// Camera follower configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowerConfig {
    pub mode: FollowerMode,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub orbit: OrbitConfig,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            mode: FollowerMode::Scroll,
            scroll: ScrollConfig::default(),
            orbit: OrbitConfig::default(),
        }
    }
}

/// Scroll follower configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Camera Z per unit of scroll
    pub k_z: f32,
    /// Camera X per unit of scroll
    pub k_x: f32,
    /// Camera yaw per unit of scroll
    pub k_r: f32,
    /// Camera position at scroll offset 0
    pub base_position: [f32; 3],
    /// Camera rotation at scroll offset 0
    pub base_rotation: [f32; 3],
    /// Height of the virtual page in pixels
    pub page_height: f32,
    /// Pixels scrolled per wheel line
    pub line_height: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            k_z: -0.01,
            k_x: -0.0002,
            k_r: -0.0002,
            base_position: [0.0, 0.0, 0.0],
            base_rotation: [0.0, 0.0, 0.0],
            page_height: 6000.0,
            line_height: 50.0,
        }
    }
}

/// Orbit controls configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub target: [f32; 3],
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            target: [0.0, 0.0, 0.0],
            min_distance: 25.0,
            max_distance: 25.0,
            damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Background image path
    pub background_texture: Option<String>,
    /// Colour shown where no background is drawn
    pub clear_color: HexColor,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_texture: Some("assets/space.jpg".to_string()),
            clear_color: HexColor::BLACK,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.starfield.count, 250);
        assert_eq!(config.rings.len(), 1);
        assert_eq!(config.follower.mode, FollowerMode::Scroll);
        assert_eq!(config.animation.rotation_mode, RotationModeKind::PerTick);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unusable_numbers() {
        let mut config = AppConfig::default();
        config.follower.orbit.min_distance = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.starfield.spread = f32::INFINITY;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.follower.orbit.max_distance = -1.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.camera.near = config.camera.far;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.follower.orbit.min_distance = 10.0;
        config.follower.orbit.max_distance = 100.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("[[rings]]"));
        assert!(toml.contains("color = \"#CE65ED\""));
    }

    #[test]
    fn test_hex_color_parsing() {
        assert_eq!("#CE65ED".parse::<HexColor>().unwrap(), HexColor(0xCE65ED));
        assert_eq!("0xffffff".parse::<HexColor>().unwrap(), HexColor::WHITE);
        assert_eq!("474747".parse::<HexColor>().unwrap(), HexColor(0x474747));
        assert!("#fff".parse::<HexColor>().is_err());
        assert!("#GGGGGG".parse::<HexColor>().is_err());
        assert!("#+12345".parse::<HexColor>().is_err());
        assert!("-12345".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = toml::from_str(
            r##"
            [follower]
            mode = "orbit"

            [follower.orbit]
            min_distance = 10.0
            max_distance = 100.0

            [[rings]]
            color = "#474747"
            in_group = false
            "##,
        )
        .unwrap();

        assert_eq!(config.follower.mode, FollowerMode::Orbit);
        assert_eq!(config.follower.orbit.min_distance, 10.0);
        assert!(config.follower.orbit.damping);
        assert_eq!(config.rings[0].radius, 6.0);
        assert_eq!(config.rings[0].color, HexColor(0x474747));
        assert!(!config.rings[0].in_group);
        assert_eq!(config.moon.radius, 10.0);
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str(
            r##"
            [moon]
            radius = 10.0
            width_segments = 32
            height_segments = 32
            color = "purple"
            position = [0.0, 0.0, 0.0]
            spin = [0.0, 0.0, 0.0]
            scroll_spin = [0.0, 0.0, 0.0]
            lit = true
            "##,
        );
        assert!(result.is_err());
    }
}
