//! Configuration module for Flow Canvas
//!
//! Editor preferences are stored as TOML in the platform-appropriate data
//! directory under `dev.flowcanvas.editor`:
//!
//! - **Linux**: `~/.local/share/dev.flowcanvas.editor/editor.toml`
//! - **macOS**: `~/Library/Application Support/dev.flowcanvas.editor/editor.toml`
//! - **Windows**: `%APPDATA%\dev.flowcanvas.editor\editor.toml`
//!
//! Every field has a default, so a partial or missing file still loads.
//!
//! ```toml
//! [canvas]
//! zoom_step = 0.1
//! handle_tolerance = 10.0
//! show_grid = true
//! grid_spacing = 24.0
//!
//! [node]
//! width = 220.0
//! height = 80.0
//!
//! [simulation]
//! step_interval_ms = 800
//!
//! [ui]
//! dark_mode = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FlowCanvasError, Result};
use crate::geometry::{NodeMetrics, DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH};
use crate::interaction::DEFAULT_HANDLE_TOLERANCE;
use crate::simulation::DEFAULT_STEP_INTERVAL;

/// Application identifier for data directories
pub const APP_ID: &str = "dev.flowcanvas.editor";

/// Editor config filename
pub const CONFIG_FILE: &str = "editor.toml";

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        FlowCanvasError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            FlowCanvasError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the editor config file
pub fn config_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(CONFIG_FILE))
}

// ==================== Editor Config ====================

/// Persistent editor preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,

    #[serde(default)]
    pub node: NodeConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub ui: UiPreferences,
}

impl EditorConfig {
    /// Load the config from the default location
    pub fn load() -> Result<Self> {
        let path = config_path().ok_or_else(|| {
            FlowCanvasError::Config("Could not determine config path".to_string())
        })?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load the config, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load editor config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save the config to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(dir.join(CONFIG_FILE))
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| FlowCanvasError::Config(format!("Failed to read config: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| FlowCanvasError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FlowCanvasError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| FlowCanvasError::Config(format!("Failed to write config: {}", e)))
    }

    /// Node dimensions used by geometry and hit-testing.
    pub fn metrics(&self) -> NodeMetrics {
        NodeMetrics {
            width: self.node.width,
            height: self.node.height,
            ..NodeMetrics::default()
        }
    }
}

/// Canvas navigation and drawing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Zoom change per toolbar click
    pub zoom_step: f32,

    /// Handle grab radius in screen pixels
    pub handle_tolerance: f32,

    /// Draw the background grid
    pub show_grid: bool,

    /// Grid spacing in canvas units
    pub grid_spacing: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            zoom_step: 0.1,
            handle_tolerance: DEFAULT_HANDLE_TOLERANCE,
            show_grid: true,
            grid_spacing: 24.0,
        }
    }
}

/// Node box dimensions in canvas units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_NODE_WIDTH,
            height: DEFAULT_NODE_HEIGHT,
        }
    }
}

/// Simulation pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Time each node spends in the processing state
    pub step_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: DEFAULT_STEP_INTERVAL.as_millis() as u64,
        }
    }
}

impl SimulationConfig {
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}

/// UI preferences that persist across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPreferences {
    /// Dark mode enabled
    pub dark_mode: bool,

    /// Blueprint loaded most recently, restored on startup
    pub last_blueprint: Option<String>,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            last_blueprint: None,
        }
    }
}
