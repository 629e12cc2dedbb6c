//! Engine configuration
//!
//! Every field is optional in TOML; missing ones take the defaults used by
//! the diagram renderer.
//!
//! ```toml
//! corner_radius = 8.0
//! include_related = true
//!
//! [layout]
//! direction = "right"
//! spacing_between_layers = 60.0
//!
//! [canvas]
//! margin = 20.0
//! ```

use std::path::{Path, PathBuf};

use roadmap_graph::{CanvasMargins, CanvasSizer, GraphBuilder, LayoutOptions, PathSmoother};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config at {path}: {source}")]
    Read {
        /// Path that was tried
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed but out of range
    #[error("invalid config value {field}: {reason}")]
    Invalid {
        /// Dotted field name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Settings for one render pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Options handed to the layout engine
    pub layout: LayoutOptions,
    /// Corner radius for edge paths
    pub corner_radius: f64,
    /// Border around the laid-out graph
    pub canvas: CanvasMargins,
    /// Draw related fields off the end of the spine
    pub include_related: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            corner_radius: 12.0,
            canvas: CanvasMargins::default(),
            include_related: false,
        }
    }
}

impl EngineConfig {
    /// Parse configuration from a TOML string
    ///
    /// # Errors
    /// [`ConfigError::Parse`] or [`ConfigError::Invalid`].
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    ///
    /// # Errors
    /// [`ConfigError::Read`] if the file cannot be read, otherwise as
    /// [`EngineConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded engine config");
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("corner_radius", self.corner_radius),
            ("canvas.margin", self.canvas.margin),
            ("canvas.padding", self.canvas.padding),
            ("layout.padding", self.layout.padding),
            ("layout.spacing_between_layers", self.layout.spacing_between_layers),
            ("layout.spacing_node_node", self.layout.spacing_node_node),
        ];
        for (field, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a non-negative number, got {value}"),
                });
            }
        }

        let sizes = &self.layout.node_sizes;
        let extents = [
            ("layout.node_sizes.phase", sizes.phase),
            ("layout.node_sizes.topic", sizes.topic),
            ("layout.node_sizes.option", sizes.option),
            ("layout.node_sizes.checkpoint", sizes.checkpoint),
            ("layout.node_sizes.extra", sizes.extra),
            ("layout.node_sizes.related", sizes.related),
        ];
        for (field, size) in extents {
            for value in [size.width, size.height] {
                if !value.is_finite() || value <= 0.0 {
                    return Err(ConfigError::Invalid {
                        field,
                        reason: format!("width and height must be positive, got {value}"),
                    });
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn graph_builder(&self) -> GraphBuilder {
        GraphBuilder::new().with_related(self.include_related)
    }

    #[must_use]
    pub fn canvas_sizer(&self) -> CanvasSizer {
        CanvasSizer::new(self.canvas)
    }

    #[must_use]
    pub fn path_smoother(&self) -> PathSmoother {
        PathSmoother::new(self.corner_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadmap_graph::Direction;
    use std::io::Write;

    #[test]
    fn empty_toml_is_the_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            corner_radius = 8.0
            include_related = true

            [layout]
            direction = "right"

            [canvas]
            margin = 20.0
            "#,
        )
        .unwrap();

        assert_eq!(config.corner_radius, 8.0);
        assert!(config.include_related);
        assert_eq!(config.layout.direction, Direction::Right);
        assert_eq!(config.layout.spacing_node_node, 50.0);
        assert_eq!(config.canvas.margin, 20.0);
        assert_eq!(config.canvas.padding, 40.0);
    }

    #[test]
    fn negative_lengths_are_rejected() {
        let err = EngineConfig::from_toml_str("corner_radius = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "corner_radius", .. }));
    }

    fn sized(kind: &str, width: &str, height: &str) -> Result<EngineConfig, ConfigError> {
        EngineConfig::from_toml_str(&format!(
            "[layout.node_sizes.{kind}]\nwidth = {width}\nheight = {height}"
        ))
    }

    #[test]
    fn node_sizes_must_be_finite() {
        let negative = sized("topic", "-500.0", "50.0").unwrap_err();
        assert!(matches!(negative, ConfigError::Invalid { field: "layout.node_sizes.topic", .. }));

        let nan = sized("option", "nan", "40.0").unwrap_err();
        assert!(matches!(nan, ConfigError::Invalid { field: "layout.node_sizes.option", .. }));

        let zero = sized("phase", "300.0", "0.0").unwrap_err();
        assert!(matches!(zero, ConfigError::Invalid { field: "layout.node_sizes.phase", .. }));

        let wider = sized("topic", "200.0", "60.0").unwrap();
        assert_eq!(wider.layout.node_sizes.topic.width, 200.0);
    }

    #[test]
    fn unknown_enum_value_is_a_parse_error() {
        let err = EngineConfig::from_toml_str("[layout]\ndirection = \"diagonal\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "include_related = true").unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert!(config.include_related);

        let missing = EngineConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }
}
