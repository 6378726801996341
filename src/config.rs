//! Input and output locations for a build.

use std::path::{Path, PathBuf};

/// Directory holding the per-sensor image folders, relative to the base directory.
pub const SENSORS_DIR: &str = "sensors";
/// Default output directory, relative to the base directory.
pub const OUTPUT_DIR: &str = "output";

/// Where images are read from and where the PDFs are written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildConfig {
    base_dir: PathBuf,
    output_dir: PathBuf,
}

impl BuildConfig {
    /// Reads images from `<base_dir>/sensors` and writes to `<base_dir>/output`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let output_dir = base_dir.join(OUTPUT_DIR);
        Self {
            base_dir,
            output_dir,
        }
    }

    /// Writes the PDFs to `output_dir` instead of the default location.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Image folder of the presence sensor.
    pub fn presence_dir(&self) -> PathBuf {
        self.base_dir.join(SENSORS_DIR).join("presence")
    }

    /// Image folder of the door/window sensor.
    pub fn door_dir(&self) -> PathBuf {
        self.base_dir.join(SENSORS_DIR).join("door")
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_under_base_dir() {
        let config = BuildConfig::new("/srv/docs");
        assert_eq!(config.output_dir(), Path::new("/srv/docs/output"));
        assert_eq!(config.presence_dir(), Path::new("/srv/docs/sensors/presence"));
        assert_eq!(config.door_dir(), Path::new("/srv/docs/sensors/door"));
    }

    #[test]
    fn output_dir_override_keeps_inputs() {
        let config = BuildConfig::new("/srv/docs").with_output_dir("/tmp/out");
        assert_eq!(config.output_dir(), Path::new("/tmp/out"));
        assert_eq!(config.door_dir(), Path::new("/srv/docs/sensors/door"));
    }
}
