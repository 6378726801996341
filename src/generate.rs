//! Build entry points: assemble a sheet, render it, and write it into the output directory.

use std::fs;
use std::path::PathBuf;

use log::info;

use crate::builder::PdfBuilder;
use crate::config::BuildConfig;
use crate::documents::SensorKind;
use crate::error::PdfBuildError;
use crate::styles::StyleSheet;

fn ensure_output_dir(config: &BuildConfig) -> Result<(), PdfBuildError> {
    let output_dir = config.output_dir();
    fs::create_dir_all(output_dir).map_err(|err| PdfBuildError::io(output_dir, err))
}

/// Builds the sheet for `kind` and returns the path it was written to.
pub fn generate(
    kind: SensorKind,
    config: &BuildConfig,
    builder: &PdfBuilder,
) -> Result<PathBuf, PdfBuildError> {
    ensure_output_dir(config)?;

    let styles = StyleSheet::standard();
    let document = kind.assemble(config, &styles)?;
    let output_path = config.output_dir().join(document.file_name());

    info!("Rendering {} to {}", kind, output_path.display());
    builder.render_to_file(&document, &output_path)?;
    Ok(output_path)
}

/// Builds the presence sensor sheet.
pub fn generate_presence_sensor_pdf(config: &BuildConfig) -> Result<PathBuf, PdfBuildError> {
    generate(SensorKind::Presence, config, &PdfBuilder::new())
}

/// Builds the door/window sensor sheet.
pub fn generate_door_sensor_pdf(config: &BuildConfig) -> Result<PathBuf, PdfBuildError> {
    generate(SensorKind::Door, config, &PdfBuilder::new())
}

/// Builds every sheet in order, stopping at the first failure.
pub fn generate_all(config: &BuildConfig) -> Result<Vec<PathBuf>, PdfBuildError> {
    let builder = PdfBuilder::new();
    SensorKind::ALL
        .into_iter()
        .map(|kind| generate(kind, config, &builder))
        .collect()
}
