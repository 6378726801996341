//! Font loading for the spec sheets.
//!
//! `genpdf` measures text with TrueType metrics, so both font families have to be present on
//! disk. The body family is Liberation Sans and the code family Liberation Mono; both are
//! metric-compatible with the PDF built-in Helvetica and Courier, which is what ends up in the
//! output, so nothing is embedded.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{self, Builtin, FontData, FontFamily};
use log::{debug, warn};

/// Directory searched first for the font files.
pub const FONTS_DIR_ENV: &str = "SENSOR_DOCS_FONTS_DIR";

/// Overrides the Windows font directory used for the fallback families.
pub const WINDOWS_FONTS_DIR_ENV: &str = "SENSOR_DOCS_WINDOWS_FONTS_DIR";

const SYSTEM_FONT_DIRECTORIES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/liberation-mono",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/TTF",
];

const STYLE_SUFFIXES: [&str; 4] = ["Regular", "Bold", "Italic", "BoldItalic"];

/// File names of a family installed under non-uniform names.
struct WindowsFontFiles {
    family: &'static str,
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

/// A family the documents need, with its PDF built-in counterpart and Windows fallback.
pub struct FamilySpec {
    name: &'static str,
    builtin: Builtin,
    windows: WindowsFontFiles,
}

/// Proportional family for headings, prose, tables and captions.
pub const BODY_FAMILY: FamilySpec = FamilySpec {
    name: "LiberationSans",
    builtin: Builtin::Helvetica,
    windows: WindowsFontFiles {
        family: "Arial",
        regular: "arial.ttf",
        bold: "arialbd.ttf",
        italic: "ariali.ttf",
        bold_italic: "arialbi.ttf",
    },
};

/// Monospace family for JSON and YAML listings.
pub const MONOSPACE_FAMILY: FamilySpec = FamilySpec {
    name: "LiberationMono",
    builtin: Builtin::Courier,
    windows: WindowsFontFiles {
        family: "Courier New",
        regular: "cour.ttf",
        bold: "courbd.ttf",
        italic: "couri.ttf",
        bold_italic: "courbi.ttf",
    },
};

impl FamilySpec {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// File names `genpdf::fonts::from_files` expects for this family.
    pub fn file_names(&self) -> Vec<String> {
        STYLE_SUFFIXES
            .iter()
            .map(|suffix| format!("{}-{}.ttf", self.name, suffix))
            .collect()
    }
}

/// Both families, ready to be handed to a `genpdf::Document`.
pub struct LoadedFonts {
    pub body: FontFamily<FontData>,
    pub monospace: FontFamily<FontData>,
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn push_unique(candidates: &mut Vec<PathBuf>, candidate: PathBuf) {
    if !candidates.iter().any(|existing| existing == &candidate) {
        candidates.push(candidate);
    }
}

fn font_directory_candidates_with(override_dir: Option<PathBuf>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = override_dir {
        candidates.push(path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push_unique(&mut candidates, bin_dir.join("assets/fonts"));
        }
    }

    push_unique(
        &mut candidates,
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"),
    );

    for system in SYSTEM_FONT_DIRECTORIES {
        push_unique(&mut candidates, PathBuf::from(system));
    }

    candidates
}

/// Directories searched for the font families, in order.
pub fn font_directory_candidates() -> Vec<PathBuf> {
    font_directory_candidates_with(env_path(FONTS_DIR_ENV))
}

fn missing_font_files(path: &Path, spec: &FamilySpec) -> Vec<String> {
    spec.file_names()
        .into_iter()
        .filter(|name| !path.join(name).is_file())
        .collect()
}

fn resolve_in(candidates: Vec<PathBuf>, spec: &FamilySpec) -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in candidates {
        if !candidate.is_dir() {
            attempts.push(format!("{} (directory missing)", candidate.display()));
            continue;
        }

        let missing = missing_font_files(&candidate, spec);
        if missing.is_empty() {
            return Ok(candidate);
        }
        attempts.push(format!(
            "{} (missing files [{}])",
            candidate.display(),
            missing.join(", ")
        ));
    }

    let summary = if attempts.is_empty() {
        "no search paths were available".to_owned()
    } else {
        attempts.join(", ")
    };

    Err(Error::new(
        format!(
            "Unable to locate the {} font family. Checked: {}. See assets/fonts/README.md or set {}.",
            spec.name, summary, FONTS_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "font directory not found"),
    ))
}

fn load_from_search_path(spec: &FamilySpec) -> Result<FontFamily<FontData>, Error> {
    let directory = resolve_in(font_directory_candidates(), spec)?;
    debug!("Loading {} fonts from {}", spec.name, directory.display());

    fonts::from_files(&directory, spec.name, Some(spec.builtin)).map_err(|err| {
        Error::new(
            format!(
                "Failed to load font family '{}' from {}: {}",
                spec.name,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

fn windows_font_directory() -> Option<PathBuf> {
    if let Some(path) = env_path(WINDOWS_FONTS_DIR_ENV) {
        return Some(path);
    }

    #[cfg(windows)]
    {
        for var in ["WINDIR", "SystemRoot"] {
            if let Some(root) = env_path(var) {
                let candidate = root.join("Fonts");
                if candidate.is_dir() {
                    return Some(candidate);
                }
            }
        }
    }

    None
}

fn load_windows_font(directory: &Path, file: &str, style: &str) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, None).map_err(|err| {
        let io_kind = if path.is_file() {
            io::ErrorKind::Other
        } else {
            io::ErrorKind::NotFound
        };
        Error::new(
            format!(
                "Failed to load Windows fallback {} font at {}: {}",
                style,
                path.display(),
                err
            ),
            io::Error::new(io_kind, err.to_string()),
        )
    })
}

fn windows_fallback_family(spec: &FamilySpec) -> Result<FontFamily<FontData>, Error> {
    let directory = windows_font_directory().ok_or_else(|| {
        Error::new(
            "Windows font directory not found for fallback",
            io::Error::new(io::ErrorKind::NotFound, "windows fonts directory not found"),
        )
    })?;
    let files = &spec.windows;

    Ok(FontFamily {
        regular: load_windows_font(&directory, files.regular, "regular")?,
        bold: load_windows_font(&directory, files.bold, "bold")?,
        italic: load_windows_font(&directory, files.italic, "italic")?,
        bold_italic: load_windows_font(&directory, files.bold_italic, "bold italic")?,
    })
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Loads one family from the search path, falling back to its Windows counterpart when the
/// files are missing.
pub fn load_family(spec: &FamilySpec) -> Result<FontFamily<FontData>, Error> {
    match load_from_search_path(spec) {
        Ok(family) => Ok(family),
        Err(err) if fonts_missing(&err) => match windows_fallback_family(spec) {
            Ok(fallback) => {
                warn!(
                    "{} fonts unavailable ({}); falling back to Windows '{}' family.",
                    spec.name, err, spec.windows.family
                );
                Ok(fallback)
            }
            Err(fallback_err) => {
                warn!(
                    "{} fonts unavailable ({}); Windows fallback failed: {}",
                    spec.name, err, fallback_err
                );
                Err(Error::new(
                    format!(
                        "{} fonts unavailable and Windows fallback failed: {}",
                        spec.name, fallback_err
                    ),
                    io::Error::new(io::ErrorKind::NotFound, "fonts are not available"),
                ))
            }
        },
        Err(err) => Err(err),
    }
}

/// Loads the body and monospace families.
pub fn load_fonts() -> Result<LoadedFonts, Error> {
    Ok(LoadedFonts {
        body: load_family(&BODY_FAMILY)?,
        monospace: load_family(&MONOSPACE_FAMILY)?,
    })
}

/// Indicates whether both families can be found on the search path.
pub fn default_fonts_available() -> bool {
    [&BODY_FAMILY, &MONOSPACE_FAMILY]
        .into_iter()
        .all(|spec| resolve_in(font_directory_candidates(), spec).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_file_names_follow_genpdf_convention() {
        assert_eq!(
            MONOSPACE_FAMILY.file_names(),
            vec![
                "LiberationMono-Regular.ttf",
                "LiberationMono-Bold.ttf",
                "LiberationMono-Italic.ttf",
                "LiberationMono-BoldItalic.ttf",
            ]
        );
    }

    #[test]
    fn override_directory_is_searched_first() {
        let override_dir = PathBuf::from("/opt/fonts");
        let candidates = font_directory_candidates_with(Some(override_dir.clone()));
        assert_eq!(candidates.first(), Some(&override_dir));
        assert!(candidates
            .iter()
            .any(|path| path.ends_with("truetype/liberation")));
    }

    #[test]
    fn resolve_picks_directory_with_complete_family() {
        let incomplete = tempfile::tempdir().expect("tempdir");
        std::fs::write(incomplete.path().join("LiberationSans-Regular.ttf"), b"").expect("write");

        let complete = tempfile::tempdir().expect("tempdir");
        for name in BODY_FAMILY.file_names() {
            std::fs::write(complete.path().join(name), b"").expect("write");
        }

        let resolved = resolve_in(
            vec![incomplete.path().to_path_buf(), complete.path().to_path_buf()],
            &BODY_FAMILY,
        )
        .expect("complete directory resolves");
        assert_eq!(resolved, complete.path());
    }

    #[test]
    fn resolve_reports_every_attempt() {
        let empty = tempfile::tempdir().expect("tempdir");
        let err = resolve_in(
            vec![PathBuf::from("/__sensor_docs_no_fonts__"), empty.path().to_path_buf()],
            &MONOSPACE_FAMILY,
        )
        .unwrap_err();

        assert!(fonts_missing(&err));
        let message = err.to_string();
        assert!(message.contains("directory missing"));
        assert!(message.contains("LiberationMono-BoldItalic.ttf"));
    }
}
