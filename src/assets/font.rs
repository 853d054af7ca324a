use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{MemeError, MemeResult};

/// Raw caption font face: bytes plus the face index inside them.
#[derive(Clone, Debug)]
pub struct CaptionFont {
    /// Family name reported by the font.
    pub family: String,
    /// Entire font file contents (may be a collection).
    pub bytes: Arc<Vec<u8>>,
    /// Face index within `bytes`.
    pub index: u32,
    /// OpenType weight class of the face (400 regular, 700 bold).
    pub weight: u16,
}

impl CaptionFont {
    /// Load the first face of a font file.
    pub fn from_file(path: impl AsRef<Path>) -> MemeResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read caption font '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    /// Wrap in-memory font bytes, reading the family name of face 0.
    pub fn from_bytes(bytes: Vec<u8>) -> MemeResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_font_data(bytes.clone());
        let face = db.faces().next().ok_or_else(|| {
            MemeError::surface_unavailable("font bytes contain no usable face")
        })?;
        let family = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_default();
        Ok(Self {
            family,
            bytes: Arc::new(bytes),
            index: face.index,
            weight: face.weight.0,
        })
    }

    /// Pick a bold caption face from system fonts plus `extra_dirs`.
    ///
    /// `families` are tried in order, then generic sans-serif, serif and monospace. When none of
    /// those names is installed, the best installed face wins: upright, proportional, sans,
    /// closest to bold. A machine without fonts cannot draw captions, which is reported as
    /// [`MemeError::RenderSurfaceUnavailable`].
    pub fn discover(families: &[String], extra_dirs: &[PathBuf]) -> MemeResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in extra_dirs {
            load_fonts_from_dir(&mut db, dir);
        }

        let mut query_families: Vec<usvg::fontdb::Family<'_>> = families
            .iter()
            .map(|f| usvg::fontdb::Family::Name(f.as_str()))
            .collect();
        query_families.push(usvg::fontdb::Family::SansSerif);
        query_families.push(usvg::fontdb::Family::Serif);
        query_families.push(usvg::fontdb::Family::Monospace);

        let query = usvg::fontdb::Query {
            families: &query_families,
            weight: usvg::fontdb::Weight::BOLD,
            ..Default::default()
        };
        let id = db
            .query(&query)
            .or_else(|| {
                db.faces()
                    .min_by_key(|f| {
                        let family = f.families.first().map(|(n, _)| n.as_str()).unwrap_or("");
                        fallback_rank(
                            family,
                            f.weight.0,
                            f.style == usvg::fontdb::Style::Normal,
                            f.monospaced,
                        )
                    })
                    .map(|f| f.id)
            })
            .ok_or_else(|| {
                MemeError::surface_unavailable("no caption font available on this system")
            })?;

        let (family, weight) = db
            .face(id)
            .map(|f| {
                let family = f.families.first().map(|(name, _)| name.clone());
                (family.unwrap_or_default(), f.weight.0)
            })
            .unwrap_or_default();
        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| MemeError::surface_unavailable("caption font data unreadable"))?;

        tracing::debug!(%family, index, weight, "discovered caption font");
        Ok(Self {
            family,
            bytes: Arc::new(bytes),
            index,
            weight,
        })
    }
}

/// Ordering key for fallback faces; smaller is a better caption face.
fn fallback_rank(
    family: &str,
    weight: u16,
    upright: bool,
    monospaced: bool,
) -> (bool, bool, bool, bool, u16) {
    let lower = family.to_ascii_lowercase();
    let symbolic = ["math", "symbol", "emoji", "dingbat"]
        .iter()
        .any(|k| lower.contains(k));
    (
        !upright,
        monospaced,
        symbolic,
        !lower.contains("sans"),
        weight.abs_diff(700),
    )
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        let _ = db.load_font_file(&path);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
