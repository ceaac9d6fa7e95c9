use std::path::{Path, PathBuf};

use crate::foundation::error::{ScuderiaError, ScuderiaResult};

/// Static images the page paints, as paths relative to the assets root.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetManifest {
    /// Hero background image.
    pub background: Option<String>,
    /// Car image driven by the launch sequence.
    pub car: Option<String>,
}

/// Probed image: normalized path plus pixel size.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PreparedAsset {
    pub rel_path: String,
    pub width: u32,
    pub height: u32,
}

/// Layers that loaded. A missing entry means the host should skip that layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PreparedAssets {
    pub background: Option<PreparedAsset>,
    pub car: Option<PreparedAsset>,
}

impl PreparedAssets {
    /// Probe every declared image under `root`.
    ///
    /// Bad paths are errors. Missing or undecodable files only drop their layer.
    pub fn prepare(root: &Path, manifest: &AssetManifest) -> ScuderiaResult<Self> {
        Ok(Self {
            background: probe_slot(root, "background", manifest.background.as_deref())?,
            car: probe_slot(root, "car", manifest.car.as_deref())?,
        })
    }

    /// Names of the layers present, in paint order.
    pub fn layers(&self) -> Vec<&'static str> {
        let mut out = Vec::with_capacity(2);
        if self.background.is_some() {
            out.push("background");
        }
        if self.car.is_some() {
            out.push("car");
        }
        out
    }
}

fn probe_slot(
    root: &Path,
    slot: &'static str,
    source: Option<&str>,
) -> ScuderiaResult<Option<PreparedAsset>> {
    let Some(source) = source else {
        return Ok(None);
    };
    let rel_path = normalize_rel_path(source)?;
    let path = resolve(root, &rel_path);
    match image::image_dimensions(&path) {
        Ok((width, height)) => Ok(Some(PreparedAsset {
            rel_path,
            width,
            height,
        })),
        Err(e) => {
            tracing::warn!(slot, path = %path.display(), error = %e, "asset unavailable, layer omitted");
            Ok(None)
        }
    }
}

fn resolve(root: &Path, rel_path: &str) -> PathBuf {
    rel_path.split('/').fold(root.to_path_buf(), |p, part| p.join(part))
}

/// Normalize and validate a relative asset path.
///
/// The result uses `/` separators and has no `.` segments. Absolute paths and `..` are rejected.
pub fn normalize_rel_path(source: &str) -> ScuderiaResult<String> {
    let s = source.replace('\\', "/");
    if s.is_empty() {
        return Err(ScuderiaError::validation("asset path must be non-empty"));
    }
    if s.starts_with('/') || s.as_bytes().get(1) == Some(&b':') {
        return Err(ScuderiaError::validation("asset paths must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ScuderiaError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ScuderiaError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
