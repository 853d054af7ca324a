use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::assets::catalog::Template;
use crate::foundation::error::{MemeError, MemeResult};

/// Source of encoded template artwork.
///
/// Implementations may suspend (disk, network, caches). Failures must surface as
/// [`MemeError::AssetLoad`].
#[async_trait::async_trait]
pub trait TemplateLoader: Send + Sync {
    /// Fetch the encoded bytes of `template`'s artwork.
    async fn fetch(&self, template: &Template) -> MemeResult<Vec<u8>>;
}

/// Fetch artwork, failing with [`MemeError::AssetLoad`] if `timeout` elapses first.
#[tracing::instrument(skip(loader, template), fields(template = %template.id))]
pub async fn fetch_with_timeout(
    loader: &dyn TemplateLoader,
    template: &Template,
    timeout: Duration,
) -> MemeResult<Vec<u8>> {
    let bytes = tokio::time::timeout(timeout, loader.fetch(template))
        .await
        .map_err(|_| {
            tracing::warn!(?timeout, "template load timed out");
            MemeError::asset_load(format!(
                "loading template '{}' timed out after {timeout:?}",
                template.id
            ))
        })??;
    if bytes.is_empty() {
        return Err(MemeError::asset_load(format!(
            "template '{}' artwork is empty",
            template.id
        )));
    }
    Ok(bytes)
}

const CACHED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Loads template artwork from the local filesystem.
///
/// - relative references resolve against `root`;
/// - `file://` references are read as-is;
/// - remote (`http(s)://`) references are served from a local copy named `<id>.<ext>` under
///   `root`, since this loader never touches the network.
#[derive(Clone, Debug)]
pub struct FsTemplateLoader {
    root: PathBuf,
}

impl FsTemplateLoader {
    /// Create a loader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory for relative references and cached remote artwork.
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn resolve(&self, template: &Template) -> MemeResult<PathBuf> {
        let url = template.url.trim();
        if let Some(path) = url.strip_prefix("file://") {
            return Ok(PathBuf::from(path));
        }
        if url.contains("://") {
            for ext in CACHED_EXTENSIONS {
                let candidate = self.root.join(format!("{}.{ext}", template.id));
                if tokio::fs::metadata(&candidate).await.is_ok() {
                    return Ok(candidate);
                }
            }
            return Err(MemeError::asset_load(format!(
                "no local artwork for remote template '{}' under '{}'",
                template.id,
                self.root.display()
            )));
        }
        let rel = normalize_rel_path(url)?;
        Ok(self.root.join(Path::new(&rel)))
    }
}

#[async_trait::async_trait]
impl TemplateLoader for FsTemplateLoader {
    async fn fetch(&self, template: &Template) -> MemeResult<Vec<u8>> {
        let path = self.resolve(template).await?;
        tracing::debug!(template = %template.id, path = %path.display(), "reading template artwork");
        tokio::fs::read(&path).await.map_err(|e| {
            MemeError::asset_load(format!(
                "read template '{}' from '{}': {e}",
                template.id,
                path.display()
            ))
        })
    }
}

/// Normalize and validate a root-relative artwork path.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> MemeResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(MemeError::asset_load("template paths must be relative"));
    }
    if s.is_empty() {
        return Err(MemeError::asset_load("template path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(MemeError::asset_load("template paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(MemeError::asset_load(
            "template path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
