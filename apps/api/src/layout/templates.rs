//! HTML layout templates — named layouts resolved to files, with fallback to
//! the `modern` layout, and `{{ key }}` placeholder injection.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{error, info, warn};

use crate::errors::AppError;

/// Layout every lookup falls back to.
pub const DEFAULT_LAYOUT: &str = "modern";

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").unwrap());

/// Source of layout templates. Carried in `AppState` as `Arc<dyn TemplateStore>`.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Returns the raw template for `layout`, falling back to the default
    /// layout when `layout` is unknown or unreadable.
    async fn load(&self, layout: &str) -> Result<String, AppError>;
}

/// Filesystem-backed layouts. Extra layouts can be registered at runtime.
pub struct FsTemplateStore {
    layouts: RwLock<HashMap<String, PathBuf>>,
}

impl FsTemplateStore {
    /// Registers the shipped `modern` and `corporate` layouts from `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let layouts = HashMap::from([
            (DEFAULT_LAYOUT.to_string(), dir.join("modern.html")),
            ("corporate".to_string(), dir.join("corporate.html")),
        ]);
        Self {
            layouts: RwLock::new(layouts),
        }
    }

    /// Adds or replaces a named layout.
    pub fn register(&self, name: &str, path: impl Into<PathBuf>) {
        let path = path.into();
        info!("Registered template '{name}' at {}", path.display());
        self.layouts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(name.to_string(), path);
    }

    /// (requested path, default path). The lock is released before any I/O.
    fn resolve(&self, layout: &str) -> (Option<PathBuf>, Option<PathBuf>) {
        let layouts = self
            .layouts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        (
            layouts.get(layout).cloned(),
            layouts.get(DEFAULT_LAYOUT).cloned(),
        )
    }
}

#[async_trait]
impl TemplateStore for FsTemplateStore {
    async fn load(&self, layout: &str) -> Result<String, AppError> {
        let (requested, default) = self.resolve(layout);
        let default = default
            .ok_or_else(|| AppError::Template(format!("no '{DEFAULT_LAYOUT}' layout registered")))?;

        let path = match requested {
            Some(path) => path,
            None => {
                warn!("Layout '{layout}' not found. Falling back to '{DEFAULT_LAYOUT}'.");
                default.clone()
            }
        };

        match tokio::fs::read_to_string(&path).await {
            Ok(template) => Ok(template),
            Err(e) if path != default => {
                error!("Failed to load template '{layout}'. Attempting {DEFAULT_LAYOUT} fallback. :: {e}");
                tokio::fs::read_to_string(&default).await.map_err(|e| {
                    AppError::Template(format!("{}: {e}", default.display()))
                })
            }
            Err(e) => {
                error!("Failed to load default template. :: {e}");
                Err(AppError::Template(format!("{}: {e}", path.display())))
            }
        }
    }
}

/// Replaces every `{{ key }}` with `data[key]`, or "" when the key is absent.
pub fn inject(template: &str, data: &HashMap<&str, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            data.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}

/// Loads `layout` from `store` and fills in its placeholders.
pub async fn render(
    store: &dyn TemplateStore,
    layout: &str,
    data: &HashMap<&str, String>,
) -> Result<String, AppError> {
    let template = store.load(layout).await?;
    Ok(inject(&template, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_template_dir;

    fn data(pairs: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    fn store_with_modern(body: &str) -> (tempfile::TempDir, FsTemplateStore) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("modern.html"), body).unwrap();
        let store = FsTemplateStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_inject_tolerates_whitespace() {
        let html = inject("<h1>{{name}}</h1><p>{{  summary   }}</p>", &data(&[("name", "Ada"), ("summary", "Hi")]));
        assert_eq!(html, "<h1>Ada</h1><p>Hi</p>");
    }

    #[test]
    fn test_inject_missing_key_is_empty() {
        assert_eq!(inject("[{{ missing }}]", &data(&[])), "[]");
    }

    #[test]
    fn test_inject_leaves_non_word_placeholders() {
        assert_eq!(inject("{{ a-b }}", &data(&[("a", "x")])), "{{ a-b }}");
    }

    #[test]
    fn test_inject_does_not_expand_dollar_signs() {
        assert_eq!(inject("{{ v }}", &data(&[("v", "$1 saved")])), "$1 saved");
    }

    #[tokio::test]
    async fn test_unknown_layout_falls_back_to_modern() {
        let (_dir, store) = store_with_modern("modern: {{ name }}");
        let html = render(&store, "nonexistent", &data(&[("name", "Tester")]))
            .await
            .unwrap();
        assert_eq!(html, "modern: Tester");
    }

    #[tokio::test]
    async fn test_broken_registered_layout_falls_back_to_modern() {
        let (_dir, store) = store_with_modern("modern: {{ name }}");
        store.register("broken", "/tmp/nonexistent-template.html");
        let html = render(&store, "broken", &data(&[("name", "Fallback User")]))
            .await
            .unwrap();
        assert!(html.contains("Fallback User"));
    }

    #[tokio::test]
    async fn test_registered_layout_is_used() {
        let (dir, store) = store_with_modern("modern");
        let custom = dir.path().join("custom.html");
        std::fs::write(&custom, "custom: {{ name }}").unwrap();
        store.register("custom", &custom);
        let html = render(&store, "custom", &data(&[("name", "Ada")])).await.unwrap();
        assert_eq!(html, "custom: Ada");
    }

    #[tokio::test]
    async fn test_missing_default_template_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsTemplateStore::new(dir.path());
        let result = store.load("corporate").await;
        assert!(matches!(result, Err(AppError::Template(_))));
    }

    #[tokio::test]
    async fn test_shipped_layouts_load() {
        let store = FsTemplateStore::new(default_template_dir());
        for layout in ["modern", "corporate"] {
            let template = store.load(layout).await.unwrap();
            assert!(template.contains("name"));
            assert!(template.contains("scoreBreakdown"));
        }
    }
}
