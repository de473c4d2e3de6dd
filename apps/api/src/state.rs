use std::sync::Arc;

use crate::config::Config;
use crate::layout::TemplateStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Layout templates. Default: `FsTemplateStore` over `config.template_dir`.
    pub templates: Arc<dyn TemplateStore>,
}
