//! HTML export — writes rendered resumes to disk. Markdown documents are
//! converted to HTML first.

use std::path::{Path, PathBuf};

use pulldown_cmark::{html, Options, Parser};
use tracing::{error, info};

use crate::errors::AppError;

/// Writes `html` to `output_path`, creating parent directories as needed.
pub async fn export_html(html: &str, output_path: impl AsRef<Path>) -> Result<PathBuf, AppError> {
    let output_path = output_path.as_ref();

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            error!("Failed to export HTML to {} :: {e}", output_path.display());
            AppError::Export(format!("{}: {e}", parent.display()))
        })?;
    }

    tokio::fs::write(output_path, html).await.map_err(|e| {
        error!("Failed to export HTML to {} :: {e}", output_path.display());
        AppError::Export(format!("{}: {e}", output_path.display()))
    })?;

    info!("Wrote HTML export to {}", output_path.display());
    Ok(output_path.to_path_buf())
}

/// CommonMark plus GFM tables and strikethrough.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Converts `markdown` to HTML and writes it via [`export_html`].
pub async fn export_markdown(
    markdown: &str,
    output_path: impl AsRef<Path>,
) -> Result<PathBuf, AppError> {
    let html = markdown_to_html(markdown);
    export_html(&html, output_path).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_export_html_writes_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.html");
        let written = export_html("<p>hello</p>", &path).await.unwrap();
        assert_eq!(written, path);
        let saved = std::fs::read_to_string(&path).unwrap();
        assert_eq!(saved.trim(), "<p>hello</p>");
    }

    #[tokio::test]
    async fn test_export_html_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/resume.html");
        export_html("<p>x</p>", &path).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_export_html_reports_unwritable_target() {
        let dir = tempfile::tempdir().unwrap();
        // A file where a directory is expected.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let result = export_html("<p>x</p>", blocker.join("resume.html")).await;
        assert!(matches!(result, Err(AppError::Export(_))));
    }

    #[test]
    fn test_markdown_to_html() {
        let html = markdown_to_html("# Jane Doe\n\n- Cut MTTR by **20%**\n");
        assert!(html.contains("<h1>Jane Doe</h1>"));
        assert!(html.contains("<li>Cut MTTR by <strong>20%</strong></li>"));
    }

    #[test]
    fn test_markdown_tables_enabled() {
        let html = markdown_to_html("| Skill | Years |\n|---|---|\n| SIEM | 4 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>SIEM</td>"));
    }

    #[tokio::test]
    async fn test_export_markdown_writes_html() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/resume.html");
        let written = export_markdown("## Experience\n\nSOC analyst", &path).await.unwrap();
        assert_eq!(written, path);
        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains("<h2>Experience</h2>"));
        assert!(saved.contains("<p>SOC analyst</p>"));
    }

    #[tokio::test]
    async fn test_export_markdown_reports_unwritable_target() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let result = export_markdown("# x", blocker.join("resume.html")).await;
        assert!(matches!(result, Err(AppError::Export(_))));
    }
}
