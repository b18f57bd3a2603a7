use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Write raw UTF-8 text to a file, creating parent directories as needed.
/// No format beyond plain text.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write: {}", path.display()))?;
    info!(bytes = content.len(), path = %path.display(), "wrote text file");
    Ok(())
}
