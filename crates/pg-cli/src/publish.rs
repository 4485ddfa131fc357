use std::fs;
use std::io;
use std::path::Path;

/// Replace the whole content of `path` with `content`.
///
/// No merging: whatever was there before is gone.
pub fn publish(path: &Path, content: &str) -> io::Result<()> {
    fs::write(path, content)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "published");
    Ok(())
}
