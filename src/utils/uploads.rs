use std::path::{Path, PathBuf};

/// Resolves the configured uploads directory against the working directory.
pub fn get_uploads_dir(configured: &Path) -> std::io::Result<PathBuf> {
    if configured.is_absolute() {
        return Ok(configured.to_path_buf());
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(configured))
}

/// File name safe to store on disk and put into a URL.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    match cleaned.trim_start_matches('.') {
        "" => String::from("file"),
        rest => rest.to_string(),
    }
}
