use std::io::Read;
use std::path::Path;

use anyhow::Context;

/// Read a UTF-8 text file, or stdin for `-`
pub fn read_text(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Name shown in reports
pub fn display_name(path: &Path) -> String {
    if path == Path::new("-") {
        return "<stdin>".to_string();
    }
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
