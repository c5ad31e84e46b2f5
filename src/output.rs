//! JSON output of assembled views.
//!
//! Views are written as pretty-printed JSON, either to stdout (so the binary
//! can be piped) or to a file. Parent directories of the target file are
//! created on demand.

use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, instrument};

/// Serialize `view` as pretty JSON with a trailing newline.
pub fn to_json<T: Serialize + ?Sized>(view: &T) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(view)?;
    json.push('\n');
    Ok(json)
}

/// Write `view` to `path`, or to stdout when `path` is `None`.
#[instrument(level = "info", skip_all, fields(path = path.unwrap_or("-")))]
pub async fn write_view<T: Serialize + ?Sized>(view: &T, path: Option<&str>) -> Result<(), Box<dyn Error>> {
    let json = to_json(view)?;

    let Some(path) = path else {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(json.as_bytes()).await?;
        stdout.flush().await?;
        return Ok(());
    };

    if let Some(dir) = Path::new(path).parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create output dir");
            return Err(e.into());
        }
    }

    fs::write(path, &json).await?;
    info!(bytes = json.len(), "Wrote view");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_json_is_pretty_with_newline() {
        let json = to_json(&json!({ "hero": [] })).unwrap();
        assert_eq!(json, "{\n  \"hero\": []\n}\n");
    }

    #[tokio::test]
    async fn test_write_view_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("views/2025-05-06/home.json");
        let path = path.to_str().unwrap();

        write_view(&json!({ "sections": [1, 2] }), Some(path)).await.unwrap();

        let written = std::fs::read_to_string(path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["sections"][1], 2);
    }

    #[tokio::test]
    async fn test_write_view_to_stdout() {
        write_view(&json!([]), None).await.unwrap();
    }
}
