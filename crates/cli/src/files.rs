//! Reading local files into uploads.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use seteuk_core::{FileCategory, UploadedFile};
use std::path::Path;

const TEXT_MIME: &str = "text/plain";

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load a report or knowledge file.
///
/// Recognized binary formats are sent base64-encoded with their sniffed MIME
/// type; anything else must be UTF-8 text. Knowledge files are always
/// attachments, so their text is base64-encoded too.
pub fn load_upload(path: &Path, category: FileCategory) -> Result<UploadedFile, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let name = file_name(path);

    if let Some(kind) = infer::get(&bytes) {
        return Ok(UploadedFile::new(
            name,
            kind.mime_type(),
            STANDARD.encode(&bytes),
            category,
        ));
    }

    let text = String::from_utf8(bytes)
        .map_err(|_| format!("{}: not a recognized binary format or UTF-8 text", path.display()))?;
    let data = match category {
        FileCategory::Knowledge => STANDARD.encode(text.as_bytes()),
        _ => text,
    };
    Ok(UploadedFile::new(name, TEXT_MIME, data, category))
}

/// Load a code file. Always text.
pub fn load_code(path: &Path) -> Result<UploadedFile, String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(UploadedFile::new(file_name(path), TEXT_MIME, text, FileCategory::Code))
}

/// Text from `--text` or `--file`, whichever is given.
pub fn read_text(text: Option<String>, file: Option<&Path>) -> Result<String, String> {
    match (text, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => {
            std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))
        }
        (None, None) => Err("provide --text or --file".into()),
    }
}
