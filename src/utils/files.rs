use crate::models::document::DocumentType;

/// Last path component of a client-supplied file name. Both separators are
/// stripped since browsers on Windows may send full paths.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    match base {
        "" | "." | ".." => "upload.bin".to_string(),
        name => name.to_string(),
    }
}

/// Object key for a stored file: `{application_id}/{kind}/{file_name}`.
pub fn object_path(application_id: &str, kind: DocumentType, file_name: &str) -> String {
    format!(
        "{}/{}/{}",
        application_id,
        kind.as_str(),
        sanitize_file_name(file_name)
    )
}

/// MIME type to record when the client did not send one.
pub fn content_type_for(file_name: &str, declared: Option<&str>) -> String {
    if let Some(ct) = declared.map(str::trim).filter(|ct| !ct.is_empty()) {
        return ct.to_string();
    }
    let ext = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "rtf" => "application/rtf",
        _ => "application/octet-stream",
    }
    .to_string()
}
