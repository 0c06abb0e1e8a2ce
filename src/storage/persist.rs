//! File helpers shared by the template and rule file stores

use crate::io::configuration::DOCUMENT_EXTENSION;
use crate::io::error::{Result, RulesError, StorageContext, invalid_name};
use crate::rules::document::RuleDocument;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Reject names that would escape their directory or vanish from listings
///
/// # Errors
///
/// Returns [`RulesError::InvalidName`] for empty names, names containing a
/// path separator or NUL, and names starting with a dot
pub fn check_entry_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(invalid_name(&name, "name is empty"));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(invalid_name(&name, "name contains a path separator"));
    }
    if name.starts_with('.') {
        return Err(invalid_name(&name, "name starts with a dot"));
    }
    Ok(())
}

/// Reject documents whose category would be stored blank
///
/// A missing category is left to validation; only a present but empty
/// category is refused here.
///
/// # Errors
///
/// Returns [`RulesError::InvalidName`] if the category is empty or only
/// whitespace
pub fn check_category(document: &RuleDocument) -> Result<()> {
    match document.category.as_deref() {
        Some(category) if category.trim().is_empty() => {
            Err(invalid_name(&category, "stored documents need a non-empty category"))
        }
        _ => Ok(()),
    }
}

/// Path of the document named `name` inside `dir`
pub fn document_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{DOCUMENT_EXTENSION}"))
}

/// Whether a path has the stored document extension
pub fn is_document_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(DOCUMENT_EXTENSION)
}

/// Create `dir` and its parents if missing
///
/// # Errors
///
/// Returns [`RulesError::Storage`] if the directory cannot be created
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).storage_context(dir, "create directory")
}

/// Stems of every document file directly inside `dir`, sorted
///
/// A missing directory holds no documents.
///
/// # Errors
///
/// Returns [`RulesError::Storage`] if the directory cannot be listed
pub fn document_stems(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut stems = Vec::new();
    for entry in fs::read_dir(dir).storage_context(dir, "list directory")? {
        let path = entry.storage_context(dir, "list directory")?.path();
        if path.is_file()
            && is_document_file(&path)
            && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
        {
            stems.push(stem.to_string());
        }
    }
    stems.sort();
    Ok(stems)
}

/// Read and parse a rule document
///
/// # Errors
///
/// Returns [`RulesError::Storage`] if the file cannot be read and
/// [`RulesError::Parse`] if it is not a rule document
pub fn read_document(path: &Path) -> Result<RuleDocument> {
    let text = fs::read_to_string(path).storage_context(path, "read")?;
    RuleDocument::from_json_str(&text).map_err(|source| RulesError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize `document` and replace `path` with it in one step
///
/// The document is written to a temporary file in the same directory and
/// renamed over the target, so a failed write leaves the previous content
/// in place.
///
/// # Errors
///
/// Returns [`RulesError::Storage`] if any file operation fails
pub fn write_document(path: &Path, document: &RuleDocument) -> Result<()> {
    let text = document
        .to_json_pretty()
        .map_err(|source| RulesError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).storage_context(dir, "create temporary file")?;
    staged
        .write_all(text.as_bytes())
        .and_then(|()| staged.write_all(b"\n"))
        .and_then(|()| staged.as_file().sync_all())
        .storage_context(staged.path(), "write")?;
    staged
        .persist(path)
        .map_err(|err| err.error)
        .storage_context(path, "replace")?;

    Ok(())
}
