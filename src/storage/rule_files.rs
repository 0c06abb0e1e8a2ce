//! Per-category rule documents stored as `<category>_rule_<n>.json`

use crate::io::configuration::{MAX_RULE_FILE_INDEX, RULE_FILE_STEM};
use crate::io::error::{Result, RulesError, StorageContext, invalid_name};
use crate::rules::catalog::RuleTypeCatalog;
use crate::rules::document::RuleDocument;
use crate::storage::persist::{
    check_category, check_entry_name, document_path, document_stems, ensure_dir,
    is_document_file, read_document, write_document,
};
use crate::validation::validator::{RuleValidator, ValidationReport};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory holding the rule documents of every category
#[derive(Clone, Debug)]
pub struct RuleFileStore {
    dir: PathBuf,
}

impl RuleFileStore {
    /// Use `dir` as the rules directory, creating it if needed
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Storage`] if the directory cannot be created
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    /// Rules directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a blank document for `category` under the first free name
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::InvalidName`] if the category cannot appear in a
    /// file name or every candidate name is taken, and [`RulesError::Storage`]
    /// if the write fails
    pub fn create(&self, category: &str, catalog: &RuleTypeCatalog) -> Result<PathBuf> {
        check_entry_name(category)?;

        let path = (1..=MAX_RULE_FILE_INDEX)
            .map(|index| document_path(&self.dir, &rule_file_name(category, index)))
            .find(|candidate| !candidate.exists())
            .ok_or_else(|| invalid_name(&category, "no free rule file name left"))?;

        write_document(&path, &catalog.generate_blank_document(category))?;
        info!(category, path = %path.display(), "created rule file");
        Ok(path)
    }

    /// Rule files belonging to `category`, sorted by name
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Storage`] if the directory cannot be listed
    pub fn list(&self, category: &str) -> Result<Vec<PathBuf>> {
        let prefix = format!("{category}_");
        Ok(document_stems(&self.dir)?
            .into_iter()
            .filter(|stem| stem.starts_with(&prefix))
            .map(|stem| document_path(&self.dir, &stem))
            .collect())
    }

    /// Read a rule file; relative paths are taken from the rules directory
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Storage`] or [`RulesError::Parse`] if the file
    /// cannot be read as a rule document
    pub fn read(&self, path: &Path) -> Result<RuleDocument> {
        read_document(&self.resolve(path))
    }

    /// Validate `document` and write it to `path` only if it is valid
    ///
    /// # Errors
    ///
    /// See [`write_validated`]
    pub fn write(
        &self,
        path: &Path,
        document: &RuleDocument,
        validator: &RuleValidator,
    ) -> Result<ValidationReport> {
        write_validated(&self.resolve(path), document, validator)
    }

    /// Remove a rule file
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Storage`] if the file cannot be removed
    pub fn delete(&self, path: &Path) -> Result<()> {
        let path = self.resolve(path);
        fs::remove_file(&path).storage_context(&path, "remove")?;
        info!(path = %path.display(), "deleted rule file");
        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.dir.join(path)
    }
}

/// File stem for the `index`-th rule file of a category
pub fn rule_file_name(category: &str, index: usize) -> String {
    format!("{category}_{RULE_FILE_STEM}_{index}")
}

/// Validate `document` and write it to `path` only if it is valid
///
/// # Errors
///
/// Returns [`RulesError::InvalidName`] for paths that are not `.json` files
/// or an empty category, [`RulesError::InvalidDocument`] when validation
/// fails and [`RulesError::Storage`] if the write fails
pub fn write_validated(
    path: &Path,
    document: &RuleDocument,
    validator: &RuleValidator,
) -> Result<ValidationReport> {
    if !is_document_file(path) {
        return Err(invalid_name(&path.display(), "rule files must be .json files"));
    }

    let report = validator.validate(document);
    if !report.is_valid {
        return Err(RulesError::InvalidDocument {
            errors: report.errors,
        });
    }

    check_category(document)?;
    write_document(path, document)?;
    info!(path = %path.display(), "wrote rule file");
    Ok(report)
}
