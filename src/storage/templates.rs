//! Named rule documents kept as reusable starting points

use crate::io::error::{Result, RulesError, StorageContext, template_not_found};
use crate::rules::document::RuleDocument;
use crate::storage::persist::{
    check_category, check_entry_name, document_path, document_stems, ensure_dir, read_document,
    write_document,
};
use crate::validation::validator::{RuleValidator, ValidationReport};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory of templates, one `<name>.json` file per template
///
/// Saving under an existing name replaces that template. The store keeps no
/// documents in memory; every call goes to disk.
#[derive(Clone, Debug)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    /// Use `dir` as the template directory, creating it if needed
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Storage`] if the directory cannot be created
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    /// Template directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store `document` under `name`, replacing any template of that name
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::InvalidName`] for unusable names or an empty
    /// category and [`RulesError::Storage`] if the write fails; a failed write
    /// leaves the previous template untouched
    pub fn save(&self, document: &RuleDocument, name: &str) -> Result<()> {
        check_entry_name(name)?;
        check_category(document)?;
        let path = document_path(&self.dir, name);
        write_document(&path, document)?;
        info!(template = name, path = %path.display(), "saved rule template");
        Ok(())
    }

    /// Validate `document` and store it only if it is valid
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::InvalidDocument`] when validation fails, or any
    /// error [`TemplateStore::save`] returns
    pub fn save_validated(
        &self,
        document: &RuleDocument,
        name: &str,
        validator: &RuleValidator,
    ) -> Result<ValidationReport> {
        let report = validator.validate(document);
        if !report.is_valid {
            return Err(RulesError::InvalidDocument {
                errors: report.errors,
            });
        }
        self.save(document, name)?;
        Ok(report)
    }

    /// Names of all stored templates, sorted
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Storage`] if the directory cannot be listed
    pub fn list(&self) -> Result<Vec<String>> {
        document_stems(&self.dir)
    }

    /// Read the template stored under `name`
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::TemplateNotFound`] if no such template exists
    /// or its file cannot be read as a rule document
    pub fn load(&self, name: &str) -> Result<RuleDocument> {
        check_entry_name(name).map_err(|_rejected| template_not_found(&name))?;
        let path = document_path(&self.dir, name);
        if !path.is_file() {
            return Err(template_not_found(&name));
        }

        read_document(&path).map_err(|err| {
            warn!(template = name, error = %err, "stored template is unreadable");
            template_not_found(&name)
        })
    }

    /// Overlay the template `name` onto `document`
    ///
    /// Template rules replace same-kind rules of `document`, kinds only in
    /// `document` are kept, and the category of `document` is kept whatever
    /// the template says. The result is not validated.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::TemplateNotFound`] if the template cannot be
    /// loaded
    pub fn apply(&self, document: &RuleDocument, name: &str) -> Result<RuleDocument> {
        let template = self.load(name)?;
        let applied = apply_template(document, &template);
        info!(
            template = name,
            category = applied.category.as_deref().unwrap_or_default(),
            "applied rule template"
        );
        Ok(applied)
    }

    /// Remove the template stored under `name`
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::TemplateNotFound`] if it does not exist and
    /// [`RulesError::Storage`] if removal fails
    pub fn delete(&self, name: &str) -> Result<()> {
        check_entry_name(name).map_err(|_rejected| template_not_found(&name))?;
        let path = document_path(&self.dir, name);
        if !path.is_file() {
            return Err(template_not_found(&name));
        }
        fs::remove_file(&path).storage_context(&path, "remove")?;
        info!(template = name, "deleted rule template");
        Ok(())
    }
}

/// Pure merge behind [`TemplateStore::apply`]
///
/// Missing top-level fields of `document` are filled from the template, except
/// the category, which always comes from `document`.
pub fn apply_template(document: &RuleDocument, template: &RuleDocument) -> RuleDocument {
    let mut applied = document.clone();
    applied.merge_rules(template);
    if applied.document_type.is_none() {
        applied.document_type.clone_from(&template.document_type);
    }
    applied
}
