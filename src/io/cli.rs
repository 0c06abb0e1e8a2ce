//! Command-line interface over the rule catalog, validator and stores

use crate::io::configuration::{DEFAULT_LOG_LEVEL, DEFAULT_RULES_DIR, DEFAULT_TEMPLATES_DIR};
use crate::io::error::{Result, RulesError, StorageContext};
use crate::io::progress::ProgressManager;
use crate::io::summary::summarize_document;
use crate::rules::catalog::RuleTypeCatalog;
use crate::rules::document::RuleDocument;
use crate::storage::persist::{is_document_file, read_document};
use crate::storage::rule_files::{RuleFileStore, write_validated};
use crate::storage::templates::TemplateStore;
use crate::validation::validator::{RuleValidator, ValidationReport};
use clap::{ArgAction, Parser, Subcommand};
use serde_json::{Value, json};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "tilerules")]
#[command(
    author,
    version,
    about = "Create, validate and template tile placement rules"
)]
/// Command-line arguments for the rule tool
pub struct Cli {
    /// Directory templates are stored in
    #[arg(long, global = true, default_value = DEFAULT_TEMPLATES_DIR)]
    pub templates_dir: PathBuf,

    /// Directory category rule files are stored in
    #[arg(long, global = true, default_value = DEFAULT_RULES_DIR)]
    pub rules_dir: PathBuf,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level operations
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List rule kinds with their descriptions
    Kinds,
    /// Print a document for CATEGORY containing every kind's template
    Blank {
        /// Tile category the document applies to
        category: String,
    },
    /// Validate a rule file or every .json file in a directory
    Validate {
        /// Rule file or directory
        #[arg(value_name = "TARGET")]
        target: PathBuf,
    },
    /// Print a readable summary of a rule file
    Describe {
        /// Rule file
        file: PathBuf,
    },
    /// Manage reusable templates
    Template {
        /// Template operation
        #[command(subcommand)]
        action: TemplateCommand,
    },
    /// Manage per-category rule files
    Rules {
        /// Rule file operation
        #[command(subcommand)]
        action: RulesCommand,
    },
}

/// Template operations
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum TemplateCommand {
    /// Validate a rule file and store it as template NAME
    Save {
        /// Rule file to store
        file: PathBuf,
        /// Template name
        name: String,
    },
    /// List stored template names
    List,
    /// Print a stored template
    Show {
        /// Template name
        name: String,
    },
    /// Overlay template NAME onto a rule file, keeping its category
    Apply {
        /// Rule file to apply the template to
        file: PathBuf,
        /// Template name
        name: String,
        /// Write the result back to FILE instead of printing it
        #[arg(short, long)]
        write: bool,
    },
    /// Remove a stored template
    Delete {
        /// Template name
        name: String,
    },
}

/// Rule file operations
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum RulesCommand {
    /// Create a blank rule file for CATEGORY
    New {
        /// Tile category
        category: String,
    },
    /// List rule files of CATEGORY
    List {
        /// Tile category
        category: String,
    },
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log filter used when `RUST_LOG` is not set
    pub const fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => DEFAULT_LOG_LEVEL,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Runs a parsed command against the catalog, validator and stores
pub struct RuleProcessor {
    cli: Cli,
    validator: RuleValidator,
}

impl RuleProcessor {
    /// Create a processor with a freshly built catalog
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            validator: RuleValidator::new(RuleTypeCatalog::new()),
        }
    }

    /// Run the command, writing its output to `out`
    ///
    /// # Errors
    ///
    /// Returns an error if a storage operation fails, a template is missing,
    /// or any validated document is invalid
    pub fn run(&self, out: &mut dyn Write) -> Result<()> {
        match &self.cli.command {
            Command::Kinds => self.list_kinds(out),
            Command::Blank { category } => {
                let document = self.catalog().generate_blank_document(category);
                emit_json(out, &document.to_value())
            }
            Command::Validate { target } => self.validate_target(target, out),
            Command::Describe { file } => {
                let document = read_document(file)?;
                emit_line(out, &summarize_document(&document))
            }
            Command::Template { action } => self.run_template(action, out),
            Command::Rules { action } => self.run_rules(action, out),
        }
    }

    const fn catalog(&self) -> &RuleTypeCatalog {
        self.validator.catalog()
    }

    fn list_kinds(&self, out: &mut dyn Write) -> Result<()> {
        for definition in self.catalog().definitions() {
            emit_line(
                out,
                &format!("{}\t{}", definition.kind, definition.description),
            )?;
        }
        Ok(())
    }

    fn run_template(&self, action: &TemplateCommand, out: &mut dyn Write) -> Result<()> {
        let store = TemplateStore::open(&self.cli.templates_dir)?;
        match action {
            TemplateCommand::Save { file, name } => {
                let (document, report) = self.read_valid(file)?;
                store.save(&document, name)?;
                emit_warnings(out, &report)?;
                emit_line(out, &format!("saved template '{name}'"))
            }
            TemplateCommand::List => {
                for name in store.list()? {
                    emit_line(out, &name)?;
                }
                Ok(())
            }
            TemplateCommand::Show { name } => emit_json(out, &store.load(name)?.to_value()),
            TemplateCommand::Apply { file, name, write } => {
                let document = read_document(file)?;
                let applied = store.apply(&document, name)?;
                if *write {
                    let report = write_validated(file, &applied, &self.validator)?;
                    emit_warnings(out, &report)?;
                    emit_line(out, &format!("applied template '{name}' to {}", file.display()))
                } else {
                    emit_json(out, &applied.to_value())
                }
            }
            TemplateCommand::Delete { name } => {
                store.delete(name)?;
                emit_line(out, &format!("deleted template '{name}'"))
            }
        }
    }

    fn run_rules(&self, action: &RulesCommand, out: &mut dyn Write) -> Result<()> {
        let store = RuleFileStore::open(&self.cli.rules_dir)?;
        match action {
            RulesCommand::New { category } => {
                let path = store.create(category, self.catalog())?;
                emit_line(out, &path.display().to_string())
            }
            RulesCommand::List { category } => {
                for path in store.list(category)? {
                    emit_line(out, &path.display().to_string())?;
                }
                Ok(())
            }
        }
    }

    /// Read a file as raw JSON and convert it only once it validates
    fn read_valid(&self, file: &Path) -> Result<(RuleDocument, ValidationReport)> {
        let value = read_json(file)?;
        let report = self.validator.validate_value(&value);
        if !report.is_valid {
            return Err(RulesError::InvalidDocument {
                errors: report.errors,
            });
        }

        let document = RuleDocument::from_value(value).map_err(|source| RulesError::Parse {
            path: file.to_path_buf(),
            source,
        })?;
        Ok((document, report))
    }

    fn validate_target(&self, target: &Path, out: &mut dyn Write) -> Result<()> {
        let files = collect_files(target)?;
        let mut progress = self
            .cli
            .should_show_progress()
            .then(ProgressManager::new);

        if let Some(pm) = progress.as_mut() {
            pm.initialize(files.len());
        }

        let mut invalid = 0;
        for (index, file) in files.iter().enumerate() {
            if let Some(pm) = progress.as_ref() {
                pm.start_file(index, file);
            }

            let outcome = self.validate_file(file);
            let valid = outcome.get("isValid").and_then(Value::as_bool) == Some(true);
            if !valid {
                invalid += 1;
            }
            emit_compact(out, &outcome)?;

            if let Some(pm) = progress.as_mut() {
                pm.complete_file(index, file, valid);
            }
        }

        if let Some(pm) = progress.as_ref() {
            pm.finish();
        }

        if invalid == 0 {
            Ok(())
        } else {
            Err(RulesError::ValidationFailed {
                invalid,
                total: files.len(),
            })
        }
    }

    /// Per-file report; unreadable files are reported, not raised
    fn validate_file(&self, file: &Path) -> Value {
        match read_json(file) {
            Ok(document) => {
                let report: ValidationReport = self.validator.validate_value(&document);
                json!({
                    "file": file.display().to_string(),
                    "isValid": report.is_valid,
                    "errors": report.error_messages(),
                    "warnings": report.warning_messages(),
                })
            }
            Err(err) => json!({
                "file": file.display().to_string(),
                "isValid": false,
                "errors": [err.to_string()],
                "warnings": [],
            }),
        }
    }
}

/// Rule files named by `target`: the file itself or the `.json` files of a
/// directory, sorted
///
/// # Errors
///
/// Returns [`RulesError::InvalidName`] if the target is neither a `.json`
/// file nor a directory, and [`RulesError::Storage`] if listing fails
pub fn collect_files(target: &Path) -> Result<Vec<PathBuf>> {
    if target.is_file() {
        if is_document_file(target) {
            Ok(vec![target.to_path_buf()])
        } else {
            Err(crate::io::error::invalid_name(
                &target.display(),
                "target file must be a .json rule document",
            ))
        }
    } else if target.is_dir() {
        let mut files = Vec::new();
        for entry in fs::read_dir(target).storage_context(target, "list directory")? {
            let path = entry.storage_context(target, "list directory")?.path();
            if path.is_file() && is_document_file(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    } else {
        Err(crate::io::error::invalid_name(
            &target.display(),
            "target must be a rule file or directory",
        ))
    }
}

fn read_json(file: &Path) -> Result<Value> {
    let text = fs::read_to_string(file).storage_context(file, "read")?;
    serde_json::from_str(&text).map_err(|source| RulesError::Parse {
        path: file.to_path_buf(),
        source,
    })
}

fn emit_warnings(out: &mut dyn Write, report: &ValidationReport) -> Result<()> {
    for warning in report.warning_messages() {
        emit_line(out, &format!("warning: {warning}"))?;
    }
    Ok(())
}

fn emit_line(out: &mut dyn Write, line: &str) -> Result<()> {
    writeln!(out, "{line}").storage_context("<output>", "write")
}

fn emit_json(out: &mut dyn Write, value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|source| RulesError::Parse {
        path: PathBuf::from("<output>"),
        source,
    })?;
    emit_line(out, &text)
}

fn emit_compact(out: &mut dyn Write, value: &Value) -> Result<()> {
    emit_line(out, &value.to_string())
}
