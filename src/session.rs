//! One editing session: a draft, its template store and the settings
//! they run under.

use crate::config::Config;
use crate::enrich::{Enricher, Style, TemplateEnricher};
use crate::error::Result;
use crate::export::{export_filename, serialize, ExportOptions};
use crate::models::{Draft, FieldId};
use crate::templates::TemplateStore;
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// A serialized proposal and the file name it should be saved under
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct Session {
    draft: Draft,
    templates: TemplateStore,
    config: Config,
    enricher: Box<dyn Enricher>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self::opened_on(config, Local::now().date_naive())
    }

    /// Starts a session whose draft is dated `today`
    pub fn opened_on(config: Config, today: NaiveDate) -> Self {
        let mut draft = Draft::new(today);
        draft.set(FieldId::Proposer, config.default_proposer.clone());
        Self {
            draft,
            templates: TemplateStore::with_builtins(),
            config,
            enricher: Box::new(TemplateEnricher),
        }
    }

    /// Replaces the enrichment backend
    pub fn with_enricher(mut self, enricher: Box<dyn Enricher>) -> Self {
        self.enricher = enricher;
        self
    }

    /// Replaces the draft, e.g. with one read from a file
    pub fn with_draft(mut self, draft: Draft) -> Self {
        self.draft = draft;
        self
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn field(&self, field: FieldId) -> &str {
        self.draft.get(field)
    }

    pub fn set_field(&mut self, field: FieldId, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    pub fn clear(&mut self) {
        self.draft.clear_all();
        info!("Draft cleared");
    }

    /// Loads a template into the draft.
    ///
    /// Only the template's fields are overwritten. An unknown name leaves
    /// the draft untouched.
    pub fn load_template(&mut self, name: &str) -> Result<()> {
        let values = self.templates.load(name)?;
        self.draft.load_from(values);
        info!(template = name, fields = values.len(), "Template loaded");
        Ok(())
    }

    /// Saves the draft as a template and returns the name used
    pub fn save_template(&mut self, name: Option<&str>) -> String {
        self.save_template_at(name, Local::now().naive_local())
    }

    pub fn save_template_at(&mut self, name: Option<&str>, now: NaiveDateTime) -> String {
        self.templates
            .save_draft(&self.draft, name, self.config.template_name_chars, now)
    }

    /// Enriches one field in place and returns its new value
    pub fn enrich_field(&mut self, field: FieldId, style: Option<Style>) -> &str {
        let style = style.unwrap_or(self.config.default_style);
        let enriched = self.enricher.enrich(field, self.draft.get(field), style);
        self.draft.set(field, enriched);
        self.draft.get(field)
    }

    pub fn export(&self) -> Result<ExportedDocument> {
        let bytes = serialize(&self.draft, &ExportOptions::from(&self.config))?;
        let file_name =
            export_filename(self.draft.get(FieldId::Name), &self.config.filename_prefix)?;
        Ok(ExportedDocument { file_name, bytes })
    }

    /// Exports into `dir` (the configured output directory when `None`)
    /// and returns the written path.
    ///
    /// The document is written to a temporary file in `dir` and renamed
    /// into place, so a failed write never leaves a partial `.docx`.
    pub fn export_to(&self, dir: Option<&Path>) -> Result<PathBuf> {
        let document = self.export()?;
        let dir = dir.unwrap_or(self.config.output_dir.as_path());
        fs::create_dir_all(dir)?;

        let path = dir.join(&document.file_name);
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&document.bytes)?;
        file.as_file().sync_all()?;
        file.persist(&path).map_err(|e| e.error)?;
        info!("Proposal written to {:?}", path);
        Ok(path)
    }
}
