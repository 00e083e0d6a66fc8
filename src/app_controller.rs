use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_config::Config;
use crate::catalogue::{AlignmentIndex, EditCatalogue, StructuralErrorSet};
use crate::corpus::{load_corpus, ParallelCorpus};
use crate::file_utils::FileManager;
use crate::injection::{
    Channel, ErrorKind, InjectionInputs, InjectionPipeline, InjectionReport, LexiconTagger, NlpruleTagger,
    WorkingCorpus,
};

// @module: Application controller for error injection runs

/// Main application controller: loads inputs, runs the passes, writes outputs
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Plain and tagged output paths
    pub fn output_paths(&self) -> Result<(PathBuf, PathBuf)> {
        let output = self
            .config
            .output
            .clone()
            .ok_or_else(|| anyhow!("Output path is required"))?;
        let tagged = FileManager::tagged_output_path(&output);
        Ok((output, tagged))
    }

    /// Run the whole workflow.
    ///
    /// Returns `None` when an output already exists and `force_overwrite` is
    /// not set.
    pub fn run(&self, force_overwrite: bool) -> Result<Option<InjectionReport>> {
        let (output, tagged_output) = self.output_paths()?;
        if !force_overwrite && (output.exists() || tagged_output.exists()) {
            warn!("Skipping run, output already exists: {:?} (use -f to force overwrite)", output);
            return Ok(None);
        }

        let spinner = Self::spinner("Loading corpora and catalogues");
        let inputs = self.load_inputs();
        spinner.finish_and_clear();
        let inputs = inputs?;

        let tagger = self.build_tagger()?;
        let pipeline = InjectionPipeline::new(tagger)
            .with_noun_tags(self.config.tagger.noun_tag_set())
            .with_selection(self.config.error_kind);

        let spinner = Self::spinner("Injecting errors");
        let (working, report) = pipeline.run_with_progress(&inputs, |kind| {
            spinner.set_message(format!("Injecting {} errors", kind));
        });
        spinner.finish_and_clear();

        self.write_outputs(&working, &output, &tagged_output)?;

        for stats in &report.passes {
            info!("{}", stats);
        }
        info!("Success: {:?} and {:?}", output, tagged_output);
        Ok(Some(report))
    }

    /// Load corpora, catalogues and alignments for the selected error kinds
    pub fn load_inputs(&self) -> Result<InjectionInputs> {
        let corpus = self.load_parallel_corpus()?;
        let kinds = self.config.selected_kinds();

        let structural = match self.catalogue_path(&kinds, ErrorKind::Structural) {
            Some(path) => Some(
                StructuralErrorSet::from_file(&path)
                    .with_context(|| format!("Failed to load structural errors: {:?}", path))?,
            ),
            None => None,
        };
        let lexical = self.load_edit_catalogue(&kinds, ErrorKind::Lexical)?;
        let connective = self.load_edit_catalogue(&kinds, ErrorKind::Connective)?;

        let alignments = if lexical.is_some() || connective.is_some() {
            let path = self
                .config
                .inputs
                .alignments
                .as_ref()
                .ok_or_else(|| anyhow!("Alignment file is required for lexical and connective errors"))?;
            AlignmentIndex::from_file(path).with_context(|| format!("Failed to load alignments: {:?}", path))?
        } else {
            AlignmentIndex::new()
        };

        Ok(InjectionInputs {
            corpus,
            alignments,
            structural,
            lexical,
            connective,
        })
    }

    fn load_parallel_corpus(&self) -> Result<ParallelCorpus> {
        let layout = self.config.corpus.layout;
        let pe_path = self.config.inputs.pe.as_ref().ok_or_else(|| anyhow!("PE corpus path is required"))?;
        let mt_path = self.config.inputs.mt.as_ref().ok_or_else(|| anyhow!("MT corpus path is required"))?;

        let pe = load_corpus(pe_path, layout).with_context(|| format!("Failed to load PE corpus: {:?}", pe_path))?;
        let mt = load_corpus(mt_path, layout).with_context(|| format!("Failed to load MT corpus: {:?}", mt_path))?;
        info!(
            "Loaded {} PE documents ({} lines) and {} MT documents",
            pe.len(),
            pe.line_count(),
            mt.len()
        );
        Ok(ParallelCorpus::new(pe, mt))
    }

    // Configured catalogue path, when the kind is selected
    fn catalogue_path(&self, kinds: &[ErrorKind], kind: ErrorKind) -> Option<PathBuf> {
        if !kinds.contains(&kind) {
            return None;
        }
        let path = self.config.inputs.catalogue_path(kind);
        if path.is_none() {
            debug!("No {} catalogue configured, skipping pass", kind);
        }
        path
    }

    fn load_edit_catalogue(&self, kinds: &[ErrorKind], kind: ErrorKind) -> Result<Option<EditCatalogue>> {
        let Some(path) = self.catalogue_path(kinds, kind) else {
            return Ok(None);
        };
        let catalogue = EditCatalogue::from_file(&path)
            .with_context(|| format!("Failed to load {} errors: {:?}", kind, path))?;
        if !catalogue.malformed().is_empty() {
            warn!(
                "{} malformed {} records skipped in {:?}",
                catalogue.malformed().len(),
                kind,
                path
            );
        }
        Ok(Some(catalogue))
    }

    fn build_tagger(&self) -> Result<LexiconTagger> {
        let tagger = match &self.config.tagger.lexicon {
            Some(path) => LexiconTagger::from_lexicon_file(path)?,
            None => LexiconTagger::new(),
        };
        match &self.config.tagger.model {
            Some(model) => Ok(tagger.with_model(NlpruleTagger::from_model_file(model)?)),
            None => {
                if self.config.error_kind.includes(ErrorKind::Lexical) {
                    warn!("No tagger model configured; only lexicon words will be tagged");
                }
                Ok(tagger)
            }
        }
    }

    fn write_outputs(&self, working: &WorkingCorpus, output: &Path, tagged_output: &Path) -> Result<()> {
        if let Some(parent) = output.parent() {
            FileManager::ensure_dir(parent)?;
        }
        working.write_file(output, Channel::Plain)?;
        working.write_file(tagged_output, Channel::Tagged)?;
        debug!("Wrote {} documents", working.document_count());
        Ok(())
    }

    fn spinner(message: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .or_else(|_| ProgressStyle::default_spinner().template("{spinner} {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}
