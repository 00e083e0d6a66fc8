/*!
 * Pipeline orchestrator for the injection passes.
 *
 * Passes run in a fixed order over one shared working corpus:
 * 1. Structural pass: whole lines replaced by MT
 * 2. Lexical pass: noun-level reinsertions and deletions
 * 3. Connective pass: connective reinsertions and deletions
 *
 * Each pass sees the state left by the previous one. Lines claimed by the
 * structural pass are excluded from the token-level passes.
 */

use std::fmt;
use std::time::{Duration, Instant};

use log::info;
use serde::{Deserialize, Serialize};

use super::connective_pass::ConnectivePass;
use super::lexical_pass::LexicalPass;
use super::line_pass::{PassContext, run_line_pass};
use super::markup::ErrorKind;
use super::stats::PassStats;
use super::structural_pass::run_structural_pass;
use super::tagger::{NounTags, PosTagger};
use super::working::WorkingCorpus;
use crate::catalogue::{AlignmentIndex, EditCatalogue, StructuralErrorSet};
use crate::corpus::ParallelCorpus;

/// Which error kinds to inject
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSelection {
    #[default]
    All,
    Structural,
    Lexical,
    Connective,
}

impl ErrorSelection {
    pub fn includes(&self, kind: ErrorKind) -> bool {
        match self {
            Self::All => true,
            Self::Structural => kind == ErrorKind::Structural,
            Self::Lexical => kind == ErrorKind::Lexical,
            Self::Connective => kind == ErrorKind::Connective,
        }
    }
}

impl fmt::Display for ErrorSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::All => "all",
            Self::Structural => "structural",
            Self::Lexical => "lexical",
            Self::Connective => "connective",
        };
        f.write_str(name)
    }
}

/// Everything a run reads
#[derive(Debug, Default)]
pub struct InjectionInputs {
    pub corpus: ParallelCorpus,
    pub alignments: AlignmentIndex,
    pub structural: Option<StructuralErrorSet>,
    pub lexical: Option<EditCatalogue>,
    pub connective: Option<EditCatalogue>,
}

impl InjectionInputs {
    pub fn new(corpus: ParallelCorpus, alignments: AlignmentIndex) -> Self {
        Self {
            corpus,
            alignments,
            ..Default::default()
        }
    }

    pub fn with_structural(mut self, structural: StructuralErrorSet) -> Self {
        self.structural = Some(structural);
        self
    }

    pub fn with_lexical(mut self, catalogue: EditCatalogue) -> Self {
        self.lexical = Some(catalogue);
        self
    }

    pub fn with_connective(mut self, catalogue: EditCatalogue) -> Self {
        self.connective = Some(catalogue);
        self
    }
}

/// Result of a complete run
#[derive(Debug, Clone)]
pub struct InjectionReport {
    /// Per-pass statistics, in run order
    pub passes: Vec<PassStats>,

    /// Number of documents in the output
    pub documents: usize,

    pub duration: Duration,
}

impl InjectionReport {
    pub fn pass(&self, kind: ErrorKind) -> Option<&PassStats> {
        self.passes.iter().find(|stats| stats.kind == kind)
    }

    /// Total token mutations plus replaced lines
    pub fn total_edits(&self) -> usize {
        self.passes
            .iter()
            .map(|stats| match stats.kind {
                ErrorKind::Structural => stats.lines_processed,
                _ => stats.edits(),
            })
            .sum()
    }

    /// One-line summary of the run
    pub fn summary(&self) -> String {
        format!(
            "{} documents, {} passes, {} edits in {:.2}s",
            self.documents,
            self.passes.len(),
            self.total_edits(),
            self.duration.as_secs_f32()
        )
    }
}

impl fmt::Display for InjectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        for stats in &self.passes {
            writeln!(f, "  {}", stats)?;
        }
        Ok(())
    }
}

/// Runs the selected passes over a parallel corpus
pub struct InjectionPipeline<T: PosTagger> {
    tagger: T,
    nouns: NounTags,
    selection: ErrorSelection,
}

impl<T: PosTagger> InjectionPipeline<T> {
    pub fn new(tagger: T) -> Self {
        Self {
            tagger,
            nouns: NounTags::default(),
            selection: ErrorSelection::default(),
        }
    }

    pub fn with_noun_tags(mut self, nouns: NounTags) -> Self {
        self.nouns = nouns;
        self
    }

    pub fn with_selection(mut self, selection: ErrorSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Run every selected pass; see `run_with_progress`
    pub fn run(&self, inputs: &InjectionInputs) -> (WorkingCorpus, InjectionReport) {
        self.run_with_progress(inputs, |_| {})
    }

    /// Run every selected pass, calling `on_pass` before each one starts.
    ///
    /// Passes whose catalogue was not supplied are skipped.
    pub fn run_with_progress<F>(&self, inputs: &InjectionInputs, mut on_pass: F) -> (WorkingCorpus, InjectionReport)
    where
        F: FnMut(ErrorKind),
    {
        let start = Instant::now();
        let mut working = WorkingCorpus::from_corpus(&inputs.corpus.pe);
        let mut passes = Vec::new();

        let exclusions = match &inputs.structural {
            Some(structural) if self.selection.includes(ErrorKind::Structural) => {
                on_pass(ErrorKind::Structural);
                passes.push(run_structural_pass(structural, &inputs.corpus, &mut working));
                Some(structural)
            }
            _ => None,
        };

        let context = PassContext {
            corpus: &inputs.corpus,
            alignments: &inputs.alignments,
            exclusions,
        };

        if let Some(catalogue) = inputs.lexical.as_ref().filter(|_| self.selection.includes(ErrorKind::Lexical)) {
            on_pass(ErrorKind::Lexical);
            let pass = LexicalPass::new(&self.tagger).with_noun_tags(self.nouns.clone());
            passes.push(run_line_pass(&pass, catalogue, context, &mut working));
        }

        if let Some(catalogue) = inputs
            .connective
            .as_ref()
            .filter(|_| self.selection.includes(ErrorKind::Connective))
        {
            on_pass(ErrorKind::Connective);
            passes.push(run_line_pass(&ConnectivePass::new(), catalogue, context, &mut working));
        }

        let report = InjectionReport {
            passes,
            documents: working.document_count(),
            duration: start.elapsed(),
        };
        info!("Injection finished: {}", report.summary());
        (working, report)
    }
}
