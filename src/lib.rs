/*!
 * # discourse-inject - discourse error injection for MT/PE corpora
 *
 * Rebuilds a post-edited (PE) corpus so that it carries the discourse errors
 * of the machine translation (MT) it was corrected from, and writes a
 * parallel copy where every reverted edit is annotated inline.
 *
 * ## Features
 *
 * - Structural (clausal) errors: whole lines replaced by their MT sentence
 * - Lexical errors: removed nouns put back, redirected to the nearest noun
 * - Connective errors: removed connectives put back at their aligned position
 * - Deletion of tokens the post-editor introduced
 * - Directory and doctext corpus layouts
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `corpus`: Corpus storage, loading, tokenization and doctext output
 * - `catalogue`: Structural, lexical/connective and alignment catalogues
 * - `injection`: The injection engine:
 *   - `injection::working`: Plain and tagged corpora mutated in lock step
 *   - `injection::resolver`: MT match and alignment lookup
 *   - `injection::noun_proximity`: Nearest-noun redirect for lexical edits
 *   - `injection::orchestrator`: Pass ordering and run statistics
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod catalogue;
pub mod corpus;
pub mod errors;
pub mod file_utils;
pub mod injection;

// Re-export main types for easier usage
pub use app_config::Config;
pub use corpus::{Corpus, DocId, ParallelCorpus};
pub use errors::{AppError, CatalogueError, CorpusError, InjectionError};
pub use injection::{ErrorKind, InjectionPipeline, InjectionReport};
