/*!
 * Error injection engine.
 *
 * Reverts post-editor corrections so that the PE corpus regains the
 * discourse errors the MT output contained, and records each reverted
 * edit as inline `<error>` markup in a parallel tagged copy.
 *
 * - `structural_pass`: whole lines replaced by MT
 * - `lexical_pass`: noun-level reinsertions, redirected via `noun_proximity`
 * - `connective_pass`: connective reinsertions with sentence-initial insertion
 * - `working`: the plain/tagged corpora under construction
 * - `orchestrator`: runs the passes in order and collects statistics
 */

pub mod connective_pass;
pub mod lexical_pass;
pub mod line_pass;
pub mod markup;
pub mod noun_proximity;
pub mod orchestrator;
pub mod resolver;
pub mod stats;
pub mod structural_pass;
pub mod tagger;
pub mod working;

pub use markup::{EditKind, ErrorKind, Markup};
pub use orchestrator::{ErrorSelection, InjectionInputs, InjectionPipeline, InjectionReport};
pub use stats::PassStats;
pub use tagger::{LexiconTagger, NlpruleTagger, NounTags, PosTagger, TaggedToken};
pub use working::{Channel, WorkingCorpus};
