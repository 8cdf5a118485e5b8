// Fightin' words: distinctive vocabulary between two corpora.
//
// Implements Monroe, Colaresi & Quinn (2008), "Fightin' Words: Lexical
// Feature Selection and Evaluation for Identifying the Content of Political
// Conflict": the log-odds-ratio with an informative Dirichlet prior,
// standardized by its estimated variance.
//
// Pipeline: counter (tokenize + count) -> counts (per-corpus totals)
// -> prior (smoothing) -> stats (z-scores) -> rank (ordered result).

pub mod config;
pub mod counter;
pub mod counts;
pub mod error;
pub mod extractor;
pub mod output;
pub mod prior;
pub mod rank;
pub mod stats;

pub use counter::{CountVectorizer, TermCounter};
pub use error::{FightinError, Result};
pub use extractor::{analyze, compute_distinctiveness, Analysis, FightinWords};
pub use prior::Prior;
pub use rank::RankedTerm;
