// Term counting: turning raw documents into per-document term frequencies.
//
// The statistic itself never looks at text. It only needs a vocabulary and a
// document-term matrix, so everything text-specific lives behind the
// TermCounter trait and can be swapped for a caller's own tokenizer.

pub mod decode;
pub mod traits;
pub mod vectorizer;
pub mod vocabulary;

pub use decode::{decode_document, DecodePolicy};
pub use traits::TermCounter;
pub use vectorizer::{CountVectorizer, StopWords, TermWeighting, DEFAULT_MAX_FEATURES};
pub use vocabulary::{DocumentTermMatrix, Vocabulary};
