//! Types for tokenizing, reading, and writing Well-Known Text
//!
//! Most users only need [WktReader](crate::WktReader) and
//! [WktWriter](crate::WktWriter), which are re-exported at the crate root.
//! The [Tokenizer] is exposed for building other whitespace sensitive
//! grammars on top of the same position tracking.
mod reader;
mod token;
mod tokenizer;
mod writer;

pub use self::reader::{WktReader, WktReaderBuilder};
pub use self::token::WktToken;
pub use self::tokenizer::{Lookahead, Token, TokenDefinition, Tokenizer};
pub use self::writer::{DefaultWriteVisitor, WktWriter, WriteVisitor};
