//! Core domain for the shipyard data pipeline.
//!
//! This crate turns the indentation-structured text of ship and outfit
//! definitions into validated records. It performs no I/O: callers hand it
//! file contents and receive parsed forests, transformed records and
//! normalized output types.
//!
//! ```
//! use shipyard_core::{
//!     LogWarnings, NormalizedShip, RecordKind, RecordSchema, TransformChain, extract_records,
//!     parse, validate_batch,
//! };
//!
//! # fn main() -> Result<(), shipyard_core::ParseError> {
//! let text = "ship \"Shuttle\"\n\tattributes\n\t\tmass 70\n\tgun -4 10\n";
//! let schema = RecordSchema::default();
//! let chain = TransformChain::ships(&schema);
//! let records = extract_records(&parse(text)?, RecordKind::Ship)
//!     .into_iter()
//!     .map(|record| chain.apply(record))
//!     .collect();
//! let ships: Vec<NormalizedShip> = validate_batch(records, &schema, None, &LogWarnings);
//! assert_eq!(ships[0].slug, "shuttle");
//! assert_eq!(ships[0].attributes["gun ports"], 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod model;
pub mod movement;
pub mod node;
pub mod parser;
pub mod record;
pub mod scalar;
pub mod schema;
pub mod slug;
pub mod transform;
pub mod validate;
pub mod value;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use model::{Batch, BatchMetadata, NormalizedOutfit, NormalizedShip, OutfitEntry, Position};
pub use movement::{MovementAttributes, MovementStats, format_stat, movement_stats};
pub use node::ParseNode;
pub use parser::{IndentConvention, ParseError, ParserOptions, parse, parse_with, tokenize};
pub use record::{RawRecord, RecordKind, extract_records};
pub use scalar::{ScalarSource, description_list, license_list};
pub use schema::RecordSchema;
pub use slug::slugify;
pub use transform::{Transform, TransformChain};
pub use validate::{
    DEFAULT_SPECIES, LogWarnings, Normalized, ValidationError, WarningSink, validate_batch,
};
pub use value::{FieldMap, WRAPPED_VALUE_KEY, token_scalar};
