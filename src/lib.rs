//! Facade crate for the shipyard data pipeline.
//!
//! This crate re-exports the core domain types and the generation entry
//! points. Parallel species processing sits behind the `parallel` feature.

#![forbid(unsafe_code)]

pub use shipyard_core::{
    Batch, BatchMetadata, LogWarnings, MovementStats, Normalized, NormalizedOutfit,
    NormalizedShip, OutfitEntry, ParseError, ParseNode, ParserOptions, Position, RawRecord,
    RecordKind, RecordSchema, TransformChain, ValidationError, WarningSink, extract_records,
    format_stat, movement_stats, parse, parse_with, slugify, validate_batch,
};

pub use shipyard_data::{
    GenerateError, GenerationConfig, GenerationReport, MetadataService, SourcePatterns, generate,
};
