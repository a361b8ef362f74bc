//! End-to-end generation: discover, parse, transform, validate, publish.
//!
//! Publishing only starts once every species has been validated, so a
//! fatal error never leaves a partial set of fresh artefacts behind.
//!
//! Species are independent of one another and are processed in parallel
//! when the `parallel` feature is enabled. Within a species, records keep
//! file order and files keep path order, so artefacts are reproducible apart
//! from their timestamp. Every batch written by one run shares the same
//! `generatedAt`.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use shipyard_core::{
    Batch, Normalized, NormalizedOutfit, NormalizedShip, RawRecord, RecordKind, TransformChain,
    WarningSink, extract_records, parse_with, validate_batch,
};

use crate::artifact::{artifact_path, write_batch};
use crate::discover::{GameDataFile, discover};
use crate::{GenerateError, GenerationConfig, MetadataService};

/// Outcome of publishing one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Species the batch belongs to.
    pub species: String,
    /// Record kind held by the batch.
    pub kind: RecordKind,
    /// Records that passed validation.
    pub item_count: usize,
    /// Records rejected by validation.
    pub dropped: usize,
    /// Artefact location.
    pub path: Utf8PathBuf,
}

/// Summary of a generation run, ordered by species then kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// One entry per written artefact.
    pub batches: Vec<BatchReport>,
}

impl GenerationReport {
    /// Records published across all batches.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.batches.iter().map(|batch| batch.item_count).sum()
    }

    /// Records dropped across all batches.
    #[must_use]
    pub fn total_dropped(&self) -> usize {
        self.batches.iter().map(|batch| batch.dropped).sum()
    }

    /// The report for `species` and `kind`, if that artefact was written.
    #[must_use]
    pub fn batch(&self, species: &str, kind: RecordKind) -> Option<&BatchReport> {
        self.batches
            .iter()
            .find(|batch| batch.species == species && batch.kind == kind)
    }
}

/// Source files of one species, split by kind.
#[derive(Debug, Default)]
struct SpeciesSources {
    ships: Vec<GameDataFile>,
    outfits: Vec<GameDataFile>,
}

impl SpeciesSources {
    fn files(&self, kind: RecordKind) -> &[GameDataFile] {
        match kind {
            RecordKind::Ship => &self.ships,
            RecordKind::Outfit => &self.outfits,
        }
    }

    const fn files_mut(&mut self, kind: RecordKind) -> &mut Vec<GameDataFile> {
        match kind {
            RecordKind::Ship => &mut self.ships,
            RecordKind::Outfit => &mut self.outfits,
        }
    }
}

/// Shared, read-only state for one run.
struct RunContext<'a> {
    config: &'a GenerationConfig,
    metadata: MetadataService,
    generated_at: DateTime<Utc>,
    ships: TransformChain,
    outfits: TransformChain,
    sink: &'a dyn WarningSink,
}

impl RunContext<'_> {
    const fn chain(&self, kind: RecordKind) -> &TransformChain {
        match kind {
            RecordKind::Ship => &self.ships,
            RecordKind::Outfit => &self.outfits,
        }
    }
}

/// A validated batch waiting to be written.
struct PreparedBatch {
    species: String,
    dropped: usize,
    records: PreparedRecords,
}

enum PreparedRecords {
    Ships(Batch<NormalizedShip>),
    Outfits(Batch<NormalizedOutfit>),
}

impl PreparedBatch {
    const fn kind(&self) -> RecordKind {
        match self.records {
            PreparedRecords::Ships(_) => RecordKind::Ship,
            PreparedRecords::Outfits(_) => RecordKind::Outfit,
        }
    }

    fn item_count(&self) -> usize {
        match &self.records {
            PreparedRecords::Ships(batch) => batch.data.len(),
            PreparedRecords::Outfits(batch) => batch.data.len(),
        }
    }

    fn write(&self, output_dir: &Utf8Path) -> Result<BatchReport, GenerateError> {
        let kind = self.kind();
        let path = artifact_path(output_dir, &self.species, kind);
        match &self.records {
            PreparedRecords::Ships(batch) => write_batch(&path, batch)?,
            PreparedRecords::Outfits(batch) => write_batch(&path, batch)?,
        }
        let item_count = self.item_count();
        log::info!(
            "wrote {item_count} {} for {} to {path} ({} dropped)",
            kind.plural(),
            self.species,
            self.dropped
        );
        Ok(BatchReport {
            species: self.species.clone(),
            kind,
            item_count,
            dropped: self.dropped,
            path,
        })
    }
}

/// Run the whole pipeline described by `config`.
///
/// Rejected records are reported through `sink` and never abort the run.
/// An artefact is written for every species and kind that had at least one
/// matching file, even when no record survived validation. Every species is
/// parsed and validated before the first artefact is written, so a failed
/// run leaves the output directory untouched.
///
/// # Errors
/// Fails on invalid patterns, when a kind has no matching files, on
/// unreadable or malformed source files, and when artefacts cannot be
/// written.
pub fn generate(
    config: &GenerationConfig,
    sink: &dyn WarningSink,
) -> Result<GenerationReport, GenerateError> {
    let mut species: BTreeMap<String, SpeciesSources> = BTreeMap::new();
    for kind in RecordKind::ALL {
        let patterns = config.patterns.compile(kind)?;
        let files = discover(&config.data_root, &patterns)?;
        log::info!(
            "found {} {} files under {}",
            files.len(),
            kind,
            config.data_root
        );
        for file in files {
            species
                .entry(file.species.clone())
                .or_default()
                .files_mut(kind)
                .push(file);
        }
    }

    let context = RunContext {
        config,
        metadata: MetadataService::from_config(config),
        generated_at: Utc::now(),
        ships: TransformChain::ships(&config.schema),
        outfits: TransformChain::outfits(&config.schema),
        sink,
    };
    let units: Vec<(String, SpeciesSources)> = species.into_iter().collect();
    let prepared: Vec<PreparedBatch> = prepare_all(&context, &units)?
        .into_iter()
        .flatten()
        .collect();

    shipyard_fs::ensure_dir(&config.output_dir).map_err(|source| {
        GenerateError::CreateOutputDirectory {
            path: config.output_dir.clone(),
            source,
        }
    })?;
    let batches = prepared
        .iter()
        .map(|batch| batch.write(&config.output_dir))
        .collect::<Result<Vec<_>, _>>()?;

    let report = GenerationReport { batches };
    log::info!(
        "published {} records in {} artefacts ({} dropped)",
        report.total_items(),
        report.batches.len(),
        report.total_dropped()
    );
    Ok(report)
}

#[cfg(feature = "parallel")]
fn prepare_all(
    context: &RunContext<'_>,
    units: &[(String, SpeciesSources)],
) -> Result<Vec<Vec<PreparedBatch>>, GenerateError> {
    units
        .par_iter()
        .map(|(species, sources)| prepare_species(context, species, sources))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn prepare_all(
    context: &RunContext<'_>,
    units: &[(String, SpeciesSources)],
) -> Result<Vec<Vec<PreparedBatch>>, GenerateError> {
    units
        .iter()
        .map(|(species, sources)| prepare_species(context, species, sources))
        .collect()
}

/// Batches of one species, ships before outfits.
fn prepare_species(
    context: &RunContext<'_>,
    species: &str,
    sources: &SpeciesSources,
) -> Result<Vec<PreparedBatch>, GenerateError> {
    let mut prepared = Vec::new();
    for kind in RecordKind::ALL {
        let files = sources.files(kind);
        if files.is_empty() {
            continue;
        }
        let records = collect_records(context, files, kind)?;
        let total = records.len();
        let (records, item_count) = match kind {
            RecordKind::Ship => {
                let batch = validated::<NormalizedShip>(context, species, records);
                let count = batch.data.len();
                (PreparedRecords::Ships(batch), count)
            }
            RecordKind::Outfit => {
                let batch = validated::<NormalizedOutfit>(context, species, records);
                let count = batch.data.len();
                (PreparedRecords::Outfits(batch), count)
            }
        };
        prepared.push(PreparedBatch {
            species: species.to_owned(),
            dropped: total - item_count,
            records,
        });
    }
    Ok(prepared)
}

fn collect_records(
    context: &RunContext<'_>,
    files: &[GameDataFile],
    kind: RecordKind,
) -> Result<Vec<RawRecord>, GenerateError> {
    let chain = context.chain(kind);
    let mut records = Vec::new();
    for file in files {
        let forest =
            parse_with(&file.content, &context.config.parser).map_err(|source| {
                GenerateError::Parse {
                    path: context.config.data_root.join(&file.path),
                    source,
                }
            })?;
        let extracted = extract_records(&forest, kind);
        log::debug!("{}: {} {} records", file.path, extracted.len(), kind);
        records.extend(extracted.into_iter().map(|record| chain.apply(record)));
    }
    Ok(records)
}

fn validated<T: Normalized>(
    context: &RunContext<'_>,
    species: &str,
    records: Vec<RawRecord>,
) -> Batch<T> {
    let data: Vec<T> = validate_batch(
        records,
        &context.config.schema,
        Some(species),
        context.sink,
    );
    Batch {
        metadata: context
            .metadata
            .create_metadata_at(species, data.len(), context.generated_at),
        data,
    }
}
