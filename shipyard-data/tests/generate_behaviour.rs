//! Behavioural coverage for the generation pipeline over a temporary tree.

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use shipyard_core::test_support::CollectingWarnings;
use shipyard_data::{GenerateError, GenerationConfig, GenerationReport, generate};
use std::cell::RefCell;
use tempfile::TempDir;

type Outcome = RefCell<Option<Result<GenerationReport, GenerateError>>>;

struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn data_root(&self) -> Utf8PathBuf {
        self.root.join("data")
    }

    fn output_dir(&self) -> Utf8PathBuf {
        self.root.join("out")
    }

    fn seed(&self, files: &[(&str, &str)]) {
        for (relative, text) in files {
            shipyard_fs::write_file(&self.data_root().join(relative), text.as_bytes())
                .expect("seed source file");
        }
    }

    fn artefact(&self, relative: &str) -> Value {
        let text = shipyard_fs::read_utf8_to_string(&self.output_dir().join(relative))
            .unwrap_or_else(|err| panic!("artefact {relative} missing: {err}"));
        serde_json::from_str(&text).expect("artefact is json")
    }
}

const HUMAN_OUTFITS: &str = "outfit Laser\n\tcategory Guns\n\tcost 5000\n\tmass 3\n";

#[fixture]
fn workspace() -> Workspace {
    let dir = TempDir::new().expect("create temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
    Workspace { _dir: dir, root }
}

#[fixture]
fn sink() -> CollectingWarnings {
    CollectingWarnings::default()
}

#[fixture]
fn outcome() -> Outcome {
    RefCell::new(None)
}

fn data(artefact: &Value) -> &[Value] {
    match artefact["data"].as_array() {
        Some(records) => records,
        None => panic!("artefact has no data array"),
    }
}

#[given("a data tree with human and hai ships and outfits")]
fn full_tree(#[from(workspace)] ws: &Workspace) {
    ws.seed(&[
        (
            "human/ships.txt",
            concat!(
                "ship \"Shuttle\"\n",
                "\tsprite \"ship/shuttle\"\n",
                "\tattributes\n",
                "\t\tcategory \"Transport\"\n",
                "\t\t\"cost\" 180000\n",
                "\t\tmass 70\n",
                "\t\tdrag 1.7\n",
                "\toutfits\n",
                "\t\t\"Laser\" 2\n",
                "\tengine -6 30\n",
                "\tgun 0 -20\n",
                "\tdescription \"A small ship.\"\n",
                "\n",
                "ship \"Shuttle\" \"Shuttle (Armed)\"\n",
                "\tattributes\n",
                "\t\tmass 80\n",
            ),
        ),
        ("human/outfits.txt", HUMAN_OUTFITS),
        ("hai/hai ships.txt", "ship Aphid\n\tattributes\n\t\tmass 100\n"),
        (
            "hai/hai weapons.txt",
            "outfit \"Hai Tracker\"\n\tcategory \"Secondary Weapons\"\n\tcost 9000\n",
        ),
    ]);
}

#[given("a human ships file with 3 ships of which 1 has no name")]
fn one_nameless(#[from(workspace)] ws: &Workspace) {
    ws.seed(&[
        (
            "human/ships.txt",
            "ship Alpha\n\tattributes\n\t\tmass 10\nship\n\tattributes\n\t\tmass 5\nship Gamma\n",
        ),
        ("human/outfits.txt", HUMAN_OUTFITS),
    ]);
}

#[given("a data tree holding only outfits")]
fn only_outfits(#[from(workspace)] ws: &Workspace) {
    ws.seed(&[("human/outfits.txt", HUMAN_OUTFITS)]);
}

#[given("a human ships file that jumps two indentation levels")]
fn malformed(#[from(workspace)] ws: &Workspace) {
    ws.seed(&[
        ("human/ships.txt", "ship A\n\tattributes\n\t\t\tmass 5\n"),
        ("human/outfits.txt", HUMAN_OUTFITS),
    ]);
}

#[given("a valid hai tree and a human ships file that jumps two indentation levels")]
fn one_species_malformed(#[from(workspace)] ws: &Workspace) {
    ws.seed(&[
        ("hai/hai ships.txt", "ship Aphid\n\tattributes\n\t\tmass 100\n"),
        ("hai/hai outfits.txt", HUMAN_OUTFITS),
        ("human/ships.txt", "ship A\n\tattributes\n\t\t\tmass 5\n"),
        ("human/outfits.txt", HUMAN_OUTFITS),
    ]);
}

#[when("the data is generated for game version \"{version}\"")]
fn run_generation(
    version: String,
    #[from(workspace)] ws: &Workspace,
    #[from(sink)] warnings: &CollectingWarnings,
    #[from(outcome)] result: &Outcome,
) {
    let config = GenerationConfig::new(ws.data_root(), ws.output_dir(), version);
    *result.borrow_mut() = Some(generate(&config, warnings));
}

#[then("the artefact \"{path}\" holds {count} records")]
fn artefact_count(
    path: String,
    count: usize,
    #[from(workspace)] ws: &Workspace,
    #[from(outcome)] result: &Outcome,
) {
    assert!(
        matches!(result.borrow().as_ref(), Some(Ok(_))),
        "generation must succeed first"
    );
    let artefact = ws.artefact(&path);
    assert_eq!(data(&artefact).len(), count);
    assert_eq!(artefact["metadata"]["itemCount"], count);
}

#[then("every artefact has schema version \"{version}\"")]
fn schema_versions(version: String, #[from(workspace)] ws: &Workspace, #[from(outcome)] result: &Outcome) {
    let borrow = result.borrow();
    let Some(Ok(report)) = borrow.as_ref() else {
        panic!("generation must succeed first");
    };
    assert!(!report.batches.is_empty());
    let stamps: Vec<Value> = report
        .batches
        .iter()
        .map(|batch| {
            let relative = batch
                .path
                .strip_prefix(ws.output_dir())
                .expect("artefact inside output dir");
            ws.artefact(relative.as_str())["metadata"].clone()
        })
        .collect();
    for metadata in &stamps {
        assert_eq!(metadata["schemaVersion"], version.as_str());
    }
    let first = stamps.first().map(|metadata| metadata["generatedAt"].clone());
    assert!(stamps.iter().all(|metadata| Some(&metadata["generatedAt"]) == first.as_ref()));
}

#[then("ship \"{name}\" in \"{path}\" is a variant of \"{base}\"")]
fn variant_of(name: String, path: String, base: String, #[from(workspace)] ws: &Workspace) {
    let artefact = ws.artefact(&path);
    let ship = data(&artefact)
        .iter()
        .find(|ship| ship["name"] == name.as_str())
        .unwrap_or_else(|| panic!("no ship named {name}"));
    assert_eq!(ship["variantOf"], base.as_str());
}

#[then("{count} warnings are reported")]
fn warning_count(count: usize, #[from(sink)] warnings: &CollectingWarnings) {
    assert_eq!(warnings.messages().len(), count);
}

#[then("every warning is tagged with species \"{species}\"")]
fn warnings_tagged(species: String, #[from(sink)] warnings: &CollectingWarnings) {
    let prefix = format!("[{species}] dropping ship");
    for message in warnings.messages() {
        assert!(message.starts_with(&prefix), "unexpected warning: {message}");
    }
}

#[then("generation fails because no files match")]
fn fails_without_matches(#[from(outcome)] result: &Outcome) {
    assert!(
        matches!(
            result.borrow().as_ref(),
            Some(Err(GenerateError::NoMatchingFiles { .. }))
        ),
        "expected no matching files"
    );
}

#[then("generation fails to parse \"{file}\"")]
fn fails_to_parse(file: String, #[from(outcome)] result: &Outcome) {
    let borrow = result.borrow();
    match borrow.as_ref() {
        Some(Err(GenerateError::Parse { path, .. })) => assert!(path.ends_with(&file)),
        Some(Err(other)) => panic!("unexpected error: {other}"),
        Some(Ok(_)) => panic!("expected a parse failure"),
        None => panic!("generation must run first"),
    }
}

#[then("no artefacts are written")]
fn nothing_written(#[from(workspace)] ws: &Workspace) {
    let written = shipyard_fs::walk_utf8_files(&ws.output_dir()).unwrap_or_default();
    assert!(written.is_empty(), "unexpected artefacts: {written:?}");
}

#[scenario(path = "tests/features/generate.feature", index = 0)]
fn species_batches(workspace: Workspace, sink: CollectingWarnings, outcome: Outcome) {
    let _ = (workspace, sink, outcome);
}

#[scenario(path = "tests/features/generate.feature", index = 1)]
fn invalid_records_dropped(workspace: Workspace, sink: CollectingWarnings, outcome: Outcome) {
    let _ = (workspace, sink, outcome);
}

#[scenario(path = "tests/features/generate.feature", index = 2)]
fn missing_ship_files(workspace: Workspace, sink: CollectingWarnings, outcome: Outcome) {
    let _ = (workspace, sink, outcome);
}

#[scenario(path = "tests/features/generate.feature", index = 3)]
fn malformed_indentation(workspace: Workspace, sink: CollectingWarnings, outcome: Outcome) {
    let _ = (workspace, sink, outcome);
}

#[scenario(path = "tests/features/generate.feature", index = 4)]
fn failed_species_writes_nothing(workspace: Workspace, sink: CollectingWarnings, outcome: Outcome) {
    let _ = (workspace, sink, outcome);
}
