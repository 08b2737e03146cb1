// pipeline.rs - Load, measure, classify, write

use crate::cli::check_output_paths;
use crate::core::{classify, Classification, DetectorRegistry, DistanceMatrix, DistanceModel};
use crate::data::Alignment;
use crate::error::PruneError;
use crate::output::{write_matrix, write_prune_list, write_report, PruneReport, DEFAULT_FORMAT};
use log::{info, warn};
use std::path::Path;

/// Everything one pruning run needs
#[derive(Debug, Clone)]
pub struct PruneRequest {
    pub alignment: String,
    pub cutoff: f64,
    pub prune_output: String,
    pub model: DistanceModel,
    pub strategy: String,
    pub distances: Option<String>,
    pub format: String,
    pub report: Option<String>,
    pub command_line: String,
}

impl PruneRequest {
    /// Request with default model, strategy and no extra outputs
    pub fn new(alignment: &str, cutoff: f64, prune_output: &str) -> Self {
        Self {
            alignment: alignment.to_string(),
            cutoff,
            prune_output: prune_output.to_string(),
            model: DistanceModel::default(),
            strategy: crate::core::outliers::DEFAULT_DETECTOR.to_string(),
            distances: None,
            format: DEFAULT_FORMAT.to_string(),
            report: None,
            command_line: String::new(),
        }
    }
}

/// What a run produced
#[derive(Debug, Clone, PartialEq)]
pub struct PruneOutcome {
    pub sequences: usize,
    pub columns: usize,
    pub outliers: Vec<String>,
    pub reference: Option<String>,
    pub safeguard_triggered: bool,
}

/// Run the whole pipeline. Nothing is written unless loading, distance
/// computation and classification all succeed.
pub fn run(request: &PruneRequest) -> Result<PruneOutcome, PruneError> {
    let registry = DetectorRegistry::new();
    let detector = registry.get_detector(&request.strategy).ok_or_else(|| {
        PruneError::Argument(format!(
            "Invalid strategy '{}'. Available: {}",
            request.strategy,
            registry.get_detector_names().join(", ")
        ))
    })?;

    let outputs: Vec<&str> = std::iter::once(request.prune_output.as_str())
        .chain(request.distances.as_deref())
        .chain(request.report.as_deref())
        .collect();
    check_output_paths(&request.alignment, &outputs)?;

    let alignment = Alignment::from_fasta(Path::new(&request.alignment))?;
    for sequence in alignment.sequences() {
        if sequence.informative_sites() == 0 {
            warn!(
                "⚠️  Sequence '{}' has no unambiguous nucleotide; it is infinitely distant from every other",
                sequence.id
            );
        }
    }
    let matrix = DistanceMatrix::from_alignment(&alignment, request.model)?;

    info!(
        "🔍 Classifying {} sequences (cutoff: {}, strategy: {})",
        matrix.len(),
        request.cutoff,
        detector.name()
    );
    let classification = classify(&matrix, request.cutoff, detector)?;
    let outliers: Vec<String> = classification
        .outlier_ids(&matrix)
        .into_iter()
        .map(String::from)
        .collect();
    info!(
        "📊 {} of {} sequences flagged for pruning",
        outliers.len(),
        matrix.len()
    );

    write_prune_list(&request.prune_output, &outliers)?;

    if let Some(path) = &request.distances {
        write_matrix(path, &request.format, &matrix, &request.command_line)?;
    }

    let reference = classification.reference.map(|i| matrix.id(i).to_string());

    if let Some(path) = &request.report {
        let report = build_report(request, &alignment, &classification, reference.clone(), &outliers);
        write_report(path, &report)?;
    }

    Ok(PruneOutcome {
        sequences: alignment.len(),
        columns: alignment.width(),
        outliers,
        reference,
        safeguard_triggered: classification.safeguard_triggered,
    })
}

fn build_report(
    request: &PruneRequest,
    alignment: &Alignment,
    classification: &Classification,
    reference: Option<String>,
    outliers: &[String],
) -> PruneReport {
    PruneReport {
        version: crate::VERSION.to_string(),
        generated: chrono::Utc::now()
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        alignment: request.alignment.clone(),
        prune_output: request.prune_output.clone(),
        cutoff: request.cutoff,
        model: request.model,
        strategy: request.strategy.clone(),
        sequences: alignment.len(),
        columns: alignment.width(),
        branch: classification.branch,
        reference,
        flagged_before_safeguard: classification.flagged_before_safeguard,
        safeguard_triggered: classification.safeguard_triggered,
        outliers: outliers.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_fasta(dir: &TempDir, name: &str, records: &[(&str, &str)]) -> PathBuf {
        let path = dir.path().join(name);
        let content: String = records
            .iter()
            .map(|(id, seq)| format!(">{}\n{}\n", id, seq))
            .collect();
        fs::write(&path, content).unwrap();
        path
    }

    /// 20 columns: seq2 differs from seq1 at `diffs` positions
    fn pair_alignment(diffs: usize) -> Vec<(String, String)> {
        let base = "ACGTACGTACGTACGTACGT".to_string();
        let mut other: Vec<u8> = base.clone().into_bytes();
        for site in other.iter_mut().take(diffs) {
            *site = if *site == b'A' { b'C' } else { b'A' };
        }
        vec![
            ("seq1".to_string(), base),
            ("seq2".to_string(), String::from_utf8(other).unwrap()),
        ]
    }

    fn as_refs(records: &[(String, String)]) -> Vec<(&str, &str)> {
        records.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect()
    }

    fn request(dir: &TempDir, fasta: &Path, cutoff: f64) -> PruneRequest {
        let mut request = PruneRequest::new(
            fasta.to_str().unwrap(),
            cutoff,
            dir.path().join("prune.txt").to_str().unwrap(),
        );
        request.model = DistanceModel::Raw;
        request
    }

    fn five_sequences() -> Vec<(&'static str, &'static str)> {
        vec![
            ("s1", "ACGTACGTACGTACGTACGT"),
            ("s2", "ACGTACGTACGTACGTACGA"),
            ("s3", "ACGTACGTACGTACGTACTT"),
            ("s4", "TGCATGCAACGTACGTACGT"),
            ("s5", "ACGTTGCATGCAACGTACGT"),
        ]
    }

    #[test]
    fn test_two_sequences_below_cutoff_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        // 1 of 20 sites differs: d = 0.05
        let fasta = write_fasta(&dir, "aln.fasta", &as_refs(&pair_alignment(1)));
        let req = request(&dir, &fasta, 0.10);

        let outcome = run(&req).unwrap();
        assert!(outcome.outliers.is_empty());
        assert_eq!(fs::read_to_string(&req.prune_output).unwrap(), "");
    }

    #[test]
    fn test_two_sequences_above_cutoff_writes_both() {
        let dir = tempfile::tempdir().unwrap();
        // 3 of 20 sites differ: d = 0.15
        let fasta = write_fasta(&dir, "aln.fasta", &as_refs(&pair_alignment(3)));
        let req = request(&dir, &fasta, 0.10);

        let outcome = run(&req).unwrap();
        assert_eq!(outcome.outliers, vec!["seq1", "seq2"]);
        assert_eq!(
            fs::read_to_string(&req.prune_output).unwrap(),
            "seq1\nseq2\n"
        );
    }

    #[test]
    fn test_five_sequences_two_outliers() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = write_fasta(&dir, "aln.fasta", &five_sequences());
        let req = request(&dir, &fasta, 0.10);

        let outcome = run(&req).unwrap();
        assert_eq!(outcome.reference.as_deref(), Some("s1"));
        assert_eq!(outcome.outliers, vec!["s4", "s5"]);
        assert!(!outcome.safeguard_triggered);
        assert_eq!(fs::read_to_string(&req.prune_output).unwrap(), "s4\ns5\n");
    }

    #[test]
    fn test_five_sequences_safeguard_prunes_all() {
        let dir = tempfile::tempdir().unwrap();
        // s1 is central but each other sequence carries 4 private differences
        let fasta = write_fasta(
            &dir,
            "aln.fasta",
            &[
                ("s1", "AAAAAAAAAAAAAAAAAAAA"),
                ("s2", "CCCCAAAAAAAAAAAAAAAA"),
                ("s3", "AAAACCCCAAAAAAAAAAAA"),
                ("s4", "AAAAAAAACCCCAAAAAAAA"),
                ("s5", "AAAAAAAAAAAACCCCAAAA"),
            ],
        );
        let req = request(&dir, &fasta, 0.10);

        let outcome = run(&req).unwrap();
        assert!(outcome.safeguard_triggered);
        assert_eq!(
            fs::read_to_string(&req.prune_output).unwrap(),
            "s1\ns2\ns3\ns4\ns5\n"
        );
    }

    #[test]
    fn test_unequal_lengths_fail_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = write_fasta(&dir, "aln.fasta", &[("a", "ACGTACGT"), ("b", "ACGTAC")]);
        let req = request(&dir, &fasta, 0.10);

        let err = run(&req).unwrap_err();
        assert!(matches!(err, PruneError::Parse(_)));
        assert!(!Path::new(&req.prune_output).exists());
    }

    #[test]
    fn test_single_sequence_is_computation_error() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = write_fasta(&dir, "aln.fasta", &[("only", "ACGT")]);
        let req = request(&dir, &fasta, 0.10);

        assert!(matches!(run(&req), Err(PruneError::Computation(_))));
        assert!(!Path::new(&req.prune_output).exists());
    }

    #[test]
    fn test_idempotent_output() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = write_fasta(&dir, "aln.fasta", &five_sequences());
        let req = request(&dir, &fasta, 0.10);

        run(&req).unwrap();
        let first = fs::read(&req.prune_output).unwrap();
        run(&req).unwrap();
        let second = fs::read(&req.prune_output).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_monotone_across_cutoffs() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = write_fasta(&dir, "aln.fasta", &five_sequences());

        let mut previous = usize::MAX;
        for cutoff in [0.0, 0.04, 0.06, 0.2, 0.45, 0.6, 1.0] {
            let mut req = request(&dir, &fasta, cutoff);
            req.model = DistanceModel::K80;
            let count = run(&req).unwrap().outliers.len();
            assert!(count <= previous, "cutoff {} grew the set", cutoff);
            previous = count;
        }
    }

    #[test]
    fn test_extra_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = write_fasta(&dir, "aln.fasta", &five_sequences());
        let mut req = request(&dir, &fasta, 0.10);
        req.distances = Some(dir.path().join("out/dist.tsv").to_str().unwrap().to_string());
        req.report = Some(dir.path().join("out/run.json").to_str().unwrap().to_string());

        run(&req).unwrap();

        let matrix = fs::read_to_string(req.distances.as_ref().unwrap()).unwrap();
        assert!(matrix.contains("Sequence\ts1\ts2\ts3\ts4\ts5"));

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(req.report.as_ref().unwrap()).unwrap())
                .unwrap();
        assert_eq!(report["sequences"], 5);
        assert_eq!(report["reference"], "s1");
        assert_eq!(report["strategy"], "medoid");
    }

    #[test]
    fn test_non_overlapping_fragments_are_pruned() {
        let dir = tempfile::tempdir().unwrap();
        // s4 and s5 cover opposite halves of the alignment and never overlap
        let fasta = write_fasta(
            &dir,
            "aln.fasta",
            &[
                ("s1", "ACGTACGTACGTACGTACGT"),
                ("s2", "ACGTACGTACGTACGTACGA"),
                ("s3", "ACGTACGTACGTACGTACTT"),
                ("s4", "ACGTACGTAC----------"),
                ("s5", "----------AAAAAAAAAA"),
            ],
        );
        let mut req = request(&dir, &fasta, 0.10);
        req.distances = Some(dir.path().join("dist.tsv").to_str().unwrap().to_string());

        let outcome = run(&req).unwrap();
        assert_eq!(outcome.outliers, vec!["s5"]);
        assert_eq!(fs::read_to_string(&req.prune_output).unwrap(), "s5\n");

        let matrix = fs::read_to_string(req.distances.as_ref().unwrap()).unwrap();
        assert!(matrix.contains("s4\t0.000000\t0.000000\t0.000000\t0.000000\tinf"));
    }

    #[test]
    fn test_two_disjoint_fragments_are_both_pruned() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = write_fasta(&dir, "aln.fasta", &[("a", "ACGT----"), ("b", "----ACGT")]);
        let req = request(&dir, &fasta, 0.5);

        let outcome = run(&req).unwrap();
        assert_eq!(outcome.outliers, vec!["a", "b"]);
        assert_eq!(fs::read_to_string(&req.prune_output).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_shared_output_paths_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = write_fasta(&dir, "aln.fasta", &five_sequences());
        let mut req = request(&dir, &fasta, 0.10);
        req.distances = Some(req.prune_output.clone());

        assert!(matches!(run(&req), Err(PruneError::Argument(_))));
        assert!(!Path::new(&req.prune_output).exists());

        req.distances = None;
        req.report = Some(req.prune_output.clone());
        assert!(matches!(run(&req), Err(PruneError::Argument(_))));
        assert!(!Path::new(&req.prune_output).exists());
    }

    #[test]
    fn test_unknown_strategy() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = write_fasta(&dir, "aln.fasta", &five_sequences());
        let mut req = request(&dir, &fasta, 0.10);
        req.strategy = "knn".to_string();
        assert!(matches!(run(&req), Err(PruneError::Argument(_))));
    }
}
