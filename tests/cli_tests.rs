//! Tests for the spacer-counter binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PRIMER: &str = "AACTTGCTATTTCTAGCTCTAAAAC";
const G1: &str = "ACGTACGTTTGCAAGCTAGC";
const G2: &str = "GGGGCCCCAAAATTTTGGGG";

fn write_inputs(dir: &Path, library: &str, reads: &[String]) -> (String, String, String) {
    let library_path = dir.join("library.csv");
    fs::write(&library_path, library).unwrap();

    let mut fastq = String::new();
    for (i, seq) in reads.iter().enumerate() {
        fastq.push_str(&format!("@read{i}\n{seq}\n+\n{}\n", "F".repeat(seq.len())));
    }
    let fastq_path = dir.join("reads.fastq");
    fs::write(&fastq_path, fastq).unwrap();

    let prefix = dir.join("sample1");
    (
        library_path.to_string_lossy().into_owned(),
        fastq_path.to_string_lossy().into_owned(),
        prefix.to_string_lossy().into_owned(),
    )
}

fn standard_library() -> String {
    format!("g1,{G1},GENE1\ng2,{G2},GENE2\n")
}

fn spacer_counter() -> Command {
    Command::cargo_bin("spacer-counter").unwrap()
}

#[test]
fn test_count_writes_tables_and_stats() {
    let dir = TempDir::new().unwrap();
    let reads = vec![format!("TT{G1}AA"), format!("{G2}"), format!("{G1}")];
    let (library, fastq, prefix) = write_inputs(dir.path(), &standard_library(), &reads);

    spacer_counter()
        .args(["count", "-l", &library, "-f", &fastq, "-o", &prefix])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reads:        3"));

    let counts = fs::read_to_string(format!("{prefix}.counts")).unwrap();
    assert_eq!(counts, format!("g1,{G1},GENE1,2\ng2,{G2},GENE2,1\n"));

    let stats = fs::read_to_string(format!("{prefix}.stats")).unwrap();
    let lines: Vec<&str> = stats.lines().collect();
    assert_eq!(
        lines[0],
        "sample_name,num_reads,num_reads_with_guide,perc_mapped_reads,perc_undetected_guides,skew_ratio,sgRNA_library_size"
    );
    assert!(lines[1].starts_with("sample1,3,3,100.0,0.0,"));
    assert!(lines[1].ends_with(",2"));

    assert!(!Path::new(&format!("{prefix}.counts.stringent")).exists());
}

#[test]
fn test_count_with_primer_tiers() {
    let dir = TempDir::new().unwrap();
    let reads = vec![format!("{PRIMER}{G1}"), format!("CCCCCCCCCCCCCCCCCCCCCCCCC{G1}")];
    let (library, fastq, prefix) = write_inputs(dir.path(), &standard_library(), &reads);

    spacer_counter()
        .args(["count", "-l", &library, "-f", &fastq, "-o", &prefix, "--primer-tiers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Primer validation over 2 hits"));

    let stringent = fs::read_to_string(format!("{prefix}.counts.stringent")).unwrap();
    assert!(stringent.starts_with(&format!("g1,{G1},GENE1,1\n")));
    assert!(Path::new(&format!("{prefix}.counts.fuzzykey")).exists());
    assert!(Path::new(&format!("{prefix}.stats.stringent")).exists());
}

#[test]
fn test_count_json_summary() {
    let dir = TempDir::new().unwrap();
    let library = format!("{}g3,TTGACCATGGCATCGATCGA,GENE3\n", standard_library());
    let reads = vec![format!("{G1}"), "ACACACACACACACACACACAC".to_string()];
    let (library, fastq, prefix) = write_inputs(dir.path(), &library, &reads);

    let output = spacer_counter()
        .args(["--format", "json", "count", "-l", &library, "-f", &fastq, "-o", &prefix])
        .args(["--label", "screenA"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["sample_name"], "screenA");
    assert_eq!(summary["num_reads"], 2);
    assert_eq!(summary["tiers"][0]["tier"], "default");
    assert_eq!(summary["library_size"], 3);
    assert_eq!(summary["tiers"][0]["statistics"]["percent_mapped"], 50.0);
    assert_eq!(summary["tiers"][0]["statistics"]["skew_ratio"], "insufficient_data");
}

#[test]
fn test_count_no_match_fails_after_writing_counts() {
    let dir = TempDir::new().unwrap();
    let reads = vec!["TTTTTTTTTTTTTTTTTTTTTTTT".to_string()];
    let (library, fastq, prefix) = write_inputs(dir.path(), &standard_library(), &reads);

    spacer_counter()
        .args(["count", "-l", &library, "-f", &fastq, "-o", &prefix])
        .assert()
        .failure()
        .stderr(predicate::str::contains("forward or a reverse library"));

    let counts = fs::read_to_string(format!("{prefix}.counts")).unwrap();
    assert_eq!(counts, format!("g1,{G1},GENE1,0\ng2,{G2},GENE2,0\n"));
    assert!(!Path::new(&format!("{prefix}.stats")).exists());
}

#[test]
fn test_count_malformed_library_fails() {
    let dir = TempDir::new().unwrap();
    let library = format!("g1,{G1},GENE1\ng2,{G2}\n");
    let (library, fastq, prefix) = write_inputs(dir.path(), &library, &[G1.to_string()]);

    spacer_counter()
        .args(["count", "-l", &library, "-f", &fastq, "-o", &prefix])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));

    assert!(!Path::new(&format!("{prefix}.counts")).exists());
}

#[test]
fn test_count_reverse_flag() {
    let dir = TempDir::new().unwrap();
    // Reverse complement of G1
    let reads = vec!["GCTAGCTTGCAAACGTACGT".to_string()];
    let (library, fastq, prefix) = write_inputs(dir.path(), &standard_library(), &reads);

    spacer_counter()
        .args(["count", "-l", &library, "-f", &fastq, "-o", &prefix, "--reverse"])
        .assert()
        .success();

    let counts = fs::read_to_string(format!("{prefix}.counts")).unwrap();
    assert!(counts.starts_with(&format!("g1,{G1},GENE1,1\n")));
}

#[test]
fn test_count_threads_matches_sequential() {
    let dir = TempDir::new().unwrap();
    let reads: Vec<String> = (0..50)
        .map(|i| if i % 3 == 0 { format!("A{G2}") } else { format!("{G1}C") })
        .collect();
    let (library, fastq, prefix) = write_inputs(dir.path(), &standard_library(), &reads);
    let threaded = format!("{prefix}_threaded");

    spacer_counter()
        .args(["count", "-l", &library, "-f", &fastq, "-o", &prefix])
        .assert()
        .success();
    spacer_counter()
        .args(["count", "-l", &library, "-f", &fastq, "-o", &threaded, "-t", "4"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(format!("{prefix}.counts")).unwrap(),
        fs::read_to_string(format!("{threaded}.counts")).unwrap()
    );
}

#[test]
fn test_check_library() {
    let dir = TempDir::new().unwrap();
    let library = format!("g1,{G1},GENE1\ng2,{G2},GENE2\nshort,ACGT,GENE3\ndup,{G1},GENE4\n");
    let (library, _, _) = write_inputs(dir.path(), &library, &[]);

    spacer_counter()
        .args(["check-library", "-l", &library])
        .assert()
        .success()
        .stdout(predicate::str::contains("Library size:   3 guides"))
        .stdout(predicate::str::contains("Duplicate rows: 1"))
        .stdout(predicate::str::contains("short"));
}
