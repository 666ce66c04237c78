//! End-to-end runs of the `seqyield` binary.
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const HEADER: &str = "Sample\tread_N50\tGb\tcoverage\t100kb+\tq10\tq20\tq30\tq40\tq50";

fn seqyield(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_seqyield"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run seqyield")
}

fn summary_file(dir: &TempDir, stem: &str, lengths: &[u64]) -> PathBuf {
    let mut text = String::from("read_id\tsequence_length_template\tmean_qscore_template\n");
    for (i, len) in lengths.iter().enumerate() {
        text.push_str(&format!("r{i}\t{len}\t25.0\n"));
    }
    let path = dir.path().join(format!("{stem}.txt"));
    std::fs::write(&path, text).unwrap();
    path
}

fn arg(p: &Path) -> &str {
    p.to_str().unwrap()
}

fn stdout_lines(out: &Output) -> Vec<String> {
    String::from_utf8_lossy(&out.stdout).lines().map(str::to_string).collect()
}

#[test]
fn no_arguments_prints_usage_and_succeeds() {
    let out = seqyield(&[]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Usage"));
}

#[test]
fn one_file_gives_header_and_one_row() {
    let dir = tempfile::tempdir().unwrap();
    let f = summary_file(&dir, "run1", &[100, 200, 300, 400]);
    let out = seqyield(&[arg(&f), "-n", "S1"]);
    assert!(out.status.success());

    let lines = stdout_lines(&out);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], HEADER);
    assert_eq!(lines[1], "S1\t300\t0.00\t0.00\t0.00\t0.00\t0.00\t0.00\t0.00\t0.00");

    let stderr = String::from_utf8_lossy(&out.stderr);
    let timing = stderr
        .lines()
        .find_map(|l| l.strip_prefix("total time for the program "))
        .expect("elapsed-time line on stderr");
    let (secs, millis) = timing.split_once('.').unwrap();
    assert!(secs.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(millis.len(), 3);
}

#[test]
fn missing_file_fails() {
    let out = seqyield(&["/no/such/sequencing_summary.txt"]);
    assert!(!out.status.success());
    assert!(stdout_lines(&out).is_empty());
}

#[test]
fn mode_legacy_n50_and_extended_flags() {
    let dir = tempfile::tempdir().unwrap();
    let a = summary_file(&dir, "alpha", &[100, 200, 300, 400]);
    let b = summary_file(&dir, "beta", &[1_000]);

    let out = seqyield(&[arg(&a), arg(&b), "--mode", "per-file"]);
    let lines = stdout_lines(&out);
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("alpha\t300\t"));
    assert!(lines[2].starts_with("beta\t1000\t"));

    let out = seqyield(&[arg(&a), arg(&b), "--mode", "last"]);
    let lines = stdout_lines(&out);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("alpha,beta\t1000\t"));

    let out = seqyield(&[arg(&a), "--legacy-n50"]);
    assert!(stdout_lines(&out)[1].starts_with("alpha\t200\t"));

    let out = seqyield(&[arg(&a), "--extended"]);
    let lines = stdout_lines(&out);
    assert!(lines[0].ends_with("\t1Mb+\t1Mb_reads"));
    assert_eq!(lines[1].split('\t').count(), 16);

    let out = seqyield(&[arg(&a), "--mode", "sideways"]);
    assert!(!out.status.success());
}
