use super::*;
use crate::detector::Priority;
use std::path::PathBuf;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &[u8]) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Config rooted at `<tmp>/css`, writing artifacts under `<tmp>/out`.
fn config_in(tmp: &TempDir) -> Config {
    let root = tmp.path().join("css");
    fs::create_dir_all(&root).unwrap();
    Config {
        root,
        json_out: tmp.path().join("out/report.json"),
        markdown_out: tmp.path().join("out/report.md"),
        ..Config::default()
    }
}

fn without_timestamp(json: &str) -> serde_json::Value {
    let mut v: serde_json::Value = serde_json::from_str(json).unwrap();
    v.as_object_mut().unwrap().remove("timestamp");
    v
}

#[test]
fn conflicting_pair_is_medium_priority() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config_in(&tmp);
    write(&cfg.root, "a.css", b".btn { color: blue; }");
    write(&cfg.root, "b.css", b".btn { color: red; }");

    let report = analyze(&cfg).unwrap();
    assert_eq!(report.total_files, 2);
    assert_eq!(report.total_definitions, 2);
    assert_eq!(report.duplicate_classes(), 1);
    assert_eq!(report.summary.medium_priority_conflicts, 1);

    let group = &report.duplicates[0];
    assert_eq!(group.class_name, "btn");
    assert_eq!(group.priority(), Priority::Medium);
    assert_eq!(group.conflicts.len(), 1);
    let c = &group.conflicts[0];
    assert_eq!(c.property, "color");
    assert_eq!(c.value_in_first, "blue");
    assert_eq!(c.value_in_second, "red");
    assert!(c.first_file.ends_with("a.css"));
    assert!(c.second_file.ends_with("b.css"));
}

#[test]
fn identical_triple_is_harmless() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config_in(&tmp);
    for name in ["a.css", "b.css", "c.css"] {
        write(&cfg.root, name, b".card { padding: 10px; }");
    }

    let report = analyze(&cfg).unwrap();
    assert_eq!(report.summary.harmless_duplicates, 1);
    assert_eq!(report.summary.high_priority_conflicts, 0);
    assert_eq!(report.duplicates[0].occurrence_count(), 3);
    assert!(report.duplicates[0].conflicts.is_empty());
}

#[test]
fn nested_and_backup_files() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config_in(&tmp);
    write(&cfg.root, "base.css", b".x { margin: 0; }");
    write(&cfg.root, "pages/home.css", b"@media (max-width: 767px) { .x { margin: 4px; } }");
    write(&cfg.root, "old.backup.css", b".x { margin: 9px; }");
    write(&cfg.root, "notes.txt", b".x { margin: 1px; }");

    let report = analyze(&cfg).unwrap();
    assert_eq!(report.total_files, 2);
    let group = &report.duplicates[0];
    assert_eq!(group.occurrence_count(), 2);
    assert_eq!(
        group.occurrences[1].enclosing_conditional.as_deref(),
        Some("(max-width: 767px)")
    );
}

#[test]
fn unparseable_file_is_counted_but_contributes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config_in(&tmp);
    write(&cfg.root, "a.css", b".ok { color: red; }");
    write(&cfg.root, "b.css", b".ok { color: red;\n.broken { color: blue;");

    let report = analyze(&cfg).unwrap();
    assert_eq!(report.total_files, 2);
    assert_eq!(report.total_definitions, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind, FailureKind::Parse);
    assert!(report.failures[0].file.ends_with("b.css"));
    assert!(report.duplicates.is_empty());
}

#[test]
fn unreadable_file_recorded_as_read_failure() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "ok.css", b".a { x: 1 }");
    // A directory named like a stylesheet cannot be read as a file.
    fs::create_dir(tmp.path().join("dir.css")).unwrap();
    let files = vec![tmp.path().join("ok.css"), tmp.path().join("dir.css")];

    let collected = collect_definitions(&files);
    assert_eq!(collected.definitions.len(), 1);
    assert_eq!(collected.failures.len(), 1);
    assert_eq!(collected.failures[0].kind, FailureKind::Read);
    assert!(collected.failures[0].file.ends_with("dir.css"));
}

#[test]
fn latin1_bytes_do_not_drop_the_file() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config_in(&tmp);
    write(&cfg.root, "a.css", b"/* caf\xE9 */\n.btn { color: blue; }");
    write(&cfg.root, "b.css", b".btn { color: red; }");

    let report = analyze(&cfg).unwrap();
    assert!(report.failures.is_empty());
    assert_eq!(report.total_definitions, 2);
    assert_eq!(report.duplicate_classes(), 1);
    assert_eq!(report.duplicates[0].occurrences[0].source_line, Some(2));
}

#[test]
fn collect_keeps_file_order() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "one.css", b".a { x: 1 } .b { x: 1 }");
    write(tmp.path(), "two.css", b".c { x: 1 }");
    let files = vec![tmp.path().join("one.css"), tmp.path().join("two.css")];

    let collected = collect_definitions(&files);
    let names: Vec<&str> = collected
        .definitions
        .iter()
        .map(|d| d.class_name.as_str())
        .collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn collect_missing_file_is_read_failure() {
    let files = vec![PathBuf::from("/definitely/not/here.css")];
    let collected = collect_definitions(&files);
    assert!(collected.definitions.is_empty());
    assert_eq!(collected.failures[0].kind, FailureKind::Read);
}

#[test]
fn missing_root_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = Config {
        root: tmp.path().join("nope"),
        ..Config::default()
    };
    assert!(matches!(
        analyze(&cfg),
        Err(AnalyzeError::InvalidRoot { .. })
    ));
}

#[test]
fn empty_root_gives_empty_report() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config_in(&tmp);
    let report = analyze(&cfg).unwrap();
    assert_eq!(report.total_files, 0);
    assert_eq!(report.total_classes, 0);
    assert!(report.duplicates.is_empty());
}

#[test]
fn repeated_runs_agree() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config_in(&tmp);
    write(&cfg.root, "a.css", b".btn, .nav { color: blue; } .nav { margin: 0 }");
    write(&cfg.root, "b.css", b".btn { color: red; } .nav { margin: 0 }");
    write(&cfg.root, "c.css", b".btn { color: green; }");

    let first = report::format_json(&analyze(&cfg).unwrap()).unwrap();
    let second = report::format_json(&analyze(&cfg).unwrap()).unwrap();
    assert_eq!(without_timestamp(&first), without_timestamp(&second));
}

#[test]
fn write_artifacts_produces_both_files() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config_in(&tmp);
    write(&cfg.root, "a.css", b".btn { color: blue; }");
    write(&cfg.root, "b.css", b".btn { color: red; }");

    let report = analyze(&cfg).unwrap();
    write_artifacts(&report, &cfg).unwrap();

    let json = fs::read_to_string(&cfg.json_out).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["summary"]["mediumPriorityConflicts"], 1);

    let md = fs::read_to_string(&cfg.markdown_out).unwrap();
    assert!(md.contains("### .btn"));
}

#[test]
fn run_without_write_leaves_no_artifacts() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config_in(&tmp);
    write(&cfg.root, "a.css", b".a { color: red; }");

    run(
        &cfg,
        RunOptions {
            json: true,
            write: false,
        },
    )
    .unwrap();
    assert!(!cfg.json_out.exists());
    assert!(!cfg.markdown_out.exists());
}

#[test]
fn run_writes_artifacts() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config_in(&tmp);
    write(&cfg.root, "a.css", b".a { color: red; }");

    run(
        &cfg,
        RunOptions {
            json: false,
            write: true,
        },
    )
    .unwrap();
    assert!(cfg.json_out.is_file());
    assert!(cfg.markdown_out.is_file());
}
