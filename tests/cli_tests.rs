//! Integration tests for the dawinspect binary.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::{SimpleFileOptions, ZipWriter};

const GOOD_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Project version="1.0">
  <Structure>
    <Track name="Drums"/>
  </Structure>
  <Arrangement id="arr0">
    <Lanes timeUnit="beats">
      <Clips>
        <Audio algorithm="stretch" channels="2"><File path="audio/kick.wav"/></Audio>
      </Clips>
    </Lanes>
  </Arrangement>
</Project>
"#;

fn dawinspect_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("dawinspect");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_project(dir: &Path, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (entry, data) in entries {
        writer.start_file(*entry, options).unwrap();
        writer.write_all(data).unwrap();
    }
    let path = dir.join(name);
    std::fs::write(&path, writer.finish().unwrap().into_inner()).unwrap();
    path
}

fn project_pair(temp: &TempDir) -> (PathBuf, PathBuf) {
    let ok = write_project(
        temp.path(),
        "test_ok.dawproject",
        &[
            ("project.xml", GOOD_XML.as_bytes()),
            ("audio/kick.wav", &[0u8; 64][..]),
        ],
    );
    let ng = write_project(
        temp.path(),
        "test_ng.dawproject",
        &[("metadata.xml", b"<MetaData/>".as_slice())],
    );
    (ok, ng)
}

#[test]
fn test_help_flag() {
    dawinspect_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(".dawproject"));
}

#[test]
fn test_files_lists_both_archives_in_order() {
    let temp = TempDir::new().unwrap();
    let (ok, ng) = project_pair(&temp);

    let output = dawinspect_cmd()
        .arg("files")
        .arg("--ok")
        .arg(&ok)
        .arg("--ng")
        .arg(&ng)
        .assert()
        .success()
        .stdout(predicate::str::contains("  audio/kick.wav (64 bytes)"))
        .stdout(predicate::str::contains(format!(
            "  project.xml ({} bytes)",
            GOOD_XML.len()
        )))
        .stdout(predicate::str::contains("Content of project.xml (first 2000 chars):"))
        .stdout(predicate::str::contains("\nproject.xml NOT FOUND"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let ok_at = stdout.find("--- Inspecting OK Project").unwrap();
    let ng_at = stdout.find("--- Inspecting NG Project").unwrap();
    assert!(ok_at < ng_at);
    assert!(!stdout.contains("Error:"));
}

#[test]
fn test_audio_prints_tag_excerpt() {
    let temp = TempDir::new().unwrap();
    let (ok, ng) = project_pair(&temp);

    dawinspect_cmd()
        .args(["audio", "--ok"])
        .arg(&ok)
        .arg("--ng")
        .arg(&ng)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 Audio tags:"))
        .stdout(predicate::str::contains(
            r#"<Audio algorithm="stretch" channels="2"><File path="audio/kick.wav"/></Audio>"#,
        ));
}

#[test]
fn test_structure_prints_indented_tree() {
    let temp = TempDir::new().unwrap();
    let (ok, ng) = project_pair(&temp);

    dawinspect_cmd()
        .args(["structure", "--ok"])
        .arg(&ok)
        .arg("--ng")
        .arg(&ng)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Found Arrangement, showing structure...\n\
             <Arrangement id=\"arr0\">\n  \
             <Lanes timeUnit=\"beats\">\n    \
             <Clips>\n      \
             <Audio algorithm=\"stretch\" channels=\"2\">\n        \
             <File path=\"audio/kick.wav\">\n",
        ))
        .stdout(predicate::str::contains("--- Structure of NG Project"))
        .stdout(predicate::str::contains("project.xml NOT FOUND"));
}

#[test]
fn test_missing_default_archives_do_not_abort() {
    let temp = TempDir::new().unwrap();

    dawinspect_cmd()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Inspecting OK Project (bank/storage/jotaro/test_ok.dawproject) ---"))
        .stdout(predicate::str::contains("--- Structure of NG Project (bank/storage/jotaro/test_ng.dawproject) ---"))
        .stdout(predicate::str::contains("Error: cannot open").count(6));
}

#[test]
fn test_malformed_xml_is_reported() {
    let temp = TempDir::new().unwrap();
    let broken = write_project(
        temp.path(),
        "broken.dawproject",
        &[("project.xml", b"<Project><Arrangement></Project>".as_slice())],
    );
    let (ok, _) = project_pair(&temp);

    dawinspect_cmd()
        .arg("structure")
        .arg("--ok")
        .arg(&ok)
        .arg("--ng")
        .arg(&broken)
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: malformed XML"))
        .stdout(predicate::str::contains("<Arrangement id=\"arr0\">"));
}

#[test]
fn test_logs_stay_off_stdout() {
    let temp = TempDir::new().unwrap();
    let (ok, ng) = project_pair(&temp);

    dawinspect_cmd()
        .args(["files", "-vv", "--ok"])
        .arg(&ok)
        .arg("--ng")
        .arg(&ng)
        .assert()
        .success()
        .stdout(predicate::str::contains("DEBUG").not())
        .stderr(predicate::str::contains("central directory lists"));
}
