// Command-line tests: exit codes and stream separation

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_header(dir: &Path, name: &str, body: &str) -> PathBuf {
    let stem = name.trim_end_matches(".hpp");
    let path = dir.join(name);
    fs::write(
        &path,
        format!(
            "#include \"Reflection.hpp\"\n{}\n#include \"{}.generated.hpp\"\n",
            body, stem
        ),
    )
    .unwrap();
    path
}

#[test]
fn generates_artifact_and_master() {
    let dir = tempdir().unwrap();
    let input = write_header(dir.path(), "point.hpp", "struct Point { printable int x; };");
    let out = dir.path().join("gen");

    let mut cmd = cargo_bin_cmd!("metagen");
    cmd.arg(&input).arg("--out-dir").arg(&out);
    cmd.assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error:").not());

    assert!(out.join("point.generated.hpp").exists());
    let master = fs::read_to_string(out.join("reflection.generated.hpp")).unwrap();
    assert!(master.contains("#include \"point.generated.hpp\""));
}

#[test]
fn dump_goes_to_stdout() {
    let dir = tempdir().unwrap();
    let input = write_header(
        dir.path(),
        "dump.hpp",
        "namespace app { struct P { serializable double d; }; }",
    );

    let mut cmd = cargo_bin_cmd!("metagen");
    cmd.arg(&input)
        .arg("-o")
        .arg(dir.path().join("gen"))
        .arg("--dump");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serializable double app::P::d"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn missing_reflection_include_exits_with_two() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bare.hpp");
    fs::write(
        &input,
        "struct Bare { printable int x; };\n#include \"bare.generated.hpp\"\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("metagen");
    cmd.arg(&input).arg("-o").arg(dir.path().join("gen"));
    cmd.assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains("error:")
                .and(predicate::str::contains("bare.hpp"))
                .and(predicate::str::contains("#include \"Reflection.hpp\"")),
        );
}

#[test]
fn first_failure_decides_exit_code() {
    let dir = tempdir().unwrap();
    let good = write_header(dir.path(), "good.hpp", "struct G { printable int v; };");
    let missing = dir.path().join("missing.hpp");
    let broken = write_header(dir.path(), "broken.hpp", "struct B { printable int v;");

    let mut cmd = cargo_bin_cmd!("metagen");
    cmd.arg(&good)
        .arg(&missing)
        .arg(&broken)
        .arg("-o")
        .arg(dir.path().join("gen"));
    cmd.assert()
        .code(1)
        .stderr(
            predicate::str::contains("missing.hpp").and(predicate::str::contains("broken.hpp")),
        );

    assert!(dir.path().join("gen").join("good.generated.hpp").exists());
}

#[test]
fn no_master_flag() {
    let dir = tempdir().unwrap();
    let input = write_header(dir.path(), "a.hpp", "struct A { printable int v; };");
    let out = dir.path().join("gen");

    let mut cmd = cargo_bin_cmd!("metagen");
    cmd.arg(&input).arg("-o").arg(&out).arg("--no-master");
    cmd.assert().success();

    assert!(out.join("a.generated.hpp").exists());
    assert!(!out.join("reflection.generated.hpp").exists());
}

#[test]
fn requires_at_least_one_file() {
    let mut cmd = cargo_bin_cmd!("metagen");
    cmd.assert().failure();
}
