// Integration tests for the scan pipeline, from header text to generated files

use std::fs;
use std::path::{Path, PathBuf};

use metagen::codegen::Region;
use metagen::errors::status;
use metagen::run::Runner;
use metagen::scanner::StructureKind;
use metagen::session::{scan, ScanSession};
use metagen::{ScanConfig, ScanError};
use tempfile::{tempdir, TempDir};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Writes `body` wrapped in both required include directives
fn write_header(dir: &Path, name: &str, body: &str) -> PathBuf {
    let stem = name.trim_end_matches(".hpp");
    let path = dir.join(name);
    let text = format!(
        "#include \"Reflection.hpp\"\n\n{}\n\n#include \"{}.generated.hpp\"\n",
        body, stem
    );
    fs::write(&path, text).expect("Failed to write test header");
    path
}

fn config_in(dir: &TempDir) -> ScanConfig {
    ScanConfig::default().with_output_dir(dir.path().join("generated"))
}

#[test]
fn test_point_generates_one_print_scaffold() {
    let dir = tempdir().unwrap();
    let input = write_header(
        dir.path(),
        "point.hpp",
        "struct Point { printable int x; printable int y; };",
    );
    let config = config_in(&dir);

    let output = ScanSession::new(&input, &config)
        .run()
        .expect("Session failed");
    let text = fs::read_to_string(&output.artifact_path).unwrap();

    assert_eq!(
        output.artifact_path,
        dir.path().join("generated").join("point.generated.hpp")
    );
    assert_eq!(text.matches("struct gep::detail::Printer<Point>").count(), 1);
    assert!(!text.contains("gep::json::File"));

    let x = text.find("item.Point::x").expect("x body line missing");
    let y = text.find("item.Point::y").expect("y body line missing");
    assert!(x < y, "body lines out of declaration order");

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "#pragma once");
    assert_eq!(lines[1], "#include \"point.hpp\"");
    assert_eq!(lines.iter().filter(|l| l.contains("gep::Print(")).count(), 2);
}

#[test]
fn test_missing_trailing_include() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("point.hpp");
    fs::write(
        &input,
        "#include \"Reflection.hpp\"\nstruct Point { printable int x; };\n",
    )
    .unwrap();
    let config = config_in(&dir);

    let err = ScanSession::new(&input, &config).run().unwrap_err();
    assert_eq!(err.status(), status::MISSING_GENERATED_INCLUDE);
    match err {
        ScanError::MissingGeneratedInclude { expected } => {
            assert_eq!(expected, "#include \"point.generated.hpp\"");
        }
        other => panic!("Expected missing include error, got {:?}", other),
    }
    assert!(!config.artifact_path(&input).exists());
}

#[test]
fn test_marker_in_comment_yields_nothing() {
    let dir = tempdir().unwrap();
    let input = write_header(
        dir.path(),
        "quiet.hpp",
        "struct Quiet {\n    // printable int fake;\n    /* serializable int other; */\n    int real;\n};",
    );
    let config = config_in(&dir);

    let output = ScanSession::new(&input, &config).run().unwrap();
    assert!(output.records.is_empty());

    let text = fs::read_to_string(&output.artifact_path).unwrap();
    assert_eq!(text, "#pragma once\n#include \"quiet.hpp\"\n");
}

#[test]
fn test_three_nesting_depths() {
    let source = r#"
        class Outer {
            printable int a;
            class Middle {
                void touch() { for (int i = 0; i < 2; ++i) { a += i; } }
                printable int b;
                struct Inner {
                    printable int c;
                };
            };
        };
    "#;
    let result = scan(source, &ScanConfig::default()).unwrap();

    let paths: Vec<&str> = result
        .classes
        .entries()
        .iter()
        .map(|e| e.path.as_str())
        .collect();
    assert_eq!(paths, ["Outer", "Outer::Middle", "Outer::Middle::Inner"]);

    let inner = result.classes.get("Outer::Middle::Inner").unwrap();
    assert_eq!(
        inner.scaffolds[0].body(Region::PrintBody).len(),
        1,
        "Inner should have exactly one member"
    );
    assert!(inner.scaffolds[0].body(Region::PrintBody)[0].contains("item.Outer::Middle::Inner::c"));
}

#[test]
fn test_fixture_header() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir);
    let input = fixture_path("inventory.hpp");

    let output = ScanSession::new(&input, &config).run().expect("Session failed");

    let summary: Vec<(&str, &str, &str)> = output
        .records
        .iter()
        .map(|m| {
            (
                m.qualified_path.as_str(),
                m.variable_name.as_str(),
                m.type_text.as_str(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        [
            ("shop::Item", "mId", "int"),
            ("shop::Item", "mName", "std::string"),
            ("shop::Item", "mPrice", "double"),
            ("shop::stock::Shelf", "mItems", "std::vector<Item>"),
            ("shop::stock::Shelf", "mLabel", "char"),
            ("shop::stock::Shelf", "mSlots", "unsigned[4][2]"),
            ("shop::stock::Shelf::Bin", "mCount", "int"),
            ("shop::Compact", "mValue", "int"),
        ]
    );
    assert_eq!(output.records[0].parent_kind, StructureKind::Class);
    assert_eq!(output.records[3].parent_kind, StructureKind::Struct);
    assert_eq!(output.records[6].parent_name, "Bin");

    let text = fs::read_to_string(&output.artifact_path).unwrap();
    assert!(text.contains("#include \"inventory.hpp\""));
    assert!(text.contains("// shop::Item\n"));
    assert!(text.contains("    Write(item.shop::Item::mPrice);"));
    assert!(text.contains("    Read(item.shop::stock::Shelf::mSlots);"));
    assert!(!text.contains("mNotMarked"));
    assert!(!text.contains("mCommentedOut"));

    let item = text.find("// shop::Item").unwrap();
    let shelf = text.find("// shop::stock::Shelf\n").unwrap();
    let compact = text.find("// shop::Compact").unwrap();
    assert!(item < shelf && shelf < compact);
}

#[test]
fn test_master_aggregation_across_run() {
    let dir = tempdir().unwrap();
    let first = write_header(dir.path(), "first.hpp", "struct A { printable int v; };");
    let broken = write_header(dir.path(), "broken.hpp", "struct B { printable int v, w; };");
    let second = write_header(dir.path(), "second.hpp", "struct C { serializable int v; };");

    let config = config_in(&dir);
    let master = config.master_path();
    let summary = Runner::new(config)
        .unwrap()
        .run(&[first, broken, second]);

    assert_eq!(summary.exit_status(), status::MALFORMED_SYNTAX);
    assert_eq!(
        fs::read_to_string(&master).unwrap(),
        "#pragma once\n#include \"first.generated.hpp\"\n#include \"second.generated.hpp\"\n"
    );
    assert!(!dir
        .path()
        .join("generated")
        .join("broken.generated.hpp")
        .exists());
}

#[test]
fn test_rerun_recreates_master() {
    let dir = tempdir().unwrap();
    let input = write_header(dir.path(), "only.hpp", "struct A { printable int v; };");

    for _ in 0..2 {
        let summary = Runner::new(config_in(&dir)).unwrap().run(&[&input]);
        assert_eq!(summary.exit_status(), status::SUCCESS);
    }

    let master = fs::read_to_string(config_in(&dir).master_path()).unwrap();
    assert_eq!(master.matches("only.generated.hpp").count(), 1);
}

#[test]
fn test_custom_suffix_and_header() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("widget.h");
    fs::write(
        &input,
        "#include \"meta/Reflect.h\"\nclass Widget { printable int w; };\n#include \"widget.meta.h\"\n",
    )
    .unwrap();

    let config = ScanConfig::default()
        .with_output_dir(dir.path().join("out"))
        .with_artifact_suffix("meta.h")
        .with_reflection_header("meta/Reflect.h");
    let output = ScanSession::new(&input, &config).run().unwrap();

    assert_eq!(output.artifact_name, "widget.meta.h");
    assert!(dir.path().join("out").join("widget.meta.h").exists());
}
