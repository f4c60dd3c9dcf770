use mason_build::save::{SaveError, is_saved, load, save};
use mason_build::{
    ArgSpec, Arity, ConstantRegistry, HelperRegistry, Manifest, Operation, PathRegistry,
    ScalarType, ScriptAssembler,
};
use mason_core::Value;
use tempfile::TempDir;

const ENTRY: &str = r#"
    def entrypoint(self, count: int, tags: list[str]):
        for tag in tags:
            print(tag * count)
"#;

// ── Manifest ──

#[test]
fn manifest_scenario_from_run_copy() {
    let mut manifest = Manifest::new("base");
    manifest.run(["cmd1"]);
    manifest.copy("a", "b", None);

    for _ in 0..3 {
        assert_eq!(manifest.render(), "FROM base\nRUN cmd1\nCOPY a b");
    }
}

// ── CLI synthesis ──

#[test]
fn count_and_tags_options() {
    let entry = Operation::from_source(ENTRY).unwrap();
    let spec = ArgSpec::from_operation(&entry).unwrap();

    assert_eq!(spec.options[0].name, "count");
    assert_eq!(spec.options[0].arity, Arity::One);
    assert_eq!(spec.options[0].converter, ScalarType::Int);
    assert_eq!(spec.options[1].name, "tags");
    assert_eq!(spec.options[1].arity, Arity::OneOrMore);
    assert_eq!(spec.options[1].converter, ScalarType::Str);

    let argv = spec
        .invocation(&[
            ("count".to_owned(), Value::from(3)),
            ("tags".to_owned(), Value::from(vec!["a", "b", "c"])),
        ])
        .unwrap();
    assert_eq!(argv.join(" "), "--count 3 --tags a b c");
}

// ── Script ──

#[test]
fn constants_render_in_declaration_order() {
    let mut constants = ConstantRegistry::new();
    constants.observe("a", Value::from(0));
    constants.observe("b", Value::from("1"));
    constants.observe("c", Value::from(2.0));

    let helpers = HelperRegistry::new(Operation::from_source(ENTRY).unwrap());
    let script = ScriptAssembler::new(&constants, &PathRegistry::new(), &helpers)
        .render()
        .unwrap();

    assert!(script.starts_with("a = 0\nb = '1'\nc = 2.0\n\ndef main("));
}

#[test]
fn path_mirror_is_embedded_and_looked_up() {
    let mut paths = PathRegistry::new();
    paths.add("work", "/dev/proj", "/container/proj");

    let helpers = HelperRegistry::new(Operation::from_source(ENTRY).unwrap());
    let script = ScriptAssembler::new(&ConstantRegistry::new(), &paths, &helpers)
        .render()
        .unwrap();

    assert!(script.contains("path_dict = {'work': '/container/proj'}"));
    assert_eq!(paths.dev_path("work").unwrap(), "/dev/proj");
}

#[test]
fn script_without_mirrors_matches_baseline() {
    let helpers = HelperRegistry::new(Operation::from_source(ENTRY).unwrap());
    let constants = ConstantRegistry::new();

    let baseline = ScriptAssembler::new(&constants, &PathRegistry::new(), &helpers)
        .render()
        .unwrap();
    let again = ScriptAssembler::new(&constants, &PathRegistry::default(), &helpers)
        .render()
        .unwrap();

    assert_eq!(baseline, again);
    assert!(!baseline.contains("path_dict"));
}

// ── Running the script ──

fn python3_available() -> bool {
    std::process::Command::new("python3")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

#[test]
fn synthesized_script_dispatches_parsed_arguments() {
    if !python3_available() {
        eprintln!("python3 not found; skipping");
        return;
    }

    let entry = Operation::from_source(
        "def entrypoint(self, count: int, tags: list[str]):\n    \
         print(count, tags, self.scale, self.path_dict['work'], json.dumps(tags))\n",
    )
    .unwrap()
    .with_frontmatter("import json");
    let helpers = HelperRegistry::new(entry);
    let mut constants = ConstantRegistry::new();
    constants.observe("scale", Value::from(2.0));
    let mut paths = PathRegistry::new();
    paths.add("work", "/dev/proj", "/container/proj");

    let script = ScriptAssembler::new(&constants, &paths, &helpers)
        .render()
        .unwrap();

    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("main.py");
    std::fs::write(&path, script).unwrap();

    assert_cmd::Command::new("python3")
        .arg(&path)
        .args(["--count", "3", "--tags", "a", "b", "c"])
        .assert()
        .success()
        .stdout("3 ['a', 'b', 'c'] 2.0 /container/proj [\"a\", \"b\", \"c\"]\n");
}

#[test]
fn synthesized_script_rejects_missing_options() {
    if !python3_available() {
        eprintln!("python3 not found; skipping");
        return;
    }

    let helpers = HelperRegistry::new(Operation::from_source(ENTRY).unwrap());
    let script = ScriptAssembler::new(&ConstantRegistry::new(), &PathRegistry::new(), &helpers)
        .render()
        .unwrap();

    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("main.py");
    std::fs::write(&path, script).unwrap();

    assert_cmd::Command::new("python3")
        .arg(&path)
        .args(["--count", "3"])
        .assert()
        .failure();
}

// ── Save ──

#[test]
fn save_writes_exactly_two_files() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("helloworld");

    save(&dir, "FROM python:3.11\n", "print(1)\n", true).unwrap();

    let mut names: Vec<String> = std::fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Dockerfile", "main.py"]);
    assert!(is_saved(&dir));

    let (manifest, script) = load(&dir).unwrap();
    assert_eq!(manifest, "FROM python:3.11\n");
    assert_eq!(script, "print(1)\n");
}

#[test]
fn save_overwrites_by_default() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("c");

    save(&dir, "FROM a", "x", true).unwrap();
    save(&dir, "FROM b", "y", true).unwrap();

    let (manifest, _) = load(&dir).unwrap();
    assert_eq!(manifest, "FROM b");
}

#[test]
fn save_without_overwrite_refuses_existing_dir() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("c");

    save(&dir, "FROM a", "x", false).unwrap();
    let result = save(&dir, "FROM b", "y", false);

    assert!(matches!(result, Err(SaveError::AlreadySaved(_))));
    let (manifest, _) = load(&dir).unwrap();
    assert_eq!(manifest, "FROM a");
}

#[test]
fn not_saved_when_empty() {
    let tmp = TempDir::new().unwrap();
    assert!(!is_saved(tmp.path()));
    assert!(load(tmp.path()).is_err());
}
