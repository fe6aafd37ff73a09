#![cfg(test)]

use props_engine::{JitProps, Options};

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn run(input: &str, expected: &str, options: Options) {
    let mut plugin = JitProps::new(options).unwrap();
    let output = plugin.process(input, "input.css");
    assert_eq!(output.trim(), expected);
}

const MEDIA_INPUT: &str = "@media (--dark) {\n  a {\n    color: var(--red);\n    border-color: var( --pink );\n    animation: var(--fade-in);\n  }\n}";

const MEDIA_EXPECTED: &str = "@custom-media --dark (prefers-color-scheme: dark);\n\n:root {\n  --red: #e44;\n  --pink: #d98997;\n  --fade-in: fade-in 1s ease;\n}\n\n@keyframes fade-in {\n  to {\n    opacity: 1;\n  }\n}\n\n@media (--dark) {\n  a {\n    color: var(--red);\n    border-color: var(--pink);\n    animation: var(--fade-in);\n  }\n}";

#[test]
fn jits_props_from_a_css_file() {
    init_logs();
    run(
        MEDIA_INPUT,
        MEDIA_EXPECTED,
        Options::new().file(fixture("props.test.css")),
    );
}

#[test]
fn jits_props_from_a_css_file_via_glob() {
    init_logs();
    run(
        MEDIA_INPUT,
        MEDIA_EXPECTED,
        Options::new().file(fixture("*.test.css")),
    );
}

#[test]
fn an_empty_property_file_contributes_nothing() {
    run(
        "",
        "",
        Options::new().file(fixture("props.test.empty.css")),
    );
}

#[test]
fn a_missing_property_file_contributes_nothing() {
    run(
        "a {\n  color: var(--red);\n}",
        "a {\n  color: var(--red);\n}",
        Options::new().file(fixture("does-not-exist.css")),
    );
}

#[test]
fn the_same_file_listed_twice_is_ingested_once() {
    let options = Options::new()
        .file(fixture("props.test.css"))
        .file(fixture("props.test.css"))
        .file(fixture("*.test.css"));
    let mut plugin = JitProps::new(options).unwrap();
    let output = plugin.process("a {\n  color: var(--red);\n}", "input.css");
    assert_eq!(output.matches("--red: #e44;").count(), 1);
}

#[test]
fn file_definitions_override_literals_in_cascade_order() {
    let options = Options::new()
        .prop("--red", "#111")
        .file(fixture("props.test.css"));
    let mut plugin = JitProps::new(options).unwrap();
    let output = plugin.process("a {\n  color: var(--red);\n}", "input.css");
    let literal = output.find("--red: #111;").unwrap();
    let from_file = output.find("--red: #e44;").unwrap();
    // Both definitions are emitted; the file's comes later, so it wins in the
    // cascade.
    assert!(literal < from_file);
}

#[test]
fn imported_files_contribute_definitions() {
    run(
        "a {\n  color: var(--imported-color);\n}",
        ":root {\n  --imported-color: #123;\n}\n\na {\n  color: var(--imported-color);\n}",
        Options::new().file(fixture("with_import.css")),
    );
}

#[test]
fn unreferenced_file_definitions_are_purged() {
    let mut plugin = JitProps::new(Options::new().file(fixture("props.test.css"))).unwrap();
    let output = plugin.process("a {\n  color: var(--red);\n}", "input.css");
    assert!(output.contains("--red"));
    assert!(!output.contains("--pink"));
    assert!(!output.contains("@keyframes"));
    assert!(!output.contains("@custom-media"));
}
