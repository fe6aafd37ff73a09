#![cfg(test)]

use props_engine::{JitProps, Options, Targets};

fn mock_options() -> Options {
    Options::new()
        .prop("--red", "#e44")
        .prop("--pink", "#d98997")
        .prop("--h", 200)
        .prop("--s", "50%")
        .prop("--l", "50%")
        .prop("--size-1", "1rem")
        .prop("--size-2", "2rem")
        .prop("--fade-in", "fade-in 1s ease")
        .prop("--fade-in-@", "@keyframes fade-in {to { opacity: 1 }}")
        .prop("--adaptive-fade", "adaptive-fade 1s ease")
        .prop("--adaptive-fade-@", "@keyframes adaptive-fade {to { background: #fff }}")
        .prop(
            "--adaptive-fade-@media:dark",
            "@keyframes adaptive-fade {to { background: #000 }}",
        )
        .prop("--dark", "@custom-media --dark (prefers-color-scheme: dark);")
        .prop("--text", "#fff")
        .prop("--text-@media:dark", "#000")
}

fn run(input: &str, expected: &str, options: Options) {
    let mut plugin = JitProps::new(options).unwrap();
    let output = plugin.process(input, "input.css");
    assert_eq!(output.trim(), expected);
}

#[test]
fn jits_a_single_prop() {
    run(
        "a {\n  color: var(--red);\n}",
        ":root {\n  --red: #e44;\n}\n\na {\n  color: var(--red);\n}",
        mock_options(),
    );
}

#[test]
fn jits_a_single_prop_with_spaces() {
    run(
        "a {\n  color: var( --red );\n}",
        ":root {\n  --red: #e44;\n}\n\na {\n  color: var(--red);\n}",
        mock_options(),
    );
}

#[test]
fn jits_a_prop_with_a_fallback() {
    run(
        "a {\n  color: var(--red, hotpink);\n}",
        ":root {\n  --red: #e44;\n}\n\na {\n  color: var(--red, hotpink);\n}",
        mock_options(),
    );
}

#[test]
fn jits_a_prop_with_fallback_and_nested_props() {
    run(
        "a {\n  color: var(--red, var(--pink), hotpink);\n}",
        ":root {\n  --red: #e44;\n  --pink: #d98997;\n}\n\na {\n  color: var(--red, var(--pink), hotpink);\n}",
        mock_options(),
    );
}

#[test]
fn jits_nested_fallback_props_of_an_undefined_prop() {
    run(
        "a {\n  color: var(--orange, var(--pink), hotpink);\n}",
        ":root {\n  --pink: #d98997;\n}\n\na {\n  color: var(--orange, var(--pink), hotpink);\n}",
        mock_options(),
    );
}

#[test]
fn jits_multiple_props() {
    run(
        "a {\n  color: var(--red);\n  border-color: var(--pink);\n  padding-block-start: var( --size-1 );\n}",
        ":root {\n  --red: #e44;\n  --pink: #d98997;\n  --size-1: 1rem;\n}\n\na {\n  color: var(--red);\n  border-color: var(--pink);\n  padding-block-start: var(--size-1);\n}",
        mock_options(),
    );
}

#[test]
fn jits_multiple_props_from_shorthand() {
    run(
        "a {\n  padding-block: var(--size-1) var( --size-2  );\n}",
        ":root {\n  --size-1: 1rem;\n  --size-2: 2rem;\n}\n\na {\n  padding-block: var(--size-1) var(--size-2);\n}",
        mock_options(),
    );
}

#[test]
fn jits_props_from_inside_functions() {
    run(
        "a {\n  color: hsl(var(--h) var(--s) var( --l ));\n}",
        ":root {\n  --h: 200;\n  --s: 50%;\n  --l: 50%;\n}\n\na {\n  color: hsl(var(--h) var(--s) var(--l));\n}",
        mock_options(),
    );
}

#[test]
fn adds_a_prop_to_root_only_once() {
    run(
        "a {\n  color: var(--red);\n  border-color: var(--red );\n}",
        ":root {\n  --red: #e44;\n}\n\na {\n  color: var(--red);\n  border-color: var(--red);\n}",
        mock_options(),
    );
}

#[test]
fn jits_props_into_a_layer() {
    run(
        "a {\n  color: hsl(var(--h) var(--s) var(--l));\n}",
        "@layer test {\n  :root {\n    --h: 200;\n    --s: 50%;\n    --l: 50%;\n  }\n}\n\na {\n  color: hsl(var(--h) var(--s) var(--l));\n}",
        mock_options().layer("test"),
    );
}

#[test]
fn jits_a_keyframe_animation_through_its_companion() {
    run(
        "a {\n  animation: var(--fade-in);\n}",
        ":root {\n  --fade-in: fade-in 1s ease;\n}\n\n@keyframes fade-in {\n  to {\n    opacity: 1;\n  }\n}\n\na {\n  animation: var(--fade-in);\n}",
        mock_options(),
    );
}

#[test]
fn jits_an_adaptive_keyframe_animation() {
    run(
        "a {\n  animation: var(--adaptive-fade);\n}",
        ":root {\n  --adaptive-fade: adaptive-fade 1s ease;\n}\n\n@keyframes adaptive-fade {\n  to {\n    background: #fff;\n  }\n}\n\n@media (prefers-color-scheme: dark) {\n  @keyframes adaptive-fade {\n    to {\n      background: #000;\n    }\n  }\n}\n\na {\n  animation: var(--adaptive-fade);\n}",
        mock_options(),
    );
}

#[test]
fn jits_custom_media() {
    run(
        "@media (--dark) {\n  a {\n    color: #fff;\n  }\n}",
        "@custom-media --dark (prefers-color-scheme: dark);\n\n@media (--dark) {\n  a {\n    color: #fff;\n  }\n}",
        mock_options(),
    );
}

#[test]
fn jits_custom_media_with_spaces() {
    run(
        "@media ( --dark ) {\n  a {\n    color: #fff;\n  }\n}",
        "@custom-media --dark (prefers-color-scheme: dark);\n\n@media (--dark) {\n  a {\n    color: #fff;\n  }\n}",
        mock_options(),
    );
}

#[test]
fn jits_props_to_a_custom_selector() {
    run(
        "a {\n  color: var(--red);\n}",
        ":global {\n  --red: #e44;\n}\n\na {\n  color: var(--red);\n}",
        mock_options().custom_selector(":global"),
    );
}

#[test]
fn jits_light_and_dark_props_to_a_custom_selector() {
    run(
        "a {\n  color: var(--text);\n}",
        ":global {\n  --text: #fff;\n}\n\n@media (prefers-color-scheme: dark) {\n  :global {\n    --text: #000;\n  }\n}\n\na {\n  color: var(--text);\n}",
        mock_options().custom_selector(":global"),
    );
}

#[test]
fn jits_light_and_dark_props_to_separate_selectors() {
    run(
        "a {\n  color: var(--text);\n}",
        ".light {\n  --text: #fff;\n}\n\n@media (prefers-color-scheme: dark) {\n  .dark {\n    --text: #000;\n  }\n}\n\na {\n  color: var(--text);\n}",
        mock_options()
            .custom_selector(".light")
            .custom_selector_dark(".dark"),
    );
}

#[test]
fn does_not_create_a_root_context_without_references() {
    run(
        "a {\n  color: red;\n}",
        "a {\n  color: red;\n}",
        mock_options(),
    );
}

#[test]
fn jits_a_light_and_dark_adaptive_prop() {
    run(
        "p {\n  color: var(--text);\n}",
        ":root {\n  --text: #fff;\n}\n\n@media (prefers-color-scheme: dark) {\n  :root {\n    --text: #000;\n  }\n}\n\np {\n  color: var(--text);\n}",
        mock_options(),
    );
}

#[test]
fn jits_dark_props_with_a_custom_adaptive_marker() {
    run(
        "p {\n  color: var(--text);\n}",
        ":root {\n  --text: #fff;\n}\n\n@media (prefers-color-scheme: dark) {\n  :root {\n    --text: #000;\n  }\n}\n\np {\n  color: var(--text);\n}",
        Options::new()
            .prop("--text", "#fff")
            .prop("--text-dark", "#000")
            .adaptive_prop_selector("-dark"),
    );
}

#[test]
fn targets_are_forwarded_without_altering_output() {
    let targets = Targets {
        chrome: Some(100),
        ..Targets::default()
    };
    run(
        "a {\n  color: var(--red);\n}",
        ":root {\n  --red: #e44;\n}\n\na {\n  color: var(--red);\n}",
        mock_options().targets(targets),
    );
}

#[test]
fn empty_input_yields_empty_output() {
    run("", "", mock_options());
}

#[test]
fn transitive_dependencies_are_included_to_arbitrary_depth() {
    run(
        "a {\n  border-color: var(--border);\n}",
        ":root {\n  --border: var(--accent);\n  --accent: var(--red);\n  --red: #e44;\n}\n\na {\n  border-color: var(--border);\n}",
        Options::new()
            .prop("--border", "var(--accent)")
            .prop("--accent", "var(--red)")
            .prop("--red", "#e44"),
    );
}

#[test]
fn mutual_reference_cycles_terminate_and_emit_once() {
    run(
        "a {\n  width: var(--a);\n}",
        ":root {\n  --a: var(--b);\n  --b: var(--a);\n}\n\na {\n  width: var(--a);\n}",
        Options::new()
            .prop("--a", "var(--b)")
            .prop("--b", "var(--a)"),
    );
}

#[test]
fn unresolved_references_are_silently_ignored() {
    run(
        "a {\n  color: var(--missing);\n}",
        "a {\n  color: var(--missing);\n}",
        mock_options(),
    );
}

#[test]
fn passes_through_without_any_configured_sources() {
    run(
        "a {\n  color: var(--red);\n}",
        "a {\n  color: var(--red);\n}",
        Options::new(),
    );
}

#[test]
fn sequential_reuse_starts_each_sheet_from_a_clean_slate() {
    let mut plugin = JitProps::new(mock_options()).unwrap();
    let first = plugin.process("a {\n  color: var(--red);\n}", "a.css");
    assert!(first.contains("--red"));
    let second = plugin.process("b {\n  color: var(--pink);\n}", "b.css");
    assert!(second.contains("--pink"));
    assert!(!second.contains("--red"));
    let third = plugin.process("c {\n  color: green;\n}", "c.css");
    assert_eq!(third.trim(), "c {\n  color: green;\n}");
}

#[test]
fn repeated_custom_media_references_emit_one_rule() {
    let mut plugin = JitProps::new(mock_options()).unwrap();
    let output = plugin.process(
        "@media (--dark) {\n  a {\n    color: #fff;\n  }\n}\n\n@media (--dark) {\n  b {\n    color: #eee;\n  }\n}",
        "input.css",
    );
    assert_eq!(output.matches("@custom-media --dark").count(), 1);
}
