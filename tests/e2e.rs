//! End-to-end tests over realistic command templates.

mod common;

use cmdtpl_rs::{MapResolver, MarkerKind, expand, expand_str};
use common::scan_roundtrip;

#[test]
fn e2e_review_template() {
    let input = "\
Review the following changes.

Diff:
!{git diff --stat}

Context file: @{docs/context.md}
Focus areas: {{args}}
Extra: {{file:notes/extra.md}}
";

    let template = scan_roundtrip(input);

    let kinds: Vec<_> = template.directives().map(|d| d.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            MarkerKind::Shell,
            MarkerKind::File,
            MarkerKind::Args,
            MarkerKind::File,
        ]
    );

    let resolver = MapResolver::new()
        .with_command("git diff --stat", "1 file changed")
        .with_file("docs/context.md", "ctx")
        .with_file("notes/extra.md", "extra notes")
        .with_args("safety");

    assert_eq!(
        expand(&template, &resolver).expect("expand"),
        "\
Review the following changes.

Diff:
1 file changed

Context file: ctx
Focus areas: safety
Extra: extra notes
"
    );
}

#[test]
fn e2e_shell_template_with_arguments() {
    let resolver = MapResolver::new()
        .with_args("src/main.rs")
        .with_command("wc -l 'src/main.rs'", "120");

    let output = expand_str("line count for {{args}}: !{wc -l {{args}}}", &resolver)
        .expect("expand");
    assert_eq!(output, "line count for src/main.rs: 120");
}

#[test]
fn e2e_unknown_markers_survive_expansion() {
    let template = scan_roundtrip("template has {{custom:bits}} and @{real.md}");
    assert_eq!(template.warnings.len(), 1);

    let resolver = MapResolver::new().with_file("real.md", "content");
    assert_eq!(
        expand(&template, &resolver).expect("expand"),
        "template has {{custom:bits}} and content"
    );
}

#[test]
fn e2e_nested_json_command() {
    let template = scan_roundtrip(r#"post: !{curl -d {"k": {"n": 1}} http://api}"#);
    let directive = template.directives().next().expect("one directive");
    assert_eq!(directive.raw_content, r#"curl -d {"k": {"n": 1}} http://api"#);

    let resolver =
        MapResolver::new().with_command(r#"curl -d {"k": {"n": 1}} http://api"#, "201");
    assert_eq!(expand(&template, &resolver).expect("expand"), "post: 201");
}
