//! Scan a command template and expand it through an in-memory resolver.

use cmdtpl_rs::{MapResolver, Segment, expand, scan};

fn main() {
    let input = "summarize @{notes/today.md}, then run !{wc -l {{args}}} on {{args}}";

    let template = scan(input).expect("template should scan");

    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => println!("literal  {text:?}"),
            Segment::Directive(directive) => {
                println!(
                    "{:<8} {:?} (chars {}..{})",
                    directive.kind.to_string(),
                    directive.raw_content,
                    directive.span.start,
                    directive.span.end
                );
            }
        }
    }

    let resolver = MapResolver::new()
        .with_file("notes/today.md", "- shipped the scanner")
        .with_command("wc -l 'README.md'", "42")
        .with_args("README.md");

    println!();
    println!("{}", expand(&template, &resolver).expect("template should expand"));
}
