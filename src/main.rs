//! CLI tool to validate and inspect command template files.

use std::fs;
use std::process::ExitCode;

use cmdtpl_rs::Segment;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: cmdtpl <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  validate  Check if template(s) scan cleanly");
        eprintln!("  segments  Print the segment listing for template(s)");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  cmdtpl validate prompt.md");
        eprintln!("  cmdtpl segments prompt.md");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        match command {
            "validate" => match cmdtpl_rs::scan(&content) {
                Ok(template) => {
                    let directives = template.directives().count();
                    let warnings = template.warnings.len();
                    eprintln!("{path}: valid ({directives} directive(s), {warnings} warning(s))");
                    for warning in &template.warnings {
                        eprintln!("{path}: warning: {warning}");
                    }
                }
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            "segments" => match cmdtpl_rs::scan(&content) {
                Ok(template) => print_segments(&template),
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            _ => {
                eprintln!("Unknown command: {command}");
                return ExitCode::from(2);
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_segments(template: &cmdtpl_rs::Template) {
    let mut offset = 0;
    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => {
                let end = offset + text.chars().count();
                println!("{offset}..{end}\tliteral\t{text:?}");
                offset = end;
            }
            Segment::Directive(directive) => {
                println!(
                    "{}..{}\t{}\t{:?}",
                    directive.span.start, directive.span.end, directive.kind, directive.raw_content
                );
                offset = directive.span.end;
            }
        }
    }
}
