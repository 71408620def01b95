//! Demonstrate error handling for malformed templates.

fn main() {
    // Unterminated directive
    match cmdtpl_rs::scan("summarize @{notes/today.md") {
        Ok(_) => println!("Scanned OK (unexpected)"),
        Err(e) => {
            println!("Scan error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Offset: character {}", e.at);
        }
    }

    println!();

    // Marker name never closed with ':'
    match cmdtpl_rs::scan("{{file notes.md}}") {
        Ok(_) => println!("Scanned OK (unexpected)"),
        Err(e) => {
            println!("Scan error: {e}");
            println!("  Kind: {:?}", e.kind);
        }
    }

    println!();

    // Unknown markers degrade to literal text with a warning
    match cmdtpl_rs::scan("keep {{bogus:x}} as literal text") {
        Ok(template) => {
            println!("Scanned OK ({} segment(s))", template.segments.len());
            for warning in &template.warnings {
                println!("  Warning: {warning}");
            }
        }
        Err(e) => println!("Scan error: {e} (unexpected)"),
    }
}
