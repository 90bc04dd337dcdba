//! Building a parser from a YAML definition.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argspec-demos --example from_definition
//! ```

use argspec_core::{ParserDefinition, validate_definition};

const DEFINITION: &str = r#"
program: convert
options:
  - name: input
    type: str
    required: true
    description: file to read
  - name: resize
    type: int
    num_args: 2
    description: width and height
  - name: format
    type: choice
    choices: [png, jpeg]
    description: output format
  - name: strip
    type: bool
    description: drop metadata
"#;

fn main() {
    let definition = match ParserDefinition::from_yaml_str(DEFINITION) {
        Ok(definition) => definition,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let problems = validate_definition(&definition);
    println!("Validation problems: {}", problems.len());

    let parser = match definition.into_parser() {
        Ok(parser) => parser,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    println!("=== Usage ===");
    print!("{}", parser.usage());
    println!();

    let invocations: [&[&str]; 3] = [
        &["--input=cat.png", "--resize", "640", "480", "--format", "jpeg", "--strip"],
        &["--input", "cat.png", "--format", "gif"],
        &["--resize", "640"],
    ];

    for tokens in invocations {
        println!("=== {} ===", tokens.join(" "));
        match parser.parse(tokens) {
            Ok(outcome) => match outcome.into_args() {
                Some(args) => println!(
                    "{}",
                    serde_json::to_string_pretty(&args).unwrap_or_default()
                ),
                None => println!("(help requested)"),
            },
            Err(err) => println!("error: {err}"),
        }
        println!();
    }
}
