//! Parsing the real process arguments.
//!
//! Declares a handful of options in code, then parses whatever follows the
//! program name on the command line.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argspec-demos --example process_args -- \
//!     --arg_int 1 2 --arg_str good --arg_eval '{"name": "Alex", "age": 18}' --arg_bool
//!
//! cargo run -p argspec-demos --example process_args -- --help
//! ```

use argspec_core::{OptionSpec, ParseOutcome, Parser, ParserConfig, Registry, ValueKind};

fn main() {
    let registry = Registry::from_specs([
        OptionSpec::new("arg_int")
            .with_kind(ValueKind::Int)
            .required()
            .with_num_args(2)
            .with_description("two integers"),
        OptionSpec::new("arg_str")
            .with_kind(ValueKind::Str)
            .required()
            .with_description("a label"),
        OptionSpec::new("arg_eval")
            .with_kind(ValueKind::Literal)
            .with_description("literal data, e.g. {'k': [1, 2]}"),
        OptionSpec::new("arg_bool")
            .with_kind(ValueKind::Bool)
            .with_description("a flag"),
        OptionSpec::new("arg_float")
            .with_kind(ValueKind::Float)
            .with_description("a number"),
    ]);

    let registry = match registry {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let parser = match Parser::with_config(registry, ParserConfig::new("process_args")) {
        Ok(parser) => parser,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    // The process argument vector is passed in explicitly.
    let tokens: Vec<String> = std::env::args().skip(1).collect();

    match parser.parse(tokens.as_slice()) {
        Ok(ParseOutcome::Help(text)) => print!("{text}"),
        Ok(ParseOutcome::Parsed(args)) => {
            for (name, value) in args.iter() {
                println!("{name:>10} = {}", serde_json::to_string(value).unwrap_or_default());
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprint!("{}", parser.usage());
            std::process::exit(1);
        }
    }
}
