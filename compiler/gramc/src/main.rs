//! Gram CLI
//!
//! Parses files written in the bundled LKT grammar language.

use gramc::commands::{explain_error, parse_files, parse_options, print_grammar};

fn main() {
    gramc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let ok = match command.as_str() {
        "parse" => match parse_options(&args[2..]) {
            Ok(options) => parse_files(&options),
            Err(message) => {
                eprintln!("error: {message}");
                eprintln!();
                print_parse_usage();
                false
            }
        },
        "grammar" => print_grammar(),
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: gram explain <ERROR_CODE>");
                eprintln!("Example: gram explain E1001");
                std::process::exit(1);
            }
            explain_error(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            true
        }
        "version" | "--version" | "-V" => {
            println!("Gram {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            false
        }
    };

    if !ok {
        std::process::exit(1);
    }
}

fn print_parse_usage() {
    eprintln!("Usage: gram parse <files...> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --strict            Disable error recovery");
    eprintln!("  --max-depth=<n>     Maximum rule nesting (default: 4096)");
    eprintln!("  --error-limit=<n>   Errors shown per file, 0 for all (default: 10)");
    eprintln!("  --color=<when>      auto, always, never");
    eprintln!("  -q, --quiet         Print diagnostics only");
}

fn print_usage() {
    println!("Gram combinator-grammar parser");
    println!();
    println!("Usage: gram <command> [options]");
    println!();
    println!("Commands:");
    println!("  parse <files...>     Parse LKT files and print their trees");
    println!("  grammar              Summarize the bundled LKT grammar");
    println!("  explain <code>       Explain a diagnostic code (e.g., E1001)");
    println!("  help                 Show this help message");
    println!("  version              Show the version");
    println!();
    println!("Environment:");
    println!("  RUST_LOG=<filter>    Enable logging (e.g., gram_parse=trace)");
    println!("  GRAM_LOG_TREE=1      Render logs as an indented call tree");
}
