//! Rover CLI — assemble, run, trace, and check robot programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Input/assembly error
//! - 2: Check failure
//! - 3: Runtime error

mod commands;

use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "trace" => commands::trace(&args[2..]),
        "check" => commands::check(&args[2..]),
        "disasm" => commands::disasm(&args[2..]),
        "problems" => commands::problems(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: rover <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <prog.rasm> [--problem NAME]              Run a program on the problem's world");
    eprintln!("  trace <prog.rasm> [--problem NAME] [--delay MS]  Single-step with a printed trace");
    eprintln!("  check <prog.rasm> <goal.rasm> [--problem NAME]   Check a program against a goal");
    eprintln!("  disasm <prog.rasm>                            Print the canonical disassembly");
    eprintln!("  problems                                      List the built-in problems");
}
