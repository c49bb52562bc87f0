//! CLI command implementations.

use std::fs;
use std::thread;
use std::time::Duration;

use rover_common::{Diagnostic, Program};
use rover_vm::{Machine, Stop};
use rover_world::{problems, Problem, WorldRef};

/// Run a program to completion on the problem's sampled world.
pub fn run(args: &[String]) -> Result<(), i32> {
    let (path, options) = split_options(args, "run", "Usage: rover run <prog.rasm> [--problem NAME]")?;
    let problem = pick_problem(&options)?;
    let (source, program) = assemble_file(&path)?;

    let world_ref = WorldRef::new(problem.random_world());
    let mut machine = Machine::new(&program, world_ref.clone());
    match machine.execute_user_program() {
        Stop::Finished => {
            print!("{}", world_ref.get());
            println!("program finished");
            Ok(())
        }
        stop => {
            let diagnostic = Diagnostic::new(machine.current_position(), stop.to_string());
            report_diagnostic(&path, &source, &diagnostic);
            Err(3)
        }
    }
}

/// Single-step a program, printing one line per paused instruction — the
/// cooperative rendition of the timer-driven stepping regime.
pub fn trace(args: &[String]) -> Result<(), i32> {
    let (path, options) = split_options(
        args,
        "trace",
        "Usage: rover trace <prog.rasm> [--problem NAME] [--delay MS]",
    )?;
    let problem = pick_problem(&options)?;
    let delay = match options.iter().position(|a| a == "--delay") {
        Some(i) => {
            let value = options.get(i + 1).ok_or_else(|| {
                eprintln!("error: --delay requires a value");
                1
            })?;
            value.parse::<u64>().map_err(|_| {
                eprintln!("error: invalid delay '{value}'");
                1
            })?
        }
        None => 0,
    };
    let (source, program) = assemble_file(&path)?;

    let world_ref = WorldRef::new(problem.random_world());
    let mut machine = Machine::new(&program, world_ref.clone());
    loop {
        let instruction = machine.current_instruction();
        println!(
            "{:#05x}  {:04x}  {:<24} [{}]",
            machine.pc(),
            instruction.word(),
            instruction.to_string(),
            machine
                .stack()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        );
        if delay > 0 {
            thread::sleep(Duration::from_millis(delay));
        }
        match machine.step_into(true) {
            Ok(()) => {}
            Err(Stop::Finished) => {
                print!("{}", world_ref.get());
                println!("program finished");
                return Ok(());
            }
            Err(stop) => {
                let diagnostic = Diagnostic::new(machine.current_position(), stop.to_string());
                report_diagnostic(&path, &source, &diagnostic);
                return Err(3);
            }
        }
    }
}

/// Check a candidate program against a goal program.
pub fn check(args: &[String]) -> Result<(), i32> {
    let (paths, options) = split_many_options(args);
    if paths.len() != 2 {
        eprintln!("error: check requires a candidate and a goal file");
        eprintln!("Usage: rover check <prog.rasm> <goal.rasm> [--problem NAME]");
        return Err(1);
    }
    let problem = pick_problem(&options)?;
    let (source, candidate) = assemble_file(&paths[0])?;
    let (_, goal) = assemble_file(&paths[1])?;

    let world_ref = WorldRef::new(problem.random_world());
    match rover_checker::check(&candidate, &goal, &problem, &world_ref, || {}) {
        Ok(verdict) => {
            println!("{verdict}");
            Ok(())
        }
        Err(diagnostic) => {
            report_diagnostic(&paths[0], &source, &diagnostic);
            Err(2)
        }
    }
}

/// Print the canonical disassembly of an assembled program.
pub fn disasm(args: &[String]) -> Result<(), i32> {
    let (path, _) = split_options(args, "disasm", "Usage: rover disasm <prog.rasm>")?;
    let (_, program) = assemble_file(&path)?;
    print!("{}", rover_asm::disassemble(&program));
    Ok(())
}

/// List the built-in problems.
pub fn problems(_args: &[String]) -> Result<(), i32> {
    for problem in problems::all() {
        let worlds = match problem.num_worlds() {
            Some(n) => n.to_string(),
            None => "?".to_string(),
        };
        println!(
            "{:<18} {:<12} worlds: {:<6} {}",
            problem.name(),
            format!("{:?}", problem.check_after()),
            worlds,
            problem.story()
        );
    }
    Ok(())
}

// ---- helpers ----

fn split_options(
    args: &[String],
    command: &str,
    usage: &str,
) -> Result<(String, Vec<String>), i32> {
    let (paths, options) = split_many_options(args);
    match paths.as_slice() {
        [path] => Ok((path.clone(), options)),
        _ => {
            eprintln!("error: {command} requires exactly one input file");
            eprintln!("{usage}");
            Err(1)
        }
    }
}

fn split_many_options(args: &[String]) -> (Vec<String>, Vec<String>) {
    let mut paths = Vec::new();
    let mut options = Vec::new();
    let mut rest = args.iter();
    while let Some(arg) = rest.next() {
        if arg.starts_with("--") {
            options.push(arg.clone());
            if arg == "--problem" || arg == "--delay" {
                if let Some(value) = rest.next() {
                    options.push(value.clone());
                }
            }
        } else {
            paths.push(arg.clone());
        }
    }
    (paths, options)
}

fn pick_problem(options: &[String]) -> Result<Problem, i32> {
    let name = match options.iter().position(|a| a == "--problem") {
        Some(i) => options.get(i + 1).cloned().ok_or_else(|| {
            eprintln!("error: --problem requires a name");
            1
        })?,
        None => return Ok(problems::first_steps()),
    };
    problems::by_name(&name).ok_or_else(|| {
        eprintln!("error: unknown problem '{name}' (try 'rover problems')");
        1
    })
}

fn assemble_file(path: &str) -> Result<(String, Program), i32> {
    let source = fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })?;
    let program = rover_asm::assemble(&source).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;
    Ok((source, program))
}

/// Print a diagnostic with its source location resolved to line:column.
fn report_diagnostic(path: &str, source: &str, diagnostic: &Diagnostic) {
    match line_column(source, diagnostic.position) {
        Some((line, column)) => {
            eprintln!("{path}:{line}:{column}: {}", diagnostic.message)
        }
        None => eprintln!("{path}: {}", diagnostic.message),
    }
}

/// Map a 1-based byte offset to 1-based line and column numbers.
fn line_column(source: &str, position: usize) -> Option<(usize, usize)> {
    if position == 0 || position > source.len() {
        return None;
    }
    let index = position - 1;
    let line = source[..index].matches('\n').count() + 1;
    let column = index - source[..index].rfind('\n').map_or(0, |p| p + 1) + 1;
    Some((line, column))
}
