//! Read-eval-print driver loop: reads one surface expression at a time,
//! dispatches `(assert! ITEM)` to the database and anything else to the
//! evaluator, then prints one line per result frame. This binary
//! contributes no evaluator semantics of its own — it is purely the
//! external collaborator that drives the engine crates from a terminal.

mod predicates;
mod reader;

use std::fs;
use std::process::exit;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use dlog_db::Database;
use dlog_engine::{initial_stream, qeval};
use dlog_ir::{instantiate_for_display, query_syntax_process, Term};
use docopt::Docopt;
use rustyline::error::ReadlineError;
use rustyline::Editor;

use predicates::BuiltinPredicates;

const USAGE: &str = "
dlog repl

Usage:
  dlogi [options]
  dlogi (-h | --help)

Options:
  --help          Show this screen.
  --program=PATH  Load a file of `(assert! ...)` forms before the prompt.
  --goal=GOAL     Evaluate GOAL non-interactively (may be given more than once).
  --trace         Enable verbose tracing (equivalent to DLOG_LOG=trace).
";

#[derive(Debug, serde_derive::Deserialize)]
struct Args {
    flag_program: Option<String>,
    flag_goal: Vec<String>,
    flag_trace: bool,
}

fn init_tracing(trace: bool) {
    use tracing_subscriber::EnvFilter;
    let filter = if trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_env("DLOG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    exit(match run() {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {}", e);
            1
        }
    });
}

fn run() -> Result<()> {
    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    init_tracing(args.flag_trace);

    let db = Rc::new(Database::new());
    let predicates: Rc<dyn dlog_engine::PredicateRegistry> = Rc::new(BuiltinPredicates);

    if let Some(path) = &args.flag_program {
        load_program(&db, path)
            .with_context(|| format!("loading program from {}", path))?;
    }

    if !args.flag_goal.is_empty() {
        for goal in &args.flag_goal {
            if let Err(e) = run_goal(&db, &predicates, goal) {
                eprintln!("error: {}", e);
                exit(1);
            }
        }
        return Ok(());
    }

    interactive_loop(db, predicates)
}

/// Loads every top-level form in the file at `path`, processing each the
/// same way the interactive loop would (`(assert! ITEM)` or a bare goal
/// printed to stdout).
fn load_program(db: &Rc<Database>, path: &str) -> Result<()> {
    let text = fs::read_to_string(path)?;
    let forms = reader::read_all(&text).map_err(|e| anyhow!(e.to_string()))?;
    let predicates: Rc<dyn dlog_engine::PredicateRegistry> = Rc::new(BuiltinPredicates);
    for form in forms {
        process_form(db, &predicates, form)?;
    }
    Ok(())
}

fn run_goal(
    db: &Rc<Database>,
    predicates: &Rc<dyn dlog_engine::PredicateRegistry>,
    goal: &str,
) -> Result<()> {
    let term = reader::read_one(goal).map_err(|e| anyhow!(e.to_string()))?;
    process_form(db, predicates, term)
}

fn interactive_loop(db: Rc<Database>, predicates: Rc<dyn dlog_engine::PredicateRegistry>) -> Result<()> {
    let mut rl = Editor::<()>::new();
    loop {
        match rl.readline(";;; query> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line);
                match reader::read_one(line) {
                    Ok(term) => {
                        if let Err(e) = process_form(&db, &predicates, term) {
                            eprintln!("error: {}", e);
                        }
                    }
                    Err(e) => eprintln!("error: {}", e),
                }
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// The heart of the driver loop: `(assert! ITEM)` goes straight to the
/// database; anything else is preprocessed into internal variable form,
/// evaluated, and each result frame is instantiated back into a copy of the
/// query and printed.
fn process_form(
    db: &Rc<Database>,
    predicates: &Rc<dyn dlog_engine::PredicateRegistry>,
    form: Term,
) -> Result<()> {
    if let Some(item) = assert_payload(&form) {
        db.assert_item(item.clone())?;
        println!(";;; asserted: {}", item);
        return Ok(());
    }

    let query = query_syntax_process(&form);
    let results = qeval(db.clone(), predicates.clone(), query.clone(), initial_stream());

    println!(";;; query results for {}:", form);
    let mut count = 0usize;
    let mut cursor = results;
    loop {
        let head = cursor.head().cloned();
        match head {
            None => break,
            Some(Ok(frame)) => {
                println!("{}", instantiate_for_display(&query, &frame));
                count += 1;
                cursor = cursor.tail();
            }
            Some(Err(e)) => return Err(anyhow!(e.to_string())),
        }
    }
    if count == 0 {
        println!(";;; no results");
    }
    Ok(())
}

/// Recognizes `(assert! ITEM)` and returns `ITEM`, or `None` if `form` is
/// not of that shape.
fn assert_payload(form: &Term) -> Option<&Term> {
    if form.head_symbol()? != dlog_ir::Symbol::intern("assert!") {
        return None;
    }
    form.tail()?.head()
}
