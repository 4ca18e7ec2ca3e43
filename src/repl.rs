use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::error::Error;
use crate::formatter::{render_bindings, render_term};
use crate::session::{Outcome, Session};

/// Print what a statement produced. Binding tables are shown when `debug` is set.
pub fn report(outcome: &Outcome, debug: bool) {
    match outcome {
        Outcome::Declared(rule) => println!("{} {}", "defined".dimmed(), rule),
        Outcome::Rewritten { term, firings } => {
            if debug {
                for firing in firings {
                    println!("{} {}", "matched".dimmed(), render_term(&firing.site));
                    println!("{}", render_bindings(&firing.bindings));
                }
            }
            println!("=> {}", render_term(term));
        }
        Outcome::Evaluated(term) => println!("=> {}", render_term(term)),
        Outcome::Empty | Outcome::Quit => {}
    }
}

pub fn report_error(err: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);
}

/// Interactive loop over a session.
pub struct Repl {
    session: Session,
    editor: DefaultEditor,
}

impl Repl {
    pub fn new(session: Session) -> rustyline::Result<Self> {
        Ok(Self {
            session,
            editor: DefaultEditor::new()?,
        })
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        println!("mold: term rewriting. Type {} for commands.", ":help".green());

        loop {
            match self.editor.readline("mold> ") {
                Ok(line) => {
                    self.editor.add_history_entry(line.as_str())?;
                    if self.handle_line(line.trim()) == Flow::Quit {
                        println!("bye.");
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        if line.is_empty() {
            return Flow::Continue;
        }

        if let Some(command) = line.strip_prefix(':') {
            return self.command(command.trim());
        }

        match self.session.execute(line) {
            Ok(Outcome::Quit) => Flow::Quit,
            Ok(outcome) => {
                report(&outcome, self.session.debug);
                Flow::Continue
            }
            Err(err) => {
                report_error(&err);
                Flow::Continue
            }
        }
    }

    fn command(&mut self, command: &str) -> Flow {
        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match name {
            "q" | "quit" | "exit" => return Flow::Quit,
            "help" => print_help(),
            "rules" => {
                let registry = self.session.engine().registry();
                if registry.is_empty() {
                    println!("[rules] (none)");
                }
                for rule in registry.iter() {
                    println!("  {rule}");
                }
            }
            "last" => match self.session.last() {
                Some(term) => {
                    let shape = if term.is_ground() { "ground" } else { "open" };
                    println!(
                        "=> {}  {}",
                        render_term(term),
                        format!("(depth {}, {shape})", term.depth()).dimmed()
                    );
                }
                None => println!("[last] (none)"),
            },
            "depth" => {
                if arg.is_empty() {
                    println!("max depth: {}", self.session.engine().config().max_depth);
                } else {
                    match arg.parse::<usize>() {
                        Ok(depth) => {
                            self.session.engine_mut().set_max_depth(depth);
                            println!("max depth: {depth}");
                        }
                        Err(_) => eprintln!("{} `{arg}` is not a depth", "Error:".red().bold()),
                    }
                }
            }
            "debug" => {
                match arg {
                    "" => self.session.debug = !self.session.debug,
                    "on" => self.session.debug = true,
                    "off" => self.session.debug = false,
                    _ => {
                        eprintln!("usage: :debug [on|off]");
                        return Flow::Continue;
                    }
                }
                println!("debug: {}", if self.session.debug { "on" } else { "off" });
            }
            "load" => {
                if arg.is_empty() {
                    eprintln!("usage: :load FILE");
                    return Flow::Continue;
                }
                return self.load(arg);
            }
            "forget" => {
                if arg.is_empty() {
                    eprintln!("usage: :forget NAME");
                    return Flow::Continue;
                }
                match self.session.forget(arg) {
                    Ok(rule) => println!("{} {}", "forgot".dimmed(), rule),
                    Err(err) => report_error(&err),
                }
            }
            "clear" => {
                self.session.clear();
                println!("[rules and last result cleared]");
            }
            _ => eprintln!(
                "{} unknown command `:{name}`. Type :help for commands.",
                "Error:".red().bold()
            ),
        }

        Flow::Continue
    }

    fn load(&mut self, path: &str) -> Flow {
        let results = match self.session.run_file(path) {
            Ok(results) => results,
            Err(err) => {
                report_error(&err);
                return Flow::Continue;
            }
        };

        let mut flow = Flow::Continue;
        for (line, result) in &results {
            match result {
                Ok(Outcome::Quit) => flow = Flow::Quit,
                Ok(outcome) => report(outcome, self.session.debug),
                Err(err) => eprintln!("{} {path}:{line}: {err}", "Error:".red().bold()),
            }
        }
        flow
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn print_help() {
    println!("Statements:");
    println!("  name := head = body        declare (or replace) a rule");
    println!("  apply name(expr)           rewrite expr, outermost matches first");
    println!("  apply name[all](expr)      also rewrite inside substituted material");
    println!("  apply name                 rewrite the last result");
    println!("  expr                       echo expr and make it the last result");
    println!("  quit                       exit");
    println!("Commands:");
    println!("  :rules                     list rules in declaration order");
    println!("  :last                      show the last result, its depth and groundness");
    println!("  :depth [N]                 show or set the rewrite depth ceiling");
    println!("  :debug [on|off]            toggle printing of binding tables");
    println!("  :load FILE                 run a script of statements");
    println!("  :forget NAME               drop one rule");
    println!("  :clear                     forget rules and the last result");
    println!("  :q                         exit");
}
