use std::io;
use std::{env, process};

use slate_lang::{Outcome, Slate};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut stdout = io::stdout();
    let mut slate = Slate::new(&mut stdout);

    match args.as_slice() {
        [_] => slate.run_prompt(),
        [_, script] => {
            let outcome = slate.run_file(script).unwrap_or_else(|error| {
                eprintln!("Could not read {script}: {error}");
                process::exit(66);
            });

            match outcome {
                Outcome::Success => {}
                Outcome::CompileError => process::exit(65),
                Outcome::RuntimeError => process::exit(70),
            }
        }
        _ => {
            eprintln!("Usage: slate [script]");
            process::exit(64);
        }
    }
}
