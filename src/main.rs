use std::{env, process};

use rocks_lang::{print_usage, rocks};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut rocks = rocks::new();

    match args.len() {
        n if n > 2 => {
            print_usage();
            process::exit(64);
        }
        2 => rocks.run_file(&args[1]),
        _ => rocks.run_prompt(),
    }
}
