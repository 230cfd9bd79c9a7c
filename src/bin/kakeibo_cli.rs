use std::{env, io, process};

use kakeibo_core::{
    cli::{run_cli, CliError, USAGE},
    init,
};

fn main() {
    init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = run_cli(env::args().skip(1), &mut out) {
        if matches!(err, CliError::Usage(_)) {
            eprintln!("{USAGE}");
        }
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
