fn main() {
    // Delegate to CLI runner; errors are printed nicely inside.
    if let Err(err) = repoinv::cli::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
