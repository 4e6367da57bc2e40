fn main() {
    if let Err(error) = clonepick_cli::run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
