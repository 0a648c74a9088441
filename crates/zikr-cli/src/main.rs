fn main() {
    if let Err(error) = zikr_cli::run() {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}
