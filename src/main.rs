fn main() {
    if let Err(e) = ellinet_search::cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
