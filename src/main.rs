fn main() {
    if let Err(error) = speechjob::run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
