fn main() {
    if let Err(err) = snapline::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
