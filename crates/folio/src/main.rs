#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = folio::run_from_env() {
        eprintln!("folio: {error}");
        std::process::exit(error.exit_code());
    }
}
