use std::process::ExitCode;

fn main() -> ExitCode {
    match ippcode_parse::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            ExitCode::from(99)
        }
    }
}
