use std::io::Write;

/// Write reply text to stdout and flush, so partial lines appear at once.
pub fn write_stdout(text: &str) {
    print!("{text}");
    let _ = std::io::stdout().flush();
}

/// Write a final newline to stdout if the text didn't already end with one.
pub fn finalise_stdout(text: &str) {
    if !needs_newline(text) {
        return;
    }
    println!();
}

/// Write a diagnostic message to stderr (never pollutes the stdout reply).
pub fn write_stderr(msg: &str) {
    eprintln!("{msg}");
}

fn needs_newline(text: &str) -> bool {
    !text.ends_with('\n')
}
