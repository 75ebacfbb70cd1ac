use std::io::{self, Write};

/// Writes help text as-is. A closed pipe (`pennydash summary x | head`) is
/// not an error.
pub fn write_stdout_text(text: &str) -> io::Result<()> {
    write_tolerating_broken_pipe(&mut io::stdout().lock(), text, false)
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    write_tolerating_broken_pipe(&mut io::stdout().lock(), text, true)
}

fn write_tolerating_broken_pipe(
    writer: &mut dyn Write,
    text: &str,
    trailing_newline: bool,
) -> io::Result<()> {
    let result = writer
        .write_all(text.as_bytes())
        .and_then(|()| {
            if trailing_newline {
                writer.write_all(b"\n")
            } else {
                Ok(())
            }
        })
        .and_then(|()| writer.flush());

    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
