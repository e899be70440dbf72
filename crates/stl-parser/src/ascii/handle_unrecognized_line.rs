use log::debug;

pub fn handle_unrecognized_line(line_count: usize, line: &[u8]) {
    if line.is_empty() {
        return;
    }
    debug!(
        "Skipped line {line_count} in ascii STL file: \"{}\"",
        String::from_utf8_lossy(line)
    );
}
