use console::Style;
use dissimilar::{Chunk, diff};
use std::fmt::Write;

/// Generates a character diff between the rendered expected and actual values.
///
/// With `color` the removed and added text is painted red and green; without
/// it, removals are wrapped in `[-...-]` and additions in `{+...+}`.
pub fn get_debug_diff(expected: &str, actual: &str, color: bool) -> String {
    let diff_chunks = diff(expected, actual);

    let mut output = String::new();
    let _ = writeln!(output, "Diff (Expected - / Actual +):");

    for chunk in diff_chunks {
        let _ = match chunk {
            Chunk::Equal(text) if color => {
                write!(output, "{}", Style::new().dim().force_styling(true).apply_to(text))
            }
            Chunk::Delete(text) if color => {
                write!(output, "{}", Style::new().red().force_styling(true).apply_to(text))
            }
            Chunk::Insert(text) if color => {
                write!(output, "{}", Style::new().green().force_styling(true).apply_to(text))
            }
            Chunk::Equal(text) => write!(output, "{}", text),
            Chunk::Delete(text) => write!(output, "[-{}-]", text),
            Chunk::Insert(text) => write!(output, "{{+{}+}}", text),
        };
    }

    output
}
