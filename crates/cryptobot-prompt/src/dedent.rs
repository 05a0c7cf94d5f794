//! Whitespace normalization for template sources
//!
//! Templates are written indented inside Rust string literals. Before parsing,
//! the common leading indentation is removed along with leading and trailing
//! blank lines.

/// Remove the common indentation of all non-blank lines
///
/// ```
/// use cryptobot_prompt::dedent;
///
/// let source = "
///     Hola,
///       indentado
///     fin
/// ";
/// assert_eq!(dedent(source), "Hola,\n  indentado\nfin");
/// ```
pub fn dedent(source: &str) -> String {
    let lines: Vec<&str> = source.lines().collect();

    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    let first = lines.iter().position(|line| !line.trim().is_empty());
    let last = lines.iter().rposition(|line| !line.trim().is_empty());

    let (Some(first), Some(last)) = (first, last) else {
        return String::new();
    };

    lines[first..=last]
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[indent..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_common_indent() {
        let source = "\n        uno\n        dos\n";
        assert_eq!(dedent(source), "uno\ndos");
    }

    #[test]
    fn test_keeps_relative_indent() {
        let source = "    - BTC:\n      `addr`";
        assert_eq!(dedent(source), "- BTC:\n  `addr`");
    }

    #[test]
    fn test_blank_lines_inside_are_kept_empty() {
        let source = "    Hola,\n      \n    fin";
        assert_eq!(dedent(source), "Hola,\n\nfin");
    }

    #[test]
    fn test_blank_source() {
        assert_eq!(dedent(""), "");
        assert_eq!(dedent("   \n  \n"), "");
    }

    #[test]
    fn test_unindented_source_unchanged() {
        assert_eq!(dedent("a\n  b"), "a\n  b");
    }
}
