// src/input.rs
// =============================================================================
// This module gathers the domain list for the `check` command.
//
// Domains can come from:
// - Positional arguments: app-ads-checker check a.com b.com
// - A file:               app-ads-checker check --file domains.txt
// - Standard input:       cat domains.txt | app-ads-checker check
//
// Arguments come first, then the file. Stdin is read when --file is "-",
// or when no domains were given at all. Blank lines are kept here; the batch
// coordinator drops them.
// =============================================================================

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

// Collects every input line, in order
pub fn collect_lines(args: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    let mut lines: Vec<String> = args.to_vec();

    match file {
        Some(path) if path == Path::new("-") => lines.extend(read_stdin()?),
        Some(path) => lines.extend(read_file(path)?),
        None if args.is_empty() => lines.extend(read_stdin()?),
        None => {}
    }

    Ok(lines)
}

// Reads a domain list file. Invalid UTF-8 is replaced rather than rejected.
pub fn read_file(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read domain list: {}", path.display()))?;
    Ok(split_lines(&String::from_utf8_lossy(&bytes)))
}

fn read_stdin() -> Result<Vec<String>> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read domain list from stdin")?;
    Ok(split_lines(&buffer))
}

// Splits on \n, \r\n and a lone \r (old Mac line endings)
fn split_lines(text: &str) -> Vec<String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    text.lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_args_only() {
        let args = vec!["a.com".to_string(), "b.com".to_string()];
        let lines = collect_lines(&args, None).unwrap();
        assert_eq!(lines, vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_args_then_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\u{feff}c.com\r\n\r\nd.com\n").unwrap();
        file.flush().unwrap();

        let args = vec!["a.com".to_string()];
        let lines = collect_lines(&args, Some(file.path())).unwrap();
        assert_eq!(lines, vec!["a.com", "c.com", "", "d.com"]);
    }

    #[test]
    fn test_split_lines_handles_every_line_ending() {
        assert_eq!(split_lines("a.com\rb.com\r"), vec!["a.com", "b.com"]);
        assert_eq!(
            split_lines("a.com\r\nb.com\rc.com\nd.com"),
            vec!["a.com", "b.com", "c.com", "d.com"]
        );
        assert_eq!(split_lines("a.com\r\rb.com"), vec!["a.com", "", "b.com"]);
    }

    #[test]
    fn test_carriage_return_file_gives_one_line_per_domain() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a.com\rb.com\rc.com\r").unwrap();
        file.flush().unwrap();

        let lines = collect_lines(&[], Some(file.path())).unwrap();
        assert_eq!(lines, vec!["a.com", "b.com", "c.com"]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = collect_lines(&[], Some(Path::new("/definitely/not/here.txt")));
        assert!(result.is_err());
    }
}
