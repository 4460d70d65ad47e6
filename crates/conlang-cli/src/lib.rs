// conlang-cli: shared utilities for CLI tools.

use std::path::{Path, PathBuf};
use std::process;

use conlang_core::language::LanguageDescription;
use conlang_phonology::Language;

/// Environment variable naming the language file when no argument is given.
pub const LANGUAGE_ENV: &str = "CONLANG_LANGUAGE";

/// Locate, read and compile a language file.
///
/// Search order:
/// 1. `language_path` argument (if provided)
/// 2. `CONLANG_LANGUAGE` environment variable
pub fn load_language(language_path: Option<&str>) -> Result<Language, String> {
    let path = resolve_language_path(language_path)?;
    let description = read_description(&path)?;
    Language::new(description)
        .map_err(|e| format!("invalid language file {}: {e}", path.display()))
}

fn resolve_language_path(language_path: Option<&str>) -> Result<PathBuf, String> {
    if let Some(p) = language_path {
        return Ok(PathBuf::from(p));
    }
    match std::env::var(LANGUAGE_ENV) {
        Ok(p) if !p.is_empty() => Ok(PathBuf::from(p)),
        _ => Err(format!(
            "no language file given; pass -l PATH or set {LANGUAGE_ENV}"
        )),
    }
}

/// Parse a language description from a JSON file.
pub fn read_description(path: &Path) -> Result<LanguageDescription, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("failed to parse {}: {}", path.display(), e))
}

/// Serialize a language description as pretty-printed JSON.
pub fn to_json(description: &LanguageDescription) -> Result<String, String> {
    serde_json::to_string_pretty(description).map_err(|e| format!("failed to serialize: {e}"))
}

/// Parse a `--language=PATH` or `-l PATH` argument from command line args.
///
/// Returns `(language_path, remaining_args)`.
pub fn parse_language_path(args: &[String]) -> (Option<String>, Vec<String>) {
    let mut language_path = None;
    let mut remaining = Vec::new();
    let mut skip_next = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if let Some(val) = arg.strip_prefix("--language=") {
            language_path = Some(val.to_string());
        } else if arg == "--language" || arg == "-l" {
            if i + 1 < args.len() {
                language_path = Some(args[i + 1].clone());
                skip_next = true;
            } else {
                fatal(&format!("{arg} requires a value"));
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (language_path, remaining)
}

/// Parse the value following `--max-layers`.
pub fn parse_max_layers(value: Option<&str>) -> Result<usize, String> {
    let value = value.ok_or_else(|| "--max-layers requires a value".to_string())?;
    value
        .parse()
        .map_err(|_| format!("invalid number for --max-layers: {value}"))
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn language_path_short_flag() {
        let (path, rest) = parse_language_path(&args(&["-l", "tirae.json", "kata"]));
        assert_eq!(path.as_deref(), Some("tirae.json"));
        assert_eq!(rest, vec!["kata"]);
    }

    #[test]
    fn language_path_long_form() {
        let (path, rest) = parse_language_path(&args(&["--reverse", "--language=x.json"]));
        assert_eq!(path.as_deref(), Some("x.json"));
        assert_eq!(rest, vec!["--reverse"]);
    }

    #[test]
    fn language_path_absent() {
        let (path, rest) = parse_language_path(&args(&["kata"]));
        assert!(path.is_none());
        assert_eq!(rest, vec!["kata"]);
    }

    #[test]
    fn max_layers_value() {
        assert_eq!(parse_max_layers(Some("8")), Ok(8));
        assert_eq!(
            parse_max_layers(None),
            Err("--max-layers requires a value".to_string())
        );
        assert!(parse_max_layers(Some("many")).unwrap_err().contains("invalid number"));
    }

    #[test]
    fn help_flags() {
        assert!(wants_help(&args(&["-h"])));
        assert!(wants_help(&args(&["x", "--help"])));
        assert!(!wants_help(&args(&["x"])));
    }

    #[test]
    fn explicit_path_wins() {
        let path = resolve_language_path(Some("given.json")).unwrap();
        assert_eq!(path, PathBuf::from("given.json"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_description(Path::new("/nonexistent/language.json")).unwrap_err();
        assert!(err.contains("failed to read"));
    }
}
