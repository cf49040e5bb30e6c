// chime-cli: shared utilities for the command-line tools.

use std::path::PathBuf;
use std::process;

use chime_en::dictionary::CmuDictionary;
use chime_en::handle::RhymeHandle;

/// Dictionary file name looked for in the search paths.
const DICT_FILE: &str = "cmudict.dict";

/// Load the pronouncing dictionary and build a scoring handle.
///
/// Search order:
/// 1. `dict_path` argument (a file, or a directory containing `cmudict.dict`)
/// 2. `CHIME_DICT_PATH` environment variable
/// 3. `~/.chime/cmudict.dict`
/// 4. Current working directory
pub fn load_handle(dict_path: Option<&str>) -> Result<RhymeHandle, String> {
    let search_paths = build_search_paths(dict_path);

    for path in &search_paths {
        if path.is_file() {
            let dict = CmuDictionary::from_path(path)
                .map_err(|e| format!("failed to load {}: {e}", path.display()))?;
            return RhymeHandle::new(dict).map_err(|e| format!("failed to load feature data: {e}"));
        }
    }

    Err(format!(
        "could not find {} in any of the search paths:\n{}",
        DICT_FILE,
        search_paths
            .iter()
            .map(|p| format!("  - {}", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    ))
}

/// Build the list of candidate dictionary file paths.
fn build_search_paths(dict_path: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. Explicit path from argument
    if let Some(p) = dict_path {
        let p = PathBuf::from(p);
        if p.is_dir() {
            paths.push(p.join(DICT_FILE));
        } else {
            paths.push(p);
        }
    }

    // 2. CHIME_DICT_PATH environment variable
    if let Ok(env_path) = std::env::var("CHIME_DICT_PATH") {
        let p = PathBuf::from(&env_path);
        paths.push(p.join(DICT_FILE));
        paths.push(p);
    }

    // 3. Home directory
    if let Some(home) = home_dir() {
        paths.push(home.join(".chime").join(DICT_FILE));
    }

    // 4. Current directory (fallback for local development)
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(DICT_FILE));
    }

    paths
}

/// Get the user's home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Parse a `--dict-path=PATH` or `-d PATH` argument from command line args.
///
/// Returns `(dict_path, remaining_args)`.
pub fn parse_dict_path(args: &[String]) -> (Option<String>, Vec<String>) {
    let mut dict_path = None;
    let mut remaining = Vec::new();
    let mut skip_next = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if let Some(val) = arg.strip_prefix("--dict-path=") {
            dict_path = Some(val.to_string());
        } else if arg == "--dict-path" || arg == "-d" {
            if i + 1 < args.len() {
                dict_path = Some(args[i + 1].clone());
                skip_next = true;
            } else {
                eprintln!("error: {arg} requires a value");
                process::exit(1);
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (dict_path, remaining)
}

/// Parse a flag taking an integer value, `--name=N` or `-s N` style.
///
/// Returns `(value, remaining_args)`; exits on a malformed value.
pub fn parse_numeric_flag(
    args: &[String],
    short: &str,
    long: &str,
) -> (Option<u32>, Vec<String>) {
    let mut value = None;
    let mut remaining = Vec::new();
    let mut skip_next = false;
    let long_eq = format!("{long}=");

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        let raw = if let Some(v) = arg.strip_prefix(&long_eq) {
            Some(v.to_string())
        } else if arg == short || arg == long {
            if i + 1 < args.len() {
                skip_next = true;
                Some(args[i + 1].clone())
            } else {
                eprintln!("error: {arg} requires a value");
                process::exit(1);
            }
        } else {
            remaining.push(arg.clone());
            None
        };
        if let Some(raw) = raw {
            match raw.parse::<u32>() {
                Ok(v) => value = Some(v),
                Err(_) => {
                    eprintln!("error: {arg} expects a nonnegative integer, got {raw:?}");
                    process::exit(1);
                }
            }
        }
    }

    (value, remaining)
}

/// Count `-v` style verbosity flags (`-v`, `-vv`, `-vvv`, `--verbose`).
///
/// Returns `(level, remaining_args)`.
pub fn parse_verbosity(args: &[String]) -> (usize, Vec<String>) {
    let mut level = 0usize;
    let mut remaining = Vec::new();
    for arg in args {
        if arg == "--verbose" {
            level += 1;
        } else if arg.starts_with("-v") && arg[1..].chars().all(|c| c == 'v') {
            level += arg.len() - 1;
        } else {
            remaining.push(arg.clone());
        }
    }
    (level, remaining)
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
    fn dict_path_long_equals() {
        let (path, rest) = parse_dict_path(&args(&["--dict-path=/tmp/d", "cat"]));
        assert_eq!(path.as_deref(), Some("/tmp/d"));
        assert_eq!(rest, args(&["cat"]));
    }

    #[test]
    fn dict_path_short_with_value() {
        let (path, rest) = parse_dict_path(&args(&["-d", "/tmp/d", "cat", "hat"]));
        assert_eq!(path.as_deref(), Some("/tmp/d"));
        assert_eq!(rest, args(&["cat", "hat"]));
    }

    #[test]
    fn numeric_flag_both_forms() {
        let (v, rest) = parse_numeric_flag(&args(&["-n", "2", "cat"]), "-n", "--syllables");
        assert_eq!(v, Some(2));
        assert_eq!(rest, args(&["cat"]));

        let (v, rest) = parse_numeric_flag(&args(&["--syllables=3"]), "-n", "--syllables");
        assert_eq!(v, Some(3));
        assert!(rest.is_empty());
    }

    #[test]
    fn verbosity_accumulates() {
        let (level, rest) = parse_verbosity(&args(&["-v", "cat", "-vv"]));
        assert_eq!(level, 3);
        assert_eq!(rest, args(&["cat"]));
    }

    #[test]
    fn unrelated_args_pass_through() {
        let (level, rest) = parse_verbosity(&args(&["-version"]));
        assert_eq!(level, 0);
        assert_eq!(rest, args(&["-version"]));
    }
}
