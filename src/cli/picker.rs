//! Interactive month picker and dataset path checks.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `leads summary --pick` and choose a month" UX

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::domain::MonthKey;
use crate::error::AppError;

/// Prompt on stdin/stdout for one of `months`.
pub fn prompt_for_month(months: &[MonthKey]) -> Result<MonthKey, AppError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    pick_month(months, stdin.lock(), stdout.lock())
}

/// Month selection loop over arbitrary input/output.
///
/// Behavior:
/// - list the months
/// - accept either a number (from the list) or a `YYYY-MM` key present in the list
/// - `q` cancels
pub fn pick_month<R: BufRead, W: Write>(
    months: &[MonthKey],
    mut input: R,
    mut output: W,
) -> Result<MonthKey, AppError> {
    if months.is_empty() {
        return Err(AppError::new(3, "No dated rows in the dataset; nothing to select."));
    }

    let io_err = |e: io::Error| AppError::new(2, format!("Failed to write prompt: {e}"));

    writeln!(output, "Found {} month(s):", months.len()).map_err(io_err)?;
    for (idx, month) in months.iter().enumerate() {
        writeln!(output, "{:>3}) {month}", idx + 1).map_err(io_err)?;
    }

    loop {
        write!(output, "Select a month by number (1-{}) or YYYY-MM (q to quit): ", months.len())
            .map_err(io_err)?;
        output.flush().map_err(io_err)?;

        let mut line = String::new();
        let bytes = input
            .read_line(&mut line)
            .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Err(AppError::new(
                2,
                "No input received. Pass the month with `--month YYYY-MM`.",
            ));
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }

        if let Ok(choice) = line.parse::<usize>() {
            if (1..=months.len()).contains(&choice) {
                return Ok(months[choice - 1]);
            }
            writeln!(output, "Invalid choice: {choice}. Enter a number between 1 and {}.", months.len())
                .map_err(io_err)?;
            continue;
        }

        match MonthKey::parse(line) {
            Some(key) if months.contains(&key) => return Ok(key),
            _ => {
                writeln!(output, "Not an available month: {line}").map_err(io_err)?;
            }
        }
    }
}

/// Validate the provided path points to an existing `.csv` file.
pub fn validate_csv_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.exists() {
        return Err(AppError::new(
            2,
            format!("CSV file not found: {}", path.display()),
        ));
    }
    if path.is_dir() {
        return Err(AppError::new(
            2,
            format!("Expected a file, got a directory: {}", path.display()),
        ));
    }
    if path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        != Some(true)
    {
        return Err(AppError::new(
            2,
            format!(
                "Expected a .csv file (got: {}). Use -f to pass a CSV path.",
                path.display()
            ),
        ));
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months() -> Vec<MonthKey> {
        ["2024-02", "2024-03"].iter().filter_map(|s| MonthKey::parse(s)).collect()
    }

    #[test]
    fn picks_by_number_after_bad_input() {
        let mut out = Vec::new();
        let picked = pick_month(&months(), "9\nabc\n2\n".as_bytes(), &mut out).unwrap();
        assert_eq!(picked.to_string(), "2024-03");

        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("  1) 2024-02"));
        assert!(shown.contains("Invalid choice: 9"));
        assert!(shown.contains("Not an available month: abc"));
    }

    #[test]
    fn picks_by_key() {
        let picked = pick_month(&months(), "2024-02\n".as_bytes(), Vec::new()).unwrap();
        assert_eq!(picked.to_string(), "2024-02");
    }

    #[test]
    fn quit_and_eof_cancel() {
        assert!(pick_month(&months(), "q\n".as_bytes(), Vec::new()).is_err());
        assert!(pick_month(&months(), "".as_bytes(), Vec::new()).is_err());
    }

    #[test]
    fn no_months_is_an_error() {
        let err = pick_month(&[], "1\n".as_bytes(), Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn rejects_non_csv_paths() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_csv_path(dir.path()).is_err());

        let txt = dir.path().join("data.txt");
        std::fs::write(&txt, "DATA\n").unwrap();
        assert!(validate_csv_path(&txt).is_err());

        let csv = dir.path().join("data.CSV");
        std::fs::write(&csv, "DATA\n").unwrap();
        assert_eq!(validate_csv_path(&csv).unwrap(), csv);
    }
}
