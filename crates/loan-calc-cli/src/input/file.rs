use loan_calc_core::amortization::LoanRequest;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a loan request document from a JSON file.
pub fn read_request(path: &str) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    log::debug!("reading loan request from {}", canonical.display());

    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let request: LoanRequest = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    Ok(request)
}

/// Resolve the path against the working directory and require a regular file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}
