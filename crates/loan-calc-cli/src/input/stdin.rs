use loan_calc_core::amortization::LoanRequest;
use std::io::{self, Read};

/// Read a loan request from stdin if data is being piped.
/// Returns None if stdin is a TTY (interactive) or empty.
pub fn read_request() -> Result<Option<LoanRequest>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    log::debug!("read {} bytes of loan request from stdin", trimmed.len());
    let request: LoanRequest = serde_json::from_str(trimmed)?;
    Ok(Some(request))
}
