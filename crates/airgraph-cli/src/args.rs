//! Argument value parsers.

/// Normalize an airport code argument: trim, upper-case, and require three
/// ASCII letters.
pub fn parse_airport_code(value: &str) -> Result<String, String> {
    let code = value.trim().to_ascii_uppercase();
    if code.len() == 3 && code.chars().all(|ch| ch.is_ascii_alphabetic()) {
        Ok(code)
    } else {
        Err(format!(
            "'{value}' is not an airport code; expected three letters such as LAX"
        ))
    }
}
