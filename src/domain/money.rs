use std::fmt;

/// Money is represented as integer cents so sums and differences stay exact.
/// 1 unit = 100 cents, so 50.00 = 5000 cents.
pub type Cents = i64;

/// Format cents as a plain decimal string.
/// Example: 79950 -> "799.50", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Format cents with an explicit sign, as used for balances.
/// Example: 79950 -> "+799.50", 0 -> "+0.00"
pub fn format_signed_cents(cents: Cents) -> String {
    if cents < 0 {
        format_cents(cents)
    } else {
        format!("+{}", format_cents(cents))
    }
}

/// Parse a decimal string into cents.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "100" -> 10000
///
/// Inputs with more than two fractional digits are rejected instead of
/// truncated, so a parsed amount always equals what the user typed.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let (units_str, decimal_str) = match digits.split_once('.') {
        Some((units, decimals)) => (units, decimals),
        None => (digits, ""),
    };

    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }
    if !units_str.chars().all(|c| c.is_ascii_digit())
        || !decimal_str.chars().all(|c| c.is_ascii_digit())
    {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str
            .parse()
            .map_err(|_| ParseCentsError::InvalidFormat)?
    };

    let decimal_cents: i64 = match decimal_str.len() {
        0 => 0,
        // "5" after the point means 50 cents
        1 => decimal_str
            .parse::<i64>()
            .map_err(|_| ParseCentsError::InvalidFormat)?
            * 10,
        2 => decimal_str
            .parse()
            .map_err(|_| ParseCentsError::InvalidFormat)?,
        _ => return Err(ParseCentsError::TooPrecise),
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimal_cents))
        .ok_or(ParseCentsError::InvalidFormat)?;
    Ok(if negative { -cents } else { cents })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    TooPrecise,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::TooPrecise => {
                write!(f, "amounts support at most two decimal places")
            }
        }
    }
}

impl std::error::Error for ParseCentsError {}
