// 🔢 Input Coercion - raw text fields → numbers
// Mirrors browser `Number()` semantics: blank is 0, garbage is NaN.
// No validation messages; callers decide what NaN means for each field.

/// Parse a raw numeric field. Blank → 0.0, unparseable → NaN.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Total bill: negative or non-numeric input becomes 0
pub fn coerce_bill(raw: &str) -> f64 {
    sanitize_bill(parse_number(raw))
}

/// Same rule for values that arrive already numeric (JSON, config)
pub fn sanitize_bill(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Share weight: non-numeric becomes 0, sign is kept
pub fn coerce_share(raw: &str) -> f64 {
    let value = parse_number(raw);
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Tip percentage is passed through as-is, NaN included
pub fn coerce_tip(raw: &str) -> f64 {
    parse_number(raw)
}

/// Participant count as typed. Non-numeric or negative → 0; fractions truncate.
pub fn coerce_count(raw: &str) -> usize {
    let value = parse_number(raw);
    if value.is_finite() && value > 0.0 {
        value.trunc() as usize
    } else {
        0
    }
}
