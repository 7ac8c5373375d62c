//! Field validators: pure checks on a single scalar. Each takes the failure
//! message(s) to report, returns the value untouched on success and the
//! chosen message on failure; attaching the message to a field name is the
//! caller's job.

use chrono::NaiveDate;

/// Letters and spaces only, every word capitalized. A value whose uppercased
/// form appears in `exceptions` skips the capitalization check, which lets
/// country codes like "USA" through.
pub fn alpha_and_title<'a>(
    value: &'a str,
    exceptions: &[&str],
    alpha_error: &'static str,
    title_error: &'static str,
) -> Result<&'a str, &'static str> {
    if !is_alpha(value) {
        return Err(alpha_error);
    }
    let excepted = exceptions.contains(&value.to_ascii_uppercase().as_str());
    if !excepted && !is_title_case(value) {
        return Err(title_error);
    }
    Ok(value)
}

/// Letters, digits and spaces only, every word capitalized or digit-led
/// ("Philadelphia 76ers").
pub fn alphanumeric_and_title<'a>(
    value: &'a str,
    alpha_error: &'static str,
    title_error: &'static str,
) -> Result<&'a str, &'static str> {
    let stripped: String = value.chars().filter(|c| *c != ' ').collect();
    if stripped.is_empty() || !stripped.chars().all(char::is_alphanumeric) {
        return Err(alpha_error);
    }
    if !is_title_case(value) {
        return Err(title_error);
    }
    Ok(value)
}

pub fn not_future_date(
    value: NaiveDate,
    today: NaiveDate,
    error: &'static str,
) -> Result<NaiveDate, &'static str> {
    if value > today {
        Err(error)
    } else {
        Ok(value)
    }
}

pub fn positive(value: i64, error: &'static str) -> Result<i64, &'static str> {
    if value <= 0 {
        Err(error)
    } else {
        Ok(value)
    }
}

pub fn non_negative(value: i64, error: &'static str) -> Result<i64, &'static str> {
    if value < 0 {
        Err(error)
    } else {
        Ok(value)
    }
}

/// Whole calendar years from `value` to `today` must reach 18. Someone whose
/// 18th birthday is `today` passes.
pub fn adult(
    value: NaiveDate,
    today: NaiveDate,
    error: &'static str,
) -> Result<NaiveDate, &'static str> {
    match today.years_since(value) {
        Some(age) if age >= 18 => Ok(value),
        _ => Err(error),
    }
}

fn is_alpha(value: &str) -> bool {
    let stripped: String = value.chars().filter(|c| *c != ' ').collect();
    !stripped.is_empty() && stripped.chars().all(char::is_alphabetic)
}

// A word reads as a title word when its leading character, if it is a letter,
// is uppercase, and every letter after the first character is lowercase.
// Digit-led words ("76ers") pass with no uppercase anywhere.
fn is_title_case(value: &str) -> bool {
    value.split_whitespace().all(|word| {
        word.chars().enumerate().all(|(i, c)| {
            if !c.is_alphabetic() {
                true
            } else if i == 0 {
                c.is_uppercase()
            } else {
                c.is_lowercase()
            }
        })
    })
}
