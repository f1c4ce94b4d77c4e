//! Chilean RUT/RUN formatting.

/// Format a national identifier as `12.345.678-5`.
///
/// Existing periods and hyphens are discarded and the body is regrouped in
/// threes from the right. Input that is too short to hold a body and a check
/// character is returned stripped rather than rejected, so the function never
/// fails and is idempotent on its own output.
pub fn format_rut(raw: &str) -> String {
    if raw.trim().chars().count() < 2 {
        return String::new();
    }

    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '.' && *c != '-')
        .collect();
    let cleaned = cleaned.trim();

    let chars: Vec<char> = cleaned.chars().collect();
    if chars.len() < 2 {
        return cleaned.to_string();
    }

    let (body, check) = chars.split_at(chars.len() - 1);
    let check = check[0].to_ascii_uppercase();

    let mut grouped = String::with_capacity(body.len() + body.len() / 3 + 2);
    for (i, c) in body.iter().enumerate() {
        let remaining = body.len() - i;
        if i > 0 && remaining % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    format!("{grouped}-{check}")
}
