/// Renders `value` with at most four decimal places, dropping trailing zeros
/// and a dangling decimal point.
pub fn format_result(value: f64) -> String {
    let fixed = format!("{:.4}", value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };

    // Small negatives round to "-0"
    match trimmed {
        "-0" => "0".to_string(),
        s => s.to_string(),
    }
}
