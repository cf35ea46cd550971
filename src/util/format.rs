//! Output formatting

/// Format a number with thousands separators
///
/// # Examples
///
/// ```
/// use sqrtsum::util::format::format_number;
///
/// assert_eq!(format_number(10_000_000_000), "10,000,000,000");
/// assert_eq!(format_number(999), "999");
/// ```
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);

    for (count, c) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}

/// The single line a run prints to stdout
pub fn format_result_line(domain_size: u64, sum: f64) -> String {
    format!(
        "Final sum of square root of {} numbers is: {:.6}",
        format_number(domain_size),
        sum
    )
}
