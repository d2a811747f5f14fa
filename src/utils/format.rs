//! Display formatting helpers

/// Format elapsed seconds the way the workout panel shows them.
///
/// Minutes are not wrapped into hours: a 75 minute ride reads `75:00`.
pub fn format_elapsed(seconds: u64) -> String {
    let minutes = seconds / 60;
    let remaining_seconds = seconds % 60;
    format!("{}:{:02}", minutes, remaining_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(7), "0:07");
        assert_eq!(format_elapsed(61), "1:01");
        assert_eq!(format_elapsed(4500), "75:00");
    }
}
