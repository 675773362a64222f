//! Roster text parsing

/// Split pasted roster text into names, one per line
///
/// Lines are trimmed and blank lines dropped. Duplicates are kept and
/// treated as different people.
pub fn parse_roster(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roster() {
        let text = "  Alice Johnson \n\nBob Smith\r\n\t\nAlice Johnson\n";
        assert_eq!(
            parse_roster(text),
            vec!["Alice Johnson", "Bob Smith", "Alice Johnson"]
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_roster("").is_empty());
        assert!(parse_roster("\n  \n").is_empty());
    }
}
