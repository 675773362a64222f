//! Text exports for generated groups

/// Plain-text block for the clipboard
///
/// ```text
/// Group 1:
/// Alice
/// Bob
///
/// Group 2:
/// Carol
/// ```
pub fn clipboard_text(groups: &[Vec<String>]) -> String {
    groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let mut block = format!("Group {}:", i + 1);
            for name in group {
                block.push('\n');
                block.push_str(name);
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// CSV with one column per group
///
/// Shorter groups are padded with empty cells. Cells holding a comma,
/// quote or line break are quoted.
pub fn csv_text(groups: &[Vec<String>]) -> String {
    let longest = groups.iter().map(Vec::len).max().unwrap_or(0);

    let header = (1..=groups.len())
        .map(|i| format!("Group {}", i))
        .collect::<Vec<_>>()
        .join(",");

    let mut lines = Vec::with_capacity(longest + 1);
    lines.push(header);
    for row in 0..longest {
        let cells: Vec<String> = groups
            .iter()
            .map(|group| group.get(row).map(|n| csv_cell(n)).unwrap_or_default())
            .collect();
        lines.push(cells.join(","));
    }
    lines.join("\n")
}

fn csv_cell(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
