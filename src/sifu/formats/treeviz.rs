//! Treeviz formatter for pattern trees

use crate::sifu::ast::Pattern;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// A line still to be drawn
enum Line<'a> {
    Node(&'a Pattern),
    /// A missing binary operand
    Missing,
}

pub fn to_treeviz_str(pattern: &Pattern) -> String {
    let mut result = String::new();
    let mut stack = vec![(Line::Node(pattern), String::new(), true)];

    while let Some((line, prefix, is_last)) = stack.pop() {
        let connector = if is_last { "└─" } else { "├─" };
        let pattern = match line {
            Line::Missing => {
                result.push_str(&format!("{}{} _\n", prefix, connector));
                continue;
            }
            Line::Node(pattern) => pattern,
        };

        let label = truncate(&display_label(pattern), 30);
        result.push_str(&format!(
            "{}{} {}: {}\n",
            prefix,
            connector,
            pattern.node_type(),
            label
        ));

        let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        let children: Vec<Line> = match pattern {
            // both operand slots are drawn so a missing side stays visible
            Pattern::Binary { left, right, .. } => [left, right]
                .into_iter()
                .map(|operand| operand.as_deref().map_or(Line::Missing, Line::Node))
                .collect(),
            _ => pattern.children().into_iter().map(Line::Node).collect(),
        };
        let count = children.len();
        for (i, child) in children.into_iter().enumerate().rev() {
            stack.push((child, new_prefix.clone(), i == count - 1));
        }
    }

    result
}

fn display_label(pattern: &Pattern) -> String {
    match pattern {
        Pattern::String { text } => format!("\"{}\"", text),
        Pattern::Apps { terms } => format!("{} terms", terms.len()),
        Pattern::Binary { op, .. } => op.spelling().to_string(),
        Pattern::NestedPattern { inner }
        | Pattern::NestedTrie { inner }
        | Pattern::Quote { inner } => match (pattern.delimiter(), inner) {
            (Some(delimiter), None) => format!("{}{}", delimiter.open(), delimiter.close()),
            (Some(delimiter), Some(_)) => format!("{} ... {}", delimiter.open(), delimiter.close()),
            (None, _) => String::new(),
        },
        other => other.text().unwrap_or_default().to_string(),
    }
}
