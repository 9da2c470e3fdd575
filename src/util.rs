use crate::graph::GraphNode;

pub fn display_name(node: &GraphNode) -> &str {
    node.name.as_deref().unwrap_or(&node.id)
}

pub fn ellipsize(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let kept = text
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect::<String>();
    format!("{kept}\u{2026}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_metadata() {
        let mut node = GraphNode {
            id: "n1".to_string(),
            x: 0.0,
            y: 0.0,
            size: None,
            color: None,
            name: Some("First Node".to_string()),
        };
        assert_eq!(display_name(&node), "First Node");

        node.name = None;
        assert_eq!(display_name(&node), "n1");
    }

    #[test]
    fn ellipsize_keeps_short_text() {
        assert_eq!(ellipsize("short", 10), "short");
        assert_eq!(ellipsize("exactly-10", 10), "exactly-10");
    }

    #[test]
    fn ellipsize_truncates_long_text() {
        let out = ellipsize("a-very-long-identifier", 8);
        assert_eq!(out.chars().count(), 8);
        assert!(out.ends_with('\u{2026}'));
    }
}
