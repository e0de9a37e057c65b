//! Label to hashtag conversion.

use keeplist_core::Label;

/// Render labels as a hashtag line: `#name` per label, whitespace inside a
/// name replaced by underscores, joined by single spaces in source order.
/// No de-duplication; an empty label list yields an empty string.
pub fn hashtag_line(labels: &[Label]) -> String {
    labels
        .iter()
        .map(|label| format!("#{}", hashtag_name(&label.name)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn hashtag_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<Label> {
        names
            .iter()
            .map(|name| Label {
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_empty_input_yields_empty_string() {
        assert_eq!(hashtag_line(&[]), "");
    }

    #[test]
    fn test_single_label() {
        assert_eq!(hashtag_line(&labels(&["work"])), "#work");
    }

    #[test]
    fn test_spaces_become_underscores() {
        assert_eq!(hashtag_line(&labels(&["to do list"])), "#to_do_list");
    }

    #[test]
    fn test_source_order_preserved() {
        assert_eq!(
            hashtag_line(&labels(&["Work", "A B"])),
            "#Work #A_B"
        );
    }

    #[test]
    fn test_duplicates_kept() {
        assert_eq!(hashtag_line(&labels(&["x", "x"])), "#x #x");
    }

    #[test]
    fn test_one_hashtag_per_label_no_spaces_inside() {
        let input = labels(&["alpha beta", "gamma", "d e f"]);
        let line = hashtag_line(&input);
        let tags: Vec<&str> = line.split(' ').collect();
        assert_eq!(tags.len(), input.len());
        for tag in tags {
            assert!(tag.starts_with('#'));
            assert!(!tag.contains(' '));
        }
    }

    #[test]
    fn test_other_special_characters_not_escaped() {
        assert_eq!(hashtag_line(&labels(&["c++/rust"])), "#c++/rust");
    }

    #[test]
    fn test_consecutive_spaces_each_replaced() {
        assert_eq!(hashtag_line(&labels(&["a  b"])), "#a__b");
    }
}
