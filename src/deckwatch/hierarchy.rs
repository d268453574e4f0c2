//! Deck-name hierarchy helpers.
//!
//! Deck names encode their tree position: ancestors are joined with the
//! fixed `"::"` separator ("Parent::Child::Grandchild"). There is no
//! separate tree structure; everything here derives from the name alone.

/// Path separator between a deck name's ancestors.
pub const SEPARATOR: &str = "::";

/// Name of the direct parent, or `None` for a top-level deck.
pub fn parent_name(name: &str) -> Option<&str> {
    name.rsplit_once(SEPARATOR).map(|(head, _)| head)
}

/// Number of separators in the name; top-level decks have depth 0.
pub fn depth(name: &str) -> usize {
    name.matches(SEPARATOR).count()
}

/// True if `ancestor` is a strict `"::"`-prefix of `name`.
///
/// Plain prefix checks are not enough: "Art" must not count as an ancestor
/// of "Artillery".
pub fn is_ancestor(ancestor: &str, name: &str) -> bool {
    name.len() > ancestor.len()
        && name.starts_with(ancestor)
        && name[ancestor.len()..].starts_with(SEPARATOR)
}

/// All ancestor names of `name`, nearest first.
pub fn ancestors(name: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut current = name;
    while let Some(parent) = parent_name(current) {
        out.push(parent);
        current = parent;
    }
    out
}

/// Sort key placing every deck after its ancestors and grouping siblings,
/// regardless of how the separator bytes compare to sibling names.
pub fn path_components(name: &str) -> Vec<&str> {
    name.split(SEPARATOR).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_of_nested_name() {
        assert_eq!(parent_name("A::B::C"), Some("A::B"));
        assert_eq!(parent_name("A"), None);
    }

    #[test]
    fn depth_counts_separators() {
        assert_eq!(depth("A"), 0);
        assert_eq!(depth("A::B::C"), 2);
    }

    #[test]
    fn ancestor_requires_separator_boundary() {
        assert!(is_ancestor("A", "A::B"));
        assert!(is_ancestor("A", "A::B::C"));
        assert!(!is_ancestor("Art", "Artillery"));
        assert!(!is_ancestor("A::B", "A"));
        assert!(!is_ancestor("A", "A"));
    }

    #[test]
    fn ancestors_nearest_first() {
        assert_eq!(ancestors("A::B::C"), vec!["A::B", "A"]);
        assert!(ancestors("A").is_empty());
    }

    #[test]
    fn component_sort_keeps_children_under_parents() {
        let mut names = vec!["A2", "A::B", "A", "A::B::C", "A2::X"];
        names.sort_by(|a, b| path_components(a).cmp(&path_components(b)));
        assert_eq!(names, vec!["A", "A::B", "A::B::C", "A2", "A2::X"]);
    }
}
