use indexmap::IndexMap;

use crate::domain::FieldPath;

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorNode {
    Leaf { message: Option<String> },
    Branch(IndexMap<String, ErrorNode>),
}

/// Nested mapping mirroring a form's shape. A present node at a path means
/// the field at that path failed validation; leaves may carry a message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorTree {
    root: IndexMap<String, ErrorNode>,
}

impl ErrorTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn clear(&mut self) {
        self.root.clear();
    }

    pub fn leaf_count(&self) -> usize {
        fn count(nodes: &IndexMap<String, ErrorNode>) -> usize {
            nodes
                .values()
                .map(|node| match node {
                    ErrorNode::Leaf { .. } => 1,
                    ErrorNode::Branch(children) => count(children),
                })
                .sum()
        }
        count(&self.root)
    }

    /// Whether an error exists at `path`.
    ///
    /// Walks the tree one segment at a time: a missing entry at the first
    /// segment is "no error"; an entry at the final segment is "error",
    /// whatever its payload. A leaf reached before the path is exhausted
    /// also counts as "error" (the walk terminated early on a failure node).
    pub fn has_error(&self, path: &FieldPath) -> bool {
        has_error_at(&self.root, &path.segments().collect::<Vec<_>>())
    }

    /// The message stored at `path`, if the walk ends on a leaf carrying one.
    pub fn message(&self, path: &FieldPath) -> Option<&str> {
        let mut nodes = &self.root;
        let segments: Vec<&str> = path.segments().collect();
        for (index, segment) in segments.iter().enumerate() {
            match nodes.get(*segment)? {
                ErrorNode::Leaf { message } => {
                    return message.as_deref();
                }
                ErrorNode::Branch(children) => {
                    if index + 1 == segments.len() {
                        return None;
                    }
                    nodes = children;
                }
            }
        }
        None
    }

    /// Marks `path` as failed, replacing whatever was there before.
    pub fn insert(&mut self, path: &FieldPath, message: impl Into<String>) {
        let segments: Vec<&str> = path.segments().collect();
        let mut nodes = &mut self.root;
        for segment in &segments[..segments.len() - 1] {
            let entry = nodes
                .entry((*segment).to_string())
                .or_insert_with(|| ErrorNode::Branch(IndexMap::new()));
            // a leaf in the middle of the path gets widened into a branch
            if !matches!(entry, ErrorNode::Branch(_)) {
                *entry = ErrorNode::Branch(IndexMap::new());
            }
            match entry {
                ErrorNode::Branch(children) => nodes = children,
                ErrorNode::Leaf { .. } => unreachable!(),
            }
        }
        nodes.insert(
            segments[segments.len() - 1].to_string(),
            ErrorNode::Leaf {
                message: Some(message.into()),
            },
        );
    }

    /// Removes the node at `path`, pruning branches left empty.
    pub fn remove(&mut self, path: &FieldPath) {
        let segments: Vec<&str> = path.segments().collect();
        remove_at(&mut self.root, &segments);
    }

    /// Folds validator output into a tree: each entry is a slash-separated
    /// instance pointer (e.g. `/address/city`) plus a message, the shape
    /// produced by `jsonschema` error iteration.
    pub fn from_instance_paths<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, String)>,
    {
        let mut tree = Self::new();
        for (pointer, message) in entries {
            let dotted = pointer.trim_start_matches('/').replace('/', ".");
            if let Ok(path) = FieldPath::parse(dotted) {
                tree.insert(&path, message);
            }
        }
        tree
    }
}

fn has_error_at(nodes: &IndexMap<String, ErrorNode>, segments: &[&str]) -> bool {
    let Some((first, rest)) = segments.split_first() else {
        return false;
    };
    let Some(node) = nodes.get(*first) else {
        return false;
    };
    if rest.is_empty() {
        return true;
    }
    match node {
        ErrorNode::Branch(children) => has_error_at(children, rest),
        ErrorNode::Leaf { .. } => {
            // the walk hit a failure leaf before the path ran out; report it
            // as an error rather than recursing into a non-container
            tracing::debug!(
                segment = *first,
                remaining = %rest.join("."),
                "error walk terminated early on a leaf"
            );
            true
        }
    }
}

fn remove_at(nodes: &mut IndexMap<String, ErrorNode>, segments: &[&str]) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        nodes.shift_remove(*first);
        return;
    }
    let prune = match nodes.get_mut(*first) {
        Some(ErrorNode::Branch(children)) => {
            remove_at(children, rest);
            children.is_empty()
        }
        _ => false,
    };
    if prune {
        nodes.shift_remove(*first);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw).unwrap()
    }

    #[test]
    fn missing_first_segment_is_no_error() {
        let tree = ErrorTree::new();
        assert!(!tree.has_error(&path("email")));
        assert!(!tree.has_error(&path("address.city")));
    }

    #[test]
    fn present_single_segment_is_error() {
        let mut tree = ErrorTree::new();
        tree.insert(&path("name"), "Required");
        assert!(tree.has_error(&path("name")));
        assert_eq!(tree.message(&path("name")), Some("Required"));
        assert!(!tree.has_error(&path("email")));
    }

    #[test]
    fn nested_walk_is_recursively_consistent() {
        let mut tree = ErrorTree::new();
        tree.insert(&path("address.city"), "Required");
        assert!(tree.has_error(&path("address.city")));
        // the intermediate branch is itself "present"
        assert!(tree.has_error(&path("address")));
        assert!(!tree.has_error(&path("address.street")));
    }

    #[test]
    fn early_leaf_counts_as_error() {
        let mut tree = ErrorTree::new();
        tree.insert(&path("address"), "Required");
        // `address` is a leaf, so walking past it still reports an error
        assert!(tree.has_error(&path("address.city")));
        assert_eq!(tree.message(&path("address.city")), Some("Required"));
    }

    #[test]
    fn remove_prunes_empty_branches() {
        let mut tree = ErrorTree::new();
        tree.insert(&path("address.city"), "Required");
        tree.remove(&path("address.city"));
        assert!(tree.is_empty());
        assert!(!tree.has_error(&path("address")));
    }

    #[test]
    fn leaf_count_spans_nesting() {
        let mut tree = ErrorTree::new();
        tree.insert(&path("name"), "Required");
        tree.insert(&path("address.city"), "Required");
        tree.insert(&path("address.street"), "Required");
        assert_eq!(tree.leaf_count(), 3);
    }

    #[test]
    fn builds_from_instance_pointers() {
        let tree = ErrorTree::from_instance_paths(vec![
            ("/name", "Required".to_string()),
            ("/address/city", "Required".to_string()),
        ]);
        assert!(tree.has_error(&path("name")));
        assert!(tree.has_error(&path("address.city")));
        assert!(!tree.has_error(&path("phone")));
    }
}
