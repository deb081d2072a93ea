use super::*;

impl WorkspaceTree {
    pub fn find_by_path(&self, path: &str) -> Option<&WorkspaceNode> {
        let mut node: &WorkspaceNode = &self.root;
        loop {
            if node.path == path {
                return Some(node);
            }
            node = node
                .children
                .iter()
                .find(|c| c.path == path || is_ancestor(&c.path, path))
                .map(|c| c.as_ref())?;
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.find_by_path(path).is_some()
    }
}

/// True when `path` lies strictly below `ancestor`.
pub(super) fn is_ancestor(ancestor: &str, path: &str) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == b'/'
}
