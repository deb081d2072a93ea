use super::*;

/// A node as the explorer shows it: depth below the root plus the node itself.
#[derive(Clone, Copy, Debug)]
pub struct VisibleEntry<'a> {
    pub depth: usize,
    pub node: &'a WorkspaceNode,
}

impl WorkspaceTree {
    /// Immediate children of the root, minus the hidden system folder.
    pub fn visible_children(&self) -> impl Iterator<Item = &WorkspaceNode> {
        visible(&self.root)
    }

    /// Every non-hidden path in depth-first pre-order, relative to the root
    /// (`src`, `src/main.rs`, ...).
    pub fn visible_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_paths(&self.root, "", &mut out);
        out
    }

    pub fn visible_entries(&self) -> Vec<VisibleEntry<'_>> {
        let mut out = Vec::new();
        collect_entries(&self.root, 0, &mut out);
        out
    }
}

fn visible(node: &WorkspaceNode) -> impl Iterator<Item = &WorkspaceNode> {
    node.children
        .iter()
        .map(|c| c.as_ref())
        .filter(|c| !c.is_hidden())
}

fn collect_paths(node: &WorkspaceNode, prefix: &str, out: &mut Vec<String>) {
    for child in visible(node) {
        let path = if prefix.is_empty() {
            child.name.clone()
        } else {
            format!("{}/{}", prefix, child.name)
        };
        out.push(path.clone());
        if child.is_folder() {
            collect_paths(child, &path, out);
        }
    }
}

fn collect_entries<'a>(node: &'a WorkspaceNode, depth: usize, out: &mut Vec<VisibleEntry<'a>>) {
    for child in visible(node) {
        out.push(VisibleEntry { depth, node: child });
        if child.is_folder() {
            collect_entries(child, depth + 1, out);
        }
    }
}
