use super::lookup::is_ancestor;
use super::*;

/// Fields to merge into an existing node. `None` leaves the field alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodePatch {
    pub name: Option<String>,
    pub content: Option<String>,
}

impl NodePatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    fn apply_content(&self, node: &mut WorkspaceNode) -> Result<(), TreeError> {
        let Some(content) = &self.content else {
            return Ok(());
        };
        if node.is_folder() {
            return Err(TreeError::FolderContent(node.path.clone()));
        }
        node.content = Some(content.clone());
        Ok(())
    }
}

impl WorkspaceTree {
    pub fn update_by_path(&self, path: &str, patch: NodePatch) -> Result<WorkspaceTree, TreeError> {
        let Some(new_name) = patch.name.clone() else {
            let root = rewrite_at(&self.root, path, |node| patch.apply_content(node))?;
            return Ok(WorkspaceTree { root });
        };

        validate_name(&new_name)?;
        let parent_path = parent_of(&self.root, path)?;
        let root = rewrite_at(&self.root, &parent_path, |parent| {
            let idx = child_index(parent, path)?;
            if parent
                .children
                .iter()
                .any(|c| c.path != path && c.name == new_name)
            {
                return Err(TreeError::AlreadyExists(format!(
                    "{}/{}",
                    parent.path, new_name
                )));
            }
            let mut node = WorkspaceNode::clone(&parent.children[idx]);
            patch.apply_content(&mut node)?;
            node.name = new_name.clone();
            node.repath(&parent.path);
            parent.children[idx] = Arc::new(node);
            Ok(())
        })?;
        Ok(WorkspaceTree { root })
    }

    /// Appends `node` to the children of the folder at `parent_path`, re-pathing
    /// it (and anything below it) under that folder.
    pub fn insert_child(
        &self,
        parent_path: &str,
        node: WorkspaceNode,
    ) -> Result<WorkspaceTree, TreeError> {
        validate_name(&node.name)?;
        let root = rewrite_at(&self.root, parent_path, |parent| {
            if !parent.is_folder() {
                return Err(TreeError::NotAFolder(parent.path.clone()));
            }
            if parent.children.iter().any(|c| c.name == node.name) {
                return Err(TreeError::AlreadyExists(format!(
                    "{}/{}",
                    parent.path, node.name
                )));
            }
            let mut node = node;
            node.repath(&parent.path);
            validate_children(&node)?;
            parent.children.push(Arc::new(node));
            Ok(())
        })?;
        Ok(WorkspaceTree { root })
    }

    pub fn delete_by_path(&self, path: &str) -> Result<WorkspaceTree, TreeError> {
        let parent_path = parent_of(&self.root, path)?;
        let root = rewrite_at(&self.root, &parent_path, |parent| {
            let idx = child_index(parent, path)?;
            parent.children.remove(idx);
            Ok(())
        })?;
        Ok(WorkspaceTree { root })
    }
}

fn parent_of(root: &WorkspaceNode, path: &str) -> Result<String, TreeError> {
    if path == root.path {
        return Err(TreeError::RootImmutable);
    }
    if !is_ancestor(&root.path, path) {
        return Err(TreeError::NotFound(path.to_string()));
    }
    match path.rsplit_once('/') {
        Some((parent, _)) => Ok(parent.to_string()),
        None => Err(TreeError::NotFound(path.to_string())),
    }
}

fn child_index(parent: &WorkspaceNode, path: &str) -> Result<usize, TreeError> {
    parent
        .children
        .iter()
        .position(|c| c.path == path)
        .ok_or_else(|| TreeError::NotFound(path.to_string()))
}

/// Rebuilds the nodes from `node` down to `target`, applying `edit` to a copy
/// of the target. Siblings off the path are shared, not copied.
fn rewrite_at<F>(
    node: &Arc<WorkspaceNode>,
    target: &str,
    edit: F,
) -> Result<Arc<WorkspaceNode>, TreeError>
where
    F: FnOnce(&mut WorkspaceNode) -> Result<(), TreeError>,
{
    if node.path == target {
        let mut copy = WorkspaceNode::clone(node);
        edit(&mut copy)?;
        return Ok(Arc::new(copy));
    }

    let idx = node
        .children
        .iter()
        .position(|c| c.path == target || is_ancestor(&c.path, target))
        .ok_or_else(|| TreeError::NotFound(target.to_string()))?;
    let replaced = rewrite_at(&node.children[idx], target, edit)?;

    let mut copy = WorkspaceNode::clone(node);
    copy.children[idx] = replaced;
    Ok(Arc::new(copy))
}
