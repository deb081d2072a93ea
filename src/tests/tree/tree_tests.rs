use super::*;

fn sample() -> WorkspaceTree {
    let src = WorkspaceNode::folder("src")
        .with_child(WorkspaceNode::file("main.rs", "fn main() {}"))
        .with_child(WorkspaceNode::folder("util").with_child(WorkspaceNode::file("mod.rs", "")));
    let root = WorkspaceNode::folder("alice")
        .with_child(WorkspaceNode::file("README.md", "# hi"))
        .with_child(src)
        .with_child(WorkspaceNode::folder(".kit").with_child(WorkspaceNode::file("HEAD", "main")));
    WorkspaceTree::from_root(root).unwrap()
}

fn all_paths(node: &WorkspaceNode, out: &mut Vec<String>) {
    out.push(node.path.clone());
    for c in &node.children {
        assert_eq!(c.path, format!("{}/{}", node.path, c.name));
        all_paths(c, out);
    }
}

#[test]
fn seeded_tree_has_readme_under_user_root() {
    let tree = WorkspaceTree::seeded("alice");
    assert_eq!(tree.name(), "alice");
    let readme = tree.find_by_path("alice/README.md").unwrap();
    assert_eq!(readme.kind, NodeKind::File);
    assert_eq!(
        readme.content.as_deref(),
        Some("# alice's Repository\n\nWelcome to your Kit repository!")
    );
}

#[test]
fn find_by_path_walks_nested_folders() {
    let tree = sample();
    assert_eq!(tree.find_by_path("alice").unwrap().name, "alice");
    assert_eq!(tree.find_by_path("alice/src/util/mod.rs").unwrap().name, "mod.rs");
    assert!(tree.find_by_path("alice/src/nope").is_none());
    assert!(tree.find_by_path("alice/sr").is_none());
    assert!(tree.find_by_path("bob/src").is_none());
}

#[test]
fn insert_child_appends_and_keeps_old_snapshot() {
    let tree = sample();
    let next = tree
        .insert_child("alice/src", WorkspaceNode::file("lib.rs", ""))
        .unwrap();

    let names: Vec<_> = next
        .find_by_path("alice/src")
        .unwrap()
        .children
        .iter()
        .map(|c| c.name.clone())
        .collect();
    assert_eq!(names, vec!["main.rs", "util", "lib.rs"]);
    assert_eq!(next.find_by_path("alice/src/lib.rs").unwrap().path, "alice/src/lib.rs");
    assert!(tree.find_by_path("alice/src/lib.rs").is_none());
}

#[test]
fn insert_child_repaths_a_whole_subtree() {
    let tree = sample();
    let docs = WorkspaceNode::folder("docs").with_child(WorkspaceNode::file("a.md", ""));
    let next = tree.insert_child("alice/src/util", docs).unwrap();
    assert!(next.contains("alice/src/util/docs/a.md"));
}

#[test]
fn insert_child_rejects_missing_parent_file_parent_and_duplicates() {
    let tree = sample();
    assert_eq!(
        tree.insert_child("alice/missing", WorkspaceNode::file("x", "")),
        Err(TreeError::NotFound("alice/missing".to_string()))
    );
    assert_eq!(
        tree.insert_child("alice/README.md", WorkspaceNode::file("x", "")),
        Err(TreeError::NotAFolder("alice/README.md".to_string()))
    );
    assert_eq!(
        tree.insert_child("alice/src", WorkspaceNode::file("main.rs", "")),
        Err(TreeError::AlreadyExists("alice/src/main.rs".to_string()))
    );
    assert!(matches!(
        tree.insert_child("alice", WorkspaceNode::file("a/b", "")),
        Err(TreeError::InvalidName(_))
    ));
}

#[test]
fn update_content_keeps_order_and_shares_untouched_siblings() {
    let tree = sample();
    let next = tree
        .update_by_path("alice/src/main.rs", NodePatch::content("fn main() { run() }"))
        .unwrap();

    assert_eq!(
        next.find_by_path("alice/src/main.rs").unwrap().content.as_deref(),
        Some("fn main() { run() }")
    );
    let order: Vec<_> = next.root().children.iter().map(|c| c.name.clone()).collect();
    assert_eq!(order, vec!["README.md", "src", ".kit"]);

    // README and .kit were not on the edited path.
    assert!(Arc::ptr_eq(&tree.root().children[0], &next.root().children[0]));
    assert!(Arc::ptr_eq(&tree.root().children[2], &next.root().children[2]));
    assert!(!Arc::ptr_eq(&tree.root().children[1], &next.root().children[1]));
}

#[test]
fn update_rejects_content_on_folders() {
    let tree = sample();
    assert_eq!(
        tree.update_by_path("alice/src", NodePatch::content("x")),
        Err(TreeError::FolderContent("alice/src".to_string()))
    );
}

#[test]
fn rename_repaths_descendants_in_place() {
    let tree = sample();
    let next = tree
        .update_by_path("alice/src", NodePatch::rename("lib"))
        .unwrap();
    assert!(next.contains("alice/lib/util/mod.rs"));
    assert!(!next.contains("alice/src"));
    assert_eq!(next.root().children[1].name, "lib");

    assert_eq!(
        tree.update_by_path("alice/src", NodePatch::rename("README.md")),
        Err(TreeError::AlreadyExists("alice/README.md".to_string()))
    );
    assert_eq!(
        tree.update_by_path("alice", NodePatch::rename("bob")),
        Err(TreeError::RootImmutable)
    );
}

#[test]
fn delete_removes_node_and_reports_missing() {
    let tree = sample();
    let next = tree.delete_by_path("alice/src/util").unwrap();
    assert!(!next.contains("alice/src/util"));
    assert!(!next.contains("alice/src/util/mod.rs"));
    assert!(next.contains("alice/src/main.rs"));

    assert_eq!(
        next.delete_by_path("alice/src/util"),
        Err(TreeError::NotFound("alice/src/util".to_string()))
    );
    assert_eq!(tree.delete_by_path("alice"), Err(TreeError::RootImmutable));
}

#[test]
fn paths_stay_unique_and_consistent_across_edits() {
    let mut tree = WorkspaceTree::seeded("alice");
    for i in 0..6 {
        let dir = format!("d{}", i);
        tree = tree
            .insert_child("alice", WorkspaceNode::folder(dir.clone()))
            .unwrap();
        for j in 0..3 {
            tree = tree
                .insert_child(&format!("alice/{}", dir), WorkspaceNode::file(format!("f{}", j), ""))
                .unwrap();
        }
        if i % 2 == 0 {
            tree = tree.delete_by_path(&format!("alice/{}/f1", dir)).unwrap();
        }
    }
    tree = tree.delete_by_path("alice/d3").unwrap();
    tree = tree
        .insert_child("alice/d4", WorkspaceNode::folder("d3"))
        .unwrap();

    let mut paths = Vec::new();
    all_paths(tree.root(), &mut paths);
    let unique: HashSet<_> = paths.iter().collect();
    assert_eq!(unique.len(), paths.len());
    assert!(WorkspaceTree::from_root(tree.root_arc()).is_ok());
}

#[test]
fn visible_paths_skip_hidden_folder_and_are_root_relative() {
    let tree = sample();
    assert_eq!(
        tree.visible_paths(),
        vec!["README.md", "src", "src/main.rs", "src/util", "src/util/mod.rs"]
    );
    let top: Vec<_> = tree.visible_children().map(|n| n.display_name()).collect();
    assert_eq!(top, vec!["README.md", "src/"]);
    assert!(tree.contains("alice/.kit/HEAD"));
}

#[test]
fn visible_entries_carry_depth() {
    let tree = sample();
    let entries: Vec<_> = tree
        .visible_entries()
        .iter()
        .map(|e| (e.depth, e.node.name.clone()))
        .collect();
    assert_eq!(
        entries,
        vec![
            (0, "README.md".to_string()),
            (0, "src".to_string()),
            (1, "main.rs".to_string()),
            (1, "util".to_string()),
            (2, "mod.rs".to_string()),
        ]
    );
}

#[test]
fn replace_swaps_whole_root_and_validates_paths() {
    let mut tree = sample();
    let other = WorkspaceNode::folder("alice").with_child(WorkspaceNode::file("only.txt", "x"));
    tree.replace(Arc::new(other)).unwrap();
    assert_eq!(tree.visible_paths(), vec!["only.txt"]);
    assert!(!tree.contains("alice/src"));

    let mut broken = WorkspaceNode::folder("alice");
    broken
        .children
        .push(Arc::new(WorkspaceNode::file("x.txt", "")));
    assert!(matches!(
        tree.replace(Arc::new(broken)),
        Err(TreeError::PathMismatch { .. })
    ));
    assert_eq!(tree.visible_paths(), vec!["only.txt"]);
}

