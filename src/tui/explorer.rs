use crate::tree::NodePatch;

use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum EditAction {
    NewFile { parent: String },
    NewFolder { parent: String },
    Rename { path: String },
}

/// One-line name prompt shown under the explorer.
pub(crate) struct EditPrompt {
    pub(crate) action: EditAction,
    pub(crate) input: Input,
}

impl EditPrompt {
    pub(crate) fn title(&self) -> &'static str {
        match self.action {
            EditAction::NewFile { .. } => "New file",
            EditAction::NewFolder { .. } => "New folder",
            EditAction::Rename { .. } => "Rename",
        }
    }
}

impl App {
    fn entry_count(&self) -> usize {
        self.shell.tree().visible_entries().len()
    }

    pub(crate) fn clamp_selection(&mut self) {
        let n = self.entry_count();
        self.selected = self.selected.min(n.saturating_sub(1));
    }

    pub(crate) fn move_selection(&mut self, delta: isize) {
        let n = self.entry_count();
        if n == 0 {
            self.selected = 0;
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(n - 1);
    }

    pub(crate) fn selected_path(&self) -> Option<String> {
        self.shell
            .tree()
            .visible_entries()
            .get(self.selected)
            .map(|e| e.node.path.clone())
    }

    /// Folder new entries go into: the selection if it is a folder, otherwise
    /// its parent, otherwise the root.
    fn target_folder(&self) -> String {
        let tree = self.shell.tree();
        let entries = tree.visible_entries();
        match entries.get(self.selected) {
            Some(e) if e.node.is_folder() => e.node.path.clone(),
            Some(e) => e
                .node
                .path
                .rsplit_once('/')
                .map(|(parent, _)| parent.to_string())
                .unwrap_or_else(|| tree.root().path.clone()),
            None => tree.root().path.clone(),
        }
    }

    pub(crate) fn open_prompt(&mut self, action: EditAction) {
        let mut input = Input::default();
        if let EditAction::Rename { path } = &action {
            let current = path.rsplit('/').next().unwrap_or(path);
            input.set(current);
        }
        self.prompt = Some(EditPrompt { action, input });
    }

    pub(crate) fn begin_new_file(&mut self) {
        let parent = self.target_folder();
        self.open_prompt(EditAction::NewFile { parent });
    }

    pub(crate) fn begin_new_folder(&mut self) {
        let parent = self.target_folder();
        self.open_prompt(EditAction::NewFolder { parent });
    }

    pub(crate) fn begin_rename(&mut self) {
        if let Some(path) = self.selected_path() {
            self.open_prompt(EditAction::Rename { path });
        }
    }

    pub(crate) fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    /// Applies the prompt. A rejected name keeps the prompt open with the
    /// reason in the notice line.
    pub(crate) fn confirm_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        let name = prompt.input.buf().trim().to_string();
        let res = match &prompt.action {
            EditAction::NewFile { parent } => self.shell.create_file(parent, &name),
            EditAction::NewFolder { parent } => self.shell.create_folder(parent, &name),
            EditAction::Rename { path } => self.shell.update_node(path, NodePatch::rename(&name)),
        };
        match res {
            Ok(()) => {
                self.notice = None;
                self.select_named(&prompt.action, &name);
            }
            Err(err) => {
                self.notice = Some(err.to_string());
                self.prompt = Some(prompt);
            }
        }
    }

    fn select_named(&mut self, action: &EditAction, name: &str) {
        let path = match action {
            EditAction::NewFile { parent } | EditAction::NewFolder { parent } => {
                format!("{}/{}", parent, name)
            }
            EditAction::Rename { path } => match path.rsplit_once('/') {
                Some((parent, _)) => format!("{}/{}", parent, name),
                None => name.to_string(),
            },
        };
        if let Some(idx) = self
            .shell
            .tree()
            .visible_entries()
            .iter()
            .position(|e| e.node.path == path)
        {
            self.selected = idx;
        }
    }

    pub(crate) fn delete_selected(&mut self) {
        let Some(path) = self.selected_path() else {
            return;
        };
        match self.shell.delete_node(&path) {
            Ok(()) => self.notice = Some(format!("deleted {}", path)),
            Err(err) => self.notice = Some(err.to_string()),
        }
        self.clamp_selection();
    }
}
