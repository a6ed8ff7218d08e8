use crate::error::{CheatsheetError, Result, display_path};

use super::{NodeId, Taxonomy, is_prefix, trim_keyword};

impl Taxonomy {
    /// Renames the node at `path` in place. Siblings keep their order and the
    /// subtree moves with the node.
    pub fn rename_node<S: AsRef<str>>(&mut self, path: &[S], new_keyword: &str) -> Result<NodeId> {
        let path = owned_path(path);
        if path.is_empty() {
            return Err(CheatsheetError::Validation(
                "cannot rename the taxonomy root".to_string(),
            ));
        }
        let new_keyword = trim_keyword(new_keyword);
        if new_keyword.is_empty() {
            return Err(CheatsheetError::Validation(
                "keyword must not be empty".to_string(),
            ));
        }
        let id = self.resolve(&path).ok_or_else(|| {
            CheatsheetError::NotFound(format!("keyword path {}", display_path(&path)))
        })?;
        let parent = self.parent(id).unwrap_or(NodeId::ROOT);
        let old_keyword = path[path.len() - 1].clone();
        if old_keyword == new_keyword {
            return Ok(id);
        }
        if self.child(parent, &new_keyword).is_some() {
            let mut sibling = path[..path.len() - 1].to_vec();
            sibling.push(new_keyword.clone());
            return Err(CheatsheetError::Conflict(format!(
                "keyword path {} already exists",
                display_path(&sibling)
            )));
        }

        if let Some(children) = self.edges.get_mut(&parent) {
            children.remove(&old_keyword);
            children.insert(new_keyword.clone(), id);
        }
        if let Some(node) = self.node_mut(id) {
            node.keyword = new_keyword;
        }
        Ok(id)
    }

    /// Folds the subtree at `source` into `target`.
    ///
    /// Children missing under `target` are reparented as-is; children present
    /// on both sides are merged recursively. `source` is detached afterwards.
    pub fn merge_nodes<A, B>(&mut self, source: &[A], target: &[B]) -> Result<NodeId>
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let source = owned_path(source);
        let target = owned_path(target);
        if source.is_empty() {
            return Err(CheatsheetError::Validation(
                "cannot merge the taxonomy root".to_string(),
            ));
        }
        if target.is_empty() {
            return Err(CheatsheetError::Validation(format!(
                "cannot merge {} into the taxonomy root",
                display_path(&source)
            )));
        }
        if is_prefix(&source, &target) {
            return Err(CheatsheetError::Validation(format!(
                "cannot merge {} into itself or its descendant {}",
                display_path(&source),
                display_path(&target)
            )));
        }
        let source_id = self.resolve(&source).ok_or_else(|| {
            CheatsheetError::NotFound(format!("keyword path {}", display_path(&source)))
        })?;
        let target_id = self.resolve(&target).ok_or_else(|| {
            CheatsheetError::NotFound(format!("keyword path {}", display_path(&target)))
        })?;

        self.detach(source_id);
        self.merge_into(source_id, target_id);
        Ok(target_id)
    }

    fn merge_into(&mut self, source: NodeId, target: NodeId) {
        let children = self.child_ids(source).to_vec();
        for child in children {
            let Some(keyword) = self.keyword(child).map(ToString::to_string) else {
                continue;
            };
            match self.child(target, &keyword) {
                Some(existing) => self.merge_into(child, existing),
                None => self.attach(target, child, &keyword),
            }
        }
        self.tombstone(source);
    }
}

fn owned_path<S: AsRef<str>>(path: &[S]) -> Vec<String> {
    path.iter().map(|s| s.as_ref().to_string()).collect()
}
