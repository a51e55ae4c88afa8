//! DocumentIndex: flat document-order view of a snapshot tree.

use std::collections::HashMap;

use super::{Node, NodeId, RefId};

/// One node in document order, with inherited state resolved.
#[derive(Debug, Clone, Copy)]
pub struct IndexedNode<'a> {
    pub node: &'a Node,
    /// Position of the parent in the index.
    pub parent: Option<usize>,
    /// Not painted: self hidden or inside a hidden subtree.
    pub hidden: bool,
    /// Inside (or is) an anchor/button whose text is upper-cased.
    pub uppercased: bool,
    /// Inside (or is) a native form field.
    pub in_form_field: bool,
}

/// Document-order index over a borrowed tree.
#[derive(Debug, Default)]
pub struct DocumentIndex<'a> {
    entries: Vec<IndexedNode<'a>>,
    by_id: HashMap<&'a NodeId, usize>,
}

impl<'a> DocumentIndex<'a> {
    /// Index `root` and all descendants in pre-order.
    pub fn build(root: &'a Node) -> Self {
        let mut index = Self::default();
        index.push(root, None, false, false, false);
        index
    }

    fn push(
        &mut self,
        node: &'a Node,
        parent: Option<usize>,
        subtree_hidden: bool,
        uppercased: bool,
        in_form_field: bool,
    ) {
        let position = self.entries.len();
        let subtree_hidden = subtree_hidden || node.hides_subtree();
        let uppercased = uppercased || node.role.is_uppercased();
        let in_form_field = in_form_field || node.role.is_form_field();
        self.entries.push(IndexedNode {
            node,
            parent,
            hidden: subtree_hidden || node.is_self_hidden(),
            uppercased,
            in_form_field,
        });
        // First occurrence wins if the collaborator reports duplicate ids.
        self.by_id.entry(&node.id).or_insert(position);
        for child in &node.children {
            self.push(child, Some(position), subtree_hidden, uppercased, in_form_field);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, position: usize) -> &IndexedNode<'a> {
        &self.entries[position]
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &IndexedNode<'a>)> {
        self.entries.iter().enumerate()
    }

    pub fn position_of(&self, id: &NodeId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Parent chain of `position`, nearest first, excluding the node itself.
    pub fn ancestors(&self, position: usize) -> Ancestors<'_, 'a> {
        Ancestors {
            index: self,
            next: self.entries[position].parent,
        }
    }

    /// `ancestor` is `descendant` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: usize, descendant: usize) -> bool {
        ancestor == descendant || self.ancestors(descendant).any(|p| p == ancestor)
    }

    /// Containment in either direction.
    pub fn are_related(&self, a: usize, b: usize) -> bool {
        self.is_ancestor_or_self(a, b) || self.is_ancestor_or_self(b, a)
    }

    /// Reference id of the nearest tagged node at or above `position`.
    pub fn nearest_ref(&self, position: usize) -> Option<RefId> {
        std::iter::once(position)
            .chain(self.ancestors(position))
            .find_map(|p| self.entries[p].node.ref_id)
    }
}

/// Iterator over ancestor positions.
pub struct Ancestors<'i, 'a> {
    index: &'i DocumentIndex<'a>,
    next: Option<usize>,
}

impl Iterator for Ancestors<'_, '_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next?;
        self.next = self.index.entries[current].parent;
        Some(current)
    }
}
