use std::rc::Rc;

use crate::Span;

use super::tree::{NodeKind, SyntaxNode};

/// Read-only navigation over a concrete syntax tree.
///
/// Every move returns a new cursor and leaves `self` where it was, so a
/// caller's position survives any traversal done by a callee.
pub trait SyntaxCursor: Clone {
    /// Grammar-rule label of the focused node.
    fn kind(&self) -> NodeKind;
    fn span(&self) -> Span;
    /// Source text covered by the focused node.
    fn text(&self) -> &str;
    fn first_child(&self) -> Option<Self>;
    /// `None` at the end of the sibling list.
    fn next_sibling(&self) -> Option<Self>;
    fn parent(&self) -> Option<Self>;

    fn children(&self) -> Children<Self> {
        Children {
            next: self.first_child(),
        }
    }
}

pub struct Children<C> {
    next: Option<C>,
}

impl<C: SyntaxCursor> Iterator for Children<C> {
    type Item = C;

    fn next(&mut self) -> Option<C> {
        let current = self.next.take()?;
        self.next = current.next_sibling();
        Some(current)
    }
}

/// Cursor over a [`SyntaxNode`] tree and the source it was recognized from.
#[derive(Debug, Clone)]
pub struct TreeCursor<'a> {
    source: &'a str,
    node: &'a SyntaxNode,
    index: usize,
    parent: Option<Rc<TreeCursor<'a>>>,
}

impl<'a> TreeCursor<'a> {
    pub fn new(root: &'a SyntaxNode, source: &'a str) -> Self {
        TreeCursor {
            source,
            node: root,
            index: 0,
            parent: None,
        }
    }
}

impl SyntaxCursor for TreeCursor<'_> {
    fn kind(&self) -> NodeKind {
        self.node.kind
    }

    fn span(&self) -> Span {
        self.node.span.clone()
    }

    fn text(&self) -> &str {
        let start = self.node.span.start.0 as usize;
        let end = self.node.span.end.0 as usize;
        self.source.get(start..end).unwrap_or("")
    }

    fn first_child(&self) -> Option<Self> {
        self.node.children.first().map(|child| TreeCursor {
            source: self.source,
            node: child,
            index: 0,
            parent: Some(Rc::new(self.clone())),
        })
    }

    fn next_sibling(&self) -> Option<Self> {
        let parent = self.parent.as_ref()?;
        parent
            .node
            .children
            .get(self.index + 1)
            .map(|sibling| TreeCursor {
                source: self.source,
                node: sibling,
                index: self.index + 1,
                parent: Some(Rc::clone(parent)),
            })
    }

    fn parent(&self) -> Option<Self> {
        self.parent.as_deref().cloned()
    }
}
