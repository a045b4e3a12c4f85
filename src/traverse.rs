use crate::ConditionNode;

/// Pre-order iterator over a condition tree: every node before its children,
/// children left to right.
///
/// The order is stable for a given tree, so external encoders can assign
/// array indices from it.
#[derive(Debug, Clone)]
pub struct Preorder<'a> {
    stack: Vec<&'a ConditionNode>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a ConditionNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

impl ConditionNode {
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// Total number of nodes in the tree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.preorder().count()
    }

    /// Length of the longest path from `self` down to a leaf. A leaf has
    /// depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0_usize)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children().iter().map(|child| (child, depth + 1)));
        }
        deepest
    }
}
