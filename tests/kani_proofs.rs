#![cfg(kani)]
//! Kani proof harnesses for the combinator arity model.
//!
//! The harnesses check the child-count arithmetic of `and`/`or`/`not`
//! on a model that tracks only each node's operator tag and child count,
//! without `Arc`, parameters, or recursive trees.
//!
//! Model:
//! - A node is `(tag, children)` where tag 0 = AND, 1 = OR, 2 = NOT, 3 = leaf.
//! - A well-formed node has `children >= 2` for AND/OR, `== 1` for NOT and
//!   `== 0` for a leaf.
//! - `combine(op, left, right)` absorbs `left` when it carries `op`,
//!   otherwise absorbs `right` when it carries `op`, otherwise nests both.
//!
//! Run with: `cargo kani --tests --harness <harness_name>`

const AND: u8 = 0;
const OR: u8 = 1;
const NOT: u8 = 2;
const LEAF: u8 = 3;

/// Upper bound on child counts for bounded proofs.
const MAX_CHILDREN: u32 = 64;

fn well_formed(tag: u8, children: u32) -> bool {
    match tag {
        AND | OR => children >= 2,
        NOT => children == 1,
        LEAF => children == 0,
        _ => false,
    }
}

fn combine(op: u8, left: (u8, u32), right: (u8, u32)) -> (u8, u32) {
    if left.0 == op {
        (op, left.1 + 1)
    } else if right.0 == op {
        (op, right.1 + 1)
    } else {
        (op, 2)
    }
}

fn any_node() -> (u8, u32) {
    let tag: u8 = kani::any();
    let children: u32 = kani::any();
    kani::assume(tag <= LEAF);
    kani::assume(children <= MAX_CHILDREN);
    kani::assume(well_formed(tag, children));
    (tag, children)
}

// ---------------------------------------------------------------------------
// Proof 1: Combining well-formed nodes yields a well-formed node
// ---------------------------------------------------------------------------

#[kani::proof]
fn combine_preserves_arity() {
    let left = any_node();
    let right = any_node();
    let op: u8 = kani::any();
    kani::assume(op == AND || op == OR);

    let (tag, children) = combine(op, left, right);
    assert_eq!(tag, op);
    assert!(well_formed(tag, children));
}

// ---------------------------------------------------------------------------
// Proof 2: A left fold of AND over leaves has one child per leaf
// ---------------------------------------------------------------------------

#[kani::proof]
#[kani::unwind(10)]
fn left_fold_counts_leaves() {
    let n: u32 = kani::any();
    kani::assume(n >= 2 && n <= 8);

    let mut acc = combine(AND, (LEAF, 0), (LEAF, 0));
    let mut i: u32 = 2;
    while i < n {
        acc = combine(AND, acc, (LEAF, 0));
        i += 1;
    }
    assert_eq!(acc, (AND, n));
}
