use std::sync::Arc;
use std::thread;

use condtree::{and, not, or, serialize, validate, ConditionNode, ExpressionKind, Param};

fn role(name: &str) -> ConditionNode {
    ConditionNode::expression(ExpressionKind::Equals, [Param::from("0xabc"), Param::from(name)])
        .unwrap()
}

#[test]
fn share_tree_across_threads() {
    let base = Arc::new(and(&role("ADMIN"), &role("MEMBER")).unwrap());
    let rendered = serialize(&base);

    let mut handles = vec![];

    // Thread 1: extend the shared AND
    let tree = Arc::clone(&base);
    handles.push(thread::spawn(move || and(&tree, &role("GUEST")).unwrap()));

    // Thread 2: wrap it in an OR
    let tree = Arc::clone(&base);
    handles.push(thread::spawn(move || {
        or(&tree, &ConditionNode::boolean(false)).unwrap()
    }));

    // Thread 3: negate it
    let tree = Arc::clone(&base);
    handles.push(thread::spawn(move || not(&tree).unwrap()));

    // Thread 4: only read it
    let tree = Arc::clone(&base);
    handles.push(thread::spawn(move || {
        validate(&tree).unwrap();
        (*tree).clone()
    }));

    let results: Vec<ConditionNode> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results[0].children().len(), 3);
    assert_eq!(results[1].children()[0], *base);
    assert_eq!(results[2].children()[0], *base);
    assert_eq!(results[3], *base);

    // The shared tree itself never changed.
    assert_eq!(base.children().len(), 2);
    assert_eq!(serialize(&base), rendered);
}

#[test]
fn node_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConditionNode>();
}
