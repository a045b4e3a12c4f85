use condtree::{and, not, or, ConditionNode, ExpressionKind, Param};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let address = "0x5B38Da6a701c568545dCfcB03FcB875f56beddC4";

    // Build leaves
    let funded = ConditionNode::expression(
        ExpressionKind::GreaterThanOrEqual,
        [Param::from(address), Param::Int(1)],
    )
    .expect("predicate is set");
    let admin = ConditionNode::expression(ExpressionKind::Equals, [address, "ADMIN"])
        .expect("predicate is set");
    let guest = ConditionNode::expression(ExpressionKind::Equals, [address, "GUEST"])
        .expect("predicate is set");

    // funded AND (admin OR NOT guest)
    let condition = not(&guest)
        .and_then(|not_guest| or(&admin, &not_guest))
        .and_then(|role| and(&funded, &role))
        .expect("failed to combine conditions");

    println!("{condition}");
    println!(
        "{} nodes, depth {}",
        condition.node_count(),
        condition.depth()
    );
}
