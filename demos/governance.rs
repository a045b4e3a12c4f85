use condtree::{
    and, or, ConditionError, ConditionNode, ExpressionKind, Param, PluginReturnType, PluginType,
    RestrictionPlugin,
};
use tracing_subscriber::EnvFilter;

const TREASURY: &str = "0xAb8483F64d9C6d1EcF9b849Ae677dD3315835cb2";

fn plugins() -> Result<Vec<RestrictionPlugin>, ConditionError> {
    let admin = ConditionNode::expression(ExpressionKind::Equals, [TREASURY, "ADMIN"])?;
    let funded = ConditionNode::expression(
        ExpressionKind::Equals,
        [Param::from(TREASURY), Param::Int(1)],
    )?;
    let member = ConditionNode::expression(ExpressionKind::Equals, [TREASURY, "MEMBER"])?;
    let large_transfer = ConditionNode::expression(
        ExpressionKind::GreaterThan,
        [Param::from(TREASURY), Param::from(10_u128.pow(24))],
    )?;

    Ok(vec![
        RestrictionPlugin::new(
            "funded admins skip the vote",
            and(&funded, &admin)?,
            PluginReturnType::AbsolutelyYes,
            PluginType::BeforeOperation,
        )?,
        RestrictionPlugin::new(
            "large transfers by members go to a vote",
            and(&member, &large_transfer)?,
            PluginReturnType::VotingNeeded,
            PluginType::BeforeOperation,
        )?,
        RestrictionPlugin::new(
            "everyone else is refused",
            or(&admin, &member)?.not()?,
            PluginReturnType::No,
            PluginType::BeforeOperation,
        )?,
    ])
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let plugins = match plugins() {
        Ok(plugins) => plugins,
        Err(err) => {
            eprintln!("invalid plugin condition: {err}");
            std::process::exit(1);
        }
    };

    for plugin in &plugins {
        println!("{plugin}");
        // The rows an encoder would emit, in index order.
        for (index, node) in plugin.condition().preorder().enumerate() {
            println!(
                "  #{index}: kind={} operator={:?} predicate={:?} params={}",
                node.kind().code(),
                node.operator().map(|op| op.code()),
                node.predicate().map(|p| p.code()),
                node.parameters().len(),
            );
        }
    }

    // Invalid leaves are rejected before they ever reach a plugin.
    if let Err(err) = ConditionNode::expression(None::<ExpressionKind>, [TREASURY]) {
        println!("rejected: {err}");
    }
}
