use std::sync::Arc;
use std::thread;

use condtree::{and, ConditionNode, ExpressionKind};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let base = Arc::new(
        and(
            &ConditionNode::expression(ExpressionKind::Equals, ["0xabc", "MEMBER"])
                .expect("predicate is set"),
            &ConditionNode::boolean(true),
        )
        .expect("failed to combine conditions"),
    );

    let handles: Vec<_> = (0..4_i64)
        .map(|i| {
            let shared = Arc::clone(&base);
            thread::spawn(move || {
                // Each thread extends the shared tree without touching it
                let threshold = ConditionNode::expression(ExpressionKind::GreaterThan, [i])
                    .expect("predicate is set");
                let extended = and(&shared, &threshold).expect("failed to combine conditions");
                println!("Thread {i}: {extended}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    println!("Shared: {base}");
}
