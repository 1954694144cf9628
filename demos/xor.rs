use rand::SeedableRng;
use rand::rngs::StdRng;

use rust_bpnet::{NetBuilder, Pattern, RunReport};

fn main() -> rust_bpnet::Result<()> {
    // Random XOR examples, trained one at a time.
    let mut rng = StdRng::seed_from_u64(1);
    let data = Pattern::Xor.generate(3_000, &mut rng);

    // 2 -> 4 -> 1 network, tanh everywhere.
    let mut net = NetBuilder::new(data.topology())
        .eta(0.15)
        .alpha(0.5)
        .build_with_seed(0)?;

    let mut report = RunReport::new();
    let summary = net.fit(data.samples(), Some(&mut report))?;
    println!(
        "passes={} final_error={:.6} recent_average_error={:.6}",
        summary.passes, summary.final_error, summary.recent_average_error
    );

    for x in [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]] {
        net.feed_forward(&x)?;
        println!("x={x:?} y={:.4}", net.results()?[0]);
    }

    if let Some(last) = report.last() {
        print!("{last}");
    }

    Ok(())
}
