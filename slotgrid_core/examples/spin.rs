use slotgrid_core::{GameConfig, Session};

fn main() {
    // Example end-to-end session
    let mut session = Session::new(GameConfig::default());
    println!("server_seed_hash={}", session.server_seed_hash());
    for _ in 0..3 {
        match session.spin() {
            Ok(report) => println!(
                "nonce={} grid={} lines={} payout={} credits={}",
                report.nonce,
                report.grid,
                report.lines.len(),
                report.payout,
                report.credits
            ),
            Err(err) => println!("rejected: {err}"),
        }
    }
}
