use criterion::{black_box, criterion_group, criterion_main, Criterion};

use battle_odds::dice::{AttackerRoll, DefenderDice};
use battle_odds::odds::{compute_odds, ExpectedLoss};
use battle_odds::protocol::report::ScenarioReport;
use battle_odds::sweep::{run_sweep, SweepConfig};

fn bench_one_defender_die(c: &mut Criterion) {
    let roll = AttackerRoll::from_raw(&[6, 3, 2]).unwrap();
    c.bench_function("odds_one_defender_die", |b| {
        b.iter(|| compute_odds(black_box(&roll), black_box(DefenderDice::One)))
    });
}

fn bench_two_defender_dice(c: &mut Criterion) {
    let roll = AttackerRoll::from_raw(&[6, 3, 2]).unwrap();
    c.bench_function("odds_two_defender_dice", |b| {
        b.iter(|| compute_odds(black_box(&roll), black_box(DefenderDice::Two)))
    });
}

fn bench_expected_loss(c: &mut Criterion) {
    let roll = AttackerRoll::from_raw(&[5, 4]).unwrap();
    let odds = compute_odds(&roll, DefenderDice::Two).unwrap();
    c.bench_function("expected_loss_from_odds", |b| {
        b.iter(|| ExpectedLoss::from_odds(black_box(&odds), DefenderDice::Two).loss_ratio())
    });
}

fn bench_report_text(c: &mut Criterion) {
    let roll = AttackerRoll::from_raw(&[6, 6, 1]).unwrap();
    let report = ScenarioReport::new(&roll, DefenderDice::Two).unwrap();
    c.bench_function("report_to_text", |b| b.iter(|| black_box(&report).to_text()));
}

fn bench_full_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    for threads in [1, 4] {
        let config = SweepConfig {
            threads,
            quiet: true,
            ..SweepConfig::default()
        };
        group.bench_function(format!("all_scenarios_{}_threads", threads), |b| {
            b.iter(|| run_sweep(black_box(&config)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_one_defender_die,
    bench_two_defender_dice,
    bench_expected_loss,
    bench_report_text,
    bench_full_sweep,
);
criterion_main!(benches);
