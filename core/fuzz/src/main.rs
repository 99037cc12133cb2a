//! Fuzz test runner for the ESD DAO report rules
//!
//! Run with: cargo run --release -p esd-dao-fuzz
//! Or: cargo test -p esd-dao-fuzz (for property-based tests)

use esd_dao_fuzz::*;
use esd_dao_core::{UserStatus, U256};
use proptest::prelude::*;
use proptest::strategy::ValueTree;
use proptest::test_runner::TestRunner;
use std::time::Instant;

fn main() {
    println!("=== ESD DAO Report Fuzz Testing ===\n");

    let start = Instant::now();
    let mut total_tests = 0;
    let mut passed = 0;
    let mut failed = 0;

    println!("Running holder discovery fuzz tests...");
    let (p, f) = run_discovery_fuzz(200);
    passed += p;
    failed += f;
    total_tests += p + f;

    println!("Running status decode tests...");
    let (p, f) = run_status_decode_tests();
    passed += p;
    failed += f;
    total_tests += p + f;

    println!("Running bonded totals fuzz tests...");
    let (p, f) = run_totals_fuzz(200);
    passed += p;
    failed += f;
    total_tests += p + f;

    println!("Running completion order tests...");
    let (p, f) = run_completion_order_fuzz(100);
    passed += p;
    failed += f;
    total_tests += p + f;

    let duration = start.elapsed();

    println!("\n=== Fuzz Testing Complete ===");
    println!("Total tests: {}", total_tests);
    println!("Passed: {}", passed);
    println!("Failed: {}", failed);
    println!("Duration: {:?}", duration);

    if failed > 0 {
        std::process::exit(1);
    }
}

fn run_discovery_fuzz(iterations: usize) -> (usize, usize) {
    let mut passed = 0;
    let mut failed = 0;

    let mut runner = TestRunner::default();

    for i in 0..iterations {
        let events = arb_deposit_accounts()
            .new_tree(&mut runner)
            .expect("Failed to generate deposit accounts")
            .current();

        let (result, _) = simulate_discovery(&events);

        if result.is_invariant_violation() {
            println!("  [FAIL] Iteration {}: {:?}", i, result);
            failed += 1;
        } else {
            passed += 1;
        }
    }

    println!("  holder_discovery: {} passed, {} failed", passed, failed);
    (passed, failed)
}

fn run_status_decode_tests() -> (usize, usize) {
    let mut passed = 0;
    let mut failed = 0;

    for code in 0..=u8::MAX {
        match check_status_decode(code, UserStatus::try_from(code)) {
            StatusInvariantResult::Valid => passed += 1,
            violation => {
                println!("  [FAIL] Code {}: {:?}", code, violation);
                failed += 1;
            }
        }
    }

    // Words past one byte, whose low byte alone would decode.
    for raw in 256u64..=511 {
        let word = U256::from(raw);
        match check_status_word_decode(word, UserStatus::try_from(word)) {
            StatusInvariantResult::Valid => passed += 1,
            violation => {
                println!("  [FAIL] Word {}: {:?}", word, violation);
                failed += 1;
            }
        }
    }

    println!("  status_decode: {} passed, {} failed", passed, failed);
    (passed, failed)
}

fn run_totals_fuzz(iterations: usize) -> (usize, usize) {
    let mut passed = 0;
    let mut failed = 0;

    let mut runner = TestRunner::default();

    for i in 0..iterations {
        let holders = arb_holders_all_statuses()
            .new_tree(&mut runner)
            .expect("Failed to generate holders")
            .current();

        let (result, _) = simulate_aggregation(&holders);

        // Only valid codes are generated here, so an error is a failure too.
        if result.is_success() {
            passed += 1;
        } else {
            println!("  [FAIL] Iteration {}: {:?}", i, result);
            failed += 1;
        }
    }

    println!("  bonded_totals: {} passed, {} failed", passed, failed);
    (passed, failed)
}

fn run_completion_order_fuzz(iterations: usize) -> (usize, usize) {
    let mut passed = 0;
    let mut failed = 0;

    let mut runner = TestRunner::default();
    let strategy = arb_holders_all_statuses().prop_flat_map(|holders| {
        let order: Vec<usize> = (0..holders.len()).collect();
        (Just(holders), Just(order).prop_shuffle())
    });

    for i in 0..iterations {
        let (holders, order) = strategy
            .new_tree(&mut runner)
            .expect("Failed to generate completion order")
            .current();

        let (_, sequential) = simulate_aggregation(&holders);
        let (result, shuffled) = simulate_aggregation_in_order(&holders, &order);

        if result.is_success() && sequential == shuffled {
            passed += 1;
        } else {
            println!(
                "  [FAIL] Iteration {}: {:?} (sequential {:?}, shuffled {:?})",
                i, result, sequential, shuffled
            );
            failed += 1;
        }
    }

    println!("  completion_order: {} passed, {} failed", passed, failed);
    (passed, failed)
}
