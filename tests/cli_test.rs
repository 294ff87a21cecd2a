use std::process::Command;

fn time_trial() -> Command {
    Command::new(env!("CARGO_BIN_EXE_time_trial"))
}

/// Test that a short headless run completes and prints the summary
#[test]
fn test_headless_run_prints_summary() {
    let output = time_trial()
        .args(["--ticks", "600", "--seed", "7"])
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute time trial");

    assert!(
        output.status.success(),
        "Headless run failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Final State ==="), "stdout: {}", stdout);
    assert!(stdout.contains("LAP 1"), "stdout: {}", stdout);
}

/// Test that unusable tick deltas are rejected with an error instead of a panic
#[test]
fn test_invalid_delta_is_rejected() {
    for delta in ["0", "-0.5", "1e20", "NaN", "1e-12"] {
        let output = time_trial()
            .args(["--ticks", "10", &format!("--delta={}", delta)])
            .output()
            .expect("Failed to execute time trial");

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(!output.status.success(), "--delta {} was accepted", delta);
        assert!(
            stderr.contains("--delta must be a positive number of seconds"),
            "--delta {}: {}",
            delta,
            stderr
        );
        assert!(!stderr.contains("panicked"), "--delta {}: {}", delta, stderr);
    }
}
