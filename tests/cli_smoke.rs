use predicates::str::contains;

#[test]
fn seeded_summary_stops_at_round_limit() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("lotto-sim");
    cmd.args([
        "run",
        "--numbers",
        "25,20,15,10,5",
        "--timeout-ms",
        "1",
        "--max-rounds",
        "3",
        "--seed",
        "42",
        "--format",
        "summary",
    ]);
    cmd.assert()
        .success()
        .stdout(contains("Draw: seeded(42)\n"))
        .stdout(contains("User numbers: 5, 10, 15, 20, 25\n"))
        .stdout(contains("Simulated rounds: 3\n"))
        .stdout(contains("Matched 5 numbers: 0 times\n"))
        .stdout(contains("Stopped: round limit\n"));
}

#[test]
fn human_format_prints_each_round() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("lotto-sim");
    cmd.args([
        "run",
        "--numbers",
        "1,2,3,4,5",
        "--timeout-ms",
        "1",
        "--max-rounds",
        "2",
        "--seed",
        "7",
    ]);
    cmd.assert()
        .success()
        .stdout(contains("-- round: 1 --- number: "))
        .stdout(contains("-- round: 2 --- number: "))
        .stdout(contains("Simulated rounds: 2\n"));
}

#[test]
fn seeded_json_runs_are_identical() {
    let args = [
        "run",
        "--timeout-ms",
        "1",
        "--max-rounds",
        "5",
        "--seed",
        "1234",
        "--format",
        "json",
    ];
    let first = assert_cmd::cargo::cargo_bin_cmd!("lotto-sim")
        .args(args)
        .output()
        .expect("run should execute");
    let second = assert_cmd::cargo::cargo_bin_cmd!("lotto-sim")
        .args(args)
        .output()
        .expect("run should execute");

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let report: serde_json::Value =
        serde_json::from_slice(&first.stdout).expect("stdout should be json");
    assert_eq!(report["draw"], "seeded(1234)");
    assert_eq!(report["stopReason"], "round-limit");
    assert_eq!(report["state"]["round"], 5);
    assert_eq!(report["state"]["isRunning"], false);
    assert_eq!(report["state"]["timeoutMs"], 1);
    assert_eq!(report["state"]["userNumbers"].as_array().map(Vec::len), Some(5));
}

#[test]
fn duration_ends_a_slow_run() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("lotto-sim");
    cmd.args([
        "run",
        "--timeout-ms",
        "60000",
        "--duration-ms",
        "30",
        "--format",
        "summary",
    ]);
    cmd.assert()
        .success()
        .stdout(contains("Draw: secure\n"))
        .stdout(contains("Simulated rounds: 0\n"))
        .stdout(contains("Stopped: duration\n"));
}
