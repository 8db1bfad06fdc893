use predicates::str::diff;

#[test]
fn draw_covering_whole_range_is_sorted() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("lotto-sim");
    cmd.args(["draw", "--count", "5", "--min", "1", "--max", "5"]);
    cmd.assert().success().stdout(diff("1, 2, 3, 4, 5\n"));
}

#[test]
fn seeded_draw_is_repeatable() {
    let run = || {
        assert_cmd::cargo::cargo_bin_cmd!("lotto-sim")
            .args(["draw", "--seed", "99"])
            .output()
            .expect("draw should execute")
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let line = String::from_utf8(first.stdout).expect("utf8 output");
    let numbers: Vec<u32> = line
        .trim()
        .split(", ")
        .map(|value| value.parse().expect("number"))
        .collect();
    assert_eq!(numbers.len(), 5);
    assert!(numbers.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(numbers.iter().all(|n| (1..=90).contains(n)));
}

#[test]
fn show_config_prints_merged_configuration() {
    let expected = concat!(
        "Timeout: 10ms\n",
        "Duration: 10000ms\n",
        "Max rounds: 500\n",
        "Draw: seeded(42)\n",
        "User numbers: 5, 10, 15, 20, 25\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("lotto-sim");
    cmd.args([
        "show-config",
        "--timeout-ms",
        "10",
        "--numbers",
        "5,10,15,20,25",
        "--max-rounds",
        "500",
        "--seed",
        "42",
    ]);
    cmd.assert().success().stdout(diff(expected));
}
