use assert_cmd::Command;
use chess_replay::{GameOutcome, GameRecord, Illegal, MoveId, Position};
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;
use pretty_assertions::assert_eq;

const BINARY_NAME: &str = "chess-replay";

fn data(name: &str) -> String {
    format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn replays_full_game() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");
    drop(
        cmd.arg(data("fools_mate.txt"))
            .assert()
            .success()
            .stdout(
                contains("* |A B C D E F G H| *")
                    .and(contains("1 White: f3"))
                    .and(contains("1 Black: e5"))
                    .and(contains("2 White: g4"))
                    .and(contains("2 Black: Qh4#"))
                    .and(contains("4 | | | | | | |P|q| 4"))
                    .and(contains("Illegal").not()),
            ),
    );
}

#[test]
fn stops_at_illegal_move() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");
    drop(
        cmd.arg(data("false_check.txt"))
            .assert()
            .failure()
            .stdout(
                contains("1 White: e4+")
                    .and(contains("Illegal move, stopping."))
                    .and(contains("Ke5").not()),
            ),
    );
}

#[test]
fn quiet_omits_board() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");
    drop(
        cmd.arg("--quiet")
            .arg(data("fools_mate.txt"))
            .assert()
            .success()
            .stdout("1 White: f3\n1 Black: e5\n2 White: g4\n2 Black: Qh4#\n"),
    );
}

#[test]
fn json_lines_output() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");
    let output = cmd
        .args(["--format", "json"])
        .arg(data("promotion.txt"))
        .output()
        .expect("Binary should run");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("one JSON object per line"))
        .collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0]["ply"], 1);
    assert_eq!(lines[0]["color"], "White");
    assert_eq!(lines[0]["token"], "b8=Q+");
    assert_eq!(lines[0]["fen"], "1Q2k3/8/8/8/8/8/8/4K3");
    assert_eq!(lines[1]["color"], "Black");
    assert_eq!(lines[3]["fen"], "8/2k5/8/1Q6/8/8/8/4K3");
}

#[test]
fn malformed_move_is_an_error() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");
    drop(
        cmd.arg(data("malformed.txt"))
            .assert()
            .failure()
            .stderr(contains("Nf")),
    );
}

#[test]
fn missing_game_file() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");
    drop(
        cmd.arg(data("no_such_game.txt"))
            .assert()
            .failure()
            .stderr(contains("no_such_game.txt")),
    );
}

#[test]
fn library_replays_fixture() {
    let game = GameRecord::load(data("promotion.txt")).expect("fixture should load");
    let mut last = None;
    let outcome = game
        .play(|ply| last = Some(ply.position.clone()))
        .expect("fixture moves are well formed");
    assert_eq!(outcome, GameOutcome::Completed { plies: 4 });
    assert_eq!(
        last.map(|position| position.to_string()),
        Some(
            Position::from_fen("8/2k5/8/1Q6/8/8/8/4K3")
                .expect("valid placement")
                .to_string()
        )
    );

    let game = GameRecord::load(data("false_check.txt")).expect("fixture should load");
    assert_eq!(
        game.play(|_| {}),
        Ok(GameOutcome::Illegal {
            ply: MoveId::START,
            token: "e4+".to_string(),
            reason: Illegal::NoLegalSource,
        })
    );
}
