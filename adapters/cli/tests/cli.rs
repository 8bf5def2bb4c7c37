use std::{fs, path::Path, process::Command};

fn binary() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_cleaning-robot"));
    let _ = command.env_remove("RUST_LOG");
    command
}

fn write_fixtures(dir: &Path) {
    fs::write(dir.join("map.txt"), "..x..\n..x..\n..x..\n..x..\n..x..\n").expect("write map");
    fs::write(
        dir.join("walk.json"),
        r#"{"start_pos": [0, 0], "commands": [["east", 1], ["south", 2]]}"#,
    )
    .expect("write request");
    fs::write(
        dir.join("crash.json"),
        r#"{"start_pos": [0, 0], "commands": [["east", 3]]}"#,
    )
    .expect("write request");
}

fn clean(dir: &Path, request: &str) -> std::process::Output {
    binary()
        .current_dir(dir)
        .args(["--history", "history.jsonl", "clean", "--map", "map.txt"])
        .args(["--request", request])
        .output()
        .expect("run binary")
}

#[test]
fn clean_prints_response_and_history_exports_csv() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_fixtures(dir.path());

    let output = clean(dir.path(), "walk.json");
    assert!(output.status.success(), "{output:?}");
    let response: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(
        response,
        serde_json::json!({
            "final_state": "completed",
            "cleaned_tiles": [[0, 0], [1, 0], [1, 1], [1, 2]],
            "count_cleaned_tiles": 4,
            "model_type": "base"
        })
    );

    let output = clean(dir.path(), "crash.json");
    assert!(output.status.success(), "{output:?}");
    let response: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(response["final_state"], "error");
    assert_eq!(response["message"], "Collision detected or invalid path");
    assert_eq!(response["count_cleaned_tiles"], 2);

    let output = binary()
        .current_dir(dir.path())
        .args(["--history", "history.jsonl", "history"])
        .output()
        .expect("run binary");
    assert!(output.status.success(), "{output:?}");
    let csv = String::from_utf8(output.stdout).expect("utf-8");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "id,model_type,start_time,final_state,num_actions,num_cleaned_tiles,duration"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("1,base,"));
    assert!(lines[1].contains(",completed,3,4,"));
    assert!(lines[2].starts_with("2,base,"));
    assert!(lines[2].contains(",error,3,2,"));
}

#[test]
fn premium_flag_and_output_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_fixtures(dir.path());

    let output = binary()
        .current_dir(dir.path())
        .args(["--history", "runs/history.jsonl", "clean"])
        .args(["--map", "map.txt", "--request", "walk.json"])
        .args(["--model", "Premium", "--seed", "11"])
        .output()
        .expect("run binary");
    assert!(output.status.success(), "{output:?}");
    let response: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(response["model_type"], "premium");

    let status = binary()
        .current_dir(dir.path())
        .args(["--history", "runs/history.jsonl", "history"])
        .args(["--output", "export.csv"])
        .status()
        .expect("run binary");
    assert!(status.success());
    let csv = fs::read_to_string(dir.path().join("export.csv")).expect("read export");
    assert!(csv.lines().nth(1).expect("one record").starts_with("1,premium,"));
}

#[test]
fn unknown_direction_fails_without_recording() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_fixtures(dir.path());
    fs::write(
        dir.path().join("bad.json"),
        r#"{"commands": [["south", 1], ["sideways", 1]]}"#,
    )
    .expect("write request");

    let output = clean(dir.path(), "bad.json");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("sideways"));
    assert!(!dir.path().join("history.jsonl").exists());
}

#[test]
fn failed_history_append_prints_no_response() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_fixtures(dir.path());
    fs::write(dir.path().join("history.jsonl"), "{ not a record\n").expect("write history");

    let output = clean(dir.path(), "walk.json");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "{output:?}");
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 1"));
}

#[test]
fn config_file_supplies_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_fixtures(dir.path());
    fs::write(
        dir.path().join("cleaning-robot.toml"),
        "history_path = \"from-config.jsonl\"\ndefault_model = \"premium\"\nseed = 5\nmax_total_steps = 2\n",
    )
    .expect("write config");

    let output = binary()
        .current_dir(dir.path())
        .args(["clean", "--map", "map.txt", "--request", "walk.json"])
        .output()
        .expect("run binary");
    assert!(!output.status.success(), "limit of two steps must reject three");

    let output = binary()
        .current_dir(dir.path())
        .args(["clean", "--map", "map.txt", "--request", "crash.json"])
        .output()
        .expect("run binary");
    assert!(!output.status.success());

    fs::write(
        dir.path().join("cleaning-robot.toml"),
        "history_path = \"from-config.jsonl\"\ndefault_model = \"premium\"\nseed = 5\n",
    )
    .expect("write config");
    let output = binary()
        .current_dir(dir.path())
        .args(["clean", "--map", "map.txt", "--request", "walk.json"])
        .output()
        .expect("run binary");
    assert!(output.status.success(), "{output:?}");
    let response: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(response["model_type"], "premium");
    assert!(dir.path().join("from-config.jsonl").exists());
}
