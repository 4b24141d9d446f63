/// Integration tests for the lexbag shell.
/// Each test pipes a script into the built binary and inspects stdout.
use std::io::Write;
use std::process::{Command, Stdio};

/// Runs `script` through the shell (with a trailing EXIT) and returns stdout.
fn run_script(script: &str, env: &[(&str, &str)]) -> String {
    let mut child = Command::new(env!("CARGO_BIN_EXE_lexbag"))
        .envs(env.iter().copied())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn lexbag");

    {
        let stdin = child.stdin.as_mut().expect("Failed to open stdin");
        stdin
            .write_all(script.as_bytes())
            .expect("Failed to write to stdin");
        stdin.write_all(b"EXIT\n").expect("Failed to write EXIT");
    }

    let output = child.wait_with_output().expect("Failed to read output");
    assert!(output.status.success(), "lexbag exited with {}", output.status);
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Replies only: prompts and the banner stripped.
fn replies(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .skip(3)
        .flat_map(|l| l.split("> "))
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

#[test]
fn test_banner_shows_settings() {
    let out = run_script("", &[("LEXBAG_RESERVE", "64"), ("LEXBAG_CHECKED", "false")]);
    assert!(out.starts_with("lexbag started (reserve=64, checked=false)"), "{out}");
    assert!(out.contains("bye"));
}

#[test]
fn test_bad_settings_fall_back() {
    let out = run_script("", &[("LEXBAG_RESERVE", "lots")]);
    assert!(out.starts_with("lexbag started (reserve=4096, checked=true)"), "{out}");
}

#[test]
fn test_add_and_get() {
    let out = run_script("ADD dog noun.animal.0 2084\nPTR 0 1 20\nPTR 0 1 21\nGET 0 1\n", &[]);
    assert_eq!(replies(&out), vec!["row 0", "OK", "OK", "20 21", "bye"]);
}

#[test]
fn test_relocation_keeps_both_rows_intact() {
    let script = "\
ADD dog 0 1
ADD cat 0 2
PTR 0 1 20
PTR 1 2 5
PTR 0 3 30
PTR 0 2 25
SHOW 0
SHOW 1
STATS
";
    let r = replies(&run_script(script, &[]));
    assert_eq!(r[6], "dog type=noun.Tops.0 synset=1 pointers=[1:20 2:25 3:30] frames=[]");
    assert_eq!(r[7], "cat type=noun.Tops.0 synset=2 pointers=[2:5] frames=[]");
    assert!(r[8].starts_with("rows=2 live=2 | pointers: len=5 live=4 free=1"), "{}", r[8]);
}

#[test]
fn test_range_and_removals() {
    let script = "\
ADD run verb.motion.2 7
PTR 0 1 10
PTR 0 2 20
PTR 0 2 21
PTR 0 9 90
RANGE 0 2
RANGE 0 0 9
UNPTR 0 2 20
UNKEY 0 9
RANGE 0 0
";
    let r = replies(&run_script(script, &[]));
    assert_eq!(r[5], "20 21 90");
    assert_eq!(r[6], "10 20 21");
    assert_eq!(r[9], "10 21");
}

#[test]
fn test_errors_do_not_stop_the_shell() {
    let script = "\
GET 0 1
ADD a 0 1
PTR 0 0 0
PTR 0 1 16777216
FLY
GET 0 1
";
    let r = replies(&run_script(script, &[]));
    assert_eq!(r[0], "ERR no such row: 0");
    assert!(r[2].starts_with("ERR"), "{}", r[2]);
    assert!(r[3].starts_with("ERR"), "{}", r[3]);
    assert_eq!(r[4], "ERR unknown command: FLY");
    assert_eq!(r[5], "(empty)");
}

#[test]
fn test_deleted_rows_stay_deleted() {
    let script = "ADD a 0 1\nADD b 0 2\nPTR 0 1 1\nDEL 0\nGET 0 1\nSHOW 1\nSTATS\n";
    let r = replies(&run_script(script, &[]));
    assert_eq!(r[3], "OK");
    assert_eq!(r[4], "ERR row 0 has been deleted");
    assert!(r[5].starts_with("b "));
    assert!(r[6].starts_with("rows=2 live=1"), "{}", r[6]);
}

#[test]
fn test_dump_is_json() {
    let r = replies(&run_script("ADD a 0 1\nPTR 0 4 40\nDUMP\n", &[]));
    let v: serde_json::Value = serde_json::from_str(&r[2]).expect("DUMP prints JSON");
    assert_eq!(v["table"]["name"][0], "a");
    assert_eq!(v["glob"]["pointers"][0], (4u32 << 24) | 40);
}

#[test]
fn test_unchecked_mode_reports_bad_entries() {
    let script = "ADD a 0 1\nPTR 0 0 0\nPTR 0 1 16777216\nPTR 0 1 5\nGET 0 1\n";
    let r = replies(&run_script(script, &[("LEXBAG_CHECKED", "false")]));
    assert!(r[1].starts_with("ERR"), "{}", r[1]);
    assert!(r[2].starts_with("ERR"), "{}", r[2]);
    assert_eq!(r[3], "OK");
    assert_eq!(r[4], "5");
    assert_eq!(r[5], "bye");
}
