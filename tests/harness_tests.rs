#![cfg(unix)]

use hydrogen_bench::measurement::Measurement;
use hydrogen_bench::{Benchmark, CliReport, Dispersion, Error, Harness, Language};
use regex::Regex;
use std::cell::Cell;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

/*
 * Every test runs `sh` on stub scripts kept in `<tempdir>/stub/<name>.sh`, with the temporary
 * directory standing in for the harness directory.
 */
fn stub_dir(stubs: &[(&str, &str)]) -> TempDir {
    let dir = tempdir().unwrap();
    let folder = dir.path().join("stub");
    fs::create_dir(&folder).unwrap();
    for (name, body) in stubs {
        fs::write(folder.join(format!("{}.sh", name)), body).unwrap();
    }
    dir
}

fn sh(name: &str) -> Language {
    Language::new(name, "stub", "sh", "sh")
}

fn bench(name: &str) -> Benchmark {
    Benchmark::new(name, name)
}

fn harness(dir: &TempDir) -> Harness<CliReport<Vec<u8>>> {
    Harness::new(CliReport::new(Vec::new(), false)).working_directory(dir.path())
}

fn output<M: Measurement>(harness: Harness<CliReport<Vec<u8>>, M>) -> String {
    String::from_utf8(harness.into_report().into_inner()).unwrap()
}

fn run_times(output: &str) -> Vec<f64> {
    let re = Regex::new(r"[0-9]+\.[0-9]{3} ").unwrap();
    let start = output.find("Run Times: ").unwrap();
    let end = output.find("Average: ").unwrap_or_else(|| output.len());
    re.find_iter(&output[start..end])
        .map(|m| m.as_str().trim().parse().unwrap())
        .collect()
}

fn count_file(dir: &Path) -> usize {
    fs::read_to_string(dir.join("count"))
        .unwrap()
        .trim()
        .parse()
        .unwrap()
}

const COUNT: &str = "n=$(cat count 2>/dev/null || echo 0)\nn=$((n + 1))\necho \"$n\" > count\n";

// Replays fixed durations instead of reading the clock.
struct Scripted {
    times: Vec<f64>,
    next: Cell<usize>,
}
impl Scripted {
    fn new(times: Vec<f64>) -> Scripted {
        Scripted {
            times,
            next: Cell::new(0),
        }
    }
}
impl Measurement for Scripted {
    type Intermediate = ();
    type Value = f64;

    fn start(&self) -> Self::Intermediate {}
    fn end(&self, _: Self::Intermediate) -> Self::Value {
        let i = self.next.get();
        self.next.set(i + 1);
        self.times[i % self.times.len()]
    }
    fn to_seconds(&self, value: &Self::Value) -> f64 {
        *value
    }
}

#[test]
fn test_thirty_runs_in_six_rows() {
    let dir = stub_dir(&[("ok", "exit 0\n")]);
    let mut harness = harness(&dir);
    let outcomes = harness.run(&[sh("Stub")], &[bench("ok")]).unwrap();

    let summary = outcomes[0].as_ref().unwrap();
    assert_eq!(30, summary.times.len());

    let out = output(harness);
    assert_eq!(30, run_times(&out).len());

    let full_rows = out
        .lines()
        .filter(|line| line.starts_with("Run Times: ") || line.starts_with("           0"))
        .filter(|line| run_times_in(line) == 5)
        .count();
    assert_eq!(6, full_rows, "{}", out);
    assert!(out.contains("           Average: "));
    assert!(out.contains("Standard Deviation: "));
}

fn run_times_in(line: &str) -> usize {
    Regex::new(r"[0-9]+\.[0-9]{3} ").unwrap().find_iter(line).count()
}

#[test]
fn test_fixed_sleep() {
    let dir = stub_dir(&[("sleep", "sleep 0.05\n")]);
    let mut harness = harness(&dir).iterations(5);
    let outcomes = harness.run(&[sh("Stub")], &[bench("sleep")]).unwrap();

    let summary = outcomes[0].as_ref().unwrap();
    assert_eq!(5, summary.times.len());
    for &time in &summary.times {
        assert!(time >= 0.05, "run took {}", time);
        assert!(time < 1.0, "run took {}", time);
    }
    assert!(summary.mean >= 0.05 && summary.mean < 1.0);
    assert!(summary.dispersion < 0.5);
}

#[test]
fn test_cycling_sleep() {
    let script = format!(
        "{}case $(((n - 1) % 3)) in\n  1) sleep 0.1 ;;\n  2) sleep 0.2 ;;\nesac\n",
        COUNT
    );
    let dir = stub_dir(&[("cycle", script.as_str())]);
    let mut harness = harness(&dir).iterations(6);
    let outcomes = harness.run(&[sh("Stub")], &[bench("cycle")]).unwrap();

    let summary = outcomes[0].as_ref().unwrap();
    assert_eq!(6, count_file(dir.path()));
    assert!((summary.mean - 0.1).abs() < 0.05, "mean {}", summary.mean);
    // sqrt(6 * 0.01 * 2 / 3)
    assert!(
        (summary.dispersion - 0.2).abs() < 0.08,
        "dispersion {}",
        summary.dispersion
    );
}

#[test]
fn test_scripted_times_give_exact_summary() {
    let dir = stub_dir(&[("ok", "exit 0\n")]);
    let mut harness = harness(&dir).with_measurement(Scripted::new(vec![0.0, 0.1, 0.2]));
    let outcomes = harness.run(&[sh("Stub")], &[bench("ok")]).unwrap();
    assert!(outcomes[0].is_ok());

    let out = output(harness);
    assert!(out.starts_with(&"-".repeat(80)));
    assert!(out.contains("Run Times: 0.000 0.100 0.200 0.000 0.100 \n           0.200 "));
    assert!(out.contains("\n           Average: 0.100\n"), "{}", out);
    assert!(out.contains("\nStandard Deviation: 0.447\n"), "{}", out);
}

#[test]
fn test_corrected_dispersion_has_its_own_label() {
    let dir = stub_dir(&[("ok", "exit 0\n")]);
    let mut harness = harness(&dir)
        .dispersion(Dispersion::Sample)
        .with_measurement(Scripted::new(vec![0.0, 0.1, 0.2]));
    harness.run(&[sh("Stub")], &[bench("ok")]).unwrap();

    let out = output(harness);
    assert!(out.contains("\n   Std. Dev. (n-1): 0.083\n"), "{}", out);
    assert!(!out.contains("Standard Deviation"));
}

#[test]
fn test_immediate_failure() {
    let dir = stub_dir(&[("fail", "exit 1\n")]);
    let mut harness = harness(&dir);
    let outcomes = harness.run(&[sh("Stub")], &[bench("fail")]).unwrap();

    match &outcomes[0] {
        Err(Error::Status { run, status, .. }) => {
            assert_eq!(1, *run);
            assert_eq!(Some(1), status.code());
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    let out = output(harness);
    assert!(out.contains("Run Times: Error: "), "{}", out);
    assert!(run_times(&out).is_empty());
    assert!(!out.contains("Average"));
}

#[test]
fn test_failure_after_ten_runs() {
    let script = format!("{}if [ \"$n\" -gt 10 ]; then exit 1; fi\n", COUNT);
    let dir = stub_dir(&[("flaky", script.as_str())]);
    let mut harness = harness(&dir);
    let outcomes = harness.run(&[sh("Stub")], &[bench("flaky")]).unwrap();

    assert!(matches!(outcomes[0], Err(Error::Status { run: 11, .. })));
    // The remaining runs were abandoned
    assert_eq!(11, count_file(dir.path()));

    let out = output(harness);
    assert_eq!(10, run_times(&out).len());
    assert!(out.contains("Error: "));
    assert!(!out.contains("Average"));
}

#[test]
fn test_missing_executable() {
    let dir = stub_dir(&[("ok", "exit 0\n")]);
    let missing = Language::new("Missing", "stub", "sh", "/does/not/exist");
    let mut harness = harness(&dir);
    let outcomes = harness.run(&[missing], &[bench("ok")]).unwrap();

    assert!(matches!(outcomes[0], Err(Error::Spawn { .. })));

    let out = output(harness);
    assert!(out.contains("Error: "));
    assert!(out.contains("/does/not/exist"));
    assert!(!out.contains("Average"));
}

#[test]
fn test_failure_is_isolated() {
    let dir = stub_dir(&[("ok", "exit 0\n")]);
    let languages = [
        sh("Before"),
        Language::new("Broken", "stub", "sh", "/does/not/exist"),
        sh("After"),
    ];
    let mut harness = harness(&dir).iterations(3);
    let outcomes = harness.run(&languages, &[bench("ok")]).unwrap();

    assert_eq!(3, outcomes.len());
    assert!(outcomes[0].is_ok());
    assert!(outcomes[1].is_err());
    assert!(outcomes[2].is_ok());

    let out = output(harness);
    assert_eq!(2, out.matches("Average: ").count());
    assert_eq!(3, out.matches(&"-".repeat(80)).count());
}

#[test]
fn test_pairs_run_language_major() {
    let dir = stub_dir(&[("a", "exit 0\n"), ("b", "exit 0\n")]);
    let mut harness = harness(&dir).iterations(1);
    harness
        .run(&[sh("One"), sh("Two")], &[bench("a"), bench("b")])
        .unwrap();

    let out = output(harness);
    let blocks: Vec<&str> = out.split(&"-".repeat(80)).skip(1).collect();
    assert_eq!(4, blocks.len());

    let expected = [("a", "One"), ("b", "One"), ("a", "Two"), ("b", "Two")];
    for (block, (benchmark, language)) in blocks.iter().zip(expected.iter()) {
        let header = format!("\nBenchmark: {}\n Language: {}\n", benchmark, language);
        assert!(block.starts_with(&header), "{:?}", block);
    }
}

#[test]
fn test_child_runs_in_harness_directory() {
    let dir = stub_dir(&[("pwd", "pwd -P > cwd\necho \"$0 $*\" > argv\n")]);
    let language = Language::new("Stub", "stub", "sh", "sh").arg("-e");
    let mut harness = harness(&dir).iterations(1);
    let outcomes = harness.run(&[language], &[bench("pwd")]).unwrap();
    assert!(outcomes[0].is_ok());

    let cwd = fs::read_to_string(dir.path().join("cwd")).unwrap();
    assert_eq!(
        fs::canonicalize(dir.path()).unwrap(),
        Path::new(cwd.trim()).to_path_buf()
    );

    // `sh -e stub/pwd.sh`: the source path arrives last, relative and slash separated
    let argv = fs::read_to_string(dir.path().join("argv")).unwrap();
    assert_eq!("stub/pwd.sh ", argv.trim_end_matches('\n'));
}

#[test]
fn test_one_child_at_a_time() {
    let script = "mkdir lock || exit 3\nsleep 0.01\nrmdir lock\n";
    let dir = stub_dir(&[("lock", script)]);
    let mut harness = harness(&dir).iterations(10);
    let outcomes = harness
        .run(&[sh("One"), sh("Two")], &[bench("lock")])
        .unwrap();

    assert!(outcomes.iter().all(Result::is_ok));
    assert!(!dir.path().join("lock").exists());
}

#[test]
fn test_filter_skips_pairs() {
    let dir = stub_dir(&[("a", "exit 0\n"), ("b", "exit 0\n")]);
    let mut harness = harness(&dir)
        .iterations(1)
        .filter(Regex::new("^b/").unwrap());
    let outcomes = harness
        .run(&[sh("One"), sh("Two")], &[bench("a"), bench("b")])
        .unwrap();
    assert_eq!(2, outcomes.len());

    let out = output(harness);
    assert!(!out.contains("Benchmark: a"));
    assert_eq!(2, out.matches("Benchmark: b").count());
}

#[test]
fn test_list_runs_nothing() {
    let script = format!("{}exit 0\n", COUNT);
    let dir = stub_dir(&[("a", script.as_str())]);
    let mut harness = harness(&dir);
    harness
        .list(&[sh("One"), sh("Two")], &[bench("a")])
        .unwrap();

    assert!(!dir.path().join("count").exists());
    assert_eq!("a/One\na/Two\n", output(harness));
}
