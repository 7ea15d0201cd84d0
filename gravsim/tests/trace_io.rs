use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use approx::assert_relative_eq;

use gravsim::trace::{COLUMNS, FIELD_WIDTH};
use gravsim::visualization::replay::Series;
use gravsim::{frames, prompt_bodies, read_trace, Body, BodyError, BodyConfig, NVec2, Replay, Scenario, ScenarioConfig, SimError, SimulationDriver, SingularPolicy, System, TraceFile, TraceWriter};

/// Unique scratch path for one test
fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("gravsim-{}-{name}.txt", std::process::id()))
}

fn body(m: f64, x: [f64; 2], v: [f64; 2]) -> Body {
    Body::new(m, NVec2::new(x[0], x[1]), NVec2::new(v[0], v[1]), NVec2::zeros()).unwrap()
}

fn two_body_scenario(steps: usize) -> Scenario {
    let mut cfg = ScenarioConfig::from_bodies(vec![
        BodyConfig { m: 1.0, x: [0.0, 0.0], v: [0.0, 0.5], a: [0.0, 0.0] },
        BodyConfig { m: 1.0, x: [1.0, 0.0], v: [0.0, -0.5], a: [0.0, 0.0] },
    ]);
    cfg.parameters.steps = steps;
    Scenario::build_scenario(cfg).unwrap()
}

// ==================================================================================
// Trace writer tests
// ==================================================================================

#[test]
fn header_is_fixed_width() {
    let w = TraceWriter::new(Vec::new(), true).unwrap();
    let text = String::from_utf8(w.into_inner()).unwrap();
    let header = text.strip_suffix('\n').unwrap();

    assert_eq!(header.len(), FIELD_WIDTH * COLUMNS.len());
    for (k, col) in COLUMNS.iter().enumerate() {
        let field = &header[k * FIELD_WIDTH..(k + 1) * FIELD_WIDTH];
        assert_eq!(field.trim_start(), *col);
        assert!(field.ends_with(col));
    }
}

#[test]
fn no_header_when_not_requested() {
    let w = TraceWriter::new(Vec::new(), false).unwrap();
    assert!(w.into_inner().is_empty());
}

#[test]
fn rows_are_fixed_width_with_six_decimals() {
    let scenario = two_body_scenario(1);
    let (mut driver, mut sys) = scenario.into_driver();
    let mut w = TraceWriter::new(Vec::new(), false).unwrap();
    driver.run(&mut sys, &mut w).unwrap();

    let text = String::from_utf8(w.into_inner()).unwrap();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), 2);

    for row in &rows {
        assert_eq!(row.len(), FIELD_WIDTH * COLUMNS.len());
    }

    let f: Vec<&str> = rows[0].split_whitespace().collect();
    assert_eq!(f[0], "0.001000");
    assert_eq!(f[1], "1");
    assert_eq!(f[2], "1.000000");
    assert_eq!(f[4], "0.000500");
    assert_eq!(f[5], "0.003000");
    assert_eq!(f[6], "0.500000");
    assert_eq!(f[7], "3.000000");
    assert_eq!(f[8], "0.000000");

    let f: Vec<&str> = rows[1].split_whitespace().collect();
    assert_eq!(f[1], "2");
    assert_eq!(f[5], "-0.003000");
    assert_eq!(f[7], "-3.000000");
    assert_eq!(&rows[1][FIELD_WIDTH..2 * FIELD_WIDTH], "              2");
}

// ==================================================================================
// Trace file tests
// ==================================================================================

#[test]
fn trace_file_writes_header_once_and_truncates_on_drop() {
    let path = scratch("lifecycle");
    let _ = fs::remove_file(&path);

    {
        let mut trace = TraceFile::open(&path).unwrap();
        let sys = System::new(vec![body(1.0, [0.0, 0.0], [0.0, 0.0]), body(2.0, [1.0, 1.0], [0.0, 0.0])]);
        trace.writer().append(&sys.bodies, 0.001).unwrap();
        trace.writer().append(&sys.bodies, 0.002).unwrap();

        // rows are on disk before the next step
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1 + 4);
        assert!(text.lines().next().unwrap().trim_start().starts_with("Time"));
    }

    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    fs::remove_file(&path).unwrap();
}

#[test]
fn trace_file_skips_header_on_non_empty_file() {
    let path = scratch("append");
    fs::write(&path, "left over\n").unwrap();

    {
        let mut trace = TraceFile::open(&path).unwrap();
        trace.writer().append(&[body(1.0, [0.0, 0.0], [0.0, 0.0])], 0.001).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "left over");
        assert!(!text.contains("Time"));
    }

    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    fs::remove_file(&path).unwrap();
}

#[test]
fn trace_file_truncates_after_a_failed_run() {
    let path = scratch("failed");
    let _ = fs::remove_file(&path);

    let mut cfg = ScenarioConfig::from_bodies(vec![
        BodyConfig { m: 1.0, x: [0.0, 0.0], v: [1.0, 0.0], a: [0.0, 0.0] },
        BodyConfig { m: 1.0, x: [0.0, 0.0], v: [-1.0, 0.0], a: [0.0, 0.0] },
    ]);
    cfg.parameters.steps = 10;
    let (mut driver, mut sys) = Scenario::build_scenario(cfg).unwrap().into_driver();

    let result = {
        let mut trace = TraceFile::open(&path).unwrap();
        driver.run(&mut sys, trace.writer())
    };

    assert!(matches!(result, Err(SimError::SingularSeparation { .. })));
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    fs::remove_file(&path).unwrap();
}

#[test]
fn trace_file_open_failure_is_an_io_error() {
    let path = std::env::temp_dir().join("gravsim-no-such-dir").join("nested").join("data.txt");
    assert!(matches!(TraceFile::open(&path), Err(SimError::Io(_))));
}

// ==================================================================================
// Trace reader tests
// ==================================================================================

#[test]
fn reader_recovers_a_run() {
    let scenario = two_body_scenario(5);
    let (mut driver, mut sys) = scenario.into_driver();
    let mut w = TraceWriter::new(Vec::new(), true).unwrap();
    driver.run(&mut sys, &mut w).unwrap();

    let records = read_trace(Cursor::new(w.into_inner())).unwrap();
    assert_eq!(records.len(), 10);

    let last = records.last().unwrap();
    assert_eq!(last.body, 2);
    assert_relative_eq!(last.time, 0.005);
    assert_relative_eq!(last.m, 1.0);
    assert_relative_eq!(last.x.x, sys.bodies[1].x.x, epsilon = 1e-6);
    assert_relative_eq!(last.v.y, sys.bodies[1].v.y, epsilon = 1e-6);

    let steps = frames(&records, 2);
    assert_eq!(steps.len(), 5);
    assert_relative_eq!(steps[2].time, 0.003);
    assert_eq!(steps[2].positions.len(), 2);
    assert_eq!(steps[4].velocities[1], last.v);
    assert_eq!(steps[4].accelerations[1], last.a);
    assert_eq!(steps[4].positions[1], last.x);
}

#[test]
fn reader_rejects_short_rows() {
    let text = format!("{}\n   0.001000   1   1.0\n", COLUMNS.join(" "));
    let err = read_trace(Cursor::new(text)).unwrap_err();
    assert!(matches!(err, SimError::TraceFormat { line: 2, .. }), "unexpected error: {err}");
}

#[test]
fn reader_rejects_bad_numbers() {
    let text = "0.001 1 1.0 abc 0 0 0 0 0\n";
    let err = read_trace(Cursor::new(text)).unwrap_err();
    assert!(matches!(err, SimError::TraceFormat { line: 1, .. }), "unexpected error: {err}");
}

#[test]
fn frames_drop_partial_steps() {
    let text = "0.001 1 1 0 0 0 0 0 0\n0.001 2 1 1 0 0 0 0 0\n0.002 1 1 0 0 0 0 0 0\n";
    let records = read_trace(Cursor::new(text)).unwrap();
    assert_eq!(frames(&records, 2).len(), 1);
    assert!(frames(&records, 0).is_empty());
}

// ==================================================================================
// Prompt tests
// ==================================================================================

#[test]
fn prompt_reads_tokens_across_lines() {
    let input = "2\n1 0 0 0 0.5 0 0\n1 1\n0 0 -0.5\n0 0\n";
    let mut out = Vec::new();

    let bodies = prompt_bodies(Cursor::new(input), &mut out).unwrap();

    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0], BodyConfig { m: 1.0, x: [0.0, 0.0], v: [0.0, 0.5], a: [0.0, 0.0] });
    assert_eq!(bodies[1], BodyConfig { m: 1.0, x: [1.0, 0.0], v: [0.0, -0.5], a: [0.0, 0.0] });

    let prompts = String::from_utf8(out).unwrap();
    assert!(prompts.starts_with("Enter the number of bodies: "));
    assert!(prompts.contains("Enter mass, x, y, vx, vy, ax, ay for body 1: "));
    assert!(prompts.contains("Enter mass, x, y, vx, vy, ax, ay for body 2: "));
}

#[test]
fn prompt_rejects_bad_input() {
    let cases = [
        "",                      // no count
        "0\n",                   // no bodies
        "-1\n",                  // negative count
        "1\n1 2 x 0 0 0 0\n",    // not a number
        "1\n1 2 3\n",            // ends early
        "1\n0 0 0 0 0 0 0\n",    // zero mass
        "1\n-2 0 0 0 0 0 0\n",   // negative mass
    ];
    for input in cases {
        let result = prompt_bodies(Cursor::new(input), &mut Vec::new());
        assert!(matches!(result, Err(SimError::Input(_))), "accepted {input:?}");
    }
}

// ==================================================================================
// Scenario tests
// ==================================================================================

#[test]
fn yaml_parameters_default_to_reference_values() {
    let cfg = ScenarioConfig::from_yaml_str(
        "bodies:\n  - m: 1.0\n    x: [0.0, 0.0]\n    v: [0.0, 0.0]\n",
    )
    .unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();

    assert_eq!(scenario.parameters.G, gravsim::G);
    assert_eq!(scenario.parameters.dt, gravsim::DT);
    assert_eq!(scenario.parameters.steps, gravsim::STEP_COUNT);
    assert_eq!(scenario.parameters.singular, SingularPolicy::Fail);
    assert_eq!(scenario.system.bodies[0].a, NVec2::zeros());
}

#[test]
fn yaml_clamp_policy() {
    let cfg = ScenarioConfig::from_yaml_str(
        "parameters:\n  G: 1.0\n  singular:\n    clamp:\n      min_separation: 0.01\nbodies:\n  - m: 1.0\n    x: [0.0, 0.0]\n    v: [0.0, 0.0]\n    a: [1.0, 2.0]\n",
    )
    .unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();

    assert_eq!(scenario.parameters.G, 1.0);
    assert_eq!(scenario.parameters.singular, SingularPolicy::Clamp { min_separation: 0.01 });
    assert_eq!(scenario.system.bodies[0].a, NVec2::new(1.0, 2.0));
}

#[test]
fn scenario_rejects_invalid_input() {
    let ok = BodyConfig { m: 1.0, x: [0.0, 0.0], v: [0.0, 0.0], a: [0.0, 0.0] };

    let massless = ScenarioConfig::from_bodies(vec![ok.clone(), BodyConfig { m: 0.0, ..ok.clone() }]);
    let err = Scenario::build_scenario(massless).unwrap_err();
    assert!(matches!(err, SimError::InvalidBody { index: 1, source: BodyError::Mass(_) }), "unexpected error: {err}");
    assert_eq!(err.to_string(), "Invalid body 2: mass must be positive and finite, got 0");

    let unbounded = ScenarioConfig::from_bodies(vec![BodyConfig { x: [f64::NAN, 0.0], ..ok.clone() }]);
    assert!(matches!(Scenario::build_scenario(unbounded), Err(SimError::InvalidBody { index: 0, source: BodyError::NonFinite })));

    let mut backwards = ScenarioConfig::from_bodies(vec![ok.clone()]);
    backwards.parameters.dt = -0.001;
    assert!(matches!(Scenario::build_scenario(backwards), Err(SimError::InvalidParameter { name: "dt", .. })));

    let mut zero_floor = ScenarioConfig::from_bodies(vec![ok.clone()]);
    zero_floor.parameters.singular = gravsim::SingularConfig::Clamp { min_separation: 0.0 };
    assert!(matches!(Scenario::build_scenario(zero_floor), Err(SimError::InvalidParameter { name: "min_separation", .. })));

    let empty = ScenarioConfig::from_bodies(Vec::new());
    assert!(matches!(Scenario::build_scenario(empty), Err(SimError::Input(_))));
}

#[test]
fn bundled_scenarios_build() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    let mut seen = 0;
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
            continue;
        }
        let cfg = ScenarioConfig::from_yaml_reader(fs::File::open(&path).unwrap()).unwrap();
        let mut scenario = Scenario::build_scenario(cfg).unwrap();

        // a short run stays finite
        scenario.parameters.steps = 50;
        let Scenario { parameters, mut system, force } = scenario;
        let mut driver = SimulationDriver::new(force, &parameters);
        driver.run(&mut system, &mut TraceWriter::new(std::io::sink(), false).unwrap()).unwrap();
        seen += 1;
    }
    assert!(seen >= 2);
}

// ==================================================================================
// Replay tests
// ==================================================================================

#[test]
fn replay_walks_frames_by_stride_and_wraps() {
    let text = (1..=25)
        .map(|s| format!("{:.6} 1 1 {} 0 0 0 0 0\n", s as f64 * 0.001, s))
        .collect::<String>();
    let records = read_trace(Cursor::new(text)).unwrap();
    let mut replay = Replay::new(frames(&records, 1), 10);

    assert_eq!(replay.len(), 25);
    assert_eq!(replay.bodies(), 1);
    assert_eq!(replay.cursor(), 0);

    replay.advance();
    assert_eq!(replay.cursor(), 10);
    assert_eq!(replay.trail(0).count(), 2);

    replay.advance();
    replay.advance();
    assert_eq!(replay.cursor(), 24);

    replay.advance();
    assert_eq!(replay.cursor(), 0);
}

#[test]
fn replay_centres_the_trajectories() {
    let text = "0.001 1 1 -2 0 0 0 0 0\n0.001 2 1 4 2 0 0 0 0\n";
    let records = read_trace(Cursor::new(text)).unwrap();
    let replay = Replay::new(frames(&records, 2), 1);

    let (x0, y0) = replay.to_screen(&NVec2::new(1.0, 1.0));
    assert_relative_eq!(x0, 0.0);
    assert_relative_eq!(y0, 0.0);

    let (x1, _) = replay.to_screen(&NVec2::new(4.0, 1.0));
    assert_relative_eq!(x1, gravsim::visualization::replay::VIEW_EXTENT);
}

#[test]
fn replay_samples_ax_and_ux_over_time() {
    // body 1: ux = step, ax = -step; body 2: ux = 0.5, ax = 2
    let text = (1..=21)
        .map(|s| {
            let t = s as f64 * 0.001;
            format!(
                "{t:.6} 1 1 0 0 {s} 0 -{s} 0\n{t:.6} 2 1 1 1 0.5 0 2 0\n"
            )
        })
        .collect::<String>();
    let records = read_trace(Cursor::new(text)).unwrap();
    let mut replay = Replay::new(frames(&records, 2), 10);

    // only the first frame has been played
    let ux: Vec<(f64, f64)> = replay.series(0, Series::Ux).collect();
    assert_eq!(ux.len(), 1);
    assert_relative_eq!(ux[0].0, 0.001);
    assert_relative_eq!(ux[0].1, 1.0);

    replay.advance();
    replay.advance();
    assert_eq!(replay.cursor(), 20);

    let ux: Vec<(f64, f64)> = replay.series(0, Series::Ux).collect();
    let ax: Vec<(f64, f64)> = replay.series(0, Series::Ax).collect();
    assert_eq!(ux.iter().map(|p| p.1).collect::<Vec<_>>(), vec![1.0, 11.0, 21.0]);
    assert_eq!(ax.iter().map(|p| p.1).collect::<Vec<_>>(), vec![-1.0, -11.0, -21.0]);
    assert_relative_eq!(ax[2].0, 0.021);

    // unknown bodies have no samples
    assert_eq!(replay.series(5, Series::Ax).count(), 0);

    // time and value spans cover every body over the whole trace
    let (u, w) = replay.to_plot(Series::Ux, 0.001, 0.5);
    assert_relative_eq!(u, 0.0);
    assert_relative_eq!(w, 0.0);
    let (u, w) = replay.to_plot(Series::Ux, 0.021, 21.0);
    assert_relative_eq!(u, 1.0);
    assert_relative_eq!(w, 1.0);
    let (_, w) = replay.to_plot(Series::Ax, 0.011, -9.5);
    assert_relative_eq!(w, 0.5, epsilon = 1e-6);
}

#[test]
fn replay_flat_series_sits_mid_panel() {
    let text = "0.001 1 1 0 0 0.5 0 2 0\n0.002 1 1 0 0 0.5 0 2 0\n";
    let records = read_trace(Cursor::new(text)).unwrap();
    let replay = Replay::new(frames(&records, 1), 1);

    let (_, w) = replay.to_plot(Series::Ax, 0.001, 2.0);
    assert_relative_eq!(w, 0.5);
}
