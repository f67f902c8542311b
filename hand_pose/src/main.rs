//! Replay a landmark recording through the classifier and debouncer.
//!
//! ```text
//! pose_replay <frames.txt> [--required N] [--fps N]
//! ```
//!
//! One frame per line: 63 numbers (21 × x y z) or `-` / blank for "no hand".

use std::fs::File;
use std::io::{BufRead, BufReader};

use hand_pose::{
    parse_frame_line, DebounceConfig, DebounceOutcome, GestureClassifier, HandMetrics,
    PoseDebouncer, PoseError, PoseLabel,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(path) = args.iter().find(|a| !a.starts_with("--")).cloned() else {
        eprintln!("usage: pose_replay <frames.txt> [--required N] [--fps N]");
        std::process::exit(2);
    };
    let required = flag_value(&args, "--required").unwrap_or(10);
    let fps      = flag_value(&args, "--fps").unwrap_or(30).max(1);

    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              Hand Pose Replay                        ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    if let Err(e) = replay(&path, required, fps) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn flag_value(args: &[String], name: &str) -> Option<u32> {
    let pos = args.iter().position(|a| a == name)?;
    args.get(pos + 1)?.parse().ok()
}

fn replay(path: &str, required: u32, fps: u32) -> Result<(), PoseError> {
    let reader = BufReader::new(File::open(path)?);
    let classifier = GestureClassifier::default();
    let mut debouncer = PoseDebouncer::new(DebounceConfig {
        required_frames: required,
        ..DebounceConfig::default()
    });
    let frame_ms = 1000.0 / fps as f64;

    let mut frames    = 0usize;
    let mut skipped   = 0usize;
    let mut confirms  = 0usize;

    println!("  {:>6}  {:>8}  {:>7}  {:>7}  {:>5}  {}", "frame", "time ms", "avgTip", "pinch", "run", "pose");
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let ts = i as f64 * frame_ms;

        let frame = match parse_frame_line(&line, line_no, ts) {
            Ok(f)  => f,
            Err(e) => {
                log::warn!("skipping: {}", e);
                skipped += 1;
                continue;
            }
        };
        frames += 1;

        // A lost hand wipes the run instead of counting NONE frames.
        let (out, metrics) = match frame.as_ref() {
            Some(f) => (debouncer.observe(classifier.classify(f)), Some(HandMetrics::measure(f))),
            None    => {
                debouncer.clear();
                (DebounceOutcome {
                    label:           PoseLabel::None,
                    count:           0,
                    confirmed:       false,
                    display_changed: false,
                }, None)
            }
        };
        if out.count == required {
            confirms += 1;
        }

        let (avg, pinch) = metrics
            .map(|m| (format!("{:.3}", m.avg_tip_distance), format!("{:.3}", m.pinch_distance)))
            .unwrap_or_else(|| ("-".into(), "-".into()));
        println!(
            "  {:>6}  {:>8.1}  {:>7}  {:>7}  {:>5}  {}{}",
            line_no, ts, avg, pinch, out.count, out.label,
            if out.confirmed { "  ✓" } else { "" },
        );
    }

    println!();
    println!("  {} frames, {} skipped, {} confirmations", frames, skipped, confirms);
    Ok(())
}
