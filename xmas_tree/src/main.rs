//! xmas_tree — interactive entry point.

use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use scene_mode::Smoothing;
use xmas_tree::app::{run, AppConfig};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Xmas Tree — Gesture-Driven Holiday Scene              ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Input: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Input: Keyboard simulation  (use --features leap for hardware)");
    println!();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cfg = if args.iter().any(|a| a == "--quick") {
        println!("  Quick-start: 6 placeholder photos, no start-up delay\n");
        parse_args(&args, AppConfig::quick())
    } else if args.is_empty() {
        configure_interactively()
    } else {
        parse_args(&args, AppConfig::default())
    };

    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            eprintln!();
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    println!();
    println!("  Opening window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

const USAGE: &str = "\
Usage: xmas_tree [--quick] [--photos DIR] [--no-camera] [--init-delay-ms N]
                 [--required-frames N] [--time-scaled] [--seed N] [--particles N]";

fn parse_args(args: &[String], mut cfg: AppConfig) -> Result<AppConfig, String> {
    let mut it = args.iter();
    while let Some(arg) = it.next() {
        let mut value = |name: &str| it.next().cloned().ok_or_else(|| format!("{} needs a value", name));
        match arg.as_str() {
            "--quick"           => {}
            "--photos"          => cfg.photo_dir = Some(PathBuf::from(value("--photos")?)),
            "--no-camera"       => cfg.camera = false,
            "--time-scaled"     => cfg.session.smoothing = Smoothing::TimeScaled { reference_hz: 60.0 },
            "--init-delay-ms"   => cfg.init_delay = Duration::from_millis(number(&value("--init-delay-ms")?)?),
            "--required-frames" => cfg.session.debounce.required_frames = required_frames(&value("--required-frames")?)?,
            "--seed"            => cfg.seed = number(&value("--seed")?)?,
            "--particles"       => cfg.particles = number(&value("--particles")?)?,
            "-h" | "--help"     => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument {:?}", other)),
        }
    }
    Ok(cfg)
}

fn number<T: FromStr>(s: &str) -> Result<T, String> {
    s.trim().parse().map_err(|_| format!("{:?} is not a valid number (or is out of range)", s))
}

fn required_frames(s: &str) -> Result<u32, String> {
    match number::<u32>(s)? {
        0 => Err("--required-frames must be at least 1".to_string()),
        n => Ok(n),
    }
}

fn configure_interactively() -> Result<AppConfig, String> {
    let mut cfg = AppConfig::default();

    let dir = read_line("  Photo directory (blank for none): ");
    let dir = dir.trim();
    if !dir.is_empty() {
        cfg.photo_dir = Some(PathBuf::from(dir));
    }

    if cfg.photo_dir.is_none() {
        cfg.placeholders = read_line("  Placeholder photos 0–30 (default 6): ")
            .trim().parse().unwrap_or(6).min(30);
    }

    println!("  Hand input: 1=on  2=off (pointer only)");
    if read_line("  Choice (default 1): ").trim() == "2" {
        cfg.camera = false;
    }

    println!("  Smoothing: 1=per frame  2=frame-rate independent");
    if read_line("  Choice (default 1): ").trim() == "2" {
        cfg.session.smoothing = Smoothing::TimeScaled { reference_hz: 60.0 };
    }

    Ok(cfg)
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
