//! 电动车共享车队仿真
//!
//! 读取可选的 JSON 配置，运行仿真，并在标准输出打印一行机器可读的摘要。

use clap::Parser;
use evshare_sim::config::SimConfig;
use evshare_sim::runner::run;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "evshare-sim", about = "电动车共享车队离散事件仿真")]
struct Args {
    /// JSON 配置文件；缺省使用内置默认值
    #[arg(long)]
    config: Option<PathBuf>,

    /// 覆盖随机种子
    #[arg(long)]
    seed: Option<u64>,

    /// 覆盖仿真终点（分钟）
    #[arg(long)]
    until_minutes: Option<f64>,

    /// 把摘要写成格式化 JSON 文件；也可通过 SIM_SUMMARY_JSON 环境变量指定
    #[arg(long, env = "SIM_SUMMARY_JSON")]
    summary_json: Option<PathBuf>,

    /// 只输出警告及以上级别的日志
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut cfg = SimConfig::load_or_default(args.config.as_deref());
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if let Some(until) = args.until_minutes {
        cfg.simulation_end_time = until;
    }

    let summary = match run(&cfg) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("simulation failed: {err}");
            return ExitCode::from(2);
        }
    };

    match summary.to_json_line() {
        Ok(line) => println!("METRICS_JSON {line}"),
        Err(err) => {
            eprintln!("failed to encode summary: {err}");
            return ExitCode::FAILURE;
        }
    }

    if let Some(path) = &args.summary_json {
        if let Err(err) = summary.write_json(path) {
            eprintln!("failed to write {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
        eprintln!("wrote summary to {}", path.display());
    }
    ExitCode::SUCCESS
}
