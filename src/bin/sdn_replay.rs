//! 场景回放
//!
//! 把 JSON 场景（拓扑 + 事件序列）喂给控制器核心，打印下行请求与统计信息

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use sdnroute_rs::ctl::{ControllerConfig, RoutingPolicy};
use sdnroute_rs::flow::AgentMessage;
use sdnroute_rs::replay::{ScenarioSpec, run_scenario};

#[derive(Debug, Parser)]
#[command(name = "sdn-replay", about = "Replay a controller scenario and print emitted requests")]
struct Args {
    /// Path to scenario.json
    #[arg(long)]
    scenario: PathBuf,

    /// Controller config JSON; overrides the scenario's embedded config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the controller variant
    #[arg(long, value_enum)]
    policy: Option<RoutingPolicy>,

    /// Write the full outcome (decisions, requests, link loads, stats) as JSON
    #[arg(long)]
    out_json: Option<PathBuf>,

    /// Do not print one line per emitted request
    #[arg(long)]
    quiet: bool,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {msg}");
    std::process::exit(2)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args = Args::parse();
    let spec = ScenarioSpec::from_json_file(&args.scenario).unwrap_or_else(|e| fail(e));

    let mut config = match &args.config {
        Some(path) => ControllerConfig::from_json_file(path).unwrap_or_else(|e| fail(e)),
        None => spec.config.clone().unwrap_or_default(),
    };
    if let Some(policy) = args.policy {
        config.policy = policy;
    }
    if let Err(e) = config.validate() {
        fail(e);
    }

    let outcome = run_scenario(&spec, config);

    if !args.quiet {
        for msg in &outcome.messages {
            match msg {
                AgentMessage::InstallRule(r) => println!(
                    "install_rule switch={} in_port={} eth_dst={} action={:?} priority={} idle={} hard={}",
                    r.switch,
                    r.rule_match
                        .in_port
                        .map_or_else(|| "*".to_string(), |p| p.to_string()),
                    r.rule_match
                        .eth_dst
                        .map_or_else(|| "*".to_string(), |m| m.to_string()),
                    r.action,
                    r.priority,
                    r.idle_timeout,
                    r.hard_timeout
                ),
                AgentMessage::SendFrame(p) => println!(
                    "send_frame switch={} in_port={} action={:?}",
                    p.switch, p.in_port, p.action
                ),
            }
        }
        for d in &outcome.decisions {
            println!(
                "decision seq={} action={} path={:?} reason={}",
                d.seq,
                d.action,
                d.path.iter().map(|s| s.0).collect::<Vec<_>>(),
                d.reason.as_deref().unwrap_or("-")
            );
        }
    }

    let stats = serde_json::to_string(&outcome.stats).unwrap_or_else(|e| fail(e));
    println!("stats {stats}");

    if let Some(path) = &args.out_json {
        let body = serde_json::to_string_pretty(&outcome).unwrap_or_else(|e| fail(e));
        fs::write(path, body).unwrap_or_else(|e| fail(e));
    }
}
