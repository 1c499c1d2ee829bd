use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use gas_mix_calculator::app::{self, AppError};
use gas_mix_calculator::config;
use gas_mix_calculator::mixture::RoundingPlaces;
use gas_mix_calculator::ui_cli::Console;

#[derive(Parser)]
#[command(name = "gas_mix_calculator")]
#[command(about = "Gas mix calculator - component masses for a target cylinder mixture", long_about = None)]
struct Cli {
    /// TOML 설정 파일 경로 (지정하지 않으면 기본값)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// 결과 질량의 소수점 이하 자릿수 (설정 파일보다 우선)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=8))]
    places: Option<u32>,
    /// 로그 상세도 (-v: info, -vv: debug, -vvv: trace). 로그는 stderr로 나간다.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match try_run(&cli) {
        Ok(()) | Err(AppError::InputClosed) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("오류: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: &Cli) -> Result<(), AppError> {
    let mut cfg = config::load_or_default(cli.config.as_deref())?;
    if let Some(places) = cli.places.and_then(RoundingPlaces::new) {
        cfg.rounding_places = places;
    }
    tracing::info!(rounding_places = %cfg.rounding_places, "configuration loaded");

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    app::run(&mut console, &cfg)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}
