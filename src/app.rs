use std::io::{BufRead, Write};

use crate::config::{Config, ConfigError};
use crate::mixture::{self, MixtureError, MixtureResult};
use crate::ui_cli::{self, Console};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 혼합물 구성/계산 오류
    #[error("혼합물 계산 오류: {0}")]
    Mixture(#[from] MixtureError),
    /// 표준 입력이 닫힘 (EOF)
    #[error("입력이 종료되었습니다")]
    InputClosed,
}

/// 혼합물 하나를 입력받아 계산하고 결과를 출력한다.
pub fn run_once<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &Config,
) -> Result<Option<MixtureResult>, AppError> {
    let cylinder = ui_cli::collect_cylinder_size(console)?;
    let count = ui_cli::collect_component_count(console)?;
    let request = match ui_cli::collect_components_and_percentages(console, cylinder, count) {
        Ok(request) => request,
        Err(AppError::Mixture(err)) => {
            tracing::warn!(error = %err, "mixture request rejected");
            ui_cli::report_failure(console, &err)?;
            return Ok(None);
        }
        Err(err) => return Err(err),
    };
    tracing::info!(%cylinder, components = count, "mixture request");

    if !mixture::check_total(&request) {
        tracing::debug!(total = ?request.total_percentage(), "percentages do not sum to 100");
        ui_cli::warn_total(console)?;
    }

    match mixture::calculate_mixture(&request, config.rounding_places) {
        Ok(result) => {
            ui_cli::present(console, &result)?;
            Ok(Some(result))
        }
        Err(err) => {
            tracing::warn!(error = %err, "mixture calculation failed");
            ui_cli::report_failure(console, &err)?;
            Ok(None)
        }
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다. 종료 명령은 없으며 입력이 끝나야 멈춘다.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &Config,
) -> Result<(), AppError> {
    loop {
        run_once(console, config)?;
    }
}
