use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::mixture::RoundingPlaces;

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// 결과 질량의 소수점 이하 자릿수 (저울 분해능/혼합 허용오차에 맞춰 조정)
    pub rounding_places: RoundingPlaces,
}

/// 설정 로드 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("설정 파일 {path} 을(를) 읽을 수 없습니다: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML 역직렬화 오류 (범위를 벗어난 rounding_places 포함)
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// TOML 문자열에서 설정을 읽는다. 누락된 항목은 기본값을 쓴다.
    pub fn from_toml_str(content: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// 지정한 파일에서 설정을 읽는다. 파일이 없으면 오류.
    pub fn from_path(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Config::from_toml_str(&content)
    }
}

/// 설정을 로드한다.
///
/// `--config`로 지정한 파일만 읽는다. 작업 디렉터리의 파일은 찾지 않으며
/// 경로가 없으면 기본 설정을 돌려준다. 파일을 새로 쓰지는 않는다.
pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(p) => Config::from_path(p),
        None => Ok(Config::default()),
    }
}
