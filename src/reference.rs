//! 가스 성분 몰질량과 실린더 용량 기준표.
//! 값은 모두 정확한 10진수로 보관하여 환산 과정의 누적 오차를 막는다.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 혼합 가스를 구성할 수 있는 성분.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// 수소 (H₂)
    H2,
    /// 헬륨 (He)
    He,
    /// 메탄 (CH₄)
    CH4,
    /// 이산화탄소 (CO₂)
    CO2,
    /// 산소 (O₂)
    O2,
    /// 질소 (N₂)
    N2,
    /// 아르곤 (Ar)
    Ar,
}

impl Component {
    /// 프롬프트에 표시되는 순서 그대로의 전체 목록.
    pub const ALL: [Component; 7] = [
        Component::H2,
        Component::He,
        Component::CH4,
        Component::CO2,
        Component::O2,
        Component::N2,
        Component::Ar,
    ];

    /// 입력/출력에 쓰이는 화학 기호.
    pub fn symbol(self) -> &'static str {
        match self {
            Component::H2 => "H2",
            Component::He => "He",
            Component::CH4 => "CH4",
            Component::CO2 => "CO2",
            Component::O2 => "O2",
            Component::N2 => "N2",
            Component::Ar => "Ar",
        }
    }

    /// 몰질량 [kg/mol]
    pub fn molar_mass(self) -> Decimal {
        match self {
            Component::H2 => dec!(0.002016),
            Component::He => dec!(0.0040026),
            Component::CH4 => dec!(0.016043),
            Component::CO2 => dec!(0.04401),
            Component::O2 => dec!(0.03200),
            Component::N2 => dec!(0.0280134),
            Component::Ar => dec!(0.039948),
        }
    }

    /// 기호와 정확히 일치(대소문자 구분)하는 성분을 찾는다.
    pub fn from_symbol(symbol: &str) -> Option<Component> {
        Component::ALL.into_iter().find(|c| c.symbol() == symbol)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Component {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Component::from_symbol(s).ok_or_else(|| UnknownCode(s.to_string()))
    }
}

/// 실린더 규격 코드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CylinderSize {
    H,
    J,
    S,
}

impl CylinderSize {
    pub const ALL: [CylinderSize; 3] = [CylinderSize::H, CylinderSize::J, CylinderSize::S];

    pub fn code(self) -> &'static str {
        match self {
            CylinderSize::H => "H",
            CylinderSize::J => "J",
            CylinderSize::S => "S",
        }
    }

    /// 실린더를 가득 채웠을 때의 총 몰수 [mol]
    pub fn capacity_moles(self) -> u32 {
        match self {
            CylinderSize::H => 250,
            CylinderSize::J => 350,
            CylinderSize::S => 80,
        }
    }

    pub fn from_code(code: &str) -> Option<CylinderSize> {
        CylinderSize::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl fmt::Display for CylinderSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CylinderSize {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CylinderSize::from_code(s).ok_or_else(|| UnknownCode(s.to_string()))
    }
}

/// 기준표에 없는 기호/코드.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("지원하지 않는 코드: {0}")]
pub struct UnknownCode(pub String);

/// 안내 문구용으로 기호를 `sep`로 이어 붙인다.
pub fn component_symbols(sep: &str) -> String {
    Component::ALL
        .iter()
        .map(|c| c.symbol())
        .collect::<Vec<_>>()
        .join(sep)
}
