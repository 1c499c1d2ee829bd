//! 체적 백분율 → 질량 환산 로직.
//!
//! 이상기체 가정: 성분 몰수 = 실린더 총 몰수 × (체적% / 100),
//! 질량 = 성분 몰수 × 몰질량. 모든 계산은 `Decimal`로 수행한다.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::reference::{Component, CylinderSize};

/// 한 혼합물에 들어갈 수 있는 최소 성분 수
pub const MIN_COMPONENTS: usize = 2;
/// 한 혼합물에 들어갈 수 있는 최대 성분 수
pub const MAX_COMPONENTS: usize = 5;

/// 혼합물 구성/계산 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MixtureError {
    /// 성분 수가 허용 범위를 벗어남
    #[error("성분 수는 {min}~{max} 사이여야 합니다: {count}", min = MIN_COMPONENTS, max = MAX_COMPONENTS)]
    ComponentCount { count: usize },
    /// 마지막이 아닌 칸에 Bal 사용
    #[error("Bal은 마지막 성분에만 사용할 수 있습니다 (#{slot})")]
    BalanceNotLast { slot: usize },
    /// Decimal 표현 범위 초과
    #[error("{what} 계산 중 수치 범위를 초과했습니다")]
    Overflow { what: String },
}

/// 결과 질량을 표시할 소수점 이하 자릿수 (0~8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct RoundingPlaces(u32);

impl RoundingPlaces {
    pub const MAX: u32 = 8;

    pub fn new(places: u32) -> Option<Self> {
        (places <= Self::MAX).then_some(Self(places))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for RoundingPlaces {
    fn default() -> Self {
        Self(4)
    }
}

impl TryFrom<u32> for RoundingPlaces {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        RoundingPlaces::new(value).ok_or_else(|| {
            format!(
                "rounding_places must be between 0 and {} (got {value})",
                RoundingPlaces::MAX
            )
        })
    }
}

impl From<RoundingPlaces> for u32 {
    fn from(value: RoundingPlaces) -> Self {
        value.0
    }
}

impl fmt::Display for RoundingPlaces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 퍼센트 입력 칸. 직접 입력한 값이거나 잔량(Bal) 표시.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentSlot {
    Value(Decimal),
    Balance,
}

/// 한 번의 계산 요청. 잔량 표시는 저장 전에 이미 숫자로 해소되어 있다.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureRequest {
    cylinder: CylinderSize,
    entries: Vec<(Component, Decimal)>,
}

impl MixtureRequest {
    /// 성분 수(2~5)만 검증한다. 중복 성분과 백분율 범위는 허용한다.
    pub fn new(
        cylinder: CylinderSize,
        entries: Vec<(Component, Decimal)>,
    ) -> Result<Self, MixtureError> {
        check_count(entries.len())?;
        Ok(Self { cylinder, entries })
    }

    /// 마지막 칸의 `Balance`를 해소하여 요청을 만든다.
    pub fn from_slots(
        cylinder: CylinderSize,
        slots: Vec<(Component, PercentSlot)>,
    ) -> Result<Self, MixtureError> {
        check_count(slots.len())?;
        let last = slots.len() - 1;
        let mut entries: Vec<(Component, Decimal)> = Vec::with_capacity(slots.len());
        for (i, (component, slot)) in slots.into_iter().enumerate() {
            let pct = match slot {
                PercentSlot::Value(v) => v,
                PercentSlot::Balance if i == last => {
                    let previous: Vec<Decimal> = entries.iter().map(|(_, p)| *p).collect();
                    resolve_balance(&previous)?
                }
                PercentSlot::Balance => return Err(MixtureError::BalanceNotLast { slot: i + 1 }),
            };
            entries.push((component, pct));
        }
        Self::new(cylinder, entries)
    }

    pub fn cylinder(&self) -> CylinderSize {
        self.cylinder
    }

    pub fn entries(&self) -> &[(Component, Decimal)] {
        &self.entries
    }

    /// 입력 백분율 합계. 범위를 넘으면 `None`.
    pub fn total_percentage(&self) -> Option<Decimal> {
        self.entries
            .iter()
            .try_fold(Decimal::ZERO, |acc, (_, p)| acc.checked_add(*p))
    }
}

fn check_count(count: usize) -> Result<(), MixtureError> {
    if (MIN_COMPONENTS..=MAX_COMPONENTS).contains(&count) {
        Ok(())
    } else {
        Err(MixtureError::ComponentCount { count })
    }
}

/// 성분별 계산 질량.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentMass {
    pub component: Component,
    pub mass_kg: Decimal,
}

/// 계산 결과. 입력 순서를 유지하며 중복 성분도 각각 남긴다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MixtureResult {
    masses: Vec<ComponentMass>,
}

impl MixtureResult {
    pub fn masses(&self) -> &[ComponentMass] {
        &self.masses
    }

    /// 해당 성분의 마지막 항목 질량 (중복 시 나중 값 우선).
    pub fn mass_of(&self, component: Component) -> Option<Decimal> {
        self.masses
            .iter()
            .rev()
            .find(|m| m.component == component)
            .map(|m| m.mass_kg)
    }
}

/// 고정 소수점 반올림. 동률은 짝수 쪽으로 보내고(은행가 반올림)
/// 표시 자릿수를 `places`로 맞춘다 (예: 1.68 → 1.6800).
pub fn round_to(value: Decimal, places: RoundingPlaces) -> Decimal {
    let dp = places.get();
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(dp);
    rounded
}

/// 잔량 가스 백분율 = 100 − 이전 값들의 합. 음수나 100 초과도 그대로 돌려준다.
pub fn resolve_balance(previous: &[Decimal]) -> Result<Decimal, MixtureError> {
    previous
        .iter()
        .try_fold(dec!(100), |acc, p| acc.checked_sub(*p))
        .ok_or_else(|| MixtureError::Overflow {
            what: "Bal".to_string(),
        })
}

/// 체적 백분율을 질량 [kg]으로 환산한다.
pub fn percent_to_mass(
    component: Component,
    cylinder: CylinderSize,
    percentage: Decimal,
    places: RoundingPlaces,
) -> Result<Decimal, MixtureError> {
    let moles = (percentage / dec!(100)).checked_mul(Decimal::from(cylinder.capacity_moles()));
    let mass = moles.and_then(|n| n.checked_mul(component.molar_mass()));
    mass.map(|m| round_to(m, places))
        .ok_or_else(|| MixtureError::Overflow {
            what: component.to_string(),
        })
}

/// 요청의 모든 성분 질량을 입력 순서대로 계산한다.
pub fn calculate_mixture(
    request: &MixtureRequest,
    places: RoundingPlaces,
) -> Result<MixtureResult, MixtureError> {
    let masses = request
        .entries()
        .iter()
        .map(|&(component, pct)| -> Result<ComponentMass, MixtureError> {
            let mass_kg = percent_to_mass(component, request.cylinder(), pct, places)?;
            tracing::debug!(%component, %pct, %mass_kg, "component mass");
            Ok(ComponentMass { component, mass_kg })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MixtureResult { masses })
}

/// 백분율 합이 정확히 100인지 확인한다. 경고 표시용이며 계산을 막지 않는다.
pub fn check_total(request: &MixtureRequest) -> bool {
    request.total_percentage() == Some(dec!(100))
}
