use std::io::{BufRead, Write};
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::app::AppError;
use crate::mixture::{
    MixtureError, MixtureRequest, MixtureResult, PercentSlot, MAX_COMPONENTS, MIN_COMPONENTS,
};
use crate::reference::{component_symbols, Component, CylinderSize};

/// 잔량 가스 자동 계산을 요청하는 입력 표시.
pub const BALANCE_MARKER: &str = "Bal";

/// 행 단위 입력과 안내 출력을 묶은 콘솔. 테스트에서는 메모리 버퍼를 넣는다.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// 출력 측을 돌려준다.
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, line: &str) -> Result<(), AppError> {
        writeln!(self.output, "{line}")?;
        self.output.flush()?;
        Ok(())
    }

    /// 한 줄을 읽어 줄바꿈만 떼어낸다. 입력이 끝나면 `InputClosed`.
    pub fn read_line(&mut self) -> Result<String, AppError> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(AppError::InputClosed);
        }
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(buf)
    }

    /// `parse`가 값을 돌려줄 때까지 다시 묻는다. `Err`에 담긴 문구가 재입력 안내다.
    pub fn prompt_until<T, F>(&mut self, mut parse: F) -> Result<T, AppError>
    where
        F: FnMut(&str) -> Result<T, String>,
    {
        loop {
            let line = self.read_line()?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(retry) => {
                    tracing::debug!(input = %line, "rejected input");
                    self.say(&retry)?;
                }
            }
        }
    }
}

/// 실린더 규격을 입력받는다. 대소문자까지 정확히 일치해야 한다.
pub fn collect_cylinder_size<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<CylinderSize, AppError> {
    console.say("Enter the cylinder size (H, J, S):")?;
    console.prompt_until(|line| {
        line.parse::<CylinderSize>()
            .map_err(|_| "The cylinder size must be either H, J or S - try again:".to_string())
    })
}

/// 성분 개수를 입력받는다 (2~5).
pub fn collect_component_count<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<usize, AppError> {
    console.say(&format!(
        "Enter the # of components ({MIN_COMPONENTS}-{MAX_COMPONENTS}): "
    ))?;
    console.prompt_until(parse_component_count)
}

fn parse_component_count(line: &str) -> Result<usize, String> {
    let n: i64 = line.trim().parse().map_err(|_| {
        format!(
            "The # of components must be a number between {MIN_COMPONENTS} and {MAX_COMPONENTS} - try again:"
        )
    })?;
    usize::try_from(n)
        .ok()
        .filter(|n| (MIN_COMPONENTS..=MAX_COMPONENTS).contains(n))
        .ok_or_else(|| {
            format!(
                "The # of components must be between {MIN_COMPONENTS} and {MAX_COMPONENTS} - try again:"
            )
        })
}

/// 10진수 백분율을 해석한다. `1e1` 같은 지수 표기도 허용한다.
pub fn parse_percentage(token: &str) -> Option<Decimal> {
    let token = token.trim();
    Decimal::from_str(token)
        .or_else(|_| Decimal::from_scientific(token))
        .ok()
}

/// 백분율 칸 하나를 해석한다. `Bal`은 마지막 칸에서만 받는다.
pub fn parse_percent_slot(token: &str, is_last: bool) -> Result<PercentSlot, String> {
    if token == BALANCE_MARKER {
        return if is_last {
            Ok(PercentSlot::Balance)
        } else {
            Err("You can only use the Bal calculation feature for the last component. Enter a numeric value or start over:".to_string())
        };
    }
    parse_percentage(token)
        .map(PercentSlot::Value)
        .ok_or_else(|| {
            "The component percentage must be a number (e.g. 10, 10.0) - try again:".to_string()
        })
}

/// 성분과 백분율을 순서대로 입력받아 요청을 만든다.
pub fn collect_components_and_percentages<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    cylinder: CylinderSize,
    count: usize,
) -> Result<MixtureRequest, AppError> {
    let mut slots: Vec<(Component, PercentSlot)> = Vec::with_capacity(count);
    for i in 0..count {
        let is_last = i + 1 == count;
        console.say(&format!(
            "Enter component #{} gas type (must be one of the following {}):",
            i + 1,
            component_symbols(", ")
        ))?;
        let component = console.prompt_until(parse_component)?;

        if is_last {
            console.say(&format!(
                "Enter the percentage of {component} in the mix. You can also type {BALANCE_MARKER} (balance gas) for auto-calculation of the %:"
            ))?;
        } else {
            console.say(&format!(
                "Enter the percentage of {component} in the mix (e.g. 3.5):"
            ))?;
        }
        let slot = console.prompt_until(|line| parse_percent_slot(line, is_last))?;
        slots.push((component, slot));
    }
    let request = MixtureRequest::from_slots(cylinder, slots)?;
    Ok(request)
}

fn parse_component(line: &str) -> Result<Component, String> {
    line.parse::<Component>().map_err(|_| {
        let quoted = Component::ALL
            .iter()
            .map(|c| format!("'{c}'"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("The component must be one of these ({quoted}) - try again:")
    })
}

/// 총합이 100이 아닐 때 보여주는 안내.
pub fn warn_total<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<(), AppError> {
    console.say("NOTE: The component %'s you entered do not sum to 100")
}

/// 계산 실패(수치 범위 초과 등)를 알리고 다음 입력으로 넘어간다.
pub fn report_failure<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    err: &MixtureError,
) -> Result<(), AppError> {
    console.say(&format!("Could not calculate this mix: {err} - start over:"))
}

/// 결과 표를 출력한다.
pub fn present<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    result: &MixtureResult,
) -> Result<(), AppError> {
    console.say("\n")?;
    console.say("--------------- RESULTS ---------------")?;
    for m in result.masses() {
        console.say(&format!(
            " {}                             {} kg",
            m.component, m.mass_kg
        ))?;
    }
    console.say("\n")
}
