//! 대화형 입력 흐름 회귀 테스트. 표준 입력 대신 메모리 버퍼를 사용한다.
use gas_mix_calculator::app::{self, AppError};
use gas_mix_calculator::config::Config;
use gas_mix_calculator::mixture::RoundingPlaces;
use gas_mix_calculator::reference::{Component, CylinderSize};
use gas_mix_calculator::ui_cli::{self, Console};
use rust_decimal_macros::dec;

fn console(input: &str) -> Console<&[u8], Vec<u8>> {
    Console::new(input.as_bytes(), Vec::new())
}

fn output(console: Console<&[u8], Vec<u8>>) -> String {
    String::from_utf8(console.into_output()).expect("utf8 output")
}

#[test]
fn air_like_mix_in_h_cylinder() {
    let mut c = console("H\n2\nO2\n21\nN2\nBal\n");
    let result = app::run_once(&mut c, &Config::default())
        .expect("session")
        .expect("result");
    assert_eq!(result.mass_of(Component::O2), Some(dec!(1.6800)));
    assert_eq!(result.mass_of(Component::N2), Some(dec!(5.5326)));

    let out = output(c);
    assert!(out.contains("--------------- RESULTS ---------------"));
    assert!(out.contains(" O2                             1.6800 kg\n"));
    assert!(out.contains(" N2                             5.5326 kg\n"));
    assert!(!out.contains("do not sum to 100"));
}

#[test]
fn results_block_is_framed_by_blank_lines() {
    let mut c = console("S\n2\nHe\n50\nAr\nBal\n");
    app::run_once(&mut c, &Config::default()).expect("session");
    let out = output(c);
    let block = out
        .split("\n\n\n--------------- RESULTS ---------------\n")
        .nth(1)
        .expect("results header preceded by blank lines");
    let lines: Vec<&str> = block.lines().collect();
    // He: 0.5 * 80 * 0.0040026 = 0.16010, Ar: 0.5 * 80 * 0.039948 = 1.59792
    assert_eq!(lines[0], " He                             0.1601 kg");
    assert_eq!(lines[1], " Ar                             1.5979 kg");
    assert!(block.ends_with("kg\n\n\n"));
}

#[test]
fn balance_on_first_slot_reprompts_same_slot() {
    let mut c = console("H\n2\nO2\nBal\n21\nN2\nBal\n");
    let result = app::run_once(&mut c, &Config::default())
        .expect("session")
        .expect("result");
    assert_eq!(result.masses().len(), 2);
    assert_eq!(result.mass_of(Component::N2), Some(dec!(5.5326)));
    let out = output(c);
    assert_eq!(
        out.matches("You can only use the Bal calculation feature")
            .count(),
        1
    );
}

#[test]
fn unknown_component_keeps_accepted_slots() {
    let mut c = Console::new("CH4\n30\nXX\nCO2\n20\nH2\nBal\n".as_bytes(), Vec::new());
    let request = ui_cli::collect_components_and_percentages(&mut c, CylinderSize::J, 3)
        .expect("request");
    assert_eq!(
        request.entries(),
        &[
            (Component::CH4, dec!(30)),
            (Component::CO2, dec!(20)),
            (Component::H2, dec!(50)),
        ]
    );
    let out = output(c);
    assert!(out.contains("The component must be one of these"));
    assert!(out.contains("Enter component #2 gas type"));
}

#[test]
fn invalid_cylinder_and_count_are_retried() {
    let mut c = console("h\nX\nJ\nabc\n7\n3\n");
    let size = ui_cli::collect_cylinder_size(&mut c).expect("size");
    let count = ui_cli::collect_component_count(&mut c).expect("count");
    assert_eq!(size, CylinderSize::J);
    assert_eq!(count, 3);
    let out = output(c);
    assert_eq!(
        out.matches("The cylinder size must be either H, J or S - try again:")
            .count(),
        2
    );
    assert!(out.contains("must be a number between 2 and 5"));
    assert!(out.contains("The # of components must be between 2 and 5"));
}

#[test]
fn non_numeric_percentage_is_retried() {
    let mut c = console("O2\nlots\n40\nN2\n60\n");
    let request = ui_cli::collect_components_and_percentages(&mut c, CylinderSize::H, 2)
        .expect("request");
    assert_eq!(request.entries()[0], (Component::O2, dec!(40)));
    assert!(output(c).contains("must be a number (e.g. 10, 10.0)"));
}

#[test]
fn total_mismatch_warns_but_still_calculates() {
    let mut c = console("J\n2\nCO2\n60\nCH4\n60\n");
    let result = app::run_once(&mut c, &Config::default())
        .expect("session")
        .expect("result");
    assert_eq!(result.masses().len(), 2);
    let out = output(c);
    assert!(out.contains("NOTE: The component %'s you entered do not sum to 100"));
    assert!(out.contains("RESULTS"));
}

#[test]
fn duplicate_components_get_separate_lines() {
    let mut c = console("H\n3\nAr\n10\nAr\n10\nN2\nBal\n");
    let result = app::run_once(&mut c, &Config::default())
        .expect("session")
        .expect("result");
    assert_eq!(result.masses().len(), 3);
    assert_eq!(
        output(c)
            .matches(" Ar                             ")
            .count(),
        2
    );
}

#[test]
fn configured_places_apply_to_output() {
    let cfg = Config {
        rounding_places: RoundingPlaces::new(2).expect("places"),
    };
    let mut c = console("H\n2\nO2\n21\nN2\nBal\n");
    app::run_once(&mut c, &cfg).expect("session");
    let out = output(c);
    assert!(out.contains(" O2                             1.68 kg\n"));
    assert!(out.contains(" N2                             5.53 kg\n"));
}

#[test]
fn loop_repeats_until_input_ends() {
    let mut c = console("H\n2\nO2\n21\nN2\nBal\nS\n2\nHe\n50\nAr\nBal\n");
    let err = app::run(&mut c, &Config::default()).unwrap_err();
    assert!(matches!(err, AppError::InputClosed));
    let out = output(c);
    assert_eq!(out.matches("--------------- RESULTS ---------------").count(), 2);
    assert_eq!(out.matches("Enter the cylinder size (H, J, S):").count(), 3);
}

#[test]
fn oversized_percentage_is_reported_and_loop_continues() {
    let mut c = console("J\n2\nAr\n79228162514264337593543950335\nN2\n1\nS\n2\nHe\n50\nAr\nBal\n");
    let first = app::run_once(&mut c, &Config::default()).expect("session");
    assert!(first.is_none());
    let second = app::run_once(&mut c, &Config::default()).expect("session");
    assert!(second.is_some());
    assert!(output(c).contains("Could not calculate this mix"));
}

#[test]
fn balance_overflow_is_reported_and_loop_continues() {
    let mut c = console("H\n2\nO2\n-79228162514264337593543950335\nN2\nBal\nS\n2\nHe\n50\nAr\nBal\n");
    let err = app::run(&mut c, &Config::default()).unwrap_err();
    assert!(matches!(err, AppError::InputClosed));
    let out = output(c);
    assert!(out.contains("Could not calculate this mix"));
    assert!(out.contains(" He                             0.1601 kg\n"));
}
