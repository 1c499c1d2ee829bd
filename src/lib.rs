//! 혼합 가스 충전량 계산 로직을 라이브러리로 분리하여 CLI와 테스트가 함께 쓴다.

pub mod app;
pub mod config;
pub mod mixture;
pub mod reference;
pub mod ui_cli;
