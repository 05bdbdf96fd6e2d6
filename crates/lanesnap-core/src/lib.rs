//! # lanesnap-core
//!
//! LANESNAP 도메인 모델, 포트(trait) 정의, 스케줄 계산, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`] — 도메인 데이터 구조체 (카메라, 스냅샷, 사이클 결과)
//! - [`ports`] — Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`poller`] — 폴링 엔진 (사이클 실행 + 활동 시간대 루프)
//! - [`schedule`] — 활동 시간대/주기 계산 (순수 함수, I/O 없음)
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 애플리케이션 설정 구조체

pub mod config;
pub mod error;
pub mod models;
pub mod poller;
pub mod ports;
pub mod schedule;
