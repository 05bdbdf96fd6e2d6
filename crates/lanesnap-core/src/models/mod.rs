//! 도메인 데이터 구조체.
//!
//! 카메라 식별 정보, 메타데이터 스냅샷, 사이클 결과.
//! 전부 불변 값 타입 — 폴링 중 변이되는 상태는 스케줄러가 소유한다.

pub mod camera;
pub mod cycle;
pub mod snapshot;
