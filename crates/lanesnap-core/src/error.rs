//! LANESNAP 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 자체 에러를 `CoreError`로 매핑한다.
//! 치명 에러(`Config`)는 루프 시작 전에 프로세스를 종료시키고,
//! 복구 가능한 에러(`Network`/`Protocol`/`Storage`/`Upload`)는
//! 사이클 내부에서 로깅 후 흡수된다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 설정, 프로토콜, 전송, 저장 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정값 오류 (치명 — 루프 시작 전 검증 실패)
    #[error("설정 에러: {0}")]
    Config(String),

    /// 시각 문자열 형식 오류 (HH:MM 형식이 아님)
    #[error("시각 형식 오류: {0}")]
    InvalidTimeFormat(String),

    /// 시각 범위 오류 (시 0-23, 분 0-59 범위 밖, 24:00 제외)
    #[error("시각 범위 초과: {0}")]
    TimeOutOfRange(String),

    /// 메타데이터 응답 형식 오류 (기대한 최상위 컬렉션 누락 등)
    #[error("프로토콜 에러: {0}")]
    Protocol(String),

    /// 네트워크 에러 (연결 실패, 타임아웃, 비정상 상태 코드)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 로컬 파일 저장/조회 실패
    #[error("저장소 에러: {0}")]
    Storage(String),

    /// 원격 오브젝트 스토어 업로드 실패
    #[error("업로드 에러: {0}")]
    Upload(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}
