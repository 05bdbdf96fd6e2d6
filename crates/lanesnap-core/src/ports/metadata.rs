//! 메타데이터 API 포트.
//!
//! 구현: `lanesnap-network` crate (reqwest)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::snapshot::CameraSnapshot;

/// 원격 카메라 메타데이터 조회.
///
/// 한 사이클당 한 번 호출된다. 전송/프로토콜 실패는 에러로 반환하고,
/// 사이클 경계에서의 흡수(빈 집합 대체)는 호출자 책임이다.
#[async_trait]
pub trait MetadataApi: Send + Sync {
    /// 현재 전체 카메라 스냅샷 목록 조회
    async fn fetch_snapshots(&self) -> Result<Vec<CameraSnapshot>, CoreError>;
}
