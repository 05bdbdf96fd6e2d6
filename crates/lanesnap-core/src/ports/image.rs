//! 이미지 다운로드 포트.
//!
//! 구현: `lanesnap-network` crate (reqwest)

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::CoreError;

/// 이미지 URL → 바이트 전송.
///
/// 응답 본문 전체를 한 번에 획득한다 — 스트리밍/부분 쓰기 상태 없음.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// 주어진 URL의 바이너리 내용 조회
    async fn fetch_image(&self, url: &str) -> Result<Bytes, CoreError>;
}
