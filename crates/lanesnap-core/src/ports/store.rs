//! 이미지 파일 저장 포트.
//!
//! 구현: `lanesnap-storage` crate (tokio::fs)

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::error::CoreError;

/// 다운로드한 이미지 바이트의 로컬 영속화.
///
/// 경로 정책은 구현이 소유한다:
/// `<root>/<cameraId>/<timestamp><ext>`, 타임스탬프는 사이클 단위로
/// 공유되는 한 시점이며 정렬 가능한 토큰으로 포맷된다.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// 이미지 저장 후 최종 경로 반환. 디렉토리는 필요 시 생성.
    async fn save(
        &self,
        camera_id: &str,
        captured_at: DateTime<Utc>,
        suffix: &str,
        bytes: Bytes,
    ) -> Result<PathBuf, CoreError>;
}
