//! 다운로드 후처리 싱크 포트.
//!
//! 구현: `lanesnap-network` crate (오브젝트 스토어 업로드), [`NoopSink`]

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::error::CoreError;
use crate::models::camera::Camera;

/// 저장된 이미지 파일의 후처리 싱크.
///
/// 업로드 구성 여부에 따른 조건 분기를 없애기 위해
/// 미구성 시에도 [`NoopSink`]가 꽂힌다. 싱크 실패는 호출자가
/// 로깅 후 흡수하며 사이클을 실패시키지 않는다.
#[async_trait]
pub trait ImageSink: Send + Sync {
    /// 저장된 파일을 원격 위치로 발행
    async fn publish(&self, file: &Path, camera: &Camera) -> Result<(), CoreError>;
}

/// 아무것도 하지 않는 싱크 — 업로드 미구성 시 기본값
#[derive(Debug, Default)]
pub struct NoopSink;

#[async_trait]
impl ImageSink for NoopSink {
    async fn publish(&self, file: &Path, camera: &Camera) -> Result<(), CoreError> {
        debug!("싱크 미구성, 발행 생략: {} ({})", file.display(), camera.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_sink_always_succeeds() {
        let sink = NoopSink;
        let camera = Camera::new("1703");
        assert!(sink
            .publish(Path::new("/tmp/1703/x.jpg"), &camera)
            .await
            .is_ok());
    }
}
