//! 이미지 파일 저장소.
//!
//! `ImageStore` 포트 구현. 카메라별 디렉토리에
//! `<root>/<cameraId>/<timestamp><ext>` 구조로 저장한다.
//! 타임스탬프는 정렬 가능하고 충돌 없는 토큰(`%Y%m%dT%H%M%SZ`)으로
//! 포맷되며, 한 사이클의 모든 카메라가 같은 값을 공유한다.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use lanesnap_core::error::CoreError;
use lanesnap_core::ports::store::ImageStore;
use tokio::fs;
use tracing::debug;

/// 타임스탬프 포맷 — 사전순 정렬이 시간순 정렬과 일치
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// 이미지 파일 저장소 — `ImageStore` 포트 구현
pub struct ImageFileStorage {
    /// 출력 루트 디렉토리
    base_dir: PathBuf,
}

impl ImageFileStorage {
    /// 새 저장소 생성. 루트 디렉토리 생성은 저장 시점으로 미룬다.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// 출력 루트 경로
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

#[async_trait]
impl ImageStore for ImageFileStorage {
    async fn save(
        &self,
        camera_id: &str,
        captured_at: DateTime<Utc>,
        suffix: &str,
        bytes: Bytes,
    ) -> Result<PathBuf, CoreError> {
        let camera_dir = self.base_dir.join(camera_id);
        fs::create_dir_all(&camera_dir).await.map_err(|e| {
            CoreError::Storage(format!(
                "카메라 디렉토리 생성 실패: {}: {e}",
                camera_dir.display()
            ))
        })?;

        let file_name = format!("{}{suffix}", captured_at.format(TIMESTAMP_FORMAT));
        let destination = camera_dir.join(file_name);

        fs::write(&destination, &bytes).await.map_err(|e| {
            CoreError::Storage(format!(
                "이미지 쓰기 실패: {}: {e}",
                destination.display()
            ))
        })?;

        debug!(
            "이미지 저장: {} ({} bytes)",
            destination.display(),
            bytes.len()
        );
        Ok(destination)
    }
}
