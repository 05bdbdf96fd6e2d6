//! 오브젝트 스토어 업로더.
//!
//! `ImageSink` 포트 구현. 저장된 이미지 파일을
//! `<endpoint>/<bucket>/[prefix/]<cameraId>/<filename>` 키로 HTTP PUT.
//! 실패는 호출자(사이클)가 로깅 후 흡수한다 — 실행을 중단시키지 않는다.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use lanesnap_core::error::CoreError;
use lanesnap_core::models::camera::Camera;
use lanesnap_core::ports::sink::ImageSink;
use tracing::info;

/// 오브젝트 스토어 업로더 — `ImageSink` 포트 구현
///
/// 경로 방식(path-style) 주소 지정으로 S3 호환 스토어에 업로드한다.
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
    prefix: String,
}

impl HttpObjectStore {
    /// 자체 세션으로 새 업로더 생성
    pub fn new(
        endpoint: &str,
        bucket: &str,
        prefix: &str,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;
        Ok(Self::with_client(client, endpoint, bucket, prefix))
    }

    /// 공유 세션으로 새 업로더 생성
    pub fn with_client(
        client: reqwest::Client,
        endpoint: &str,
        bucket: &str,
        prefix: &str,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            prefix: prefix.trim_matches('/').to_string(),
        }
    }

    /// 오브젝트 키 계산: `[prefix/]<cameraId>/<filename>`
    fn object_key(&self, camera: &Camera, file_name: &str) -> String {
        if self.prefix.is_empty() {
            format!("{}/{}", camera.id, file_name)
        } else {
            format!("{}/{}/{}", self.prefix, camera.id, file_name)
        }
    }
}

#[async_trait]
impl ImageSink for HttpObjectStore {
    async fn publish(&self, file: &Path, camera: &Camera) -> Result<(), CoreError> {
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CoreError::Upload(format!("파일 이름 없는 경로: {}", file.display())))?;

        let key = self.object_key(camera, file_name);
        let url = format!("{}/{}/{}", self.endpoint, self.bucket, key);

        let body = tokio::fs::read(file)
            .await
            .map_err(|e| CoreError::Upload(format!("업로드 대상 읽기 실패: {}: {e}", file.display())))?;

        let resp = self
            .client
            .put(&url)
            .body(body)
            .send()
            .await
            .map_err(|e| CoreError::Upload(format!("업로드 요청 실패: {url}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Upload(format!(
                "업로드 비정상 상태 ({status}): {}/{key}",
                self.bucket
            )));
        }

        info!("업로드 완료: {} → {}/{}", file.display(), self.bucket, key);
        Ok(())
    }
}
