//! 이미지 다운로드 클라이언트.
//!
//! `ImageSource` 포트 구현. 응답 본문 전체를 한 번에 획득한다.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use lanesnap_core::error::CoreError;
use lanesnap_core::ports::image::ImageSource;
use tracing::debug;

/// HTTP 이미지 다운로더 — `ImageSource` 포트 구현
pub struct HttpImageSource {
    client: reqwest::Client,
}

impl HttpImageSource {
    /// 자체 세션으로 새 다운로더 생성
    pub fn new(timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;
        Ok(Self::with_client(client))
    }

    /// 공유 세션으로 새 다운로더 생성
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch_image(&self, url: &str) -> Result<Bytes, CoreError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("이미지 요청 실패: {url}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Network(format!(
                "이미지 다운로드 비정상 상태 ({status}): {url}"
            )));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| CoreError::Network(format!("이미지 본문 수신 실패: {url}: {e}")))?;

        debug!("이미지 수신: {url} ({} bytes)", bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_image_returns_bytes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/cam/1703.jpg")
            .with_status(200)
            .with_header("content-type", "image/jpeg")
            .with_body(&[0xFF, 0xD8, 0xFF, 0xE0][..])
            .create_async()
            .await;

        let source = HttpImageSource::new(Duration::from_secs(5)).unwrap();
        let url = format!("{}/cam/1703.jpg", server.url());
        let bytes = source.fetch_image(&url).await.unwrap();
        assert_eq!(bytes.as_ref(), &[0xFF, 0xD8, 0xFF, 0xE0]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn not_found_is_network_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/cam/missing.jpg")
            .with_status(404)
            .create_async()
            .await;

        let source = HttpImageSource::new(Duration::from_secs(5)).unwrap();
        let url = format!("{}/cam/missing.jpg", server.url());
        let err = source.fetch_image(&url).await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }
}
