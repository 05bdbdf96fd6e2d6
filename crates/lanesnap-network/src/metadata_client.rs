//! 메타데이터 API 클라이언트.
//!
//! `MetadataApi` 포트 구현. 계정 키 헤더 주입 + 응답 형식 검증.

use std::time::Duration;

use async_trait::async_trait;
use lanesnap_core::error::CoreError;
use lanesnap_core::models::snapshot::CameraSnapshot;
use lanesnap_core::ports::metadata::MetadataApi;
use tracing::debug;

/// 계정 키 헤더 이름
const ACCOUNT_KEY_HEADER: &str = "AccountKey";

/// 메타데이터 API 클라이언트 — `MetadataApi` 포트 구현
///
/// 실행 전체에 걸쳐 하나의 reqwest 세션을 재사용한다.
pub struct LtaMetadataClient {
    client: reqwest::Client,
    endpoint: String,
    account_key: String,
}

impl LtaMetadataClient {
    /// 자체 세션으로 새 클라이언트 생성
    pub fn new(endpoint: &str, account_key: &str, timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;
        Ok(Self::with_client(client, endpoint, account_key))
    }

    /// 공유 세션으로 새 클라이언트 생성 — 어댑터 간 연결 풀 공유용
    pub fn with_client(client: reqwest::Client, endpoint: &str, account_key: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            account_key: account_key.to_string(),
        }
    }
}

#[async_trait]
impl MetadataApi for LtaMetadataClient {
    async fn fetch_snapshots(&self) -> Result<Vec<CameraSnapshot>, CoreError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .header(ACCOUNT_KEY_HEADER, &self.account_key)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("메타데이터 요청 실패: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(CoreError::Network(format!(
                "메타데이터 API 비정상 상태 ({status}): {text}"
            )));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| CoreError::Protocol(format!("메타데이터 JSON 파싱 실패: {e}")))?;

        // 기대하는 최상위 컬렉션이 없으면 프로토콜 에러
        let value = body
            .get("value")
            .ok_or_else(|| CoreError::Protocol("응답에 'value' 필드 없음".to_string()))?;

        let snapshots: Vec<CameraSnapshot> = serde_json::from_value(value.clone())
            .map_err(|e| CoreError::Protocol(format!("스냅샷 레코드 형식 오류: {e}")))?;

        debug!("메타데이터 조회 완료: {}개 스냅샷", snapshots.len());
        Ok(snapshots)
    }
}
