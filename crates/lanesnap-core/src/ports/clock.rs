//! 시계/수면 포트.
//!
//! 스케줄러가 벽시계와 수면을 이 포트로만 접근하게 하여
//! 실제 대기 없이 다수 사이클을 시뮬레이션하는 테스트를 가능하게 한다.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 벽시계 조회 + 지정 시간 수면
#[async_trait]
pub trait Clock: Send + Sync {
    /// 현재 UTC 시각
    fn now(&self) -> DateTime<Utc>;

    /// 지정 시간 동안 수면
    async fn sleep(&self, duration: Duration);
}

/// 실제 시스템 시계 — 운영 기본 구현
#[derive(Debug, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
