//! 폴링 엔진.
//!
//! 활동 시간대 판정 + 드리프트 보정 주기 + 사이클 실행을 묶는
//! 최상위 루프. 모든 I/O는 포트([`crate::ports`])를 통해서만 수행하므로
//! 수동 시계를 꽂으면 실제 대기 없이 다수 사이클을 시뮬레이션할 수 있다.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::models::camera::CameraSet;
use crate::models::cycle::CycleResult;
use crate::models::snapshot::suffix_for_link;
use crate::ports::clock::Clock;
use crate::ports::image::ImageSource;
use crate::ports::metadata::MetadataApi;
use crate::ports::sink::ImageSink;
use crate::ports::store::ImageStore;
use crate::schedule::{next_sleep, window_wait, ActiveWindow};

/// 폴러 런타임 설정
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// 사이클 시작 간격
    pub cadence: Duration,
    /// 전체 실행 기간
    pub run_duration: Duration,
    /// 일일 활동 시간대
    pub window: ActiveWindow,
    /// 활동 시간대 기준 타임존
    pub timezone: Tz,
}

/// 실행 단위 스케줄링 상태.
///
/// 실행 시작 시 한 번 초기화되고 매 사이클 읽힌다.
/// 전역이 아닌 명시적 값으로 루프에 전달된다.
#[derive(Debug, Clone, Copy)]
struct PollState {
    /// 실행 종료 시한 (시작 시각 + 실행 기간)
    deadline: DateTime<Utc>,
}

impl PollState {
    fn new(started_at: DateTime<Utc>, run_duration: Duration) -> Self {
        let deadline = started_at
            + chrono::Duration::from_std(run_duration)
                .unwrap_or_else(|_| chrono::Duration::days(365_000));
        Self { deadline }
    }

    fn expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.deadline
    }

    fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.deadline - now).to_std().unwrap_or(Duration::ZERO)
    }
}

/// 폴링 루프 — 활동 시간대 안에서 주기적으로 사이클을 실행한다.
///
/// 종료 조건: 실행 기간 만료(정상), 협조적 종료 신호(정상),
/// 치명 에러 없음 — 개별 카메라/사이클 실패는 절대 실행을 중단시키지 않는다.
pub struct Poller {
    config: PollerConfig,
    cameras: CameraSet,
    metadata: Arc<dyn MetadataApi>,
    images: Arc<dyn ImageSource>,
    store: Arc<dyn ImageStore>,
    sink: Arc<dyn ImageSink>,
    clock: Arc<dyn Clock>,
}

impl Poller {
    /// 새 폴러 생성
    pub fn new(
        config: PollerConfig,
        cameras: CameraSet,
        metadata: Arc<dyn MetadataApi>,
        images: Arc<dyn ImageSource>,
        store: Arc<dyn ImageStore>,
        sink: Arc<dyn ImageSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            cameras,
            metadata,
            images,
            store,
            sink,
            clock,
        }
    }

    /// 실행 기간이 만료되거나 종료 신호를 받을 때까지 폴링.
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        let state = PollState::new(self.clock.now(), self.config.run_duration);
        info!(
            "폴링 시작: 카메라 {}대, 주기 {:?}, 종료 시한 {}",
            self.cameras.len(),
            self.config.cadence,
            state.deadline,
        );

        loop {
            if *shutdown_rx.borrow() {
                info!("종료 신호 수신, 폴링 중단");
                break;
            }

            let cycle_start = self.clock.now();
            if state.expired(cycle_start) {
                info!("요청한 실행 기간 도달, 폴링 종료");
                break;
            }

            // 타임존 변환은 여기서만 — 시간대 판정 함수는 자정 기준 초만 받는다
            let local = cycle_start.with_timezone(&self.config.timezone);
            let since_midnight = local.num_seconds_from_midnight();

            if !self.config.window.is_active(since_midnight) {
                let until_open = self.config.window.seconds_until_open(since_midnight);
                let Some(wait) = window_wait(until_open, state.remaining(cycle_start)) else {
                    info!("활동 시간대 대기 중 실행 기간 소진, 폴링 종료");
                    break;
                };
                debug!(
                    "현지 시각 {} 활동 시간대 밖, {:?} 대기",
                    local.format("%H:%M:%S"),
                    wait
                );
                if self.sleep_or_shutdown(wait, &mut shutdown_rx).await {
                    break;
                }
                continue;
            }

            let result = self.run_cycle().await;
            if result.has_missing() {
                warn!(
                    "이번 사이클에 {}대 카메라 데이터 없음: {}",
                    result.missing.len(),
                    result.missing_summary()
                );
            }

            // 사이클 작업에 쓴 시간을 빼서 주기 드리프트를 보정
            let elapsed = (self.clock.now() - cycle_start)
                .to_std()
                .unwrap_or(Duration::ZERO);
            let sleep = next_sleep(elapsed, self.config.cadence);
            if !sleep.is_zero() && self.sleep_or_shutdown(sleep, &mut shutdown_rx).await {
                break;
            }
        }
    }

    /// 한 사이클 실행: 메타데이터 조회 → 대상 매칭 → 다운로드 → 발행 → 집계.
    ///
    /// 어떤 실패도 사이클 경계를 넘어 전파되지 않는다.
    pub async fn run_cycle(&self) -> CycleResult {
        let snapshots = match self.metadata.fetch_snapshots().await {
            Ok(snapshots) => snapshots,
            Err(e) => {
                // 이번 사이클만 빈 집합으로 진행 — 재시도는 다음 사이클
                error!("메타데이터 조회 실패, 빈 집합으로 진행: {e}");
                Vec::new()
            }
        };

        // 사이클 일관 스냅샷: 모든 카메라가 같은 캡처 시점을 공유한다
        let captured_at = self.clock.now();
        let mut downloaded = BTreeSet::new();

        for snapshot in &snapshots {
            // 구성된 집합 밖의 카메라는 조용히 무시 — 에러 아님
            let Some(camera) = self.cameras.get(&snapshot.camera_id) else {
                continue;
            };

            let Some(link) = snapshot.usable_image_link() else {
                warn!("카메라 {}의 이미지 링크 없음", camera.id);
                continue;
            };

            let bytes = match self.images.fetch_image(link).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("카메라 {} 이미지 다운로드 실패: {e}", camera.id);
                    continue;
                }
            };

            let suffix = suffix_for_link(link);
            match self.store.save(&camera.id, captured_at, &suffix, bytes).await {
                Ok(path) => {
                    info!("카메라 {} 이미지 저장: {}", camera.id, path.display());
                    downloaded.insert(camera.id.clone());

                    if let Err(e) = self.sink.publish(&path, camera).await {
                        warn!("카메라 {} 발행 실패 (사이클 계속): {e}", camera.id);
                    }
                }
                Err(e) => {
                    warn!("카메라 {} 이미지 저장 실패: {e}", camera.id);
                }
            }
        }

        CycleResult::from_downloaded(downloaded, &self.cameras)
    }

    /// 수면과 종료 신호를 경합. 종료 신호가 이기면 true.
    async fn sleep_or_shutdown(
        &self,
        duration: Duration,
        shutdown_rx: &mut watch::Receiver<bool>,
    ) -> bool {
        tokio::select! {
            _ = self.clock.sleep(duration) => false,
            _ = shutdown_rx.changed() => {
                info!("수면 중 종료 신호 수신");
                true
            }
        }
    }
}
