//! # lanesnap-app
//!
//! LANESNAP 폴러 바이너리 진입점.
//! CLI 인자 → 설정 조립/검증, 어댑터 와이어링, 폴링 루프 실행.

mod lifecycle;

use anyhow::{Context, Result};
use clap::Parser;
use lanesnap_core::config::AppConfig;
use lanesnap_core::models::camera::CameraSet;
use lanesnap_core::poller::{Poller, PollerConfig};
use lanesnap_core::ports::clock::SystemClock;
use lanesnap_core::ports::sink::{ImageSink, NoopSink};
use lanesnap_network::image_client::HttpImageSource;
use lanesnap_network::metadata_client::LtaMetadataClient;
use lanesnap_network::object_store::HttpObjectStore;
use lanesnap_storage::camera_list::load_cameras;
use lanesnap_storage::image_store::ImageFileStorage;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::lifecycle::LifecycleManager;

/// LANESNAP 트래픽 카메라 이미지 폴러
///
/// 메타데이터 API를 주기적으로 폴링하여 구성된 카메라들의 이미지를
/// 내려받고, 선택적으로 오브젝트 스토어에 동기화한다.
#[derive(Parser, Debug)]
#[command(name = "lanesnap")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON 설정 파일 경로 (CLI 인자가 파일 값을 덮어쓴다)
    #[arg(long)]
    config: Option<PathBuf>,

    /// API 계정 키 (기본: LTA_API_KEY 환경변수)
    #[arg(long, env = "LTA_API_KEY")]
    account_key: Option<String>,

    /// 메타데이터 엔드포인트 URL 덮어쓰기
    #[arg(long)]
    endpoint: Option<String>,

    /// 카메라 목록 CSV 경로
    #[arg(long, default_value = "reference/camera_info.csv")]
    camera_csv: PathBuf,

    /// 이미지 출력 루트 디렉토리
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// 폴링 간격 (분)
    #[arg(long)]
    interval_minutes: Option<f64>,

    /// 전체 실행 기간 (일)
    #[arg(long)]
    duration_days: Option<f64>,

    /// 일일 활동 시작 시각 (HH:MM)
    #[arg(long)]
    active_start: Option<String>,

    /// 일일 활동 종료 시각 (HH:MM, 배타적, 24:00 = 하루의 끝)
    #[arg(long)]
    active_end: Option<String>,

    /// 활동 시간대 기준 타임존 (IANA 이름)
    #[arg(long)]
    timezone: Option<String>,

    /// 오브젝트 스토어 엔드포인트 URL (지정 시 업로드 활성화)
    #[arg(long)]
    store_endpoint: Option<String>,

    /// 오브젝트 스토어 버킷 이름
    #[arg(long)]
    store_bucket: Option<String>,

    /// 오브젝트 키 접두사
    #[arg(long)]
    store_prefix: Option<String>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

impl Args {
    /// 설정 파일(있으면)을 기반으로 CLI 덮어쓰기를 적용해 설정 조립
    fn build_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)
                .with_context(|| format!("설정 파일 로드 실패: {}", path.display()))?,
            None => AppConfig::default(),
        };

        if let Some(key) = &self.account_key {
            config.api.account_key = key.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.api.endpoint = endpoint.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.storage.output_dir = dir.clone();
        }
        if let Some(interval) = self.interval_minutes {
            config.poll.interval_minutes = interval;
        }
        if let Some(duration) = self.duration_days {
            config.poll.duration_days = duration;
        }
        if let Some(start) = &self.active_start {
            config.window.active_start = start.clone();
        }
        if let Some(end) = &self.active_end {
            config.window.active_end = end.clone();
        }
        if let Some(tz) = &self.timezone {
            config.window.timezone = tz.clone();
        }
        if let Some(endpoint) = &self.store_endpoint {
            config.upload.endpoint = Some(endpoint.clone());
        }
        if let Some(bucket) = &self.store_bucket {
            config.upload.bucket = Some(bucket.clone());
        }
        if let Some(prefix) = &self.store_prefix {
            config.upload.prefix = prefix.clone();
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "lanesnap={0},lanesnap_app={0},lanesnap_core={0},lanesnap_network={0},lanesnap_storage={0}",
        args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    // 설정 조립 + 치명 오류 선검증 — 네트워크 활동 전에 실패한다
    let config = args.build_config()?;
    config.validate().context("설정 검증 실패")?;

    let timeout = Duration::from_secs(config.api.timeout_secs);
    let window = config.active_window().context("활동 시간대 파싱 실패")?;
    let timezone = config.timezone().context("타임존 파싱 실패")?;

    let cameras = load_cameras(&args.camera_csv).context("카메라 목록 로드 실패")?;
    let camera_set = CameraSet::from_cameras(cameras);

    info!(
        "LANESNAP 시작: 카메라 {}대, 간격 {}분, 기간 {}일, 활동 {}-{} ({})",
        camera_set.len(),
        config.poll.interval_minutes,
        config.poll.duration_days,
        config.window.active_start,
        config.window.active_end,
        config.window.timezone,
    );

    // 실행 전체가 공유하는 단일 HTTP 세션
    let http = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("HTTP 클라이언트 빌드 실패")?;

    let metadata = Arc::new(LtaMetadataClient::with_client(
        http.clone(),
        &config.api.endpoint,
        &config.api.account_key,
    ));
    let images = Arc::new(HttpImageSource::with_client(http.clone()));
    let store = Arc::new(ImageFileStorage::new(config.storage.output_dir.clone()));

    let sink: Arc<dyn ImageSink> = if config.upload.is_enabled() {
        // validate()가 endpoint/bucket 쌍을 보장한다
        let endpoint = config.upload.endpoint.as_deref().unwrap_or_default();
        let bucket = config.upload.bucket.as_deref().unwrap_or_default();
        info!("오브젝트 스토어 업로드 활성화: {}/{}", endpoint, bucket);
        Arc::new(HttpObjectStore::with_client(
            http,
            endpoint,
            bucket,
            &config.upload.prefix,
        ))
    } else {
        Arc::new(NoopSink)
    };

    let poller = Poller::new(
        PollerConfig {
            cadence: config.interval(),
            run_duration: config.run_duration(),
            window,
            timezone,
        },
        camera_set,
        metadata,
        images,
        store,
        sink,
        Arc::new(SystemClock),
    );

    let lifecycle = Arc::new(LifecycleManager::new());
    let shutdown_rx = lifecycle.subscribe();

    // OS 시그널 → 종료 신호 변환 태스크
    let signal_lifecycle = lifecycle.clone();
    tokio::spawn(async move {
        signal_lifecycle.wait_for_signal().await;
    });

    poller.run(shutdown_rx).await;

    info!("LANESNAP 종료");
    Ok(())
}
