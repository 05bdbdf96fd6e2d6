//! 애플리케이션 설정 구조체.
//!
//! API 자격증명, 폴링 주기/기간, 활동 시간대, 저장 경로,
//! 오브젝트 스토어 업로드 대상을 정의한다.
//! CLI 인자에서 조립되거나 JSON 파일에서 로드된다 (serde_json).

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::schedule::{parse_time_of_day, ActiveWindow};

/// 기본 메타데이터 엔드포인트 (LTA Traffic Images v2)
pub const DEFAULT_METADATA_ENDPOINT: &str =
    "https://datamall2.mytransport.sg/ltaodataservice/Traffic-Imagesv2";

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 메타데이터 API 설정
    #[serde(default)]
    pub api: ApiConfig,
    /// 폴링 주기/기간 설정
    #[serde(default)]
    pub poll: PollConfig,
    /// 일일 활동 시간대 설정
    #[serde(default)]
    pub window: WindowConfig,
    /// 로컬 저장소 설정
    #[serde(default)]
    pub storage: StorageConfig,
    /// 오브젝트 스토어 업로드 설정 (선택)
    #[serde(default)]
    pub upload: UploadConfig,
}

/// 메타데이터 API 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// 메타데이터 엔드포인트 URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// 계정 키 — 불투명 자격증명으로 헤더에 그대로 전달된다
    #[serde(default)]
    pub account_key: String,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// 폴링 주기/기간 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// 사이클 시작 간격 (분)
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: f64,
    /// 전체 실행 기간 (일)
    #[serde(default = "default_duration_days")]
    pub duration_days: f64,
}

/// 일일 활동 시간대 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 활동 시작 시각 (HH:MM)
    #[serde(default = "default_active_start")]
    pub active_start: String,
    /// 활동 종료 시각 (HH:MM, 배타적, 24:00 = 하루의 끝)
    #[serde(default = "default_active_end")]
    pub active_end: String,
    /// 활동 시간대 기준 타임존 (IANA 이름)
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// 로컬 저장소 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 이미지 출력 루트 디렉토리
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// 오브젝트 스토어 업로드 설정.
/// endpoint와 bucket이 모두 있어야 활성화된다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadConfig {
    /// 오브젝트 스토어 엔드포인트 URL
    #[serde(default)]
    pub endpoint: Option<String>,
    /// 버킷 이름
    #[serde(default)]
    pub bucket: Option<String>,
    /// 오브젝트 키 접두사 (선택)
    #[serde(default)]
    pub prefix: String,
}

fn default_endpoint() -> String {
    DEFAULT_METADATA_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_interval_minutes() -> f64 {
    5.0
}

fn default_duration_days() -> f64 {
    7.0
}

fn default_active_start() -> String {
    "05:00".to_string()
}

fn default_active_end() -> String {
    "24:00".to_string()
}

fn default_timezone() -> String {
    "Asia/Singapore".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/lta_images")
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            account_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
            duration_days: default_duration_days(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            active_start: default_active_start(),
            active_end: default_active_end(),
            timezone: default_timezone(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl AppConfig {
    /// JSON 파일에서 설정 로드
    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("설정 파일 읽기 실패: {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// 설정 전체 검증 — 네트워크 활동 전에 치명 오류를 잡는다.
    ///
    /// 자격증명 누락, 비양수 주기/기간, 활동 시간대 시작==끝,
    /// 타임존 이름 오류, 업로드 endpoint/bucket 불일치를 거부.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.api.account_key.trim().is_empty() {
            return Err(CoreError::Config(
                "API 계정 키가 비어 있음 (--account-key 또는 LTA_API_KEY)".to_string(),
            ));
        }
        if self.poll.interval_minutes <= 0.0 {
            return Err(CoreError::Config(format!(
                "폴링 간격은 양수여야 함: {}",
                self.poll.interval_minutes
            )));
        }
        if self.poll.duration_days <= 0.0 {
            return Err(CoreError::Config(format!(
                "실행 기간은 양수여야 함: {}",
                self.poll.duration_days
            )));
        }
        self.active_window()?;
        self.timezone()?;
        self.upload.validate()?;
        Ok(())
    }

    /// 사이클 주기
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.poll.interval_minutes * 60.0)
    }

    /// 전체 실행 기간
    pub fn run_duration(&self) -> Duration {
        Duration::from_secs_f64(self.poll.duration_days * 86_400.0)
    }

    /// 활동 시간대 경계 파싱 + 검증
    pub fn active_window(&self) -> Result<ActiveWindow, CoreError> {
        let start = parse_time_of_day(&self.window.active_start)?;
        let end = parse_time_of_day(&self.window.active_end)?;
        ActiveWindow::new(start, end)
    }

    /// 활동 시간대 기준 타임존
    pub fn timezone(&self) -> Result<Tz, CoreError> {
        self.window
            .timezone
            .parse()
            .map_err(|_| CoreError::Config(format!("알 수 없는 타임존: {}", self.window.timezone)))
    }
}

impl UploadConfig {
    /// endpoint/bucket 쌍 일관성 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        match (&self.endpoint, &self.bucket) {
            (Some(_), None) => Err(CoreError::Config(
                "업로드 endpoint가 지정되었지만 bucket이 없음".to_string(),
            )),
            (None, Some(_)) => Err(CoreError::Config(
                "업로드 bucket이 지정되었지만 endpoint가 없음".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// 업로드 활성화 여부
    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some() && self.bucket.is_some()
    }
}
