//! 카메라 목록 CSV 로더.
//!
//! `CameraID` 열이 있는 표 형식 입력에서 폴링 대상 카메라를 읽는다.
//! 좌표 열은 선택이며 파싱 실패 시 행은 유지하되 좌표만 버린다.

use std::path::Path;

use lanesnap_core::error::CoreError;
use lanesnap_core::models::camera::Camera;
use tracing::{info, warn};

/// 식별자 열 이름
const ID_COLUMN: &str = "CameraID";
/// 위도 열 이름 (선택)
const LAT_COLUMN: &str = "Latitude";
/// 경도 열 이름 (선택)
const LON_COLUMN: &str = "Longitude";

/// CSV 파일에서 카메라 목록 로드.
///
/// `CameraID` 열이 없거나 사용 가능한 행이 0개면 설정 에러.
/// 필드에 쉼표가 들어가는 인용 구문은 지원하지 않는다 — 카메라
/// 목록은 식별자/좌표만 담는 단순 표이다.
pub fn load_cameras(path: &Path) -> Result<Vec<Camera>, CoreError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        CoreError::Config(format!("카메라 목록 읽기 실패: {}: {e}", path.display()))
    })?;

    let mut lines = raw.lines();
    let header = lines
        .next()
        .ok_or_else(|| CoreError::Config(format!("빈 카메라 목록: {}", path.display())))?;

    let columns: Vec<&str> = header
        .trim_start_matches('\u{feff}') // BOM
        .split(',')
        .map(str::trim)
        .collect();

    let id_idx = columns.iter().position(|c| *c == ID_COLUMN).ok_or_else(|| {
        CoreError::Config(format!(
            "카메라 목록에 '{ID_COLUMN}' 열이 없음: {}",
            path.display()
        ))
    })?;
    let lat_idx = columns.iter().position(|c| *c == LAT_COLUMN);
    let lon_idx = columns.iter().position(|c| *c == LON_COLUMN);

    let mut cameras = Vec::new();
    for line in lines {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let Some(id) = fields.get(id_idx).filter(|id| !id.is_empty()) else {
            continue;
        };

        let latitude = lat_idx.and_then(|i| fields.get(i)).map(|f| parse_coord(f));
        let longitude = lon_idx.and_then(|i| fields.get(i)).map(|f| parse_coord(f));

        // 빈 좌표 칸은 조용히 None. 파싱 불가 값이 하나라도 있으면
        // 그 행의 좌표 쌍 전체를 버린다 — 반쪽짜리 오타 좌표를 믿지 않는다.
        let (latitude, longitude) = match (latitude, longitude) {
            (Some(Err(_)), _) | (_, Some(Err(_))) => {
                warn!("카메라 {id}의 좌표가 비정상 — 좌표 무시");
                (None, None)
            }
            (lat, lon) => (
                lat.and_then(|parsed| parsed.ok().flatten()),
                lon.and_then(|parsed| parsed.ok().flatten()),
            ),
        };

        cameras.push(Camera {
            id: (*id).to_string(),
            latitude,
            longitude,
        });
    }

    if cameras.is_empty() {
        return Err(CoreError::Config(format!(
            "카메라 목록에 사용 가능한 행이 없음: {}",
            path.display()
        )));
    }

    info!("카메라 목록 로드: {}대 ({})", cameras.len(), path.display());
    Ok(cameras)
}

/// 좌표 한 칸 파싱. 빈 칸은 `Ok(None)`, 숫자가 아니면 `Err`.
fn parse_coord(field: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    if field.is_empty() {
        return Ok(None);
    }
    field.parse().map(Some)
}
