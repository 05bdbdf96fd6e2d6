//! 카메라 식별 정보.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// 폴링 대상 카메라 한 대의 식별 정보.
///
/// 시작 시 카메라 목록 파일에서 한 번 생성되며 실행 내내 불변.
/// 좌표는 참고용 — 스케줄링 로직에는 쓰이지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// 고유 식별자
    pub id: String,
    /// 위도 (선택)
    pub latitude: Option<f64>,
    /// 경도 (선택)
    pub longitude: Option<f64>,
}

impl Camera {
    /// 좌표 없는 카메라 생성
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            latitude: None,
            longitude: None,
        }
    }
}

/// 카메라 식별자 → [`Camera`] 매핑.
///
/// 시작 시 한 번 구축되고 폴링 중에는 읽기 전용.
/// 사이클마다 O(1) 소속 판정에 사용된다.
#[derive(Debug, Clone, Default)]
pub struct CameraSet {
    cameras: HashMap<String, Camera>,
}

impl CameraSet {
    /// 카메라 목록에서 집합 구축. 중복 식별자는 마지막 항목이 이긴다.
    pub fn from_cameras(cameras: impl IntoIterator<Item = Camera>) -> Self {
        Self {
            cameras: cameras
                .into_iter()
                .map(|c| (c.id.clone(), c))
                .collect(),
        }
    }

    /// 식별자 소속 여부
    pub fn contains(&self, id: &str) -> bool {
        self.cameras.contains_key(id)
    }

    /// 식별자로 카메라 조회
    pub fn get(&self, id: &str) -> Option<&Camera> {
        self.cameras.get(id)
    }

    /// 전체 식별자 집합 (정렬됨 — 로그/결여 집계의 결정성 보장)
    pub fn ids(&self) -> BTreeSet<String> {
        self.cameras.keys().cloned().collect()
    }

    /// 카메라 수
    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    /// 비어 있는지 여부
    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}
