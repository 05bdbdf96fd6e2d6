//! 사이클 결과 집계.

use std::collections::BTreeSet;

use super::camera::CameraSet;

/// 한 폴링 사이클의 결과.
///
/// 사이클마다 새로 계산되고 로깅 후 폐기된다.
/// 정렬 집합(BTreeSet)으로 결여 카메라 로그의 결정성을 보장한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleResult {
    /// 이번 사이클에 다운로드 성공한 카메라 식별자
    pub downloaded: BTreeSet<String>,
    /// 카메라 집합에 속하지만 이번 사이클에 받지 못한 식별자
    pub missing: BTreeSet<String>,
}

impl CycleResult {
    /// 다운로드 성공 집합과 전체 카메라 집합에서 결과 계산.
    /// `missing = set.ids() - downloaded`.
    pub fn from_downloaded(downloaded: BTreeSet<String>, set: &CameraSet) -> Self {
        let missing = set
            .ids()
            .into_iter()
            .filter(|id| !downloaded.contains(id))
            .collect();
        Self {
            downloaded,
            missing,
        }
    }

    /// 결여 카메라 존재 여부
    pub fn has_missing(&self) -> bool {
        !self.missing.is_empty()
    }

    /// 결여 식별자를 로그용 문자열로 결합 (정렬 순서)
    pub fn missing_summary(&self) -> String {
        self.missing
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::camera::Camera;

    fn abc_set() -> CameraSet {
        CameraSet::from_cameras([Camera::new("A"), Camera::new("B"), Camera::new("C")])
    }

    #[test]
    fn missing_is_complement_of_downloaded() {
        let downloaded: BTreeSet<_> = ["A".to_string(), "C".to_string()].into();
        let result = CycleResult::from_downloaded(downloaded, &abc_set());
        assert_eq!(
            result.downloaded,
            ["A".to_string(), "C".to_string()].into()
        );
        assert_eq!(result.missing, ["B".to_string()].into());
        assert!(result.has_missing());
    }

    #[test]
    fn empty_download_marks_all_missing() {
        let result = CycleResult::from_downloaded(BTreeSet::new(), &abc_set());
        assert_eq!(result.missing.len(), 3);
        assert_eq!(result.missing_summary(), "A, B, C");
    }

    #[test]
    fn full_download_has_no_missing() {
        let downloaded: BTreeSet<_> =
            ["A".to_string(), "B".to_string(), "C".to_string()].into();
        let result = CycleResult::from_downloaded(downloaded, &abc_set());
        assert!(!result.has_missing());
    }
}
