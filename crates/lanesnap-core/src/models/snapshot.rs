//! 메타데이터 API 응답 레코드.

use serde::{Deserialize, Deserializer};

/// 원격 메타데이터 엔드포인트가 보고하는 카메라 한 대의 현재 상태.
///
/// 식별자는 원천에 따라 문자열/숫자 어느 쪽으로도 올 수 있어
/// 역직렬화 시 문자열로 정규화한다. 좌표 필드는 무시한다.
#[derive(Debug, Clone, Deserialize)]
pub struct CameraSnapshot {
    /// 카메라 식별자
    #[serde(rename = "CameraID", deserialize_with = "id_as_string")]
    pub camera_id: String,
    /// 이미지 URL. 비어 있거나 누락되거나 문자열이 아닐 수 있다.
    #[serde(rename = "ImageLink", default, deserialize_with = "link_as_option")]
    pub image_link: Option<String>,
}

impl CameraSnapshot {
    /// 사용 가능한 이미지 참조. 빈 문자열은 누락으로 취급.
    pub fn usable_image_link(&self) -> Option<&str> {
        self.image_link.as_deref().filter(|link| !link.is_empty())
    }
}

/// 기본 이미지 확장자 — 이미지 참조에 확장자가 없을 때 사용
pub const DEFAULT_SUFFIX: &str = ".jpg";

/// 이미지 URL 경로에서 파일 확장자 도출. 없으면 [`DEFAULT_SUFFIX`].
///
/// 쿼리/프래그먼트는 확장자에 포함하지 않는다.
pub fn suffix_for_link(link: &str) -> String {
    let path = link.split(['?', '#']).next().unwrap_or(link);
    match std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
    {
        Some(ext) if !ext.is_empty() => format!(".{ext}"),
        _ => DEFAULT_SUFFIX.to_string(),
    }
}

/// 문자열/정수 혼용 식별자를 문자열로 정규화
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Text(String),
        Number(i64),
    }

    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Text(s) => s,
        IdRepr::Number(n) => n.to_string(),
    })
}

/// 이미지 URL 필드를 관대하게 역직렬화. 문자열이 아니면 누락으로 정규화해
/// 레코드 하나의 형식 오류가 응답 전체 역직렬화를 깨뜨리지 않게 한다.
fn link_as_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LinkRepr {
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match LinkRepr::deserialize(deserializer)? {
        LinkRepr::Text(s) => Some(s),
        LinkRepr::Other(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_string_and_numeric_ids() {
        let s: CameraSnapshot =
            serde_json::from_str(r#"{"CameraID":"1703","ImageLink":"https://x/1703.jpg"}"#)
                .unwrap();
        assert_eq!(s.camera_id, "1703");
        assert_eq!(s.usable_image_link(), Some("https://x/1703.jpg"));

        let n: CameraSnapshot = serde_json::from_str(r#"{"CameraID":1703}"#).unwrap();
        assert_eq!(n.camera_id, "1703");
        assert_eq!(n.usable_image_link(), None);
    }

    #[test]
    fn suffix_from_link_path() {
        assert_eq!(suffix_for_link("https://x/cam/1703.jpg"), ".jpg");
        assert_eq!(suffix_for_link("https://x/cam/1703.png?sig=abc"), ".png");
        assert_eq!(suffix_for_link("https://x/cam/1703"), ".jpg");
        assert_eq!(suffix_for_link("https://x/cam/1703."), ".jpg");
    }

    #[test]
    fn non_string_image_link_is_treated_as_missing() {
        let n: CameraSnapshot =
            serde_json::from_str(r#"{"CameraID":"1703","ImageLink":12345}"#).unwrap();
        assert_eq!(n.usable_image_link(), None);

        let null: CameraSnapshot =
            serde_json::from_str(r#"{"CameraID":"1703","ImageLink":null}"#).unwrap();
        assert_eq!(null.usable_image_link(), None);
    }

    #[test]
    fn empty_image_link_is_unusable() {
        let s: CameraSnapshot =
            serde_json::from_str(r#"{"CameraID":"1703","ImageLink":""}"#).unwrap();
        assert_eq!(s.usable_image_link(), None);
    }
}
