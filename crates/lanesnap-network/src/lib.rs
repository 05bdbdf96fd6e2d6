//! # lanesnap-network
//!
//! HTTP 네트워크 어댑터.
//! 메타데이터 API 조회([`metadata_client`]), 이미지 바이트 다운로드
//! ([`image_client`]), 오브젝트 스토어 업로드([`object_store`])를 담당한다.
//! 모든 요청은 유한 타임아웃을 가지며, 타임아웃은 여타 전송 실패와
//! 동일하게 취급된다.

pub mod image_client;
pub mod metadata_client;
pub mod object_store;
