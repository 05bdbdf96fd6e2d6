//! # lanesnap-storage
//!
//! 파일 시스템 어댑터.
//! 카메라 목록 CSV 로드([`camera_list`])와
//! 이미지 파일 영속화([`image_store`])를 담당한다.

pub mod camera_list;
pub mod image_store;
