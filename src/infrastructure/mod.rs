//! Infrastructure layer
//! 포트 구현체(HTTP 클라이언트, 설정 로더, writer)를 담는다.

pub mod adapters;
pub mod config;
pub mod nexus;
pub mod proxy;
pub mod writers;
