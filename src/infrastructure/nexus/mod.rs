//! Nexus REST API 연동 구현.

mod client;
mod models;

pub use client::NexusClient;

use crate::infrastructure::proxy::ProxyServer;

/// 게이트웨이 생성에 필요한 접속 설정.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub base_url: String,
    pub auth: Auth,
    pub proxy: Option<ProxyServer>,
    pub timeout_secs: u64,
}

/// 요청 인증 방식. 토큰이 있으면 basic 자격 증명보다 우선한다.
#[derive(Debug, Clone)]
pub enum Auth {
    Token(String),
    Basic { username: String, password: String },
    Anonymous,
}
