//! 설정 스키마와 병합 규칙.

use std::env;

use serde::{Deserialize, Serialize};

/// 병합 가능한 전체 설정. 모든 필드는 선택적이다.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 접속/리포트 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// 자격 증명을 읽어올 환경 변수 이름
    #[serde(default)]
    pub server: ServerConfig,
    /// 프록시 설정
    #[serde(default)]
    pub proxy: ProxyDefaults,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// Nexus 서버 기본 URL
    pub url: Option<String>,
    /// 요청 타임아웃(초)
    pub timeout_secs: Option<u64>,
    /// top-groups 기본 표시 개수
    pub top_groups: Option<usize>,
    /// 연령 버킷 기본 명세
    pub age_buckets: Option<String>,
}

/// 자격 증명은 파일에 직접 두지 않고 환경 변수 이름만 둔다.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    pub username_env: Option<String>,
    pub password_env: Option<String>,
    pub token_env: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProxyDefaults {
    pub url: Option<String>,
}

impl Config {
    /// 나중에 로딩된 설정이 필드 단위로 우선한다.
    pub fn merge_from(&mut self, other: Config) {
        merge_option(&mut self.defaults.url, other.defaults.url);
        merge_option(&mut self.defaults.timeout_secs, other.defaults.timeout_secs);
        merge_option(&mut self.defaults.top_groups, other.defaults.top_groups);
        merge_option(&mut self.defaults.age_buckets, other.defaults.age_buckets);
        merge_option(&mut self.server.username_env, other.server.username_env);
        merge_option(&mut self.server.password_env, other.server.password_env);
        merge_option(&mut self.server.token_env, other.server.token_env);
        merge_option(&mut self.proxy.url, other.proxy.url);
    }
}

impl ServerConfig {
    pub fn username(&self) -> Option<String> {
        read_env(self.username_env.as_deref())
    }

    pub fn password(&self) -> Option<String> {
        read_env(self.password_env.as_deref())
    }

    pub fn token(&self) -> Option<String> {
        read_env(self.token_env.as_deref())
    }
}

fn merge_option<T>(target: &mut Option<T>, source: Option<T>) {
    if source.is_some() {
        *target = source;
    }
}

fn read_env(name: Option<&str>) -> Option<String> {
    let name = name?;
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}
