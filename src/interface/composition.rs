//! 애플리케이션 조립(composition root) 모듈.

use crate::application::usecases::generate_report::GenerateReportUseCase;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::infrastructure::adapters::{FileWriterFactory, HttpGatewayFactory, JsonConfigRepository};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    gateway_factory: HttpGatewayFactory,
    writer_factory: FileWriterFactory,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self {
            config_repo: JsonConfigRepository,
            gateway_factory: HttpGatewayFactory,
            writer_factory: FileWriterFactory,
        }
    }
}

impl AppComposition {
    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 리포트 생성 유스케이스를 생성한다.
    pub fn report_usecase(&self) -> GenerateReportUseCase<'_> {
        GenerateReportUseCase {
            config_repo: &self.config_repo,
            gateway_factory: &self.gateway_factory,
            writer_factory: &self.writer_factory,
        }
    }
}
