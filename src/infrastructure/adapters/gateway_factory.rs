//! Nexus 게이트웨이 팩토리 어댑터.

use anyhow::Result;

use crate::application::ports::{GatewayFactory, NexusGateway};
use crate::infrastructure::nexus::{NexusClient, ServerSettings};

pub struct HttpGatewayFactory;

impl GatewayFactory for HttpGatewayFactory {
    fn build(&self, settings: &ServerSettings) -> Result<Box<dyn NexusGateway>> {
        Ok(Box::new(NexusClient::build(settings)?))
    }
}
