use super::*;
use crate::adapter::ToolAdapter;

#[derive(Clone)]
struct EchoAdapter(&'static str);

#[async_trait]
impl ToolAdapter for EchoAdapter {
    fn name(&self) -> &str {
        self.0
    }

    async fn detect(&self) -> (Option<String>, bool) {
        (Some(format!("/usr/bin/{}", self.0)), true)
    }

    async fn version(&self, _ctx: &AdapterContext) -> Result<Version, ToolAdapterError> {
        Ok(Version::parse("1.0.0"))
    }

    async fn capabilities(&self, _ctx: &AdapterContext) -> Result<HashSet<String>, ToolAdapterError> {
        Ok(HashSet::new())
    }

    async fn health(&self, _ctx: &AdapterContext) -> Result<HealthStatus, ToolAdapterError> {
        Ok(HealthStatus::Healthy)
    }
}

#[tokio::test]
async fn register_and_look_up_by_name() {
    let registry = ToolAdapterRegistry::new();
    registry.register(EchoAdapter("bv"));
    registry.register(EchoAdapter("bd"));
    let ctx = AdapterContext::default();

    assert_eq!(registry.names().len(), 2);
    assert!(registry.is_available("bv", &ctx).await);
    assert!(!registry.is_available("unknown", &ctx).await);
    assert!(registry.info("bd", &ctx).await.is_some());
    assert!(registry.info("unknown", &ctx).await.is_none());
}

#[tokio::test]
async fn version_of_unregistered_tool_is_not_installed() {
    let registry = ToolAdapterRegistry::new();
    let ctx = AdapterContext::default();
    let result = registry.version("missing", &ctx).await;
    assert!(matches!(result, Err(ToolAdapterError::NotInstalled { .. })));
}
