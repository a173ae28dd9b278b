use crate::core::report::RouteReport;
use crate::domain::model::{OutputFormat, PathSearch, Ticket};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn tickets_file(&self) -> &str;
    fn origin(&self) -> &str;
    fn destination(&self) -> &str;
    fn path_search(&self) -> PathSearch;
    fn output_dir(&self) -> Option<&str>;
    fn output_formats(&self) -> &[OutputFormat];
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Ticket>>;
    async fn transform(&self, tickets: Vec<Ticket>) -> Result<RouteReport>;
    async fn load(&self, report: &RouteReport) -> Result<Vec<String>>;
}
