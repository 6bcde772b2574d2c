use axum::async_trait;

use crate::application::views::Statistics;
use crate::error::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatisticsRepository: Send + Sync {
    async fn snapshot(&self, recent_limit: i64) -> Result<Statistics>;
}
