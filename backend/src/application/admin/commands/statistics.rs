use crate::application::ports::StatisticsRepository;
use crate::application::views::Statistics;
use crate::error::Result;

const RECENT_ACTIVITY_LIMIT: i64 = 10;

pub async fn execute<R: StatisticsRepository + ?Sized>(repo: &R) -> Result<Statistics> {
    let mut stats = repo.snapshot(RECENT_ACTIVITY_LIMIT).await?;
    stats.prices.average = stats.prices.average.round();
    Ok(stats)
}
