use crate::config::Config;
use crate::db::Store;
use crate::domain::UserId;
use crate::presentation;
use crate::services::ActivityService;

async fn activity_service(config: &Config) -> anyhow::Result<ActivityService> {
    let store = Store::new(&config.general.database_path).await?;
    Ok(ActivityService::new(store, &config.search))
}

pub async fn cmd_history(config: &Config, user: UserId) -> anyhow::Result<()> {
    let service = activity_service(config).await?;
    let entries = service.recent_history_entries(user).await?;

    let queries: Vec<String> = entries.iter().map(|e| e.query.clone()).collect();
    println!("{}", presentation::history_message(&queries));

    if !entries.is_empty() {
        println!("{:-<60}", "");
        for entry in &entries {
            println!("• {} | {}", entry.query, entry.created_at);
        }
    }

    Ok(())
}

pub async fn cmd_stats(config: &Config, user: UserId) -> anyhow::Result<()> {
    let service = activity_service(config).await?;
    let stats = service.top_stats(user).await?;

    println!("{}", presentation::stats_message(&stats));

    Ok(())
}
