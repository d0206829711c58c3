use crate::config::Config;
use crate::domain::UserId;
use crate::presentation;
use crate::state::SharedState;

pub async fn cmd_search(config: Config, user: UserId, query: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;

    let candidates = match state.search_service.search(user, query).await {
        Ok(candidates) => candidates,
        Err(e) => {
            println!("{}", presentation::error_message(&e));
            return Err(e.into());
        }
    };

    println!("{}", presentation::search_header(query, &candidates));
    if candidates.is_empty() {
        return Ok(());
    }

    println!("{:-<60}", "");
    for (index, option) in presentation::selectable_options(&candidates)
        .iter()
        .enumerate()
    {
        println!("{}. {}  [{}]", index + 1, option.label, option.token);
    }
    println!();
    println!("To see details: cinebot select --user {user} <film_id>");

    Ok(())
}
