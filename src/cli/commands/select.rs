use crate::config::Config;
use crate::domain::{FilmId, UserId};
use crate::presentation;
use crate::state::SharedState;

/// Accepts a bare id or a selection token.
fn parse_film_arg(film: &str) -> anyhow::Result<FilmId> {
    presentation::parse_selection_token(film)
        .or_else(|| film.parse().ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid film id: {film}"))
}

pub async fn cmd_select(config: Config, user: UserId, film: &str) -> anyhow::Result<()> {
    let film_id = parse_film_arg(film)?;
    let state = SharedState::new(config).await?;

    let film = match state.enrichment_service.select(user, film_id).await {
        Ok(film) => film,
        Err(e) => {
            println!("{}", presentation::error_message(&e));
            return Err(e.into());
        }
    };

    let message = presentation::film_message(&film);

    if let Some(photo) = &message.photo_url {
        println!("Poster: {photo}");
    }
    println!();
    println!("{}", message.caption);
    println!();
    if let Some(link) = &message.link {
        println!("{}: {}", link.label, link.url);
    }
    println!("Views by you: {}", film.view_count);

    Ok(())
}
