use std::time::Instant;

use chrono::Local;
use poise::CreateReply;
use rand::Rng;

use super::toke::announce_join;
use crate::achievements;
use crate::toke::{EarlyStartOutcome, Participant};
use crate::utils::embed;
use crate::{Context, Error};

async fn earlytoke_impl(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;
    let author = Participant {
        id: ctx.author().id,
        name: ctx.author().name.clone(),
    };
    let cfg = ctx.data().toke_config;

    // Roll before taking the lock; the core only consumes the outcome.
    let won = rand::thread_rng().gen_range(0..cfg.earlytoke_odds) == 0;
    let now = Instant::now();

    // Bypass and the follow-up join happen under one lock so no other
    // command can slip in between.
    let (outcome, join_outcome) = {
        let mut sessions = ctx.data().sessions.write().await;
        let session = sessions.entry(guild_id).or_default();
        let outcome = session.attempt_early_start(now, won);
        let join_outcome = match outcome {
            EarlyStartOutcome::Won => {
                Some(session.join(author.clone(), now, Local::now().time(), &cfg))
            }
            _ => None,
        };
        (outcome, join_outcome)
    };

    let badges = &ctx.data().achievements;
    match outcome {
        EarlyStartOutcome::NotCoolingDown => {
            ctx.send(CreateReply::default().embed(embed::error(
                "There's no cooldown to break right now. Just /toke!",
            )))
            .await?;
        }
        EarlyStartOutcome::Lost { remaining_secs } => {
            if let Err(e) = badges.increment_earlytoke_lifetime(author.id) {
                tracing::error!("earlytoke lifetime counter failed: {e}");
            }
            if let Err(e) = badges.increment_earlytoke_attempts(author.id) {
                tracing::error!("earlytoke attempt counter failed: {e}");
            }
            let attempts = badges.earlytoke_attempts(author.id);
            ctx.say(format!(
                "🚬 The toke gods have denied {}. {remaining_secs} seconds of cooldown \
                 remain. ({attempts} attempts since their last success)",
                author.mention()
            ))
            .await?;
        }
        EarlyStartOutcome::Won => {
            if let Err(e) = badges.increment_earlytoke_lifetime(author.id) {
                tracing::error!("earlytoke lifetime counter failed: {e}");
            }
            // Success resets the since-last-success counter.
            if let Err(e) = badges.reset_earlytoke_attempts(author.id) {
                tracing::error!("earlytoke attempt reset failed: {e}");
            }

            ctx.say(format!(
                "🌅 {} broke the cooldown! The session is back on.",
                author.mention()
            ))
            .await?;

            if let Some(ach) =
                achievements::award_event_badge(badges, author.id, achievements::EARLY_RISER)
            {
                ctx.say(embed::achievement_unlocked_line(&author, ach))
                    .await?;
            }

            if let Some(join_outcome) = join_outcome {
                announce_join(&ctx, join_outcome).await?;
            }
        }
    }

    Ok(())
}

/// Tries to break the toke cooldown early. Long odds!
#[poise::command(slash_command, guild_only)]
pub async fn earlytoke(ctx: Context<'_>) -> Result<(), Error> {
    earlytoke_impl(ctx).await
}
