use std::time::Instant;

use chrono::Local;
use poise::CreateReply;

use crate::toke::runner::{self, TokeRuntime};
use crate::toke::{JoinOutcome, Participant};
use crate::utils::embed;
use crate::{Context, Error};

/// Shared join flow, also used by the early-toke bypass after a won roll.
pub(crate) async fn announce_join(ctx: &Context<'_>, outcome: JoinOutcome) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;
    let author = Participant {
        id: ctx.author().id,
        name: ctx.author().name.clone(),
    };
    let rt = TokeRuntime::from_data(ctx.data());
    let http = ctx.serenity_context().http.clone();
    let channel_id = ctx.channel_id();

    match outcome {
        JoinOutcome::Started {
            countdown_secs,
            events,
        } => {
            ctx.say(format!(
                "A group toke has been started by {}! We'll be taking a toke in \
                 {countdown_secs} seconds - join in with /toke",
                author.mention()
            ))
            .await?;
            runner::deliver_events(&rt, &http, channel_id, &events).await;
            runner::spawn_countdown(rt, http, channel_id, guild_id);
        }
        JoinOutcome::Joined { events } => {
            ctx.say(format!("{} has joined the toke!", author.mention()))
                .await?;
            runner::deliver_events(&rt, &http, channel_id, &events).await;
        }
        JoinOutcome::Saved {
            remaining_secs,
            events,
        } => {
            ctx.say(format!(
                "{} saved the toke! ⏳ The clock is back up to {remaining_secs} seconds.",
                author.mention()
            ))
            .await?;
            runner::deliver_events(&rt, &http, channel_id, &events).await;
        }
        JoinOutcome::AlreadyJoined => {
            ctx.say("You're already in this toke! 💨").await?;
        }
        JoinOutcome::CoolingDown { remaining_secs } => {
            ctx.send(CreateReply::default().embed(embed::error(&format!(
                "Toke is on cooldown. Please wait {remaining_secs} seconds."
            ))))
            .await?;
        }
    }

    Ok(())
}

async fn toke_impl(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;
    let author = Participant {
        id: ctx.author().id,
        name: ctx.author().name.clone(),
    };

    let outcome = {
        let mut sessions = ctx.data().sessions.write().await;
        let session = sessions.entry(guild_id).or_default();
        session.join(
            author,
            Instant::now(),
            Local::now().time(),
            &ctx.data().toke_config,
        )
    };

    announce_join(&ctx, outcome).await
}

/// Starts or joins a group toke
#[poise::command(slash_command, guild_only)]
pub async fn toke(ctx: Context<'_>) -> Result<(), Error> {
    toke_impl(ctx).await
}
