use poise::serenity_prelude as serenity;

use crate::{Context, Error};

/// Shows attempts since the last successful early toke
#[poise::command(slash_command, guild_only)]
pub async fn odds(
    ctx: Context<'_>,
    #[description = "User to look up"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let target = user.as_ref().unwrap_or_else(|| ctx.author());
    let attempts = ctx.data().achievements.earlytoke_attempts(target.id);
    ctx.say(format!(
        "{} has attempted /earlytoke {attempts} time(s) since their last successful early toke.",
        target.name
    ))
    .await?;
    Ok(())
}

/// Shows lifetime early toke attempts
#[poise::command(slash_command, guild_only)]
pub async fn earlytokelife(
    ctx: Context<'_>,
    #[description = "User to look up"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let target = user.as_ref().unwrap_or_else(|| ctx.author());
    let count = ctx.data().achievements.earlytoke_lifetime(target.id);
    ctx.say(format!(
        "{} has attempted /earlytoke {count} time(s) in their lifetime.",
        target.name
    ))
    .await?;
    Ok(())
}
