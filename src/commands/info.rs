use serenity::model::guild::Member;
use serenity::model::permissions::Permissions;

use crate::utils::{permissions, validation};
use crate::{Context, Error};

/// resolves the queried member, falling back to the command author
async fn target_member(ctx: Context<'_>, query: Option<String>) -> Option<Member> {
    let guild_id = ctx.guild_id()?;
    match query {
        Some(query) => validation::resolve_member(ctx.serenity_context(), guild_id, &query).await,
        None => ctx.author_member().await.map(|member| member.into_owned()),
    }
}

#[poise::command(prefix_command, track_edits, slash_command, guild_only)]
pub async fn userinfo(
    ctx: Context<'_>,
    #[description = "Mention, ID or name"] user: Option<String>,
) -> Result<(), Error> {
    let Some(member) = target_member(ctx, user).await else {
        ctx.say("could not find that member").await?;
        return Ok(());
    };

    let highest = permissions::highest_role(ctx.serenity_context(), &member)
        .map(|role| role.name)
        .unwrap_or_else(|| String::from("none"));

    let mut reply = format!(
        "**{}**\nID: {}\nusername: {}\nhighest role: {}",
        member.display_name(),
        member.user.id,
        member.user.name,
        highest,
    );

    let avatar = member.face();
    if validation::is_image_url(&ctx.data().http, &avatar).await {
        reply.push('\n');
        reply.push_str(&avatar);
    }

    ctx.say(reply).await?;
    Ok(())
}

#[poise::command(prefix_command, track_edits, slash_command, guild_only)]
pub async fn perms(
    ctx: Context<'_>,
    #[description = "Mention, ID or name"] user: Option<String>,
) -> Result<(), Error> {
    let Some(member) = target_member(ctx, user).await else {
        ctx.say("could not find that member").await?;
        return Ok(());
    };

    let Some(held) = permissions::member_permissions(ctx.serenity_context(), &member) else {
        ctx.say("this server is not cached yet, try again in a moment")
            .await?;
        return Ok(());
    };

    let is_admin =
        permissions::member_has_permission(ctx.serenity_context(), &member, Permissions::ADMINISTRATOR);
    let reply = if is_admin {
        format!("**{}** is an Administrator", member.display_name())
    } else {
        format!(
            "**{}** can: {}",
            member.display_name(),
            permissions::named_permissions(held).join(", "),
        )
    };

    ctx.say(reply).await?;
    Ok(())
}
