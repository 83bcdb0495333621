use crate::utils::random;
use crate::{Context, Error};

#[poise::command(prefix_command, track_edits, slash_command)]
pub async fn roll(
    ctx: Context<'_>,
    #[description = "Number of sides, defaults to 6"] sides: Option<u32>,
) -> Result<(), Error> {
    let sides = sides.unwrap_or(6).max(2);
    let rolled = random::int_in_range(1, i64::from(sides));
    ctx.say(format!(":game_die: rolled a {rolled} (d{sides})"))
        .await?;
    Ok(())
}

#[poise::command(prefix_command, track_edits, slash_command)]
pub async fn choose(
    ctx: Context<'_>,
    #[description = "Comma separated options"] options: String,
) -> Result<(), Error> {
    let choices: Vec<&str> = options
        .split(',')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .collect();

    match random::pick(&choices) {
        Some(choice) => ctx.say(format!("I choose **{choice}**")).await?,
        None => ctx.say("give me something to choose from").await?,
    };
    Ok(())
}
