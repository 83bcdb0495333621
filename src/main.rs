use clap::{crate_description, Parser, Subcommand};

use env_logger::Builder;

use log::{error, info, LevelFilter};

use poise::serenity_prelude as serenity;

use std::{sync::Arc, time::Duration};

use brindle::commands::{fun::*, general::*, info::*};
use brindle::config::Config;
use brindle::{reporter, Data, Error};

#[derive(Parser, Debug)]
#[command(about=crate_description!())]
#[command(version, long_about = None)]
struct CLArgs {
    #[arg(short, long, default_value = "none")]
    loglevel: String,

    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// manage global application commands and exit
    Commands {
        #[command(subcommand)]
        op: CommandAction,
    },
}

#[derive(Subcommand, Debug)]
enum CommandAction {
    /// list the registered global commands
    View,
    /// push the current command set to Discord
    Register,
    /// remove a single global command by ID
    Unregister { id: u64 },
    /// remove every global command
    Delete,
}

fn command_list() -> Vec<poise::Command<Data, Error>> {
    vec![help(), ping(), roll(), choose(), userinfo(), perms()]
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => panic!("Failed to start bot: {:?}", error),
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error,);
            let data = ctx.data();
            if let Some(webhook) = &data.config.error_webhook {
                let report = format!("command `{}` failed: {:?}", ctx.command().name, error);
                reporter::report(&data.http, webhook, &report).await;
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e)
            }
        }
    }
}

async fn event_handler(
    _ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    _data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot, .. } => {
            info!("{} is connected", data_about_bot.user.name);
        }
        serenity::FullEvent::CacheReady { guilds, .. } => {
            info!("cache ready with {} guilds", guilds.len());
        }
        serenity::FullEvent::GuildCreate { guild, .. } => {
            info!("guild available: {}", guild.name);
        }
        _ => {}
    }
    Ok(())
}

/// one-shot command registration actions, token only, no gateway connection
async fn run_commands_action(token: &str, op: CommandAction) -> Result<(), Error> {
    let http = serenity::Http::new(token);
    let app = http.get_current_application_info().await?;
    http.set_application_id(app.id);

    match op {
        CommandAction::View => {
            let commands = serenity::Command::get_global_commands(&http).await?;
            if commands.is_empty() {
                info!("no global commands registered");
            }
            for command in commands {
                info!("{} {}", command.id, command.name);
            }
        }
        CommandAction::Register => {
            let builders = poise::builtins::create_application_commands(&command_list());
            let registered = serenity::Command::set_global_commands(&http, builders).await?;
            info!("registered {} global commands", registered.len());
        }
        CommandAction::Unregister { id } => {
            serenity::Command::delete_global_command(&http, serenity::CommandId::new(id)).await?;
            info!("unregistered command {id}");
        }
        CommandAction::Delete => {
            serenity::Command::set_global_commands(&http, vec![]).await?;
            info!("deleted all global commands");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let clargs = CLArgs::parse();
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");
    let _ = dotenvy::dotenv();

    if clargs.loglevel != "none" {
        let mut builder = Builder::new();

        match clargs.loglevel.to_lowercase().as_str() {
            "trace" => {
                builder.filter_module("brindle", LevelFilter::Trace).init();
            }
            "debug" => {
                builder.filter_module("brindle", LevelFilter::Debug).init();
            }
            "info" => {
                builder.filter_module("brindle", LevelFilter::Info).init();
            }
            "warn" => {
                builder.filter_module("brindle", LevelFilter::Warn).init();
            }
            "error" => {
                builder.filter_module("brindle", LevelFilter::Error).init();
            }
            &_ => {}
        }
    } else {
        let env = env_logger::Env::new();
        env_logger::init_from_env(env);
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        error!("panic: {panic_info}");
        default_hook(panic_info);
    }));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Some(Action::Commands { op }) = clargs.action {
        if let Err(e) = run_commands_action(&config.token, op).await {
            error!("command registration action failed: {e}");
            std::process::exit(1);
        }
        return;
    }

    info!("Starting...");

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS;

    let token = config.token.clone();

    let options = poise::FrameworkOptions {
        commands: command_list(),
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(config.prefix.clone().into()),
            edit_tracker: Some(Arc::new(poise::EditTracker::for_timespan(
                Duration::from_secs(3600),
            ))),
            ..Default::default()
        },
        owners: config.owner_id.into_iter().collect(),
        on_error: |error| Box::pin(on_error(error)),
        pre_command: |ctx| {
            Box::pin(async move {
                info!("Executing command {}...", ctx.command().qualified_name);
            })
        },
        post_command: |ctx| {
            Box::pin(async move {
                info!("Executed command {}!", ctx.command().qualified_name);
            })
        },
        skip_checks_for_owners: false,
        event_handler: |ctx, event, framework, data| {
            Box::pin(event_handler(ctx, event, framework, data))
        },
        ..Default::default()
    };

    let framework = poise::Framework::builder()
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(Data {
                    config,
                    http: reqwest::Client::new(),
                })
            })
        })
        .options(options)
        .build();

    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .expect("Error creating client");

    tokio::spawn(async move {
        let _ = client
            .start()
            .await
            .map_err(|why| error!("client ended: {:?}", why));
    });

    let _signal_err = tokio::signal::ctrl_c().await;
    info!("Received Ctrl-C, shutting down.");
}
