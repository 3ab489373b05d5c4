use std::{sync::Arc, time::Duration};

use anyhow::Result;
use reqwest::Client;
use teloxide::{prelude::*, utils::command::BotCommands};
use tokio::{signal, task::JoinSet};
use tokio_util::{sync::CancellationToken, task::TaskTracker};

use bot_handlers::{callback_handler, command_handler, message_handler, Command, Conversations};
use common::{spawn_with_token, Config};
use translator::{GoogleTranslator, Translator};

mod logger;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// How long running translations get to tell users they were canceled
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) const IS_PROD: bool = cfg!(feature = "prod");

#[tokio::main]
async fn main() -> Result<()> {
    common::load_dotenv();
    logger::init_logger(&common::log_file())?;

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("missing environment variables, set BOT_TOKEN, API_ID and API_HASH: {e}");
            return Err(e.into());
        }
    };
    log::info!("starting translate bot, api id {}", config.api_id);

    let bot = Bot::with_client(
        config.bot_token,
        Client::builder().timeout(REQUEST_TIMEOUT).build()?,
    );
    bot.set_my_commands(Command::bot_commands()).await?;

    let translator: Arc<dyn Translator> = Arc::new(GoogleTranslator::new(
        Client::builder().timeout(REQUEST_TIMEOUT).build()?,
    ));
    let cancel_token = CancellationToken::new();
    let conversations = Conversations::new();
    let flows = TaskTracker::new();

    let mut jobs = JoinSet::new();
    jobs.spawn(spawn_with_token(
        cancel_token.clone(),
        start_bot(bot, translator, conversations.clone(), flows.clone()),
    ));
    jobs.spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("failed to listen for SIGINT: {e}");
        }
        log::info!("shutting down");
        cancel_token.cancel();
    });

    while (jobs.join_next().await).is_some() {}

    let pending = conversations.cancel_all();
    flows.close();
    log::info!("waiting for {pending} pending translations");
    if tokio::time::timeout(SHUTDOWN_TIMEOUT, flows.wait()).await.is_err() {
        log::warn!("translations did not finish in {SHUTDOWN_TIMEOUT:?}");
    }

    Ok(())
}

async fn start_bot(
    bot: Bot,
    translator: Arc<dyn Translator>,
    conversations: Conversations,
    flows: TaskTracker,
) {
    log::debug!("starting bot");
    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter(|msg: Message| msg.chat.is_private())
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(command_handler),
                )
                .branch(dptree::endpoint(message_handler)),
        )
        .branch(Update::filter_callback_query().endpoint(callback_handler));
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![translator, conversations, flows])
        .default_handler(|_update| async move { log::debug!("ignoring unhandled update") })
        .error_handler(LoggingErrorHandler::with_custom_text("error in dispatcher"))
        .build()
        .dispatch()
        .await;
}
