mod quiz;

use std::sync::Arc;

use async_trait::async_trait;
use dotenv::dotenv;
use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
    utils::command::BotCommands,
};

use quiz::controller::{OutboundMessage, SessionController, Transport};
use quiz::error::TransportError;
use quiz::source::HttpQuestionService;
use quiz::ParticipantId;

type QuizController = Arc<SessionController<HttpQuestionService, TelegramTransport>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
enum Command {
    #[command(description = "show how to begin.")]
    Start,
    #[command(description = "take the quiz.")]
    Test,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting quiz bot...");

    let bot = Bot::from_env();

    let service_url = std::env::var("QUESTION_SERVICE_URL").unwrap_or_default();
    let service = HttpQuestionService::new(&service_url);

    let controller: QuizController = Arc::new(SessionController::new(
        service,
        TelegramTransport { bot: bot.clone() },
    ));

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(Update::filter_callback_query().endpoint(handle_selection));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![controller])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

const GREETING_TEXT: &str = "Hi! Send /test to take the quiz.";
const SOURCE_DOWN_TEXT: &str = "Could not load the quiz right now, please try again later.";

async fn handle_command(
    bot: Bot,
    controller: QuizController,
    msg: Message,
    command: Command,
) -> HandlerResult {
    match command {
        Command::Start => {
            bot.send_message(msg.chat.id, GREETING_TEXT).await?;
        }
        Command::Test => {
            let participant = ParticipantId(msg.chat.id.0);
            if let Err(err) = controller.on_start(participant).await {
                log::error!("failed to start quiz for {participant}: {err}");
                bot.send_message(msg.chat.id, SOURCE_DOWN_TEXT).await?;
            }
        }
    }
    Ok(())
}

async fn handle_selection(
    bot: Bot,
    controller: QuizController,
    query: CallbackQuery,
) -> HandlerResult {
    // Clear the button spinner whatever the payload holds.
    bot.answer_callback_query(query.id).await?;

    let (Some(message), Some(data)) = (query.message, query.data) else {
        return Ok(());
    };
    let participant = ParticipantId(message.chat.id.0);
    controller.on_selection(participant, &data).await?;
    Ok(())
}

/// Telegram rendering of the controller's outbound messages. Questions go
/// out as inline keyboards whose buttons carry the option index as
/// `callback_data`.
struct TelegramTransport {
    bot: Bot,
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send(&self, to: ParticipantId, message: OutboundMessage) -> Result<(), TransportError> {
        let chat = ChatId(to.0);
        match message {
            OutboundMessage::ShowQuestion { text, options } => {
                let buttons = options
                    .into_iter()
                    .map(|(label, index)| {
                        vec![InlineKeyboardButton::callback(label, index.to_string())]
                    })
                    .collect::<Vec<_>>();
                self.bot
                    .send_message(chat, text)
                    .reply_markup(InlineKeyboardMarkup::new(buttons))
                    .await
                    .map_err(TransportError::new)?;
            }
            OutboundMessage::Feedback { text } => {
                self.bot
                    .send_message(chat, text)
                    .await
                    .map_err(TransportError::new)?;
            }
            OutboundMessage::FinalSummary { score, total } => {
                self.bot
                    .send_message(chat, format!("Quiz finished. Your score: {score}/{total}"))
                    .await
                    .map_err(TransportError::new)?;
            }
        }
        Ok(())
    }
}
