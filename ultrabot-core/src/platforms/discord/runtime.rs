use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

use twilight_gateway::{
    self as gateway,
    CloseFrame,
    Config,
    Event,
    EventTypeFlags,
    Intents,
    MessageSender,
    Shard,
    StreamExt,
};
use twilight_http::Client as HttpClient;
use twilight_http::client::ClientBuilder;
use twilight_model::application::interaction::{Interaction, InteractionData};
use twilight_model::gateway::payload::incoming::{InteractionCreate, Ready as ReadyPayload};
use twilight_model::id::marker::ChannelMarker;
use twilight_model::id::Id;

use crate::Error;
use crate::platforms::ConnectionStatus;
use crate::services::discord::{handle_command, handle_component, PrefixCommand};
use crate::services::event_context::EventContext;

/// What a shard hands over to the dispatcher.
#[derive(Debug)]
pub enum DiscordEvent {
    Command {
        channel_id: Id<ChannelMarker>,
        author: String,
        command: PrefixCommand,
    },
    Component {
        interaction: Box<Interaction>,
    },
}

/// Reads gateway events from one shard and forwards the ones we act on.
/// No handling happens here; every shard feeds the same dispatcher.
async fn shard_runner(
    mut shard: Shard,
    tx: UnboundedSender<DiscordEvent>,
    command_prefix: Arc<str>,
) {
    let shard_id = shard.id().number();
    info!("(ShardRunner) Shard {shard_id} started. Listening for events.");

    let wanted = EventTypeFlags::READY | EventTypeFlags::MESSAGE_CREATE | EventTypeFlags::INTERACTION_CREATE;

    while let Some(item) = shard.next_event(wanted).await {
        let event = match item {
            Ok(event) => event,
            Err(err) => {
                error!("Shard {shard_id} => error receiving event: {err:?}");
                continue;
            }
        };

        let forwarded = match event {
            Event::Ready(ready) => {
                let data: &ReadyPayload = &ready;
                info!(
                    "Shard {shard_id} => Logged in as {}#{} (ID={})",
                    data.user.name, data.user.discriminator, data.user.id
                );
                None
            }
            Event::MessageCreate(msg) => {
                if msg.author.bot {
                    debug!("Ignoring bot message from {}", msg.author.name);
                    continue;
                }
                PrefixCommand::parse(&command_prefix, &msg.content).map(|command| DiscordEvent::Command {
                    channel_id: msg.channel_id,
                    author: msg.author.name.clone(),
                    command,
                })
            }
            Event::InteractionCreate(interaction) => {
                let InteractionCreate(interaction) = *interaction;
                match interaction.data {
                    Some(InteractionData::MessageComponent(_)) => Some(DiscordEvent::Component {
                        interaction: Box::new(interaction),
                    }),
                    _ => {
                        trace!("Shard {shard_id} => ignoring non-component interaction");
                        None
                    }
                }
            }
            other => {
                trace!("Shard {shard_id} => unhandled event: {:?}", other.kind());
                None
            }
        };

        if let Some(ev) = forwarded {
            if tx.send(ev).is_err() {
                warn!("Shard {shard_id} => dispatcher is gone, stopping");
                break;
            }
        }
    }

    warn!("(ShardRunner) Shard {shard_id} event loop ended.");
}

/// Posts the replies for a command, or answers a component interaction.
async fn dispatch(http: &HttpClient, ctx: &EventContext, event: DiscordEvent) -> Result<(), Error> {
    match event {
        DiscordEvent::Command { channel_id, author, command } => {
            info!("{author} ran {command:?} in channel {channel_id}");
            for reply in handle_command(ctx, command).await? {
                let embeds = [reply.embed];
                http.create_message(channel_id)
                    .embeds(&embeds)
                    .components(&reply.components)
                    .await
                    .map_err(|e| Error::Platform(format!("Error sending Discord message: {e:?}")))?;
            }
        }
        DiscordEvent::Component { interaction } => {
            let Some(InteractionData::MessageComponent(data)) = &interaction.data else {
                return Ok(());
            };
            let actor = interaction.author().map(|u| u.name.clone()).unwrap_or_default();
            debug!("{actor} pressed '{}'", data.custom_id);

            if let Some(response) = handle_component(ctx, data, &actor).await? {
                http.interaction(interaction.application_id)
                    .create_response(interaction.id, &interaction.token, &response)
                    .await
                    .map_err(|e| Error::Platform(format!("Error responding to interaction: {e:?}")))?;
            }
        }
    }
    Ok(())
}

/// Gateway shards plus the HTTP client, and the single receiver every
/// shard forwards into.
pub struct DiscordPlatform {
    pub token: String,
    pub connection_status: ConnectionStatus,

    pub rx: Mutex<Option<UnboundedReceiver<DiscordEvent>>>,

    pub shard_tasks: Vec<JoinHandle<()>>,
    pub shard_senders: Vec<MessageSender>,

    pub http: Option<Arc<HttpClient>>,
}

impl DiscordPlatform {
    pub fn new(token: String) -> Self {
        Self {
            token,
            connection_status: ConnectionStatus::Disconnected,
            rx: Mutex::new(None),
            shard_tasks: Vec::new(),
            shard_senders: Vec::new(),
            http: None,
        }
    }

    pub fn authenticate(&self) -> Result<(), Error> {
        if self.token.trim().is_empty() {
            return Err(Error::Auth("Discord token is empty".into()));
        }
        Ok(())
    }

    /// Connect, create the event channel, and spawn one runner per shard.
    pub async fn connect(&mut self, command_prefix: &str) -> Result<(), Error> {
        if matches!(self.connection_status, ConnectionStatus::Connected) {
            info!("(DiscordPlatform) Already connected => skipping");
            return Ok(());
        }
        self.authenticate()?;

        let (tx, rx) = unbounded_channel::<DiscordEvent>();
        {
            let mut guard = self.rx.lock().await;
            *guard = Some(rx);
        }

        let http_client = Arc::new(
            ClientBuilder::new()
                .token(self.token.clone())
                .timeout(Duration::from_secs(30))
                .build()
        );
        self.http = Some(http_client.clone());

        let config = Config::new(
            self.token.clone(),
            Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::DIRECT_MESSAGES | Intents::MESSAGE_CONTENT,
        );

        let shards = match gateway::create_recommended(&http_client, config, |_, b| b.build()).await {
            Ok(shards) => shards,
            Err(e) => {
                self.connection_status = ConnectionStatus::Error(e.to_string());
                return Err(Error::Platform(format!("create_recommended error: {e}")));
            }
        };

        let command_prefix: Arc<str> = Arc::from(command_prefix);
        for shard in shards {
            self.shard_senders.push(shard.sender());
            let handle = tokio::spawn(shard_runner(shard, tx.clone(), command_prefix.clone()));
            self.shard_tasks.push(handle);
        }

        self.connection_status = ConnectionStatus::Connected;
        Ok(())
    }

    /// Spawns a task per forwarded event until every shard has stopped, so a
    /// slow reply never delays the next interaction. Roster writes are still
    /// serialized inside `AccountService`. A failing handler is only logged.
    pub async fn run(&self, ctx: Arc<EventContext>) -> Result<(), Error> {
        let http = self
            .http
            .clone()
            .ok_or_else(|| Error::Platform("Discord is not connected".into()))?;
        let mut guard = self.rx.lock().await;
        let rx = guard
            .as_mut()
            .ok_or_else(|| Error::Platform("Discord event channel missing".into()))?;

        while let Some(event) = rx.recv().await {
            let http = http.clone();
            let ctx = ctx.clone();
            tokio::spawn(async move {
                if let Err(e) = dispatch(&http, &ctx, event).await {
                    error!("(DiscordPlatform) handler failed => {e}");
                }
            });
        }

        warn!("(DiscordPlatform) all shards stopped; dispatcher exiting");
        Ok(())
    }

    pub async fn disconnect(&mut self) -> Result<(), Error> {
        self.connection_status = ConnectionStatus::Disconnected;

        for sender in &self.shard_senders {
            let _ = sender.close(CloseFrame::NORMAL);
        }
        for task in &mut self.shard_tasks {
            let _ = task.await;
        }

        self.shard_senders.clear();
        self.shard_tasks.clear();

        {
            let mut guard = self.rx.lock().await;
            *guard = None;
        }

        Ok(())
    }
}
