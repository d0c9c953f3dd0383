use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::loader::{FileKnowledgeLoader, KnowledgeLoader};
use super::messages::{EngineMessage, KnowledgeStatus};
use crate::brain::{normalize, small_talk, InputAnalyzer, ProcessedInput};
use crate::config::EngineConfig;
use crate::error::AppError;
use crate::knowledge::{KnowledgeBase, KnowledgeDelta, KnowledgeEntry};
use crate::responder::{Resolution, Responder};

/// A handle to the engine actor.
///
/// The actor owns the knowledge base and answers one request at a time, so
/// every caller sees a consistent snapshot. Handles are cheap to clone; the
/// actor stops when the last handle is dropped or on [`EngineHandle::shutdown`].
#[derive(Clone)]
pub struct EngineHandle {
    sender: mpsc::Sender<EngineMessage>,
    timeout: Duration,
}

impl EngineHandle {
    /// Spawns an engine that reads `responses.json` from the configured path.
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_loader(config, FileKnowledgeLoader::new(config.responses_path()))
    }

    /// Spawns an engine backed by any [`KnowledgeLoader`].
    ///
    /// Must be called from within a Tokio runtime. Nothing is loaded until
    /// [`EngineHandle::start_loading`] or [`EngineHandle::load_knowledge`].
    pub fn with_loader<L: KnowledgeLoader>(config: &EngineConfig, loader: L) -> Self {
        let (sender, receiver) = mpsc::channel(config.channel_capacity.max(1));
        let runner = EngineRunner::new(receiver, sender.downgrade(), Arc::new(loader), config);
        tokio::spawn(async move { runner.run().await });
        Self {
            sender,
            timeout: config.request_timeout(),
        }
    }

    async fn send(&self, msg: EngineMessage) -> Result<(), AppError> {
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Engine(e.to_string()))
    }

    async fn request<T>(&self, msg: EngineMessage, recv: oneshot::Receiver<T>) -> Result<T, AppError> {
        self.send(msg).await?;
        timeout(self.timeout, recv)
            .await?
            .map_err(|e| AppError::Engine(e.to_string()))
    }

    /// Answers one user utterance.
    ///
    /// Small talk is recognized first. Until the knowledge base is ready,
    /// other inputs get a "still loading" reply.
    #[instrument(skip(self), fields(request_id = %Uuid::new_v4()))]
    pub async fn respond(&self, input: String) -> Result<Resolution, AppError> {
        let (send, recv) = oneshot::channel();
        self.request(EngineMessage::Respond { input, responder: send }, recv)
            .await
    }

    /// Kicks off loading without waiting for it.
    pub async fn start_loading(&self) -> Result<(), AppError> {
        self.send(EngineMessage::LoadKnowledge { responder: None })
            .await
    }

    /// Loads the knowledge base (once) and waits for the entry count.
    #[instrument(skip(self))]
    pub async fn load_knowledge(&self) -> Result<usize, AppError> {
        let (send, recv) = oneshot::channel();
        self.request(EngineMessage::LoadKnowledge { responder: Some(send) }, recv)
            .await?
    }

    /// Inserts an entry unless its key exists. Returns whether it was new.
    pub async fn upsert_if_absent(&self, entry: KnowledgeEntry) -> Result<bool, AppError> {
        let (send, recv) = oneshot::channel();
        self.request(EngineMessage::UpsertIfAbsent { entry, responder: send }, recv)
            .await?
    }

    /// Applies every insert of a resolution's delta.
    pub async fn apply_delta(&self, delta: &KnowledgeDelta) -> Result<usize, AppError> {
        let mut inserted = 0;
        for entry in &delta.inserts {
            if self.upsert_if_absent(entry.clone()).await? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    pub async fn status(&self) -> Result<KnowledgeStatus, AppError> {
        let (send, recv) = oneshot::channel();
        self.request(EngineMessage::Status { responder: send }, recv)
            .await
    }

    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.send(EngineMessage::Shutdown).await
    }
}

enum KnowledgeState {
    NotLoaded,
    Loading,
    Ready(KnowledgeBase),
    Failed(String),
}

// --- Actor Runner ---
struct EngineRunner<L: KnowledgeLoader> {
    receiver: mpsc::Receiver<EngineMessage>,
    /// Lets background loads report back without keeping the actor alive
    self_sender: mpsc::WeakSender<EngineMessage>,
    loader: Arc<L>,
    responder: Responder,
    analyzer: InputAnalyzer,
    /// Normalized input → analysis
    analysis_cache: LruCache<String, ProcessedInput>,
    knowledge: KnowledgeState,
    load_waiters: Vec<oneshot::Sender<Result<usize, AppError>>>,
}

impl<L: KnowledgeLoader> EngineRunner<L> {
    fn new(
        receiver: mpsc::Receiver<EngineMessage>,
        self_sender: mpsc::WeakSender<EngineMessage>,
        loader: Arc<L>,
        config: &EngineConfig,
    ) -> Self {
        let cache_size = NonZeroUsize::new(config.analysis_cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            receiver,
            self_sender,
            loader,
            responder: Responder::new(config.topic_pick),
            analyzer: InputAnalyzer::new(),
            analysis_cache: LruCache::new(cache_size),
            knowledge: KnowledgeState::NotLoaded,
            load_waiters: Vec::new(),
        }
    }

    async fn run(mut self) {
        info!("Engine started");
        while let Some(msg) = self.receiver.recv().await {
            if let EngineMessage::Shutdown = msg {
                info!("Engine shutting down...");
                break;
            }
            self.handle_message(msg);
        }
        info!("Engine stopped");
    }

    fn handle_message(&mut self, msg: EngineMessage) {
        match msg {
            EngineMessage::Respond { input, responder } => {
                let resolution = self.respond(&input);
                if responder.send(resolution).is_err() {
                    warn!("Caller went away before the reply was ready");
                }
            }
            EngineMessage::LoadKnowledge { responder } => self.handle_load_request(responder),
            EngineMessage::KnowledgeLoaded { result } => self.handle_loaded(result),
            EngineMessage::UpsertIfAbsent { entry, responder } => {
                let result = match &mut self.knowledge {
                    KnowledgeState::Ready(kb) => {
                        let key = entry.key.clone();
                        let inserted = kb.upsert_if_absent(entry);
                        if inserted {
                            debug!("Learned alias '{}'", key);
                        }
                        Ok(inserted)
                    }
                    _ => Err(AppError::KnowledgeNotReady),
                };
                let _ = responder.send(result);
            }
            EngineMessage::Status { responder } => {
                let _ = responder.send(self.status());
            }
            EngineMessage::Shutdown => {}
        }
    }

    fn respond(&mut self, input: &str) -> Resolution {
        let analyzer = self.analyzer;
        let cache = &mut self.analysis_cache;
        let analyze = |normalized: String| {
            if let Some(hit) = cache.get(&normalized) {
                debug!("Analysis cache hit for '{}'", normalized);
                return hit.clone();
            }
            let processed = analyzer.analyze_normalized(normalized.clone());
            cache.put(normalized, processed.clone());
            processed
        };

        match &self.knowledge {
            KnowledgeState::Ready(kb) => self.responder.respond_with(input, Some(kb), analyze),
            KnowledgeState::Failed(_) => self.responder.respond_with(input, None, analyze),
            KnowledgeState::NotLoaded | KnowledgeState::Loading => {
                match small_talk::detect(&normalize(input)) {
                    Some(talk) => Responder::small_talk(talk),
                    None => self.responder.not_ready(),
                }
            }
        }
    }

    fn handle_load_request(&mut self, responder: Option<oneshot::Sender<Result<usize, AppError>>>) {
        if let KnowledgeState::Ready(kb) = &self.knowledge {
            if let Some(responder) = responder {
                let _ = responder.send(Ok(kb.len()));
            }
            return;
        }

        self.load_waiters.extend(responder);
        if matches!(self.knowledge, KnowledgeState::Loading) {
            return;
        }

        self.knowledge = KnowledgeState::Loading;
        let loader = Arc::clone(&self.loader);
        let self_sender = self.self_sender.clone();
        info!("Loading knowledge base from {}", loader.describe());

        tokio::spawn(async move {
            let result = loader.load().await;
            match self_sender.upgrade() {
                Some(sender) => {
                    if sender
                        .send(EngineMessage::KnowledgeLoaded { result })
                        .await
                        .is_err()
                    {
                        warn!("Engine stopped before the knowledge base finished loading");
                    }
                }
                None => debug!("Engine gone, discarding loaded knowledge base"),
            }
        });
    }

    fn handle_loaded(&mut self, result: Result<KnowledgeBase, AppError>) {
        let outcome = match result {
            Ok(kb) => {
                info!("Knowledge base ready with {} entries", kb.len());
                let entries = kb.len();
                self.knowledge = KnowledgeState::Ready(kb);
                Ok(entries)
            }
            Err(e) => {
                error!("Failed to load knowledge base: {}", e);
                self.knowledge = KnowledgeState::Failed(e.to_string());
                Err(e)
            }
        };

        for waiter in self.load_waiters.drain(..) {
            let _ = waiter.send(outcome.clone());
        }
    }

    fn status(&self) -> KnowledgeStatus {
        match &self.knowledge {
            KnowledgeState::NotLoaded => KnowledgeStatus::NotLoaded,
            KnowledgeState::Loading => KnowledgeStatus::Loading,
            KnowledgeState::Ready(kb) => KnowledgeStatus::Ready { entries: kb.len() },
            KnowledgeState::Failed(reason) => KnowledgeStatus::Failed {
                reason: reason.clone(),
            },
        }
    }
}
