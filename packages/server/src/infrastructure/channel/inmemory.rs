//! InMemory Delivery Channel 実装
//!
//! クライアントごとに tokio の mpsc キューを用意します。
//! `create` で発行したトークンを `attach` に渡すと受信側を取得できます。
//! 受信側が破棄されたクライアントへの送信は `ChannelError::Closed` になります。
//! 再参加すると以前のチャンネルは置き換えられ、未接続のキューは破棄されます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{
    Mutex,
    mpsc::{self, UnboundedReceiver, UnboundedSender},
};

use crate::domain::{ChannelError, ClientId, DeliveryChannel, DeliveryToken, DeliveryTokenFactory};

/// The live channel of one recipient
#[derive(Debug)]
struct Registration {
    token: DeliveryToken,
    sender: UnboundedSender<String>,
}

#[derive(Debug, Default)]
struct ChannelState {
    /// Current channel per recipient
    senders: HashMap<ClientId, Registration>,
    /// Receivers waiting for the participant to attach
    pending: HashMap<DeliveryToken, UnboundedReceiver<String>>,
}

/// インメモリ Delivery Channel 実装
///
/// Clone するとチャンネル表を共有するハンドルが得られます。
#[derive(Debug, Clone, Default)]
pub struct InMemoryDeliveryChannel {
    state: Arc<Mutex<ChannelState>>,
}

impl InMemoryDeliveryChannel {
    /// 新しい InMemoryDeliveryChannel を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// トークンに対応する受信キューを取り出す
    ///
    /// 各トークンは一度だけ使用できます。
    pub async fn attach(&self, token: &DeliveryToken) -> Option<UnboundedReceiver<String>> {
        let mut state = self.state.lock().await;
        state.pending.remove(token)
    }

    /// 接続が終了したトークンのチャンネルを破棄する
    ///
    /// 再参加によって既に置き換えられている場合、新しいチャンネルには触れません。
    pub async fn detach(&self, token: &DeliveryToken) {
        let mut state = self.state.lock().await;
        state.pending.remove(token);
        state
            .senders
            .retain(|_, registration| &registration.token != token);
    }

    /// 受信待ちのキュー数
    pub async fn pending_count(&self) -> usize {
        self.state.lock().await.pending.len()
    }
}

#[async_trait]
impl DeliveryChannel for InMemoryDeliveryChannel {
    async fn create(&self, client_id: &ClientId) -> Result<DeliveryToken, ChannelError> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let token = DeliveryTokenFactory::generate();

        let mut state = self.state.lock().await;
        let registration = Registration {
            token: token.clone(),
            sender,
        };
        // A re-join replaces the previous channel for this recipient.
        if let Some(previous) = state.senders.insert(client_id.clone(), registration) {
            state.pending.remove(&previous.token);
        }
        state.pending.insert(token.clone(), receiver);

        Ok(token)
    }

    async fn send(&self, client_id: &ClientId, message: &str) -> Result<(), ChannelError> {
        let state = self.state.lock().await;
        let registration = state
            .senders
            .get(client_id)
            .ok_or_else(|| ChannelError::UnknownRecipient(client_id.as_str().to_string()))?;
        registration
            .sender
            .send(message.to_string())
            .map_err(|_| ChannelError::Closed(client_id.as_str().to_string()))
    }
}
