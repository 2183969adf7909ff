use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{MessageEvent, WebSocket};

use lumio_core::errors::ClientError;
use lumio_core::realtime::{ClientFrame, Scope, ServerFrame, SubscriptionHandle};

use crate::config;

/// One live insert stream. Closing sends an unsubscribe frame and shuts the
/// socket; the handle is held by a `SubscriptionSlot`, which guarantees a view
/// never keeps more than one of these.
pub struct WsSubscription {
    socket: WebSocket,
    scope: Scope,
    open: bool,
}

/// Open a WebSocket scoped to `scope` and invoke `on_insert` with each row
/// delivered for it. Delivery order is whatever the transport provides.
pub fn open_insert_stream(
    scope: Scope,
    on_insert: impl Fn(serde_json::Value) + 'static,
) -> Result<WsSubscription, ClientError> {
    let socket = WebSocket::new(&config::realtime_url())
        .map_err(|e| ClientError::SocketUnavailable(format!("{e:?}")))?;
    socket.set_binary_type(web_sys::BinaryType::Arraybuffer);

    let topic = scope.topic();

    // --- onopen: join the topic ---
    let ws_clone = socket.clone();
    let join_topic = topic.clone();
    let onopen = Closure::<dyn Fn()>::new(move || {
        let frame = ClientFrame::Subscribe { topic: join_topic.clone() };
        if let Ok(json) = serde_json::to_string(&frame) {
            let _ = ws_clone.send_with_str(&json);
        }
    });
    socket.set_onopen(Some(onopen.as_ref().unchecked_ref()));
    onopen.forget();

    // --- onmessage: dispatch insert events for our topic ---
    let expected = topic.clone();
    let onmessage = Closure::<dyn Fn(MessageEvent)>::new(move |ev: MessageEvent| {
        if let Some(text) = ev.data().as_string() {
            match serde_json::from_str::<ServerFrame>(&text) {
                Ok(ServerFrame::Insert { topic, record }) if topic == expected => {
                    on_insert(record);
                }
                Ok(ServerFrame::Insert { topic, .. }) => {
                    log::debug!("Ignoring insert for topic {topic}");
                }
                Ok(ServerFrame::Error { message }) => {
                    log::error!("Realtime error: {message}");
                }
                Err(e) => {
                    log::error!("Bad realtime frame: {e}");
                }
            }
        }
    });
    socket.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
    onmessage.forget();

    // --- onerror ---
    let error_topic = topic;
    let onerror = Closure::<dyn Fn()>::new(move || {
        log::error!("Realtime socket error on {error_topic}");
    });
    socket.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();

    Ok(WsSubscription { socket, scope, open: true })
}

impl SubscriptionHandle for WsSubscription {
    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        let frame = ClientFrame::Unsubscribe { topic: self.scope.topic() };
        if let Ok(json) = serde_json::to_string(&frame) {
            let _ = self.socket.send_with_str(&json);
        }
        if let Err(e) = self.socket.close() {
            log::error!("Failed to close realtime socket: {e:?}");
        }
    }
}

impl Drop for WsSubscription {
    fn drop(&mut self) {
        self.close();
    }
}
