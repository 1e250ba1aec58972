use std::rc::Rc;

use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::has_global;
use crate::models::chat::{room_name, ChatEvent, SOCKET_EVENTS};

#[wasm_bindgen]
extern "C" {
    #[derive(Clone)]
    type Socket;

    #[wasm_bindgen(catch, js_name = io)]
    fn io(url: &str, options: &JsValue) -> Result<Socket, JsValue>;

    #[wasm_bindgen(method)]
    fn on(this: &Socket, event: &str, handler: &Function);

    #[wasm_bindgen(method)]
    fn emit(this: &Socket, event: &str, payload: &JsValue);

    #[wasm_bindgen(method)]
    fn disconnect(this: &Socket);
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SocketOptions {
    transports: [&'static str; 2],
    reconnection: bool,
    reconnection_delay: u32,
    reconnection_attempts: u32,
}

#[derive(Serialize)]
struct JoinRoom<'a> {
    room: &'a str,
    token: Option<&'a str>,
}

/// A socket.io connection joined to one channel's chat room. Disconnects on drop.
pub struct ChatSocket {
    socket: Socket,
    _handlers: Vec<Closure<dyn FnMut(JsValue)>>,
}

impl ChatSocket {
    pub fn is_available() -> bool {
        has_global("io")
    }

    pub fn connect(
        server: &str,
        account: &str,
        token: Option<String>,
        on_event: impl Fn(ChatEvent) + 'static,
    ) -> Result<Self, JsValue> {
        let options = serde_wasm_bindgen::to_value(&SocketOptions {
            transports: ["websocket", "polling"],
            reconnection: true,
            reconnection_delay: 1000,
            reconnection_attempts: 5,
        })?;
        let socket = io(server, &options)?;
        let on_event: Rc<dyn Fn(ChatEvent)> = Rc::new(on_event);
        let room = room_name(account);

        log::info!("connecting to chat server {server}, room {room}");

        let handlers = SOCKET_EVENTS
            .iter()
            .map(|&name| {
                let on_event = on_event.clone();
                let join_socket = socket.clone();
                let room = room.clone();
                let token = token.clone();
                let handler = Closure::wrap(Box::new(move |payload: JsValue| {
                    let value = serde_wasm_bindgen::from_value(payload).unwrap_or(serde_json::Value::Null);
                    let Some(event) = ChatEvent::decode(name, value) else {
                        return;
                    };
                    if event == ChatEvent::Connected {
                        let join = JoinRoom {
                            room: &room,
                            token: token.as_deref(),
                        };
                        match serde_wasm_bindgen::to_value(&join) {
                            Ok(payload) => join_socket.emit("join-room", &payload),
                            Err(e) => log::error!("failed to encode join-room: {e}"),
                        }
                    }
                    on_event(event);
                }) as Box<dyn FnMut(JsValue)>);
                socket.on(name, handler.as_ref().unchecked_ref());
                handler
            })
            .collect();

        Ok(Self {
            socket,
            _handlers: handlers,
        })
    }
}

impl Drop for ChatSocket {
    fn drop(&mut self) {
        log::debug!("disconnecting chat socket");
        self.socket.disconnect();
    }
}
