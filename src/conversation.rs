//! Per-connection direction tracking
//!
//! The decoder needs to know whether a record travels host → terminal
//! (outbound commands) or terminal → host (inbound responses). A
//! [`ConversationStore`] owned by the caller remembers, per connection, which
//! endpoint is the host, along with the negotiated extended-mode flag.

use std::collections::HashMap;
use std::net::SocketAddr;

use serde::Serialize;

use crate::config::DecoderConfig;

/// Opaque identity of one transport connection, assigned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ConnectionId(pub u64);

/// Direction of a record relative to the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    /// Sent by the host: outbound commands
    Host,
    /// Sent by the terminal: inbound responses
    Terminal,
}

/// Tracked state of one connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationState {
    pub id: ConnectionId,
    pub host: SocketAddr,
    pub terminal: SocketAddr,
    extended: bool,
}

impl ConversationState {
    pub fn new(id: ConnectionId, host: SocketAddr, terminal: SocketAddr) -> Self {
        Self {
            id,
            host,
            terminal,
            extended: false,
        }
    }

    /// Role of the endpoint that sent a record. Anything that is not the
    /// recorded host endpoint is treated as the terminal.
    pub fn role_of(&self, source: SocketAddr) -> Role {
        if source == self.host {
            Role::Host
        } else {
            Role::Terminal
        }
    }

    pub fn is_extended(&self) -> bool {
        self.extended
    }
}

/// Caller-owned map of connection identity to conversation state.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    host_ports: Vec<u16>,
    conversations: HashMap<ConnectionId, ConversationState>,
}

impl ConversationStore {
    pub fn new(config: &DecoderConfig) -> Self {
        Self {
            host_ports: config.host_ports.clone(),
            conversations: HashMap::new(),
        }
    }

    /// Return the state for `id`, creating it on first sight.
    ///
    /// A new conversation takes as host whichever endpoint uses a configured
    /// host port. When neither (or both) do, the destination of this first
    /// record is the host, since the terminal opens the session.
    pub fn lookup_or_create(
        &mut self,
        id: ConnectionId,
        source: SocketAddr,
        destination: SocketAddr,
    ) -> &ConversationState {
        let host_ports = &self.host_ports;
        self.conversations.entry(id).or_insert_with(|| {
            let src_is_host = host_ports.contains(&source.port());
            let dst_is_host = host_ports.contains(&destination.port());
            let (host, terminal) = if src_is_host && !dst_is_host {
                (source, destination)
            } else {
                (destination, source)
            };
            log::debug!("new conversation {:?}: host {} terminal {}", id, host, terminal);
            ConversationState::new(id, host, terminal)
        })
    }

    pub fn get(&self, id: ConnectionId) -> Option<&ConversationState> {
        self.conversations.get(&id)
    }

    /// Role of `source` on a known connection
    pub fn role_of(&self, id: ConnectionId, source: SocketAddr) -> Option<Role> {
        self.get(id).map(|state| state.role_of(source))
    }

    /// Record the negotiated extended-mode flag. Returns false when the
    /// connection is unknown.
    pub fn set_extended(&mut self, id: ConnectionId, extended: bool) -> bool {
        match self.conversations.get_mut(&id) {
            Some(state) => {
                state.extended = extended;
                true
            }
            None => false,
        }
    }

    /// Drop a connection once the caller stops tracking it.
    pub fn remove(&mut self, id: ConnectionId) -> Option<ConversationState> {
        self.conversations.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}
