//! Network domain: owner-authoritative replication of door state.
//!
//! Only two things cross the wire: ownership changes and the single
//! open/closed flag of each door. Every peer derives the animation locally.

mod components;
mod events;
mod ownership;
mod packets;
mod systems;
mod transport;

pub use components::{LocalPeer, NetworkId, NetworkOwner, PeerId, SyncRequested};
pub use events::OutgoingEnvelope;
pub use ownership::{Ownership, ReplicationError};
pub use packets::{Envelope, Packet, PacketError};
pub use transport::NetworkTransport;

use bevy::prelude::*;

use crate::core::DoorSystems;
use crate::network::systems::{drain_outbox, flush_sync_requests, receive_packets};

pub struct NetworkPlugin;

impl Plugin for NetworkPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LocalPeer>()
            .init_resource::<NetworkTransport>()
            .add_message::<OutgoingEnvelope>()
            .add_systems(Update, receive_packets.in_set(DoorSystems::Receive))
            .add_systems(Update, flush_sync_requests.in_set(DoorSystems::Send))
            .add_systems(Update, drain_outbox.in_set(DoorSystems::Transmit));
    }
}
