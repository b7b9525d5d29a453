//! Network domain: ownership queries and transfer.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::network::components::{LocalPeer, NetworkId, NetworkOwner, PeerId};
use crate::network::packets::{Envelope, Packet, PacketError};
use crate::network::transport::NetworkTransport;

/// Errors from replication operations.
#[derive(Debug)]
pub enum ReplicationError {
    /// The local peer tried to mutate an object someone else owns.
    NotOwner {
        entity: Entity,
        owner: PeerId,
        local: PeerId,
    },
    /// The entity is not a replicated door.
    UnknownObject(Entity),
    Packet(PacketError),
}

impl std::fmt::Display for ReplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplicationError::NotOwner {
                entity,
                owner,
                local,
            } => write!(
                f,
                "{} cannot mutate {:?}: owned by {}",
                local, entity, owner
            ),
            ReplicationError::UnknownObject(entity) => {
                write!(f, "{:?} is not a replicated object", entity)
            }
            ReplicationError::Packet(e) => write!(f, "{}", e),
        }
    }
}

impl From<PacketError> for ReplicationError {
    fn from(e: PacketError) -> Self {
        ReplicationError::Packet(e)
    }
}

/// Ownership view over replicated objects plus the outgoing transport.
///
/// Objects without a [`NetworkOwner`] are local-only and always count as
/// owned by this client.
#[derive(SystemParam)]
pub struct Ownership<'w, 's> {
    local: Res<'w, LocalPeer>,
    owners: Query<'w, 's, (Entity, &'static NetworkId, &'static mut NetworkOwner)>,
    transport: ResMut<'w, NetworkTransport>,
}

impl Ownership<'_, '_> {
    pub fn local_peer(&self) -> PeerId {
        self.local.0
    }

    pub fn owner_of(&self, entity: Entity) -> Option<PeerId> {
        self.owners.get(entity).ok().map(|(_, _, owner)| owner.0)
    }

    pub fn network_id(&self, entity: Entity) -> Option<NetworkId> {
        self.owners.get(entity).ok().map(|(_, id, _)| *id)
    }

    pub fn is_local_owner(&self, entity: Entity) -> bool {
        self.owner_of(entity)
            .is_none_or(|owner| owner == self.local.0)
    }

    pub fn find(&self, object: NetworkId) -> Option<Entity> {
        self.owners
            .iter()
            .find(|(_, id, _)| **id == object)
            .map(|(entity, _, _)| entity)
    }

    /// Hand `entity` to `peer` and tell the other peers about it.
    pub fn request(&mut self, entity: Entity, peer: PeerId) -> Result<(), ReplicationError> {
        let local = self.local.0;
        let Ok((_, id, mut owner)) = self.owners.get_mut(entity) else {
            // local-only object
            return Ok(());
        };

        if owner.0 == peer {
            return Ok(());
        }

        debug!("Ownership of {:?} moves {} -> {}", id, owner.0, peer);
        owner.0 = peer;
        let packet = Packet::Ownership {
            object: *id,
            owner: peer,
        };
        self.transport.send(local, &packet)?;
        Ok(())
    }

    /// Record an ownership change announced by another peer.
    pub fn apply_remote(&mut self, object: NetworkId, peer: PeerId) -> bool {
        match self.owners.iter_mut().find(|(_, id, _)| **id == object) {
            Some((_, _, mut owner)) => {
                owner.0 = peer;
                true
            }
            None => false,
        }
    }

    pub fn send(&mut self, packet: &Packet) -> Result<(), ReplicationError> {
        let local = self.local.0;
        self.transport.send(local, packet)?;
        Ok(())
    }

    pub fn take_inbox(&mut self) -> Vec<Envelope> {
        self.transport.take_inbox()
    }
}
