use crate::registry::RegistryError;
use beacon_core::{ConnectionId, Role};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Live connections and the role each one registered with.
///
/// Only identities are stored here. The outbound handle of a connection is
/// owned by the transport and resolved through
/// [`SignalingOutput`](crate::signaling::SignalingOutput) at delivery time,
/// so a removed entry can never leave a dangling handle behind.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    entries: DashMap<ConnectionId, Role>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `id` with `role`. A second registration of the same id is
    /// rejected and leaves the original role untouched.
    pub fn register(&self, id: ConnectionId, role: Role) -> Result<(), RegistryError> {
        match self.entries.entry(id) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateRegistration(id)),
            Entry::Vacant(slot) => {
                slot.insert(role);
                Ok(())
            }
        }
    }

    /// Removes `id`, returning the role it held. Absent ids are a no-op.
    pub fn unregister(&self, id: &ConnectionId) -> Option<Role> {
        self.entries.remove(id).map(|(_, role)| role)
    }

    pub fn role_of(&self, id: &ConnectionId) -> Result<Role, RegistryError> {
        self.entries
            .get(id)
            .map(|entry| *entry.value())
            .ok_or(RegistryError::NotFound(*id))
    }

    /// Snapshot of every connection currently holding `role`.
    ///
    /// The returned list is owned, so later registry mutations never show
    /// up in (or disappear from) an iteration that is already under way.
    pub fn connections_with_role(&self, role: Role) -> Vec<ConnectionId> {
        self.entries
            .iter()
            .filter(|entry| *entry.value() == role)
            .map(|entry| *entry.key())
            .collect()
    }

    pub fn count(&self, role: Role) -> usize {
        self.entries
            .iter()
            .filter(|entry| *entry.value() == role)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry. Called when the relay shuts down.
    pub fn clear(&self) {
        self.entries.clear();
    }
}
