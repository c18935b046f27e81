use log::{info, warn};

use crate::{
    bounded_list::BoundedList,
    constants::MAX_IDENTITIES,
    error::{StorageFull, StoreRegion},
    storage::{codec::NvCodec, error::BoundsError},
    types::IdentityId,
};

use super::Identity;

/// The durable list of enrolled identities. Only ever grows; ids are
/// assigned sequentially and never reused.
#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    identities: BoundedList<Identity, MAX_IDENTITIES>,
    reset_on_load: bool,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the roster region. An out-of-range count prefix is treated as
    /// corruption: the in-memory roster starts empty and the stale bytes are
    /// overwritten by the next `persist`.
    pub fn load(codec: &NvCodec) -> Self {
        let region = codec.regions().roster;
        match codec.read_region::<Identity>(&region) {
            Ok(records) => {
                let identities = BoundedList::try_from_vec(records).unwrap_or_default();
                info!("Roster loaded: {} identities", identities.len());
                Self {
                    identities,
                    reset_on_load: false,
                }
            }
            Err(corrupt) => {
                warn!("Roster region reset to empty: {}", corrupt);
                Self {
                    identities: BoundedList::new(),
                    reset_on_load: true,
                }
            }
        }
    }

    /// Whether `load` discarded a corrupt region
    pub fn was_reset(&self) -> bool {
        self.reset_on_load
    }

    /// Add an identity under the next sequential id. Fails closed at capacity.
    pub fn append(
        &mut self,
        display_name: &str,
        registration_number: &str,
    ) -> Result<Identity, StorageFull> {
        if self.is_full() {
            return Err(self.full_error());
        }
        let identity = Identity::new(self.next_id(), display_name, registration_number);
        self.identities
            .try_push(identity.clone())
            .map_err(|_| self.full_error())?;
        Ok(identity)
    }

    /// Rewrite the count prefix and every record, then commit
    pub fn persist(&self, codec: &mut NvCodec) -> Result<(), BoundsError> {
        let region = codec.regions().roster;
        codec.write_region(&region, self.identities.iter())?;
        codec.flush();
        Ok(())
    }

    pub fn get(&self, id: IdentityId) -> Option<&Identity> {
        self.identities.iter().find(|identity| identity.id == id)
    }

    /// The id the next `append` will assign
    pub fn next_id(&self) -> IdentityId {
        // bounded by MAX_IDENTITIES, which the layout asserts fits in a u8
        IdentityId::try_from(self.identities.len() + 1).unwrap_or(IdentityId::MAX)
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.identities.is_full()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.identities.iter()
    }

    fn full_error(&self) -> StorageFull {
        StorageFull {
            region: StoreRegion::Roster,
            capacity: self.identities.capacity(),
        }
    }
}

impl PartialEq for RosterStore {
    fn eq(&self, other: &Self) -> bool {
        self.identities == other.identities
    }
}
