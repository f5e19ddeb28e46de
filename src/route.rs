//! Cluster routing hints. The core never resolves a route to an address itself -- that is the
//! cluster topology/slot-map layer's job (explicitly out of scope) -- it only carries the hint
//! the caller supplied through to the transport.

/// A hint directing an atomic cluster batch to one specific node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SingleNodeRoute {
    /// Route to the primary that owns the given slot.
    SlotPrimary(u16),
    /// Route to a replica of the given slot (load-balanced by the transport).
    SlotReplica(u16),
    /// Route to the node at a specific address, bypassing slot resolution entirely.
    ByAddress { host: String, port: u16 },
}

impl SingleNodeRoute {
    pub fn slot_primary(slot: u16) -> Self {
        Self::SlotPrimary(slot)
    }

    pub fn slot_replica(slot: u16) -> Self {
        Self::SlotReplica(slot)
    }

    pub fn by_address(host: impl Into<String>, port: u16) -> Self {
        Self::ByAddress {
            host: host.into(),
            port,
        }
    }
}
