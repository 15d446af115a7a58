//! Static backend and metadata tables keyed by (context type, scope).
//!
//! These are plain reference data with no dependency on tension. Type
//! matching is case-insensitive and scope matching ignores case, so
//! `Secrets`/`enterprise` resolves the same as `secrets`/`ENTERPRISE`.

use serde::Serialize;

/// Connectivity of a backend as far as the dashboard is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Connected,
    Degraded,
    Disconnected,
}

impl ConnectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Degraded => "degraded",
            ConnectionStatus::Disconnected => "disconnected",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which backend serves a context type in a given scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackendDescriptor {
    pub name: &'static str,
    pub protocol: &'static str,
    pub encrypted: bool,
    pub status: ConnectionStatus,
}

impl BackendDescriptor {
    pub const UNKNOWN: BackendDescriptor = BackendDescriptor {
        name: "unknown",
        protocol: "none",
        encrypted: false,
        status: ConnectionStatus::Disconnected,
    };

    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

/// Operational metadata shown next to a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetadataBlock {
    pub tier: &'static str,
    pub retention_days: u32,
    pub audited: bool,
    pub replicas: u8,
    pub status: ConnectionStatus,
}

impl MetadataBlock {
    pub const UNKNOWN: MetadataBlock = MetadataBlock {
        tier: "unknown",
        retention_days: 0,
        audited: false,
        replicas: 0,
        status: ConnectionStatus::Disconnected,
    };

    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

const BACKENDS: &[(&str, &str, BackendDescriptor)] = &[
    (
        "secrets",
        "ENTERPRISE",
        BackendDescriptor {
            name: "vault-cluster",
            protocol: "https",
            encrypted: true,
            status: ConnectionStatus::Connected,
        },
    ),
    (
        "secrets",
        "DEVELOPMENT",
        BackendDescriptor {
            name: "vault-dev",
            protocol: "https",
            encrypted: true,
            status: ConnectionStatus::Connected,
        },
    ),
    (
        "secrets",
        "LOCAL-SANDBOX",
        BackendDescriptor {
            name: "os-keychain",
            protocol: "ipc",
            encrypted: true,
            status: ConnectionStatus::Connected,
        },
    ),
    (
        "api",
        "ENTERPRISE",
        BackendDescriptor {
            name: "api-gateway",
            protocol: "https",
            encrypted: true,
            status: ConnectionStatus::Connected,
        },
    ),
    (
        "api",
        "DEVELOPMENT",
        BackendDescriptor {
            name: "api-staging",
            protocol: "https",
            encrypted: true,
            status: ConnectionStatus::Degraded,
        },
    ),
    (
        "api",
        "LOCAL-SANDBOX",
        BackendDescriptor {
            name: "localhost",
            protocol: "http",
            encrypted: false,
            status: ConnectionStatus::Connected,
        },
    ),
    (
        "storage",
        "ENTERPRISE",
        BackendDescriptor {
            name: "object-store",
            protocol: "s3",
            encrypted: true,
            status: ConnectionStatus::Connected,
        },
    ),
    (
        "storage",
        "DEVELOPMENT",
        BackendDescriptor {
            name: "object-store-dev",
            protocol: "s3",
            encrypted: true,
            status: ConnectionStatus::Connected,
        },
    ),
    (
        "storage",
        "LOCAL-SANDBOX",
        BackendDescriptor {
            name: "local-disk",
            protocol: "file",
            encrypted: false,
            status: ConnectionStatus::Connected,
        },
    ),
];

const METADATA: &[(&str, &str, MetadataBlock)] = &[
    (
        "secrets",
        "ENTERPRISE",
        MetadataBlock {
            tier: "production",
            retention_days: 365,
            audited: true,
            replicas: 3,
            status: ConnectionStatus::Connected,
        },
    ),
    (
        "secrets",
        "DEVELOPMENT",
        MetadataBlock {
            tier: "staging",
            retention_days: 90,
            audited: true,
            replicas: 1,
            status: ConnectionStatus::Connected,
        },
    ),
    (
        "secrets",
        "LOCAL-SANDBOX",
        MetadataBlock {
            tier: "sandbox",
            retention_days: 7,
            audited: false,
            replicas: 1,
            status: ConnectionStatus::Connected,
        },
    ),
    (
        "api",
        "ENTERPRISE",
        MetadataBlock {
            tier: "production",
            retention_days: 30,
            audited: true,
            replicas: 3,
            status: ConnectionStatus::Connected,
        },
    ),
    (
        "api",
        "DEVELOPMENT",
        MetadataBlock {
            tier: "staging",
            retention_days: 14,
            audited: false,
            replicas: 1,
            status: ConnectionStatus::Degraded,
        },
    ),
    (
        "api",
        "LOCAL-SANDBOX",
        MetadataBlock {
            tier: "sandbox",
            retention_days: 1,
            audited: false,
            replicas: 1,
            status: ConnectionStatus::Connected,
        },
    ),
    (
        "storage",
        "ENTERPRISE",
        MetadataBlock {
            tier: "production",
            retention_days: 730,
            audited: true,
            replicas: 3,
            status: ConnectionStatus::Connected,
        },
    ),
    (
        "storage",
        "DEVELOPMENT",
        MetadataBlock {
            tier: "staging",
            retention_days: 30,
            audited: false,
            replicas: 2,
            status: ConnectionStatus::Connected,
        },
    ),
    (
        "storage",
        "LOCAL-SANDBOX",
        MetadataBlock {
            tier: "sandbox",
            retention_days: 7,
            audited: false,
            replicas: 1,
            status: ConnectionStatus::Connected,
        },
    ),
];

fn find<T: Copy>(table: &[(&str, &str, T)], context_type: &str, scope: &str) -> Option<T> {
    let context_type = context_type.trim();
    let scope = scope.trim();
    table
        .iter()
        .find(|(t, s, _)| t.eq_ignore_ascii_case(context_type) && s.eq_ignore_ascii_case(scope))
        .map(|(_, _, entry)| *entry)
}

/// Backend serving `context_type` in `scope`, or [`BackendDescriptor::UNKNOWN`].
pub fn backend_descriptor(context_type: &str, scope: &str) -> BackendDescriptor {
    find(BACKENDS, context_type, scope).unwrap_or(BackendDescriptor::UNKNOWN)
}

/// Metadata for `context_type` in `scope`, or [`MetadataBlock::UNKNOWN`].
pub fn metadata_block(context_type: &str, scope: &str) -> MetadataBlock {
    find(METADATA, context_type, scope).unwrap_or(MetadataBlock::UNKNOWN)
}
