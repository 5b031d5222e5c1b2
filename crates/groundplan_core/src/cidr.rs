//! Subnet roles and deterministic IPv6 derivation.
//!
//! Each subnet's IPv6 /64 is a pure function of the VPC's /56 block, the
//! subnet's division role, and its availability-zone index: the low byte of
//! the fourth hextet becomes `<role nibble><az index>`, so a block
//! `fd12:3456:789a:bc00::/56` yields `fd12:3456:789a:bca0::/64` for the
//! first public subnet, `...:bcb1::/64` for the second private one, and so
//! on.

use crate::id::VpcId;
use ipnet::Ipv6Net;
use serde::{Deserialize, Serialize};
use std::net::Ipv6Addr;

/// Division role of a subnet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubnetRole {
    /// Routed to the internet gateway in both families
    Public,
    /// Outbound-only: NAT for IPv4, egress-only gateway for IPv6
    Private,
    /// No default route in either family
    Isolated,
}

impl SubnetRole {
    /// All roles, in the fixed synthesis order
    pub const ALL: [SubnetRole; 3] = [SubnetRole::Public, SubnetRole::Private, SubnetRole::Isolated];

    /// Role name as used in logical resource names
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Isolated => "isolated",
        }
    }

    /// Suffix letter in the derived IPv6 block (`a`/`b`/`c`)
    #[must_use]
    pub const fn suffix_letter(self) -> char {
        match self {
            Self::Public => 'a',
            Self::Private => 'b',
            Self::Isolated => 'c',
        }
    }

    /// High nibble of the derived byte (`0xa`/`0xb`/`0xc`)
    #[must_use]
    pub const fn nibble(self) -> u8 {
        match self {
            Self::Public => 0xa,
            Self::Private => 0xb,
            Self::Isolated => 0xc,
        }
    }
}

impl std::fmt::Display for SubnetRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// CIDR derivation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CidrError {
    /// The VPC block is not a /56
    #[error("VPC IPv6 block must be a /56, got /{actual}")]
    BlockPrefix {
        /// Prefix length that was provided
        actual: u8,
    },

    /// The /56 is not aligned on a `00::` boundary
    #[error("VPC IPv6 block {block} is not aligned on a 00:: boundary")]
    UnalignedBlock {
        /// Block that was provided
        block: Ipv6Net,
    },

    /// Availability-zone index does not fit in the derived nibble
    #[error("availability-zone index {index} does not fit in a single hex digit")]
    AzIndex {
        /// Index that was provided
        index: usize,
    },
}

/// Derive a subnet's /64 from the VPC block, division role, and AZ index.
///
/// Pure function: identical inputs always yield the identical /64.
///
/// # Errors
///
/// Returns an error if the block is not an aligned /56 or the index does
/// not fit in one hex digit.
pub fn derive_subnet_ipv6(
    vpc_block: Ipv6Net,
    role: SubnetRole,
    az_index: usize,
) -> Result<Ipv6Net, CidrError> {
    if vpc_block.prefix_len() != 56 {
        return Err(CidrError::BlockPrefix {
            actual: vpc_block.prefix_len(),
        });
    }
    if az_index > 0xf {
        return Err(CidrError::AzIndex { index: az_index });
    }

    let mut octets = vpc_block.network().octets();
    if octets[7] != 0 {
        return Err(CidrError::UnalignedBlock { block: vpc_block });
    }
    octets[7] = (role.nibble() << 4) | az_index as u8;

    Ok(Ipv6Net::new(Ipv6Addr::from(octets), 64).expect("64 is a valid IPv6 prefix length"))
}

/// Deterministic stand-in for a provider-assigned IPv6 /56.
///
/// There is no live control plane at synthesis time, so the "request a
/// provider block" step is modeled as a unique-local block whose global
/// bits come from a BLAKE3 hash of the VPC identifier. The low byte of the
/// fourth hextet is zero, keeping the block aligned for role/AZ derivation.
#[must_use]
pub fn provider_assigned_block(vpc_id: VpcId) -> Ipv6Net {
    let digest = blake3::hash(vpc_id.as_uuid().as_bytes());
    let bytes = digest.as_bytes();

    let mut octets = [0u8; 16];
    octets[0] = 0xfd;
    octets[1..7].copy_from_slice(&bytes[0..6]);

    Ipv6Net::new(Ipv6Addr::from(octets), 56).expect("56 is a valid IPv6 prefix length")
}
