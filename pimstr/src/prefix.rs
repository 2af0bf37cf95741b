// Copyright 2023 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::errors::Error;
use core::net::Ipv4Addr;

/// Host length of an IPv4 prefix, in bits.
pub const IPV4_MAX_BITLEN: u8 = 32;

const AF_UNSPEC: u16 = 0;
const AF_INET: u16 = 2;
const AF_INET6: u16 = 10;

/// Address family of a [Prefix].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum AddressFamily {
    Unspec,
    #[default]
    Inet,
    Inet6,
    Other(u16),
}

impl From<u16> for AddressFamily {
    fn from(v: u16) -> Self {
        match v {
            AF_UNSPEC => Self::Unspec,
            AF_INET => Self::Inet,
            AF_INET6 => Self::Inet6,
            _ => Self::Other(v),
        }
    }
}

impl From<AddressFamily> for u16 {
    fn from(af: AddressFamily) -> Self {
        match af {
            AddressFamily::Unspec => AF_UNSPEC,
            AddressFamily::Inet => AF_INET,
            AddressFamily::Inet6 => AF_INET6,
            AddressFamily::Other(v) => v,
        }
    }
}

/// Raw `in_addr`: the `s_addr` word as stored in memory, network byte order.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct InAddr {
    pub s_addr: u32,
}

impl InAddr {
    pub const ANY: InAddr = InAddr { s_addr: 0 };

    pub const fn new(s_addr: u32) -> Self {
        Self { s_addr }
    }
}

impl From<InAddr> for Ipv4Addr {
    fn from(addr: InAddr) -> Self {
        Ipv4Addr::from(addr.s_addr.to_ne_bytes())
    }
}

impl From<Ipv4Addr> for InAddr {
    fn from(addr: Ipv4Addr) -> Self {
        InAddr::new(u32::from_ne_bytes(addr.octets()))
    }
}

/// Multicast routing prefix: a (S,G) pair, or (*,G) when there's no source.
///
/// Populated by the routing layer; the formatters only read it.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Prefix {
    pub family: AddressFamily,
    pub source: Option<Ipv4Addr>,
    pub group: Option<Ipv4Addr>,
    /// Group prefix length, [IPV4_MAX_BITLEN] for a single group.
    pub group_len: u8,
}

impl Prefix {
    /// Fully specified (S,G).
    pub fn sg(source: impl Into<Ipv4Addr>, group: impl Into<Ipv4Addr>) -> Self {
        Self {
            family: AddressFamily::Inet,
            source: Some(source.into()),
            group: Some(group.into()),
            group_len: IPV4_MAX_BITLEN,
        }
    }

    /// Wildcard-source (*,G).
    pub fn star_g(group: impl Into<Ipv4Addr>) -> Self {
        Self {
            family: AddressFamily::Inet,
            source: None,
            group: Some(group.into()),
            group_len: IPV4_MAX_BITLEN,
        }
    }

    pub fn with_group_len(mut self, len: u8) -> Self {
        self.group_len = len;
        self
    }

    pub fn with_family(mut self, family: AddressFamily) -> Self {
        self.family = family;
        self
    }

    /// True for (*,G). An INADDR_ANY source counts as wildcard too.
    pub fn is_wildcard_source(&self) -> bool {
        match self.source {
            None => true,
            Some(s) => s.is_unspecified(),
        }
    }

    /// True when the group covers a range rather than a single address.
    pub fn is_group_range(&self) -> bool {
        self.group_len < IPV4_MAX_BITLEN
    }

    /// Checks everything the formatters would otherwise paper over.
    pub fn validate(&self) -> Result<(), Error> {
        if self.family != AddressFamily::Inet {
            return Err(Error::UnsupportedFamily(self.family));
        }
        if self.group.is_none() {
            return Err(Error::MissingGroup);
        }
        if self.group_len > IPV4_MAX_BITLEN {
            return Err(Error::InvalidGroupLength(self.group_len));
        }
        Ok(())
    }
}
