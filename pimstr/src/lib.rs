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

//! PIM string helpers
//!
//! Renders IPv4 addresses and multicast routing prefixes into text for
//! logging and diagnostics, without touching the heap.
//!
//! Two entry points:
//! * [inet4_dump] writes a dotted-decimal address into a caller-owned buffer,
//!   always NUL-terminated, never overflowing.
//! * [ScratchPool::dump_sg] renders a [Prefix] as `(S,G)` or `(*,G)` into the
//!   next slot of a small rotating pool. [str_sg_dump] does the same through
//!   a process-wide pool guarded by a spin lock.
//!
//! For log lines, [SgDisplay] formats a prefix in place, and
//! [sg_dump_owned] returns a fixed-capacity copy that outlives the pool.
//!
//! Basic usage:
//! ```
//! # use core::net::Ipv4Addr;
//! # use pimstr::{inet4_dump_str, Prefix, ScratchPool};
//! let mut buf = [0u8; 16];
//! let text = inet4_dump_str("<addr?>", Ipv4Addr::new(192, 0, 2, 1), &mut buf);
//! assert_eq!(text, "192.0.2.1");
//!
//! let mut pool = ScratchPool::<4, 64>::new();
//! let sg = Prefix::sg(Ipv4Addr::new(192, 0, 2, 1), Ipv4Addr::new(239, 1, 1, 1));
//! assert_eq!(pool.dump_sg_str(&sg), "(192.0.2.1,239.1.1.1)");
//! ```
#![no_std]

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "defmt")]
pub(crate) use defmt::trace;
#[cfg(not(feature = "defmt"))]
pub(crate) use log::trace;

mod addr;
pub mod bounded;
pub mod errors;
mod pool;
mod prefix;
mod sg;

pub use addr::{inet4_dump, inet4_dump_str, INET4_ADDRSTRLEN};
pub use bounded::Written;
pub use pool::{str_sg_dump, ScratchPool, SgSlot, SG_POOL_SLOTS};
pub use prefix::{AddressFamily, InAddr, Prefix, IPV4_MAX_BITLEN};
pub use sg::{
    sg_dump_owned, SgDisplay, SgString, GROUP_FALLBACK, SG_STR_LEN, SOURCE_FALLBACK, WILDCARD,
};

mod nonstd;
use nonstd::Ipv4AddrFormatWrapper;
