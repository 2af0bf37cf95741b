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

use core::fmt::Write;
use core::net::Ipv4Addr;

use arrayvec::ArrayString;

use crate::addr::{inet4_dump_str, INET4_ADDRSTRLEN};
use crate::bounded::BoundedWriter;
use crate::prefix::{AddressFamily, Prefix, IPV4_MAX_BITLEN};
use crate::trace;

/// Capacity of one rendered (S,G), terminator included.
/// Worst case "(255.255.255.255,255.255.255.255/31)" is 36 bytes.
pub const SG_STR_LEN: usize = 64;
/// Printed when the source can't be rendered.
pub const SOURCE_FALLBACK: &str = "<source?>";
/// Printed when the group can't be rendered.
pub const GROUP_FALLBACK: &str = "<group?>";
/// Printed in place of the source of a (*,G).
pub const WILDCARD: &str = "*";

/// Owned copy of a rendered (S,G).
pub type SgString = ArrayString<SG_STR_LEN>;

type AddrBuf = [u8; INET4_ADDRSTRLEN];

fn source_part<'b>(prefix: &Prefix, buf: &'b mut AddrBuf) -> &'b str {
    if prefix.family != AddressFamily::Inet {
        return SOURCE_FALLBACK;
    }
    match prefix.source {
        Some(s) if !s.is_unspecified() => inet4_dump_str(SOURCE_FALLBACK, s, buf),
        _ => WILDCARD,
    }
}

/// The group address, if the prefix carries one that can be printed.
fn renderable_group(prefix: &Prefix) -> Option<Ipv4Addr> {
    if prefix.family != AddressFamily::Inet || prefix.group_len > IPV4_MAX_BITLEN {
        return None;
    }
    prefix.group
}

/// Composes "(S,G)" or "(S,G/len)" into `out`.
pub(crate) fn write_sg<W: Write>(prefix: &Prefix, out: &mut W) -> core::fmt::Result {
    let mut src_buf = [0u8; INET4_ADDRSTRLEN];
    let mut grp_buf = [0u8; INET4_ADDRSTRLEN];
    let source = source_part(prefix, &mut src_buf);
    match renderable_group(prefix) {
        Some(g) => {
            let group = inet4_dump_str(GROUP_FALLBACK, g, &mut grp_buf);
            write!(out, "({},{}", source, group)?;
            if prefix.is_group_range() {
                write!(out, "/{}", prefix.group_len)?;
            }
        }
        None => write!(out, "({},{}", source, GROUP_FALLBACK)?,
    }
    out.write_char(')')
}

/// Renders into `buf` with truncation; returns the text.
pub(crate) fn dump_sg_into<'a>(prefix: &Prefix, buf: &'a mut [u8]) -> &'a str {
    if let Err(e) = prefix.validate() {
        trace!("sg dump falling back to markers: {:?}", e);
    }
    let mut w = BoundedWriter::new(buf);
    // BoundedWriter swallows overflow, so this can't fail
    let _ = write_sg(prefix, &mut w);
    w.into_str()
}

/// Owned variant of the pool dump, for text that must outlive pool rotation.
pub fn sg_dump_owned(prefix: &Prefix) -> SgString {
    let mut buf = [0u8; SG_STR_LEN];
    let text = dump_sg_into(prefix, &mut buf);
    let mut out = SgString::new();
    // text is at most SG_STR_LEN - 1 bytes
    let _ = out.try_push_str(text);
    out
}

/// Formats a prefix in place, e.g. `debug!("join {}", SgDisplay(&sg))`.
#[derive(Debug, Clone, Copy)]
pub struct SgDisplay<'a>(pub &'a Prefix);

impl core::fmt::Display for SgDisplay<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut buf = [0u8; SG_STR_LEN];
        let mut w = BoundedWriter::new(&mut buf);
        write_sg(self.0, &mut w)?;
        f.pad(w.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SgDisplay<'_> {
    fn format(&self, f: defmt::Formatter) {
        let mut buf = [0u8; SG_STR_LEN];
        let text = dump_sg_into(self.0, &mut buf);
        defmt::write!(f, "{=str}", text)
    }
}
