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

use arrayvec::{ArrayString, CapacityError};

use crate::bounded::{BoundedWriter, Written};
use crate::errors::Error;
use crate::{trace, Ipv4AddrFormatWrapper};

/// Longest dotted-decimal address plus terminator: "255.255.255.255\0".
pub const INET4_ADDRSTRLEN: usize = 16;

type AddrString = ArrayString<INET4_ADDRSTRLEN>;

fn render(addr: Ipv4Addr) -> Result<AddrString, Error> {
    let mut text = AddrString::new();
    for (i, octet) in addr.octets().iter().enumerate() {
        if i > 0 {
            text.try_push('.').map_err(CapacityError::simplify)?;
        }
        write!(text, "{}", octet)?;
    }
    Ok(text)
}

/// Copies a rendered address, or `onfail` if rendering failed. Returns false on truncation.
fn write_rendered(
    onfail: &str,
    rendered: Result<AddrString, Error>,
    w: &mut BoundedWriter<'_>,
) -> bool {
    match rendered {
        Ok(text) => w.push_str(&text),
        Err(_) => w.push_str(onfail),
    }
}

/// Writes `addr`, or `onfail` if it can't be rendered. Returns false on truncation.
pub(crate) fn dump_into(onfail: &str, addr: Ipv4Addr, w: &mut BoundedWriter<'_>) -> bool {
    let rendered = render(addr);
    if let Err(e) = &rendered {
        trace!(
            "inet4 dump of {} failed: {:?}, using {}",
            Ipv4AddrFormatWrapper::new(&addr),
            e,
            onfail
        );
    }
    write_rendered(onfail, rendered, w)
}

/// Renders `addr` as dotted decimal into `buf`.
///
/// `buf.len()` is the full capacity, terminator included. Text that doesn't
/// fit is cut to `buf.len() - 1` bytes; the buffer is NUL-terminated whenever
/// it is non-empty, and an empty buffer is left alone. `onfail` is written
/// instead if the address can't be rendered at all.
///
/// Never fails; check [Written::truncated] to detect a short buffer.
pub fn inet4_dump(onfail: &str, addr: impl Into<Ipv4Addr>, buf: &mut [u8]) -> Written {
    let mut w = BoundedWriter::new(buf);
    dump_into(onfail, addr.into(), &mut w);
    w.written()
}

/// Same as [inet4_dump], returning the written text.
pub fn inet4_dump_str<'a>(onfail: &str, addr: impl Into<Ipv4Addr>, buf: &'a mut [u8]) -> &'a str {
    let mut w = BoundedWriter::new(buf);
    dump_into(onfail, addr.into(), &mut w);
    w.into_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InAddr;

    fn assert_dotted_quad(text: &str, addr: Ipv4Addr) {
        let mut octets = [0u8; 4];
        let mut count = 0;
        for part in text.split('.') {
            assert!(count < 4, "too many groups in {}", text);
            octets[count] = part.parse::<u8>().unwrap();
            count += 1;
        }
        assert_eq!(count, 4);
        assert_eq!(octets, addr.octets());
    }

    #[test]
    fn test_dump() {
        let mut buf = [0xAAu8; INET4_ADDRSTRLEN];
        let written = inet4_dump("<x>", Ipv4Addr::new(192, 0, 2, 1), &mut buf);
        assert_eq!(
            written,
            Written {
                len: 9,
                truncated: false
            }
        );
        assert_eq!(&buf[..10], b"192.0.2.1\0");
    }

    #[test]
    fn test_longest_fits_exactly() {
        let mut buf = [0xAAu8; INET4_ADDRSTRLEN];
        let written = inet4_dump("<x>", Ipv4Addr::BROADCAST, &mut buf);
        assert!(written.is_complete());
        assert_eq!(&buf, b"255.255.255.255\0");
    }

    #[test]
    fn test_zero_address() {
        let mut buf = [0u8; INET4_ADDRSTRLEN];
        assert_eq!(inet4_dump_str("<x>", InAddr::ANY, &mut buf), "0.0.0.0");
    }

    #[test]
    fn test_octet_sweep() {
        let mut buf = [0u8; INET4_ADDRSTRLEN];
        for v in 0..=255u8 {
            for addr in [
                Ipv4Addr::new(v, 0, 0, 0),
                Ipv4Addr::new(1, v, 10, 100),
                Ipv4Addr::new(255, 99, v, 9),
                Ipv4Addr::new(v, v, v, v),
            ] {
                let text = inet4_dump_str("<x>", addr, &mut buf);
                assert_dotted_quad(text, addr);
            }
        }
    }

    #[test]
    fn test_truncation_sweep() {
        let full = b"255.255.255.255";
        for size in 0..=INET4_ADDRSTRLEN + 2 {
            let mut buf = [0xAAu8; INET4_ADDRSTRLEN + 3];
            let written = inet4_dump("<x>", Ipv4Addr::BROADCAST, &mut buf[..size]);
            if size == 0 {
                assert_eq!(written.len, 0);
                assert_eq!(buf[0], 0xAA);
                continue;
            }
            let expect = full.len().min(size - 1);
            assert_eq!(written.len, expect);
            assert_eq!(written.truncated, expect < full.len());
            assert_eq!(&buf[..expect], &full[..expect]);
            assert_eq!(buf[expect], 0);
            // nothing past the slice was touched
            assert!(buf[size..].iter().all(|b| *b == 0xAA));
        }
    }

    #[test]
    fn test_render_failure_writes_fallback() {
        let mut buf = [0xAAu8; 16];
        let mut w = BoundedWriter::new(&mut buf);
        assert!(write_rendered("<addr?>", Err(Error::Format), &mut w));
        assert_eq!(w.into_str(), "<addr?>");
        assert_eq!(&buf[..8], b"<addr?>\0");
    }

    #[test]
    fn test_fallback_truncated_to_fit() {
        let mut buf = [0xAAu8; 6];
        let mut w = BoundedWriter::new(&mut buf[..4]);
        assert!(!write_rendered("<addr?>", Err(Error::Capacity), &mut w));
        let written = w.written();
        assert_eq!(written.len, 3);
        assert!(written.truncated);
        assert_eq!(&buf, b"<ad\0\xAA\xAA");
    }

    #[test]
    fn test_multibyte_fallback_cut_on_char_boundary() {
        // "ab" then a two byte 'é'; only one byte of it would fit
        let mut buf = [0xAAu8; 4];
        let mut w = BoundedWriter::new(&mut buf);
        assert!(!write_rendered("abéc", Err(Error::Format), &mut w));
        assert_eq!(w.into_str(), "ab");
        assert_eq!(&buf[..3], b"ab\0");
    }

    #[test]
    fn test_render_ok_ignores_fallback() {
        let mut buf = [0u8; INET4_ADDRSTRLEN];
        let mut w = BoundedWriter::new(&mut buf);
        let rendered = render(Ipv4Addr::new(10, 0, 0, 255));
        assert!(write_rendered("<addr?>", rendered, &mut w));
        assert_eq!(w.into_str(), "10.0.0.255");
    }

    #[test]
    fn test_network_order_input() {
        let raw = InAddr::new(u32::from_ne_bytes([239, 1, 1, 1]));
        let mut buf = [0u8; INET4_ADDRSTRLEN];
        assert_eq!(inet4_dump_str("<x>", raw, &mut buf), "239.1.1.1");
    }
}
