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

use crate::prefix::AddressFamily;
use arrayvec::CapacityError;

/// Reasons a value could not be rendered.
///
/// The dump functions never return these; they substitute a fallback
/// marker instead. [crate::Prefix::validate] exposes the same checks.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// Family wasn't AF_INET
    UnsupportedFamily(AddressFamily),
    MissingGroup,
    /// Group prefix length above 32 bits
    InvalidGroupLength(u8),
    /// Rendered text did not fit its intermediate buffer
    Capacity,
    Format,
}

impl From<CapacityError> for Error {
    fn from(_: CapacityError) -> Self {
        Error::Capacity
    }
}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Error::Format
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedFamily(af) => write!(f, "unsupported address family {:?}", af),
            Self::MissingGroup => f.write_str("group address missing"),
            Self::InvalidGroupLength(len) => write!(f, "invalid group prefix length {}", len),
            Self::Capacity => f.write_str("capacity error: array full"),
            Self::Format => f.write_str("formatting failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrayvec::ArrayString;
    use core::fmt::Write;

    #[test]
    fn test_conversions() {
        let mut small = ArrayString::<2>::new();
        let err = small.try_push_str("abc").unwrap_err();
        assert_eq!(Error::from(err.simplify()), Error::Capacity);
        assert_eq!(Error::from(core::fmt::Error), Error::Format);
    }

    #[test]
    fn test_display() {
        let mut s = ArrayString::<64>::new();
        write!(s, "{}", Error::InvalidGroupLength(40)).unwrap();
        assert_eq!(s.as_str(), "invalid group prefix length 40");
        s.clear();
        write!(s, "{}", Error::UnsupportedFamily(AddressFamily::Inet6)).unwrap();
        assert_eq!(s.as_str(), "unsupported address family Inet6");
    }
}
