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

use core::ffi::CStr;

use spin::Mutex;

use crate::prefix::Prefix;
use crate::sg::{dump_sg_into, SG_STR_LEN};
use crate::trace;

/// Slots in the process-wide pool behind [str_sg_dump].
pub const SG_POOL_SLOTS: usize = 4;

static SG_POOL: Mutex<ScratchPool<SG_POOL_SLOTS, SG_STR_LEN>> = Mutex::new(ScratchPool::new());

/// Handle to a rendered prefix inside a [ScratchPool].
///
/// Valid until the slot is reused N calls later; after that
/// [ScratchPool::get] returns `None`. Generations are 64-bit and never
/// wrap in practice. A handle doesn't record which pool issued it, so
/// only pass it back to the pool it came from.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SgSlot {
    index: usize,
    generation: u64,
}

#[derive(Clone, Copy)]
struct Slot<const SIZE: usize> {
    buf: [u8; SIZE],
    len: usize,
    // 0: never written
    generation: u64,
}

impl<const SIZE: usize> Slot<SIZE> {
    const EMPTY: Self = Self {
        buf: [0; SIZE],
        len: 0,
        generation: 0,
    };

    fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }
}

/// N scratch buffers of SIZE bytes, handed out round-robin.
///
/// At most N results are live at once; the (N+1)-th dump overwrites the
/// oldest. Writes take `&mut self`, so one owner (a worker, a thread-local)
/// drives a pool; the shared instance sits behind a lock, see [str_sg_dump].
pub struct ScratchPool<const N: usize, const SIZE: usize> {
    slots: [Slot<SIZE>; N],
    next: usize,
    generation: u64,
}

impl<const N: usize, const SIZE: usize> Default for ScratchPool<N, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, const SIZE: usize> ScratchPool<N, SIZE> {
    const SIZE_CHECK: () = assert!(
        N >= 2 && SIZE >= 40,
        "scratch pool needs at least 2 slots of 40 bytes"
    );

    pub const fn new() -> Self {
        let () = Self::SIZE_CHECK;
        Self {
            slots: [Slot::EMPTY; N],
            next: 0,
            generation: 0,
        }
    }

    pub const fn slots(&self) -> usize {
        N
    }

    /// Renders `prefix` into the next slot.
    pub fn dump_sg(&mut self, prefix: &Prefix) -> SgSlot {
        let index = self.next;
        self.next = (self.next + 1) % N;
        self.generation += 1;
        let slot = &mut self.slots[index];
        slot.len = dump_sg_into(prefix, &mut slot.buf).len();
        slot.generation = self.generation;
        SgSlot {
            index,
            generation: self.generation,
        }
    }

    /// Renders `prefix` and borrows the text straight away.
    pub fn dump_sg_str(&mut self, prefix: &Prefix) -> &str {
        let handle = self.dump_sg(prefix);
        self.slots[handle.index].as_str()
    }

    /// Text behind `handle`, or `None` once its slot has been reused.
    pub fn get(&self, handle: SgSlot) -> Option<&str> {
        self.live(handle).map(Slot::as_str)
    }

    /// Same as [Self::get], including the terminator.
    pub fn get_cstr(&self, handle: SgSlot) -> Option<&CStr> {
        let slot = self.live(handle)?;
        CStr::from_bytes_with_nul(&slot.buf[..=slot.len]).ok()
    }

    fn live(&self, handle: SgSlot) -> Option<&Slot<SIZE>> {
        let slot = self.slots.get(handle.index)?;
        (slot.generation != 0 && slot.generation == handle.generation).then_some(slot)
    }
}

/// Renders `prefix` through the process-wide pool and hands the text to `f`.
///
/// The pool stays locked while `f` runs. If it is already held (another
/// thread, or `f` itself calling back in) the text goes to a stack buffer
/// instead, so this never blocks.
pub fn str_sg_dump<R>(prefix: &Prefix, f: impl FnOnce(&str) -> R) -> R {
    dump_shared(&SG_POOL, prefix, f)
}

fn dump_shared<const N: usize, const SIZE: usize, R>(
    pool: &Mutex<ScratchPool<N, SIZE>>,
    prefix: &Prefix,
    f: impl FnOnce(&str) -> R,
) -> R {
    match pool.try_lock() {
        Some(mut guard) => f(guard.dump_sg_str(prefix)),
        None => {
            trace!("sg pool busy, rendering on stack");
            let mut buf = [0u8; SG_STR_LEN];
            f(dump_sg_into(prefix, &mut buf))
        }
    }
}
