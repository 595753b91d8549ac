//! Linear-memory arena shared with the compiled unit.
//!
//! Wraps the module's exported memory. The arena only grows, in whole
//! pages, and every access re-derives its slice from the store because
//! growth may move the backing allocation.

use super::layout::{PAGE_SIZE, READER_HEADER_SIZE, READER_OFFSET, ReaderHeader, pages_to_grow};
use vlqmap_core::error::{Result, VlqmapError};
use wasmtime::{AsContext, AsContextMut, Memory};

/// The module's memory, viewed as the decode arena.
#[derive(Debug, Clone, Copy)]
pub struct LinearArena {
    memory: Memory,
    max_pages: u64,
}

impl LinearArena {
    /// Wrap `memory`, refusing to grow it past `max_pages`.
    pub fn new(memory: Memory, max_pages: u64) -> Self {
        Self { memory, max_pages }
    }

    /// Current size in bytes.
    pub fn size(&self, store: impl AsContext) -> u64 {
        self.memory.data_size(&store) as u64
    }

    /// Current size in pages.
    pub fn pages(&self, store: impl AsContext) -> u64 {
        self.memory.size(&store)
    }

    /// Make sure the arena holds at least `needed` bytes.
    ///
    /// Returns the number of pages added; zero when the arena was already
    /// large enough. Never shrinks.
    pub fn ensure_capacity(&self, mut store: impl AsContextMut, needed: u64) -> Result<u64> {
        let current = self.size(&store);
        let delta = pages_to_grow(current, needed);
        if delta == 0 {
            return Ok(0);
        }

        let current_pages = self.pages(&store);
        if current_pages + delta > self.max_pages {
            return Err(VlqmapError::ArenaCapacity {
                requested: needed,
                available: self.max_pages * PAGE_SIZE,
            });
        }

        self.memory
            .grow(&mut store, delta)
            .map_err(|_| VlqmapError::ArenaCapacity {
                requested: needed,
                available: current,
            })?;

        tracing::debug!(
            grown_pages = delta,
            total_pages = current_pages + delta,
            needed,
            "Grew decode arena"
        );

        Ok(delta)
    }

    /// Write `data` at `offset`.
    pub fn write_at(&self, mut store: impl AsContextMut, offset: u64, data: &[u8]) -> Result<()> {
        let dest = self
            .memory
            .data_mut(&mut store)
            .get_mut(offset as usize..offset as usize + data.len())
            .ok_or(VlqmapError::ArenaAccess {
                offset,
                size: data.len() as u64,
            })?;
        dest.copy_from_slice(data);
        Ok(())
    }

    /// Copy `size` bytes starting at `offset` out of the arena.
    pub fn read_at(&self, store: impl AsContext, offset: u64, size: u64) -> Result<Vec<u8>> {
        let src = self
            .memory
            .data(&store)
            .get(offset as usize..(offset + size) as usize)
            .ok_or(VlqmapError::ArenaAccess { offset, size })?;
        Ok(src.to_vec())
    }

    /// Lay out a decode of `text`: reader header, the bytes, and a zero
    /// terminator. Grows the arena first if needed.
    ///
    /// Bytes past the terminator are left as they were.
    pub fn write_reader(&self, mut store: impl AsContextMut, text: &[u8]) -> Result<ReaderHeader> {
        let len = u32::try_from(text.len()).map_err(|_| VlqmapError::ArenaCapacity {
            requested: text.len() as u64,
            available: u64::from(u32::MAX),
        })?;
        let header = ReaderHeader::new(len);
        self.ensure_capacity(&mut store, header.extent())?;

        let header_start = READER_OFFSET as usize;
        let str_start = header.str_ptr as usize;
        let str_end = str_start + text.len();
        let out_of_bounds = || VlqmapError::ArenaAccess {
            offset: u64::from(READER_OFFSET),
            size: header.extent() - u64::from(READER_OFFSET),
        };

        let data = self.memory.data_mut(&mut store);
        data.get_mut(header_start..header_start + READER_HEADER_SIZE as usize)
            .ok_or_else(out_of_bounds)?
            .copy_from_slice(&header.to_bytes());
        data.get_mut(str_start..str_end)
            .ok_or_else(out_of_bounds)?
            .copy_from_slice(text);
        *data.get_mut(str_end).ok_or_else(out_of_bounds)? = 0;

        Ok(header)
    }
}
