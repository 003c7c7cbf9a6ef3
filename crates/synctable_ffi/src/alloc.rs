//! Foreign block allocation.
//!
//! Every variable-length payload the encoder writes lives in a block
//! allocated here, and the disposer releases it here. Blocks are plain
//! `Vec` storage with ownership handed across the boundary via
//! `into_boxed_slice`/`from_raw_parts`, so an alloc and its free must
//! always agree on element type and length.

/// Allocates a foreign block holding `vec`'s elements and leaks it.
///
/// Returns the block's base pointer and element count. A zero-length
/// vec yields a dangling (aligned, non-null) pointer, which
/// [`free_block`] accepts back.
pub(crate) fn alloc_block<T>(vec: Vec<T>) -> (*mut T, usize) {
    let mut boxed = vec.into_boxed_slice();
    let ptr = boxed.as_mut_ptr();
    let len = boxed.len();
    std::mem::forget(boxed);
    #[cfg(test)]
    LIVE_BLOCKS.with(|c| c.set(c.get() + 1));
    (ptr, len)
}

/// Releases a block previously returned by [`alloc_block`].
///
/// # Safety
///
/// `ptr` and `len` must be exactly the pair a single [`alloc_block`]
/// call returned, with the same element type, and the block must not
/// have been freed already.
pub(crate) unsafe fn free_block<T>(ptr: *mut T, len: usize) {
    #[cfg(test)]
    LIVE_BLOCKS.with(|c| c.set(c.get() - 1));
    drop(Vec::from_raw_parts(ptr, len, len));
}

#[cfg(test)]
thread_local! {
    // Per-thread so parallel tests don't observe each other's blocks.
    static LIVE_BLOCKS: std::cell::Cell<isize> = const { std::cell::Cell::new(0) };
}

/// Number of blocks allocated but not yet freed on this thread.
#[cfg(test)]
pub(crate) fn live_blocks() -> isize {
    LIVE_BLOCKS.with(std::cell::Cell::get)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_free_balances() {
        let before = live_blocks();
        let (ptr, len) = alloc_block(vec![1u8, 2, 3]);
        assert_eq!(len, 3);
        assert_eq!(live_blocks(), before + 1);
        unsafe { free_block(ptr, len) };
        assert_eq!(live_blocks(), before);
    }

    #[test]
    fn empty_block_roundtrips() {
        let before = live_blocks();
        let (ptr, len) = alloc_block(Vec::<f64>::new());
        assert!(!ptr.is_null());
        assert_eq!(len, 0);
        unsafe { free_block(ptr, len) };
        assert_eq!(live_blocks(), before);
    }
}
