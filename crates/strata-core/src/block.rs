//! Planar audio block view for the real-time processing path.

/// Maximum number of channels a block view can carry.
///
/// The workstation's patch matrix currently routes at most 32 channels to a
/// single module. Channels beyond this are silently ignored.
pub const MAX_CHANNELS: usize = 32;

/// In-place planar audio block handed to [`Processor::process`].
///
/// Wraps the host-owned channel buffers for one processing callback. The
/// same buffers carry input samples in and processed samples out, matching
/// the patch matrix's treatment of audio and modulation signals.
///
/// # Real-Time Safety
///
/// The view uses fixed-size stack storage; constructing and using it never
/// allocates. It is only valid within a single `process` call.
///
/// # Edge Policy
///
/// Out-of-range channel or sample indices read as `0.0` and write nowhere.
/// The channel space is host-defined, so a module asking for a channel it
/// does not have is not an error.
///
/// [`Processor::process`]: crate::processor::Processor::process
pub struct Block<'a> {
    channels: [Option<&'a mut [f32]>; MAX_CHANNELS],
    num_channels: usize,
    num_samples: usize,
}

impl<'a> Block<'a> {
    /// Create a block view from channel slices.
    ///
    /// Channels beyond [`MAX_CHANNELS`] are silently ignored. Slices longer
    /// than `num_samples` are truncated to it.
    #[inline]
    pub fn new(channels: impl IntoIterator<Item = &'a mut [f32]>, num_samples: usize) -> Self {
        let mut arr: [Option<&'a mut [f32]>; MAX_CHANNELS] = std::array::from_fn(|_| None);
        let mut num_channels = 0;
        for (i, slice) in channels.into_iter().take(MAX_CHANNELS).enumerate() {
            let n = slice.len().min(num_samples);
            let (head, _) = slice.split_at_mut(n);
            arr[i] = Some(head);
            num_channels = i + 1;
        }
        Self {
            channels: arr,
            num_channels,
            num_samples,
        }
    }

    /// Create a block view over raw host memory.
    ///
    /// This is called by the ABI shim, not by module code.
    ///
    /// # Safety
    ///
    /// `channel_data` must point to `num_channels` valid pointers, each
    /// referencing `num_samples` writable `f32` values, all exclusively
    /// borrowed for the lifetime of the returned view.
    #[inline]
    pub unsafe fn from_raw(
        channel_data: *mut *mut f32,
        num_channels: usize,
        num_samples: usize,
    ) -> Self {
        let num_channels = num_channels.min(MAX_CHANNELS);
        let mut arr: [Option<&'a mut [f32]>; MAX_CHANNELS] = std::array::from_fn(|_| None);
        for (i, slot) in arr.iter_mut().take(num_channels).enumerate() {
            let ptr = *channel_data.add(i);
            if !ptr.is_null() {
                *slot = Some(std::slice::from_raw_parts_mut(ptr, num_samples));
            }
        }
        Self {
            channels: arr,
            num_channels,
            num_samples,
        }
    }

    /// Number of channels in this block.
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Number of samples per channel in this block.
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Borrow a channel for reading. `None` when out of range.
    #[inline]
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index)?.as_deref()
    }

    /// Borrow a channel for writing. `None` when out of range.
    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> Option<&mut [f32]> {
        self.channels.get_mut(index)?.as_deref_mut()
    }

    /// Read one sample. Out-of-range indices read as `0.0`.
    #[inline]
    pub fn sample(&self, channel: usize, index: usize) -> f32 {
        self.channel(channel)
            .and_then(|ch| ch.get(index))
            .copied()
            .unwrap_or(0.0)
    }

    /// Write one sample. Out-of-range indices are ignored.
    #[inline]
    pub fn set_sample(&mut self, channel: usize, index: usize, value: f32) {
        if let Some(slot) = self.channel_mut(channel).and_then(|ch| ch.get_mut(index)) {
            *slot = value;
        }
    }

    /// Iterate over all channels immutably.
    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        self.channels
            .iter()
            .take(self.num_channels)
            .filter_map(|c| c.as_deref())
    }
}
