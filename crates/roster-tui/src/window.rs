// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::ops::Range;

pub const DEFAULT_ROW_HEIGHT: u16 = 1;

/// Scroll window over the visible sequence with a fixed row height. Only
/// positions inside [`RowWindow::visible_range`] are ever projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    offset: usize,
    row_height: u16,
    viewport_height: u16,
}

impl Default for RowWindow {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_HEIGHT)
    }
}

impl RowWindow {
    pub fn new(row_height: u16) -> Self {
        Self {
            offset: 0,
            row_height: row_height.max(1),
            viewport_height: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn row_height(&self) -> u16 {
        self.row_height
    }

    /// Lines available for rows, excluding header and borders.
    pub fn set_viewport_height(&mut self, height: u16) {
        self.viewport_height = height;
    }

    /// Whole rows that fit the viewport; never zero once a viewport exists.
    pub fn capacity(&self) -> usize {
        if self.viewport_height == 0 {
            return 0;
        }
        usize::from(self.viewport_height / self.row_height).max(1)
    }

    pub fn page_size(&self) -> usize {
        self.capacity().max(1)
    }

    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let capacity = self.capacity();
        if len == 0 || capacity == 0 {
            return 0..0;
        }
        let start = self.offset.min(len.saturating_sub(1));
        start..start.saturating_add(capacity).min(len)
    }

    /// Moves the window the minimum distance needed to show `index`.
    pub fn scroll_to_include(&mut self, index: usize, len: usize) {
        if len == 0 {
            self.offset = 0;
            return;
        }
        let index = index.min(len - 1);
        let capacity = self.capacity().max(1);
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + capacity {
            self.offset = index + 1 - capacity;
        }
        self.clamp(len);
    }

    pub fn clamp(&mut self, len: usize) {
        let capacity = self.capacity().max(1);
        self.offset = self.offset.min(len.saturating_sub(capacity));
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Window-relative line to visible-sequence position.
    pub fn position_at_line(&self, line: u16, len: usize) -> Option<usize> {
        if line >= self.viewport_height {
            return None;
        }
        let position = self.offset + usize::from(line / self.row_height);
        self.visible_range(len).contains(&position).then_some(position)
    }
}
