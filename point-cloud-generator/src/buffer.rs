/// Fixed-capacity position/colour storage shared by every generator.
///
/// Both arrays are allocated up front and never grow. Generators write through
/// [`PointCloudBuffer::write`], which refuses anything past capacity, so a
/// composition that under-sizes its buffer simply loses its tail points.
#[derive(Debug, Clone)]
pub struct PointCloudBuffer {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
    count: usize,
}

impl PointCloudBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: vec![[0.0; 3]; capacity],
            colors: vec![[0.0; 3]; capacity],
            count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// Number of valid entries, always `<= capacity`.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn remaining(&self, cursor: usize) -> usize {
        self.capacity().saturating_sub(cursor)
    }

    /// Store one point at `cursor` and advance it.
    ///
    /// Returns `false` without touching anything once the buffer is full.
    pub fn write(&mut self, cursor: &mut usize, position: [f32; 3], color: [f32; 3]) -> bool {
        let index = *cursor;
        if index >= self.capacity() {
            return false;
        }

        self.positions[index] = position;
        self.colors[index] = color;
        *cursor = index + 1;
        self.count = self.count.max(*cursor);
        true
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions[..self.count]
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors[..self.count]
    }

    /// Split into the valid position and colour arrays.
    pub fn into_parts(mut self) -> (Vec<[f32; 3]>, Vec<[f32; 3]>) {
        self.positions.truncate(self.count);
        self.colors.truncate(self.count);
        (self.positions, self.colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_advances_cursor_and_count() {
        let mut buffer = PointCloudBuffer::with_capacity(4);
        let mut cursor = 0;

        assert!(buffer.write(&mut cursor, [1.0, 2.0, 3.0], [0.1, 0.2, 0.3]));
        assert!(buffer.write(&mut cursor, [4.0, 5.0, 6.0], [0.4, 0.5, 0.6]));

        assert_eq!(cursor, 2);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.positions()[1], [4.0, 5.0, 6.0]);
        assert_eq!(buffer.colors()[0], [0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_writes_past_capacity_are_dropped() {
        let mut buffer = PointCloudBuffer::with_capacity(2);
        let mut cursor = 0;

        for _ in 0..5 {
            buffer.write(&mut cursor, [1.0; 3], [1.0; 3]);
        }

        assert_eq!(cursor, 2, "cursor must stop at capacity");
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.capacity(), 2, "buffer must never reallocate");
        assert_eq!(buffer.remaining(cursor), 0);
    }

    #[test]
    fn test_into_parts_trims_to_logical_count() {
        let mut buffer = PointCloudBuffer::with_capacity(10);
        let mut cursor = 0;
        buffer.write(&mut cursor, [1.0; 3], [0.5; 3]);

        let (positions, colors) = buffer.into_parts();
        assert_eq!(positions.len(), 1);
        assert_eq!(colors.len(), 1);
    }
}
