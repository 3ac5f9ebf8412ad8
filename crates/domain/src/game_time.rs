use serde::{Deserialize, Serialize};

use crate::error::DomainError;

// =============================================================================
// Time Block
// =============================================================================

/// Number of segments in every time block.
pub const SEGMENTS_PER_BLOCK: u8 = 4;

/// Total segments in a full day (4 blocks of 4 segments).
pub const SEGMENTS_PER_DAY: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBlock {
    Morning,
    Midday,
    Afternoon,
    Evening,
}

impl TimeBlock {
    pub fn display_name(&self) -> &'static str {
        match self {
            TimeBlock::Morning => "Morning",
            TimeBlock::Midday => "Midday",
            TimeBlock::Afternoon => "Afternoon",
            TimeBlock::Evening => "Evening",
        }
    }

    /// Returns the next block in sequence, wrapping Evening back to Morning.
    pub fn next(&self) -> TimeBlock {
        match self {
            TimeBlock::Morning => TimeBlock::Midday,
            TimeBlock::Midday => TimeBlock::Afternoon,
            TimeBlock::Afternoon => TimeBlock::Evening,
            TimeBlock::Evening => TimeBlock::Morning,
        }
    }

    /// Zero-based position of this block within the day.
    pub fn index(&self) -> u8 {
        match self {
            TimeBlock::Morning => 0,
            TimeBlock::Midday => 1,
            TimeBlock::Afternoon => 2,
            TimeBlock::Evening => 3,
        }
    }

    /// Returns all blocks in day order.
    pub fn all() -> [TimeBlock; 4] {
        [
            TimeBlock::Morning,
            TimeBlock::Midday,
            TimeBlock::Afternoon,
            TimeBlock::Evening,
        ]
    }
}

impl std::fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// =============================================================================
// Game Time
// =============================================================================

/// A point in simulation time: day, time block, and segment within the block.
///
/// Both `day` and `segment` are 1-based. The segment is relative to the block,
/// not the day: Evening segment 1 is the 13th segment of the full day.
///
/// `GameTime` is a value type; advancing time returns a new value. The mutable
/// clock lives behind the engine's `ClockPort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTime {
    pub day: u32,
    pub block: TimeBlock,
    pub segment: u8,
}

impl GameTime {
    /// Start of the given day (Morning, segment 1).
    pub fn start_of_day(day: u32) -> Self {
        Self {
            day,
            block: TimeBlock::Morning,
            segment: 1,
        }
    }

    /// Construct a specific point in time, validating the segment range.
    pub fn new(day: u32, block: TimeBlock, segment: u8) -> Result<Self, DomainError> {
        if day < 1 {
            return Err(DomainError::validation("Day must be at least 1"));
        }
        if segment < 1 || segment > SEGMENTS_PER_BLOCK {
            return Err(DomainError::validation(format!(
                "Segment must be between 1 and {} for {}",
                SEGMENTS_PER_BLOCK, block
            )));
        }
        Ok(Self {
            day,
            block,
            segment,
        })
    }

    /// Advances time by the given number of segments, rolling over blocks and
    /// days as needed.
    pub fn advance_segments(self, segments: u32) -> Self {
        let total = self.total_segments_elapsed() + segments;
        Self::from_total_segments(total)
    }

    /// Total segments elapsed since day 1, Morning, segment 1.
    pub fn total_segments_elapsed(&self) -> u32 {
        (self.day - 1) * SEGMENTS_PER_DAY
            + u32::from(self.block.index()) * u32::from(SEGMENTS_PER_BLOCK)
            + u32::from(self.segment - 1)
    }

    fn from_total_segments(total: u32) -> Self {
        let day = total / SEGMENTS_PER_DAY + 1;
        let in_day = total % SEGMENTS_PER_DAY;
        let block = match in_day / u32::from(SEGMENTS_PER_BLOCK) {
            0 => TimeBlock::Morning,
            1 => TimeBlock::Midday,
            2 => TimeBlock::Afternoon,
            _ => TimeBlock::Evening,
        };
        let segment = (in_day % u32::from(SEGMENTS_PER_BLOCK)) as u8 + 1;
        Self {
            day,
            block,
            segment,
        }
    }

    /// Segments remaining in the current block.
    pub fn segments_remaining_in_block(&self) -> u8 {
        SEGMENTS_PER_BLOCK - self.segment
    }

    /// True if this is the final segment of the day.
    pub fn is_last_segment_of_day(&self) -> bool {
        self.block == TimeBlock::Evening && self.segment == SEGMENTS_PER_BLOCK
    }
}

impl Default for GameTime {
    fn default() -> Self {
        Self::start_of_day(1)
    }
}

impl std::fmt::Display for GameTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Day {}, {} {}", self.day, self.block, self.segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_sequence() {
        assert_eq!(TimeBlock::Morning.next(), TimeBlock::Midday);
        assert_eq!(TimeBlock::Evening.next(), TimeBlock::Morning);
    }

    #[test]
    fn test_advance_within_block() {
        let time = GameTime::start_of_day(1).advance_segments(2);
        assert_eq!(time.day, 1);
        assert_eq!(time.block, TimeBlock::Morning);
        assert_eq!(time.segment, 3);
    }

    #[test]
    fn test_advance_rolls_over_block() {
        let time = GameTime::start_of_day(1).advance_segments(4);
        assert_eq!(time.block, TimeBlock::Midday);
        assert_eq!(time.segment, 1);
    }

    #[test]
    fn test_advance_rolls_over_day() {
        let time = GameTime::start_of_day(1).advance_segments(16);
        assert_eq!(time.day, 2);
        assert_eq!(time.block, TimeBlock::Morning);
        assert_eq!(time.segment, 1);
    }

    #[test]
    fn test_total_segments_elapsed() {
        assert_eq!(GameTime::start_of_day(1).total_segments_elapsed(), 0);

        let evening = GameTime::new(1, TimeBlock::Evening, 1).expect("valid time");
        assert_eq!(evening.total_segments_elapsed(), 12);

        let day_two = GameTime::start_of_day(2);
        assert_eq!(day_two.total_segments_elapsed(), 16);
    }

    #[test]
    fn test_segment_range_is_validated() {
        assert!(GameTime::new(1, TimeBlock::Morning, 0).is_err());
        assert!(GameTime::new(1, TimeBlock::Morning, 5).is_err());
        assert!(GameTime::new(0, TimeBlock::Morning, 1).is_err());
    }

    #[test]
    fn test_last_segment_of_day() {
        let time = GameTime::new(1, TimeBlock::Evening, 4).expect("valid time");
        assert!(time.is_last_segment_of_day());
        assert!(!GameTime::start_of_day(1).is_last_segment_of_day());
    }
}
