use crate::sequence::Sequence;

pub fn total_duration(sequence: &Sequence) -> u64 {
    sequence
        .items()
        .iter()
        .map(|item| u64::from(item.duration))
        .sum()
}

pub fn phase_progress(sequence: &Sequence, index: usize, time_left: u32) -> f64 {
    let Some(item) = sequence.get(index) else {
        return 0.0;
    };

    if item.duration == 0 {
        return 0.0;
    }

    let elapsed = item.duration.saturating_sub(time_left);
    f64::from(elapsed) / f64::from(item.duration)
}

pub fn remaining_estimate(sequence: &Sequence, index: usize, time_left: u32) -> u64 {
    let upcoming: u64 = sequence
        .items()
        .iter()
        .skip(index.saturating_add(1))
        .filter(|item| item.duration > 0)
        .map(|item| u64::from(item.duration))
        .sum();
    u64::from(time_left) + upcoming
}

pub fn format_clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}
